//! User-facing notifications for design errors
//!
//! Most errors recover silently. When a notification surface is listening,
//! each error becomes a dismissible, auto-hiding notice with recovery actions
//! suited to its kind.

use crate::error::{DesignError, DesignErrorKind};
use crate::locale::Locale;
use std::time::{Duration, Instant};

/// Visual severity of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The site recovered on its own
    Warning,
    /// Something on the page failed
    Error,
}

/// Action a notification can offer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecoveryAction {
    ReselectDesign,
    Retry,
    ClearUrl,
    Refresh,
    GoHome,
}

impl RecoveryAction {
    pub fn label(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::ReselectDesign, Locale::Fr) => "Choisir un autre design",
            (Self::ReselectDesign, Locale::En) => "Pick another design",
            (Self::Retry, Locale::Fr) => "Réessayer",
            (Self::Retry, Locale::En) => "Retry",
            (Self::ClearUrl, Locale::Fr) => "Nettoyer l'adresse",
            (Self::ClearUrl, Locale::En) => "Clear the URL",
            (Self::Refresh, Locale::Fr) => "Actualiser la page",
            (Self::Refresh, Locale::En) => "Refresh the page",
            (Self::GoHome, Locale::Fr) => "Retour à l'accueil",
            (Self::GoHome, Locale::En) => "Go home",
        }
    }
}

/// Suggested actions for an error kind, most relevant first
pub fn suggested_actions(kind: DesignErrorKind) -> &'static [RecoveryAction] {
    use RecoveryAction::*;
    match kind {
        DesignErrorKind::InvalidDesignParameter => &[ReselectDesign, ClearUrl],
        DesignErrorKind::MissingDesignContext => &[ReselectDesign, GoHome],
        DesignErrorKind::ThemeApplicationFailure => &[Retry, Refresh],
        DesignErrorKind::UrlParsingError => &[ClearUrl, GoHome],
        DesignErrorKind::ContextProviderError => &[Retry, Refresh, GoHome],
    }
}

fn title(kind: DesignErrorKind, locale: Locale) -> &'static str {
    match (kind, locale) {
        (DesignErrorKind::InvalidDesignParameter, Locale::Fr) => "Design inconnu",
        (DesignErrorKind::InvalidDesignParameter, Locale::En) => "Unknown design",
        (DesignErrorKind::MissingDesignContext, Locale::Fr) => "Aucun design sélectionné",
        (DesignErrorKind::MissingDesignContext, Locale::En) => "No design selected",
        (DesignErrorKind::ThemeApplicationFailure, Locale::Fr) => "Thème non appliqué",
        (DesignErrorKind::ThemeApplicationFailure, Locale::En) => "Theme not applied",
        (DesignErrorKind::UrlParsingError, Locale::Fr) => "Adresse invalide",
        (DesignErrorKind::UrlParsingError, Locale::En) => "Invalid address",
        (DesignErrorKind::ContextProviderError, Locale::Fr) => "Erreur d'affichage",
        (DesignErrorKind::ContextProviderError, Locale::En) => "Display error",
    }
}

/// A single visible notice
#[derive(Debug, Clone)]
pub struct DesignNotification {
    pub id: u64,
    pub severity: Severity,
    pub title: &'static str,
    pub message: String,
    pub actions: &'static [RecoveryAction],
    pub error: DesignError,
    shown_at: Instant,
    auto_hide: Option<Duration>,
    dismissed: bool,
}

impl DesignNotification {
    pub fn from_error(id: u64, error: DesignError, locale: Locale, now: Instant) -> Self {
        let severity = match error.kind {
            DesignErrorKind::ThemeApplicationFailure | DesignErrorKind::ContextProviderError => {
                Severity::Error
            }
            _ => Severity::Warning,
        };
        let message = match (error.fallback_used, locale) {
            (Some(fallback), Locale::Fr) => format!(
                "{} Design utilisé : {}.",
                error.message,
                fallback.label(locale)
            ),
            (Some(fallback), Locale::En) => format!(
                "{} Using design: {}.",
                error.message,
                fallback.label(locale)
            ),
            (None, _) => error.message.clone(),
        };
        Self {
            id,
            severity,
            title: title(error.kind, locale),
            message,
            actions: suggested_actions(error.kind),
            error,
            shown_at: now,
            auto_hide: None,
            dismissed: false,
        }
    }

    pub fn with_auto_hide(mut self, after: Duration) -> Self {
        self.auto_hide = Some(after);
        self
    }

    pub fn dismiss(&mut self) {
        self.dismissed = true;
    }

    pub fn is_visible(&self, now: Instant) -> bool {
        if self.dismissed {
            return false;
        }
        match self.auto_hide {
            Some(after) => now.saturating_duration_since(self.shown_at) < after,
            None => true,
        }
    }
}

/// Visible notification set
#[derive(Debug)]
pub struct NotificationCenter {
    locale: Locale,
    auto_hide: Duration,
    next_id: u64,
    items: Vec<DesignNotification>,
}

impl NotificationCenter {
    pub fn new(locale: Locale, auto_hide: Duration) -> Self {
        Self {
            locale,
            auto_hide,
            next_id: 0,
            items: Vec::new(),
        }
    }

    /// Surface an error; returns the notification id.
    ///
    /// Dismissed and expired notifications are dropped first, so the set
    /// stays bounded even when nobody polls [`NotificationCenter::visible`].
    pub fn notify(&mut self, error: &DesignError, now: Instant) -> u64 {
        self.items.retain(|n| n.is_visible(now));
        let id = self.next_id;
        self.next_id += 1;
        let notification = DesignNotification::from_error(id, error.clone(), self.locale, now)
            .with_auto_hide(self.auto_hide);
        self.items.push(notification);
        id
    }

    pub fn dismiss(&mut self, id: u64) -> bool {
        match self.items.iter_mut().find(|n| n.id == id) {
            Some(n) => {
                n.dismiss();
                true
            }
            None => false,
        }
    }

    /// Drop dismissed and expired notifications, return what is still shown
    pub fn visible(&mut self, now: Instant) -> &[DesignNotification] {
        self.items.retain(|n| n.is_visible(now));
        &self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::business::BusinessType;

    #[test]
    fn every_kind_offers_at_least_one_action() {
        for kind in DesignErrorKind::all() {
            assert!(!suggested_actions(*kind).is_empty(), "{kind}");
        }
    }

    #[test]
    fn fallback_is_mentioned_in_the_message() {
        let err = DesignError::invalid_parameter("bogus").with_fallback(BusinessType::AiAgency);
        let n = DesignNotification::from_error(0, err, Locale::En, Instant::now());
        assert_eq!(n.severity, Severity::Warning);
        assert_eq!(n.title, "Unknown design");
        assert!(n.message.ends_with("Using design: AI Agency."));
        assert_eq!(n.actions, &[RecoveryAction::ReselectDesign, RecoveryAction::ClearUrl]);
    }

    #[test]
    fn notifications_auto_hide_and_dismiss() {
        let start = Instant::now();
        let mut center = NotificationCenter::new(Locale::Fr, Duration::from_secs(5));
        let a = center.notify(&DesignError::missing_context(), start);
        let _b = center.notify(&DesignError::context_provider("boom"), start);

        assert_eq!(center.visible(start).len(), 2);
        assert!(center.dismiss(a));
        assert_eq!(center.visible(start).len(), 1);
        assert!(center.visible(start + Duration::from_secs(6)).is_empty());
        assert!(!center.dismiss(a));
    }

    #[test]
    fn notify_prunes_stale_items_without_polling() {
        let start = Instant::now();
        let mut center = NotificationCenter::new(Locale::En, Duration::from_secs(5));
        let first = center.notify(&DesignError::missing_context(), start);
        center.notify(&DesignError::missing_context(), start);
        center.dismiss(first);

        for step in 1..=100u64 {
            let now = start + Duration::from_secs(6 * step);
            center.notify(&DesignError::invalid_parameter("bogus"), now);
        }
        assert_eq!(center.items.len(), 1);
    }
}
