//! Design context provider
//!
//! The single owner of the current business type for a page tree. Consumers
//! get a read-only [`DesignContext`] snapshot; only the provider's own API
//! changes the selection.
//!
//! State machine:
//!
//! ```text
//! Uninitialized --mount(valid url)--> Valid
//! Uninitialized --mount(invalid/absent)--> Recovering --result--> Valid
//! Valid --recover()--> Recovering --result--> Valid
//! ```
//!
//! Every change is written back to the URL (history replace), to storage, and
//! to the theme target as a `theme-<key>` class plus `--theme-*` variables.

use crate::business::BusinessType;
use crate::config::DesignConfig;
use crate::document::ThemeTarget;
use crate::error::DesignError;
use crate::error::DesignErrorKind;
use crate::location::{DesignLocation, Navigator};
use crate::logger::ErrorLog;
use crate::notification::NotificationCenter;
use crate::recovery::{DesignRecovery, RecoveryResult, RecoveryStrategy, DEFAULT_STRATEGIES};
use crate::storage::DesignStorage;
use crate::tokens::{CssVariables, ThemeDescriptor};
use crate::validation::validate_business_type;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;

/// Provider lifecycle state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProviderState {
    /// Not mounted yet
    Uninitialized,
    /// A recognized business type is active
    Valid,
    /// A recovery attempt is in flight; the UI shows a blocking indicator
    Recovering,
}

/// Read-only view handed to consuming components
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignContext {
    pub business_type: BusinessType,
    pub theme: &'static ThemeDescriptor,
}

impl DesignContext {
    pub fn new(business_type: BusinessType) -> Self {
        Self {
            business_type,
            theme: business_type.theme(),
        }
    }

    pub fn css_variables(&self) -> CssVariables {
        self.theme.css_variables()
    }

    pub fn theme_class(&self) -> String {
        self.business_type.theme_class()
    }
}

/// Called after every effective design change
pub type ChangeCallback = Box<dyn Fn(&DesignContext) + Send + Sync>;

/// Owner of the design selection for one page tree
pub struct DesignProvider<T: ThemeTarget> {
    navigator: Arc<dyn Navigator>,
    storage: Arc<dyn DesignStorage>,
    target: T,
    log: ErrorLog,
    notifications: Option<NotificationCenter>,

    query_param: String,
    storage_key: String,
    home_path: String,
    default_design: BusinessType,
    strategies: Vec<RecoveryStrategy>,

    state: ProviderState,
    current: BusinessType,
    is_recovering: bool,
    last_recovery: Option<RecoveryResult>,
    listeners: Vec<ChangeCallback>,
}

impl<T: ThemeTarget> DesignProvider<T> {
    /// Create an unmounted provider with default configuration, logging to
    /// the session-wide [`ErrorLog`].
    pub fn new(navigator: Arc<dyn Navigator>, storage: Arc<dyn DesignStorage>, target: T) -> Self {
        let defaults = DesignConfig::default();
        Self {
            navigator,
            storage,
            target,
            log: ErrorLog::global().clone(),
            notifications: None,
            query_param: defaults.design.query_param,
            storage_key: defaults.design.storage_key,
            home_path: defaults.design.home_path,
            default_design: defaults.design.default,
            strategies: DEFAULT_STRATEGIES.to_vec(),
            state: ProviderState::Uninitialized,
            current: defaults.design.default,
            is_recovering: false,
            last_recovery: None,
            listeners: Vec::new(),
        }
    }

    pub fn with_config(mut self, config: &DesignConfig) -> Self {
        self.query_param = config.design.query_param.clone();
        self.storage_key = config.design.storage_key.clone();
        self.home_path = config.design.home_path.clone();
        self.default_design = config.design.default;
        self.strategies = config.recovery.strategies.clone();
        if self.state == ProviderState::Uninitialized {
            self.current = config.design.default;
        }
        self
    }

    pub fn with_log(mut self, log: ErrorLog) -> Self {
        self.log = log;
        self
    }

    /// Surface logged errors as notifications
    pub fn with_notifications(mut self, center: NotificationCenter) -> Self {
        self.notifications = Some(center);
        self
    }

    /// Register a change listener
    pub fn on_change<F>(&mut self, callback: F)
    where
        F: Fn(&DesignContext) + Send + Sync + 'static,
    {
        self.listeners.push(Box::new(callback));
    }

    // ========== Accessors ==========

    pub fn state(&self) -> ProviderState {
        self.state
    }

    pub fn is_recovering(&self) -> bool {
        self.is_recovering
    }

    pub fn current_design(&self) -> BusinessType {
        self.current
    }

    pub fn context(&self) -> DesignContext {
        DesignContext::new(self.current)
    }

    /// Theme of the current design. Never fails: the registry is total.
    pub fn design_theme(&self) -> &'static ThemeDescriptor {
        self.current.theme()
    }

    pub fn css_variables(&self) -> CssVariables {
        self.design_theme().css_variables()
    }

    /// Inline `style` value for a wrapper element
    pub fn theme_style(&self) -> String {
        self.design_theme().inline_style()
    }

    pub fn theme_class(&self) -> String {
        self.current.theme_class()
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn log(&self) -> &ErrorLog {
        &self.log
    }

    pub fn notifications_mut(&mut self) -> Option<&mut NotificationCenter> {
        self.notifications.as_mut()
    }

    pub fn last_recovery(&self) -> Option<&RecoveryResult> {
        self.last_recovery.as_ref()
    }

    // ========== Lifecycle ==========

    /// Resolve the initial design from the URL, recovering if needed.
    ///
    /// Only the first call has an effect.
    pub async fn mount(&mut self) -> DesignContext {
        if self.state != ProviderState::Uninitialized {
            tracing::debug!("DesignProvider::mount - already mounted, ignoring");
            return self.context();
        }

        let location = self
            .navigator
            .location()
            .map_err(|e| DesignError::url_parsing("<unavailable>", e))
            .and_then(|raw| {
                DesignLocation::parse(&raw).map_err(|e| DesignError::url_parsing(&raw, e))
            });

        let failure = match &location {
            Ok(loc) => match validate_business_type(loc.query_param(&self.query_param).as_deref()) {
                Ok(business) => {
                    tracing::debug!("DesignProvider::mount - adopting {} from url", business.key());
                    self.adopt(business, true).await;
                    return self.context();
                }
                Err(e) => e,
            },
            Err(e) => e.clone(),
        };

        let result = self.run_recovery().await;
        self.report(failure.clone().with_fallback(result.business_type));

        // Replace an unusable value in the address bar with what is actually shown.
        if failure.kind == DesignErrorKind::InvalidDesignParameter {
            if let Ok(loc) = &location {
                let next = loc.with_query_param(&self.query_param, result.business_type.key());
                self.replace_location(&next);
            }
        }

        self.adopt(result.business_type, true).await;
        self.context()
    }

    /// Re-run the recovery chain on demand.
    ///
    /// Returns `None` when a recovery is already in flight. A recovery whose
    /// future was dropped before completing leaves no trace, so calling this
    /// again afterwards runs a fresh one.
    pub async fn recover(&mut self) -> Option<RecoveryResult> {
        if self.is_recovering {
            tracing::warn!("DesignProvider::recover - recovery already in flight");
            return None;
        }
        let result = self.run_recovery().await;
        self.adopt(result.business_type, true).await;
        Some(result)
    }

    async fn run_recovery(&mut self) -> RecoveryResult {
        // Before mounting there is no "current" design worth keeping.
        let current = (self.state != ProviderState::Uninitialized).then_some(self.current);

        let recovery = DesignRecovery::new(
            Arc::clone(&self.navigator),
            Arc::clone(&self.storage),
            self.query_param.clone(),
            self.storage_key.clone(),
            self.default_design,
        );

        let guard = RecoveryGuard::enter(&mut self.state, &mut self.is_recovering);
        let result = recovery
            .recover_design_context(current, Some(self.strategies.as_slice()))
            .await;
        guard.finish();

        self.last_recovery = Some(result.clone());
        result
    }

    // ========== Selection ==========

    /// Switch to `business`: URL (replace), storage and theme target follow.
    ///
    /// Calling this twice with the same value leaves the same state, URL and
    /// storage as calling it once.
    pub async fn set_current_design(&mut self, business: BusinessType) {
        let url = match self.current_location() {
            Some(loc) => loc,
            None => match DesignLocation::parse(&self.home_path) {
                Ok(home) => home,
                Err(e) => {
                    tracing::error!("home path {:?} is not a valid location: {e}", self.home_path);
                    self.adopt(business, true).await;
                    return;
                }
            },
        };
        let next = url.with_query_param(&self.query_param, business.key());
        self.replace_location(&next);
        self.adopt(business, true).await;
    }

    /// Entry point for untyped input (picker payloads, query strings).
    ///
    /// Invalid values are logged and leave the state unchanged.
    pub async fn select_design(&mut self, value: &str) -> Result<BusinessType, DesignError> {
        match validate_business_type(Some(value)) {
            Ok(business) => {
                self.set_current_design(business).await;
                Ok(business)
            }
            Err(e) => {
                self.report(e.clone());
                Err(e)
            }
        }
    }

    /// Navigate home without a design parameter and fall back to the default.
    ///
    /// The stored preference is cleared so the errant value cannot come back.
    pub async fn reset_to_default(&mut self) {
        let home = self
            .current_location()
            .map(|loc| loc.with_path(&self.home_path).to_string())
            .unwrap_or_else(|| self.home_path.clone());
        if let Err(e) = self.navigator.push(&home) {
            tracing::warn!("DesignProvider::reset_to_default - navigation failed: {e}");
        }
        if let Err(e) = self.storage.remove(&self.storage_key).await {
            tracing::warn!("DesignProvider::reset_to_default - could not clear storage: {e}");
        }
        self.adopt(self.default_design, false).await;
    }

    // ========== Internals ==========

    fn current_location(&mut self) -> Option<DesignLocation> {
        let raw = match self.navigator.location() {
            Ok(raw) => raw,
            Err(e) => {
                self.report(DesignError::url_parsing("<unavailable>", e));
                return None;
            }
        };
        match DesignLocation::parse(&raw) {
            Ok(loc) => Some(loc),
            Err(e) => {
                self.report(DesignError::url_parsing(&raw, e));
                None
            }
        }
    }

    fn replace_location(&self, location: &DesignLocation) {
        if let Err(e) = self.navigator.replace(&location.to_string()) {
            tracing::warn!("DesignProvider - history replace failed: {e}");
        }
    }

    async fn adopt(&mut self, business: BusinessType, persist: bool) {
        let changed = self.current != business || self.state != ProviderState::Valid;
        if changed {
            tracing::debug!(
                "DesignProvider - switching from {} to {}",
                self.current.key(),
                business.key()
            );
        }

        self.current = business;
        self.state = ProviderState::Valid;

        let vars = business.theme().css_variables();
        if let Err(e) = self.target.apply_theme(&business.theme_class(), &vars) {
            self.report(DesignError::theme_application(business, e));
        }

        if persist {
            if let Err(e) = self.storage.store(&self.storage_key, business.key()).await {
                tracing::warn!("DesignProvider - could not persist design: {e}");
            }
        }

        if changed {
            let ctx = self.context();
            for listener in &self.listeners {
                listener(&ctx);
            }
        }
    }

    /// Log an error and surface it when a notification center is attached.
    ///
    /// A missing design is the normal landing case and is logged only.
    fn report(&mut self, error: DesignError) {
        if let Some(center) = self.notifications.as_mut() {
            if error.kind != DesignErrorKind::MissingDesignContext {
                center.notify(&error, Instant::now());
            }
        }
        self.log.log_error(error);
    }

    /// Log an error raised by a consumer rendered under this provider
    pub(crate) fn report_render_failure(&mut self, error: DesignError) {
        self.report(error);
    }
}

/// Marks the provider as recovering for the duration of one recovery.
///
/// If the recovery future is dropped before [`RecoveryGuard::finish`], the
/// previous state is restored so `mount()` and `recover()` stay usable.
struct RecoveryGuard<'a> {
    state: &'a mut ProviderState,
    is_recovering: &'a mut bool,
    previous: ProviderState,
}

impl<'a> RecoveryGuard<'a> {
    fn enter(state: &'a mut ProviderState, is_recovering: &'a mut bool) -> Self {
        let previous = *state;
        *state = ProviderState::Recovering;
        *is_recovering = true;
        Self {
            state,
            is_recovering,
            previous,
        }
    }

    /// Recovery completed; the caller adopts the result next.
    fn finish(mut self) {
        *self.is_recovering = false;
    }
}

impl Drop for RecoveryGuard<'_> {
    fn drop(&mut self) {
        if *self.is_recovering {
            tracing::debug!("DesignProvider - recovery cancelled, restoring {:?}", self.previous);
            *self.is_recovering = false;
            *self.state = self.previous;
        }
    }
}
