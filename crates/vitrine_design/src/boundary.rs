//! Error boundary around components rendered under a [`DesignProvider`]
//!
//! The boundary runs a child render, catching both returned errors and
//! panics. On failure the error is logged as `CONTEXT_PROVIDER_ERROR` and a
//! [`FallbackScreen`] is returned instead, so a theming failure never ends in
//! a blank page. The worst case is the manual design picker.

use crate::business::BusinessType;
use crate::document::ThemeTarget;
use crate::error::{DesignError, RenderError};
use crate::locale::Locale;
use crate::provider::{DesignContext, DesignProvider};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

/// Affordances offered by the fallback screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryAction {
    /// Re-render the children with unchanged context
    Retry,
    /// Navigate home without a design parameter
    Reset,
    /// Pick a design directly from the grid
    ManualSelect,
}

impl BoundaryAction {
    pub fn label(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::Retry, Locale::Fr) => "Réessayer",
            (Self::Retry, Locale::En) => "Try again",
            (Self::Reset, Locale::Fr) => "Revenir au design par défaut",
            (Self::Reset, Locale::En) => "Back to the default design",
            (Self::ManualSelect, Locale::Fr) => "Choisir un design",
            (Self::ManualSelect, Locale::En) => "Choose a design",
        }
    }
}

/// One entry of the manual selection grid
#[derive(Debug, Clone, PartialEq)]
pub struct DesignChoice {
    pub business_type: BusinessType,
    pub label: &'static str,
    /// Accent color, used as the swatch
    pub accent: String,
    pub active: bool,
}

/// Build the manual selection grid, marking the active design
pub fn design_choices(active: BusinessType, locale: Locale) -> Vec<DesignChoice> {
    BusinessType::all()
        .iter()
        .map(|&business_type| DesignChoice {
            business_type,
            label: business_type.label(locale),
            accent: business_type.theme().accent.to_css(),
            active: business_type == active,
        })
        .collect()
}

/// What to show in place of the failed subtree
#[derive(Debug, Clone)]
pub struct FallbackScreen {
    pub error: DesignError,
    pub actions: &'static [BoundaryAction],
    pub choices: Vec<DesignChoice>,
}

/// Result of rendering through the boundary
#[derive(Debug)]
pub enum BoundaryOutcome<R> {
    Rendered(R),
    Fallback(FallbackScreen),
}

impl<R> BoundaryOutcome<R> {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }

    pub fn rendered(self) -> Option<R> {
        match self {
            Self::Rendered(r) => Some(r),
            Self::Fallback(_) => None,
        }
    }

    pub fn fallback(self) -> Option<FallbackScreen> {
        match self {
            Self::Rendered(_) => None,
            Self::Fallback(screen) => Some(screen),
        }
    }
}

/// Supervisor for one subtree
#[derive(Debug, Default)]
pub struct ErrorBoundary {
    locale: Locale,
    failure: Option<DesignError>,
}

impl ErrorBoundary {
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            failure: None,
        }
    }

    /// Error currently shown by the fallback screen, if any
    pub fn failure(&self) -> Option<&DesignError> {
        self.failure.as_ref()
    }

    pub fn has_error(&self) -> bool {
        self.failure.is_some()
    }

    /// Render `child` against the provider's current context
    pub fn render<T, R, F>(
        &mut self,
        provider: &mut DesignProvider<T>,
        child: F,
    ) -> BoundaryOutcome<R>
    where
        T: ThemeTarget,
        F: FnOnce(&DesignContext) -> Result<R, RenderError>,
    {
        let ctx = provider.context();
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| child(&ctx)));

        let render_error = match outcome {
            Ok(Ok(rendered)) => {
                self.failure = None;
                return BoundaryOutcome::Rendered(rendered);
            }
            Ok(Err(e)) => e,
            Err(payload) => RenderError::Panicked(panic_message(&*payload)),
        };

        let error = DesignError::context_provider(&render_error).with_context(serde_json::json!({
            "design": ctx.business_type.key(),
        }));
        provider.report_render_failure(error.clone());
        self.failure = Some(error.clone());

        BoundaryOutcome::Fallback(FallbackScreen {
            error,
            actions: &[
                BoundaryAction::Retry,
                BoundaryAction::Reset,
                BoundaryAction::ManualSelect,
            ],
            choices: design_choices(ctx.business_type, self.locale),
        })
    }

    /// Re-render the children; the provider's state is left as is
    pub fn retry<T, R, F>(
        &mut self,
        provider: &mut DesignProvider<T>,
        child: F,
    ) -> BoundaryOutcome<R>
    where
        T: ThemeTarget,
        F: FnOnce(&DesignContext) -> Result<R, RenderError>,
    {
        tracing::debug!("ErrorBoundary::retry");
        self.render(provider, child)
    }

    /// Clear the errant state and go back to the default design
    pub async fn reset<T: ThemeTarget>(&mut self, provider: &mut DesignProvider<T>) {
        self.failure = None;
        provider.reset_to_default().await;
    }

    /// Apply a design picked from the fallback grid
    pub async fn select_manually<T: ThemeTarget>(
        &mut self,
        provider: &mut DesignProvider<T>,
        business: BusinessType,
    ) {
        self.failure = None;
        provider.set_current_design(business).await;
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_lists_every_design_and_marks_the_active_one() {
        let choices = design_choices(BusinessType::Restaurant, Locale::En);
        assert_eq!(choices.len(), BusinessType::all().len());
        let active: Vec<_> = choices.iter().filter(|c| c.active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].business_type, BusinessType::Restaurant);
        assert_eq!(active[0].accent, "#f97316");
    }

    #[test]
    fn panic_payloads_become_messages() {
        assert_eq!(panic_message(&"boom"), "boom");
        assert_eq!(panic_message(&String::from("bang")), "bang");
        assert_eq!(panic_message(&42_u8), "unknown panic");
    }
}
