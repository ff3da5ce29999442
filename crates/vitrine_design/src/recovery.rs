//! Recovery strategy resolver
//!
//! Walks an ordered fallback chain (URL, then storage, then the hard-coded
//! default) and returns the first valid business type. Only reads; applying
//! the result is up to the caller.

use crate::business::BusinessType;
use crate::error::{DesignError, NavigationError, StorageError};
use crate::location::{DesignLocation, Navigator};
use crate::storage::DesignStorage;
use crate::validation::validate_business_type;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use thiserror::Error;

/// One way of obtaining a business type
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecoveryStrategy {
    /// Re-read and re-validate the URL query parameter
    UrlFallback,
    /// Last known-good value persisted by the provider
    LocalStorage,
    /// Hard-coded default, always succeeds
    DefaultDesign,
}

impl RecoveryStrategy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::UrlFallback => "URL_FALLBACK",
            Self::LocalStorage => "LOCAL_STORAGE",
            Self::DefaultDesign => "DEFAULT_DESIGN",
        }
    }
}

impl Display for RecoveryStrategy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Default chain order
pub const DEFAULT_STRATEGIES: [RecoveryStrategy; 3] = [
    RecoveryStrategy::UrlFallback,
    RecoveryStrategy::LocalStorage,
    RecoveryStrategy::DefaultDesign,
];

/// Outcome of one recovery attempt. `business_type` is always valid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecoveryResult {
    pub business_type: BusinessType,
    /// Strategy that produced the value; `None` if the chain was exhausted
    pub strategy: Option<RecoveryStrategy>,
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Error)]
enum StrategyFailure {
    #[error(transparent)]
    Invalid(#[from] DesignError),
    #[error(transparent)]
    Navigation(#[from] NavigationError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Resolver bound to a location source and a storage backend
pub struct DesignRecovery {
    navigator: Arc<dyn Navigator>,
    storage: Arc<dyn DesignStorage>,
    query_param: String,
    storage_key: String,
    default_design: BusinessType,
}

impl DesignRecovery {
    pub fn new(
        navigator: Arc<dyn Navigator>,
        storage: Arc<dyn DesignStorage>,
        query_param: impl Into<String>,
        storage_key: impl Into<String>,
        default_design: BusinessType,
    ) -> Self {
        Self {
            navigator,
            storage,
            query_param: query_param.into(),
            storage_key: storage_key.into(),
            default_design,
        }
    }

    /// Try each strategy in order; the first valid value wins.
    ///
    /// `strategies` defaults to [`DEFAULT_STRATEGIES`]. If a custom chain
    /// without `DefaultDesign` is exhausted, the result is unsuccessful and
    /// carries `current` (or the configured default) so callers always hold a
    /// valid business type.
    pub async fn recover_design_context(
        &self,
        current: Option<BusinessType>,
        strategies: Option<&[RecoveryStrategy]>,
    ) -> RecoveryResult {
        let strategies = strategies.unwrap_or(&DEFAULT_STRATEGIES);

        for &strategy in strategies {
            match self.attempt(strategy).await {
                Ok(business_type) => {
                    tracing::info!(
                        strategy = %strategy,
                        design = business_type.key(),
                        "design context recovered"
                    );
                    return RecoveryResult {
                        business_type,
                        strategy: Some(strategy),
                        success: true,
                        message: format!(
                            "Recovered design {} via {strategy}",
                            business_type.key()
                        ),
                    };
                }
                Err(failure) => {
                    tracing::debug!(strategy = %strategy, "recovery strategy failed: {failure}");
                }
            }
        }

        let business_type = current.unwrap_or(self.default_design);
        tracing::warn!(
            design = business_type.key(),
            "all recovery strategies failed, keeping fallback design"
        );
        RecoveryResult {
            business_type,
            strategy: None,
            success: false,
            message: format!(
                "All recovery strategies failed; falling back to {}",
                business_type.key()
            ),
        }
    }

    async fn attempt(&self, strategy: RecoveryStrategy) -> Result<BusinessType, StrategyFailure> {
        match strategy {
            RecoveryStrategy::UrlFallback => {
                let raw = self.navigator.location()?;
                let location = DesignLocation::parse(&raw)?;
                let value = location.query_param(&self.query_param);
                Ok(validate_business_type(value.as_deref())?)
            }
            RecoveryStrategy::LocalStorage => {
                let value = self.storage.load(&self.storage_key).await?;
                Ok(validate_business_type(value.as_deref())?)
            }
            RecoveryStrategy::DefaultDesign => Ok(self.default_design),
        }
    }
}
