use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::{Display, Formatter};
use thiserror::Error;

use crate::business::BusinessType;

/// Classification of design context failures
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DesignErrorKind {
    /// A design value was present but is not a registry key
    InvalidDesignParameter,
    /// No design value was available
    MissingDesignContext,
    /// The theme could not be applied after validation
    ThemeApplicationFailure,
    /// The query string could not be parsed
    UrlParsingError,
    /// A consumer failed while rendering under the provider
    ContextProviderError,
}

impl DesignErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InvalidDesignParameter => "INVALID_DESIGN_PARAMETER",
            Self::MissingDesignContext => "MISSING_DESIGN_CONTEXT",
            Self::ThemeApplicationFailure => "THEME_APPLICATION_FAILURE",
            Self::UrlParsingError => "URL_PARSING_ERROR",
            Self::ContextProviderError => "CONTEXT_PROVIDER_ERROR",
        }
    }

    pub fn all() -> &'static [DesignErrorKind] {
        const ALL: [DesignErrorKind; 5] = [
            DesignErrorKind::InvalidDesignParameter,
            DesignErrorKind::MissingDesignContext,
            DesignErrorKind::ThemeApplicationFailure,
            DesignErrorKind::UrlParsingError,
            DesignErrorKind::ContextProviderError,
        ];
        &ALL
    }
}

impl Display for DesignErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified failure while resolving or applying a design.
///
/// Values are immutable once built; the builder methods consume `self`.
#[derive(Clone, Debug, PartialEq, Error, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[error("{kind}: {message}")]
pub struct DesignError {
    pub kind: DesignErrorKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_used: Option<BusinessType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
    pub timestamp: DateTime<Utc>,
}

impl DesignError {
    pub fn new(kind: DesignErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            fallback_used: None,
            context: None,
            timestamp: Utc::now(),
        }
    }

    pub fn invalid_parameter(value: &str) -> Self {
        Self::new(
            DesignErrorKind::InvalidDesignParameter,
            format!("Unknown design \"{value}\""),
        )
        .with_context(serde_json::json!({ "value": value }))
    }

    pub fn missing_context() -> Self {
        Self::new(
            DesignErrorKind::MissingDesignContext,
            "No design parameter provided",
        )
    }

    pub fn url_parsing(url: &str, reason: impl Display) -> Self {
        Self::new(
            DesignErrorKind::UrlParsingError,
            format!("Could not parse URL: {reason}"),
        )
        .with_context(serde_json::json!({ "url": url }))
    }

    pub fn theme_application(business: BusinessType, reason: impl Display) -> Self {
        Self::new(
            DesignErrorKind::ThemeApplicationFailure,
            format!("Failed to apply theme {}: {reason}", business.id()),
        )
        .with_context(serde_json::json!({ "design": business.key() }))
    }

    pub fn context_provider(reason: impl Display) -> Self {
        Self::new(
            DesignErrorKind::ContextProviderError,
            format!("Render failed under design context: {reason}"),
        )
    }

    pub fn with_fallback(mut self, fallback: BusinessType) -> Self {
        self.fallback_used = Some(fallback);
        self
    }

    pub fn with_context(mut self, context: Value) -> Self {
        self.context = Some(context);
        self
    }
}

/// Persisted preference could not be read or written
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage data is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// History/location access failed
#[derive(Debug, Error)]
pub enum NavigationError {
    #[error("invalid url {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("navigation unavailable: {0}")]
    Unavailable(String),
}

/// Failure raised by a component rendered under the design context
#[derive(Debug, Clone, Error)]
pub enum RenderError {
    #[error("{0}")]
    Failed(String),

    #[error("render panicked: {0}")]
    Panicked(String),
}

/// Configuration could not be loaded
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}
