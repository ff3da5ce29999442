//! Vitrine Design Context
//!
//! Business-type theming for the Vitrine agency site: each page can be shown
//! in the look of a client vertical (medical clinic, restaurant, garage, ...)
//! selected through the `design` query parameter.
//!
//! # Overview
//!
//! - **Registry**: one static [`ThemeDescriptor`] per [`BusinessType`]
//! - **Validation**: untrusted strings are parsed into `Result<BusinessType, DesignError>`
//! - **Error log**: bounded, session-wide [`ErrorLog`] with stats and JSON export
//! - **Recovery**: URL → storage → default fallback chain ([`DesignRecovery`])
//! - **Provider**: single owner of the selection ([`DesignProvider`]), writing
//!   back to the URL, storage and the theme target
//! - **Boundary**: [`ErrorBoundary`] turns render failures into a fallback
//!   screen with retry, reset and a manual picker
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use vitrine_design::{DesignProvider, DocumentRoot, MemoryHistory, MemoryStorage};
//!
//! let history = Arc::new(MemoryHistory::new("/?design=medical"));
//! let storage = Arc::new(MemoryStorage::new());
//! let mut provider = DesignProvider::new(history, storage, DocumentRoot::new());
//!
//! let ctx = provider.mount().await;
//! assert_eq!(ctx.css_variables()["--theme-accent"], "#10b981");
//! ```
//!
//! # CSS contract
//!
//! Visual components only read the `--theme-*` custom properties listed in
//! [`DesignToken`]; they never need to know which business type is active.

pub mod boundary;
pub mod business;
pub mod color;
pub mod config;
pub mod document;
pub mod error;
pub mod locale;
pub mod location;
pub mod logger;
pub mod notification;
pub mod provider;
pub mod recovery;
pub mod registry;
pub mod storage;
pub mod tokens;
pub mod validation;

// Re-export commonly used types
pub use boundary::{
    design_choices, BoundaryAction, BoundaryOutcome, DesignChoice, ErrorBoundary, FallbackScreen,
};
pub use business::BusinessType;
pub use color::{Color, Gradient, GradientStop};
pub use config::DesignConfig;
pub use document::{ApplyError, DocumentRoot, ThemeTarget};
pub use error::{
    ConfigError, DesignError, DesignErrorKind, NavigationError, RenderError, StorageError,
};
pub use locale::Locale;
pub use location::{DesignLocation, MemoryHistory, Navigator};
pub use logger::{export_design_errors, ErrorLog, ErrorLogEntry, ErrorStats};
pub use notification::{DesignNotification, NotificationCenter, RecoveryAction, Severity};
pub use provider::{DesignContext, DesignProvider, ProviderState};
pub use recovery::{DesignRecovery, RecoveryResult, RecoveryStrategy, DEFAULT_STRATEGIES};
pub use registry::design_theme;
pub use storage::{DesignStorage, FileStorage, MemoryStorage, DEFAULT_STORAGE_KEY};
pub use tokens::{CssVariables, DesignToken, ThemeDescriptor};
pub use validation::validate_business_type;
