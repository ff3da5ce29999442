//! Theme application target
//!
//! The provider applies the active theme as a root class (`theme-<key>`) plus
//! inline custom properties. [`DocumentRoot`] is the in-process target used by
//! server-side rendering and tests.

use crate::tokens::CssVariables;
use indexmap::IndexSet;
use thiserror::Error;

/// Theme could not be applied to the target
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct ApplyError(pub String);

/// Prefix shared by every theme class
pub const THEME_CLASS_PREFIX: &str = "theme-";

/// Something the active theme is applied to
pub trait ThemeTarget: Send {
    fn apply_theme(&mut self, class: &str, variables: &CssVariables) -> Result<(), ApplyError>;
}

/// Root element model: class list plus inline style variables
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentRoot {
    classes: IndexSet<String>,
    style: CssVariables,
}

impl DocumentRoot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Root with pre-existing, unrelated classes (`dark`, `font-sans`, ...)
    pub fn with_classes<I, S>(classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            classes: classes.into_iter().map(Into::into).collect(),
            style: CssVariables::new(),
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }

    /// Space separated `class` attribute value
    pub fn class_attr(&self) -> String {
        self.classes().collect::<Vec<_>>().join(" ")
    }

    pub fn style_var(&self, name: &str) -> Option<&str> {
        self.style.get(name).map(String::as_str)
    }

    /// Inline `style` attribute value
    pub fn style_attr(&self) -> String {
        self.style
            .iter()
            .map(|(k, v)| format!("{k}: {v};"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl ThemeTarget for DocumentRoot {
    fn apply_theme(&mut self, class: &str, variables: &CssVariables) -> Result<(), ApplyError> {
        if !class.starts_with(THEME_CLASS_PREFIX) || class.len() == THEME_CLASS_PREFIX.len() {
            return Err(ApplyError(format!("not a theme class: {class:?}")));
        }
        self.classes.retain(|c| !c.starts_with(THEME_CLASS_PREFIX));
        self.classes.insert(class.to_string());
        for (name, value) in variables {
            self.style.insert(name.clone(), value.clone());
        }
        Ok(())
    }
}
