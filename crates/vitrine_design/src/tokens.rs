//! Theme descriptors and the CSS variable contract
//!
//! Visual components never see a [`BusinessType`](crate::BusinessType); they
//! read the `--theme-*` custom properties listed in [`DesignToken`].

use crate::color::{Color, Gradient};
use indexmap::IndexMap;
use serde::Serialize;

/// Custom properties exposed to the page layer.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum DesignToken {
    Accent,
    Gradient,
    HoverShadow,
    BorderHover,
    Background,
    Surface,
    Text,
    ContrastText,
    CardBorder,
    ButtonPrimary,
    ButtonSecondary,
    Muted,
}

impl DesignToken {
    /// Variable name without the `--` prefix
    pub fn name(self) -> &'static str {
        match self {
            Self::Accent => "theme-accent",
            Self::Gradient => "theme-gradient",
            Self::HoverShadow => "theme-hover-shadow",
            Self::BorderHover => "theme-border-hover",
            Self::Background => "theme-background",
            Self::Surface => "theme-surface",
            Self::Text => "theme-text",
            Self::ContrastText => "theme-contrast-text",
            Self::CardBorder => "theme-card-border",
            Self::ButtonPrimary => "theme-button-primary",
            Self::ButtonSecondary => "theme-button-secondary",
            Self::Muted => "theme-muted",
        }
    }

    /// Full custom property name, e.g. `--theme-accent`
    pub fn var_name(self) -> String {
        format!("--{}", self.name())
    }

    pub fn all() -> &'static [DesignToken] {
        const ALL: [DesignToken; 12] = [
            DesignToken::Accent,
            DesignToken::Gradient,
            DesignToken::HoverShadow,
            DesignToken::BorderHover,
            DesignToken::Background,
            DesignToken::Surface,
            DesignToken::Text,
            DesignToken::ContrastText,
            DesignToken::CardBorder,
            DesignToken::ButtonPrimary,
            DesignToken::ButtonSecondary,
            DesignToken::Muted,
        ];
        &ALL
    }
}

/// Ordered map of custom property name (with `--`) to CSS value
pub type CssVariables = IndexMap<String, String>;

/// Concrete visual values for one business type
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeDescriptor {
    pub accent: Color,
    pub gradient: Gradient,
    pub hover_shadow: Color,
    pub border_hover: Color,
    pub background: Color,
    pub surface: Color,
    pub text: Color,
    pub contrast_text: Color,
    /// Marketing copy block shown alongside this theme
    pub copy_key: &'static str,
}

impl ThemeDescriptor {
    /// CSS value for a token. Derived tokens are computed from the base colors.
    pub fn get(&self, token: DesignToken) -> String {
        match token {
            DesignToken::Accent => self.accent.to_css(),
            DesignToken::Gradient => self.gradient.to_css(),
            DesignToken::HoverShadow => self.hover_shadow.to_css(),
            DesignToken::BorderHover => self.border_hover.to_css(),
            DesignToken::Background => self.background.to_css(),
            DesignToken::Surface => self.surface.to_css(),
            DesignToken::Text => self.text.to_css(),
            DesignToken::ContrastText => self.contrast_text.to_css(),
            DesignToken::CardBorder => self.border_hover.with_alpha(0.2).to_css(),
            DesignToken::ButtonPrimary => self.gradient.to_css(),
            DesignToken::ButtonSecondary => self.accent.with_alpha(0.1).to_css(),
            DesignToken::Muted => self.text.with_alpha(0.6).to_css(),
        }
    }

    /// Generate the full CSS variable map, in contract order.
    ///
    /// ```ignore
    /// let vars = BusinessType::MedicalClinic.theme().css_variables();
    /// // vars["--theme-accent"] == "#10b981"
    /// ```
    pub fn css_variables(&self) -> CssVariables {
        DesignToken::all()
            .iter()
            .map(|t| (t.var_name(), self.get(*t)))
            .collect()
    }

    /// Inline `style` attribute value (`--theme-accent: #...; ...`)
    pub fn inline_style(&self) -> String {
        self.css_variables()
            .iter()
            .map(|(k, v)| format!("{k}: {v};"))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// `:root`-style rule block scoped to a selector
    pub fn css_rule(&self, selector: &str) -> String {
        let mut out = format!("{selector} {{\n");
        for (name, value) in self.css_variables() {
            out.push_str(&format!("  {name}: {value};\n"));
        }
        out.push('}');
        out
    }
}
