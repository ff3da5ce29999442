//! Business type registry
//!
//! One static [`ThemeDescriptor`] per [`BusinessType`]. Descriptors are never
//! built at runtime; [`BusinessType::theme`] is a total lookup.

use crate::business::BusinessType;
use crate::color::{Color, Gradient, GradientStop};
use crate::tokens::ThemeDescriptor;

const fn hover_shadow(hex: u32) -> Color {
    Color::from_hex(hex).with_alpha(0.25)
}

/// Agency palette (indigo / violet)
pub mod ai_agency {
    use super::*;

    pub const ACCENT: Color = Color::from_hex(0x6366f1);
    pub const DEEP: Color = Color::from_hex(0x8b5cf6);
    pub const STOPS: [GradientStop; 2] =
        [GradientStop::new(0, ACCENT), GradientStop::new(100, DEEP)];

    pub static THEME: ThemeDescriptor = ThemeDescriptor {
        accent: ACCENT,
        gradient: Gradient::linear(135, &STOPS),
        hover_shadow: hover_shadow(0x6366f1),
        border_hover: Color::from_hex(0x818cf8),
        background: Color::from_hex(0xf8fafc),
        surface: Color::WHITE,
        text: Color::from_hex(0x0f172a),
        contrast_text: Color::WHITE,
        copy_key: "hero.aiAgency",
    };
}

/// Medical palette (emerald)
pub mod medical {
    use super::*;

    pub const ACCENT: Color = Color::from_hex(0x10b981);
    pub const DEEP: Color = Color::from_hex(0x059669);
    pub const STOPS: [GradientStop; 2] =
        [GradientStop::new(0, ACCENT), GradientStop::new(100, DEEP)];

    pub static THEME: ThemeDescriptor = ThemeDescriptor {
        accent: ACCENT,
        gradient: Gradient::linear(135, &STOPS),
        hover_shadow: hover_shadow(0x10b981),
        border_hover: Color::from_hex(0x34d399),
        background: Color::from_hex(0xf0fdf4),
        surface: Color::WHITE,
        text: Color::from_hex(0x064e3b),
        contrast_text: Color::WHITE,
        copy_key: "hero.medical",
    };
}

/// Restaurant palette (orange)
pub mod restaurant {
    use super::*;

    pub const ACCENT: Color = Color::from_hex(0xf97316);
    pub const DEEP: Color = Color::from_hex(0xea580c);
    pub const STOPS: [GradientStop; 2] =
        [GradientStop::new(0, ACCENT), GradientStop::new(100, DEEP)];

    pub static THEME: ThemeDescriptor = ThemeDescriptor {
        accent: ACCENT,
        gradient: Gradient::linear(135, &STOPS),
        hover_shadow: hover_shadow(0xf97316),
        border_hover: Color::from_hex(0xfb923c),
        background: Color::from_hex(0xfff7ed),
        surface: Color::WHITE,
        text: Color::from_hex(0x431407),
        contrast_text: Color::WHITE,
        copy_key: "hero.restaurant",
    };
}

/// Garage palette (red on slate)
pub mod auto_garage {
    use super::*;

    pub const ACCENT: Color = Color::from_hex(0xef4444);
    pub const DEEP: Color = Color::from_hex(0xb91c1c);
    pub const STOPS: [GradientStop; 3] = [
        GradientStop::new(0, ACCENT),
        GradientStop::new(60, DEEP),
        GradientStop::new(100, Color::from_hex(0x1f2937)),
    ];

    pub static THEME: ThemeDescriptor = ThemeDescriptor {
        accent: ACCENT,
        gradient: Gradient::linear(120, &STOPS),
        hover_shadow: hover_shadow(0xef4444),
        border_hover: Color::from_hex(0xf87171),
        background: Color::from_hex(0xf3f4f6),
        surface: Color::WHITE,
        text: Color::from_hex(0x1f2937),
        contrast_text: Color::WHITE,
        copy_key: "hero.autoGarage",
    };
}

/// Real estate palette (sky)
pub mod real_estate {
    use super::*;

    pub const ACCENT: Color = Color::from_hex(0x0ea5e9);
    pub const DEEP: Color = Color::from_hex(0x0369a1);
    pub const STOPS: [GradientStop; 2] =
        [GradientStop::new(0, ACCENT), GradientStop::new(100, DEEP)];

    pub static THEME: ThemeDescriptor = ThemeDescriptor {
        accent: ACCENT,
        gradient: Gradient::linear(135, &STOPS),
        hover_shadow: hover_shadow(0x0ea5e9),
        border_hover: Color::from_hex(0x38bdf8),
        background: Color::from_hex(0xf0f9ff),
        surface: Color::WHITE,
        text: Color::from_hex(0x0c4a6e),
        contrast_text: Color::WHITE,
        copy_key: "hero.realEstate",
    };
}

/// Law firm palette (bronze on stone)
pub mod law_firm {
    use super::*;

    pub const ACCENT: Color = Color::from_hex(0xb45309);
    pub const DEEP: Color = Color::from_hex(0x78350f);
    pub const STOPS: [GradientStop; 2] =
        [GradientStop::new(0, ACCENT), GradientStop::new(100, DEEP)];

    pub static THEME: ThemeDescriptor = ThemeDescriptor {
        accent: ACCENT,
        gradient: Gradient::linear(160, &STOPS),
        hover_shadow: hover_shadow(0xb45309),
        border_hover: Color::from_hex(0xd97706),
        background: Color::from_hex(0xfafaf9),
        surface: Color::WHITE,
        text: Color::from_hex(0x1c1917),
        contrast_text: Color::WHITE,
        copy_key: "hero.lawFirm",
    };
}

/// Beauty salon palette (pink)
pub mod beauty_salon {
    use super::*;

    pub const ACCENT: Color = Color::from_hex(0xec4899);
    pub const DEEP: Color = Color::from_hex(0xdb2777);
    pub const STOPS: [GradientStop; 2] =
        [GradientStop::new(0, ACCENT), GradientStop::new(100, DEEP)];

    pub static THEME: ThemeDescriptor = ThemeDescriptor {
        accent: ACCENT,
        gradient: Gradient::linear(135, &STOPS),
        hover_shadow: hover_shadow(0xec4899),
        border_hover: Color::from_hex(0xf472b6),
        background: Color::from_hex(0xfdf2f8),
        surface: Color::WHITE,
        text: Color::from_hex(0x500724),
        contrast_text: Color::WHITE,
        copy_key: "hero.beautySalon",
    };
}

/// Fitness palette (lime). Accent is light, so contrast text is dark.
pub mod fitness {
    use super::*;

    pub const ACCENT: Color = Color::from_hex(0x84cc16);
    pub const DEEP: Color = Color::from_hex(0x4d7c0f);
    pub const STOPS: [GradientStop; 2] =
        [GradientStop::new(0, ACCENT), GradientStop::new(100, DEEP)];

    pub static THEME: ThemeDescriptor = ThemeDescriptor {
        accent: ACCENT,
        gradient: Gradient::linear(135, &STOPS),
        hover_shadow: hover_shadow(0x84cc16),
        border_hover: Color::from_hex(0xa3e635),
        background: Color::from_hex(0xf7fee7),
        surface: Color::WHITE,
        text: Color::from_hex(0x1a2e05),
        contrast_text: Color::from_hex(0x1a2e05),
        copy_key: "hero.fitness",
    };
}

impl BusinessType {
    /// Theme descriptor for this business type
    pub fn theme(self) -> &'static ThemeDescriptor {
        match self {
            Self::AiAgency => &ai_agency::THEME,
            Self::MedicalClinic => &medical::THEME,
            Self::Restaurant => &restaurant::THEME,
            Self::AutoGarage => &auto_garage::THEME,
            Self::RealEstate => &real_estate::THEME,
            Self::LawFirm => &law_firm::THEME,
            Self::BeautySalon => &beauty_salon::THEME,
            Self::Fitness => &fitness::THEME,
        }
    }
}

/// Convenience free function for ergonomic imports.
pub fn design_theme(business: BusinessType) -> &'static ThemeDescriptor {
    business.theme()
}
