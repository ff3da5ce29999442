//! Color and gradient primitives used by theme descriptors
//!
//! Channels are stored as 8-bit sRGB so descriptors can be declared as
//! constants and rendered back to CSS without float drift.

use serde::{Serialize, Serializer};
use std::fmt::{Display, Formatter};

/// sRGB color with straight alpha
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0.0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn from_hex(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xFF) as u8;
        let g = ((hex >> 8) & 0xFF) as u8;
        let b = (hex & 0xFF) as u8;
        Self::rgb(r, g, b)
    }

    pub const fn with_alpha(self, alpha: f32) -> Self {
        Self { a: alpha, ..self }
    }

    /// Parse `#rrggbb` or `rrggbb`
    pub fn parse_hex(s: &str) -> Option<Self> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        if digits.len() != 6 {
            return None;
        }
        u32::from_str_radix(digits, 16).ok().map(Self::from_hex)
    }

    pub fn is_opaque(&self) -> bool {
        self.a >= 1.0
    }

    /// CSS representation: `#rrggbb` when opaque, `rgba(...)` otherwise
    pub fn to_css(&self) -> String {
        if self.is_opaque() {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }

    /// WCAG relative luminance
    pub fn luminance(&self) -> f32 {
        fn channel(c: u8) -> f32 {
            let c = c as f32 / 255.0;
            if c <= 0.03928 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        0.2126 * channel(self.r) + 0.7152 * channel(self.g) + 0.0722 * channel(self.b)
    }

    /// WCAG contrast ratio between two colors (1.0 ..= 21.0)
    pub fn contrast_ratio(&self, other: &Color) -> f32 {
        let (a, b) = (self.luminance(), other.luminance());
        let (hi, lo) = if a > b { (a, b) } else { (b, a) };
        (hi + 0.05) / (lo + 0.05)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_css())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_css())
    }
}

/// Gradient stop (offset in percent)
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct GradientStop {
    pub offset: u8,
    pub color: Color,
}

impl GradientStop {
    pub const fn new(offset: u8, color: Color) -> Self {
        Self { offset, color }
    }
}

/// Linear gradient used for hero backgrounds and primary buttons
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Gradient {
    /// Angle in degrees
    pub angle: u16,
    pub stops: &'static [GradientStop],
}

impl Gradient {
    pub const fn linear(angle: u16, stops: &'static [GradientStop]) -> Self {
        Self { angle, stops }
    }

    /// CSS `linear-gradient(...)` value
    pub fn to_css(&self) -> String {
        let stops: Vec<String> = self
            .stops
            .iter()
            .map(|s| format!("{} {}%", s.color.to_css(), s.offset))
            .collect();
        format!("linear-gradient({}deg, {})", self.angle, stops.join(", "))
    }
}

impl Display for Gradient {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_css())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trips_without_drift() {
        let c = Color::from_hex(0x10b981);
        assert_eq!(c.to_css(), "#10b981");
        assert_eq!(Color::parse_hex("#10b981"), Some(c));
    }

    #[test]
    fn translucent_colors_render_as_rgba() {
        let c = Color::from_hex(0x10b981).with_alpha(0.2);
        assert_eq!(c.to_css(), "rgba(16, 185, 129, 0.2)");
    }

    #[test]
    fn parse_hex_rejects_short_and_garbage_input() {
        assert_eq!(Color::parse_hex("#fff"), None);
        assert_eq!(Color::parse_hex("zzzzzz"), None);
    }

    #[test]
    fn white_on_black_has_max_contrast() {
        let ratio = Color::WHITE.contrast_ratio(&Color::BLACK);
        assert!((ratio - 21.0).abs() < 0.01);
    }

    #[test]
    fn gradient_renders_stops_in_order() {
        const STOPS: [GradientStop; 2] = [
            GradientStop::new(0, Color::from_hex(0x10b981)),
            GradientStop::new(100, Color::from_hex(0x059669)),
        ];
        let g = Gradient::linear(135, &STOPS);
        assert_eq!(
            g.to_css(),
            "linear-gradient(135deg, #10b981 0%, #059669 100%)"
        );
    }
}
