use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Site locales. The site is French-first with an English mirror.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Fr,
    En,
}

impl Locale {
    pub fn code(self) -> &'static str {
        match self {
            Self::Fr => "fr",
            Self::En => "en",
        }
    }

    /// Resolve an arbitrary locale tag (`fr-CA`, `en_US`, `EN`) to a site locale.
    ///
    /// Unknown languages fall back to French.
    pub fn from_tag(tag: &str) -> Self {
        let normalized = normalize_locale(tag).to_ascii_lowercase();
        match normalized.split('-').next() {
            Some("en") => Self::En,
            _ => Self::Fr,
        }
    }
}

impl Display for Locale {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Normalize locale identifiers to a canonical-ish form for lookup.
///
/// - Converts `_` to `-` (some platforms report `en_US`).
/// - Trims whitespace.
pub fn normalize_locale(s: &str) -> String {
    s.trim().replace('_', "-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_tags_map_to_language() {
        assert_eq!(Locale::from_tag("en_US"), Locale::En);
        assert_eq!(Locale::from_tag(" fr-CA "), Locale::Fr);
        assert_eq!(Locale::from_tag("EN"), Locale::En);
    }

    #[test]
    fn unknown_languages_fall_back_to_french() {
        assert_eq!(Locale::from_tag("de-DE"), Locale::Fr);
        assert_eq!(Locale::from_tag(""), Locale::Fr);
    }
}
