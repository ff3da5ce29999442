//! Business type catalog
//!
//! Each business type selects one theme. The set is closed and only changes
//! at build time; the string key is what appears in the `design` query
//! parameter and in persisted storage.

use crate::locale::Locale;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Business verticals the agency builds sites for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BusinessType {
    /// The agency's own look. Used whenever nothing else resolves.
    #[serde(rename = "aiAgency")]
    AiAgency,
    #[serde(rename = "medical")]
    MedicalClinic,
    #[serde(rename = "restaurant")]
    Restaurant,
    #[serde(rename = "autoGarage")]
    AutoGarage,
    #[serde(rename = "realEstate")]
    RealEstate,
    #[serde(rename = "lawFirm")]
    LawFirm,
    #[serde(rename = "beautySalon")]
    BeautySalon,
    #[serde(rename = "fitness")]
    Fitness,
}

impl BusinessType {
    /// Fallback when neither the URL nor storage yields a valid value.
    pub const DEFAULT: BusinessType = BusinessType::AiAgency;

    /// Stable key used in URLs, storage and CSS class names.
    pub fn key(self) -> &'static str {
        match self {
            Self::AiAgency => "aiAgency",
            Self::MedicalClinic => "medical",
            Self::Restaurant => "restaurant",
            Self::AutoGarage => "autoGarage",
            Self::RealEstate => "realEstate",
            Self::LawFirm => "lawFirm",
            Self::BeautySalon => "beautySalon",
            Self::Fitness => "fitness",
        }
    }

    /// Upper snake identifier, as shown in logs and debug exports.
    pub fn id(self) -> &'static str {
        match self {
            Self::AiAgency => "AI_AGENCY",
            Self::MedicalClinic => "MEDICAL_CLINIC",
            Self::Restaurant => "RESTAURANT",
            Self::AutoGarage => "AUTO_GARAGE",
            Self::RealEstate => "REAL_ESTATE",
            Self::LawFirm => "LAW_FIRM",
            Self::BeautySalon => "BEAUTY_SALON",
            Self::Fitness => "FITNESS",
        }
    }

    /// Case-sensitive lookup by key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::all().iter().copied().find(|b| b.key() == key)
    }

    /// User-facing label for the design picker.
    pub fn label(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::AiAgency, Locale::Fr) => "Agence IA",
            (Self::AiAgency, Locale::En) => "AI Agency",
            (Self::MedicalClinic, Locale::Fr) => "Clinique médicale",
            (Self::MedicalClinic, Locale::En) => "Medical Clinic",
            (Self::Restaurant, _) => "Restaurant",
            (Self::AutoGarage, Locale::Fr) => "Garage automobile",
            (Self::AutoGarage, Locale::En) => "Auto Garage",
            (Self::RealEstate, Locale::Fr) => "Agence immobilière",
            (Self::RealEstate, Locale::En) => "Real Estate",
            (Self::LawFirm, Locale::Fr) => "Cabinet d'avocats",
            (Self::LawFirm, Locale::En) => "Law Firm",
            (Self::BeautySalon, Locale::Fr) => "Salon de beauté",
            (Self::BeautySalon, Locale::En) => "Beauty Salon",
            (Self::Fitness, Locale::Fr) => "Salle de sport",
            (Self::Fitness, Locale::En) => "Fitness Studio",
        }
    }

    /// CSS class applied to the document root while this design is active.
    pub fn theme_class(self) -> String {
        format!("theme-{}", self.key())
    }

    /// Full catalog, in picker order.
    pub fn all() -> &'static [BusinessType] {
        const ALL: [BusinessType; 8] = [
            BusinessType::AiAgency,
            BusinessType::MedicalClinic,
            BusinessType::Restaurant,
            BusinessType::AutoGarage,
            BusinessType::RealEstate,
            BusinessType::LawFirm,
            BusinessType::BeautySalon,
            BusinessType::Fitness,
        ];
        &ALL
    }
}

impl Default for BusinessType {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Display for BusinessType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}
