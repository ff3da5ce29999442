use crate::business::BusinessType;
use crate::error::DesignError;

/// Parse an untrusted design value (URL parameter, stored string).
///
/// `None` and the empty string are a missing context; anything else that is
/// not an exact registry key is an invalid parameter. Never panics.
pub fn validate_business_type(value: Option<&str>) -> Result<BusinessType, DesignError> {
    match value {
        None | Some("") => Err(DesignError::missing_context()),
        Some(raw) => BusinessType::from_key(raw).ok_or_else(|| DesignError::invalid_parameter(raw)),
    }
}
