use super::ApiError;

/// Presence check for a submitted form field. Empty strings count as present.
pub fn require_field(name: &'static str, value: Option<String>) -> Result<String, ApiError> {
    value.ok_or(ApiError::MissingField(name))
}

/// Treats blank optional fields as absent.
pub fn optional_field(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
