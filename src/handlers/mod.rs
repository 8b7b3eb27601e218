pub mod items;
pub mod lists;

use crate::error::CartError;

/// Path ids must parse as integers; anything else is a 400, not a 404.
pub(crate) fn parse_id(segment: &str) -> Result<i64, CartError> {
    segment.parse::<i64>().map_err(|_| CartError::invalid_id())
}

/// Trim the name and reject missing or whitespace-only values.
pub(crate) fn validate_name(name: Option<String>) -> Result<String, CartError> {
    let name = name.ok_or_else(CartError::name_required)?;
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CartError::name_required());
    }
    Ok(trimmed.to_string())
}
