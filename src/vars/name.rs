use crate::error::{VarError, VarResult};

/// Whether `name` can follow a scope prefix in command text.
///
/// Letters, digits, `_` and `#` (autoload names), not starting with a digit or `#`.
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '#')
}

pub(crate) fn check_name(name: &str) -> VarResult<&str> {
    if is_valid_name(name) {
        Ok(name)
    } else {
        Err(VarError::InvalidName(name.to_string()))
    }
}
