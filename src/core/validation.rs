//! Validation logic for devenv
//!
//! All identifiers are checked here before any git or remote call is made,
//! so a bad invocation never leaves a half-provisioned environment behind.

use crate::error::{DevenvError, Result};

/// Ensures a required identifier is present
///
/// # Arguments
///
/// * `value` - The identifier, if one was supplied
/// * `what` - Human readable name used in the error ("Branch", "Environment name")
///
/// # Returns
///
/// * `Ok(&str)` - The trimmed identifier
/// * `Err(DevenvError::Precondition)` - If it is missing or blank
///
/// # Examples
///
/// ```rust
/// use devenv::core::require;
///
/// assert_eq!(require(Some(" qa "), "Environment name").unwrap(), "qa");
/// assert!(require(Some(""), "Branch").is_err());
/// assert!(require(None, "Branch").is_err());
/// ```
pub fn require<'a>(value: Option<&'a str>, what: &str) -> Result<&'a str> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(DevenvError::Precondition(format!("{what} is not set"))),
    }
}

/// Validates an environment name
///
/// # Validation Rules
///
/// 1. **Non-empty**: Must not be empty or whitespace-only
/// 2. **No slash**: The name becomes part of a bucket name and an Amplify
///    display name, neither of which accept `/`
/// 3. **No whitespace**: Bucket names cannot contain spaces
///
/// # Examples
///
/// ```rust
/// use devenv::core::validate_env_name;
///
/// assert_eq!(validate_env_name(Some("CW-2134")).unwrap(), "CW-2134");
/// assert!(validate_env_name(Some("issue/CW-2134")).is_err());
/// ```
pub fn validate_env_name(name: Option<&str>) -> Result<&str> {
    let name = require(name, "Environment name")?;

    if name.contains('/') {
        return Err(DevenvError::Precondition(format!(
            "Environment name '{name}' cannot contain '/'"
        )));
    }

    if name.chars().any(char::is_whitespace) {
        return Err(DevenvError::Precondition(format!(
            "Environment name '{name}' cannot contain whitespace"
        )));
    }

    Ok(name)
}
