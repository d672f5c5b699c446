//! Core business logic module
//!
//! This module contains input validation shared by the reconciler and the
//! orchestrator, independent of git and cloud concerns.

pub mod validation;

// Re-export commonly used items
pub use validation::{require, validate_env_name};
