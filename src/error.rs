//! Error taxonomy for devenv
//!
//! Every fallible library operation returns [`Result`]. The binary wraps
//! these in `anyhow` at the very top, the same way the rest of the CLI
//! surface reports failures.
//!
//! # Propagation
//!
//! - [`DevenvError::Precondition`], [`DevenvError::DirtyRepository`],
//!   [`DevenvError::BranchNotFound`] and git failures abort the whole run.
//! - [`DevenvError::RemoteService`] is caught at the product boundary and
//!   reported, so the next selected product is still attempted.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Remote services devenv talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteService {
    /// The hosting platform's deployment API (Amplify)
    Deployment,
    /// The object storage API (S3)
    Storage,
}

impl fmt::Display for RemoteService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoteService::Deployment => write!(f, "Amplify"),
            RemoteService::Storage => write!(f, "S3"),
        }
    }
}

/// All failures surfaced by the devenv library
#[derive(Debug, Error)]
pub enum DevenvError {
    /// A required identifier was empty or malformed
    #[error("{0}")]
    Precondition(String),

    /// A checkout would discard uncommitted changes
    #[error(
        "Repository {} is dirty, refusing to switch to '{target}'. Commit or stash your changes first",
        .path.display()
    )]
    DirtyRepository { path: PathBuf, target: String },

    /// An existing branch was required but is missing
    #[error("Branch {0} does not exist")]
    BranchNotFound(String),

    /// The deployment or storage API rejected a call
    #[error("Call to {service} failed: {message}")]
    RemoteService {
        service: RemoteService,
        message: String,
    },

    /// A feature that has not been built yet
    #[error("{0} is not implemented yet")]
    NotImplemented(&'static str),

    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Git(#[from] git2::Error),

    /// The git CLI exited unsuccessfully
    #[error("git {command} failed: {stderr}")]
    GitCommand { command: String, stderr: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl DevenvError {
    /// Shorthand for a deployment API failure
    pub fn deployment(message: impl Into<String>) -> Self {
        DevenvError::RemoteService {
            service: RemoteService::Deployment,
            message: message.into(),
        }
    }

    /// Shorthand for a storage API failure
    pub fn storage(message: impl Into<String>) -> Self {
        DevenvError::RemoteService {
            service: RemoteService::Storage,
            message: message.into(),
        }
    }

    /// Whether this error stays within a single product's workflow
    pub fn is_remote(&self) -> bool {
        matches!(self, DevenvError::RemoteService { .. })
    }
}

pub type Result<T, E = DevenvError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_remote_errors_are_contained() {
        assert!(DevenvError::deployment("quota").is_remote());
        assert!(DevenvError::storage("denied").is_remote());
        assert!(!DevenvError::Precondition("Branch is not set".into()).is_remote());
        assert!(!DevenvError::BranchNotFound("issue/CW-1".into()).is_remote());
        assert!(!DevenvError::NotImplemented("Copying data").is_remote());
    }

    #[test]
    fn test_error_messages() {
        let err = DevenvError::DirtyRepository {
            path: PathBuf::from("/src/claire"),
            target: "develop".to_string(),
        };
        assert!(err.to_string().contains("/src/claire"));
        assert!(err.to_string().contains("develop"));

        let err = DevenvError::storage("AccessDenied");
        assert_eq!(err.to_string(), "Call to S3 failed: AccessDenied");
    }
}
