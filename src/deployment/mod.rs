//! Hosting platform deployment branches
//!
//! A deployment branch is Amplify's build/release lane for a git branch.
//! [`DeploymentGateway`] is the narrow slice of the Amplify API devenv
//! needs: create a branch, kick off its first release, delete it.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::Result;

pub mod amplify;
pub mod mock;

pub use amplify::AmplifyGateway;
pub use mock::{DeploymentCall, RecordingDeployment};

/// Deployment stage of a branch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Development,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Development => f.write_str("DEVELOPMENT"),
        }
    }
}

/// Kind of job to start on a branch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobType {
    Release,
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobType::Release => f.write_str("RELEASE"),
        }
    }
}

/// Settings of a new deployment branch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchOptions {
    pub stage: Stage,
    pub enable_auto_build: bool,
    pub enable_basic_auth: bool,
    pub enable_notification: bool,
    pub display_name: String,
    pub tags: BTreeMap<String, String>,
    pub environment_variables: BTreeMap<String, String>,
}

impl BranchOptions {
    /// A development branch that builds on every push
    ///
    /// Basic auth and notifications are off; `display_name` is lower-cased
    /// because Amplify uses it as a subdomain.
    pub fn development(display_name: &str) -> Self {
        Self {
            stage: Stage::Development,
            enable_auto_build: true,
            enable_basic_auth: false,
            enable_notification: false,
            display_name: display_name.to_lowercase(),
            tags: BTreeMap::new(),
            environment_variables: BTreeMap::new(),
        }
    }

    pub fn tag(mut self, key: &str, value: impl Into<String>) -> Self {
        self.tags.insert(key.to_string(), value.into());
        self
    }

    pub fn variables(mut self, variables: BTreeMap<String, String>) -> Self {
        self.environment_variables.extend(variables);
        self
    }
}

/// Deployment API operations
#[cfg_attr(test, mockall::automock)]
pub trait DeploymentGateway {
    /// Creates a branch of the application `app_id`
    fn create_branch(&self, app_id: &str, branch: &str, options: &BranchOptions) -> Result<()>;

    /// Starts a job on an existing branch
    fn start_release_job(
        &self,
        app_id: &str,
        branch: &str,
        job_type: JobType,
        reason: &str,
    ) -> Result<()>;

    /// Deletes a branch of the application `app_id`
    fn delete_branch(&self, app_id: &str, branch: &str) -> Result<()>;
}
