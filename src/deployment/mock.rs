use super::*;
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

use crate::error::DevenvError;

/// A call received by [`RecordingDeployment`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeploymentCall {
    CreateBranch {
        app_id: String,
        branch: String,
        options: BranchOptions,
    },
    StartJob {
        app_id: String,
        branch: String,
        job_type: JobType,
        reason: String,
    },
    DeleteBranch {
        app_id: String,
        branch: String,
    },
}

#[derive(Debug, Default)]
struct DeploymentState {
    branches: BTreeSet<(String, String)>,
    calls: Vec<DeploymentCall>,
    fail_start_job: bool,
}

/// In-memory [`DeploymentGateway`] for testing
///
/// Creating a branch twice fails, as does deleting one that does not exist.
/// Every call is recorded, successful or not.
#[derive(Clone, Default)]
pub struct RecordingDeployment {
    state: Arc<Mutex<DeploymentState>>,
}

impl RecordingDeployment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pretend `branch` already exists on `app_id`
    pub fn with_branch(self, app_id: &str, branch: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .branches
            .insert((app_id.to_string(), branch.to_string()));
        self
    }

    /// Make every start-job call fail
    pub fn failing_jobs(self) -> Self {
        self.state.lock().unwrap().fail_start_job = true;
        self
    }

    pub fn calls(&self) -> Vec<DeploymentCall> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn has_branch(&self, app_id: &str, branch: &str) -> bool {
        self.state
            .lock()
            .unwrap()
            .branches
            .contains(&(app_id.to_string(), branch.to_string()))
    }
}

impl DeploymentGateway for RecordingDeployment {
    fn create_branch(&self, app_id: &str, branch: &str, options: &BranchOptions) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(DeploymentCall::CreateBranch {
            app_id: app_id.to_string(),
            branch: branch.to_string(),
            options: options.clone(),
        });
        if !state
            .branches
            .insert((app_id.to_string(), branch.to_string()))
        {
            return Err(DevenvError::deployment(format!(
                "BadRequestException: Branch {branch} already exists"
            )));
        }
        Ok(())
    }

    fn start_release_job(
        &self,
        app_id: &str,
        branch: &str,
        job_type: JobType,
        reason: &str,
    ) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(DeploymentCall::StartJob {
            app_id: app_id.to_string(),
            branch: branch.to_string(),
            job_type,
            reason: reason.to_string(),
        });
        if state.fail_start_job {
            return Err(DevenvError::deployment("LimitExceededException"));
        }
        Ok(())
    }

    fn delete_branch(&self, app_id: &str, branch: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(DeploymentCall::DeleteBranch {
            app_id: app_id.to_string(),
            branch: branch.to_string(),
        });
        if !state
            .branches
            .remove(&(app_id.to_string(), branch.to_string()))
        {
            return Err(DevenvError::deployment(format!(
                "NotFoundException: Branch {branch} not found"
            )));
        }
        Ok(())
    }
}
