//! Remote environment lifecycle
//!
//! Creates and removes the cloud side of an environment: the deployment
//! state bucket (for products that need one), the Amplify branch, and the
//! branch's first release job.
//!
//! # Partial Failure
//!
//! The steps are not transactional. If a step fails, earlier steps are
//! kept (a bucket stays provisioned, a branch stays created) and the
//! operator re-runs the command once the cause is fixed; every step is
//! safe to repeat or reports that its resource already exists.

use std::collections::BTreeMap;
use tracing::{debug, info, warn};

use crate::constants::{
    ENV_GRAPHQL_ENDPOINT, ENV_SHARED_DATA_WITH, RELEASE_JOB_REASON, TAG_KEY_NAME,
};
use crate::core::{require, validate_env_name};
use crate::deployment::{BranchOptions, DeploymentGateway, JobType};
use crate::error::{DevenvError, Result};
use crate::product::{Product, ProductKind};
use crate::storage::{BucketStatus, ObjectStorage, StorageProvisioner};
use crate::utils::{print_error, print_progress, print_success, print_warning};

/// Parameters of a new environment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentRequest {
    /// Git branch the Amplify branch builds from
    pub branch: Option<String>,
    /// Environment name
    pub env_name: Option<String>,
    /// GraphQL endpoint handed to the frontend build
    pub graphql_endpoint: Option<String>,
    /// Environment whose data the new one shares
    pub share_data_with: Option<String>,
}

/// Result of [`EnvironmentOrchestrator::create_environment`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    /// Branch created and release job started
    Ready { bucket: Option<BucketStatus> },
    /// Amplify refused the branch; no job was started
    BranchRejected { reason: String },
}

/// Result of [`EnvironmentOrchestrator::remove_environment`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed,
    Failed { reason: String },
}

/// Creates and removes remote environments
pub struct EnvironmentOrchestrator<D, S> {
    deployment: D,
    provisioner: StorageProvisioner<S>,
}

impl<D: DeploymentGateway, S: ObjectStorage> EnvironmentOrchestrator<D, S> {
    pub fn new(deployment: D, provisioner: StorageProvisioner<S>) -> Self {
        Self {
            deployment,
            provisioner,
        }
    }

    /// Sets up the remote side of an environment
    ///
    /// # Steps
    ///
    /// 1. Provision the deployment bucket if the product needs one
    /// 2. Create the Amplify branch; a refusal is reported and ends the
    ///    operation with [`CreateOutcome::BranchRejected`]
    /// 3. Start the initial release job
    ///
    /// # Errors
    ///
    /// * [`DevenvError::Precondition`] - a required field is missing,
    ///   raised before any remote call
    /// * [`DevenvError::RemoteService`] - bucket provisioning or the
    ///   release job failed
    pub fn create_environment(
        &self,
        product: &Product,
        request: &EnvironmentRequest,
    ) -> Result<CreateOutcome> {
        let branch = require(request.branch.as_deref(), "Branch")?;
        let env_name = validate_env_name(request.env_name.as_deref())?;
        let variables = environment_variables(product.kind, request)?;

        println!("Creating {} Amplify environment {}", product.name(), env_name);
        debug!(product = product.name(), branch, env = env_name, "creating environment");

        let bucket = if product.kind.requires_deployment_bucket() {
            let status = self.provisioner.ensure_deployment_bucket(env_name)?;
            match status {
                BucketStatus::Created => print_success("Deployment bucket is now set up"),
                BucketStatus::AlreadyExists => print_warning("Deployment bucket already exists"),
            }
            Some(status)
        } else {
            None
        };

        let options = BranchOptions::development(env_name)
            .tag(TAG_KEY_NAME, product.kind.tag_for(env_name))
            .variables(variables);

        print_progress("Creating Amplify branch...");
        if let Err(e) = self
            .deployment
            .create_branch(&product.app_id, branch, &options)
        {
            if !e.is_remote() {
                return Err(e);
            }
            print_error(&format!("Call to the Amplify Console failed: {e}"));
            warn!(product = product.name(), branch, error = %e, "branch creation rejected");
            return Ok(CreateOutcome::BranchRejected {
                reason: e.to_string(),
            });
        }
        print_success("Created Amplify branch");

        print_progress("Starting Amplify job...");
        self.deployment.start_release_job(
            &product.app_id,
            branch,
            JobType::Release,
            RELEASE_JOB_REASON,
        )?;
        print_success("Started Amplify job");

        info!(product = product.name(), branch, env = env_name, "environment ready");
        print_success("Done setting up development environment");
        Ok(CreateOutcome::Ready { bucket })
    }

    /// Deletes the Amplify branch named `env_name`
    ///
    /// Removal is best effort: a refusal is reported and returned as
    /// [`RemoveOutcome::Failed`]. Deployment buckets are never deleted.
    pub fn remove_environment(
        &self,
        product: &Product,
        env_name: Option<&str>,
    ) -> Result<RemoveOutcome> {
        let env_name = require(env_name, "Environment name")?;

        print_progress(&format!("Removing Amplify branch {env_name}..."));
        match self.deployment.delete_branch(&product.app_id, env_name) {
            Ok(()) => {
                print_success(&format!("Removed Amplify branch {env_name}"));
                info!(product = product.name(), env = env_name, "environment removed");
                Ok(RemoveOutcome::Removed)
            }
            Err(e) if e.is_remote() => {
                print_error(&format!("Unable to remove Amplify branch: {e}"));
                Ok(RemoveOutcome::Failed {
                    reason: e.to_string(),
                })
            }
            Err(e) => Err(e),
        }
    }

    /// Copies data from one environment into another
    pub fn copy_data(&self, _to: &str, _from: &str) -> Result<()> {
        Err(DevenvError::NotImplemented(
            "Copying data between environments",
        ))
    }
}

/// Build-time variables a product's branch needs
fn environment_variables(
    kind: ProductKind,
    request: &EnvironmentRequest,
) -> Result<BTreeMap<String, String>> {
    match kind {
        ProductKind::Claire => {
            let endpoint = require(request.graphql_endpoint.as_deref(), "Bretha graphql endpoint")?;
            let shared = require(request.share_data_with.as_deref(), "Shared data with")?;
            Ok(BTreeMap::from([
                (ENV_GRAPHQL_ENDPOINT.to_string(), endpoint.to_string()),
                (ENV_SHARED_DATA_WITH.to_string(), shared.to_string()),
            ]))
        }
        ProductKind::WellskyApps => Ok(BTreeMap::new()),
    }
}
