use super::*;
use aws_sdk_amplify::error::DisplayErrorContext;
use aws_sdk_amplify::Client;
use tracing::debug;

use crate::aws::AwsContext;
use crate::error::DevenvError;

/// [`DeploymentGateway`] backed by AWS Amplify
pub struct AmplifyGateway {
    context: AwsContext,
    client: Client,
}

impl AmplifyGateway {
    pub fn new(context: AwsContext) -> Self {
        let client = Client::new(context.config());
        Self { context, client }
    }
}

impl DeploymentGateway for AmplifyGateway {
    fn create_branch(&self, app_id: &str, branch: &str, options: &BranchOptions) -> Result<()> {
        let stage = match options.stage {
            Stage::Development => aws_sdk_amplify::types::Stage::Development,
        };

        let mut request = self
            .client
            .create_branch()
            .app_id(app_id)
            .branch_name(branch)
            .stage(stage)
            .enable_notification(options.enable_notification)
            .enable_auto_build(options.enable_auto_build)
            .enable_basic_auth(options.enable_basic_auth)
            .display_name(&options.display_name);
        for (key, value) in &options.tags {
            request = request.tags(key, value);
        }
        for (key, value) in &options.environment_variables {
            request = request.environment_variables(key, value);
        }

        debug!(app_id, branch, "amplify create-branch");
        self.context
            .block_on(request.send())
            .map_err(|e| DevenvError::deployment(DisplayErrorContext(&e).to_string()))?;
        Ok(())
    }

    fn start_release_job(
        &self,
        app_id: &str,
        branch: &str,
        job_type: JobType,
        reason: &str,
    ) -> Result<()> {
        let job_type = match job_type {
            JobType::Release => aws_sdk_amplify::types::JobType::Release,
        };

        debug!(app_id, branch, "amplify start-job");
        self.context
            .block_on(
                self.client
                    .start_job()
                    .app_id(app_id)
                    .branch_name(branch)
                    .job_type(job_type)
                    .job_reason(reason)
                    .send(),
            )
            .map_err(|e| DevenvError::deployment(DisplayErrorContext(&e).to_string()))?;
        Ok(())
    }

    fn delete_branch(&self, app_id: &str, branch: &str) -> Result<()> {
        debug!(app_id, branch, "amplify delete-branch");
        self.context
            .block_on(
                self.client
                    .delete_branch()
                    .app_id(app_id)
                    .branch_name(branch)
                    .send(),
            )
            .map_err(|e| DevenvError::deployment(DisplayErrorContext(&e).to_string()))?;
        Ok(())
    }
}
