//! Constants used throughout the application
//!
//! Fixed names shared by the provisioning code and the CLI. Keeping them in
//! one place means the tests and the implementation agree on the exact
//! strings sent to git and the cloud APIs.
//!
//! # Organization
//!
//! - **Configuration**: file and environment variable names
//! - **Git**: remote name and ticket branch naming
//! - **Storage**: deployment bucket naming and lockdown
//! - **Deployment**: branch stage, release job and environment variables
//! - **Defaults**: CLI default values

// Configuration
pub const CONFIG_FILE_NAME: &str = "devenv.toml";
pub const CONFIG_PATH_ENV: &str = "DEVENV_CONFIG";

// Git
pub const GIT_CMD: &str = "git";
pub const GIT_ORIGIN: &str = "origin";
pub const TICKET_BRANCH_PREFIX: &str = "issue/";

// Storage
pub const DEPLOYMENT_BUCKET_PREFIX: &str = "serverless-deployment-state-";
pub const DEPLOYMENT_BUCKET_REGION: &str = "us-west-2";

// Deployment
pub const RELEASE_JOB_REASON: &str = "Initial environment setup";
pub const TAG_KEY_NAME: &str = "name";
pub const ENV_GRAPHQL_ENDPOINT: &str = "BRETHA_GRAPHQL_ENDPOINT";
pub const ENV_SHARED_DATA_WITH: &str = "SHARED_DATA_WITH";

// Defaults
pub const DEFAULT_GRAPHQL_ENDPOINT: &str = "http://graphql.claire-qa.clearcare.ninja";
pub const BASELINE_ENVIRONMENT: &str = "qa";
pub const DEFAULT_LOG_FILTER: &str = "warn";
pub const VERBOSE_LOG_FILTER: &str = "devenv=debug";
