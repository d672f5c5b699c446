//! Blocking bridge to the AWS SDK
//!
//! devenv runs every remote call strictly in sequence, so the async SDK
//! clients are driven from a single current-thread runtime owned here.

use aws_config::{BehaviorVersion, SdkConfig};
use std::future::Future;
use std::sync::Arc;
use tokio::runtime::{Builder, Runtime};
use tracing::debug;

use crate::error::Result;

/// Loaded SDK configuration plus the runtime that drives requests
#[derive(Clone)]
pub struct AwsContext {
    runtime: Arc<Runtime>,
    config: SdkConfig,
}

impl AwsContext {
    /// Loads credentials and region from the standard AWS sources
    ///
    /// Environment variables (including those read from `.env`), shared
    /// config files and the instance metadata service are consulted in
    /// the SDK's usual order.
    pub fn load() -> Result<Self> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        let config = runtime.block_on(aws_config::defaults(BehaviorVersion::latest()).load());
        debug!(region = ?config.region(), "loaded AWS configuration");

        Ok(Self {
            runtime: Arc::new(runtime),
            config,
        })
    }

    pub fn config(&self) -> &SdkConfig {
        &self.config
    }

    /// Runs a request to completion
    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }
}
