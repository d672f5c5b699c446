//! Deployment state buckets
//!
//! Claire environments keep their serverless deployment state in a private,
//! encrypted bucket named after the environment. [`StorageProvisioner`]
//! creates that bucket once and locks it down; asking again for a bucket
//! that already exists is not an error.

use std::fmt;
use tracing::{debug, info};

use crate::constants::{DEPLOYMENT_BUCKET_PREFIX, DEPLOYMENT_BUCKET_REGION};
use crate::error::{DevenvError, Result};

pub mod mock;
pub mod s3;

pub use mock::InMemoryStorage;
pub use s3::S3Storage;

/// Default server-side encryption algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncryptionAlgorithm {
    Aes256,
}

impl fmt::Display for EncryptionAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncryptionAlgorithm::Aes256 => f.write_str("AES256"),
        }
    }
}

/// Public access block flags of a bucket
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PublicAccessBlock {
    pub block_public_acls: bool,
    pub ignore_public_acls: bool,
    pub block_public_policy: bool,
    pub restrict_public_buckets: bool,
}

impl PublicAccessBlock {
    /// Every restriction enabled
    pub fn locked_down() -> Self {
        Self {
            block_public_acls: true,
            ignore_public_acls: true,
            block_public_policy: true,
            restrict_public_buckets: true,
        }
    }

    pub fn is_locked_down(&self) -> bool {
        *self == Self::locked_down()
    }
}

/// Why a bucket could not be created
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BucketCreationError {
    /// The name is taken, by us or by another account
    AlreadyExists,
    /// Any other refusal (permissions, quota, invalid name, transport)
    Rejected(String),
}

/// Object storage operations needed to provision a bucket
#[cfg_attr(test, mockall::automock)]
pub trait ObjectStorage {
    /// Creates a private bucket in `region`
    fn create_private_bucket(
        &self,
        name: &str,
        region: &str,
    ) -> std::result::Result<(), BucketCreationError>;

    /// Sets the bucket's default server-side encryption
    fn set_default_encryption(&self, name: &str, algorithm: EncryptionAlgorithm) -> Result<()>;

    /// Replaces the bucket's public access block
    fn set_public_access_block(&self, name: &str, flags: PublicAccessBlock) -> Result<()>;
}

/// Result of [`StorageProvisioner::ensure_deployment_bucket`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketStatus {
    /// Created and locked down by this call
    Created,
    /// Already present; left untouched
    AlreadyExists,
}

impl BucketStatus {
    pub fn freshly_created(self) -> bool {
        self == BucketStatus::Created
    }
}

/// Name of the deployment state bucket for an environment
///
/// # Examples
///
/// ```rust
/// use devenv::storage::deployment_bucket_name;
///
/// assert_eq!(deployment_bucket_name("QA"), "serverless-deployment-state-qa");
/// ```
pub fn deployment_bucket_name(env_name: &str) -> String {
    format!("{DEPLOYMENT_BUCKET_PREFIX}{}", env_name.to_lowercase())
}

/// Idempotent deployment bucket provisioning
pub struct StorageProvisioner<S> {
    storage: S,
    region: String,
}

impl<S: ObjectStorage> StorageProvisioner<S> {
    /// Provisioner for the fixed deployment bucket region
    pub fn new(storage: S) -> Self {
        Self::with_region(storage, DEPLOYMENT_BUCKET_REGION)
    }

    pub fn with_region(storage: S, region: impl Into<String>) -> Self {
        Self {
            storage,
            region: region.into(),
        }
    }

    /// Makes sure the environment's deployment bucket exists
    ///
    /// A fresh bucket gets AES256 default encryption and then a fully
    /// locked-down public access block. An existing bucket is assumed to
    /// be configured already and is not touched.
    ///
    /// # Errors
    ///
    /// Creation failures other than "already exists", and any failure
    /// while configuring a fresh bucket, are storage
    /// [`DevenvError::RemoteService`] errors.
    pub fn ensure_deployment_bucket(&self, env_name: &str) -> Result<BucketStatus> {
        let bucket = deployment_bucket_name(env_name);
        debug!(%bucket, region = %self.region, "creating deployment bucket");

        match self.storage.create_private_bucket(&bucket, &self.region) {
            Ok(()) => {}
            Err(BucketCreationError::AlreadyExists) => {
                debug!(%bucket, "deployment bucket already exists");
                return Ok(BucketStatus::AlreadyExists);
            }
            Err(BucketCreationError::Rejected(reason)) => {
                return Err(DevenvError::storage(format!(
                    "Unable to create bucket {bucket}: {reason}"
                )));
            }
        }

        self.storage
            .set_default_encryption(&bucket, EncryptionAlgorithm::Aes256)?;
        self.storage
            .set_public_access_block(&bucket, PublicAccessBlock::locked_down())?;

        info!(%bucket, "deployment bucket created");
        Ok(BucketStatus::Created)
    }
}
