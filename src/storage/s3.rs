use super::*;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::types::{
    BucketCannedAcl, BucketLocationConstraint, CreateBucketConfiguration,
    PublicAccessBlockConfiguration, ServerSideEncryption, ServerSideEncryptionByDefault,
    ServerSideEncryptionConfiguration, ServerSideEncryptionRule,
};
use aws_sdk_s3::Client;

use crate::aws::AwsContext;

/// [`ObjectStorage`] backed by Amazon S3
pub struct S3Storage {
    context: AwsContext,
    client: Client,
}

impl S3Storage {
    /// Client pinned to `region`, which must match the bucket location
    pub fn new(context: AwsContext, region: &str) -> Self {
        let config = aws_sdk_s3::config::Builder::from(context.config())
            .region(Region::new(region.to_string()))
            .build();
        let client = Client::from_conf(config);
        Self { context, client }
    }
}

impl ObjectStorage for S3Storage {
    fn create_private_bucket(
        &self,
        name: &str,
        region: &str,
    ) -> std::result::Result<(), BucketCreationError> {
        let location = CreateBucketConfiguration::builder()
            .location_constraint(BucketLocationConstraint::from(region))
            .build();

        let result = self.context.block_on(
            self.client
                .create_bucket()
                .acl(BucketCannedAcl::Private)
                .bucket(name)
                .create_bucket_configuration(location)
                .send(),
        );

        match result {
            Ok(_) => Ok(()),
            Err(err) => {
                let message = DisplayErrorContext(&err).to_string();
                let service_error = err.into_service_error();
                if service_error.is_bucket_already_exists()
                    || service_error.is_bucket_already_owned_by_you()
                {
                    Err(BucketCreationError::AlreadyExists)
                } else {
                    Err(BucketCreationError::Rejected(message))
                }
            }
        }
    }

    fn set_default_encryption(&self, name: &str, algorithm: EncryptionAlgorithm) -> Result<()> {
        let sse_algorithm = match algorithm {
            EncryptionAlgorithm::Aes256 => ServerSideEncryption::Aes256,
        };
        let by_default = ServerSideEncryptionByDefault::builder()
            .sse_algorithm(sse_algorithm)
            .build()
            .map_err(|e| DevenvError::storage(e.to_string()))?;
        let rule = ServerSideEncryptionRule::builder()
            .apply_server_side_encryption_by_default(by_default)
            .build();
        let configuration = ServerSideEncryptionConfiguration::builder()
            .rules(rule)
            .build()
            .map_err(|e| DevenvError::storage(e.to_string()))?;

        self.context
            .block_on(
                self.client
                    .put_bucket_encryption()
                    .bucket(name)
                    .server_side_encryption_configuration(configuration)
                    .send(),
            )
            .map_err(|e| DevenvError::storage(DisplayErrorContext(&e).to_string()))?;
        Ok(())
    }

    fn set_public_access_block(&self, name: &str, flags: PublicAccessBlock) -> Result<()> {
        let configuration = PublicAccessBlockConfiguration::builder()
            .block_public_acls(flags.block_public_acls)
            .ignore_public_acls(flags.ignore_public_acls)
            .block_public_policy(flags.block_public_policy)
            .restrict_public_buckets(flags.restrict_public_buckets)
            .build();

        self.context
            .block_on(
                self.client
                    .put_public_access_block()
                    .bucket(name)
                    .public_access_block_configuration(configuration)
                    .send(),
            )
            .map_err(|e| DevenvError::storage(DisplayErrorContext(&e).to_string()))?;
        Ok(())
    }
}
