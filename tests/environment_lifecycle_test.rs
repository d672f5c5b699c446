//! Remote environment create/remove against in-memory services

mod common;

use common::product;
use devenv::deployment::{DeploymentCall, JobType, RecordingDeployment, Stage};
use devenv::orchestrator::{CreateOutcome, EnvironmentOrchestrator, EnvironmentRequest, RemoveOutcome};
use devenv::product::ProductKind;
use devenv::storage::{
    BucketStatus, EncryptionAlgorithm, InMemoryStorage, PublicAccessBlock, StorageProvisioner,
};
use std::path::Path;

fn claire_request(env: &str) -> EnvironmentRequest {
    EnvironmentRequest {
        branch: Some(format!("issue/{env}")),
        env_name: Some(env.to_string()),
        graphql_endpoint: Some("http://graphql.example".to_string()),
        share_data_with: Some("qa".to_string()),
    }
}

fn orchestrator(
    deployment: &RecordingDeployment,
    storage: &InMemoryStorage,
) -> EnvironmentOrchestrator<RecordingDeployment, InMemoryStorage> {
    EnvironmentOrchestrator::new(deployment.clone(), StorageProvisioner::new(storage.clone()))
}

#[test]
fn test_bucket_provisioning_is_idempotent() {
    let storage = InMemoryStorage::new();
    let provisioner = StorageProvisioner::new(storage.clone());

    assert_eq!(
        provisioner.ensure_deployment_bucket("QA").unwrap(),
        BucketStatus::Created
    );
    let record = storage.bucket("serverless-deployment-state-qa").unwrap();
    assert_eq!(record.region, "us-west-2");
    assert_eq!(record.encryption, Some(EncryptionAlgorithm::Aes256));
    assert!(record.public_access_block.unwrap().is_locked_down());
    assert_eq!(storage.configuration_calls(), 2);

    assert_eq!(
        provisioner.ensure_deployment_bucket("QA").unwrap(),
        BucketStatus::AlreadyExists
    );
    assert_eq!(storage.configuration_calls(), 2);
}

#[test]
fn test_existing_bucket_is_not_reconfigured() {
    let storage = InMemoryStorage::new().with_existing_bucket("serverless-deployment-state-cw-1");
    let provisioner = StorageProvisioner::new(storage.clone());

    let status = provisioner.ensure_deployment_bucket("CW-1").unwrap();

    assert!(!status.freshly_created());
    let record = storage.bucket("serverless-deployment-state-cw-1").unwrap();
    assert_eq!(record.encryption, None);
    assert_eq!(record.public_access_block, None::<PublicAccessBlock>);
}

#[test]
fn test_claire_create_runs_bucket_branch_and_job() {
    let deployment = RecordingDeployment::new();
    let storage = InMemoryStorage::new();
    let claire = product(ProductKind::Claire, Path::new("/src/claire"), None);

    let outcome = orchestrator(&deployment, &storage)
        .create_environment(&claire, &claire_request("CW-2134"))
        .unwrap();

    assert_eq!(
        outcome,
        CreateOutcome::Ready {
            bucket: Some(BucketStatus::Created)
        }
    );
    assert!(storage.bucket("serverless-deployment-state-cw-2134").is_some());

    let calls = deployment.calls();
    assert_eq!(calls.len(), 2);
    match &calls[0] {
        DeploymentCall::CreateBranch {
            app_id,
            branch,
            options,
        } => {
            assert_eq!(app_id, "app-claire");
            assert_eq!(branch, "issue/CW-2134");
            assert_eq!(options.stage, Stage::Development);
            assert!(options.enable_auto_build);
            assert!(!options.enable_basic_auth);
            assert!(!options.enable_notification);
            assert_eq!(options.display_name, "cw-2134");
            assert_eq!(options.tags["name"], "claire-CW-2134");
            assert_eq!(
                options.environment_variables["BRETHA_GRAPHQL_ENDPOINT"],
                "http://graphql.example"
            );
            assert_eq!(options.environment_variables["SHARED_DATA_WITH"], "qa");
        }
        other => panic!("Expected CreateBranch first, got {other:?}"),
    }
    assert_eq!(
        calls[1],
        DeploymentCall::StartJob {
            app_id: "app-claire".to_string(),
            branch: "issue/CW-2134".to_string(),
            job_type: JobType::Release,
            reason: "Initial environment setup".to_string(),
        }
    );
}

#[test]
fn test_rerun_reports_existing_bucket_and_rejected_branch() {
    let deployment = RecordingDeployment::new();
    let storage = InMemoryStorage::new();
    let claire = product(ProductKind::Claire, Path::new("/src/claire"), None);
    let orchestrator = orchestrator(&deployment, &storage);

    orchestrator
        .create_environment(&claire, &claire_request("CW-5"))
        .unwrap();
    let second = orchestrator
        .create_environment(&claire, &claire_request("CW-5"))
        .unwrap();

    assert!(matches!(second, CreateOutcome::BranchRejected { .. }));
    let jobs = deployment
        .calls()
        .into_iter()
        .filter(|c| matches!(c, DeploymentCall::StartJob { .. }))
        .count();
    assert_eq!(jobs, 1);
}

#[test]
fn test_rejected_bucket_stops_before_branch_creation() {
    let deployment = RecordingDeployment::new();
    let storage = InMemoryStorage::new().rejecting("AccessDenied");
    let claire = product(ProductKind::Claire, Path::new("/src/claire"), None);

    let err = orchestrator(&deployment, &storage)
        .create_environment(&claire, &claire_request("CW-6"))
        .unwrap_err();

    assert!(err.is_remote());
    assert!(deployment.calls().is_empty());
}

#[test]
fn test_wellsky_apps_needs_no_bucket_or_variables() {
    let deployment = RecordingDeployment::new();
    let storage = InMemoryStorage::new();
    let apps = product(ProductKind::WellskyApps, Path::new("/src/apps"), None);
    let request = EnvironmentRequest {
        branch: Some("feature/x".to_string()),
        env_name: Some("FX".to_string()),
        ..EnvironmentRequest::default()
    };

    let outcome = orchestrator(&deployment, &storage)
        .create_environment(&apps, &request)
        .unwrap();

    assert_eq!(outcome, CreateOutcome::Ready { bucket: None });
    assert!(storage.bucket("serverless-deployment-state-fx").is_none());
    match &deployment.calls()[0] {
        DeploymentCall::CreateBranch { options, .. } => {
            assert!(options.environment_variables.is_empty());
            assert_eq!(options.tags["name"], "wellsky-apps-FX");
        }
        other => panic!("Expected CreateBranch, got {other:?}"),
    }
}

#[test]
fn test_remove_deletes_branch_named_after_environment() {
    let deployment = RecordingDeployment::new().with_branch("app-claire", "CW-9");
    let storage = InMemoryStorage::new().with_existing_bucket("serverless-deployment-state-cw-9");
    let claire = product(ProductKind::Claire, Path::new("/src/claire"), None);

    let outcome = orchestrator(&deployment, &storage)
        .remove_environment(&claire, Some("CW-9"))
        .unwrap();

    assert_eq!(outcome, RemoveOutcome::Removed);
    assert!(!deployment.has_branch("app-claire", "CW-9"));
    // Buckets are never deleted.
    assert!(storage.bucket("serverless-deployment-state-cw-9").is_some());
}

#[test]
fn test_remove_missing_branch_is_reported_not_raised() {
    let deployment = RecordingDeployment::new();
    let claire = product(ProductKind::Claire, Path::new("/src/claire"), None);

    let outcome = orchestrator(&deployment, &InMemoryStorage::new())
        .remove_environment(&claire, Some("CW-404"))
        .unwrap();

    assert!(matches!(outcome, RemoveOutcome::Failed { .. }));
}
