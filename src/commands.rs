//! Plan execution
//!
//! Runs a [`Plan`] product by product. Local git work happens first for
//! every selected product, then the remote work.
//!
//! # Error Boundary
//!
//! Remote failures are contained per product: they are reported and the
//! next product is still attempted. Precondition, dirty-tree, missing-branch
//! and git failures abort the whole run.

use tracing::{debug, warn};

use crate::cli::{Plan, RemoteAction};
use crate::config::ProductRegistry;
use crate::deployment::DeploymentGateway;
use crate::error::Result;
use crate::orchestrator::{CreateOutcome, EnvironmentOrchestrator, RemoveOutcome};
use crate::product::{Product, ProductKind};
use crate::reconcile::{BranchReconciler, ReconcileOptions, ReconcileOutcome};
use crate::storage::ObjectStorage;
use crate::utils::print_error;
use crate::vcs::VersionControl;

/// What happened to one product's remote environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductResult {
    Created(CreateOutcome),
    Removed(RemoveOutcome),
    /// A remote error stopped this product's workflow
    Failed(String),
}

/// Per-product results of the remote half of a run
pub type BatchReport = Vec<(ProductKind, ProductResult)>;

/// Executes a plan
///
/// # Arguments
///
/// * `plan` - Resolved command line
/// * `registry` - Configured products
/// * `open_repo` - Opens a product's repository
/// * `connect` - Builds the orchestrator; only called when the plan has
///   remote work, so local-only runs never need cloud credentials
pub fn execute<V, F, C, D, S>(
    plan: &Plan,
    registry: &ProductRegistry,
    mut open_repo: F,
    connect: C,
) -> Result<BatchReport>
where
    V: VersionControl,
    F: FnMut(&Product) -> Result<V>,
    C: FnOnce() -> Result<EnvironmentOrchestrator<D, S>>,
    D: DeploymentGateway,
    S: ObjectStorage,
{
    match plan {
        Plan::Attach { products, branch } => {
            let products = resolve(registry, products)?;
            reconcile_all(&products, branch, ReconcileOptions::attach(), &mut open_repo)?;
            Ok(BatchReport::new())
        }
        Plan::Run {
            products,
            local,
            remote,
        } => {
            let products = resolve(registry, products)?;

            if let Some((branch, options)) = local {
                reconcile_all(&products, branch, *options, &mut open_repo)?;
            }

            match remote {
                Some(action) => {
                    let orchestrator = connect()?;
                    run_remote(&products, action, &orchestrator)
                }
                None => Ok(BatchReport::new()),
            }
        }
    }
}

/// Looks up every selected product before any side effect
fn resolve<'a>(registry: &'a ProductRegistry, kinds: &[ProductKind]) -> Result<Vec<&'a Product>> {
    kinds.iter().map(|kind| registry.get(*kind)).collect()
}

fn reconcile_all<V, F>(
    products: &[&Product],
    branch: &str,
    options: ReconcileOptions,
    open_repo: &mut F,
) -> Result<Vec<ReconcileOutcome>>
where
    V: VersionControl,
    F: FnMut(&Product) -> Result<V>,
{
    let mut outcomes = Vec::with_capacity(products.len());
    for product in products {
        let repo = open_repo(*product)?;
        let outcome = BranchReconciler::new(*product, repo).reconcile(branch, options)?;
        debug!(product = product.name(), ?outcome, "local branch reconciled");
        outcomes.push(outcome);
    }
    Ok(outcomes)
}

/// Creates or removes each product's environment
pub fn run_remote<D, S>(
    products: &[&Product],
    action: &RemoteAction,
    orchestrator: &EnvironmentOrchestrator<D, S>,
) -> Result<BatchReport>
where
    D: DeploymentGateway,
    S: ObjectStorage,
{
    let mut report = BatchReport::new();

    for product in products {
        let result = match action {
            RemoteAction::Create { request, .. } => orchestrator
                .create_environment(product, request)
                .map(ProductResult::Created),
            RemoteAction::Remove { env_name } => orchestrator
                .remove_environment(product, env_name.as_deref())
                .map(ProductResult::Removed),
        };

        let result = match result {
            Ok(result) => result,
            Err(e) if e.is_remote() => {
                print_error(&format!("{}: {e}", product.name()));
                warn!(product = product.name(), error = %e, "remote workflow failed");
                ProductResult::Failed(e.to_string())
            }
            Err(e) => return Err(e),
        };
        report.push((product.kind, result));
    }

    if let RemoteAction::Create {
        request,
        copy_data_from: Some(from),
    } = action
    {
        orchestrator.copy_data(request.env_name.as_deref().unwrap_or_default(), from)?;
    }

    Ok(report)
}
