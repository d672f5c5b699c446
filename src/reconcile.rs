//! Local branch reconciliation
//!
//! Brings a product's local checkout onto the branch of an environment.
//! Every checkout is guarded by a dirty-tree check so uncommitted work is
//! never silently discarded.
//!
//! # Decision Rules
//!
//! 1. Unless the caller only wants existing branches, return to the
//!    product's default branch first so new branches start from it.
//!    `reset_only` always does this and then stops.
//! 2. A missing branch is skipped, rejected, or created and pushed to
//!    `origin`, depending on the options.
//! 3. An existing branch is only checked out from a clean tree.

use tracing::{debug, info};

use crate::constants::GIT_ORIGIN;
use crate::core::require;
use crate::error::{DevenvError, Result};
use crate::product::Product;
use crate::utils::{print_progress, print_success, print_warning};
use crate::vcs::{GitRepository, VersionControl};

/// How [`BranchReconciler::reconcile`] treats the target branch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileOptions {
    /// Never create the branch; it must already exist
    pub no_create: bool,
    /// With `no_create`, treat a missing branch as a no-op instead of an error
    pub ignore_non_existing: bool,
    /// Only return to the default branch
    pub reset_only: bool,
}

impl ReconcileOptions {
    /// Create the branch (and push it) when missing
    pub fn create() -> Self {
        Self::default()
    }

    /// Require the branch to exist already
    pub fn existing_only() -> Self {
        Self {
            no_create: true,
            ..Self::default()
        }
    }

    /// Switch to the branch if it exists, otherwise do nothing
    pub fn attach() -> Self {
        Self {
            no_create: true,
            ignore_non_existing: true,
            ..Self::default()
        }
    }

    /// Check out the default branch and stop
    pub fn reset() -> Self {
        Self {
            reset_only: true,
            ..Self::default()
        }
    }
}

/// What [`BranchReconciler::reconcile`] ended up doing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// `reset_only` run; holds the default branch if one is configured
    ResetToDefault { branch: Option<String> },
    /// Branch missing and the caller asked to ignore that
    SkippedMissing,
    /// Target branch is now checked out
    CheckedOut { created: bool },
}

/// Reconciles a product's local repository with a desired branch
pub struct BranchReconciler<'a, V> {
    product: &'a Product,
    repo: V,
}

impl<'a> BranchReconciler<'a, GitRepository> {
    /// Opens the product's configured repository
    pub fn open(product: &'a Product) -> Result<Self> {
        let repo = GitRepository::open(&product.path)?;
        Ok(Self::new(product, repo))
    }
}

impl<'a, V: VersionControl> BranchReconciler<'a, V> {
    pub fn new(product: &'a Product, repo: V) -> Self {
        Self { product, repo }
    }

    /// Moves the repository onto `branch`
    ///
    /// # Errors
    ///
    /// * [`DevenvError::Precondition`] - `branch` is blank
    /// * [`DevenvError::DirtyRepository`] - a checkout would discard changes
    /// * [`DevenvError::BranchNotFound`] - `no_create` without `ignore_non_existing`
    ///   and the branch is missing
    /// * any git failure, unchanged
    pub fn reconcile(&self, branch: &str, options: ReconcileOptions) -> Result<ReconcileOutcome> {
        let branch = require(Some(branch), "Branch name")?;
        let product = self.product.name();

        println!(
            "Setting up git for {} in {}",
            product,
            self.repo.workdir().display()
        );
        debug!(product, branch, ?options, "reconciling local branch");

        if !options.no_create || options.reset_only {
            if let Some(default_branch) = &self.product.default_branch {
                self.ensure_clean(default_branch)?;
                print_progress(&format!("Switching to default branch {default_branch}..."));
                self.repo.checkout(default_branch)?;
                print_success(&format!("Switched to default branch {default_branch}"));
            }
        }

        if options.reset_only {
            return Ok(ReconcileOutcome::ResetToDefault {
                branch: self.product.default_branch.clone(),
            });
        }

        let exists = self.repo.list_branch_names()?.contains(branch);
        let mut created = false;

        if !exists {
            if options.no_create && options.ignore_non_existing {
                print_warning(&format!("Branch {branch} does not exist"));
                return Ok(ReconcileOutcome::SkippedMissing);
            }
            if options.no_create {
                return Err(DevenvError::BranchNotFound(branch.to_string()));
            }

            print_progress(&format!("Creating branch {branch}..."));
            self.repo.create_branch(branch)?;
            self.repo.push_new_branch(GIT_ORIGIN, branch)?;
            print_success(&format!("Created branch {branch} and pushed it to {GIT_ORIGIN}"));
            info!(product, branch, "created and pushed branch");
            created = true;
        } else {
            self.ensure_clean(branch)?;
        }

        print_progress(&format!("Checking out branch {branch}..."));
        self.repo.checkout(branch)?;
        print_success(&format!("Checked out branch {branch}"));

        Ok(ReconcileOutcome::CheckedOut { created })
    }

    fn ensure_clean(&self, target: &str) -> Result<()> {
        if self.repo.is_dirty()? {
            return Err(DevenvError::DirtyRepository {
                path: self.repo.workdir().to_path_buf(),
                target: target.to_string(),
            });
        }
        Ok(())
    }
}
