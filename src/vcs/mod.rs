//! Version control abstraction
//!
//! The branch reconciler only needs a handful of repository operations.
//! They are expressed as the [`VersionControl`] trait so the decision logic
//! can be exercised against [`MockRepository`] while production code uses
//! [`GitRepository`].

use std::collections::BTreeSet;
use std::path::Path;

use crate::error::Result;

pub mod mock_git;
pub mod real_git;

pub use mock_git::MockRepository;
pub use real_git::GitRepository;

/// Repository operations used while reconciling local branches
pub trait VersionControl {
    /// Working directory of the repository
    fn workdir(&self) -> &Path;

    /// Whether tracked files have uncommitted changes
    ///
    /// Untracked files do not count; a checkout never touches them.
    fn is_dirty(&self) -> Result<bool>;

    /// Names of all local branches
    fn list_branch_names(&self) -> Result<BTreeSet<String>>;

    /// Switches the working tree to an existing branch
    fn checkout(&self, name: &str) -> Result<()>;

    /// Creates a local branch at the current HEAD without switching to it
    fn create_branch(&self, name: &str) -> Result<()>;

    /// Publishes a newly created local branch to `remote`
    fn push_new_branch(&self, remote: &str, name: &str) -> Result<()>;
}
