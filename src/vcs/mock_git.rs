use super::*;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::error::DevenvError;

/// In-memory [`VersionControl`] for testing
///
/// Clones share state, so a test can hand one clone to the code under test
/// and inspect the recorded operations through another.
#[derive(Clone)]
pub struct MockRepository {
    state: Arc<Mutex<RepoState>>,
    workdir: PathBuf,
}

#[derive(Debug, Clone)]
struct RepoState {
    branches: BTreeSet<String>,
    current_branch: String,
    dirty: bool,
    fail_push: bool,
    operations: Vec<Operation>,
}

/// A mutating operation recorded by [`MockRepository`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Checkout(String),
    CreateBranch(String),
    Push { remote: String, branch: String },
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl MockRepository {
    /// Create a clean repository with a single `main` branch checked out
    pub fn new() -> Self {
        let state = RepoState {
            branches: BTreeSet::from(["main".to_string()]),
            current_branch: "main".to_string(),
            dirty: false,
            fail_push: false,
            operations: Vec::new(),
        };

        Self {
            state: Arc::new(Mutex::new(state)),
            workdir: PathBuf::from("/mock/repo"),
        }
    }

    /// Add an existing local branch
    pub fn with_branch(self, name: &str) -> Self {
        self.state.lock().unwrap().branches.insert(name.to_string());
        self
    }

    /// Mark the working tree as having uncommitted changes
    pub fn with_dirty_tree(self) -> Self {
        self.state.lock().unwrap().dirty = true;
        self
    }

    /// Make every push fail as if the remote rejected it
    pub fn with_failing_push(self) -> Self {
        self.state.lock().unwrap().fail_push = true;
        self
    }

    /// Currently checked out branch
    pub fn current_branch(&self) -> String {
        self.state.lock().unwrap().current_branch.clone()
    }

    /// Mutating operations in call order
    pub fn operations(&self) -> Vec<Operation> {
        self.state.lock().unwrap().operations.clone()
    }

    /// Local branch names
    pub fn branches(&self) -> BTreeSet<String> {
        self.state.lock().unwrap().branches.clone()
    }
}

impl VersionControl for MockRepository {
    fn workdir(&self) -> &Path {
        &self.workdir
    }

    fn is_dirty(&self) -> Result<bool> {
        Ok(self.state.lock().unwrap().dirty)
    }

    fn list_branch_names(&self) -> Result<BTreeSet<String>> {
        Ok(self.branches())
    }

    fn checkout(&self, name: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if !state.branches.contains(name) {
            return Err(DevenvError::GitCommand {
                command: format!("checkout {name}"),
                stderr: format!("error: pathspec '{name}' did not match any file(s) known to git"),
            });
        }
        state.current_branch = name.to_string();
        state.operations.push(Operation::Checkout(name.to_string()));
        Ok(())
    }

    fn create_branch(&self, name: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if !state.branches.insert(name.to_string()) {
            return Err(DevenvError::GitCommand {
                command: format!("branch {name}"),
                stderr: format!("fatal: a branch named '{name}' already exists"),
            });
        }
        state.operations.push(Operation::CreateBranch(name.to_string()));
        Ok(())
    }

    fn push_new_branch(&self, remote: &str, name: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.fail_push {
            return Err(DevenvError::GitCommand {
                command: format!("push {remote} {name}"),
                stderr: "fatal: could not read from remote repository".to_string(),
            });
        }
        state.operations.push(Operation::Push {
            remote: remote.to_string(),
            branch: name.to_string(),
        });
        Ok(())
    }
}
