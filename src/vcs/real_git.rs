use super::*;
use git2::{BranchType, Repository, StatusOptions};
use std::path::PathBuf;
use std::process::Command;
use tracing::debug;

use crate::constants::GIT_CMD;
use crate::error::DevenvError;

/// [`VersionControl`] backed by a real repository
///
/// Read-only queries go through git2. Checkout and push shell out to the
/// git CLI so hooks, credential helpers and sparse checkouts behave exactly
/// as they do for the developer's own git commands.
pub struct GitRepository {
    repo: Repository,
    workdir: PathBuf,
}

impl GitRepository {
    /// Opens the repository at `path`
    ///
    /// # Errors
    ///
    /// Returns a precondition error if the path does not exist or the
    /// repository is bare, and a git error if it is not a repository.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(DevenvError::Precondition(format!(
                "Path {} does not exist",
                path.display()
            )));
        }

        let repo = Repository::open(path)?;
        let workdir = repo
            .workdir()
            .ok_or_else(|| {
                DevenvError::Precondition(format!(
                    "Repository at {} is bare",
                    path.display()
                ))
            })?
            .to_path_buf();

        Ok(Self { repo, workdir })
    }

    /// Execute git command in the working directory
    fn execute_git_command(&self, args: &[&str]) -> Result<String> {
        debug!(workdir = %self.workdir.display(), ?args, "running git");
        let output = Command::new(GIT_CMD)
            .args(args)
            .current_dir(&self.workdir)
            .output()?;

        if !output.status.success() {
            return Err(DevenvError::GitCommand {
                command: args.join(" "),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

impl VersionControl for GitRepository {
    fn workdir(&self) -> &Path {
        &self.workdir
    }

    fn is_dirty(&self) -> Result<bool> {
        let statuses = self.repo.statuses(Some(
            StatusOptions::new()
                .include_untracked(false)
                .include_ignored(false),
        ))?;

        Ok(!statuses.is_empty())
    }

    fn list_branch_names(&self) -> Result<BTreeSet<String>> {
        let mut names = BTreeSet::new();
        for branch in self.repo.branches(Some(BranchType::Local))? {
            let (branch, _) = branch?;
            if let Some(name) = branch.name()? {
                names.insert(name.to_string());
            }
        }
        Ok(names)
    }

    fn checkout(&self, name: &str) -> Result<()> {
        self.execute_git_command(&["checkout", name])?;
        Ok(())
    }

    fn create_branch(&self, name: &str) -> Result<()> {
        let head = self.repo.head()?.peel_to_commit()?;
        self.repo.branch(name, &head, false)?;
        Ok(())
    }

    fn push_new_branch(&self, remote: &str, name: &str) -> Result<()> {
        self.execute_git_command(&["push", remote, name])?;
        Ok(())
    }
}
