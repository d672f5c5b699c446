//! Test repository setup utilities

use anyhow::Result;
use git2::{BranchType, Repository};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// A working repository with a bare `origin` next to it
pub struct TestRepo {
    path: PathBuf,
    origin: PathBuf,
}

fn git(dir: &Path, args: &[&str]) -> Result<()> {
    let output = Command::new("git").args(args).current_dir(dir).output()?;
    if !output.status.success() {
        anyhow::bail!(
            "git {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr)
        );
    }
    Ok(())
}

impl TestRepo {
    /// Create a repository on `main` with one commit, pushed to origin
    pub fn new(temp_dir: &TempDir) -> Result<Self> {
        let origin = temp_dir.path().join("origin.git");
        fs::create_dir_all(&origin)?;
        git(&origin, &["init", "--bare"])?;

        let path = temp_dir.path().join("work");
        fs::create_dir_all(&path)?;
        git(&path, &["init"])?;
        git(&path, &["symbolic-ref", "HEAD", "refs/heads/main"])?;
        git(&path, &["config", "user.email", "test@example.com"])?;
        git(&path, &["config", "user.name", "Test User"])?;

        fs::write(path.join("README.md"), "# Test Repository\n")?;
        git(&path, &["add", "."])?;
        git(&path, &["commit", "-m", "Initial commit"])?;

        let origin_url = origin.to_string_lossy().to_string();
        git(&path, &["remote", "add", "origin", &origin_url])?;
        git(&path, &["push", "origin", "main"])?;

        Ok(Self { path, origin })
    }

    /// Get the repository path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create a local branch at HEAD
    pub fn create_branch(&self, name: &str) -> Result<()> {
        git(&self.path, &["branch", name])
    }

    /// Modify a tracked file without committing
    pub fn make_dirty(&self) -> Result<()> {
        fs::write(self.path.join("README.md"), "# Uncommitted change\n")?;
        Ok(())
    }

    /// Add an untracked file
    pub fn add_untracked(&self, name: &str) -> Result<()> {
        fs::write(self.path.join(name), "scratch\n")?;
        Ok(())
    }

    /// Name of the checked out branch
    pub fn current_branch(&self) -> Result<String> {
        let repo = Repository::open(&self.path)?;
        let head = repo.head()?;
        Ok(head.shorthand().unwrap_or("HEAD").to_string())
    }

    /// Whether a local branch exists
    pub fn has_branch(&self, name: &str) -> Result<bool> {
        let repo = Repository::open(&self.path)?;
        let exists = repo.find_branch(name, BranchType::Local).is_ok();
        Ok(exists)
    }

    /// Whether origin has received a branch
    pub fn origin_has_branch(&self, name: &str) -> Result<bool> {
        let repo = Repository::open_bare(&self.origin)?;
        let exists = repo.find_branch(name, BranchType::Local).is_ok();
        Ok(exists)
    }
}
