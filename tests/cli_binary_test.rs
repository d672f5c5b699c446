//! Binary surface tests (no cloud access required)

mod common;

use anyhow::Result;
use assert_cmd::Command;
use common::test_repo::TestRepo;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn devenv(dir: &std::path::Path) -> Result<Command> {
    let mut cmd = Command::cargo_bin("devenv")?;
    cmd.current_dir(dir).env_remove("DEVENV_CONFIG");
    Ok(cmd)
}

#[test]
fn test_help_lists_products_and_shortcut() -> Result<()> {
    let temp_dir = TempDir::new()?;
    devenv(temp_dir.path())?
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--claire"))
        .stdout(predicate::str::contains("--wellsky-apps"))
        .stdout(predicate::str::contains("jira"));
    Ok(())
}

#[test]
fn test_missing_configuration_fails() -> Result<()> {
    let temp_dir = TempDir::new()?;
    devenv(temp_dir.path())?
        .args(["--claire", "--env", "qa", "--remove"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
    Ok(())
}

#[test]
fn test_no_product_selected_fails() -> Result<()> {
    let temp_dir = TempDir::new()?;
    fs::write(
        temp_dir.path().join("devenv.toml"),
        "[claire]\napp_id = \"d2\"\npath = \"work\"\n",
    )?;

    devenv(temp_dir.path())?
        .args(["--branch", "feature/x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Product is not set"));
    Ok(())
}

#[test]
fn test_conflicting_data_flags_rejected() -> Result<()> {
    let temp_dir = TempDir::new()?;
    devenv(temp_dir.path())?
        .args(["--claire", "--copy-data-from", "qa", "--share-data-with", "qa"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
    Ok(())
}

#[test]
fn test_jira_attach_to_missing_ticket_branch_succeeds() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let repo = TestRepo::new(&temp_dir)?;
    fs::write(
        temp_dir.path().join("devenv.toml"),
        "[claire]\napp_id = \"d2\"\npath = \"work\"\ndefault-branch = \"main\"\n",
    )?;

    devenv(temp_dir.path())?
        .args(["--claire", "jira", "CW-2134"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Branch issue/CW-2134 does not exist"));

    assert!(!repo.has_branch("issue/CW-2134")?);
    Ok(())
}

#[test]
fn test_local_only_checks_out_existing_branch() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let repo = TestRepo::new(&temp_dir)?;
    repo.create_branch("feature/x")?;
    let config = temp_dir.path().join("elsewhere.toml");
    fs::write(
        &config,
        "[wellsky-apps]\napp_id = \"d3\"\npath = \"work\"\n",
    )?;

    devenv(temp_dir.path())?
        .arg("--config")
        .arg(&config)
        .args(["--wellsky-apps", "--branch", "feature/x", "--local-only"])
        .assert()
        .success();

    assert_eq!(repo.current_branch()?, "feature/x");
    Ok(())
}
