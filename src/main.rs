//! devenv - Preview Environment Manager
//!
//! This is the main entry point for the devenv CLI application.

use anyhow::Result;
use clap::Parser;
use colored::*;

use devenv::aws::AwsContext;
use devenv::cli::Cli;
use devenv::commands;
use devenv::config::ProductRegistry;
use devenv::constants::DEPLOYMENT_BUCKET_REGION;
use devenv::deployment::AmplifyGateway;
use devenv::orchestrator::EnvironmentOrchestrator;
use devenv::product::Product;
use devenv::storage::{S3Storage, StorageProvisioner};
use devenv::utils;
use devenv::vcs::GitRepository;

/// Main entry point for devenv
///
/// Loads `.env` and the product configuration, resolves the command line
/// into a plan and executes it. Any error that escapes the per-product
/// boundary ends the process with exit code 1.
fn main() {
    if let Err(e) = run() {
        eprintln!("{} {:#}", "✗ Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Credentials may live in .env; a missing file is fine.
    let _ = dotenv::dotenv();

    let cli = Cli::parse();
    utils::init_tracing(cli.verbose);

    let registry = ProductRegistry::load(cli.config.as_deref())?;
    let plan = cli.into_plan()?;

    commands::execute(
        &plan,
        &registry,
        |product: &Product| GitRepository::open(&product.path),
        || {
            let context = AwsContext::load()?;
            Ok(EnvironmentOrchestrator::new(
                AmplifyGateway::new(context.clone()),
                StorageProvisioner::new(S3Storage::new(context, DEPLOYMENT_BUCKET_REGION)),
            ))
        },
    )?;

    Ok(())
}
