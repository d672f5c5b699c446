//! devenv - Preview Environment Manager
//!
//! devenv sets up and tears down per-developer and per-ticket preview
//! environments. An environment pairs a local git branch with an Amplify
//! branch of the same product, optionally backed by a private, encrypted
//! S3 bucket holding serverless deployment state.
//!
//! # Features
//!
//! - **Branch Reconciliation**: Create, push or check out the environment's
//!   branch, refusing to touch a dirty working tree
//! - **Idempotent Buckets**: Deployment state buckets are created once,
//!   encrypted and locked down; re-running is harmless
//! - **Environment Lifecycle**: Create the Amplify branch and start its first
//!   release, or delete it again
//! - **Ticket Shortcuts**: `devenv jira CW-2134 [--new]`
//!
//! # Architecture
//!
//! - [`reconcile`] - Local branch decision rules
//! - [`orchestrator`] - Remote create/remove workflows
//! - [`storage`] - Deployment bucket provisioning
//! - [`deployment`] - Amplify branch operations
//! - [`vcs`] - Repository operations
//! - [`cli`] / [`commands`] - Command line resolution and execution
//! - [`config`] - Product configuration
//!
//! # Usage Example
//!
//! ```no_run
//! use devenv::config::ProductRegistry;
//! use devenv::product::ProductKind;
//! use devenv::reconcile::{BranchReconciler, ReconcileOptions};
//!
//! let registry = ProductRegistry::load(None).expect("Failed to load configuration");
//! let claire = registry.get(ProductKind::Claire).expect("claire is not configured");
//!
//! let reconciler = BranchReconciler::open(claire).expect("Failed to open repository");
//! reconciler
//!     .reconcile("issue/CW-2134", ReconcileOptions::attach())
//!     .expect("Failed to switch branch");
//! ```

pub mod aws;
pub mod cli;
pub mod commands;
pub mod config;
pub mod constants;
pub mod core;
pub mod deployment;
pub mod error;
pub mod orchestrator;
pub mod product;
pub mod reconcile;
pub mod storage;
pub mod utils;
pub mod vcs;

pub use error::{DevenvError, Result};
