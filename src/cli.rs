//! Command-line interface
//!
//! [`Cli`] mirrors the flags developers already use. [`Cli::into_plan`]
//! turns them into a [`Plan`] so the decisions (ticket shortcut, local
//! versus remote work, create versus remove) are made once, up front,
//! before anything touches git or the cloud.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::constants::{BASELINE_ENVIRONMENT, DEFAULT_GRAPHQL_ENDPOINT, TICKET_BRANCH_PREFIX};
use crate::error::{DevenvError, Result};
use crate::orchestrator::EnvironmentRequest;
use crate::product::ProductKind;
use crate::reconcile::ReconcileOptions;

/// Command-line arguments for devenv
#[derive(Parser, Debug)]
#[command(name = "devenv")]
#[command(about = "Set up and tear down preview environments", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Local Git branch name
    #[arg(long)]
    pub branch: Option<String>,

    /// Amplify environment name, no slash allowed
    #[arg(long)]
    pub env: Option<String>,

    /// Do not create local Git branch
    #[arg(long, conflicts_with = "local_only")]
    pub remote_only: bool,

    /// Do not create Amplify environment
    #[arg(long)]
    pub local_only: bool,

    /// GraphQL endpoint used by Claire builds
    #[arg(long, default_value = DEFAULT_GRAPHQL_ENDPOINT)]
    pub bretha_graphql_endpoint: String,

    /// Remove environment
    #[arg(long)]
    pub remove: bool,

    /// Duplicate data from another environment
    #[arg(long, value_name = "ENV", conflicts_with = "share_data_with")]
    pub copy_data_from: Option<String>,

    /// Share data with another environment
    #[arg(long, value_name = "ENV")]
    pub share_data_with: Option<String>,

    /// Enable setup of Claire
    #[arg(long, global = true, help_heading = "Products")]
    pub claire: bool,

    /// Enable setup of Wellsky Apps
    #[arg(long, global = true, help_heading = "Products")]
    pub wellsky_apps: bool,

    /// Configuration file (defaults to $DEVENV_CONFIG, then ./devenv.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Show debug diagnostics on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Shortcuts to set up environments based on JIRA tickets
    Jira {
        /// JIRA ticket number, e.g. CW-2134
        ticket: Option<String>,

        /// Create new Amplify environment
        #[arg(long)]
        new: bool,
    },
}

/// Remote half of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteAction {
    Create {
        request: EnvironmentRequest,
        copy_data_from: Option<String>,
    },
    Remove {
        env_name: Option<String>,
    },
}

/// Everything a run will do, decided before any side effect
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plan {
    /// Switch each product onto an existing ticket branch, nothing else
    Attach {
        products: Vec<ProductKind>,
        branch: String,
    },
    /// Reconcile local branches, then create or remove environments
    Run {
        products: Vec<ProductKind>,
        local: Option<(String, ReconcileOptions)>,
        remote: Option<RemoteAction>,
    },
}

impl Cli {
    /// Selected products, in processing order
    pub fn products(&self) -> Vec<ProductKind> {
        ProductKind::ALL
            .into_iter()
            .filter(|kind| match kind {
                ProductKind::Claire => self.claire,
                ProductKind::WellskyApps => self.wellsky_apps,
            })
            .collect()
    }

    /// Resolves flags into a [`Plan`]
    ///
    /// # Ticket Shortcut
    ///
    /// `jira <ticket>` always works on branch `issue/<ticket>`. Without
    /// `--new` it only attaches to the branch if it exists. With `--new`
    /// it is a full create of environment `<ticket>` sharing data with
    /// the baseline environment.
    ///
    /// # Errors
    ///
    /// Returns a precondition error if no product is selected.
    pub fn into_plan(self) -> Result<Plan> {
        let products = self.products();
        if products.is_empty() {
            return Err(DevenvError::Precondition(
                "Product is not set; pass --claire and/or --wellsky-apps".to_string(),
            ));
        }

        let Cli {
            mut branch,
            mut env,
            remote_only,
            mut local_only,
            bretha_graphql_endpoint,
            remove,
            copy_data_from,
            mut share_data_with,
            command,
            ..
        } = self;

        if let Some(Command::Jira {
            ticket: Some(ticket),
            new,
        }) = command
        {
            let ticket = ticket.trim();
            if !ticket.is_empty() {
                let ticket_branch = format!("{TICKET_BRANCH_PREFIX}{ticket}");
                if !new {
                    return Ok(Plan::Attach {
                        products,
                        branch: ticket_branch,
                    });
                }
                branch = Some(ticket_branch);
                env = Some(ticket.to_string());
                share_data_with = Some(BASELINE_ENVIRONMENT.to_string());
                local_only = false;
            }
        }

        let local = match &branch {
            Some(name) if !remote_only => Some((
                name.clone(),
                ReconcileOptions {
                    no_create: local_only,
                    ..ReconcileOptions::default()
                },
            )),
            _ => None,
        };

        let remote = if local_only {
            None
        } else if remove {
            Some(RemoteAction::Remove { env_name: env })
        } else {
            Some(RemoteAction::Create {
                request: EnvironmentRequest {
                    branch,
                    env_name: env,
                    graphql_endpoint: Some(bretha_graphql_endpoint),
                    share_data_with,
                },
                copy_data_from,
            })
        };

        Ok(Plan::Run {
            products,
            local,
            remote,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(args: &[&str]) -> Result<Plan> {
        let mut argv = vec!["devenv"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap().into_plan()
    }

    #[test]
    fn test_ticket_without_new_attaches() {
        let plan = plan(&["--claire", "--wellsky-apps", "jira", "CW-2134"]).unwrap();
        assert_eq!(
            plan,
            Plan::Attach {
                products: vec![ProductKind::Claire, ProductKind::WellskyApps],
                branch: "issue/CW-2134".to_string(),
            }
        );
    }

    #[test]
    fn test_ticket_with_new_is_full_create() {
        let plan = plan(&["jira", "CW-2134", "--new", "--claire"]).unwrap();
        let Plan::Run {
            products,
            local,
            remote,
        } = plan
        else {
            panic!("Expected a full run");
        };

        assert_eq!(products, vec![ProductKind::Claire]);
        assert_eq!(
            local,
            Some(("issue/CW-2134".to_string(), ReconcileOptions::create()))
        );
        match remote {
            Some(RemoteAction::Create {
                request,
                copy_data_from,
            }) => {
                assert_eq!(request.branch.as_deref(), Some("issue/CW-2134"));
                assert_eq!(request.env_name.as_deref(), Some("CW-2134"));
                assert_eq!(request.share_data_with.as_deref(), Some("qa"));
                assert_eq!(
                    request.graphql_endpoint.as_deref(),
                    Some(DEFAULT_GRAPHQL_ENDPOINT)
                );
                assert_eq!(copy_data_from, None);
            }
            other => panic!("Expected create, got {other:?}"),
        }
    }

    #[test]
    fn test_ticket_with_new_overrides_local_only() {
        let plan = plan(&["--claire", "--local-only", "jira", "CW-1", "--new"]).unwrap();
        let Plan::Run { local, remote, .. } = plan else {
            panic!("Expected a full run");
        };
        assert_eq!(local.map(|(_, o)| o), Some(ReconcileOptions::create()));
        assert!(remote.is_some());
    }

    #[test]
    fn test_local_only_requires_existing_branch() {
        let plan = plan(&["--claire", "--branch", "feature/x", "--local-only"]).unwrap();
        assert_eq!(
            plan,
            Plan::Run {
                products: vec![ProductKind::Claire],
                local: Some(("feature/x".to_string(), ReconcileOptions::existing_only())),
                remote: None,
            }
        );
    }

    #[test]
    fn test_remote_only_skips_git() {
        let plan = plan(&[
            "--wellsky-apps",
            "--branch",
            "feature/x",
            "--env",
            "fx",
            "--remote-only",
        ])
        .unwrap();
        let Plan::Run { local, remote, .. } = plan else {
            panic!("Expected a full run");
        };
        assert!(local.is_none());
        assert!(matches!(remote, Some(RemoteAction::Create { .. })));
    }

    #[test]
    fn test_remove() {
        let plan = plan(&["--claire", "--env", "CW-9", "--remove"]).unwrap();
        assert_eq!(
            plan,
            Plan::Run {
                products: vec![ProductKind::Claire],
                local: None,
                remote: Some(RemoteAction::Remove {
                    env_name: Some("CW-9".to_string())
                }),
            }
        );
    }

    #[test]
    fn test_no_product_is_precondition_error() {
        assert!(matches!(
            plan(&["--branch", "x"]),
            Err(DevenvError::Precondition(_))
        ));
    }

    #[test]
    fn test_conflicting_flags_rejected() {
        assert!(Cli::try_parse_from([
            "devenv",
            "--claire",
            "--copy-data-from",
            "qa",
            "--share-data-with",
            "qa"
        ])
        .is_err());
        assert!(
            Cli::try_parse_from(["devenv", "--claire", "--remote-only", "--local-only"]).is_err()
        );
    }

    #[test]
    fn test_jira_without_ticket_falls_through() {
        let plan = plan(&["--claire", "--env", "qa", "jira"]).unwrap();
        assert!(matches!(plan, Plan::Run { local: None, .. }));
    }
}
