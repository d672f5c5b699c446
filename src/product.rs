//! Supported products
//!
//! The set of products is closed: each one has its own configuration table,
//! its own Amplify tagging, and its own provisioning requirements.

use std::fmt;
use std::path::PathBuf;

/// A product devenv knows how to provision
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProductKind {
    Claire,
    WellskyApps,
}

impl ProductKind {
    /// All products, in the order they are processed
    pub const ALL: [ProductKind; 2] = [ProductKind::Claire, ProductKind::WellskyApps];

    /// Configuration table name, also used for tagging
    pub fn section(self) -> &'static str {
        match self {
            ProductKind::Claire => "claire",
            ProductKind::WellskyApps => "wellsky-apps",
        }
    }

    /// Whether environments of this product keep deployment state in S3
    pub fn requires_deployment_bucket(self) -> bool {
        matches!(self, ProductKind::Claire)
    }

    /// Value of the `name` tag put on the Amplify branch
    pub fn tag_for(self, env_name: &str) -> String {
        format!("{}-{}", self.section(), env_name)
    }
}

impl fmt::Display for ProductKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.section())
    }
}

/// A configured product
///
/// Built once by [`crate::config::ProductRegistry`] and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub kind: ProductKind,
    /// Amplify application id
    pub app_id: String,
    /// Local checkout of the product's repository
    pub path: PathBuf,
    /// Branch to return to before creating new branches
    pub default_branch: Option<String>,
}

impl Product {
    pub fn name(&self) -> &'static str {
        self.kind.section()
    }
}
