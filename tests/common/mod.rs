//! Shared helpers for integration tests

#![allow(dead_code)]

pub mod test_repo;

use devenv::config::ProductRegistry;
use devenv::product::{Product, ProductKind};
use std::path::{Path, PathBuf};

/// A product record pointing at `path`
pub fn product(kind: ProductKind, path: &Path, default_branch: Option<&str>) -> Product {
    Product {
        kind,
        app_id: format!("app-{}", kind.section()),
        path: path.to_path_buf(),
        default_branch: default_branch.map(str::to_string),
    }
}

/// Registry with both products, neither of which has a usable repository
pub fn remote_only_registry() -> ProductRegistry {
    ProductRegistry::new([
        product(ProductKind::Claire, &PathBuf::from("/nonexistent/claire"), None),
        product(
            ProductKind::WellskyApps,
            &PathBuf::from("/nonexistent/wellsky-apps"),
            None,
        ),
    ])
}
