//! Configuration management for devenv
//!
//! This module loads the product table from `devenv.toml` and validates it
//! into an immutable [`ProductRegistry`]. Nothing reads configuration after
//! startup; the registry is handed to the commands explicitly.
//!
//! # Lookup Order
//!
//! 1. The `--config` flag
//! 2. The `DEVENV_CONFIG` environment variable
//! 3. `devenv.toml` in the current directory
//!
//! # File Format
//!
//! One table per product. `app_id` and `path` are required,
//! `default-branch` is optional.
//!
//! ```toml
//! [claire]
//! app_id = "d2xyz0example"
//! path = "../claire"
//! default-branch = "develop"
//!
//! [wellsky-apps]
//! app_id = "d3abc0example"
//! path = "/src/wellsky-apps"
//! ```

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::constants::{CONFIG_FILE_NAME, CONFIG_PATH_ENV};
use crate::error::{DevenvError, Result};
use crate::product::{Product, ProductKind};

/// Raw file layout, before validation
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    claire: Option<ProductSection>,
    #[serde(rename = "wellsky-apps")]
    wellsky_apps: Option<ProductSection>,
}

/// One product table
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ProductSection {
    app_id: String,
    path: PathBuf,
    #[serde(rename = "default-branch")]
    default_branch: Option<String>,
}

/// Validated, read-only product table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRegistry {
    products: BTreeMap<ProductKind, Product>,
}

impl ProductRegistry {
    /// Builds a registry from already validated products
    pub fn new(products: impl IntoIterator<Item = Product>) -> Self {
        Self {
            products: products.into_iter().map(|p| (p.kind, p)).collect(),
        }
    }

    /// Resolves the configuration file and loads it
    ///
    /// # Arguments
    ///
    /// * `explicit` - Path given on the command line, if any
    ///
    /// # Errors
    ///
    /// Returns [`DevenvError::Config`] if the file is missing, cannot be
    /// parsed, or fails validation.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(p) => p.to_path_buf(),
            None => std::env::var_os(CONFIG_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME)),
        };
        Self::load_from_file(&path)
    }

    /// Loads and validates a specific configuration file
    ///
    /// Relative product paths are resolved against the directory holding
    /// the file, so the file can be shared between checkouts.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            DevenvError::Config(format!("Failed to read {}: {e}", path.display()))
        })?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        Self::from_toml(&content, base)
    }

    /// Parses configuration text
    ///
    /// # Arguments
    ///
    /// * `content` - TOML text
    /// * `base` - Directory that relative product paths are relative to
    pub fn from_toml(content: &str, base: &Path) -> Result<Self> {
        let file: ConfigFile = toml::from_str(content)
            .map_err(|e| DevenvError::Config(format!("Failed to parse configuration: {e}")))?;

        let sections = [
            (ProductKind::Claire, file.claire),
            (ProductKind::WellskyApps, file.wellsky_apps),
        ];

        let mut products = Vec::new();
        for (kind, section) in sections {
            if let Some(section) = section {
                products.push(Self::validate_section(kind, section, base)?);
            }
        }

        if products.is_empty() {
            return Err(DevenvError::Config(
                "No products configured; add a [claire] or [wellsky-apps] table".to_string(),
            ));
        }

        Ok(Self::new(products))
    }

    fn validate_section(kind: ProductKind, section: ProductSection, base: &Path) -> Result<Product> {
        let app_id = section.app_id.trim();
        if app_id.is_empty() {
            return Err(DevenvError::Config(format!("[{kind}] app_id is empty")));
        }

        if section.path.as_os_str().is_empty() {
            return Err(DevenvError::Config(format!("[{kind}] path is empty")));
        }

        let default_branch = match section.default_branch {
            Some(branch) if branch.trim().is_empty() => {
                return Err(DevenvError::Config(format!(
                    "[{kind}] default-branch is empty"
                )));
            }
            Some(branch) => Some(branch.trim().to_string()),
            None => None,
        };

        let path = if section.path.is_relative() {
            base.join(section.path)
        } else {
            section.path
        };

        Ok(Product {
            kind,
            app_id: app_id.to_string(),
            path,
            default_branch,
        })
    }

    /// Looks up a product, failing if it was not configured
    pub fn get(&self, kind: ProductKind) -> Result<&Product> {
        self.products.get(&kind).ok_or_else(|| {
            DevenvError::Config(format!("Product '{kind}' is not configured"))
        })
    }

    /// Configured products in processing order
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }
}
