//! # Configuration
//!
//! Settings are loaded with [`confique`] from environment variables and TOML
//! files.
//!
//! ## Storage Hierarchy
//!
//! Configuration is resolved in priority order:
//! 1. **Environment variables**: `CONTACTS_PAGE_SIZE`, `CONTACTS_EXPORT_FILE`,
//!    `CONTACTS_SEED_FILE`.
//! 2. **Local Config**: `./contacts.toml` in the working directory.
//! 3. **Global Config**: OS-appropriate config directory (via `directories` crate).
//! 4. **Compiled Defaults**: Built-in fallbacks via `#[config(default = ...)]`.
//!
//! Missing files are skipped.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `page_size` | `10` | Rows per page in the contact list |
//! | `export_file` | `contacts.xlsx` | Where `export` writes the workbook |
//! | `seed_file` | (built-in) | JSON file to seed the store from |

use confique::Config;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{ContactsError, Result};
use crate::view::pager::DEFAULT_PAGE_SIZE;

pub const CONFIG_FILE_NAME: &str = "contacts.toml";
pub const DEFAULT_EXPORT_FILE: &str = "contacts.xlsx";

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ContactsConfig {
    /// Rows per page in the contact list
    #[config(env = "CONTACTS_PAGE_SIZE", default = 10)]
    pub page_size: usize,

    /// Path of the exported workbook
    #[config(env = "CONTACTS_EXPORT_FILE", default = "contacts.xlsx")]
    pub export_file: PathBuf,

    /// JSON dataset to seed the store with instead of the built-in one
    #[config(env = "CONTACTS_SEED_FILE")]
    pub seed_file: Option<PathBuf>,
}

impl Default for ContactsConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            export_file: PathBuf::from(DEFAULT_EXPORT_FILE),
            seed_file: None,
        }
    }
}

impl ContactsConfig {
    /// Load from the environment and the standard config file locations.
    pub fn load() -> Result<Self> {
        Self::load_layers(true, &Self::search_paths())
    }

    /// Load from the given files only, highest priority first.
    pub fn load_files(files: &[PathBuf]) -> Result<Self> {
        Self::load_layers(false, files)
    }

    /// Config files consulted by [`ContactsConfig::load`], highest priority first.
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(CONFIG_FILE_NAME)];
        if let Some(dirs) = ProjectDirs::from("com", "contacts", "contacts") {
            paths.push(dirs.config_dir().join(CONFIG_FILE_NAME));
        }
        paths
    }

    fn load_layers(env: bool, files: &[PathBuf]) -> Result<Self> {
        let mut builder = Self::builder();
        if env {
            builder = builder.env();
        }
        for file in files {
            builder = builder.file(file);
        }
        let config = builder.load()?;
        config.check()?;
        Ok(config)
    }

    fn check(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(ContactsError::InvalidConfig(
                "page_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
