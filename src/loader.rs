//! Configuration loading and source merging.
//!
//! [`ConfigBuilder`] assembles a [`PropertyStore`] from files and the process
//! environment, in a fixed precedence order (later sources win):
//!
//! 1. default files in the base directory (`application.properties`,
//!    `application.yaml`, `application.yml`, `application.json`,
//!    `application.toml`), skipped when missing;
//! 2. per-profile files `application-<profile>.<ext>` for every profile
//!    named by the `config.profiles` property;
//! 3. additional files named by the `config.sources` property;
//! 4. files added explicitly on the builder;
//! 5. environment variables (unless disabled).

use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::Config;
use crate::convert::split_list;
use crate::error::ConfigError;
use crate::parser::{self, FileFormat};
use crate::store::PropertyStore;

/// Default files probed in the base directory, in load order.
const DEFAULT_FILES: &[&str] = &[
    "application.properties",
    "application.yaml",
    "application.yml",
    "application.json",
    "application.toml",
];

/// Extensions probed for per-profile files.
const PROFILE_EXTENSIONS: &[&str] = &["properties", "yaml", "yml", "json", "toml"];

/// Property naming additional profiles to load files for.
const PROFILES_KEY: &str = "config.profiles";

/// Property naming additional configuration files to load.
const SOURCES_KEY: &str = "config.sources";

/// Builder for [`Config`].
pub struct ConfigBuilder {
    base_dir: PathBuf,
    files: Vec<PathBuf>,
    include_env: bool,
}

impl ConfigBuilder {
    /// Create a builder with the current directory as base and environment
    /// variables enabled.
    pub fn new() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            files: Vec::new(),
            include_env: true,
        }
    }

    /// Set the directory that default and relative file paths resolve
    /// against.
    pub fn base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = dir.into();
        self
    }

    /// Add a configuration file to load after the defaults.
    ///
    /// Unlike the default files, an explicitly added file must exist and
    /// parse, otherwise loading fails.
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.files.push(path.into());
        self
    }

    /// Enable or disable ingestion of process environment variables.
    pub fn env(mut self, enabled: bool) -> Self {
        self.include_env = enabled;
        self
    }

    /// Load all sources and produce an immutable [`Config`].
    pub fn load(self) -> Result<Config> {
        let mut store = PropertyStore::new();
        let mut loaded = Vec::new();

        for name in DEFAULT_FILES {
            self.load_optional(&mut store, &mut loaded, &self.base_dir.join(name))?;
        }

        let profiles: Vec<String> = store
            .get(PROFILES_KEY)
            .map(|raw| split_list(raw, ','))
            .unwrap_or_default();
        for profile in &profiles {
            for extension in PROFILE_EXTENSIONS {
                let name = format!("application-{}.{}", profile, extension);
                self.load_optional(&mut store, &mut loaded, &self.base_dir.join(name))?;
            }
        }

        let sources: Vec<String> = store
            .get(SOURCES_KEY)
            .map(|raw| split_list(raw, ','))
            .unwrap_or_default();
        for source in &sources {
            self.load_required(&mut store, &mut loaded, &self.resolve(Path::new(source)))?;
        }

        for file in &self.files {
            self.load_required(&mut store, &mut loaded, &self.resolve(file))?;
        }

        if self.include_env {
            let mut count = 0usize;
            for (key, value) in env::vars() {
                store.put(&key, &value);
                count += 1;
            }
            debug!("Ingested {} environment variables", count);
        }

        info!(
            "Configuration loaded: {} properties from {} files",
            store.len(),
            loaded.len()
        );
        Ok(Config::new(store, loaded))
    }

    /// Resolve a possibly relative path against the base directory.
    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    /// Load a file that is allowed to be missing.
    fn load_optional(
        &self,
        store: &mut PropertyStore,
        loaded: &mut Vec<PathBuf>,
        path: &Path,
    ) -> Result<()> {
        if !path.exists() {
            debug!("Skipping missing config file: {}", path.display());
            return Ok(());
        }
        self.load_required(store, loaded, path)
    }

    /// Load a file that must exist and parse.
    fn load_required(
        &self,
        store: &mut PropertyStore,
        loaded: &mut Vec<PathBuf>,
        path: &Path,
    ) -> Result<()> {
        let pairs = read_file(path)
            .with_context(|| format!("Failed to load config file: {}", path.display()))?;
        debug!(
            "Loaded {} properties from '{}'",
            pairs.len(),
            path.display()
        );
        store.put_all(pairs);
        loaded.push(path.to_path_buf());
        Ok(())
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Read and parse one configuration file.
fn read_file(path: &Path) -> Result<Vec<(String, String)>, ConfigError> {
    let format = FileFormat::from_path(path)?;
    let content = fs::read_to_string(path)?;
    parser::parse(format, &content)
}
