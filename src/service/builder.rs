// SPDX-License-Identifier: MIT OR Apache-2.0

//! Startup loading of the configuration document.
//!
//! The builder locates the document, applies the `.env` file next to it and parses the
//! document into a tree, either returning the tree or wrapping it in a [`Config`].

use crate::adapters::EnvVarAdapter;
use crate::domain::{ConfigError, ConfigTree, Result};
use crate::ports::OverrideSource;
use crate::service::config::Config;
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[cfg(feature = "yaml")]
use crate::adapters::YamlFileAdapter;

/// Default name of the configuration document.
pub const DEFAULT_FILE_NAME: &str = "config.yaml";

/// Default name of the environment file, looked up next to the document.
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Builder for constructing a [`Config`] from a document on disk.
///
/// By default the builder looks for `config.yaml` in the current directory and each
/// of its parents, applies a `.env` file found in the same directory, and reads
/// overrides from the process environment.
///
/// A missing `.env` is skipped silently and an unreadable one is logged; a missing or
/// malformed document is an error.
///
/// # Examples
///
/// ```rust,no_run
/// use treecfg::service::ConfigBuilder;
///
/// # fn main() -> treecfg::domain::Result<()> {
/// let config = ConfigBuilder::new()
///     .file_name("settings.yaml")
///     .project_dirs("com.example", "myapp")
///     .without_env_file()
///     .build()?;
/// println!("port = {}", config.get_u16_or("http.port", 8080));
/// # Ok(())
/// # }
/// ```
pub struct ConfigBuilder {
    file_name: String,
    search_from: Option<PathBuf>,
    project_dirs: Option<(String, String)>,
    env_file: Option<String>,
    overrides: Option<Arc<dyn OverrideSource>>,
}

impl ConfigBuilder {
    /// Creates a builder with the default options.
    pub fn new() -> Self {
        Self {
            file_name: DEFAULT_FILE_NAME.to_string(),
            search_from: None,
            project_dirs: None,
            env_file: Some(DEFAULT_ENV_FILE.to_string()),
            overrides: None,
        }
    }

    /// Sets the document file name searched for.
    pub fn file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = name.into();
        self
    }

    /// Starts the search in `dir` instead of the current directory.
    pub fn search_from(mut self, dir: impl Into<PathBuf>) -> Self {
        self.search_from = Some(dir.into());
        self
    }

    /// Falls back to the OS configuration directory of a project when the ancestor
    /// search finds nothing.
    pub fn project_dirs(mut self, qualifier: impl Into<String>, app_name: impl Into<String>) -> Self {
        self.project_dirs = Some((qualifier.into(), app_name.into()));
        self
    }

    /// Sets the environment file name looked up next to the document.
    pub fn env_file(mut self, name: impl Into<String>) -> Self {
        self.env_file = Some(name.into());
        self
    }

    /// Disables the environment file.
    pub fn without_env_file(mut self) -> Self {
        self.env_file = None;
        self
    }

    /// Reads overrides from `source` instead of the process environment.
    pub fn overrides(mut self, source: Arc<dyn OverrideSource>) -> Self {
        self.overrides = Some(source);
        self
    }

    /// Finds the configuration document.
    ///
    /// Returns `ConfigError::ConfigFileNotFound` when neither the ancestor search nor
    /// the project directory holds the file.
    #[cfg(feature = "yaml")]
    pub fn locate(&self) -> Result<PathBuf> {
        let start = match &self.search_from {
            Some(dir) => dir.clone(),
            None => env::current_dir()?,
        };

        if let Some(path) = YamlFileAdapter::discover(&start, &self.file_name) {
            tracing::debug!("Found configuration document at {}", path.display());
            return Ok(path);
        }

        if let Some((qualifier, app_name)) = &self.project_dirs {
            if let Some(path) =
                YamlFileAdapter::default_location(qualifier, app_name, &self.file_name)
            {
                if path.is_file() {
                    tracing::debug!("Using project configuration at {}", path.display());
                    return Ok(path);
                }
            }
        }

        Err(ConfigError::ConfigFileNotFound {
            file_name: self.file_name.clone(),
            search_root: start.display().to_string(),
        })
    }

    /// Locates the document, applies the environment file and parses the document.
    #[cfg(feature = "yaml")]
    pub fn load_tree(&self) -> Result<ConfigTree> {
        let path = self.locate()?;
        if let Some(dir) = path.parent() {
            self.apply_env_file(dir);
        }
        YamlFileAdapter::load(&path)
    }

    #[cfg(feature = "dotenv")]
    fn apply_env_file(&self, dir: &Path) {
        let Some(name) = &self.env_file else {
            return;
        };

        let env_path = dir.join(name);
        if !env_path.is_file() {
            tracing::trace!("No environment file at {}", env_path.display());
            return;
        }

        if let Err(e) = crate::adapters::apply_env_file(&env_path) {
            tracing::warn!("Failed to apply {}: {}", env_path.display(), e);
        }
    }

    #[cfg(not(feature = "dotenv"))]
    fn apply_env_file(&self, _dir: &Path) {}

    /// Loads the document into a new [`Config`].
    #[cfg(feature = "yaml")]
    pub fn build(self) -> Result<Config> {
        let tree = self.load_tree()?;
        let config = Config::with_overrides(self.override_source());
        config.load(tree);
        Ok(config)
    }

    fn override_source(&self) -> Arc<dyn OverrideSource> {
        match &self.overrides {
            Some(source) => Arc::clone(source),
            None => Arc::new(EnvVarAdapter::new()),
        }
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ConfigBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigBuilder")
            .field("file_name", &self.file_name)
            .field("search_from", &self.search_from)
            .field("project_dirs", &self.project_dirs)
            .field("env_file", &self.env_file)
            .field("overrides", &self.overrides.as_ref().map(|s| s.name()))
            .finish()
    }
}
