//! Configuration file handling for lintrun

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::commands::plan::Plan;
use crate::commands::step::{Step, resolve_path};

/// Errors that can occur while loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("No config file found: {0}")]
    ConfigNotFound(PathBuf),
    #[error("Unable to find directory: {path:?} (step: {step:?})")]
    DirectoryNotFound {
        step: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Unknown working directory: {0}")]
    UnknownWorkingDirectory(String),
    #[error("Unable to parse YAML config file {path}: {source}")]
    Yaml {
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("Unable to parse JSON config file {path}: {source}")]
    Json {
        source: serde_json::Error,
        path: PathBuf,
    },
    #[error("Duplicate ID in config: {0}")]
    DuplicateId(String),
    #[error("Invalid config: {0}")]
    Validation(String),
}

/// Configuration for a single step
#[derive(Debug, Deserialize, Serialize, Default)]
pub struct ConfigStep {
    pub id: Option<String>,
    pub name: Option<String>,
    pub program: String,
    pub args: Option<Vec<String>>,
    pub targets: Option<Vec<String>>,
    pub cwd: Option<PathBuf>,
    pub env: Option<HashMap<String, String>>,
}

impl ConfigStep {
    /// Convert into a [`Step`], filling defaults from the step's 1-based position and
    /// resolving `cwd` against the config directory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::DirectoryNotFound` if the resolved working directory does not exist.
    pub fn into_step(self, index: usize, base: &Path) -> Result<Step, ConfigError> {
        let id = self.id.unwrap_or_else(|| format!("step-{index}"));
        let cwd = match self.cwd {
            Some(cwd) => {
                let path = resolve_path(base, cwd);
                path.canonicalize()
                    .map_err(|source| ConfigError::DirectoryNotFound {
                        step: id.clone(),
                        path: path.clone(),
                        source,
                    })?
            }
            None => PathBuf::new(),
        };
        Ok(Step {
            name: self.name.unwrap_or_else(|| self.program.clone()),
            id,
            program: self.program,
            args: self.args.unwrap_or_default(),
            targets: self.targets.unwrap_or_default(),
            cwd,
            env: self.env.unwrap_or_default(),
        })
    }
}

/// Root configuration structure for lintrun
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    pub lintrun_version: String,
    pub steps: Vec<ConfigStep>,
}

/// List of supported configuration file names
const FILENAMES: [&str; 3] = [".lintrun.json", ".lintrun.yaml", ".lintrun.yml"];

impl Config {
    /// Loads and parses a configuration file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ConfigNotFound` if the file cannot be read, or
    /// `ConfigError::Yaml`/`ConfigError::Json` if parsing fails.
    pub fn from_file(file: &Path) -> Result<Config, ConfigError> {
        let contents = std::fs::read_to_string(file)
            .map_err(|_| ConfigError::ConfigNotFound(file.to_path_buf()))?;
        let config: Config = if file.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&contents).map_err(|e| ConfigError::Json {
                source: e,
                path: file.to_path_buf(),
            })?
        } else {
            serde_yaml::from_str(&contents).map_err(|e| ConfigError::Yaml {
                source: e,
                path: file.to_path_buf(),
            })?
        };
        Ok(config)
    }

    /// Build the plan described by this config. Relative step directories resolve against `base`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::DirectoryNotFound` if a step's working directory does not exist.
    pub fn into_plan(self, base: &Path) -> Result<Plan, ConfigError> {
        let steps = self
            .steps
            .into_iter()
            .enumerate()
            .map(|(i, step)| step.into_step(i + 1, base))
            .collect::<Result<Vec<Step>, ConfigError>>()?;
        Ok(Plan::new(steps))
    }

    /// Searches for a configuration file in the current directory and its parents.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownWorkingDirectory` if the cwd cannot be determined.
    pub fn find_config() -> Result<Option<PathBuf>, ConfigError> {
        let cwd = std::env::current_dir()
            .map_err(|e| ConfigError::UnknownWorkingDirectory(e.to_string()))?;
        Ok(Self::find_config_from(&cwd))
    }

    /// Searches for a configuration file in `start` and its parents.
    #[must_use]
    pub fn find_config_from(start: &Path) -> Option<PathBuf> {
        let mut path = start.to_path_buf();
        debug!("Searching for config file in {}", start.display());
        loop {
            for file in &FILENAMES {
                let config_path = path.join(file);
                if config_path.exists() {
                    info!("Found config file: {}", config_path.display());
                    return Some(config_path);
                }
            }
            if !path.pop() {
                return None;
            }
        }
    }
}
