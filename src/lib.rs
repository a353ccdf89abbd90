//! Core implementation of lintrun
//!
//! lintrun runs an ordered sequence of static-analysis commands (type checker, formatter in
//! check mode, import-order checker) and stops at the first one that fails. Each command line
//! is echoed before it runs, and the failing command's exit code becomes lintrun's own.
//!
//! The sequence is built in, or replaced by a `.lintrun.yaml`/`.lintrun.json` file found in the
//! current directory or one of its parents.

use std::collections::HashSet;
use std::path::PathBuf;

use log::{debug, warn};

use crate::commands::plan::Plan;
use crate::config_file::{Config, ConfigError};

pub mod check;
pub mod commands;
pub mod config_file;
pub mod echo;
pub mod init_hooks;
pub mod logger;

/// Resolve the plan to run and the directory it runs in.
///
/// With an explicit `config_file` that file must exist. Otherwise a config file is searched for
/// from the current directory upwards, and the built-in plan is used when none is found.
///
/// # Errors
///
/// Returns `ConfigError` if the config file is not found, cannot be parsed,
/// contains invalid values, or references non-existent directories.
pub fn load_plan(config_file: Option<&str>) -> Result<(Plan, PathBuf), ConfigError> {
    let config_path = match config_file {
        Some(file) => {
            let config_path = PathBuf::from(file);
            if !config_path.exists() {
                return Err(ConfigError::ConfigNotFound(config_path));
            }
            Some(config_path)
        }
        None => Config::find_config()?,
    };

    let Some(config_path) = config_path else {
        let cwd = std::env::current_dir()
            .map_err(|e| ConfigError::UnknownWorkingDirectory(e.to_string()))?;
        debug!("No config file found, using built-in plan in {}", cwd.display());
        return Ok((Plan::builtin(), cwd));
    };

    let cwd = match config_path.parent() {
        Some(parent) if parent.as_os_str().is_empty() => std::env::current_dir()
            .map_err(|e| ConfigError::UnknownWorkingDirectory(e.to_string()))?,
        Some(parent) => parent.to_path_buf(),
        None => return Err(ConfigError::ConfigNotFound(config_path)),
    };
    debug!(
        "Loading plan from config file: {} (cwd: {})",
        config_path.display(),
        cwd.display()
    );
    let parsed = Config::from_file(&config_path)?;
    validate_version(&parsed.lintrun_version);
    let plan = parsed.into_plan(&cwd)?;
    validate_plan(&plan)?;
    Ok((plan, cwd))
}

/// Warn if the config's `lintrun_version` doesn't match the binary version
fn validate_version(config_version: &str) {
    let binary_version = env!("CARGO_PKG_VERSION");
    if config_version != binary_version {
        warn!(
            "Config lintrun_version '{config_version}' differs from binary version '{binary_version}'"
        );
    }
}

/// Validate the plan for duplicate IDs and blank values
fn validate_plan(plan: &Plan) -> Result<(), ConfigError> {
    if plan.is_empty() {
        return Err(ConfigError::Validation(
            "Config defines no steps".to_string(),
        ));
    }
    check_duplicates(plan)?;
    check_empty_values(plan)?;
    check_empty_targets(plan);
    Ok(())
}

fn check_duplicates(plan: &Plan) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for step in plan {
        if !seen.insert(step.id.as_str()) {
            return Err(ConfigError::DuplicateId(step.id.clone()));
        }
    }
    Ok(())
}

fn check_empty_values(plan: &Plan) -> Result<(), ConfigError> {
    for step in plan {
        if step.name.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "Step with id '{}' has an empty name",
                step.id
            )));
        }
        if step.program.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "Step '{}' has an empty program",
                step.name
            )));
        }
    }
    Ok(())
}

fn check_empty_targets(plan: &Plan) {
    for step in plan {
        if step.targets.is_empty() {
            warn!("Step '{}' has no targets", step.name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::step::Step;

    fn make_step(id: &str) -> Step {
        Step::new(id, id, "true", &[], &["."])
    }

    #[test]
    fn test_duplicate_id_detection() {
        let plan = Plan::new(vec![make_step("dup"), make_step("other"), make_step("dup")]);
        match validate_plan(&plan).unwrap_err() {
            ConfigError::DuplicateId(id) => assert_eq!(id, "dup"),
            other => panic!("Expected DuplicateId, got: {other:?}"),
        }
    }

    #[test]
    fn test_unique_ids_pass() {
        let plan = Plan::new(vec![make_step("a"), make_step("b")]);
        assert!(validate_plan(&plan).is_ok());
    }

    #[test]
    fn test_builtin_plan_is_valid() {
        assert!(validate_plan(&Plan::builtin()).is_ok());
    }

    #[test]
    fn test_empty_plan_rejected() {
        match validate_plan(&Plan::default()).unwrap_err() {
            ConfigError::Validation(msg) => assert!(msg.contains("no steps"), "got: {msg}"),
            other => panic!("Expected Validation error, got: {other:?}"),
        }
    }

    #[test]
    fn test_blank_program_rejected() {
        let mut step = make_step("a");
        step.program = "  ".to_string();
        match validate_plan(&Plan::new(vec![step])).unwrap_err() {
            ConfigError::Validation(msg) => assert!(msg.contains("empty program"), "got: {msg}"),
            other => panic!("Expected Validation error, got: {other:?}"),
        }
    }
}
