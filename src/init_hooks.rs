//! Git pre-commit hook that runs the lint sequence before each commit

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{debug, info};
use thiserror::Error;

use crate::echo::quote;

/// Line identifying hooks written by lintrun. Only hooks carrying it are ever rewritten.
pub const HOOK_MARKER: &str = "# lintrun pre-commit hook";

#[derive(Error, Debug)]
pub enum InitHooksError {
    #[error("not inside a git repository: {0}")]
    NoRepo(#[from] git2::Error),

    #[error("lintrun hook already installed at {0} (use --force to rewrite it)")]
    AlreadyInstalled(PathBuf),

    #[error("{0} was not written by lintrun; remove it before installing")]
    ForeignHook(PathBuf),

    #[error("config file {path:?} not found: {source}")]
    ConfigNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write hook: {0}")]
    Io(#[from] std::io::Error),
}

/// Render the hook script. A config path is pinned into the hook so commits lint with the
/// same plan that was active at install time.
#[must_use]
pub fn render_hook(config: Option<&Path>) -> String {
    let mut command = String::from("exec lintrun");
    if let Some(path) = config {
        command.push_str(" --config ");
        command.push_str(&quote(&path.to_string_lossy()));
    }
    format!("#!/bin/sh\n{HOOK_MARKER}\n{command}\n")
}

#[must_use]
pub fn is_lintrun_hook(contents: &str) -> bool {
    contents.lines().any(|line| line.trim_end() == HOOK_MARKER)
}

/// Install the pre-commit hook for the repository containing `cwd`.
///
/// An existing lintrun hook is only rewritten with `force`; a hook from anywhere else is
/// never touched. Returns the path of the written hook.
///
/// # Errors
///
/// Returns `InitHooksError::ConfigNotFound` if `config` does not exist,
/// `InitHooksError::NoRepo` if no git repository is found,
/// `InitHooksError::AlreadyInstalled` or `InitHooksError::ForeignHook` if a hook is in the way,
/// or `InitHooksError::Io` on read or write failure.
pub fn install(cwd: &Path, config: Option<&Path>, force: bool) -> Result<PathBuf, InitHooksError> {
    let config = config
        .map(|path| {
            path.canonicalize()
                .map_err(|source| InitHooksError::ConfigNotFound {
                    path: path.to_path_buf(),
                    source,
                })
        })
        .transpose()?;

    let repo = git2::Repository::discover(cwd)?;
    let hooks_dir = repo.path().join("hooks");
    let hook_path = hooks_dir.join("pre-commit");

    match std::fs::read_to_string(&hook_path) {
        Ok(existing) if !is_lintrun_hook(&existing) => {
            return Err(InitHooksError::ForeignHook(hook_path));
        }
        Ok(_) if !force => return Err(InitHooksError::AlreadyInstalled(hook_path)),
        Ok(_) => debug!("Rewriting lintrun hook at {}", hook_path.display()),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }

    std::fs::create_dir_all(&hooks_dir)?;
    std::fs::write(&hook_path, render_hook(config.as_deref()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&hook_path, std::fs::Permissions::from_mode(0o755))?;
    }

    info!("Installed pre-commit hook at {}", hook_path.display());
    Ok(hook_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_hook_without_config() {
        insta::assert_snapshot!(render_hook(None), @r"
        #!/bin/sh
        # lintrun pre-commit hook
        exec lintrun
        ");
    }

    #[test]
    fn test_render_hook_quotes_config_path() {
        let hook = render_hook(Some(Path::new("/work/my project/.lintrun.yaml")));
        assert!(hook.ends_with("exec lintrun --config '/work/my project/.lintrun.yaml'\n"));
    }

    #[test]
    fn test_marker_detection() {
        assert!(is_lintrun_hook(&render_hook(None)));
        assert!(!is_lintrun_hook("#!/bin/sh\npre-commit run\n"));
    }
}
