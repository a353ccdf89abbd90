use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// A single validation command: an executable, its flags and the paths it checks
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Step {
    pub id: String,
    pub name: String,
    pub program: String,
    pub args: Vec<String>,
    pub targets: Vec<String>,
    pub cwd: PathBuf,
    pub env: HashMap<String, String>,
}

impl Step {
    /// Create a step with no extra environment and the plan's working directory.
    #[must_use]
    pub fn new(id: &str, name: &str, program: &str, args: &[&str], targets: &[&str]) -> Self {
        Step {
            id: id.to_string(),
            name: name.to_string(),
            program: program.to_string(),
            args: args.iter().map(ToString::to_string).collect(),
            targets: targets.iter().map(ToString::to_string).collect(),
            ..Default::default()
        }
    }

    /// Arguments passed to the program: flags first, then targets.
    #[must_use]
    pub fn argv(&self) -> Vec<&str> {
        self.args
            .iter()
            .chain(self.targets.iter())
            .map(String::as_str)
            .collect()
    }

    /// Directory the step runs in, falling back to `default` when unset.
    #[must_use]
    pub fn working_dir<'a>(&'a self, default: &'a Path) -> &'a Path {
        if self.cwd.as_os_str().is_empty() {
            default
        } else {
            &self.cwd
        }
    }
}

/// Resolve a possibly relative `child` path against `parent`. Empty paths resolve to `parent`.
#[must_use]
pub fn resolve_path(parent: &Path, child: PathBuf) -> PathBuf {
    if child.as_os_str().is_empty() {
        parent.to_path_buf()
    } else if child.is_relative() {
        parent.join(child)
    } else {
        child
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argv_puts_flags_before_targets() {
        let step = Step::new("fmt", "Format", "black", &["--check"], &["pkg", "tests"]);
        assert_eq!(step.argv(), vec!["--check", "pkg", "tests"]);
    }

    #[test]
    fn test_working_dir_fallback() {
        let default = Path::new("/project");
        let mut step = Step::new("a", "a", "true", &[], &[]);
        assert_eq!(step.working_dir(default), default);

        step.cwd = PathBuf::from("/elsewhere");
        assert_eq!(step.working_dir(default), Path::new("/elsewhere"));
    }

    #[test]
    fn test_resolve_path() {
        let parent = Path::new("/root");
        assert_eq!(resolve_path(parent, PathBuf::new()), PathBuf::from("/root"));
        assert_eq!(
            resolve_path(parent, PathBuf::from("sub")),
            PathBuf::from("/root/sub")
        );
        assert_eq!(
            resolve_path(parent, PathBuf::from("/abs")),
            PathBuf::from("/abs")
        );
    }
}
