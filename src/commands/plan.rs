use crate::commands::step::Step;

/// Package checked by the built-in plan
pub const SOURCE_PACKAGE: &str = "pydantic_sqlalchemy";
/// Test directory checked by the built-in plan
pub const TEST_DIR: &str = "tests";

/// Ordered list of steps, executed front to back
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
    pub steps: Vec<Step>,
}

impl Plan {
    #[must_use]
    pub fn new(steps: Vec<Step>) -> Self {
        Plan { steps }
    }

    /// The fixed lint sequence used when no config file is present:
    /// type check, formatter in check mode, then import ordering.
    #[must_use]
    pub fn builtin() -> Self {
        Plan::new(vec![
            Step::new("types", "Type check", "mypy", &[], &[SOURCE_PACKAGE]),
            Step::new(
                "format",
                "Format check",
                "black",
                &["--check"],
                &[SOURCE_PACKAGE, TEST_DIR],
            ),
            Step::new(
                "imports",
                "Import order",
                "isort",
                &[
                    "--multi-line=3",
                    "--trailing-comma",
                    "--force-grid-wrap=0",
                    "--combine-as",
                    "--line-width",
                    "88",
                    "--recursive",
                    "--check-only",
                    "--thirdparty",
                    SOURCE_PACKAGE,
                ],
                &[SOURCE_PACKAGE, TEST_DIR],
            ),
        ])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Step> {
        self.steps.iter()
    }
}

impl<'a> IntoIterator for &'a Plan {
    type Item = &'a Step;
    type IntoIter = std::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_order() {
        let plan = Plan::builtin();
        let ids: Vec<&str> = plan.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["types", "format", "imports"]);
    }

    #[test]
    fn test_builtin_import_step_is_check_only() {
        let plan = Plan::builtin();
        let imports = &plan.steps[2];
        assert_eq!(imports.program, "isort");
        assert!(imports.args.iter().any(|a| a == "--check-only"));
        assert_eq!(imports.targets, vec![SOURCE_PACKAGE, TEST_DIR]);
    }

    #[test]
    fn test_builtin_format_step_does_not_rewrite() {
        let plan = Plan::builtin();
        assert_eq!(plan.steps[1].program, "black");
        assert_eq!(plan.steps[1].args, vec!["--check"]);
    }
}
