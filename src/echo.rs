use anstyle::{Reset, Style};

use crate::commands::step::Step;

const MARKER_STYLE: Style = Style::new().dimmed();
const PROGRAM_STYLE: Style = Style::new().bold();

/// Quote a word the way a POSIX shell trace would, so the echoed line can be pasted back.
#[must_use]
pub fn quote(word: &str) -> String {
    let safe = !word.is_empty()
        && word
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./=:,+@%^".contains(c));
    if safe {
        word.to_string()
    } else {
        format!("'{}'", word.replace('\'', r"'\''"))
    }
}

/// Render the command line of a step, without the trace marker.
#[must_use]
pub fn command_line(step: &Step) -> String {
    std::iter::once(step.program.as_str())
        .chain(step.argv())
        .map(quote)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render the line printed before a step runs. ANSI styling is only applied when `color` is set.
#[must_use]
pub fn format_echo_line(step: &Step, color: bool) -> String {
    if !color {
        return format!("+ {}", command_line(step));
    }
    let mut line = format!(
        "{MARKER_STYLE}+{Reset} {PROGRAM_STYLE}{}{Reset}",
        quote(&step.program)
    );
    for arg in step.argv() {
        line.push(' ');
        line.push_str(&quote(arg));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::plan::Plan;

    #[test]
    fn test_quote_plain_words() {
        assert_eq!(quote("--line-width"), "--line-width");
        assert_eq!(quote("--multi-line=3"), "--multi-line=3");
        assert_eq!(quote("src/pkg"), "src/pkg");
    }

    #[test]
    fn test_quote_special_words() {
        assert_eq!(quote(""), "''");
        assert_eq!(quote("two words"), "'two words'");
        assert_eq!(quote("it's"), r"'it'\''s'");
        assert_eq!(quote("$HOME"), "'$HOME'");
    }

    #[test]
    fn test_builtin_echo_lines() {
        let lines: Vec<String> = Plan::builtin()
            .iter()
            .map(|s| format_echo_line(s, false))
            .collect();
        insta::assert_snapshot!(lines.join("\n"), @r"
        + mypy pydantic_sqlalchemy
        + black --check pydantic_sqlalchemy tests
        + isort --multi-line=3 --trailing-comma --force-grid-wrap=0 --combine-as --line-width 88 --recursive --check-only --thirdparty pydantic_sqlalchemy pydantic_sqlalchemy tests
        ");
    }

    #[test]
    fn test_colored_echo_keeps_words() {
        let step = Step::new("t", "t", "mypy", &[], &["pkg"]);
        let line = format_echo_line(&step, true);
        assert!(line.contains("mypy"));
        assert!(line.ends_with(" pkg"));
        assert!(line.contains('\x1b'));
    }
}
