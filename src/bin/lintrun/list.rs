use std::io::{IsTerminal, Write};
use std::process::ExitCode;

use lintrun::commands::plan::Plan;
use lintrun::echo::format_echo_line;

/// Print every step's command line in execution order.
///
/// # Errors
///
/// Returns an error if writing to stdout fails.
pub fn run(plan: &Plan) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let stdout = std::io::stdout();
    let color = stdout.is_terminal();
    let mut out = stdout.lock();
    for step in plan {
        writeln!(out, "{}", format_echo_line(step, color))?;
    }
    Ok(ExitCode::SUCCESS)
}
