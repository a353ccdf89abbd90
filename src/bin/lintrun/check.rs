use std::io::IsTerminal;
use std::path::Path;
use std::process::ExitCode;

use lintrun::check::process_exit_code;
use lintrun::commands::plan::Plan;

/// Run the plan, echoing each command line to stdout.
///
/// # Errors
///
/// Returns an error if the command line cannot be written to stdout.
pub fn run(plan: &Plan, cwd: &Path) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let stdout = std::io::stdout();
    let color = stdout.is_terminal();
    let result = lintrun::check::run(plan, cwd, &mut stdout.lock(), color)?;
    Ok(ExitCode::from(process_exit_code(result.exit_code)))
}
