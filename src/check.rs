use std::io::{self, ErrorKind, Write};
use std::path::Path;
use std::process::{Command as ProcessCommand, ExitStatus};
use std::time::{Duration, Instant};

use log::{debug, error};
use thiserror::Error;

use crate::commands::plan::Plan;
use crate::commands::step::Step;
use crate::echo::format_echo_line;

/// Exit code used when a program cannot be found, matching POSIX shells.
pub const EXIT_NOT_FOUND: i32 = 127;
/// Exit code used when a program exists but cannot be executed.
pub const EXIT_NOT_EXECUTABLE: i32 = 126;

#[derive(Error, Debug)]
pub enum CheckError {
    #[error("failed to echo command line: {0}")]
    Echo(#[from] io::Error),
}

/// Terminal state of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Passed,
    Failed { step: String, exit_code: i32 },
}

/// Result of running a plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub exit_code: i32,
    /// Step IDs in the order they were executed.
    pub executed: Vec<String>,
    pub outcome: Outcome,
}

/// Map a finished child's status to the code a shell would report.
#[must_use]
pub fn exit_code_of(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    1
}

/// Map a spawn failure to the code a shell would report.
fn spawn_failure_code(err: &io::Error) -> i32 {
    match err.kind() {
        ErrorKind::PermissionDenied => EXIT_NOT_EXECUTABLE,
        _ => EXIT_NOT_FOUND,
    }
}

/// Execute a single step with inherited stdio and return its exit code.
pub(crate) fn execute_step(step: &Step, cwd: &Path) -> i32 {
    let status = ProcessCommand::new(&step.program)
        .args(step.argv())
        .current_dir(step.working_dir(cwd))
        .envs(&step.env)
        .status();

    match status {
        Ok(status) => exit_code_of(status),
        Err(e) => {
            error!("{}: {e}", step.program);
            spawn_failure_code(&e)
        }
    }
}

fn format_duration(d: Duration) -> String {
    let total_secs = d.as_secs();
    let tenths = d.subsec_millis() / 100;
    if total_secs < 60 {
        format!("{total_secs}.{tenths}s")
    } else {
        let mins = total_secs / 60;
        let secs = total_secs % 60;
        format!("{mins}m {secs}.{tenths}s")
    }
}

/// Run every step of `plan` in order, stopping at the first non-zero exit.
///
/// Each step's command line is written to `echo` and flushed before the step starts.
/// A failing step's exit code becomes the result's exit code; later steps are neither
/// echoed nor executed.
///
/// # Errors
///
/// Returns `CheckError::Echo` if writing the command line fails.
pub fn run<W: Write>(
    plan: &Plan,
    cwd: &Path,
    echo: &mut W,
    color: bool,
) -> Result<CheckResult, CheckError> {
    let total_start = Instant::now();
    let mut executed = Vec::with_capacity(plan.len());

    for (i, step) in plan.iter().enumerate() {
        writeln!(echo, "{}", format_echo_line(step, color))?;
        echo.flush()?;

        debug!("[{}/{}] running {}", i + 1, plan.len(), step.name);
        let start = Instant::now();
        let exit_code = execute_step(step, cwd);
        executed.push(step.id.clone());
        debug!(
            "[{}/{}] {} exited with {exit_code} after {}",
            i + 1,
            plan.len(),
            step.name,
            format_duration(start.elapsed())
        );

        if exit_code != 0 {
            return Ok(CheckResult {
                exit_code,
                executed,
                outcome: Outcome::Failed {
                    step: step.id.clone(),
                    exit_code,
                },
            });
        }
    }

    debug!(
        "{} steps passed in {}",
        executed.len(),
        format_duration(total_start.elapsed())
    );
    Ok(CheckResult {
        exit_code: 0,
        executed,
        outcome: Outcome::Passed,
    })
}

/// Clamp a step's exit code into the range a process can return.
///
/// Non-zero codes whose low byte is zero are reported as 1 so failure is never masked.
#[must_use]
pub fn process_exit_code(code: i32) -> u8 {
    if code == 0 {
        return 0;
    }
    match u8::try_from(code & 0xff) {
        Ok(0) | Err(_) => 1,
        Ok(byte) => byte,
    }
}
