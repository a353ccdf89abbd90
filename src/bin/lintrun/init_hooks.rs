use std::path::Path;
use std::process::ExitCode;

use clap::Args;

#[derive(Args, Debug)]
pub struct InitHooksArgs {
    /// Rewrite a hook previously installed by lintrun
    #[arg(long)]
    force: bool,
}

/// Install the git pre-commit hook, pinning `config` into it when given.
///
/// # Errors
///
/// Returns an error if hook installation fails.
pub fn run(
    args: &InitHooksArgs,
    cwd: &Path,
    config: Option<&Path>,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let hook_path = lintrun::init_hooks::install(cwd, config, args.force)?;
    println!("Installed pre-commit hook at {}", hook_path.display());
    Ok(ExitCode::SUCCESS)
}
