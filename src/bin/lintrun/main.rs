mod check;
mod init_hooks;
mod list;

use std::path::Path;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::debug;

use lintrun::load_plan;

#[derive(Parser, Debug)]
#[command(
    name = "lintrun",
    version,
    about = "Run the lint sequence, stopping at the first failure"
)]
struct Cli {
    /// Path to config file (auto-detected if not specified, built-in plan if none found)
    #[arg(short, long)]
    config: Option<String>,

    /// Log file path (enables file logging in addition to stderr)
    #[arg(long)]
    log_file: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,

    /// Arguments that are not a subcommand are accepted and ignored
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
    extra: Vec<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the command lines of the plan without running them
    List,
    /// Install a git pre-commit hook that runs `lintrun`
    InitHooks(init_hooks::InitHooksArgs),
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let log_file = cli
        .log_file
        .as_ref()
        .map(std::fs::File::create)
        .transpose()?;
    lintrun::logger::init(log_file)?;

    if !cli.extra.is_empty() {
        debug!("Ignoring extra arguments: {:?}", cli.extra);
    }

    match cli.command {
        None => {
            let (plan, cwd) = load_plan(cli.config.as_deref())?;
            check::run(&plan, &cwd)
        }
        Some(Commands::List) => {
            let (plan, _) = load_plan(cli.config.as_deref())?;
            list::run(&plan)
        }
        Some(Commands::InitHooks(ref args)) => {
            let cwd = std::env::current_dir()?;
            init_hooks::run(args, &cwd, cli.config.as_deref().map(Path::new))
        }
    }
}
