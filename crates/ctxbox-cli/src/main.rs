//! ctxbox CLI
//!
//! Runs development containers described by layered `.ctxbox.yaml` files.

mod cli;
mod commands;
mod error;
mod interactive;
mod logging;
mod selection;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use commands::{Invocation, RemoveRequest, RunFlags};
use error::Result;
use interactive::DialoguerPrompter;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let settings = cli.settings();
    logging::init(&settings);

    let Some(command) = cli.command.clone() else {
        println!("{} Layered development containers", "ctxbox".green().bold());
        println!();
        println!("Run {} for available commands.", "ctxbox --help".cyan());
        return Ok(());
    };

    // Resolve symlinks so the cwd lines up with mount sources
    let cwd = ctxbox_fs::canonicalize(&std::env::current_dir()?)?;
    let invocation = Invocation::new(settings, cwd);
    execute_command(&invocation, command)
}

fn execute_command(invocation: &Invocation, cmd: Commands) -> Result<()> {
    let mut prompter = DialoguerPrompter::default();

    match cmd {
        Commands::Run {
            selection,
            rm,
            reset,
            pull,
        } => commands::run_run(
            invocation,
            &selection.names,
            RunFlags { rm, reset, pull },
            &mut prompter,
        ),
        Commands::Remove {
            selection,
            all,
            force,
        } => commands::run_remove(
            invocation,
            &RemoveRequest {
                names: selection.names,
                all,
                force,
            },
            &mut prompter,
        ),
        Commands::Tidy { force } => commands::run_tidy(invocation, force),
        Commands::Containers { all } => commands::run_containers(invocation, all),
        Commands::Contexts { json } => commands::run_contexts(invocation, json),
        Commands::Context { selection } => {
            commands::run_context(invocation, &selection.names, &mut prompter)
        }
        Commands::Pull { selection } => {
            commands::run_pull(invocation, &selection.names, &mut prompter)
        }
    }
}
