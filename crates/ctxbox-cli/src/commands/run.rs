//! The `run` command

use colored::Colorize;
use ctxbox_core::lifecycle::{self, Prepared};
use ctxbox_core::{RunOptions, Transition};

use super::Invocation;
use crate::error::Result;
use crate::selection::{Prompter, select_context};

/// Flags of `ctxbox run`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunFlags {
    pub rm: bool,
    pub reset: bool,
    pub pull: bool,
}

/// Select a context and run its container.
pub fn run_run(
    invocation: &Invocation,
    names: &[String],
    flags: RunFlags,
    prompter: &mut dyn Prompter,
) -> Result<()> {
    let contexts = invocation.load()?;
    let store = invocation.last_selection()?;

    let mut context = select_context(&contexts, names, &store, prompter)?;
    if flags.rm {
        context.remove = Some(true);
    }

    let prepared = lifecycle::prepare(&contexts.location, context)?;
    let options = RunOptions::new(invocation.cwd.clone())
        .with_reset(flags.reset)
        .with_pull(flags.pull);

    let orchestrator = invocation.orchestrator();
    let state = if flags.reset {
        None
    } else {
        Some(orchestrator.state(&prepared.container)?)
    };
    print_banner(&prepared, state.map(lifecycle::plan).unwrap_or(Transition::CreateAndRun));

    orchestrator.run(&prepared, &options)?;
    Ok(())
}

fn print_banner(prepared: &Prepared, transition: Transition) {
    let name = if prepared.context.name.is_empty() {
        "(base)"
    } else {
        prepared.context.name.as_str()
    };
    let action = match transition {
        Transition::CreateAndRun => "Starting",
        Transition::RestartAttached => "Restarting",
        Transition::ExecSession => "Attaching to",
    };
    eprintln!(
        "{} {} {} {}",
        "=>".blue().bold(),
        action,
        name.cyan(),
        format!("({})", prepared.container).dimmed()
    );
}
