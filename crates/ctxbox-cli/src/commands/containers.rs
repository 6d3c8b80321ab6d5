//! The `containers` command

use colored::Colorize;
use ctxbox_core::identity::NAME_PREFIX;
use ctxbox_docker::ContainerRuntime;

use super::Invocation;
use crate::error::Result;

/// List ctxbox containers of every configuration.
pub fn run_containers(invocation: &Invocation, all: bool) -> Result<()> {
    let names = invocation
        .settings
        .docker()
        .list(&format!("{}-", NAME_PREFIX), all)?;

    if names.is_empty() {
        let scope = if all { "" } else { "running " };
        println!("{}", format!("No {}ctxbox containers found.", scope).green());
        return Ok(());
    }

    for name in names {
        println!("{}", name);
    }
    Ok(())
}
