//! Interactive prompts for CLI commands
//!
//! Uses dialoguer for terminal-based interactive selection.

use dialoguer::{MultiSelect, Select, theme::ColorfulTheme};

use crate::error::Result;
use crate::selection::Prompter;

/// Prompts on the terminal.
#[derive(Default)]
pub struct DialoguerPrompter {
    theme: ColorfulTheme,
}

impl Prompter for DialoguerPrompter {
    fn select(&mut self, layer: &str, options: &[String], default: usize) -> Result<usize> {
        let index = Select::with_theme(&self.theme)
            .with_prompt(format!("Select {}", layer))
            .items(options)
            .default(default)
            .interact()?;
        Ok(index)
    }

    fn multi_select(&mut self, prompt: &str, options: &[String]) -> Result<Vec<usize>> {
        let indices = MultiSelect::with_theme(&self.theme)
            .with_prompt(format!("{} (space to toggle, enter to confirm)", prompt))
            .items(options)
            .interact()?;
        Ok(indices)
    }
}
