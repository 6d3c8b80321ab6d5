//! CLI argument parsing using clap derive

use clap::{Args, Parser, Subcommand};
use ctxbox_core::Settings;
use ctxbox_core::settings::DEFAULT_RUNTIME;

/// ctxbox - Run development containers from layered context files
#[derive(Parser, Debug)]
#[command(name = "ctxbox")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print runtime commands instead of executing them
    #[arg(short = 'n', long, global = true)]
    pub dry_run: bool,

    /// Configuration document to use instead of discovering .ctxbox.yaml (path or URL)
    #[arg(short, long, global = true, env = "CTXBOX_CONFIG")]
    pub config: Option<String>,

    /// Docker-compatible runtime binary
    #[arg(long, global = true, env = "CTXBOX_RUNTIME", default_value = DEFAULT_RUNTIME)]
    pub runtime: String,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Settings shared by every command of this invocation
    pub fn settings(&self) -> Settings {
        Settings {
            verbose: self.verbose,
            dry_run: self.dry_run,
            config: self.config.clone(),
            runtime: self.runtime.clone(),
        }
    }
}

/// Context names, one per layer
#[derive(Args, Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    /// Context name for each layer; `-` reuses the last selection. Missing
    /// names are prompted for.
    pub names: Vec<String>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Run the container for a context
    ///
    /// Creates the container when it does not exist, restarts it when it
    /// has exited, and opens a new session when it is already running.
    ///
    /// Examples:
    ///   ctxbox run                 # Prompt for each layer
    ///   ctxbox run dev go          # Select dev, then go
    ///   ctxbox run -               # Reuse the last selection
    ///   ctxbox run dev go --reset  # Start over with a fresh container
    Run {
        #[command(flatten)]
        selection: Selection,

        /// Remove the container when it exits
        #[arg(long)]
        rm: bool,

        /// Remove any existing container before starting a fresh one
        #[arg(long)]
        reset: bool,

        /// Pull the image even when its tag is pinned
        #[arg(long)]
        pull: bool,
    },

    /// Remove containers of this configuration
    ///
    /// Names select containers whose context starts with them; separate
    /// alternatives with commas (`dev,prod go`). Without names, existing
    /// containers are offered for selection.
    #[command(alias = "rm")]
    Remove {
        #[command(flatten)]
        selection: Selection,

        /// Remove every container of this configuration
        #[arg(short, long)]
        all: bool,

        /// Remove running containers too
        #[arg(short, long)]
        force: bool,
    },

    /// Remove containers no current context maps to
    Tidy {
        /// Remove running containers too
        #[arg(short, long)]
        force: bool,
    },

    /// List ctxbox containers
    Containers {
        /// Include stopped containers
        #[arg(short, long)]
        all: bool,
    },

    /// List every combination of context names
    Contexts {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Show a resolved context and its container name
    Context {
        #[command(flatten)]
        selection: Selection,
    },

    /// Pull (or build) the image of a context
    Pull {
        #[command(flatten)]
        selection: Selection,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_no_args() {
        let cli = Cli::parse_from(["ctxbox"]);
        assert!(!cli.verbose);
        assert!(!cli.dry_run);
        assert!(cli.command.is_none());
    }

    #[test]
    fn parse_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["ctxbox", "contexts", "--dry-run", "-v", "--runtime", "podman"]);
        let settings = cli.settings();
        assert!(settings.verbose);
        assert!(settings.dry_run);
        assert_eq!(settings.runtime, "podman");
    }

    #[test]
    fn parse_run_with_names_and_flags() {
        let cli = Cli::parse_from(["ctxbox", "run", "dev", "go", "--rm", "--pull"]);
        match cli.command {
            Some(Commands::Run {
                selection,
                rm,
                reset,
                pull,
            }) => {
                assert_eq!(selection.names, vec!["dev", "go"]);
                assert!(rm);
                assert!(!reset);
                assert!(pull);
            }
            other => panic!("Expected Run command, got {:?}", other),
        }
    }

    #[test]
    fn parse_run_reuse_last() {
        let cli = Cli::parse_from(["ctxbox", "run", "-"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Run { selection, .. }) if selection.names == vec!["-"]
        ));
    }

    #[test]
    fn parse_remove_alias() {
        let cli = Cli::parse_from(["ctxbox", "rm", "-f", "dev"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Remove { selection, all: false, force: true }) if selection.names == vec!["dev"]
        ));
    }

    #[test]
    fn parse_explicit_config() {
        let cli = Cli::parse_from(["ctxbox", "--config", "https://h.io/c.yaml", "contexts"]);
        assert_eq!(cli.settings().config.as_deref(), Some("https://h.io/c.yaml"));
    }

    #[test]
    fn parse_contexts_json() {
        let cli = Cli::parse_from(["ctxbox", "contexts", "--json"]);
        assert_eq!(cli.command, Some(Commands::Contexts { json: true }));
    }
}
