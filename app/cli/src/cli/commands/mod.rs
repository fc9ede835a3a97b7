//! CLI command definitions using Clap.
//!
//! Navigation directives are top-level subcommands so keybindings stay short
//! (`wslevels down`, `wslevels insert container`). Supporting commands:
//!
//! - `state` - Inspect or reset level-visit memory
//! - `schema` - Print the configuration JSON Schema
//! - `completions` - Print shell completions

use std::io;
use std::path::PathBuf;

use clap::{ArgAction, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Generator, Shell, generate};

use crate::config::{self, ConfigError, LevelsConfig};
use crate::directive::Directive;
use crate::error::{LevelsError, LevelsResult};
use crate::navigation::Navigator;
use crate::schema;
use crate::state::FileStore;
use crate::wm::I3Msg;

pub mod state_cmd;

pub use state_cmd::StateCommands;

/// Application version from Cargo.toml.
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// wslevels - level-based workspace navigation for i3 and sway.
///
/// Workspaces are grouped into levels of 100 (1-99, 100-199, ...). Step
/// sideways within a level, open workspaces in between, or jump between
/// levels; each level remembers where you left it.
#[derive(Parser, Debug)]
#[command(name = "wslevels")]
#[command(author, version = APP_VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a custom configuration file.
    ///
    /// Overrides the default configuration file search paths.
    /// Supports JSONC format (JSON with comments).
    #[arg(long, short, global = true, value_name = "PATH")]
    pub config: Option<String>,

    /// Log more (`-v` for info, `-vv` for debug). `WSLEVELS_LOG` overrides this.
    #[arg(long, short, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Optional modifier accepted by every directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Modifier {
    /// Carry the focused container to the target workspace.
    Container,
}

/// Arguments shared by every navigation directive.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct DirectiveArgs {
    /// Pass `container` to move the focused container along.
    #[arg(value_enum)]
    pub modifier: Option<Modifier>,
}

impl DirectiveArgs {
    /// Returns `true` if the focused container should move too.
    #[must_use]
    pub fn moves_container(&self) -> bool { self.modifier == Some(Modifier::Container) }
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
#[command(next_display_order = None)]
pub enum Commands {
    /// Focus the next workspace on the current level.
    Right(DirectiveArgs),

    /// Focus the previous workspace on the current level.
    Left(DirectiveArgs),

    /// Open a workspace right after the focused one.
    ///
    /// Workspaces numbered consecutively after the focused one are renumbered
    /// up by one to make room.
    Insert(DirectiveArgs),

    /// Open a workspace after the last one on the current level.
    Endsert(DirectiveArgs),

    /// Open the first workspace of the next empty level.
    #[command(name = "newLevel")]
    NewLevel(DirectiveArgs),

    /// Go to the next populated level, restoring where you left it.
    Down(DirectiveArgs),

    /// Go to the previous populated level, restoring where you left it.
    Up(DirectiveArgs),

    /// Inspect or reset level-visit memory.
    #[command(subcommand)]
    State(StateCommands),

    /// Output the configuration JSON Schema.
    ///
    /// Can be redirected to a file for use with editors that support JSON
    /// Schema validation.
    Schema,

    /// Generate shell completions.
    ///
    /// Usage:
    ///   eval "$(wslevels completions --shell zsh)"
    ///   wslevels completions --shell fish > ~/.config/fish/completions/wslevels.fish
    Completions {
        /// The shell to generate completions for.
        #[arg(long, short, value_enum)]
        shell: Shell,
    },

    /// Anything else is reported as an unrecognized directive.
    #[command(external_subcommand)]
    Unrecognized(Vec<String>),
}

impl Commands {
    /// Returns the navigation directive and its arguments, if this is one.
    #[must_use]
    pub const fn directive(&self) -> Option<(Directive, &DirectiveArgs)> {
        match self {
            Self::Right(args) => Some((Directive::Right, args)),
            Self::Left(args) => Some((Directive::Left, args)),
            Self::Insert(args) => Some((Directive::Insert, args)),
            Self::Endsert(args) => Some((Directive::Endsert, args)),
            Self::NewLevel(args) => Some((Directive::NewLevel, args)),
            Self::Down(args) => Some((Directive::Down, args)),
            Self::Up(args) => Some((Directive::Up, args)),
            Self::State(_) | Self::Schema | Self::Completions { .. } | Self::Unrecognized(_) => {
                None
            }
        }
    }
}

impl Cli {
    /// Returns the custom config path if specified via --config flag.
    #[must_use]
    pub fn config_path(&self) -> Option<PathBuf> { self.config.as_ref().map(PathBuf::from) }

    /// Returns the parsed subcommand.
    #[must_use]
    pub const fn parsed_command(&self) -> &Commands { &self.command }

    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command execution fails.
    pub fn execute(&self) -> LevelsResult<()> {
        match &self.command {
            Commands::Schema => {
                println!("{}", schema::print_schema());
                Ok(())
            }

            Commands::Completions { shell } => {
                Self::print_completions(*shell);
                Ok(())
            }

            Commands::Unrecognized(args) => {
                let name = args.first().cloned().unwrap_or_default();
                Err(LevelsError::UnrecognizedDirective(name))
            }

            Commands::State(cmd) => state_cmd::execute(cmd, &self.load_config()?),

            command => match command.directive() {
                Some((directive, args)) => {
                    run_directive(directive, args.moves_container(), &self.load_config()?)
                }
                None => Ok(()),
            },
        }
    }

    fn load_config(&self) -> LevelsResult<LevelsConfig> {
        let custom = self.config_path();
        config::load(custom.as_deref()).map_err(|err| match (err, custom.as_deref()) {
            (ConfigError::NotFound, Some(path)) => {
                LevelsError::Config(format!("Configuration file not found: {}", path.display()))
            }
            (err, _) => err.into(),
        })
    }

    /// Print shell completions to stdout.
    fn print_completions<G: Generator>(generator: G) {
        let mut cmd = Self::command();
        generate(generator, &mut cmd, "wslevels", &mut io::stdout());
    }
}

/// Runs one directive against the configured window manager and state file.
fn run_directive(directive: Directive, move_container: bool, config: &LevelsConfig) -> LevelsResult<()> {
    let wm = I3Msg::from_config(&config.window_manager)?;
    let store = FileStore::new(config.state.resolved_path());
    Navigator::new(&wm, &store)
        .run(directive, move_container)
        .inspect_err(|err| {
            if err.is_window_manager_failure() {
                tracing::error!(
                    binary = %wm.binary().display(),
                    %directive,
                    "window manager request failed; is i3 or sway running?"
                );
            }
        })?;
    Ok(())
}
