//! Level-visit state CLI commands.

use clap::Subcommand;
use colored::Colorize;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::cli::output;
use crate::config::LevelsConfig;
use crate::constants::LEVEL_SIZE;
use crate::error::LevelsResult;
use crate::levels::Level;
use crate::state::{FileStore, LevelVisitState, LevelVisitStore};

/// Level-visit state subcommands.
#[derive(Subcommand, Debug)]
#[command(next_display_order = None)]
pub enum StateCommands {
    /// Show the workspace remembered for each level.
    #[command(after_long_help = r#"Examples:
  wslevels state show          # Table of remembered workspaces
  wslevels state show --json   # Raw state as JSON"#)]
    Show {
        /// Output in JSON format instead of table format.
        #[arg(long, short = 'j')]
        json: bool,
    },

    /// Print the path of the state file.
    Path,

    /// Forget every remembered workspace.
    ///
    /// Deletes the state file. The next level change starts fresh.
    Clear,
}

#[derive(Tabled)]
struct LevelRow {
    #[tabled(rename = "Level")]
    level: i32,
    #[tabled(rename = "Range")]
    range: String,
    #[tabled(rename = "Last visited")]
    workspace: i32,
}

/// Execute a state subcommand.
///
/// # Errors
///
/// Returns an error if the state file cannot be removed or rendered.
pub fn execute(cmd: &StateCommands, config: &LevelsConfig) -> LevelsResult<()> {
    let store = FileStore::new(config.state.resolved_path());

    match cmd {
        StateCommands::Show { json } => execute_show(&store, *json),

        StateCommands::Path => {
            println!("{}", store.path().display());
            Ok(())
        }

        StateCommands::Clear => {
            if store.clear()? {
                println!("Cleared level-visit state at {}", store.path().display());
            } else {
                println!("No level-visit state to clear.");
            }
            Ok(())
        }
    }
}

fn execute_show(store: &FileStore, json: bool) -> LevelsResult<()> {
    let state = store.load().unwrap_or_default();

    if json {
        output::print_highlighted_json(&serde_json::to_value(&state)?);
        return Ok(());
    }

    if state.is_empty() {
        println!("{}", "No levels remembered yet.".dimmed());
        return Ok(());
    }

    println!("{}", render_table(&state));
    Ok(())
}

/// Formats the numbers a level spans, e.g. `100-199`. Widened to `i64` so the
/// outermost levels of the `i32` range format without overflowing.
fn level_range(level: Level) -> String {
    let size = i64::from(LEVEL_SIZE);
    let first = i64::from(level) * size;
    format!("{first}-{}", first + size - 1)
}

fn render_table(state: &LevelVisitState) -> String {
    let rows: Vec<LevelRow> = state
        .entries()
        .map(|(level, workspace)| LevelRow {
            level,
            range: level_range(level),
            workspace,
        })
        .collect();

    Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::right()))
        .with(Modify::new(Columns::last()).with(Alignment::right()))
        .to_string()
}
