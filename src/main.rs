// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mindline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mindline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Mindline CLI entrypoint.
//!
//! Every invocation loads the state file, applies at most one command, and waits for the
//! resulting snapshot to be written before exiting.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use mindline::model::{DateKey, NodeId, Position};
use mindline::store::{state_schema, StateFile, StoreError, WriteDurability};
use mindline::ui::UiEvent;
use mindline::workspace::Workspace;

const DEFAULT_LOG_FILTER: &str = "warn";

/// Dated mind-map boards along a timeline.
#[derive(Parser, Debug)]
#[command(name = "mindline", version, about)]
struct Cli {
    /// State file (default: <data dir>/mindline/state.json)
    #[arg(long, env = "MINDLINE_STATE", global = true)]
    state: Option<PathBuf>,

    /// Sync every save to stable storage where the platform allows
    #[arg(long, env = "MINDLINE_DURABLE_WRITES", global = true)]
    durable_writes: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the active board as an outline
    Show,
    /// List timeline dates, marking the active one
    Dates,
    /// Make a date active, creating its board if needed
    Switch { date: DateKey },
    /// Add a date (default: the day after the latest) and make it active
    AddDate { date: Option<DateKey> },
    /// Add a node under --parent (default: the selected node)
    Add {
        label: String,
        #[arg(long)]
        parent: Option<NodeId>,
        #[arg(
            long,
            num_args = 2,
            value_names = ["X", "Y"],
            allow_negative_numbers = true,
            value_parser = finite_coordinate
        )]
        at: Option<Vec<f64>>,
    },
    /// Add a placeholder child under a node
    Child { parent: NodeId },
    /// Select a node, or clear the selection when no id is given
    Select { node: Option<NodeId> },
    Rename { node: NodeId, label: String },
    /// Set a node's group tag (empty string ungroups)
    Group { node: NodeId, group: String },
    Complete { node: NodeId },
    Reopen { node: NodeId },
    /// Remove a node and everything below it
    Remove { node: NodeId },
    /// Move a node and everything below it to another date
    Move { node: NodeId, date: DateKey },
    /// Replace the active board with a fresh one
    Reset,
    /// Print the JSON Schema of the state file
    Schema,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Rejected(&'static str),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("mindline: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    if let Command::Schema = cli.command {
        println!("{}", serde_json::to_string_pretty(&state_schema())?);
        return Ok(());
    }

    let durability = if cli.durable_writes {
        WriteDurability::Durable
    } else {
        WriteDurability::BestEffort
    };
    let path = cli.state.unwrap_or_else(default_state_path);
    let file = StateFile::new(path).with_durability(durability);

    let mut workspace = Workspace::open(file)?;
    let result = execute(&mut workspace, cli.command);
    workspace.flush();
    result
}

fn execute(workspace: &mut Workspace, command: Command) -> Result<(), CliError> {
    match command {
        Command::Show => print!("{}", workspace.view().outline()),
        Command::Dates => {
            let state = workspace.state();
            for date in state.timeline() {
                let marker = if date == state.active_date() { '*' } else { ' ' };
                println!("{marker} {date}");
            }
        }
        Command::Switch { date } => {
            workspace.dispatch(UiEvent::SetActiveDate { date });
            println!("{}", workspace.state().active_date());
        }
        Command::AddDate { date } => {
            workspace.dispatch(UiEvent::AddTimelineDate { date });
            println!("{}", workspace.state().active_date());
        }
        Command::Add { label, parent, at } => {
            let position = at.and_then(|coords| match coords.as_slice() {
                [x, y] => Some(Position::new(*x, *y)),
                _ => None,
            });
            let event = UiEvent::AddNode { label, parent_id: parent, position };
            accept(workspace.dispatch(event), "node could not be added")?;
            print_selected(workspace);
        }
        Command::Child { parent } => {
            let event = UiEvent::AddChildNode { parent_id: parent };
            accept(workspace.dispatch(event), "no such parent node on the active board")?;
            print_selected(workspace);
        }
        Command::Select { node } => {
            let event = UiEvent::SelectionChanged { node_ids: node.into_iter().collect() };
            accept(workspace.dispatch(event), "no such node on the active board")?;
        }
        Command::Rename { node, label } => {
            let event = UiEvent::RenameNode { node_id: node, label };
            accept(workspace.dispatch(event), "no such node on the active board")?;
        }
        Command::Group { node, group } => {
            let event = UiEvent::SetNodeGroup { node_id: node, group };
            accept(workspace.dispatch(event), "no such node on the active board")?;
        }
        Command::Complete { node } => {
            let event = UiEvent::SetNodeCompleted { node_id: node, completed: true };
            accept(workspace.dispatch(event), "no such node on the active board")?;
        }
        Command::Reopen { node } => {
            let event = UiEvent::SetNodeCompleted { node_id: node, completed: false };
            accept(workspace.dispatch(event), "no such node on the active board")?;
        }
        Command::Remove { node } => {
            let event = UiEvent::RemoveNode { node_id: node };
            accept(workspace.dispatch(event), "the root node and unknown nodes cannot be removed")?;
        }
        Command::Move { node, date } => {
            let event = UiEvent::MoveNodeToDate { node_id: node, date };
            accept(
                workspace.dispatch(event),
                "move rejected (root, unknown node, same date, or id already on the target)",
            )?;
        }
        Command::Reset => {
            workspace.dispatch(UiEvent::Reset);
        }
        Command::Schema => {}
    }
    Ok(())
}

fn accept(accepted: bool, reason: &'static str) -> Result<(), CliError> {
    if accepted {
        Ok(())
    } else {
        Err(CliError::Rejected(reason))
    }
}

fn print_selected(workspace: &Workspace) {
    if let Some(node_id) = workspace.view().selected_node_id {
        println!("{node_id}");
    }
}

fn finite_coordinate(raw: &str) -> Result<f64, String> {
    let value = raw.trim().parse::<f64>().map_err(|err| err.to_string())?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(format!("coordinate must be a finite number, got {raw:?}"))
    }
}

fn default_state_path() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("mindline").join("state.json"))
        .unwrap_or_else(|| PathBuf::from("mindline-state.json"))
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};
    use rstest::rstest;

    use super::{Cli, Command};

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn add_accepts_parent_and_negative_coordinates() {
        let cli = Cli::try_parse_from([
            "mindline", "--state", "s.json", "add", "Plan", "--parent", "root", "--at", "-10",
            "2.5",
        ])
        .expect("parse");

        let Command::Add { label, parent, at } = cli.command else {
            panic!("expected add");
        };
        assert_eq!(label, "Plan");
        assert_eq!(parent.as_ref().map(|id| id.as_str()), Some("root"));
        assert_eq!(at, Some(vec![-10.0, 2.5]));
    }

    #[rstest]
    #[case::nan("NaN")]
    #[case::infinite("inf")]
    #[case::negative_infinite("-inf")]
    fn non_finite_coordinates_are_usage_errors(#[case] x: &str) {
        let parsed = Cli::try_parse_from(["mindline", "add", "Weird", "--at", x, "0"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn malformed_dates_are_usage_errors() {
        assert!(Cli::try_parse_from(["mindline", "switch", "2024-1-1"]).is_err());
        assert!(Cli::try_parse_from(["mindline", "move", "a", "tomorrow"]).is_err());
    }

    #[test]
    fn select_without_id_clears() {
        let cli = Cli::try_parse_from(["mindline", "select"]).expect("parse");
        assert!(matches!(cli.command, Command::Select { node: None }));
    }
}
