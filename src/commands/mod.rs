//! Command implementations for the tfgraph CLI

pub mod graph;

use miette::Result;

use crate::cli::Cli;

/// Execute the command described by the parsed arguments
pub fn execute_command(command: Cli) -> Result<()> {
    graph::execute_graph_command(command)
}
