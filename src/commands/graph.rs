//! Graph command implementation

use miette::{Result, WrapErr};

use crate::cli::Cli;
use crate::common::{ConfigBuilder, FromCommand};
use crate::config::GraphOptions;
use crate::error::TfGraphError;

impl FromCommand for GraphOptions {
    fn from_command(command: Cli) -> Result<Self, TfGraphError> {
        GraphOptions::builder()
            .with_path(command.path)
            .with_resource_type(command.resource_type)
            .with_resource_name(command.name)
            .with_output(command.output)
            .with_format(command.format)
            .with_max_depth(command.depth)
            .with_full_graph(command.full_graph)
            .with_verbose(command.verbose)
            .build()
    }
}

crate::impl_try_from_command!(GraphOptions);

/// Execute the graph command
pub fn execute_graph_command(command: Cli) -> Result<()> {
    let config =
        GraphOptions::from_command(command).wrap_err("Failed to parse graph command configuration")?;

    use crate::executors::CommandExecutor;
    use crate::executors::graph::GraphExecutor;
    GraphExecutor::execute(config)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::Parser;

    use super::*;

    #[test]
    fn test_try_from_cli() {
        let cli = Cli::try_parse_from([
            "tfgraph",
            "--path",
            "infra/main.tf",
            "--type",
            "module",
            "--name",
            "net",
            "--depth",
            "5",
            "--full-graph",
        ])
        .unwrap();

        let options = GraphOptions::try_from(cli).unwrap();
        assert_eq!(options.target_id(), "module.net");
        assert_eq!(options.max_depth, 5);
        assert_eq!(options.output, PathBuf::from("graph.dot"));
        assert!(options.full_graph);
    }
}
