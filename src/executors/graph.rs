//! Graph command executor

use console::style;
use miette::{Result, WrapErr};

use crate::cli::GraphFormat;
use crate::config::GraphOptions;
use crate::error::TfGraphError;
use crate::executors::CommandExecutor;
use crate::graph::{DependencyGraphBuilder, GraphRenderer, RenderScope};
use crate::progress::ProgressReporter;
use crate::source::{CachedSourceLoader, HclSourceLoader};

pub struct GraphExecutor;

impl CommandExecutor for GraphExecutor {
    type Config = GraphOptions;

    fn execute(config: Self::Config) -> Result<()> {
        if !config.path.exists() {
            return Err(TfGraphError::InputNotFound {
                path: config.path.clone(),
            }
            .into());
        }

        let base_dir = config.base_dir();
        let target = config.target_id();

        let reporter = ProgressReporter::new(config.verbose);
        reporter.start_traversal(&target, &base_dir);

        let loader = CachedSourceLoader::new(HclSourceLoader::new());
        let builder = DependencyGraphBuilder::new(loader, Some(&reporter));
        let graph = builder.build(&base_dir, &target, config.max_depth);

        reporter.finish_traversal(graph.len());

        let scope = if config.full_graph {
            RenderScope::Full
        } else {
            RenderScope::Root
        };
        let renderer = GraphRenderer::new(scope);

        let mut rendered = Vec::new();
        match config.format {
            GraphFormat::Dot => renderer
                .render_dot(&graph, &mut rendered)
                .wrap_err("Failed to render DOT graph")?,
        }

        std::fs::write(&config.output, rendered).map_err(|source| {
            TfGraphError::OutputWriteError {
                path: config.output.clone(),
                source,
            }
        })?;

        eprintln!(
            "{} Graph written to {}",
            style("✓").green(),
            style(config.output.display()).bold()
        );

        Ok(())
    }
}
