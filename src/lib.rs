//! # tfgraph - Trace Terraform Declaration Dependencies
//!
//! tfgraph computes the transitive dependency graph of a single resource,
//! module call or data source in a Terraform configuration and renders it as
//! a Graphviz DOT diagram.
//!
//! ## Main Components
//!
//! - **Source**: loads and parses the `.tf` files of a directory
//! - **Analyzer**: locates declarations, extracts the references they make
//!   and resolves local module sources
//! - **Graph**: bounded depth-first traversal into a graph model, and the DOT
//!   renderer
//!
//! ## Usage
//!
//! ```no_run
//! use std::path::Path;
//!
//! use tfgraph::core::ReferenceCategory;
//! use tfgraph::graph::{DependencyGraphBuilder, GraphRenderer, RenderScope};
//! use tfgraph::source::{CachedSourceLoader, HclSourceLoader};
//! use miette::IntoDiagnostic;
//!
//! # fn main() -> miette::Result<()> {
//! // Trace aws_instance.web up to three references away
//! let loader = CachedSourceLoader::new(HclSourceLoader::new());
//! let builder = DependencyGraphBuilder::new(loader, None);
//! let graph = builder.build(Path::new("infra"), "aws_instance.web", 3);
//!
//! for node in graph.nodes() {
//!     let variables = node.references.get(ReferenceCategory::Variable);
//!     println!("{} (depth {}, {} variables)", node.id, node.depth, variables.len());
//! }
//!
//! // Module-internal declarations are namespaced by their module call
//! if let Some(subnet) = graph.get("module.net/aws_subnet.s") {
//!     println!("subnet declared in {}", subnet.path.display());
//! }
//!
//! let mut dot = Vec::new();
//! GraphRenderer::new(RenderScope::Root).render_dot(&graph, &mut dot)?;
//! std::fs::write("graph.dot", dot).into_diagnostic()?;
//! # Ok(())
//! # }
//! ```
//!
//! ### Example: Watching a Traversal
//!
//! ```no_run
//! use std::path::Path;
//!
//! use tfgraph::graph::DependencyGraphBuilder;
//! use tfgraph::progress::TraversalObserver;
//! use tfgraph::source::HclSourceLoader;
//!
//! struct PrintSteps;
//!
//! impl TraversalObserver for PrintSteps {
//!     fn visiting(&self, id: &str, depth: usize) {
//!         println!("{}{id}", "  ".repeat(depth));
//!     }
//! }
//!
//! let builder = DependencyGraphBuilder::new(HclSourceLoader::new(), Some(&PrintSteps));
//! let graph = builder.build(Path::new("infra"), "module.net", 2);
//! println!("{} nodes", graph.len());
//! ```

// Private modules
mod constants;
mod utils;

// Public modules
pub mod analyzer;
pub mod cli;
pub mod commands;
pub mod common;
pub mod config;
pub mod core;
pub mod error;
pub mod executors;
pub mod graph;
pub mod progress;
pub mod source;

// Main entry point for the library
pub fn run() -> miette::Result<()> {
    use clap::Parser;

    use crate::cli::Cli;
    use crate::commands::execute_command;
    use crate::error::TfGraphError;

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // --help and --version
        Err(error) if !error.use_stderr() => error.exit(),
        Err(error) => {
            return Err(TfGraphError::InvalidArguments {
                message: error.to_string(),
            }
            .into());
        }
    };

    execute_command(cli)
}
