//! # Graph Construction and Rendering Module
//!
//! This module builds the dependency graph of one declaration and renders it
//! as a Graphviz diagram.
//!
//! ## Components
//!
//! ### Graph Building
//! - **DependencyGraphBuilder**: bounded depth-first expansion of references,
//!   following module calls into their source directories
//! - **Graph**: nodes keyed by qualified identifier
//! - **Node**: a declaration with its depth of first discovery
//!
//! ### Graph Rendering
//! - **GraphRenderer**: renders the root declaration and its direct
//!   references, or the whole graph with [`RenderScope::Full`]
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use tfgraph::graph::{DependencyGraphBuilder, GraphRenderer, RenderScope};
//! use tfgraph::source::{CachedSourceLoader, HclSourceLoader};
//!
//! # fn main() -> miette::Result<()> {
//! let loader = CachedSourceLoader::new(HclSourceLoader::new());
//! let builder = DependencyGraphBuilder::new(loader, None);
//! let graph = builder.build(Path::new("infra"), "aws_instance.web", 3);
//!
//! let mut output = Vec::new();
//! GraphRenderer::new(RenderScope::Root).render_dot(&graph, &mut output)?;
//! # Ok(())
//! # }
//! ```
//!
//! Module-internal declarations are namespaced by the qualified identifier
//! of the module call they were reached through, e.g.
//! `module.net/aws_subnet.s`.

mod builder;
mod renderer;
mod types;

pub use builder::{DependencyGraphBuilder, VisitedSet};
pub use renderer::{GraphRenderer, RenderScope};
pub use types::{Graph, Node};
