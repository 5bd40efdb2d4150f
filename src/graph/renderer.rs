use std::collections::HashMap;
use std::io::Write;
use std::path::Path;

use miette::Result;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

use super::types::{Graph, Node};
use crate::core::ReferenceCategory;
use crate::error::TfGraphError;

// Fill colors per reference category
mod colors {
    pub const VARIABLE: &str = "#FFB6C1"; // Light pink
    pub const MODULE: &str = "#98FB98"; // Pale green
    pub const DATA: &str = "#87CEEB"; // Sky blue
    pub const RESOURCE: &str = "#DDA0DD"; // Plum
    pub const OUTPUT: &str = "#FFA07A"; // Light salmon
    pub const ROOT_STROKE: &str = "red";
}

// Helper macro for write operations that converts IO errors
macro_rules! writeln_out {
    ($dst:expr) => {
        writeln!($dst).map_err(TfGraphError::from)
    };
    ($dst:expr, $($arg:tt)*) => {
        writeln!($dst, $($arg)*).map_err(TfGraphError::from)
    };
}

/// Which part of the graph a renderer draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderScope {
    /// The traversal target and its direct references
    #[default]
    Root,
    /// Every node and every reference edge
    Full,
}

pub struct GraphRenderer {
    scope: RenderScope,
}

impl GraphRenderer {
    pub fn new(scope: RenderScope) -> Self {
        Self { scope }
    }

    pub fn render_dot(&self, graph: &Graph, output: &mut dyn Write) -> Result<()> {
        writeln_out!(output, "digraph terraform {{")?;
        writeln_out!(output, "  rankdir = LR;")?;
        writeln_out!(output, "  compound = true;")?;
        writeln_out!(output)?;
        writeln_out!(output, "  // Node styles")?;
        writeln_out!(output, "  node [shape=box, style=rounded];")?;
        writeln_out!(output)?;

        match self.scope {
            RenderScope::Root => self.render_root_scope(graph, output)?,
            RenderScope::Full => self.render_full_scope(graph, output)?,
        }

        writeln_out!(output, "}}")?;
        Ok(())
    }

    fn render_root_scope(&self, graph: &Graph, output: &mut dyn Write) -> Result<()> {
        let root = graph.root();

        if let Some(root) = root {
            write_root(output, &root.id, &root.path)?;
        }

        writeln_out!(output)?;
        writeln_out!(output, "  // Referenced nodes")?;
        if let Some(root) = root {
            for (category, reference) in root.references.all() {
                write_referenced(output, &reference.id, &reference.path, category_color(category))?;
            }
        }

        writeln_out!(output)?;
        writeln_out!(output, "  // Dependencies")?;
        if let Some(root) = root {
            for (_, reference) in root.references.all() {
                write_edge(output, &reference.id, &root.id)?;
            }
        }

        Ok(())
    }

    fn render_full_scope(&self, graph: &Graph, output: &mut dyn Write) -> Result<()> {
        let view = DependencyView::from_graph(graph);
        let root_id = graph.root().map(|root| root.id.as_str());

        for index in view.graph.node_indices() {
            if let Vertex::Node(node) = &view.graph[index]
                && Some(node.id.as_str()) == root_id
            {
                write_root(output, &node.id, &node.path)?;
            }
        }

        writeln_out!(output)?;
        writeln_out!(output, "  // Referenced nodes")?;
        for index in view.graph.node_indices() {
            match &view.graph[index] {
                Vertex::Node(node) if Some(node.id.as_str()) == root_id => {}
                Vertex::Node(node) => {
                    write_referenced(output, &node.id, &node.path, category_color(node.kind.into()))?
                }
                Vertex::Leaf { id, category, path } => {
                    write_referenced(output, id, path, category_color(*category))?
                }
            }
        }

        writeln_out!(output)?;
        writeln_out!(output, "  // Dependencies")?;
        for edge in view.graph.edge_references() {
            write_edge(
                output,
                view.graph[edge.target()].id(),
                view.graph[edge.source()].id(),
            )?;
        }

        Ok(())
    }
}

/// A vertex of the full view
#[derive(Debug)]
enum Vertex<'g> {
    /// A node recorded in the graph
    Node(&'g Node),
    /// A referenced identifier that was never recorded as a node
    Leaf {
        id: String,
        category: ReferenceCategory,
        path: &'g Path,
    },
}

impl Vertex<'_> {
    fn id(&self) -> &str {
        match self {
            Vertex::Node(node) => &node.id,
            Vertex::Leaf { id, .. } => id,
        }
    }
}

/// The graph as a petgraph digraph, edges pointing from a node to what it
/// references
struct DependencyView<'g> {
    graph: DiGraph<Vertex<'g>, ()>,
}

impl<'g> DependencyView<'g> {
    fn from_graph(graph: &'g Graph) -> Self {
        let mut view = DiGraph::new();
        let mut indices: HashMap<String, NodeIndex> = HashMap::new();

        for node in graph.nodes() {
            indices.insert(node.id.clone(), view.add_node(Vertex::Node(node)));
        }

        for node in graph.nodes() {
            let from = indices[&node.id];

            for (category, reference) in node.references.all() {
                let id = node.qualify_reference(&reference.id);
                let to = match indices.get(&id) {
                    Some(index) => *index,
                    None => {
                        let index = view.add_node(Vertex::Leaf {
                            id: id.clone(),
                            category,
                            path: &reference.path,
                        });
                        indices.insert(id, index);
                        index
                    }
                };

                if !view.contains_edge(from, to) {
                    view.add_edge(from, to, ());
                }
            }
        }

        Self { graph: view }
    }
}

fn write_root(output: &mut dyn Write, id: &str, path: &Path) -> Result<()> {
    writeln_out!(
        output,
        r#"  "{}" [label="{}\n({})", color={}];"#,
        id,
        id,
        path.display(),
        colors::ROOT_STROKE
    )?;
    Ok(())
}

fn write_referenced(output: &mut dyn Write, id: &str, path: &Path, color: &str) -> Result<()> {
    writeln_out!(
        output,
        r#"  "{}" [label="{}\n({})", fillcolor="{}", style="filled,rounded"];"#,
        id,
        id,
        path.display(),
        color
    )?;
    Ok(())
}

fn write_edge(output: &mut dyn Write, from: &str, to: &str) -> Result<()> {
    writeln_out!(output, r#"  "{}" -> "{}" [style=solid];"#, from, to)?;
    Ok(())
}

fn category_color(category: ReferenceCategory) -> &'static str {
    match category {
        ReferenceCategory::Variable => colors::VARIABLE,
        ReferenceCategory::Module => colors::MODULE,
        ReferenceCategory::Data => colors::DATA,
        ReferenceCategory::Resource => colors::RESOURCE,
        ReferenceCategory::Output => colors::OUTPUT,
    }
}
