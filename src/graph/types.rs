//! Core graph types
//!
//! This module contains the fundamental data structures used in the dependency
//! graph.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::core::identifier::qualify;
use crate::core::{CategorizedReferences, DeclarationKind, LocatedDeclaration};

/// A declaration materialized in the graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Identifier, qualified by its module namespace
    pub id: String,
    pub kind: DeclarationKind,
    pub name: String,
    pub path: PathBuf,
    /// Outgoing references, as written inside the declaration's own module
    pub references: CategorizedReferences,
    /// Depth of first discovery, the root being 0
    pub depth: usize,
    /// Qualified identifier of the module call this node was found through
    pub namespace: Option<String>,
}

impl Node {
    pub fn from_located(
        declaration: LocatedDeclaration,
        depth: usize,
        namespace: Option<String>,
    ) -> Self {
        Self {
            id: qualify(namespace.as_deref(), &declaration.id),
            kind: declaration.kind,
            name: declaration.name,
            path: declaration.path,
            references: declaration.references,
            depth,
            namespace,
        }
    }

    /// Qualify one of this node's reference identifiers with the node's
    /// namespace
    pub fn qualify_reference(&self, id: &str) -> String {
        qualify(self.namespace.as_deref(), id)
    }
}

/// Nodes keyed by qualified identifier, plus the depth bound they were
/// discovered under
///
/// Module calls share the depth of the declaration that references them, so
/// depth 0 may hold more than the traversal target. The target is the first
/// node recorded at depth 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    nodes: BTreeMap<String, Node>,
    root: Option<String>,
    max_depth: usize,
}

impl Graph {
    pub fn new(max_depth: usize) -> Self {
        Self {
            nodes: BTreeMap::new(),
            root: None,
            max_depth,
        }
    }

    /// Record a node unless one with the same identifier exists. The first
    /// discovery wins; returns whether the node was added.
    pub fn insert(&mut self, node: Node) -> bool {
        if self.nodes.contains_key(&node.id) {
            return false;
        }
        if node.depth == 0 && self.root.is_none() {
            self.root = Some(node.id.clone());
        }
        self.nodes.insert(node.id.clone(), node);
        true
    }

    pub fn get(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Nodes ordered by identifier
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// The traversal target
    pub fn root(&self) -> Option<&Node> {
        self.root.as_deref().and_then(|id| self.nodes.get(id))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Reference, ReferenceCategory};

    fn located(id: &str) -> LocatedDeclaration {
        let mut references = CategorizedReferences::new();
        references.insert(
            ReferenceCategory::Variable,
            Reference::new("var.cidr", "main.tf"),
        );
        LocatedDeclaration {
            id: id.to_string(),
            kind: DeclarationKind::Resource,
            name: "s".to_string(),
            path: PathBuf::from("main.tf"),
            references,
        }
    }

    #[test]
    fn test_first_insert_wins() {
        let mut graph = Graph::new(3);

        assert!(graph.insert(Node::from_located(located("aws_subnet.s"), 2, None)));
        assert!(!graph.insert(Node::from_located(located("aws_subnet.s"), 1, None)));

        assert_eq!(graph.len(), 1);
        assert_eq!(graph.get("aws_subnet.s").unwrap().depth, 2);
    }

    #[test]
    fn test_namespaced_node() {
        let node = Node::from_located(located("aws_subnet.s"), 1, Some("module.net".to_string()));

        assert_eq!(node.id, "module.net/aws_subnet.s");
        assert_eq!(node.name, "s");
        assert_eq!(node.qualify_reference("aws_vpc.main"), "module.net/aws_vpc.main");
    }

    #[test]
    fn test_root_and_ordering() {
        let mut graph = Graph::new(3);
        assert!(graph.root().is_none());

        graph.insert(Node::from_located(located("aws_vpc.main"), 1, None));
        graph.insert(Node::from_located(located("aws_instance.web"), 0, None));
        // a module call sharing the target's depth
        graph.insert(Node::from_located(located("module.net"), 0, None));

        let ids: Vec<&str> = graph.nodes().map(|node| node.id.as_str()).collect();
        assert_eq!(ids, vec!["aws_instance.web", "aws_vpc.main", "module.net"]);

        assert_eq!(graph.root().unwrap().id, "aws_instance.web");
        assert!(graph.contains("aws_vpc.main"));
        assert_eq!(graph.max_depth(), 3);
    }
}
