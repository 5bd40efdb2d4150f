use std::collections::HashSet;
use std::path::{Path, PathBuf};

use super::types::{Graph, Node};
use crate::analyzer::{DeclarationLocator, ModuleResolution, ModuleResolver};
use crate::core::ReferenceCategory;
use crate::core::identifier::{is_module_reference, is_terminal, qualify};
use crate::progress::{SkipReason, TraversalObserver};
use crate::source::SourceLoader;

/// Qualified identifiers already expanded during one traversal
pub type VisitedSet = HashSet<String>;

/// One identifier waiting to be expanded
#[derive(Debug, Clone)]
struct PendingVisit {
    id: String,
    dir: PathBuf,
    namespace: Option<String>,
    depth: usize,
    /// Depth of the declaration this visit was reached from. A module call
    /// is recorded here: entering a module costs no depth.
    site_depth: usize,
}

impl PendingVisit {
    fn qualified_id(&self) -> String {
        qualify(self.namespace.as_deref(), &self.id)
    }
}

/// Builder for dependency graphs
///
/// Expands references depth-first from a target declaration, following
/// module calls into their source directories. Every identifier is expanded
/// at most once per visited set, and nothing deeper than the graph's maximum
/// depth is recorded.
pub struct DependencyGraphBuilder<'a, L> {
    locator: DeclarationLocator<'a, L>,
    observer: Option<&'a dyn TraversalObserver>,
}

impl<'a, L: SourceLoader> DependencyGraphBuilder<'a, L> {
    pub fn new(loader: L, observer: Option<&'a dyn TraversalObserver>) -> Self {
        Self {
            locator: DeclarationLocator::new(loader, observer),
            observer,
        }
    }

    /// Build the dependency graph of `target`, declared in `base_dir`
    pub fn build(&self, base_dir: &Path, target: &str, max_depth: usize) -> Graph {
        let mut graph = Graph::new(max_depth);
        let mut visited = VisitedSet::new();
        self.traverse(&mut graph, base_dir, target, 0, &mut visited);
        graph
    }

    /// Expand `id` at `depth` into `graph`
    ///
    /// Identifiers already in `visited` and depths beyond the graph's bound
    /// are ignored, so calling this again with the same visited set changes
    /// nothing.
    pub fn traverse(
        &self,
        graph: &mut Graph,
        base_dir: &Path,
        id: &str,
        depth: usize,
        visited: &mut VisitedSet,
    ) {
        let resolver = ModuleResolver::new(&self.locator, self.observer);
        let mut stack = vec![PendingVisit {
            id: id.to_string(),
            dir: base_dir.to_path_buf(),
            namespace: None,
            depth,
            site_depth: depth,
        }];

        while let Some(visit) = stack.pop() {
            let qualified = visit.qualified_id();

            if visit.depth > graph.max_depth() {
                self.notify_skip(&qualified, visit.depth, SkipReason::DepthExceeded);
                continue;
            }
            if !visited.insert(qualified.clone()) {
                self.notify_skip(&qualified, visit.depth, SkipReason::AlreadyVisited);
                continue;
            }

            if let Some(observer) = self.observer {
                observer.visiting(&qualified, visit.depth);
            }

            let mut next = Vec::new();
            let is_module = is_module_reference(&visit.id);
            let node_depth = if is_module { visit.site_depth } else { visit.depth };

            if is_module
                && let ModuleResolution::Resolved { dir, declaration } =
                    resolver.resolve(&visit.dir, &visit.id)
            {
                let call = Node::from_located(declaration, node_depth, visit.namespace.clone());
                let members = self.locator.declared_ids(&dir);

                // Members still pass the depth guard, which bounds nested calls
                next.extend(members.into_iter().map(|member| PendingVisit {
                    id: member,
                    dir: dir.clone(),
                    namespace: Some(call.id.clone()),
                    depth: node_depth + 1,
                    site_depth: node_depth + 1,
                }));
                graph.insert(call);
            }

            if let Some(declaration) = self.locator.locate(&visit.dir, &visit.id) {
                let node = Node::from_located(declaration, node_depth, visit.namespace.clone());

                next.extend(
                    node.references
                        .all()
                        .filter(|(category, reference)| {
                            *category != ReferenceCategory::Variable && !is_terminal(&reference.id)
                        })
                        .map(|(_, reference)| PendingVisit {
                            id: reference.id.clone(),
                            dir: visit.dir.clone(),
                            namespace: visit.namespace.clone(),
                            depth: node_depth + 1,
                            site_depth: node_depth,
                        }),
                );
                graph.insert(node);
            }

            // Reversed so the first pending visit is expanded first
            stack.extend(next.into_iter().rev());
        }
    }

    fn notify_skip(&self, id: &str, depth: usize, reason: SkipReason) {
        if let Some(observer) = self.observer {
            observer.skipped(id, depth, reason);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::source::HclSourceLoader;

    fn builder() -> DependencyGraphBuilder<'static, HclSourceLoader> {
        DependencyGraphBuilder::new(HclSourceLoader::new(), None)
    }

    #[test]
    fn test_missing_target_yields_empty_graph() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("main.tf"), "resource \"aws_vpc\" \"main\" {}\n").unwrap();

        let graph = builder().build(temp.path(), "aws_instance.web", 3);
        assert!(graph.is_empty());
    }

    #[test]
    fn test_depth_first_discovery_depth() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("main.tf"),
            r#"
resource "aws_instance" "web" {
  subnet_id = aws_subnet.a.id
  vpc_id    = aws_vpc.main.id
}

resource "aws_subnet" "a" {
  vpc_id = aws_vpc.main.id
}

resource "aws_vpc" "main" {}
"#,
        )
        .unwrap();

        let graph = builder().build(temp.path(), "aws_instance.web", 3);

        assert_eq!(graph.len(), 3);
        assert_eq!(graph.get("aws_instance.web").unwrap().depth, 0);
        assert_eq!(graph.get("aws_subnet.a").unwrap().depth, 1);
        // reached through the subnet first
        assert_eq!(graph.get("aws_vpc.main").unwrap().depth, 2);
    }

    #[test]
    fn test_local_values_are_terminal() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("main.tf"),
            "resource \"aws_instance\" \"web\" {\n  tags = local.tags\n}\n",
        )
        .unwrap();

        let graph = builder().build(temp.path(), "aws_instance.web", 3);

        assert_eq!(graph.len(), 1);
        let web = graph.get("aws_instance.web").unwrap();
        assert_eq!(
            web.references.get(ReferenceCategory::Resource)[0].id,
            "local.tags"
        );
    }

    #[test]
    fn test_module_call_shares_the_referencing_depth() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("main.tf"),
            r#"
resource "aws_instance" "web" {
  subnet_id = aws_subnet.a.id
}

resource "aws_subnet" "a" {
  vpc_id = module.net.vpc_id
}

module "net" {
  source = "./net"
}
"#,
        )
        .unwrap();
        fs::create_dir(temp.path().join("net")).unwrap();
        fs::write(
            temp.path().join("net/main.tf"),
            "resource \"aws_vpc\" \"this\" {}\n",
        )
        .unwrap();

        let graph = builder().build(temp.path(), "aws_instance.web", 2);

        assert_eq!(graph.get("aws_subnet.a").unwrap().depth, 1);
        assert_eq!(graph.get("module.net").unwrap().depth, 1);
        assert_eq!(graph.get("module.net/aws_vpc.this").unwrap().depth, 2);

        // one level less leaves the module call unvisited
        let graph = builder().build(temp.path(), "aws_instance.web", 1);
        assert!(!graph.contains("module.net"));
    }
}
