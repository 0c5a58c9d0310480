//! Diagram builder.
//!
//! We keep two representations:
//! - DiagramBuilder: mutable accumulator the topology is declared against
//! - Diagram: validated, immutable result handed to the renderers
//!
//! Clusters are opened as scope guards (`ClusterScope`). Dropping the guard
//! restores the enclosing cluster, so a node is always attributed to the
//! innermost cluster open at its declaration, on every exit path.

use crate::graph::cluster::{Cluster, ClusterId};
use crate::graph::edge::Edge;
use crate::graph::node::{Category, Node, NodeId};
use anyhow::bail;
use std::collections::BTreeSet;
use std::ops::{Deref, DerefMut};

/// Overall layout direction, passed through to the render engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    LeftRight,
    TopBottom,
}

impl Direction {
    /// DOT `rankdir` value.
    pub fn as_rankdir(self) -> &'static str {
        match self {
            Direction::LeftRight => "LR",
            Direction::TopBottom => "TB",
        }
    }
}

/// Validated, immutable diagram.
#[derive(Debug, Clone)]
pub struct Diagram {
    pub title: String,
    pub direction: Direction,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub clusters: Vec<Cluster>,
}

impl Diagram {
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn cluster(&self, id: ClusterId) -> &Cluster {
        &self.clusters[id.0]
    }
}

#[derive(Debug)]
pub struct DiagramBuilder {
    title: String,
    direction: Direction,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    clusters: Vec<Cluster>,
    /// Innermost cluster currently open. New nodes land here.
    open: Option<ClusterId>,
}

impl DiagramBuilder {
    pub fn new(title: &str, direction: Direction) -> Self {
        Self {
            title: title.to_string(),
            direction,
            nodes: Vec::new(),
            edges: Vec::new(),
            clusters: Vec::new(),
            open: None,
        }
    }

    /// Add a node to the innermost open cluster (or the diagram root) and
    /// return its id. The node's slug identifier is derived from the label
    /// and disambiguated if taken.
    pub fn node(&mut self, category: Category, label: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        let slug = self.unique_slug(label);
        self.nodes.push(Node {
            id: slug,
            label: label.to_string(),
            category,
            cluster: self.open,
        });
        id
    }

    /// Add a directed edge. The returned reference allows chained styling:
    /// `b.edge(a, b).label("HTTPS").color("black").penwidth(2.5)`.
    pub fn edge(&mut self, from: NodeId, to: NodeId) -> &mut Edge {
        let idx = self.edges.len();
        self.edges.push(Edge::new(from, to));
        &mut self.edges[idx]
    }

    /// Open a nested cluster. The cluster stays open until the returned scope
    /// is dropped; everything declared through the scope (or the builder it
    /// derefs to) belongs to it.
    pub fn cluster(&mut self, name: &str) -> ClusterScope<'_> {
        let id = ClusterId(self.clusters.len());
        self.clusters.push(Cluster {
            name: name.to_string(),
            parent: self.open,
        });
        self.open = Some(id);
        ClusterScope { builder: self }
    }

    fn end_cluster(&mut self) {
        if let Some(id) = self.open {
            self.open = self.clusters[id.0].parent;
        }
    }

    /// Validate and freeze:
    /// - non-empty title
    /// - at least one node
    /// - non-empty node labels
    pub fn finish(self) -> anyhow::Result<Diagram> {
        if self.title.trim().is_empty() {
            bail!("diagram title must not be empty");
        }
        if self.nodes.is_empty() {
            bail!("diagram contains no nodes");
        }
        for node in &self.nodes {
            if node.label.trim().is_empty() {
                bail!("node {:?} has an empty label", node.id);
            }
        }
        Ok(Diagram {
            title: self.title,
            direction: self.direction,
            nodes: self.nodes,
            edges: self.edges,
            clusters: self.clusters,
        })
    }

    fn unique_slug(&self, label: &str) -> String {
        let taken: BTreeSet<&str> = self.nodes.iter().map(|n| n.id.as_str()).collect();
        let base = slugify(label);
        if !taken.contains(base.as_str()) {
            return base;
        }
        let mut n = 2;
        loop {
            let candidate = format!("{base}_{n}");
            if !taken.contains(candidate.as_str()) {
                return candidate;
            }
            n += 1;
        }
    }
}

/// Lowercase alphanumeric runs joined by underscores:
/// "Route 53 (DNS)" -> "route_53_dns".
fn slugify(label: &str) -> String {
    let mut out = String::new();
    let mut gap = false;
    for ch in label.chars() {
        if ch.is_ascii_alphanumeric() {
            if gap && !out.is_empty() {
                out.push('_');
            }
            gap = false;
            out.push(ch.to_ascii_lowercase());
        } else {
            gap = true;
        }
    }
    out
}

/// Scope guard for an open cluster. Derefs to the builder, so nodes, edges,
/// and nested clusters are declared straight through it. Dropping the guard
/// closes the cluster, including on early return.
#[derive(Debug)]
pub struct ClusterScope<'a> {
    builder: &'a mut DiagramBuilder,
}

impl Deref for ClusterScope<'_> {
    type Target = DiagramBuilder;

    fn deref(&self) -> &DiagramBuilder {
        self.builder
    }
}

impl DerefMut for ClusterScope<'_> {
    fn deref_mut(&mut self) -> &mut DiagramBuilder {
        self.builder
    }
}

impl Drop for ClusterScope<'_> {
    fn drop(&mut self) {
        self.builder.end_cluster();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn nodes_attributed_to_innermost_open_cluster() {
        let mut b = DiagramBuilder::new("t", Direction::LeftRight);
        let top = b.node(Category::Client, "Users");

        let mut outer = b.cluster("Outer");
        let in_outer = outer.node(Category::Compute, "A");
        let mut inner = outer.cluster("Inner");
        let in_inner = inner.node(Category::Compute, "B");
        drop(inner);
        let in_outer_again = outer.node(Category::Compute, "C");
        drop(outer);

        let after = b.node(Category::Compute, "D");
        let d = b.finish().unwrap();

        assert_eq!(d.node(top).cluster, None);
        assert_eq!(d.node(in_outer).cluster, Some(ClusterId(0)));
        assert_eq!(d.node(in_inner).cluster, Some(ClusterId(1)));
        assert_eq!(d.node(in_outer_again).cluster, Some(ClusterId(0)));
        assert_eq!(d.node(after).cluster, None);
        assert_eq!(d.cluster(ClusterId(1)).parent, Some(ClusterId(0)));
        assert_eq!(d.cluster(ClusterId(0)).parent, None);
    }

    #[test]
    fn cluster_closes_on_early_return() {
        fn declare(b: &mut DiagramBuilder, quit: bool) -> Option<NodeId> {
            let mut scope = b.cluster("Scoped");
            if quit {
                return None;
            }
            Some(scope.node(Category::Compute, "inside"))
        }

        let mut b = DiagramBuilder::new("t", Direction::TopBottom);
        assert_eq!(declare(&mut b, true), None);

        // The early return must have closed the cluster.
        let outside = b.node(Category::Compute, "outside");
        let d = b.finish().unwrap();
        assert_eq!(d.node(outside).cluster, None);
    }

    #[test]
    fn slugs_are_unique_and_readable() {
        let mut b = DiagramBuilder::new("t", Direction::LeftRight);
        let a = b.node(Category::Dns, "Route 53 (DNS)");
        let x = b.node(Category::Database, "RDS MySQL");
        let y = b.node(Category::Database, "RDS  MySQL!");
        let d = b.finish().unwrap();

        assert_eq!(d.node(a).id, "route_53_dns");
        assert_eq!(d.node(x).id, "rds_mysql");
        assert_eq!(d.node(y).id, "rds_mysql_2");
    }

    #[test]
    fn edge_styling_chain() {
        let mut b = DiagramBuilder::new("t", Direction::LeftRight);
        let a = b.node(Category::Client, "a");
        let z = b.node(Category::Compute, "z");
        b.edge(a, z).label("HTTPS").color("black").penwidth(2.5);
        b.edge(z, a).dashed();
        let d = b.finish().unwrap();

        assert_eq!(d.edges.len(), 2);
        assert_eq!(d.edges[0].label.as_deref(), Some("HTTPS"));
        assert_eq!(d.edges[0].color.as_deref(), Some("black"));
        assert_eq!(d.edges[0].penwidth, Some(2.5));
        assert!(!d.edges[0].dashed);
        assert!(d.edges[1].dashed);
    }

    #[test]
    fn finish_rejects_empty_diagrams_and_labels() {
        let b = DiagramBuilder::new("t", Direction::LeftRight);
        assert!(b.finish().is_err());

        let mut b = DiagramBuilder::new("t", Direction::LeftRight);
        b.node(Category::Compute, "  ");
        assert!(b.finish().is_err());

        let mut b = DiagramBuilder::new("   ", Direction::LeftRight);
        b.node(Category::Compute, "ok");
        assert!(b.finish().is_err());
    }
}
