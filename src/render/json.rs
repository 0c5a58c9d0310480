//! Machine-readable diagram dump.
//!
//! Serializes a flat view of the diagram (clusters by index, nodes by slug)
//! so other tooling can consume the topology without reading DOT.

use crate::graph::Diagram;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct DiagramView {
    pub title: String,
    pub direction: String,
    pub clusters: Vec<ClusterView>,
    pub nodes: Vec<NodeView>,
    pub edges: Vec<EdgeView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClusterView {
    pub id: usize,
    pub name: String,
    /// Parent cluster id, None if directly under the diagram root.
    pub parent: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NodeView {
    pub id: String,
    pub label: String,
    pub category: crate::graph::Category,
    pub cluster: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EdgeView {
    pub from: String,
    pub to: String,
    pub label: Option<String>,
    pub color: Option<String>,
    pub penwidth: Option<f64>,
    pub dashed: bool,
}

/// Render a diagram as pretty-printed JSON.
pub fn render_json(diagram: &Diagram) -> anyhow::Result<String> {
    let view = DiagramView {
        title: diagram.title.clone(),
        direction: diagram.direction.as_rankdir().to_string(),
        clusters: diagram
            .clusters
            .iter()
            .enumerate()
            .map(|(id, c)| ClusterView {
                id,
                name: c.name.clone(),
                parent: c.parent.map(|p| p.0),
            })
            .collect(),
        nodes: diagram
            .nodes
            .iter()
            .map(|n| NodeView {
                id: n.id.clone(),
                label: n.label.clone(),
                category: n.category,
                cluster: n.cluster.map(|c| c.0),
            })
            .collect(),
        edges: diagram
            .edges
            .iter()
            .map(|e| EdgeView {
                from: diagram.node(e.from).id.clone(),
                to: diagram.node(e.to).id.clone(),
                label: e.label.clone(),
                color: e.color.clone(),
                penwidth: e.penwidth,
                dashed: e.dashed,
            })
            .collect(),
    };
    Ok(serde_json::to_string_pretty(&view)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Category, DiagramBuilder, Direction};
    use pretty_assertions::assert_eq;

    #[test]
    fn json_round_trips_through_serde_value() {
        let mut b = DiagramBuilder::new("Sample", Direction::TopBottom);
        let a = b.node(Category::Client, "Users");
        let mut net = b.cluster("Net");
        let z = net.node(Category::Database, "RDS");
        drop(net);
        b.edge(a, z).label("MySQL").penwidth(2.5);
        let diagram = b.finish().unwrap();

        let text = render_json(&diagram).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value["title"], "Sample");
        assert_eq!(value["direction"], "TB");
        assert_eq!(value["clusters"].as_array().unwrap().len(), 1);
        assert_eq!(value["nodes"][0]["id"], "users");
        assert_eq!(value["nodes"][0]["category"], "client");
        assert_eq!(value["nodes"][1]["cluster"], 0);
        assert_eq!(value["edges"][0]["from"], "users");
        assert_eq!(value["edges"][0]["to"], "rds");
        assert_eq!(value["edges"][0]["penwidth"], 2.5);
        assert_eq!(value["edges"][0]["dashed"], false);
    }
}
