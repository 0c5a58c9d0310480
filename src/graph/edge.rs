//! Directed, optionally styled edge between two nodes.

use crate::graph::node::NodeId;

/// A directed edge. Styling fields map straight onto DOT edge attributes and
/// are all optional; direction is illustrative only.
#[derive(Debug, Clone)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    pub label: Option<String>,
    pub color: Option<String>,
    pub penwidth: Option<f64>,
    pub dashed: bool,
}

impl Edge {
    pub(crate) fn new(from: NodeId, to: NodeId) -> Self {
        Self {
            from,
            to,
            label: None,
            color: None,
            penwidth: None,
            dashed: false,
        }
    }

    pub fn label(&mut self, label: &str) -> &mut Self {
        self.label = Some(label.to_string());
        self
    }

    pub fn color(&mut self, color: &str) -> &mut Self {
        self.color = Some(color.to_string());
        self
    }

    pub fn penwidth(&mut self, penwidth: f64) -> &mut Self {
        self.penwidth = Some(penwidth);
        self
    }

    pub fn dashed(&mut self) -> &mut Self {
        self.dashed = true;
        self
    }
}
