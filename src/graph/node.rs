//! Node type and its category taxonomy.
//!
//! A node is one box in the diagram: a display label plus a category that
//! picks its visual treatment. Identity is a slug derived from the label,
//! unique within a diagram.

use crate::graph::cluster::ClusterId;
use serde::Serialize;

/// Index of a node within its diagram. Only obtainable from the builder, so a
/// held id always refers to an existing node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) usize);

/// What kind of infrastructure element a node stands for. Drives the fill
/// color in DOT output; otherwise purely descriptive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Client,
    Dns,
    Cdn,
    LoadBalancer,
    Gateway,
    Compute,
    Database,
    Cache,
    Storage,
    Security,
}

#[derive(Debug, Clone)]
pub struct Node {
    /// Slug identifier, e.g. "route_53_dns". Unique within the diagram.
    pub id: String,
    pub label: String,
    pub category: Category,
    /// Innermost cluster open when the node was declared. None = top level.
    pub cluster: Option<ClusterId>,
}
