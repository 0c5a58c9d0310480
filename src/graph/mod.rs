//! In-memory architecture graph.
//!
//! This module is intentionally separate from rendering. It owns:
//! - Node / Category (labeled, categorized boxes)
//! - Edge (directed, optionally styled)
//! - Cluster (nested visual grouping)
//! - DiagramBuilder (scoped accumulation, validation)

pub mod builder;
pub mod cluster;
pub mod edge;
pub mod node;

pub use builder::{ClusterScope, Diagram, DiagramBuilder, Direction};
pub use cluster::{Cluster, ClusterId};
pub use edge::Edge;
pub use node::{Category, Node, NodeId};
