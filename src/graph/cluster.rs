//! Named visual grouping of nodes. Clusters nest via a parent link and carry
//! no behavior; they only affect how the renderer groups boxes.

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClusterId(pub(crate) usize);

#[derive(Debug, Clone)]
pub struct Cluster {
    pub name: String,
    /// Enclosing cluster, None if directly under the diagram root.
    pub parent: Option<ClusterId>,
}
