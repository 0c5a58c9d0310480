//! DOT emission.
//!
//! Layout is entirely the engine's job; this module only serializes the
//! diagram into Graphviz syntax. Output is deterministic: everything is
//! emitted in declaration order.

use crate::graph::{Category, ClusterId, Diagram};
use std::collections::BTreeMap;

/// Render a diagram to DOT text.
pub fn render_dot(diagram: &Diagram) -> String {
    let mut out = String::new();

    out.push_str(&format!("digraph \"{}\" {{\n", escape(&diagram.title)));
    out.push_str(&format!(
        "    rankdir={};\n",
        diagram.direction.as_rankdir()
    ));
    out.push_str(&format!("    label=\"{}\";\n", escape(&diagram.title)));
    out.push_str("    labelloc=b;\n");
    out.push_str("    node [shape=box, style=\"rounded,filled\", fontname=\"Helvetica\"];\n");

    // Group clusters and nodes under their parents, keyed by declaration
    // index so emission order stays stable.
    let mut child_clusters: BTreeMap<Option<ClusterId>, Vec<ClusterId>> = BTreeMap::new();
    for (idx, cluster) in diagram.clusters.iter().enumerate() {
        child_clusters
            .entry(cluster.parent)
            .or_default()
            .push(ClusterId(idx));
    }
    let mut member_nodes: BTreeMap<Option<ClusterId>, Vec<usize>> = BTreeMap::new();
    for (idx, node) in diagram.nodes.iter().enumerate() {
        member_nodes.entry(node.cluster).or_default().push(idx);
    }

    emit_members(&mut out, diagram, None, &child_clusters, &member_nodes, 1);

    out.push('\n');
    for edge in &diagram.edges {
        let mut attrs: Vec<String> = Vec::new();
        if let Some(label) = &edge.label {
            attrs.push(format!("label=\"{}\"", escape(label)));
        }
        if let Some(color) = &edge.color {
            attrs.push(format!("color=\"{}\"", escape(color)));
        }
        if let Some(penwidth) = edge.penwidth {
            attrs.push(format!("penwidth={penwidth}"));
        }
        if edge.dashed {
            attrs.push("style=dashed".to_string());
        }

        let from = &diagram.node(edge.from).id;
        let to = &diagram.node(edge.to).id;
        if attrs.is_empty() {
            out.push_str(&format!("    \"{from}\" -> \"{to}\";\n"));
        } else {
            out.push_str(&format!(
                "    \"{from}\" -> \"{to}\" [{}];\n",
                attrs.join(", ")
            ));
        }
    }

    out.push_str("}\n");
    out
}

/// Emit the nodes owned by `parent`, then recurse into its child clusters.
fn emit_members(
    out: &mut String,
    diagram: &Diagram,
    parent: Option<ClusterId>,
    child_clusters: &BTreeMap<Option<ClusterId>, Vec<ClusterId>>,
    member_nodes: &BTreeMap<Option<ClusterId>, Vec<usize>>,
    depth: usize,
) {
    let pad = "    ".repeat(depth);

    if let Some(nodes) = member_nodes.get(&parent) {
        for &idx in nodes {
            let node = &diagram.nodes[idx];
            out.push_str(&format!(
                "{pad}\"{}\" [label=\"{}\", fillcolor=\"{}\"];\n",
                node.id,
                escape(&node.label),
                fill_color(node.category)
            ));
        }
    }

    if let Some(clusters) = child_clusters.get(&parent) {
        for &id in clusters {
            let cluster = diagram.cluster(id);
            out.push_str(&format!("{pad}subgraph cluster_{} {{\n", id.0));
            out.push_str(&format!(
                "{pad}    label=\"{}\";\n",
                escape(&cluster.name)
            ));
            out.push_str(&format!("{pad}    style=rounded;\n"));
            out.push_str(&format!("{pad}    color=gray60;\n"));
            emit_members(out, diagram, Some(id), child_clusters, member_nodes, depth + 1);
            out.push_str(&format!("{pad}}}\n"));
        }
    }
}

/// Fill color per category, loosely following the AWS service palette.
fn fill_color(category: Category) -> &'static str {
    match category {
        Category::Client => "#ECECEC",
        Category::Dns => "#C7A4EE",
        Category::Cdn => "#B48FE0",
        Category::LoadBalancer => "#A07BD6",
        Category::Gateway => "#8F6BC9",
        Category::Compute => "#F5B266",
        Category::Database => "#7FB3E8",
        Category::Cache => "#9CC5EE",
        Category::Storage => "#8FD19E",
        Category::Security => "#F19C9C",
    }
}

/// Escape a string for use inside a double-quoted DOT literal.
fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
