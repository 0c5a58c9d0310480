//! The BinarySoftwear deployment topology, declared node by node.
//!
//! Pure documentation data for the WordPress storefront's AWS estate: the
//! edge chain (DNS, CDN, WAF, ALB), the web tier, the data tier, and the
//! operator access paths. Nothing here is provisioned or validated against
//! a real deployment.

use crate::Result;
use crate::graph::{Category, Diagram, DiagramBuilder, Direction};

pub const DIAGRAM_TITLE: &str = "BinarySoftwear Architecture";

/// Build the architecture diagram.
pub fn binarysoftwear_diagram() -> Result<Diagram> {
    let mut d = DiagramBuilder::new(DIAGRAM_TITLE, Direction::LeftRight);

    let user = d.node(Category::Client, "Users");
    let route53 = d.node(Category::Dns, "Route 53 (DNS)");

    let mut net = d.cluster("AWS Network");

    let mut public = net.cluster("Public Subnet(s)");
    let cloudfront = public.node(Category::Cdn, "CloudFront (CDN)");
    let waf = public.node(Category::Security, "AWS WAF");
    let alb = public.node(Category::LoadBalancer, "Application Load Balancer");
    let bastion = public.node(Category::Compute, "Bastion Host");
    let nat = public.node(Category::Gateway, "NAT Gateway");
    drop(public);

    let mut private = net.cluster("Private Subnet(s)");

    let mut web = private.cluster("Web Servers");
    let ec2 = web.node(Category::Compute, "EC2 Auto-Scaling Instances");
    let efs = web.node(Category::Storage, "EFS (Shared Filesystem)");
    let memcached = web.node(Category::Cache, "ElastiCache (Memcached)");
    drop(web);

    let mut database = private.cluster("Database");
    let primary_db = database.node(Category::Database, "RDS MySQL (Primary)");
    let secondary_db = database.node(Category::Database, "RDS MySQL (Secondary)");
    database
        .edge(primary_db, secondary_db)
        .label("Async Replication")
        .color("black")
        .penwidth(2.5);
    drop(database);

    let secrets = private.node(Category::Security, "AWS Secrets Manager");
    drop(private);
    drop(net);

    // Request path, edge to origin.
    d.edge(user, route53).label("HTTPS").color("black").penwidth(2.5);
    d.edge(route53, cloudfront)
        .label("DNS Resolution")
        .color("black")
        .penwidth(2.5);
    d.edge(cloudfront, waf).label("HTTPS").color("black").penwidth(2.5);
    d.edge(waf, alb).label("HTTPS").color("black").penwidth(2.5);
    d.edge(alb, ec2).label("HTTP/HTTPS").color("black").penwidth(2.5);

    // Web tier to the data tier.
    d.edge(ec2, primary_db).label("MySQL").color("black").penwidth(2.5);
    d.edge(ec2, efs).label("NFS").color("black").penwidth(2.5);
    d.edge(ec2, secrets)
        .label("Fetch Secrets")
        .color("black")
        .penwidth(2.5);
    d.edge(ec2, memcached)
        .label("Memcached (11211)")
        .color("blue")
        .penwidth(2.5);

    // Operator access and outbound traffic.
    d.edge(user, bastion).label("SSH").color("black").dashed();
    d.edge(bastion, ec2).label("SSH").color("black").dashed();
    d.edge(nat, ec2).label("Internet Access").color("black").dashed();

    d.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn expected_shape() {
        let d = binarysoftwear_diagram().unwrap();
        assert_eq!(d.title, DIAGRAM_TITLE);
        assert_eq!(d.nodes.len(), 13);
        assert_eq!(d.edges.len(), 13);
        assert_eq!(d.clusters.len(), 5);
    }

    #[test]
    fn cluster_nesting() {
        let d = binarysoftwear_diagram().unwrap();
        let names: Vec<&str> = d.clusters.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "AWS Network",
                "Public Subnet(s)",
                "Private Subnet(s)",
                "Web Servers",
                "Database"
            ]
        );

        let parent_name = |i: usize| {
            d.clusters[i]
                .parent
                .map(|p| d.cluster(p).name.as_str())
        };
        assert_eq!(parent_name(0), None);
        assert_eq!(parent_name(1), Some("AWS Network"));
        assert_eq!(parent_name(2), Some("AWS Network"));
        assert_eq!(parent_name(3), Some("Private Subnet(s)"));
        assert_eq!(parent_name(4), Some("Private Subnet(s)"));
    }

    #[test]
    fn node_placement() {
        let d = binarysoftwear_diagram().unwrap();
        let by_id = |id: &str| {
            d.nodes
                .iter()
                .find(|n| n.id == id)
                .unwrap_or_else(|| panic!("missing node {id}"))
        };

        let in_cluster = |id: &str| {
            by_id(id)
                .cluster
                .map(|c| d.cluster(c).name.as_str())
        };
        assert_eq!(in_cluster("users"), None);
        assert_eq!(in_cluster("route_53_dns"), None);
        assert_eq!(in_cluster("bastion_host"), Some("Public Subnet(s)"));
        assert_eq!(in_cluster("nat_gateway"), Some("Public Subnet(s)"));
        assert_eq!(in_cluster("ec2_auto_scaling_instances"), Some("Web Servers"));
        assert_eq!(in_cluster("rds_mysql_primary"), Some("Database"));
        assert_eq!(in_cluster("aws_secrets_manager"), Some("Private Subnet(s)"));
    }

    #[test]
    fn replication_edge() {
        let d = binarysoftwear_diagram().unwrap();
        let edge = d
            .edges
            .iter()
            .find(|e| e.label.as_deref() == Some("Async Replication"))
            .unwrap();
        assert_eq!(d.node(edge.from).id, "rds_mysql_primary");
        assert_eq!(d.node(edge.to).id, "rds_mysql_secondary");
        assert_eq!(edge.penwidth, Some(2.5));
        assert!(!edge.dashed);
    }

    #[test]
    fn ssh_and_nat_edges_are_dashed() {
        let d = binarysoftwear_diagram().unwrap();
        let dashed: Vec<&str> = d
            .edges
            .iter()
            .filter(|e| e.dashed)
            .filter_map(|e| e.label.as_deref())
            .collect();
        assert_eq!(dashed, ["SSH", "SSH", "Internet Access"]);
    }

    #[test]
    fn renders_every_node() {
        let d = binarysoftwear_diagram().unwrap();
        let dot = crate::render::render_dot(&d);
        for node in &d.nodes {
            assert!(
                dot.contains(&format!("\"{}\" [", node.id)),
                "DOT output is missing node {}",
                node.id
            );
        }
        assert!(dot.contains("digraph \"BinarySoftwear Architecture\""));
    }
}
