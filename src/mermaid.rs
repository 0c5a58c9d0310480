//! Hand-authored Mermaid diagram definition and its file emitter.
//!
//! The template is documentation data: a fixed Mermaid `graph TD` block kept
//! verbatim as a module constant. The program never interprets it; it only
//! normalizes whitespace (common-indent removal plus an outer trim) and
//! writes it out. The template's internal correctness is its author's
//! responsibility.
//!
//! Note: the Mermaid text and the programmatic graph in `topology` describe
//! diverging views of the same estate (this one additionally encodes
//! security groups, target groups, the ASG, and the IGW). The divergence is
//! carried as-is rather than reconciled.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Default output file, written to the working directory.
pub const DEFAULT_OUTPUT: &str = "binarysoftwear_architecture.md";

const TEMPLATE: &str = r##"
```mermaid
graph TD
    subgraph UserSpace ["User Space"]
        User[("User / Browser")]:::admin
    end

    subgraph AWSCloud ["AWS Cloud (us-east-1)"]
        direction LR

        Route53[("Route 53<br/>binarysoftwear.com<br/>(aws_route53_zone.main)")]:::dns
        CloudFront[("CloudFront<br/>(d1yi6dtz2qg5ym.cloudfront.net)<br/>(Managed via W3TC)")]:::cdn
        WAFGlobal[("WAF Global<br/>(aws_wafv2_web_acl.cloudfront_waf_acl)<br/>Common, WP-Admin Allow, Rate Limit")]:::sec -- "Protects" --> CloudFront

        subgraph VPC ["VPC (aws_vpc.main: 10.0.0.0/16)"]
            direction TB

            subgraph PublicSubnets ["Public Subnets (AZ-a, AZ-b)"]
                direction TB
                ALB[/"ALB<br/>(aws_lb.main)"/]:::lb
                Bastion[("Bastion Host<br/>(aws_instance.bastion)<br/>t3.micro")]:::compute_mgmt
                NATGW[/"NAT Gateway<br/>(aws_nat_gateway.nat_gw)"/]:::gw
                IGW[/"Internet Gateway<br/>(aws_internet_gateway.igw)"/]:::gw

                ALB -- "HTTPS/80" --> TG[("Target Group<br/>(aws_lb_target_group.main)")]:::tg
                Bastion -- "SSH (TCP/22)" ---> EC2SG[(EC2 SG)]:::sg

                %% Public Subnet Routing: -> IGW
            end

            subgraph PrivateSubnets ["Private Subnets (AZ-a, AZ-b)"]
                direction TB
                ASG["ASG<br/>(aws_autoscaling_group.main)<br/>Min:2, Desired:2, Max:6<br/>(t3.small + Spot)"]:::asg
                EC2Instance["EC2 Instances<br/>(WordPress / PHP 8.2 / Apache)"]:::compute
                RDSSG[(RDS SG)]:::sg --> RDS
                ElastiCacheSG[(ElastiCache SG)]:::sg --> ElastiCache
                EC2SG -- "NFS (TCP/2049)" --> EFS

                subgraph DataStores ["Data Stores & Services"]
                    RDS[("RDS MySQL 8.0<br/>(aws_db_instance.main)<br/>db.t3.small Multi-AZ")]:::db
                    ElastiCache[("ElastiCache Memcached<br/>(aws_elasticache_cluster.memcached)<br/>cache.t3.micro")]:::cache
                    EFS[/"EFS<br/>(aws_efs_file_system.main)<br/>maxIO / Provisioned<br/>(Mounts in Private Subnets)"/]:::storage
                    SecretsManager[("Secrets Manager<br/>(aws_secretsmanager_secret.db_secret)")]:::sec
                end

                %% Private Subnet Routing: -> NATGW
            end

            %% Security Groups & Connections
            ALBSG[(ALB SG)]:::sg --> ALB
            TG -- "Registers Instances" --> ASG
            ASG -- "Launches Instances" --> EC2Instance

            EC2SG[(EC2 SG)]:::sg --> EC2Instance
            EC2Instance -- "MySQL (TCP/3306)" --> RDSSG
            EC2Instance -- "Memcached (TCP/11211)" --> ElastiCacheSG
            EC2Instance -- "Reads Credentials" --> SecretsManager
            EC2Instance -- "Outbound Internet" --> NATGW

        end

        WAFRegional[("WAF Regional<br/>(aws_wafv2_web_acl.waf_acl)<br/>Common Rules")]:::sec -- "Protects" --> ALB

    end

    %% Overall Flow (Reflecting Active CloudFront)
    User --> Route53
    Route53 -- "Alias Record" --> CloudFront
    CloudFront -- "Origin Request" --> ALB
    ALBSG -- "Allow HTTPS/80 from CloudFront IPs (Implicitly via Origin Config)" --x CloudFront %% Simplified view of SG interaction
    ALBSG -- "(Egress Allowed)" --> EC2SG

    %% Bastion Access Flow
    AdminUser[("Admin User")]:::admin --> BastionSG[(Bastion SG)]:::sg
    BastionSG -- "Allow SSH from 0.0.0.0/0" --x Internet[("Internet")]
    BastionSG --> Bastion

    %% Style Definitions
    classDef dns fill:#cff,stroke:#333,stroke-width:2px;
    classDef cdn fill:#ffcc99,stroke:#333,stroke-width:2px;
    classDef lb fill:#f90,stroke:#333,stroke-width:2px;
    classDef tg fill:#ff9,stroke:#333,stroke-width:2px;
    classDef asg fill:#adf,stroke:#333,stroke-width:2px;
    classDef compute fill:#9cf,stroke:#333,stroke-width:2px;
    classDef compute_mgmt fill:#aef,stroke:#333,stroke-width:2px;
    classDef db fill:#f9d,stroke:#333,stroke-width:2px;
    classDef cache fill:#f9f,stroke:#333,stroke-width:2px;
    classDef storage fill:#9fc,stroke:#333,stroke-width:2px;
    classDef gw fill:#ccc,stroke:#333,stroke-width:2px;
    classDef sec fill:#fcc,stroke:#333,stroke-width:2px;
    classDef sg fill:#ddd,stroke:#666,stroke-width:1px,color:#666;
    classDef admin fill:#ffc,stroke:#333,stroke-width:1px;

    %% Note: Diagram reflects active state confirmed by user/docs,
    %% which may differ from Terraform state for Route53/CloudFront enablement
    %% due to external management (e.g., W3 Total Cache plugin).
```
"##;

/// The normalized diagram definition as it is written to disk.
pub fn definition() -> String {
    dedent(TEMPLATE)
}

/// Write the Mermaid definition to `output` (default
/// `binarysoftwear_architecture.md`), overwriting any existing file.
///
/// A write failure is contained here: it is reported on stderr and the
/// function returns normally. Everything else prints the resolved absolute
/// path on success. Single best-effort attempt, no retries.
pub fn generate_diagram_to_file(output: Option<&Path>) {
    let path = output.unwrap_or(Path::new(DEFAULT_OUTPUT));

    match write_definition(path, &definition()) {
        Ok(abs) => println!(
            "Successfully generated Mermaid diagram definition to: {}",
            abs.display()
        ),
        Err(err) => eprintln!(
            "Error writing diagram to file {}: {}",
            path.display(),
            err
        ),
    }
}

/// One write attempt; the file handle is scoped inside `fs::write` and is
/// released on all paths. Returns the absolute path of the written file.
fn write_definition(path: &Path, text: &str) -> io::Result<PathBuf> {
    fs::write(path, text)?;
    fs::canonicalize(path)
}

/// Strip the common leading-whitespace prefix from every non-empty line,
/// then trim leading/trailing whitespace of the whole text. Lets the stored
/// constant be indented in source without corrupting the output.
fn dedent(text: &str) -> String {
    let prefix_len = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start().len())
        .min()
        .unwrap_or(0);

    let mut out = String::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            out.push('\n');
        } else {
            out.push_str(&line[prefix_len..]);
            out.push('\n');
        }
    }
    out.trim().to_string()
}
