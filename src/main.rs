use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

mod graph;
mod mermaid;
mod render;
mod topology;

pub type Result<T> = anyhow::Result<T>;

#[derive(Parser)]
#[command(name = "archdoc")]
#[command(about = "BinarySoftwear architecture documentation generator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the architecture graph (PNG via Graphviz, or DOT/JSON text).
    Graph {
        /// Output format: png, dot, or json.
        #[arg(long, default_value = "png")]
        format: String,

        /// Output path. Defaults to "<diagram title>.png" for png, stdout
        /// for the text formats.
        #[arg(short = 'o', long)]
        out: Option<PathBuf>,
    },

    /// Write the hand-authored Mermaid diagram definition to a file.
    Mermaid {
        /// Output path. Defaults to binarysoftwear_architecture.md.
        #[arg(short = 'o', long)]
        out: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.cmd {
        Commands::Graph { format, out } => {
            // 1) Assemble the hardcoded topology (validated by the builder).
            let diagram = topology::binarysoftwear_diagram()?;

            // 2) Hand it to the chosen backend. Engine failures propagate
            //    and abort with the engine's diagnostic.
            match format.as_str() {
                "png" => {
                    let out =
                        out.unwrap_or_else(|| PathBuf::from(format!("{}.png", diagram.title)));
                    let dot = render::render_dot(&diagram);
                    render::render_image(&dot, &out)?;
                    println!("Wrote {}", out.display());
                }
                "dot" => emit_text(out.as_deref(), &render::render_dot(&diagram))?,
                "json" => emit_text(out.as_deref(), &render::render_json(&diagram)?)?,
                other => bail!("unknown format: {} (expected png, dot, or json)", other),
            }
        }
        Commands::Mermaid { out } => {
            mermaid::generate_diagram_to_file(out.as_deref());
        }
    }

    Ok(())
}

fn emit_text(out: Option<&Path>, text: &str) -> Result<()> {
    match out {
        Some(path) => {
            std::fs::write(path, text).with_context(|| format!("write {}", path.display()))?;
            println!("Wrote {}", path.display());
        }
        None => print!("{text}"),
    }
    Ok(())
}
