//! External render engine invocation.
//!
//! Layout and rasterization are delegated to Graphviz: the DOT source is
//! piped to `dot -Tpng` and the engine writes the image itself. Any engine
//! failure (missing binary, bad output path, layout error) surfaces as an
//! error to the caller; nothing is retried.

use anyhow::{Context, bail};
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

/// Rasterize DOT source to a PNG at `out` via the external `dot` engine.
pub fn render_image(dot_source: &str, out: &Path) -> anyhow::Result<()> {
    let mut child = Command::new("dot")
        .arg("-Tpng")
        .arg("-o")
        .arg(out)
        .stdin(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .context("spawn graphviz `dot` (is Graphviz installed and on PATH?)")?;

    {
        let mut stdin = child.stdin.take().context("open stdin of `dot`")?;
        stdin
            .write_all(dot_source.as_bytes())
            .context("feed DOT source to `dot`")?;
        // Dropping stdin closes the pipe so the engine can finish.
    }

    let output = child.wait_with_output().context("wait for `dot`")?;
    if !output.status.success() {
        bail!(
            "dot exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unwritable_output_is_an_error() {
        // Fails whether the engine is installed (nonzero exit on the bad
        // path) or not (spawn failure). Either way the error propagates.
        let result = render_image("digraph {}\n", Path::new("/nonexistent/dir/out.png"));
        assert!(result.is_err());
    }
}
