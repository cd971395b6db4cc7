//! External HTML-to-PDF collaborator.
//!
//! The heavy lifting is delegated to weasyprint, found on PATH. The rendered
//! HTML goes into a temp file; stylesheets are passed through as-is.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{Error, Result};

/// Render HTML to a PDF file with the theme's stylesheets applied.
pub fn html_to_pdf(html: &str, stylesheets: &[PathBuf], output: &Path) -> Result<()> {
    let renderer = which::which("weasyprint").map_err(|_| Error::RendererNotFound)?;

    let mut page = tempfile::Builder::new()
        .prefix("resumy-")
        .suffix(".html")
        .tempfile()?;
    page.write_all(html.as_bytes())?;
    page.flush()?;

    let mut cmd = Command::new(renderer);
    cmd.arg("--media-type").arg("print");
    for stylesheet in stylesheets {
        cmd.arg("--stylesheet").arg(stylesheet);
    }
    cmd.arg(page.path()).arg(output);

    tracing::info!("export to {}", output.display());
    let result = cmd.output()?;
    if !result.status.success() {
        return Err(Error::Render(
            String::from_utf8_lossy(&result.stderr).trim().to_string(),
        ));
    }
    Ok(())
}
