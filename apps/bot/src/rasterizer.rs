//! # Rasterizer
//!
//! Turns the layout engine's HTML into PDF bytes with a headless browser.
//!
//! ## Render Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Chromium Render Pipeline                            │
//! │                                                                         │
//! │  HTML string                                                            │
//! │      │                                                                  │
//! │      ▼ write                                                            │
//! │  <scratch dir>/page.html                                                │
//! │      │                                                                  │
//! │      ▼ spawn                                                            │
//! │  chromium --headless=new --no-pdf-header-footer                        │
//! │           --print-to-pdf=<scratch dir>/out.pdf page.html               │
//! │      │                                                                  │
//! │      ▼ read                                                             │
//! │  PDF bytes (scratch dir dropped afterwards)                             │
//! │                                                                         │
//! │  The print stylesheet drives the page geometry; the browser is only    │
//! │  trusted to honor @page and the grid layout.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The trait exists so the service layer can render through a mock in
//! tests; only [`ChromiumRasterizer`] ever spawns a process.

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

/// PDF rendering errors.
#[derive(Debug, Error)]
pub enum RasterizerError {
    /// The browser binary could not be spawned.
    ///
    /// ## When This Occurs
    /// - Chromium is not installed or not on PATH
    /// - `TAGPRESS_CHROMIUM` points at a missing binary
    #[error("Failed to launch renderer '{binary}': {source}")]
    Launch {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    /// The browser exited unsuccessfully.
    #[error("Renderer exited with {status}: {stderr}")]
    RenderFailed { status: String, stderr: String },

    /// Scratch-file I/O around the render failed.
    #[error("Renderer scratch I/O failed: {0}")]
    ScratchIo(#[from] std::io::Error),

    /// The browser exited cleanly but produced no usable output.
    #[error("Renderer produced an empty document")]
    EmptyOutput,
}

/// Renders an HTML document to PDF bytes.
#[async_trait]
pub trait Rasterizer: Send + Sync {
    async fn render_pdf(&self, html: &str) -> Result<Vec<u8>, RasterizerError>;
}

/// [`Rasterizer`] backed by a headless Chromium invocation per document.
///
/// One short-lived process per render: no browser state survives between
/// documents, and a wedged render can be cancelled by dropping the future.
pub struct ChromiumRasterizer {
    binary: String,
}

impl ChromiumRasterizer {
    /// Uses the `TAGPRESS_CHROMIUM` environment variable when set,
    /// otherwise expects `chromium` on PATH.
    pub fn new() -> Self {
        ChromiumRasterizer {
            binary: std::env::var("TAGPRESS_CHROMIUM").unwrap_or_else(|_| "chromium".to_string()),
        }
    }

    /// Uses an explicit browser binary.
    pub fn with_binary(binary: impl Into<String>) -> Self {
        ChromiumRasterizer {
            binary: binary.into(),
        }
    }
}

impl Default for ChromiumRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Rasterizer for ChromiumRasterizer {
    async fn render_pdf(&self, html: &str) -> Result<Vec<u8>, RasterizerError> {
        let scratch = tempfile::tempdir()?;
        let page_path = scratch.path().join("page.html");
        let pdf_path = scratch.path().join("out.pdf");

        tokio::fs::write(&page_path, html).await?;

        debug!(binary = %self.binary, "Spawning renderer");
        let output = tokio::process::Command::new(&self.binary)
            .arg("--headless=new")
            .arg("--disable-gpu")
            .arg("--no-sandbox")
            .arg("--no-pdf-header-footer")
            .arg(format!("--print-to-pdf={}", pdf_path.display()))
            .arg(&page_path)
            .output()
            .await
            .map_err(|source| RasterizerError::Launch {
                binary: self.binary.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(RasterizerError::RenderFailed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        let bytes = tokio::fs::read(&pdf_path).await?;
        if bytes.is_empty() {
            return Err(RasterizerError::EmptyOutput);
        }

        debug!(size = bytes.len(), "Render complete");
        Ok(bytes)
    }
}
