//! Capture adapters: turn host-session state (the current plot, a set of
//! in-memory values, a math-markup string) into file payloads ready for
//! dispatch.
//!
//! The plotting subsystem and the formula renderer live outside this crate,
//! so they are modeled as traits and mocked in tests. Each capture writes a
//! fresh uuid-named file under the system temp dir; deleting it after
//! dispatch is the caller's responsibility.

use std::path::{Path, PathBuf};

#[cfg(any(test, feature = "test-export-mocks"))]
use mockall::automock;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::payload::Payload;

/// Default resolution for rendered formula images.
pub const FORMULA_DPI: u32 = 300;

/// Seam to the host's plotting subsystem.
///
/// "Plot" is the pixel-based device currently on screen; "structured plot"
/// is the higher-level declarative plot object, which some hosts track
/// separately. Either may be absent.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
pub trait PlotHost: Send + Sync {
    /// Pixel dimensions of the currently displayed plot, if any.
    fn current_plot_size(&self) -> Option<(u32, u32)>;

    /// Rasterize the current plot to `path` at the given dimensions.
    fn save_current_plot(&self, path: &Path, width: u32, height: u32) -> std::io::Result<()>;

    /// Pixel dimensions of the current structured plot object, if any.
    fn current_structured_plot_size(&self) -> Option<(u32, u32)>;

    /// Render the current structured plot object to `path`.
    fn save_current_structured_plot(
        &self,
        path: &Path,
        width: u32,
        height: u32,
    ) -> std::io::Result<()>;
}

/// Seam to an external formula-rendering capability (math markup in, image
/// file out).
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
pub trait FormulaRenderer: Send + Sync {
    fn render(&self, markup: &str, dpi: u32, path: &Path) -> std::io::Result<()>;
}

fn temp_capture_path(prefix: &str, extension: &str) -> PathBuf {
    std::env::temp_dir().join(format!("{prefix}_{}.{extension}", Uuid::new_v4()))
}

/// Snapshot the currently displayed plot to a PNG at its on-screen
/// dimensions. Fails with [`Error::NoPlotAvailable`] if the host has no
/// plot up.
pub fn capture_current_plot(host: &dyn PlotHost) -> Result<Payload> {
    let (width, height) = host.current_plot_size().ok_or(Error::NoPlotAvailable)?;
    let path = temp_capture_path("plot", "png");
    host.save_current_plot(&path, width, height)?;
    info!(path = %path.display(), width, height, "captured current plot");
    Ok(Payload::File(path))
}

/// Like [`capture_current_plot`], for the structured plot object.
pub fn capture_current_structured_plot(host: &dyn PlotHost) -> Result<Payload> {
    let (width, height) = host
        .current_structured_plot_size()
        .ok_or(Error::NoPlotAvailable)?;
    let path = temp_capture_path("plot", "png");
    host.save_current_structured_plot(&path, width, height)?;
    info!(path = %path.display(), width, height, "captured structured plot");
    Ok(Payload::File(path))
}

/// Serialize named values to a portable JSON archive file.
///
/// An empty value list is a soft no-op: a notice is logged and `Ok(None)`
/// returned, mirroring the dispatcher's empty-text behavior.
pub fn serialize_values(values: &[(String, serde_json::Value)]) -> Result<Option<Payload>> {
    if values.is_empty() {
        warn!("no values provided, nothing archived");
        return Ok(None);
    }

    let mut archive = serde_json::Map::new();
    for (name, value) in values {
        archive.insert(name.clone(), value.clone());
    }

    let path = temp_capture_path("values", "json");
    let file = std::fs::File::create(&path)?;
    serde_json::to_writer_pretty(file, &archive)?;
    info!(path = %path.display(), count = values.len(), "archived values");
    Ok(Some(Payload::File(path)))
}

/// Render math markup to a PNG at [`FORMULA_DPI`]. Fails with
/// [`Error::EmptyInput`] on empty markup.
pub fn render_formula(renderer: &dyn FormulaRenderer, markup: &str) -> Result<Payload> {
    if markup.is_empty() {
        return Err(Error::EmptyInput);
    }

    let path = temp_capture_path("formula", "png");
    renderer.render(markup, FORMULA_DPI, &path)?;
    info!(path = %path.display(), markup_len = markup.len(), "rendered formula");
    Ok(Payload::File(path))
}
