//! Orchestration: read → strip comments → segment → render.

use relative_path::RelativePath;
use xi_rope::Rope;

use crate::io::{ContentSource, IoError};
use crate::parsing::{comments::strip_comments, segment_document};
use crate::render::{HostBuffer, ImageRasterizer, RenderOutput, RenderSettings, Renderer};

/// Renders markdown text.
///
/// Comment stripping keeps line breaks, so block line ranges (and with them
/// asset names, diagnostics and host-buffer ranges) index the source text.
pub async fn render_markdown(
    text: &str,
    settings: &RenderSettings,
    rasterizer: &dyn ImageRasterizer,
    host: &mut dyn HostBuffer,
) -> RenderOutput {
    let text = if settings.strip_comments {
        strip_comments(text)
    } else {
        text.into()
    };
    let rope = Rope::from(text.as_ref());
    let blocks = segment_document(&rope);
    log::debug!("segmented {} blocks", blocks.len());
    Renderer::new(settings, rasterizer, host).render(&blocks).await
}

/// Reads `path` from `source` and renders it.
pub async fn render_document(
    source: &dyn ContentSource,
    path: &RelativePath,
    settings: &RenderSettings,
    rasterizer: &dyn ImageRasterizer,
    host: &mut dyn HostBuffer,
) -> Result<RenderOutput, IoError> {
    let text = source.read_document(path)?;
    Ok(render_markdown(&text, settings, rasterizer, host).await)
}
