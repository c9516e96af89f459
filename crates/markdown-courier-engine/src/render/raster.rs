//! Collaborators consulted when a block is rasterized instead of rendered
//! natively: the image rasterizer and the host editor buffer it captures from.
//!
//! Both are `?Send`: a render awaits one rasterization at a time and the
//! host buffer is a single shared resource.

use async_trait::async_trait;
use thiserror::Error;

use super::element::Element;
use super::settings::Theme;

#[derive(Error, Debug)]
pub enum RasterError {
    #[error("no rasterizer is available")]
    Unavailable,

    #[error("rasterizing {path} failed: {reason}")]
    Failed { path: String, reason: String },

    #[error("writing asset {path}: {source}")]
    Asset {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Everything the rasterizer needs besides the element itself.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterRequest {
    /// Widget kind: `code`, `table`, `math` or `callout`.
    pub kind: &'static str,
    /// Where the image is persisted, e.g. `/assets/code-widget-3-9.png`.
    pub asset_path: String,
    pub target_width: Option<u32>,
    pub scale: f32,
    pub smoothing: bool,
    pub theme: Theme,
    pub general_font: String,
    pub code_font: String,
    /// Markdown staged in the host buffer while the capture runs.
    pub excerpt: String,
}

/// Measured size of a persisted image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RasterizedImage {
    pub width: u32,
    pub height: u32,
}

#[async_trait(?Send)]
pub trait ImageRasterizer {
    /// Renders `element` to the request's asset path.
    async fn render_to_image(
        &self,
        element: &Element,
        request: &RasterRequest,
    ) -> Result<RasterizedImage, RasterError>;
}

/// The host editor buffer a capture is staged in.
#[async_trait(?Send)]
pub trait HostBuffer {
    fn buffer_content(&self) -> String;

    fn set_buffer_content(&mut self, text: &str);

    /// Resolves once the host has re-laid out the buffer.
    async fn refresh(&mut self);

    /// Source lines `start..=end`, newline-joined.
    fn get_range(&self, start: usize, end: usize) -> String;
}

/// Rasterizer for environments without one; every request fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoRasterizer;

#[async_trait(?Send)]
impl ImageRasterizer for NoRasterizer {
    async fn render_to_image(
        &self,
        _element: &Element,
        _request: &RasterRequest,
    ) -> Result<RasterizedImage, RasterError> {
        Err(RasterError::Unavailable)
    }
}

/// In-memory host buffer holding the document text.
#[derive(Debug, Default, Clone)]
pub struct MemoryBuffer {
    content: String,
    refreshes: usize,
}

impl MemoryBuffer {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            refreshes: 0,
        }
    }

    pub fn refreshes(&self) -> usize {
        self.refreshes
    }
}

#[async_trait(?Send)]
impl HostBuffer for MemoryBuffer {
    fn buffer_content(&self) -> String {
        self.content.clone()
    }

    fn set_buffer_content(&mut self, text: &str) {
        self.content = text.to_string();
    }

    async fn refresh(&mut self) {
        self.refreshes += 1;
    }

    fn get_range(&self, start: usize, end: usize) -> String {
        self.content
            .lines()
            .skip(start)
            .take(end.saturating_sub(start) + 1)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    #[test]
    fn memory_buffer_ranges_are_inclusive() {
        let buf = MemoryBuffer::new("a\nb\nc\nd");
        assert_eq!(buf.get_range(1, 2), "b\nc");
        assert_eq!(buf.get_range(3, 9), "d");
        assert_eq!(buf.get_range(7, 9), "");
    }

    #[test]
    fn refresh_is_counted() {
        let mut buf = MemoryBuffer::new("x");
        buf.set_buffer_content("y");
        block_on(buf.refresh());
        assert_eq!(buf.buffer_content(), "y");
        assert_eq!(buf.refreshes(), 1);
    }

    #[test]
    fn no_rasterizer_is_unavailable() {
        let req = RasterRequest {
            kind: "math",
            asset_path: "/assets/math-widget-0-0.png".into(),
            target_width: None,
            scale: 1.0,
            smoothing: false,
            theme: Theme::Light,
            general_font: String::new(),
            code_font: String::new(),
            excerpt: String::new(),
        };
        let err = block_on(NoRasterizer.render_to_image(&Element::new("pre"), &req));
        assert!(matches!(err, Err(RasterError::Unavailable)));
    }
}
