use serde::{Deserialize, Serialize};

/// Colour theme used when rasterizing widgets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn inverted(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// How the table of contents numbers its entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TocStyle {
    #[default]
    Numbered,
    Bulleted,
}

/// Which constructs are rasterized instead of rendered natively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PngConversion {
    /// Rasterize code blocks in natively supported languages too.
    pub code: bool,
    pub table: bool,
    pub math: bool,
    pub callout: bool,
}

impl Default for PngConversion {
    fn default() -> Self {
        Self {
            code: false,
            table: false,
            math: true,
            callout: true,
        }
    }
}

/// Renderer options. Every field has a default so partial config files load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Width rasterized images are resized to; `None` keeps the natural width.
    pub target_width: Option<u32>,
    pub image_scale: f32,
    pub smoothing: bool,
    pub theme: Theme,
    pub general_font: String,
    pub code_font: String,
    /// Use the code language as caption when a fence has none.
    pub caption_from_language: bool,
    pub create_toc: bool,
    pub toc_style: TocStyle,
    pub png: PngConversion,
    /// Render natively when rasterization fails instead of omitting the block.
    pub native_fallback: bool,
    /// Lift a leading H1 (and the heading after it) out as title/subtitle.
    pub extract_title: bool,
    pub ignore_leading_breaks: bool,
    pub strip_comments: bool,
    /// Directory component of generated asset paths.
    pub asset_directory: String,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            target_width: None,
            image_scale: 4.0,
            smoothing: true,
            theme: Theme::Light,
            general_font: "sans-serif".to_string(),
            code_font: "Lucida Console".to_string(),
            caption_from_language: false,
            create_toc: true,
            toc_style: TocStyle::Numbered,
            png: PngConversion::default(),
            native_fallback: true,
            extract_title: true,
            ignore_leading_breaks: true,
            strip_comments: true,
            asset_directory: "assets".to_string(),
        }
    }
}
