use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::{
    core::{Rgba8, Size},
    error::{ThumbError, ThumbResult},
};

/// Smallest font size the shrink-to-fit policy will go down to.
pub const MIN_FONT_SIZE_PX: f32 = 8.0;

/// What to do when the caption box does not fit inside the image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverflowPolicy {
    /// Scale both font sizes down until the box and its brackets fit.
    #[default]
    ShrinkToFit,
    /// Draw at the configured sizes and let the canvas clip.
    Clip,
}

/// How output file names are derived from source file names.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputNaming {
    /// `thumbnail_<name>` with the source extension kept, even though the bytes are JPEG.
    #[default]
    PreserveExtension,
    /// `thumbnail_<stem>.jpg`.
    JpgExtension,
}

/// Caption box geometry, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CaptionStyle {
    /// Horizontal padding on each side of the widest line, and vertical padding above and below.
    pub padding: u32,
    /// Extra box height on top of both text heights and padding.
    pub line_spacing: u32,
    /// Gap between the bottom of the title and the top of the subtitle.
    pub title_gap: u32,
    /// Distance between the bottom of the box and the bottom of the image.
    pub bottom_offset: u32,
    /// Box fill.
    pub box_color: Rgba8,
}

impl Default for CaptionStyle {
    fn default() -> Self {
        Self {
            padding: 20,
            line_spacing: 50,
            title_gap: 30,
            bottom_offset: 160,
            box_color: Rgba8::new(0, 0, 0, 238),
        }
    }
}

/// The four L-shaped corner decorations around the caption box.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BracketStyle {
    pub length: u32,
    pub thickness: u32,
    /// How far outside the box corners the brackets start. Unset follows `caption.padding`.
    pub offset: Option<u32>,
    pub color: Rgba8,
}

impl Default for BracketStyle {
    fn default() -> Self {
        Self {
            length: 90,
            thickness: 7,
            offset: None,
            color: Rgba8::BLACK,
        }
    }
}

impl BracketStyle {
    pub fn resolved_offset(&self, caption: &CaptionStyle) -> u32 {
        self.offset.unwrap_or(caption.padding)
    }
}

/// Immutable settings shared by the compositor and the batch driver.
///
/// Every field has a default, so a JSON config file only needs the keys it overrides.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub output_dir: PathBuf,
    pub font_path: PathBuf,
    pub title_font_size: f32,
    pub subtitle_font_size: f32,
    pub text_color: Rgba8,
    /// Outward stroke radius applied to every glyph.
    pub stroke_width: f32,
    pub corner_radius: f64,
    pub image_size: Size,
    pub caption: CaptionStyle,
    pub brackets: BracketStyle,
    pub jpeg_quality: u8,
    pub overflow: OverflowPolicy,
    pub output_naming: OutputNaming,
    /// Accepted file name suffixes, without the dot. Matching is case-sensitive.
    pub extensions: Vec<String>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("./finished_material/40K_thumbnails"),
            font_path: PathBuf::from("./fonts/Roboto-Thin.ttf"),
            title_font_size: 110.0,
            subtitle_font_size: 100.0,
            text_color: Rgba8::WHITE,
            stroke_width: 2.0,
            corner_radius: 50.0,
            image_size: Size {
                width: 1280,
                height: 720,
            },
            caption: CaptionStyle::default(),
            brackets: BracketStyle::default(),
            jpeg_quality: 75,
            overflow: OverflowPolicy::default(),
            output_naming: OutputNaming::default(),
            extensions: vec!["png".to_string(), "jpg".to_string(), "jpeg".to_string()],
        }
    }
}

impl RenderConfig {
    /// Load a JSON config; keys that are absent keep their defaults.
    pub fn from_path(path: impl AsRef<Path>) -> ThumbResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ThumbError::io(path, e))?;
        let cfg: Self = serde_json::from_str(&text)
            .with_context(|| format!("parse render config '{}'", path.display()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> ThumbResult<()> {
        for (name, size) in [
            ("title_font_size", self.title_font_size),
            ("subtitle_font_size", self.subtitle_font_size),
        ] {
            if !size.is_finite() || size <= 0.0 {
                return Err(ThumbError::validation(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }
        if !self.stroke_width.is_finite() || self.stroke_width < 0.0 {
            return Err(ThumbError::validation(
                "stroke_width must be finite and >= 0",
            ));
        }
        if !self.corner_radius.is_finite() || self.corner_radius < 0.0 {
            return Err(ThumbError::validation(
                "corner_radius must be finite and >= 0",
            ));
        }
        Size::new(self.image_size.width, self.image_size.height)?;
        self.image_size.as_u16()?;
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(ThumbError::validation("jpeg_quality must be in 1..=100"));
        }
        if self.extensions.is_empty() || self.extensions.iter().any(|e| e.is_empty()) {
            return Err(ThumbError::validation(
                "extensions must be a non-empty list of non-empty suffixes",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/config.rs"]
mod tests;
