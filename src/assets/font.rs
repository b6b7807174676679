use std::{path::Path, sync::Arc};

use crate::foundation::{
    core::Rgba8,
    error::{ThumbError, ThumbResult},
};

/// A shaped single-paragraph text run plus the stroke it will be drawn with.
#[derive(Clone)]
pub struct TextBlock {
    pub layout: Arc<parley::Layout<Rgba8>>,
    pub font_size: f32,
    pub stroke_width: f32,
}

impl std::fmt::Debug for TextBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextBlock")
            .field("font_size", &self.font_size)
            .field("stroke_width", &self.stroke_width)
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

impl TextBlock {
    /// Rendered width, including the stroke on both sides.
    pub fn width(&self) -> u32 {
        (f64::from(self.layout.width()) + 2.0 * f64::from(self.stroke_width)).ceil() as u32
    }

    /// Rendered height, including the stroke above and below.
    pub fn height(&self) -> u32 {
        (f64::from(self.layout.height()) + 2.0 * f64::from(self.stroke_width)).ceil() as u32
    }
}

/// Builds Parley layouts against a single registered font.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<Rgba8>,
    font_bytes: Arc<Vec<u8>>,
    family_name: String,
}

impl TextLayoutEngine {
    pub fn from_path(path: &Path) -> ThumbResult<Self> {
        let bytes = std::fs::read(path).map_err(|e| ThumbError::io(path, e))?;
        Self::from_font_bytes(bytes)
    }

    /// Register `font_bytes` and resolve its primary family.
    pub fn from_font_bytes(font_bytes: Vec<u8>) -> ThumbResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.clone()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| ThumbError::font("no font families registered from font bytes"))?;

        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| ThumbError::font("registered font family has no name"))?
            .to_string();

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            font_bytes: Arc::new(font_bytes),
            family_name,
        })
    }

    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    pub fn font_bytes(&self) -> &[u8] {
        self.font_bytes.as_slice()
    }

    pub(crate) fn cpu_font(&self) -> vello_cpu::peniko::FontData {
        vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(self.font_bytes.as_ref().clone()),
            0,
        )
    }

    /// Shape `text` on one line at `size_px`.
    pub fn layout(
        &mut self,
        text: &str,
        size_px: f32,
        color: Rgba8,
        stroke_width: f32,
    ) -> ThumbResult<TextBlock> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(ThumbError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(color));

        let mut layout: parley::Layout<Rgba8> = builder.build(text);
        layout.break_all_lines(None);

        Ok(TextBlock {
            layout: Arc::new(layout),
            font_size: size_px,
            stroke_width,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/font.rs"]
mod tests;
