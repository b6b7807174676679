use std::path::{Path, PathBuf};

use image::{RgbImage, RgbaImage};

use crate::{
    assets::{
        decode::{RESIZE_FILTER, decode_source, load_source},
        font::{TextBlock, TextLayoutEngine},
    },
    diagnostics::{DiagnosticSink, NoopSink},
    encode::jpeg::write_jpeg,
    foundation::error::{ThumbError, ThumbResult},
    render::{
        composite::{flatten_premul_to_rgb, over_in_place, premultiplied_bytes},
        config::{MIN_FONT_SIZE_PX, OverflowPolicy, RenderConfig},
        layout::{CaptionLayout, TextExtent},
        mask::{apply_alpha_mask, rounded_mask},
        overlay::{OverlayParams, caption_box_image, draw_overlay},
    },
};

/// Factor applied to both font sizes per shrink-to-fit step.
const SHRINK_STEP: f32 = 0.9;

/// A finished thumbnail, still in memory.
#[derive(Debug, Clone)]
pub struct Thumbnail {
    pub image: RgbImage,
    pub layout: CaptionLayout,
    /// Font sizes actually used, after any shrink-to-fit.
    pub title_font_size: f32,
    pub subtitle_font_size: f32,
    pub caption_box: Option<RgbaImage>,
}

/// Result of rendering one source file.
#[derive(Debug)]
pub enum RenderOutcome {
    Written { source: PathBuf, output: PathBuf },
    Failed { source: PathBuf, error: ThumbError },
}

impl RenderOutcome {
    pub fn source(&self) -> &Path {
        match self {
            Self::Written { source, .. } | Self::Failed { source, .. } => source,
        }
    }

    pub fn is_written(&self) -> bool {
        matches!(self, Self::Written { .. })
    }

    pub fn output(&self) -> Option<&Path> {
        match self {
            Self::Written { output, .. } => Some(output),
            Self::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&ThumbError> {
        match self {
            Self::Written { .. } => None,
            Self::Failed { error, .. } => Some(error),
        }
    }
}

/// Turns one source image plus a title/subtitle pair into one thumbnail.
pub struct Compositor {
    config: RenderConfig,
    sink: Box<dyn DiagnosticSink>,
}

impl Compositor {
    pub fn new(config: RenderConfig) -> ThumbResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            sink: Box::new(NoopSink),
        })
    }

    pub fn with_sink(mut self, sink: impl DiagnosticSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    pub fn set_sink(&mut self, sink: Box<dyn DiagnosticSink>) {
        self.sink = sink;
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Render `source` to `output`, logging the result. Never fails the caller.
    #[tracing::instrument(level = "debug", skip_all, fields(source = %source.display()))]
    pub fn render(
        &mut self,
        source: &Path,
        output: &Path,
        title: &str,
        subtitle: &str,
    ) -> RenderOutcome {
        match self.try_render(source, output, title, subtitle) {
            Ok(()) => {
                tracing::info!("thumbnail saved to {}", output.display());
                RenderOutcome::Written {
                    source: source.to_path_buf(),
                    output: output.to_path_buf(),
                }
            }
            Err(error) => {
                tracing::error!("error processing {}: {error}", source.display());
                RenderOutcome::Failed {
                    source: source.to_path_buf(),
                    error,
                }
            }
        }
    }

    /// Fallible core of [`Compositor::render`]. Writes nothing on error.
    pub fn try_render(
        &mut self,
        source: &Path,
        output: &Path,
        title: &str,
        subtitle: &str,
    ) -> ThumbResult<()> {
        let base = load_source(source, self.config.image_size)?;
        let mut engine = TextLayoutEngine::from_path(&self.config.font_path)?;
        let thumb = self.compose_image(base, &mut engine, title, subtitle)?;

        write_jpeg(output, &thumb.image, self.config.jpeg_quality)?;

        if let Some(caption_box) = &thumb.caption_box
            && let Err(e) = self.sink.caption_box(caption_box)
        {
            tracing::warn!("diagnostic sink rejected caption box: {e}");
        }
        Ok(())
    }

    /// In-memory pipeline over encoded image bytes.
    pub fn compose(
        &self,
        image_bytes: &[u8],
        engine: &mut TextLayoutEngine,
        title: &str,
        subtitle: &str,
    ) -> ThumbResult<Thumbnail> {
        let base = decode_source(image_bytes, self.config.image_size)?;
        self.compose_image(base, engine, title, subtitle)
    }

    /// Mask, caption and flatten an already decoded image.
    pub fn compose_image(
        &self,
        mut base: RgbaImage,
        engine: &mut TextLayoutEngine,
        title: &str,
        subtitle: &str,
    ) -> ThumbResult<Thumbnail> {
        let cfg = &self.config;
        let size = cfg.image_size;
        if base.dimensions() != (size.width, size.height) {
            base = image::imageops::resize(&base, size.width, size.height, RESIZE_FILTER);
        }

        let mask = rounded_mask(size, cfg.corner_radius)?;
        apply_alpha_mask(&mut base, &mask)?;

        let (title_block, subtitle_block, layout) = self.fit_caption(engine, title, subtitle)?;

        let font = engine.cpu_font();
        let overlay = draw_overlay(&OverlayParams {
            size,
            layout: &layout,
            title: &title_block,
            subtitle: &subtitle_block,
            font: &font,
            caption: &cfg.caption,
            brackets: &cfg.brackets,
        })?;

        let mut pixels = premultiplied_bytes(&base);
        over_in_place(&mut pixels, &overlay)?;
        let image = flatten_premul_to_rgb(&pixels, size.width, size.height)?;

        Ok(Thumbnail {
            image,
            layout,
            title_font_size: title_block.font_size,
            subtitle_font_size: subtitle_block.font_size,
            caption_box: caption_box_image(&layout, &cfg.caption),
        })
    }

    fn fit_caption(
        &self,
        engine: &mut TextLayoutEngine,
        title: &str,
        subtitle: &str,
    ) -> ThumbResult<(TextBlock, TextBlock, CaptionLayout)> {
        let cfg = &self.config;
        let mut scale = 1.0f32;
        loop {
            let title_size = (cfg.title_font_size * scale).max(MIN_FONT_SIZE_PX);
            let subtitle_size = (cfg.subtitle_font_size * scale).max(MIN_FONT_SIZE_PX);

            let t = engine.layout(title, title_size, cfg.text_color, cfg.stroke_width)?;
            let s = engine.layout(subtitle, subtitle_size, cfg.text_color, cfg.stroke_width)?;
            let layout = CaptionLayout::compute(
                cfg.image_size,
                extent(&t),
                extent(&s),
                &cfg.caption,
                &cfg.brackets,
            );

            if layout.fits(cfg.image_size) {
                return Ok((t, s, layout));
            }

            let exhausted = title_size.min(subtitle_size) <= MIN_FONT_SIZE_PX;
            if cfg.overflow == OverflowPolicy::Clip || exhausted {
                tracing::warn!(
                    box_x = layout.box_rect.x0,
                    box_y = layout.box_rect.y0,
                    box_w = layout.box_rect.width(),
                    box_h = layout.box_rect.height(),
                    "caption does not fit the image and will be clipped"
                );
                return Ok((t, s, layout));
            }

            scale *= SHRINK_STEP;
            tracing::debug!(scale, "caption overflows, shrinking text");
        }
    }
}

fn extent(block: &TextBlock) -> TextExtent {
    TextExtent {
        width: block.width(),
        height: block.height(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
