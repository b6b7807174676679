use image::RgbaImage;

use crate::{
    assets::font::TextBlock,
    foundation::{
        core::{Point, Rgba8, Size, rect_to_cpu},
        error::ThumbResult,
    },
    render::{
        config::{BracketStyle, CaptionStyle},
        layout::CaptionLayout,
    },
};

/// Inputs for one caption overlay.
pub struct OverlayParams<'a> {
    pub size: Size,
    pub layout: &'a CaptionLayout,
    pub title: &'a TextBlock,
    pub subtitle: &'a TextBlock,
    pub font: &'a vello_cpu::peniko::FontData,
    pub caption: &'a CaptionStyle,
    pub brackets: &'a BracketStyle,
}

/// Paint box, title, subtitle and brackets onto a transparent canvas.
///
/// Returns premultiplied RGBA8 bytes, row-major, `size.width * size.height * 4` long.
pub fn draw_overlay(params: &OverlayParams<'_>) -> ThumbResult<Vec<u8>> {
    let (w, h) = params.size.as_u16()?;
    let mut ctx = vello_cpu::RenderContext::new(w, h);

    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint(params.caption.box_color.to_cpu_color());
    ctx.fill_rect(&rect_to_cpu(params.layout.box_rect));

    draw_text(&mut ctx, params.font, params.title, params.layout.title_origin);
    draw_text(&mut ctx, params.font, params.subtitle, params.layout.subtitle_origin);

    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint(params.brackets.color.to_cpu_color());
    for arm in &params.layout.brackets {
        ctx.fill_rect(&rect_to_cpu(*arm));
    }

    ctx.flush();
    let mut pixmap = vello_cpu::Pixmap::new(w, h);
    ctx.render_to_pixmap(&mut pixmap);
    Ok(pixmap.data_as_u8_slice().to_vec())
}

/// The caption box on its own, for diagnostics. `None` when the box is empty.
pub fn caption_box_image(layout: &CaptionLayout, caption: &CaptionStyle) -> Option<RgbaImage> {
    let (bw, bh) = layout.box_size();
    if bw == 0 || bh == 0 {
        return None;
    }
    Some(RgbaImage::from_pixel(bw, bh, caption.box_color.into()))
}

fn draw_text(
    ctx: &mut vello_cpu::RenderContext,
    font: &vello_cpu::peniko::FontData,
    text: &TextBlock,
    origin: Point,
) {
    // Glyphs are positioned inside the measured extent, which already reserves the stroke.
    let inset = f64::from(text.stroke_width);
    ctx.set_transform(vello_cpu::kurbo::Affine::translate((
        origin.x + inset,
        origin.y + inset,
    )));

    for line in text.layout.lines() {
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };

            let brush = run.style().brush;
            ctx.set_paint(brush.to_cpu_color());

            let font_size = run.run().font_size();
            ctx.glyph_run(font).font_size(font_size).fill_glyphs(cpu_glyphs(&run));
            if text.stroke_width > 0.0 {
                ctx.set_stroke(vello_cpu::kurbo::Stroke::new(
                    2.0 * f64::from(text.stroke_width),
                ));
                ctx.glyph_run(font)
                    .font_size(font_size)
                    .stroke_glyphs(cpu_glyphs(&run));
            }
        }
    }
}

fn cpu_glyphs<'a>(
    run: &'a parley::layout::GlyphRun<'a, Rgba8>,
) -> impl Iterator<Item = vello_cpu::Glyph> + 'a {
    run.positioned_glyphs().map(|g| vello_cpu::Glyph {
        id: g.id,
        x: g.x,
        y: g.y,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/overlay.rs"]
mod tests;
