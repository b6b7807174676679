use image::{GrayImage, RgbaImage};
use vello_cpu::kurbo::Shape as _;

use crate::foundation::{
    core::Size,
    error::{ThumbError, ThumbResult},
};

/// Curve flattening tolerance for the rounded corners, in pixels.
const TOLERANCE: f64 = 0.1;

/// Single-channel coverage of a rounded rectangle spanning the whole `size`.
///
/// 255 inside, 0 outside, anti-aliased along the corner arcs.
pub fn rounded_mask(size: Size, radius: f64) -> ThumbResult<GrayImage> {
    let (w, h) = size.as_u16()?;
    if radius <= 0.0 {
        return Ok(GrayImage::from_pixel(size.width, size.height, image::Luma([255])));
    }
    let shape = vello_cpu::kurbo::RoundedRect::new(
        0.0,
        0.0,
        f64::from(size.width),
        f64::from(size.height),
        radius,
    );

    let mut ctx = vello_cpu::RenderContext::new(w, h);
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 255, 255, 255));
    ctx.fill_path(&shape.to_path(TOLERANCE));
    ctx.flush();

    let mut pixmap = vello_cpu::Pixmap::new(w, h);
    ctx.render_to_pixmap(&mut pixmap);

    let coverage: Vec<u8> = pixmap
        .data_as_u8_slice()
        .chunks_exact(4)
        .map(|px| px[3])
        .collect();
    GrayImage::from_raw(size.width, size.height, coverage)
        .ok_or_else(|| ThumbError::validation("mask buffer length mismatch"))
}

/// Replace the alpha channel of `img` with `mask`.
pub fn apply_alpha_mask(img: &mut RgbaImage, mask: &GrayImage) -> ThumbResult<()> {
    if img.dimensions() != mask.dimensions() {
        return Err(ThumbError::validation(format!(
            "mask is {:?} but image is {:?}",
            mask.dimensions(),
            img.dimensions()
        )));
    }
    for (px, m) in img.pixels_mut().zip(mask.pixels()) {
        px.0[3] = m.0[0];
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/mask.rs"]
mod tests;
