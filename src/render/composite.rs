use image::{RgbImage, RgbaImage};

use crate::{
    assets::decode::premultiply_rgba8_in_place,
    foundation::error::{ThumbError, ThumbResult},
};

pub type PremulRgba8 = [u8; 4];

/// Source-over for one premultiplied pixel.
pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    if src[3] == 0 {
        return dst;
    }
    if src[3] == 255 {
        return src;
    }

    let inv = 255u16 - u16::from(src[3]);
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = src[i].saturating_add(mul_div255(u16::from(dst[i]), inv));
    }
    out
}

/// `dst = src over dst` for two equal-length premultiplied RGBA8 buffers.
pub fn over_in_place(dst: &mut [u8], src: &[u8]) -> ThumbResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(ThumbError::validation(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Premultiplied copy of a straight-alpha image, as a flat buffer.
pub fn premultiplied_bytes(img: &RgbaImage) -> Vec<u8> {
    let mut bytes = img.as_raw().clone();
    premultiply_rgba8_in_place(&mut bytes);
    bytes
}

/// Drop alpha from a premultiplied buffer.
///
/// Premultiplied color is exactly "composited over opaque black", so fully transparent
/// pixels come out black.
pub fn flatten_premul_to_rgb(premul: &[u8], width: u32, height: u32) -> ThumbResult<RgbImage> {
    if premul.len() != width as usize * height as usize * 4 {
        return Err(ThumbError::validation("flatten buffer length mismatch"));
    }
    let rgb: Vec<u8> = premul
        .chunks_exact(4)
        .flat_map(|px| [px[0], px[1], px[2]])
        .collect();
    RgbImage::from_raw(width, height, rgb)
        .ok_or_else(|| ThumbError::validation("flatten buffer length mismatch"))
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
