use std::path::Path;

use image::{DynamicImage, RgbaImage, imageops::FilterType};

use crate::foundation::{
    core::Size,
    error::{ThumbError, ThumbResult},
};

/// Resampling filter used for every source image.
pub const RESIZE_FILTER: FilterType = FilterType::CatmullRom;

/// Read and decode `path`, normalized to straight RGBA8 at `size`.
pub fn load_source(path: &Path, size: Size) -> ThumbResult<RgbaImage> {
    let bytes = std::fs::read(path).map_err(|e| ThumbError::io(path, e))?;
    decode_source(&bytes, size).map_err(|e| match e {
        ThumbError::Decode { message, .. } => ThumbError::decode(path, message),
        other => other,
    })
}

/// Decode in-memory image bytes (format sniffed from content) and resize to `size`.
pub fn decode_source(bytes: &[u8], size: Size) -> ThumbResult<RgbaImage> {
    let dyn_img =
        image::load_from_memory(bytes).map_err(|e| ThumbError::decode("", e.to_string()))?;
    Ok(resize_exact(dyn_img, size))
}

fn resize_exact(img: DynamicImage, size: Size) -> RgbaImage {
    if img.width() == size.width && img.height() == size.height {
        return img.into_rgba8();
    }
    tracing::debug!(
        from_w = img.width(),
        from_h = img.height(),
        to_w = size.width,
        to_h = size.height,
        "resize source"
    );
    img.resize_exact(size.width, size.height, RESIZE_FILTER)
        .into_rgba8()
}

pub fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
