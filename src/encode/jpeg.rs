use std::path::Path;

use image::{RgbImage, codecs::jpeg::JpegEncoder};

use crate::foundation::error::{ThumbError, ThumbResult};

pub fn ensure_parent_dir(path: &Path) -> ThumbResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| ThumbError::io(parent, e))?;
    }
    Ok(())
}

/// Baseline JPEG bytes for `img`. Deterministic for identical input.
pub fn encode_jpeg(img: &RgbImage, quality: u8) -> ThumbResult<Vec<u8>> {
    let mut buf = Vec::new();
    {
        let mut encoder = JpegEncoder::new_with_quality(&mut buf, quality);
        encoder
            .encode_image(img)
            .map_err(|e| ThumbError::encode(e.to_string()))?;
    }
    Ok(buf)
}

/// Encode and write `img` to `path`, whatever extension `path` carries.
pub fn write_jpeg(path: &Path, img: &RgbImage, quality: u8) -> ThumbResult<()> {
    let bytes = encode_jpeg(img, quality)?;
    ensure_parent_dir(path)?;
    std::fs::write(path, bytes).map_err(|e| ThumbError::io(path, e))
}

#[cfg(test)]
#[path = "../../tests/unit/encode/jpeg.rs"]
mod tests;
