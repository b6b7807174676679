use std::path::{Path, PathBuf};

use image::RgbaImage;

use crate::foundation::error::{ThumbError, ThumbResult};

/// Receives intermediate artifacts of a render for visual debugging.
///
/// Called at most once per successful render, after the output has been written.
pub trait DiagnosticSink {
    /// The caption box rendered on its own, at box size.
    fn caption_box(&mut self, image: &RgbaImage) -> ThumbResult<()>;
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl DiagnosticSink for NoopSink {
    fn caption_box(&mut self, _image: &RgbaImage) -> ThumbResult<()> {
        Ok(())
    }
}

/// Writes the caption box as a PNG, overwriting `path` on every call.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DiagnosticSink for FileSink {
    fn caption_box(&mut self, image: &RgbaImage) -> ThumbResult<()> {
        crate::encode::jpeg::ensure_parent_dir(&self.path)?;
        image
            .save_with_format(&self.path, image::ImageFormat::Png)
            .map_err(|e| ThumbError::encode(format!("write '{}': {e}", self.path.display())))
    }
}

/// Keeps every caption box in memory, for tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    boxes: Vec<RgbaImage>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn boxes(&self) -> &[RgbaImage] {
        &self.boxes
    }
}

impl DiagnosticSink for MemorySink {
    fn caption_box(&mut self, image: &RgbaImage) -> ThumbResult<()> {
        self.boxes.push(image.clone());
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/diagnostics.rs"]
mod tests;
