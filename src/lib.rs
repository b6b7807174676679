//! thumbsmith batch-renders branded video thumbnails.
//!
//! Each source image is resized to a fixed canvas, given rounded corners, and overlaid
//! with a translucent caption box holding a stroked title and subtitle framed by four
//! corner brackets. The result is flattened and written as JPEG.
//!
//! # Pipeline overview
//!
//! 1. **Decode**: source bytes -> straight RGBA8 at `RenderConfig::image_size`
//! 2. **Mask**: rounded-rectangle coverage replaces the alpha channel
//! 3. **Caption**: measure text with Parley, place the box ([`CaptionLayout`]), rasterize
//!    the overlay with `vello_cpu`
//! 4. **Flatten + encode**: overlay over base, drop alpha, JPEG
//!
//! [`process_folder`] drives [`Compositor::render`] over a directory and returns a
//! [`BatchReport`]; a failed file never stops the batch.
//!
//! Rendering is sequential and deterministic: the same inputs produce identical bytes.
#![forbid(unsafe_code)]

mod assets;
mod batch;
mod diagnostics;
mod encode;
mod foundation;
mod render;

pub use assets::decode::{RESIZE_FILTER, decode_source, load_source};
pub use assets::font::{TextBlock, TextLayoutEngine};
pub use batch::driver::{
    BatchReport, BatchSummary, OUTPUT_PREFIX, is_supported_image, output_file_name,
    process_folder,
};
pub use diagnostics::{DiagnosticSink, FileSink, MemorySink, NoopSink};
pub use encode::jpeg::{encode_jpeg, ensure_parent_dir, write_jpeg};
pub use foundation::core::{Point, Rect, Rgba8, Size};
pub use foundation::error::{ThumbError, ThumbResult};
pub use render::composite::{flatten_premul_to_rgb, over, over_in_place, premultiplied_bytes};
pub use render::compositor::{Compositor, RenderOutcome, Thumbnail};
pub use render::config::{
    BracketStyle, CaptionStyle, MIN_FONT_SIZE_PX, OutputNaming, OverflowPolicy, RenderConfig,
};
pub use render::layout::{CaptionLayout, TextExtent};
pub use render::mask::{apply_alpha_mask, rounded_mask};
pub use render::overlay::caption_box_image;
