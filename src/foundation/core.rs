use crate::foundation::error::{ThumbError, ThumbResult};

pub use kurbo::{Point, Rect};

/// Pixel dimensions of an image or canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn new(width: u32, height: u32) -> ThumbResult<Self> {
        if width == 0 || height == 0 {
            return Err(ThumbError::validation("Size width and height must be > 0"));
        }
        Ok(Self { width, height })
    }

    /// Dimensions as `u16`, the limit of the rasterizer's pixmaps.
    pub fn as_u16(self) -> ThumbResult<(u16, u16)> {
        let w: u16 = self
            .width
            .try_into()
            .map_err(|_| ThumbError::validation("width exceeds u16"))?;
        let h: u16 = self
            .height
            .try_into()
            .map_err(|_| ThumbError::validation("height exceeds u16"))?;
        Ok((w, h))
    }

    pub fn contains_rect(self, r: Rect) -> bool {
        r.x0 >= 0.0
            && r.y0 >= 0.0
            && r.x1 <= f64::from(self.width)
            && r.y1 <= f64::from(self.height)
    }
}

/// Straight (non-premultiplied) RGBA8 color.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    pub const BLACK: Self = Self::new(0, 0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub(crate) fn to_cpu_color(self) -> vello_cpu::peniko::Color {
        vello_cpu::peniko::Color::from_rgba8(self.r, self.g, self.b, self.a)
    }
}

impl From<Rgba8> for image::Rgba<u8> {
    fn from(c: Rgba8) -> Self {
        image::Rgba(c.to_array())
    }
}

pub(crate) fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
