//! Caption placement: pure integer arithmetic over measured text extents.

use crate::{
    foundation::core::{Point, Rect, Size},
    render::config::{BracketStyle, CaptionStyle},
};

/// Measured size of one rendered line of text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextExtent {
    pub width: u32,
    pub height: u32,
}

/// Everything needed to paint the caption, in canvas pixels.
///
/// Coordinates may be negative or exceed the canvas when the text is too large for it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CaptionLayout {
    pub box_rect: Rect,
    /// Top-left of the title's measured extent.
    pub title_origin: Point,
    /// Top-left of the subtitle's measured extent.
    pub subtitle_origin: Point,
    /// Horizontal then vertical arm for each corner: top-left, top-right, bottom-left,
    /// bottom-right.
    pub brackets: [Rect; 8],
}

impl CaptionLayout {
    pub fn compute(
        canvas: Size,
        title: TextExtent,
        subtitle: TextExtent,
        caption: &CaptionStyle,
        brackets: &BracketStyle,
    ) -> Self {
        let w = i64::from(canvas.width);
        let h = i64::from(canvas.height);
        let pad = i64::from(caption.padding);

        let box_w = i64::from(title.width.max(subtitle.width)) + 2 * pad;
        let box_h = i64::from(title.height)
            + i64::from(subtitle.height)
            + 2 * pad
            + i64::from(caption.line_spacing);
        let box_x = (w - box_w).div_euclid(2);
        let box_y = h - box_h - i64::from(caption.bottom_offset);

        let title_x = (w - i64::from(title.width)).div_euclid(2);
        let title_y = box_y + pad;
        let subtitle_x = (w - i64::from(subtitle.width)).div_euclid(2);
        let subtitle_y = title_y + i64::from(title.height) + i64::from(caption.title_gap);

        let box_rect = rect(box_x, box_y, box_x + box_w, box_y + box_h);

        Self {
            box_rect,
            title_origin: Point::new(title_x as f64, title_y as f64),
            subtitle_origin: Point::new(subtitle_x as f64, subtitle_y as f64),
            brackets: bracket_rects(box_x, box_y, box_w, box_h, brackets, caption),
        }
    }

    pub fn box_size(&self) -> (u32, u32) {
        (
            self.box_rect.width().max(0.0) as u32,
            self.box_rect.height().max(0.0) as u32,
        )
    }

    /// Box plus brackets.
    pub fn outer_bounds(&self) -> Rect {
        self.brackets
            .iter()
            .fold(self.box_rect, |acc, r| acc.union(*r))
    }

    pub fn fits(&self, canvas: Size) -> bool {
        canvas.contains_rect(self.outer_bounds())
    }
}

fn rect(x0: i64, y0: i64, x1: i64, y1: i64) -> Rect {
    Rect::new(x0 as f64, y0 as f64, x1 as f64, y1 as f64)
}

fn bracket_rects(
    box_x: i64,
    box_y: i64,
    box_w: i64,
    box_h: i64,
    style: &BracketStyle,
    caption: &CaptionStyle,
) -> [Rect; 8] {
    let len = i64::from(style.length);
    let t = i64::from(style.thickness);
    let off = i64::from(style.resolved_offset(caption));

    let left = box_x - off;
    let right = box_x + box_w + off;
    let top = box_y - off;
    let bottom = box_y + box_h + off;

    [
        rect(left, top, left + len, top + t),
        rect(left, top, left + t, top + len),
        rect(right - len, top, right, top + t),
        rect(right - t, top, right, top + len),
        rect(left, bottom - t, left + len, bottom),
        rect(left, bottom - len, left + t, bottom),
        rect(right - len, bottom - t, right, bottom),
        rect(right - t, bottom - len, right, bottom),
    ]
}

#[cfg(test)]
#[path = "../../tests/unit/render/layout.rs"]
mod tests;
