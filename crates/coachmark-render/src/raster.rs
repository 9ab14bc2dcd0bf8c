#![forbid(unsafe_code)]

//! Character-grid rendering of an [`OverlayFrame`].
//!
//! Each cell samples the frame at its center: `.` where the mask dims the
//! host, a blank where a cut-out lets the host through. The card is drawn on
//! top as an ASCII box holding its heading, body, and controls.

use std::fmt;

use coachmark_core::Offset;

use crate::card::CardControl;
use crate::scene::{Layer, OverlayFrame};
use crate::text::{display_width, truncate_to_width, wrap_text};

const MASK: char = '.';
const CLEAR: char = ' ';

/// A `cols × rows` grid of characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskRaster {
    cols: usize,
    rows: usize,
    cells: Vec<char>,
}

impl MaskRaster {
    /// A blank grid.
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            cells: vec![CLEAR; cols * rows],
        }
    }

    /// Rasterize `frame` onto a `cols × rows` grid spanning its viewport.
    pub fn rasterize(frame: &OverlayFrame, cols: usize, rows: usize) -> Self {
        let mut raster = Self::new(cols, rows);
        if cols == 0 || rows == 0 || !frame.viewport.is_measured() {
            return raster;
        }
        let sx = frame.viewport.width / cols as f32;
        let sy = frame.viewport.height / rows as f32;
        let dimmed = frame.mask_color.a() > 0;

        for row in 0..rows {
            for col in 0..cols {
                let p = Offset::new((col as f32 + 0.5) * sx, (row as f32 + 0.5) * sy);
                let ch = match frame.layer_at(p) {
                    Layer::Mask if dimmed => MASK,
                    _ => CLEAR,
                };
                raster.set(col, row, ch);
            }
        }

        raster.draw_card(frame, sx, sy);
        raster
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn get(&self, col: usize, row: usize) -> Option<char> {
        (col < self.cols && row < self.rows).then(|| self.cells[row * self.cols + col])
    }

    /// One row as a string.
    pub fn row(&self, row: usize) -> String {
        if row >= self.rows {
            return String::new();
        }
        self.cells[row * self.cols..(row + 1) * self.cols]
            .iter()
            .collect()
    }

    /// Number of cells holding `ch`.
    pub fn count(&self, ch: char) -> usize {
        self.cells.iter().filter(|&&c| c == ch).count()
    }

    fn set(&mut self, col: usize, row: usize, ch: char) {
        if col < self.cols && row < self.rows {
            self.cells[row * self.cols + col] = ch;
        }
    }

    fn put_str(&mut self, col: usize, row: usize, text: &str, max_width: usize) {
        let mut c = col;
        for ch in truncate_to_width(text, max_width).chars() {
            self.set(c, row, ch);
            c += display_width(ch.encode_utf8(&mut [0u8; 4])).max(1);
        }
    }

    fn draw_card(&mut self, frame: &OverlayFrame, sx: f32, sy: f32) {
        let rect = frame.card.rect;
        let c0 = (rect.left() / sx).floor().max(0.0) as usize;
        let r0 = (rect.top() / sy).floor().max(0.0) as usize;
        let c1 = ((rect.right() / sx).ceil() as usize).min(self.cols).saturating_sub(1);
        let r1 = ((rect.bottom() / sy).ceil() as usize).min(self.rows).saturating_sub(1);
        if c1 < c0 + 2 || r1 < r0 + 2 {
            return;
        }

        for row in r0..=r1 {
            for col in c0..=c1 {
                let edge_row = row == r0 || row == r1;
                let edge_col = col == c0 || col == c1;
                let ch = match (edge_row, edge_col) {
                    (true, true) => '+',
                    (true, false) => '-',
                    (false, true) => '|',
                    (false, false) => CLEAR,
                };
                self.set(col, row, ch);
            }
        }

        let inner_left = c0 + 2;
        let inner_width = (c1 - c0).saturating_sub(3);
        let first = r0 + 1;
        let last = r1 - 1;
        if inner_width == 0 {
            return;
        }

        let layout = &frame.card.layout;
        let dismiss = "[x]";
        let heading_width = inner_width.saturating_sub(dismiss.len() + 1);
        let heading = layout.heading_lines.join(" ");
        let mut row = first;
        for (i, line) in wrap_text(&heading, heading_width).iter().enumerate() {
            if row >= last {
                break;
            }
            self.put_str(inner_left, row, line, heading_width);
            if i == 0 && inner_width >= dismiss.len() {
                self.put_str(inner_left + inner_width - dismiss.len(), row, dismiss, dismiss.len());
            }
            row += 1;
        }

        let body = layout.body_lines.join(" ");
        for line in wrap_text(&body, inner_width) {
            if row >= last {
                break;
            }
            self.put_str(inner_left, row, &line, inner_width);
            row += 1;
        }

        if last <= first {
            return;
        }
        for region in &layout.controls {
            let label = format!("[{}]", region.label);
            let width = display_width(&label);
            match region.control {
                CardControl::Previous => self.put_str(inner_left, last, &label, inner_width),
                CardControl::Next | CardControl::Finish if width <= inner_width => {
                    self.put_str(inner_left + inner_width - width, last, &label, width)
                }
                _ => {}
            }
        }
    }
}

impl fmt::Display for MaskRaster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            if row > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", self.row(row))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{CardContent, CardLayout, CardMetrics};
    use crate::scene::{CardFrame, Cutout};
    use coachmark_core::{HighlightShape, PackedRgba, Rect, Size};
    use coachmark_layout::PlacementSide;

    fn frame(cutouts: Vec<Cutout>) -> OverlayFrame {
        let content = CardContent::new("Balance", "See your money.")
            .counter("(2/3)")
            .previous("Back")
            .next("Next");
        let layout = CardLayout::measure(&content, 280.0, &CardMetrics::default());
        OverlayFrame {
            viewport: Size::new(400.0, 800.0),
            mask_color: PackedRgba::BLACK.with_opacity(0.7),
            cutouts,
            card: CardFrame {
                rect: Rect::from_origin_size(Offset::new(60.0, 400.0), layout.size),
                layout,
                side: PlacementSide::Below,
                background: PackedRgba::WHITE,
                text_color: PackedRgba::BLACK,
                elevation: 8.0,
                corner_radius: 12.0,
            },
            step_index: 1,
            step_count: 3,
            solved_card_height: 172.0,
            needs_relayout: false,
        }
    }

    #[test]
    fn mask_without_cutouts_is_uniform_outside_card() {
        let r = MaskRaster::rasterize(&frame(vec![]), 40, 40);
        assert_eq!(r.get(0, 0), Some('.'));
        assert_eq!(r.get(39, 39), Some('.'));
        assert_eq!(r.row(0), ".".repeat(40));
    }

    #[test]
    fn cutout_is_clear() {
        let cut = Cutout {
            rect: Rect::new(0.0, 0.0, 400.0, 200.0),
            shape: HighlightShape::RoundedRect,
            corner_radius: 0.0,
        };
        let r = MaskRaster::rasterize(&frame(vec![cut]), 40, 40);
        assert_eq!(r.row(2), " ".repeat(40));
        assert_eq!(r.row(15), ".".repeat(40));
    }

    #[test]
    fn card_box_holds_text_and_controls() {
        let r = MaskRaster::rasterize(&frame(vec![]), 40, 40);
        let text = r.to_string();
        assert!(text.contains("Balance (2/3)"), "{text}");
        assert!(text.contains("[x]"));
        assert!(text.contains("See your money."));
        assert!(text.contains("[Back]"));
        assert!(text.contains("[Next]"));
        // Card spans columns 6..=33 at 10 px per column.
        assert_eq!(r.get(6, 20), Some('+'));
        assert_eq!(r.get(33, 20), Some('+'));
        assert_eq!(r.get(34, 20), Some('.'));
    }

    #[test]
    fn faded_mask_is_clear() {
        let r = MaskRaster::rasterize(&frame(vec![]).faded(0.0), 20, 20);
        assert_eq!(r.count('.'), 0);
    }

    #[test]
    fn empty_grid() {
        let r = MaskRaster::rasterize(&frame(vec![]), 0, 0);
        assert_eq!(r.to_string(), "");
    }
}
