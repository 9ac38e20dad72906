pub use kurbo::{Point, Rect};

/// Inset from every page edge before any pattern is laid out.
pub const PAGE_MARGIN: f64 = 50.0;

/// On-screen bounding rectangle of a rendered page, in layout space.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PageRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PageRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn bottom(self) -> f64 {
        self.top + self.height
    }

    pub fn to_rect(self) -> Rect {
        Rect::new(self.left, self.top, self.left + self.width, self.bottom())
    }
}

/// Absolute pixel bounds the pattern generators sweep over.
///
/// `start_x..end_x` is the usable horizontal band selected by the
/// start/end position percentages; `start_y..end_y` is the full page height
/// minus the margin. A reversed axis is allowed and means "degenerate":
/// generators answer it with an empty trajectory.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ReadingBounds {
    pub start_x: f64,
    pub start_y: f64,
    pub end_x: f64,
    pub end_y: f64,
}

impl ReadingBounds {
    pub fn new(start_x: f64, start_y: f64, end_x: f64, end_y: f64) -> Self {
        Self {
            start_x,
            start_y,
            end_x,
            end_y,
        }
    }

    /// Maps a page rectangle plus start/end percentages to reading bounds.
    ///
    /// No error conditions: degenerate input (zero-area page, reversed
    /// percentages) flows through and yields degenerate bounds downstream.
    pub fn from_page(page: PageRect, start_position: u8, end_position: u8) -> Self {
        let usable_width = page.width - PAGE_MARGIN * 2.0;

        let start_offset = f64::from(start_position) / 100.0 * usable_width;
        let end_offset = f64::from(end_position) / 100.0 * usable_width;

        Self {
            start_x: page.left + PAGE_MARGIN + start_offset,
            end_x: page.left + PAGE_MARGIN + end_offset,
            start_y: page.top + PAGE_MARGIN,
            end_y: page.bottom() - PAGE_MARGIN,
        }
    }

    pub fn width(self) -> f64 {
        self.end_x - self.start_x
    }

    pub fn height(self) -> f64 {
        self.end_y - self.start_y
    }

    /// True when either axis is reversed and no pattern can be laid out.
    pub fn is_degenerate(self) -> bool {
        self.end_x < self.start_x || self.end_y < self.start_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_range_maps_to_margin_inset() {
        let page = PageRect::new(0.0, 0.0, 800.0, 600.0);
        let b = ReadingBounds::from_page(page, 0, 100);
        assert_eq!(b.start_x, 50.0);
        assert_eq!(b.end_x, 750.0);
        assert_eq!(b.start_y, 50.0);
        assert_eq!(b.end_y, 550.0);
        assert!(!b.is_degenerate());
    }

    #[test]
    fn percentages_select_a_band_of_usable_width() {
        let page = PageRect::new(100.0, 20.0, 1100.0, 500.0);
        let b = ReadingBounds::from_page(page, 25, 75);
        // usable width is 1000, so 25%..75% is a 500px band.
        assert_eq!(b.start_x, 100.0 + 50.0 + 250.0);
        assert_eq!(b.end_x, 100.0 + 50.0 + 750.0);
        assert_eq!(b.width(), 500.0);
    }

    #[test]
    fn reversed_percentages_are_degenerate_not_a_panic() {
        let page = PageRect::new(0.0, 0.0, 800.0, 600.0);
        let b = ReadingBounds::from_page(page, 80, 20);
        assert!(b.is_degenerate());
    }

    #[test]
    fn tiny_page_collapses_vertically() {
        let page = PageRect::new(0.0, 0.0, 300.0, 60.0);
        let b = ReadingBounds::from_page(page, 0, 100);
        assert!(b.end_y < b.start_y);
        assert!(b.is_degenerate());
    }
}
