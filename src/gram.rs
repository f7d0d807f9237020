//! Shadow copy of the controller's display RAM
//!
//! The SSD1306 GDDRAM is organized as 8 pages of 128 columns. Each byte packs
//! 8 vertical pixels of one page, bit 0 being the top row of that page:
//!
//! ```text
//!           column 0   column 1        column 127
//! page 0   [ rows 0-7 ][ rows 0-7 ] ... [ rows 0-7 ]
//! page 1   [ rows 8-15][ rows 8-15] ... [ rows 8-15]
//!   ...
//! page 7   [rows 56-63][rows 56-63] ... [rows 56-63]
//! ```
//!
//! [`Gram`] mirrors that layout in memory. Reads never touch the device, and
//! every write marks a dirty column run on its page so that only changed
//! bytes need to be sent.
//!
//! ## Example
//!
//! ```
//! use ssd1306_session::Gram;
//!
//! let mut gram = Gram::new();
//! gram.set_pixel(10, 40, true);
//!
//! assert!(gram.pixel(10, 40));
//! assert_eq!(gram.byte(10, 5), 0x01);
//! assert_eq!(gram.dirty_run(5), Some((10, 10)));
//! ```

use crate::error::{HEIGHT, PAGES, WIDTH};

const COLUMNS: usize = WIDTH as usize;
const PAGE_COUNT: usize = PAGES as usize;

/// In-memory copy of GDDRAM with per-page dirty tracking
#[derive(Clone, Debug, PartialEq)]
pub struct Gram {
    pages: [[u8; COLUMNS]; PAGE_COUNT],
    /// Inclusive column run per page that differs from the device
    dirty: [Option<(u8, u8)>; PAGE_COUNT],
}

impl Default for Gram {
    fn default() -> Self {
        Self::new()
    }
}

impl Gram {
    /// Size of the shadow buffer in bytes
    pub const SIZE: usize = COLUMNS * PAGE_COUNT;

    /// Create an all-off, clean shadow
    pub const fn new() -> Self {
        Self {
            pages: [[0; COLUMNS]; PAGE_COUNT],
            dirty: [None; PAGE_COUNT],
        }
    }

    /// Whether (x, y) lies on the panel
    pub fn contains(x: u8, y: u8) -> bool {
        x < WIDTH && y < HEIGHT
    }

    /// Read a pixel
    ///
    /// Coordinates outside the panel read as off.
    pub fn pixel(&self, x: u8, y: u8) -> bool {
        if !Self::contains(x, y) {
            return false;
        }
        self.pages[usize::from(y / 8)][usize::from(x)] & (1 << (y % 8)) != 0
    }

    /// Write a pixel and mark its column dirty
    ///
    /// Coordinates outside the panel are ignored.
    pub fn set_pixel(&mut self, x: u8, y: u8, on: bool) {
        if !Self::contains(x, y) {
            return;
        }
        let bit = 1 << (y % 8);
        self.apply(x, y / 8, bit, if on { bit } else { 0 });
    }

    /// Raw byte at (column, page)
    pub fn byte(&self, column: u8, page: u8) -> u8 {
        self.pages
            .get(usize::from(page))
            .and_then(|bytes| bytes.get(usize::from(column)))
            .copied()
            .unwrap_or(0)
    }

    /// Replace the bits selected by `mask` in the byte at (column, page)
    ///
    /// Bits outside `mask` are preserved. The column is marked dirty.
    pub fn apply(&mut self, column: u8, page: u8, mask: u8, bits: u8) {
        let Some(byte) = self
            .pages
            .get_mut(usize::from(page))
            .and_then(|bytes| bytes.get_mut(usize::from(column)))
        else {
            return;
        };
        *byte = (*byte & !mask) | (bits & mask);
        self.mark_dirty(page, column, column);
    }

    /// Set every byte to `value` and mark the whole buffer dirty
    pub fn fill(&mut self, value: u8) {
        for page in self.pages.iter_mut() {
            page.fill(value);
        }
        self.dirty = [Some((0, WIDTH - 1)); PAGE_COUNT];
    }

    /// All 128 bytes of one page
    pub fn page(&self, page: u8) -> &[u8] {
        self.pages
            .get(usize::from(page))
            .map(|bytes| bytes.as_slice())
            .unwrap_or(&[])
    }

    /// Dirty column run of a page, if any
    pub fn dirty_run(&self, page: u8) -> Option<(u8, u8)> {
        self.dirty.get(usize::from(page)).copied().flatten()
    }

    /// Whether any page holds unsent changes
    pub fn is_dirty(&self) -> bool {
        self.dirty.iter().any(Option::is_some)
    }

    /// Forget the dirty run of a page once it has been sent
    pub fn mark_clean(&mut self, page: u8) {
        if let Some(run) = self.dirty.get_mut(usize::from(page)) {
            *run = None;
        }
    }

    fn mark_dirty(&mut self, page: u8, start: u8, end: u8) {
        if let Some(run) = self.dirty.get_mut(usize::from(page)) {
            *run = Some(match *run {
                Some((lo, hi)) => (lo.min(start), hi.max(end)),
                None => (start, end),
            });
        }
    }
}

/// Bits of `page` covered by rows `top..=bottom`
///
/// Returns 0 when the page band does not intersect the row range.
pub(crate) fn row_mask(page: u8, top: u8, bottom: u8) -> u8 {
    let band_top = page * 8;
    let band_bottom = band_top + 7;
    if bottom < band_top || top > band_bottom || top > bottom {
        return 0;
    }
    let first = top.max(band_top) - band_top;
    let last = bottom.min(band_bottom) - band_top;
    // bits first..=last
    (0xFFu8 >> (7 - last)) & (0xFFu8 << first)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_gram_is_clean_and_off() {
        let gram = Gram::new();
        assert!(!gram.is_dirty());
        assert!(!gram.pixel(0, 0));
        assert_eq!(Gram::SIZE, 1024);
    }

    #[test]
    fn test_set_pixel_preserves_other_bits() {
        let mut gram = Gram::new();
        gram.apply(3, 2, 0xFF, 0b1010_0101);
        gram.set_pixel(3, 17, true); // page 2, bit 1
        assert_eq!(gram.byte(3, 2), 0b1010_0111);
        gram.set_pixel(3, 16, false); // page 2, bit 0
        assert_eq!(gram.byte(3, 2), 0b1010_0110);
    }

    #[test]
    fn test_out_of_bounds_pixels_are_ignored() {
        let mut gram = Gram::new();
        gram.set_pixel(128, 0, true);
        gram.set_pixel(0, 64, true);
        assert!(!gram.is_dirty());
        assert!(!gram.pixel(128, 0));
    }

    #[test]
    fn test_dirty_run_grows_and_clears() {
        let mut gram = Gram::new();
        gram.set_pixel(40, 0, true);
        gram.set_pixel(12, 3, true);
        gram.set_pixel(90, 7, false);
        assert_eq!(gram.dirty_run(0), Some((12, 90)));
        assert_eq!(gram.dirty_run(1), None);
        gram.mark_clean(0);
        assert!(!gram.is_dirty());
    }

    #[test]
    fn test_fill_marks_every_page() {
        let mut gram = Gram::new();
        gram.fill(0xFF);
        for page in 0..PAGES {
            assert_eq!(gram.dirty_run(page), Some((0, 127)));
            assert!(gram.page(page).iter().all(|&b| b == 0xFF));
        }
    }

    #[test]
    fn test_row_mask() {
        assert_eq!(row_mask(0, 0, 63), 0xFF);
        assert_eq!(row_mask(0, 2, 4), 0b0001_1100);
        assert_eq!(row_mask(1, 5, 9), 0b0000_0011);
        assert_eq!(row_mask(0, 5, 9), 0b1110_0000);
        assert_eq!(row_mask(2, 5, 9), 0);
        assert_eq!(row_mask(7, 63, 63), 0x80);
    }
}
