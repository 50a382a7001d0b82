//! Decoded nine-patch images.
//!
//! A [`NinePatch`] is built once from a source bitmap and keeps only what
//! layout needs: the source dimensions and the segment lists of both axes.
//! Layouts for any number of target sizes can then be computed from it,
//! including concurrently from several threads.
//!
//! # Example
//!
//! ```
//! use zenpatch::{NinePatch, PixelBuffer, Size, MARKER};
//!
//! // 7×5 source framed on all sides: marker band at columns 3..=4 and
//! // row 2.
//! let white = 0xFFFF_FFFF;
//! let mut src = PixelBuffer::new(7, 5, white);
//! src.set(3, 0, MARKER);
//! src.set(4, 0, MARKER);
//! src.set(0, 2, MARKER);
//!
//! let patch = NinePatch::decode(&src);
//! assert_eq!(patch.min_size(), Size::new(3, 2));
//!
//! let grids = patch.layout(9, 5).unwrap();
//! assert_eq!(grids.destination.cols(), 3);
//! assert_eq!(grids.destination.rows(), 3);
//! ```

use alloc::vec::Vec;

use crate::grid::{Grids, LayoutError, Size, build_grids};
use crate::pixels::{MARKER, PixelBuffer};
use crate::segment::{Axis, AxisTotals, Segment, extract_segments};

/// Which border pixels carry segment information.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum BorderMode {
    /// The image is framed by a border on all four sides. The last pixel of
    /// each scanned line is excluded along with the corner.
    #[default]
    Framed,
    /// Only the top row and left column are border. Every pixel after the
    /// corner is scanned.
    Leading,
}

/// How to read segment markers from a source bitmap.
///
/// ```
/// use zenpatch::{BorderMode, DecodeOptions};
///
/// let opts = DecodeOptions::new()
///     .marker(0xFF00_00FF)
///     .border_mode(BorderMode::Leading);
/// assert_eq!(opts.marker_value(), 0xFF00_00FF);
/// assert_eq!(DecodeOptions::new().border(), BorderMode::Framed);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct DecodeOptions {
    marker: u32,
    border_mode: BorderMode,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl DecodeOptions {
    /// Opaque black markers, border on all four sides.
    pub const fn new() -> Self {
        Self {
            marker: MARKER,
            border_mode: BorderMode::Framed,
        }
    }

    /// Set the pixel value that marks stretch regions.
    pub const fn marker(mut self, marker: u32) -> Self {
        self.marker = marker;
        self
    }

    /// Set which border pixels are scanned.
    pub const fn border_mode(mut self, mode: BorderMode) -> Self {
        self.border_mode = mode;
        self
    }

    /// Pixel value treated as a stretch marker.
    pub const fn marker_value(&self) -> u32 {
        self.marker
    }

    /// Which border pixels are scanned.
    pub const fn border(&self) -> BorderMode {
        self.border_mode
    }
}

/// A decoded nine-patch: source size plus both segment lists.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NinePatch {
    source: Size,
    horizontal: Vec<Segment>,
    vertical: Vec<Segment>,
}

impl NinePatch {
    /// Decode with [`DecodeOptions::default`].
    pub fn decode(image: &PixelBuffer) -> Self {
        Self::decode_with(image, &DecodeOptions::new())
    }

    /// Scan the top row and left column of `image` for segments.
    ///
    /// Never fails: a source too small to carry segments yields empty
    /// lists, which [`layout`](Self::layout) rejects.
    pub fn decode_with(image: &PixelBuffer, opts: &DecodeOptions) -> Self {
        let (w, h) = (image.width(), image.height());
        let (scan_w, scan_h) = match opts.border_mode {
            BorderMode::Leading => (w, h),
            BorderMode::Framed => (w.saturating_sub(1), h.saturating_sub(1)),
        };
        let horizontal = extract_segments(image.row(0).take(scan_w as usize), opts.marker);
        let vertical = extract_segments(image.column(0).take(scan_h as usize), opts.marker);

        log::debug!(
            "decoded nine-patch {}x{} ({:?}): {} horizontal, {} vertical segments",
            w,
            h,
            opts.border_mode,
            horizontal.len(),
            vertical.len()
        );

        Self {
            source: Size::new(w, h),
            horizontal,
            vertical,
        }
    }

    /// Assemble from segment lists produced elsewhere.
    ///
    /// The lists are not checked here; [`layout`](Self::layout) rejects
    /// lists that do not tile `1..=n` with
    /// [`LayoutError::InvalidSegments`].
    pub fn from_segments(source: Size, horizontal: Vec<Segment>, vertical: Vec<Segment>) -> Self {
        Self {
            source,
            horizontal,
            vertical,
        }
    }

    /// Dimensions of the source bitmap, border included.
    pub fn source_size(&self) -> Size {
        self.source
    }

    /// Column segments, left to right.
    pub fn horizontal(&self) -> &[Segment] {
        &self.horizontal
    }

    /// Row segments, top to bottom.
    pub fn vertical(&self) -> &[Segment] {
        &self.vertical
    }

    /// Segments of one axis.
    pub fn segments(&self, axis: Axis) -> &[Segment] {
        match axis {
            Axis::Horizontal => &self.horizontal,
            Axis::Vertical => &self.vertical,
        }
    }

    /// Fixed and stretch sums of one axis.
    pub fn totals(&self, axis: Axis) -> AxisTotals {
        AxisTotals::of(self.segments(axis))
    }

    /// Size of the drawable content, border excluded.
    pub fn content_size(&self) -> Size {
        Size::new(
            self.totals(Axis::Horizontal).total(),
            self.totals(Axis::Vertical).total(),
        )
    }

    /// Smallest target this patch can be laid out at: every stretch band
    /// collapsed to zero.
    pub fn min_size(&self) -> Size {
        Size::new(
            self.totals(Axis::Horizontal).fixed,
            self.totals(Axis::Vertical).fixed,
        )
    }

    /// Whether `axis` has at least one stretch segment.
    pub fn is_stretchable(&self, axis: Axis) -> bool {
        self.segments(axis).iter().any(|s| s.stretch)
    }

    /// Source and destination tiles for a `width × height` target.
    pub fn layout(&self, width: u32, height: u32) -> Result<Grids, LayoutError> {
        build_grids(&self.horizontal, &self.vertical, width, height)
    }
}
