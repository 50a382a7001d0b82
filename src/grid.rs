//! Rectangle mapping: source tiles and their seamless destination tiles.
//!
//! Given the horizontal and vertical segment lists of a nine-patch and a
//! target size, computes two parallel grids. Row `v`, column `h` of the
//! source grid is the region of the original bitmap covered by vertical
//! segment `v` and horizontal segment `h`; the same cell of the destination
//! grid is where that region lands on the target canvas.
//!
//! Fixed segments keep their pixel size. Stretch segments share the
//! remaining space in proportion to their length. Destination origins are
//! rounded to whole pixels and every extent is derived from the neighbor's
//! origin, so adjacent tiles share exactly one boundary coordinate.
//!
//! # Example
//!
//! ```
//! use zenpatch::{build_grids, Rect, Segment};
//!
//! let h = [
//!     Segment::new(1, 2, false),
//!     Segment::new(3, 4, true),
//!     Segment::new(5, 5, false),
//! ];
//! let v = [Segment::new(1, 4, true)];
//!
//! let grids = build_grids(&h, &v, 9, 8).unwrap();
//! assert_eq!(grids.source[(0, 1)], Rect::new(3, 1, 2, 4));
//! assert_eq!(grids.destination[(0, 1)], Rect::new(2, 0, 6, 8));
//! ```

use alloc::vec::Vec;
use core::fmt;
use core::ops::Index;

use num_traits::Float;

use crate::segment::{Axis, AxisTotals, Segment};

/// Width × height dimensions in pixels.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    /// Create a new size.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle in pixel coordinates.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    /// Left edge.
    pub x: u32,
    /// Top edge.
    pub y: u32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Rect {
    /// Create a new rect.
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// One past the right edge.
    pub const fn right(&self) -> u32 {
        self.x + self.width
    }

    /// One past the bottom edge.
    pub const fn bottom(&self) -> u32 {
        self.y + self.height
    }

    /// Whether the rect covers no pixels.
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Unrounded destination rectangle.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
struct RectF {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

/// A rectangle's snapped top-left corner.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
struct Origin {
    x: u32,
    y: u32,
}

/// Row-major `rows × cols` matrix.
///
/// Rows follow the vertical segments, columns the horizontal segments.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Grid<T> {
    rows: usize,
    cols: usize,
    cells: Vec<T>,
}

impl<T> Grid<T> {
    fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut cells = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                cells.push(f(r, c));
            }
        }
        Self { rows, cols, cells }
    }

    fn map<U>(&self, mut f: impl FnMut(usize, usize, &T) -> U) -> Grid<U> {
        Grid::from_fn(self.rows, self.cols, |r, c| f(r, c, &self[(r, c)]))
    }

    /// Number of rows (vertical segments).
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns (horizontal segments).
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Cell at `(row, col)`, or `None` when out of range.
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row < self.rows && col < self.cols {
            self.cells.get(row * self.cols + col)
        } else {
            None
        }
    }

    /// All cells of one row, left to right.
    pub fn row(&self, row: usize) -> &[T] {
        let start = (row * self.cols).min(self.cells.len());
        let end = (start + self.cols).min(self.cells.len());
        &self.cells[start..end]
    }

    /// Cells in row-major order.
    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.cells.iter()
    }
}

impl<T> Index<(usize, usize)> for Grid<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        assert!(
            row < self.rows && col < self.cols,
            "cell ({row},{col}) out of bounds {}x{}",
            self.rows,
            self.cols
        );
        &self.cells[row * self.cols + col]
    }
}

impl<'a, T> IntoIterator for &'a Grid<T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Source and destination tiles for one target size.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Grids {
    /// Regions of the original bitmap, in source pixel coordinates.
    pub source: Grid<Rect>,
    /// Where each region is drawn, in target canvas coordinates.
    pub destination: Grid<Rect>,
    /// The canvas the destination tiles cover.
    pub target: Size,
}

impl Grids {
    /// `(source, destination)` pairs in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Rect, Rect)> + '_ {
        self.source.iter().copied().zip(self.destination.iter().copied())
    }
}

/// Layout computation error.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LayoutError {
    /// The border scan of this axis produced no segments.
    EmptySegmentList { axis: Axis },
    /// The segments of this axis do not tile `1..=n` in order: a segment
    /// ends before it starts, the first does not start at 1, a gap or
    /// overlap separates neighbors, or the total overflows.
    InvalidSegments { axis: Axis },
    /// The axis has nothing to stretch but the target differs from its
    /// fixed size.
    DegenerateAxis { axis: Axis, target: u32, fixed: u32 },
    /// The target is smaller than the fixed size of the axis.
    TargetTooSmall { axis: Axis, target: u32, fixed: u32 },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySegmentList { axis } => {
                write!(f, "{axis} border has no segments")
            }
            Self::InvalidSegments { axis } => {
                write!(f, "{axis} segments are not contiguous from pixel 1")
            }
            Self::DegenerateAxis {
                axis,
                target,
                fixed,
            } => write!(
                f,
                "{axis} axis has no stretch segments; target {target} must equal fixed size {fixed}"
            ),
            Self::TargetTooSmall {
                axis,
                target,
                fixed,
            } => write!(
                f,
                "{axis} target {target} is smaller than fixed size {fixed}"
            ),
        }
    }
}

impl core::error::Error for LayoutError {}

/// Per-axis scaling, validated against the target.
#[derive(Copy, Clone, Debug)]
struct AxisScale {
    totals: AxisTotals,
    target: u32,
}

impl AxisScale {
    fn new(axis: Axis, segments: &[Segment], target: u32) -> Result<Self, LayoutError> {
        let totals = checked_totals(axis, segments)?;
        if totals.stretch == 0 && target != totals.fixed {
            return Err(LayoutError::DegenerateAxis {
                axis,
                target,
                fixed: totals.fixed,
            });
        }
        if target < totals.fixed {
            return Err(LayoutError::TargetTooSmall {
                axis,
                target,
                fixed: totals.fixed,
            });
        }
        Ok(Self { totals, target })
    }

    /// Destination extent of one segment before rounding.
    fn scaled(&self, segment: &Segment) -> f64 {
        let len = segment.length() as f64;
        if !segment.stretch {
            return len;
        }
        // stretch > 0 here: a stretch segment contributes to the total.
        let spare = (self.target - self.totals.fixed) as f64;
        len * spare / self.totals.stretch as f64
    }
}

/// Sums of a segment list that tiles `1..=n`, or `InvalidSegments`.
fn checked_totals(axis: Axis, segments: &[Segment]) -> Result<AxisTotals, LayoutError> {
    let invalid = LayoutError::InvalidSegments { axis };
    let mut next = 1u64;
    for s in segments {
        if u64::from(s.start) != next || !s.is_ordered() {
            return Err(invalid);
        }
        next = u64::from(s.end) + 1;
    }
    AxisTotals::checked_of(segments).ok_or(invalid)
}

/// Running sums: element `i` is the sum of everything before `i`.
fn offsets<T, I>(values: I) -> Vec<T>
where
    T: Copy + Default + core::ops::Add<Output = T>,
    I: IntoIterator<Item = T>,
{
    values
        .into_iter()
        .scan(T::default(), |acc, v| {
            let at = *acc;
            *acc = at + v;
            Some(at)
        })
        .collect()
}

/// Compute source and destination grids for a `target_width × target_height`
/// canvas.
///
/// Fails without producing any grid when either segment list is empty or
/// does not tile `1..=n` in order, when an axis has no stretch segments but
/// the target differs from its fixed size, or when the target is smaller
/// than an axis's fixed size.
pub fn build_grids(
    horizontal: &[Segment],
    vertical: &[Segment],
    target_width: u32,
    target_height: u32,
) -> Result<Grids, LayoutError> {
    if horizontal.is_empty() {
        return Err(LayoutError::EmptySegmentList {
            axis: Axis::Horizontal,
        });
    }
    if vertical.is_empty() {
        return Err(LayoutError::EmptySegmentList {
            axis: Axis::Vertical,
        });
    }
    let h_scale = AxisScale::new(Axis::Horizontal, horizontal, target_width)?;
    let v_scale = AxisScale::new(Axis::Vertical, vertical, target_height)?;
    let target = Size::new(target_width, target_height);

    log::debug!(
        "nine-patch grid {}x{} cells -> {}x{} (h {:?}, v {:?})",
        vertical.len(),
        horizontal.len(),
        target_width,
        target_height,
        h_scale.totals,
        v_scale.totals
    );

    let source = source_grid(horizontal, vertical);
    let provisional = provisional_grid(horizontal, vertical, &h_scale, &v_scale);
    let origins = snap_origins(&provisional, target);
    let destination = derive_extents(&origins, target);

    log::trace!("nine-patch destination tiles: {:?}", destination.cells);

    Ok(Grids {
        source,
        destination,
        target,
    })
}

/// Source tiles. Validated segments start at 1 and abut, so each tile sits
/// at its segment's start, past the marker row and column.
fn source_grid(horizontal: &[Segment], vertical: &[Segment]) -> Grid<Rect> {
    Grid::from_fn(vertical.len(), horizontal.len(), |r, c| {
        let (h, v) = (&horizontal[c], &vertical[r]);
        Rect::new(h.start, v.start, h.length(), v.length())
    })
}

/// Stage 1: destination tiles at exact proportional size.
fn provisional_grid(
    horizontal: &[Segment],
    vertical: &[Segment],
    h_scale: &AxisScale,
    v_scale: &AxisScale,
) -> Grid<RectF> {
    let widths: Vec<f64> = horizontal.iter().map(|s| h_scale.scaled(s)).collect();
    let heights: Vec<f64> = vertical.iter().map(|s| v_scale.scaled(s)).collect();
    let xs = offsets(widths.iter().copied());
    let ys = offsets(heights.iter().copied());
    Grid::from_fn(vertical.len(), horizontal.len(), |r, c| RectF {
        x: xs[c],
        y: ys[r],
        width: widths[c],
        height: heights[r],
    })
}

fn snap(v: f64, limit: u32) -> u32 {
    Float::round(v).clamp(0.0, limit as f64) as u32
}

/// Stage 2: round every origin to the nearest pixel, within the canvas.
fn snap_origins(provisional: &Grid<RectF>, target: Size) -> Grid<Origin> {
    provisional.map(|_, _, r| Origin {
        x: snap(r.x, target.width),
        y: snap(r.y, target.height),
    })
}

/// Stage 3: extents run to the neighbor's snapped origin, or to the canvas
/// edge for the last row and column.
fn derive_extents(origins: &Grid<Origin>, target: Size) -> Grid<Rect> {
    origins.map(|r, c, o| {
        let next_x = origins
            .get(r, c + 1)
            .map_or(target.width, |n| n.x);
        let next_y = origins
            .get(r + 1, c)
            .map_or(target.height, |n| n.y);
        Rect::new(
            o.x,
            o.y,
            next_x.saturating_sub(o.x),
            next_y.saturating_sub(o.y),
        )
    })
}
