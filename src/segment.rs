//! Border scanning: partition one axis into fixed and stretch segments.
//!
//! A nine-patch marks stretchable bands with [`MARKER`](crate::MARKER)
//! pixels along its top row and left column. Index 0 of each line is the
//! corner and never contributes a segment.
//!
//! # Example
//!
//! ```
//! use zenpatch::{extract_segments, Segment, MARKER};
//!
//! let white = 0xFFFF_FFFF;
//! let line = [white, white, white, MARKER, MARKER, white];
//! let segments = extract_segments(line, MARKER);
//!
//! assert_eq!(
//!     segments,
//!     [
//!         Segment::new(1, 2, false),
//!         Segment::new(3, 4, true),
//!         Segment::new(5, 5, false),
//!     ]
//! );
//! ```

use alloc::vec::Vec;
use core::fmt;

/// Which axis a segment list describes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Scanned along the top row; segments become column widths.
    Horizontal,
    /// Scanned down the left column; segments become row heights.
    Vertical,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
        })
    }
}

/// One contiguous run along an axis, in source pixel coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Segment {
    /// First pixel index (inclusive).
    pub start: u32,
    /// Last pixel index (inclusive).
    pub end: u32,
    /// True when the run is made of marker pixels.
    pub stretch: bool,
}

impl Segment {
    /// Create a segment covering `start..=end`.
    pub const fn new(start: u32, end: u32, stretch: bool) -> Self {
        Self {
            start,
            end,
            stretch,
        }
    }

    /// Number of pixels covered. At least 1 for scanned segments; 0 when
    /// `end < start`.
    pub const fn length(&self) -> u32 {
        match self.end.checked_sub(self.start) {
            Some(d) => d.saturating_add(1),
            None => 0,
        }
    }

    /// Whether `start <= end`.
    pub const fn is_ordered(&self) -> bool {
        self.start <= self.end
    }

    /// This segment grown to end at `end`.
    const fn extended_to(self, end: u32) -> Self {
        Self { end, ..self }
    }
}

/// Fixed and stretch length sums for one axis.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct AxisTotals {
    /// Pixels that keep their size.
    pub fixed: u32,
    /// Pixels that scale with the target.
    pub stretch: u32,
}

impl AxisTotals {
    /// Sum the segments of one axis, saturating at `u32::MAX`.
    pub fn of(segments: &[Segment]) -> Self {
        segments.iter().fold(Self::default(), |acc, s| {
            if s.stretch {
                Self {
                    stretch: acc.stretch.saturating_add(s.length()),
                    ..acc
                }
            } else {
                Self {
                    fixed: acc.fixed.saturating_add(s.length()),
                    ..acc
                }
            }
        })
    }

    /// Sum the segments of one axis. `None` if the total overflows `u32`.
    pub fn checked_of(segments: &[Segment]) -> Option<Self> {
        let totals = segments.iter().try_fold(Self::default(), |acc, s| {
            Some(if s.stretch {
                Self {
                    stretch: acc.stretch.checked_add(s.length())?,
                    ..acc
                }
            } else {
                Self {
                    fixed: acc.fixed.checked_add(s.length())?,
                    ..acc
                }
            })
        })?;
        totals.fixed.checked_add(totals.stretch)?;
        Some(totals)
    }

    /// Total scanned extent.
    pub fn total(&self) -> u32 {
        self.fixed.saturating_add(self.stretch)
    }
}

/// Scan state: segments already closed plus the run in progress.
#[derive(Default)]
struct Scan {
    done: Vec<Segment>,
    current: Option<Segment>,
}

impl Scan {
    fn step(self, index: u32, is_marker: bool) -> Self {
        let Scan { mut done, current } = self;
        let current = match current {
            Some(run) if run.stretch == is_marker => run.extended_to(index),
            other => {
                done.extend(other);
                Segment::new(index, index, is_marker)
            }
        };
        Scan {
            done,
            current: Some(current),
        }
    }

    fn finish(self) -> Vec<Segment> {
        let Scan { mut done, current } = self;
        done.extend(current);
        done
    }
}

/// Partition one border line into fixed and stretch segments.
///
/// `line` yields every pixel of the line, starting with the corner at
/// index 0, which is skipped. Adjacent pixels that agree on being the
/// marker merge into one segment; two marker runs separated by any other
/// pixel stay separate.
///
/// Lines shorter than two pixels produce an empty list.
pub fn extract_segments<I>(line: I, marker: u32) -> Vec<Segment>
where
    I: IntoIterator<Item = u32>,
{
    line.into_iter()
        .zip(0u32..)
        .skip(1)
        .fold(Scan::default(), |scan, (value, index)| {
            scan.step(index, value == marker)
        })
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    const W: u32 = 0xFFFF_FFFF;
    const M: u32 = crate::MARKER;

    /// Segments must cover `[1, len-1]` exactly, in increasing order.
    fn assert_covers(segments: &[Segment], len: u32) {
        let mut next = 1;
        for s in segments {
            assert_eq!(s.start, next, "gap or overlap before {s:?}");
            assert!(s.end >= s.start);
            next = s.end + 1;
        }
        assert_eq!(next, len.max(1), "segments stop short of {len}");
    }

    #[test]
    fn corner_pixel_is_skipped() {
        // Corner is a marker, the rest is not.
        let s = extract_segments([M, W, W], M);
        assert_eq!(s, [Segment::new(1, 2, false)]);
    }

    #[test]
    fn mixed_line() {
        let s = extract_segments([W, W, W, M, M, W], M);
        assert_eq!(
            s,
            [
                Segment::new(1, 2, false),
                Segment::new(3, 4, true),
                Segment::new(5, 5, false),
            ]
        );
        assert_covers(&s, 6);
    }

    #[test]
    fn separated_marker_runs_stay_separate() {
        // Marker runs of 2 and 3 with one plain pixel between them.
        let s = extract_segments([W, M, M, W, M, M, M], M);
        let stretch: Vec<_> = s.iter().filter(|s| s.stretch).collect();
        assert_eq!(stretch.len(), 2);
        assert_eq!(*stretch[0], Segment::new(1, 2, true));
        assert_eq!(*stretch[1], Segment::new(4, 6, true));
        assert_covers(&s, 7);
    }

    #[test]
    fn non_marker_colors_all_count_as_fixed() {
        // Different non-marker colors do not split a fixed run.
        let s = extract_segments([W, 0x1234_5678, W, 0xFF00_00FF], M);
        assert_eq!(s, [Segment::new(1, 3, false)]);
    }

    #[test]
    fn marker_with_different_alpha_is_not_a_marker() {
        let s = extract_segments([W, 0x0000_0080, M], M);
        assert_eq!(
            s,
            [Segment::new(1, 1, false), Segment::new(2, 2, true)]
        );
    }

    #[test]
    fn all_marker_line() {
        let s = extract_segments(vec![M; 10], M);
        assert_eq!(s, [Segment::new(1, 9, true)]);
    }

    #[test]
    fn alternating_line() {
        let line: Vec<u32> = (0..12).map(|i| if i % 2 == 0 { M } else { W }).collect();
        let s = extract_segments(line, M);
        assert_eq!(s.len(), 11);
        assert!(s.iter().all(|s| s.length() == 1));
        assert!(s.windows(2).all(|w| w[0].stretch != w[1].stretch));
        assert_covers(&s, 12);
    }

    #[test]
    fn short_lines_are_empty() {
        assert!(extract_segments([], M).is_empty());
        assert!(extract_segments([M], M).is_empty());
        assert_eq!(extract_segments([M, M], M), [Segment::new(1, 1, true)]);
    }

    #[test]
    fn custom_marker() {
        let red = 0xFF00_00FF;
        let s = extract_segments([W, red, M], red);
        assert_eq!(
            s,
            [Segment::new(1, 1, true), Segment::new(2, 2, false)]
        );
    }

    #[test]
    fn coverage_on_pseudorandom_lines() {
        // Simple LCG; deterministic without extra dependencies.
        let mut state = 0x2545_F491_u32;
        for len in 0..64u32 {
            let line: Vec<u32> = (0..len)
                .map(|_| {
                    state = state.wrapping_mul(1_103_515_245).wrapping_add(12345);
                    if state >> 31 == 1 { M } else { W }
                })
                .collect();
            let s = extract_segments(line, M);
            if len < 2 {
                assert!(s.is_empty());
            } else {
                assert_covers(&s, len);
                assert!(s.windows(2).all(|w| w[0].stretch != w[1].stretch));
            }
        }
    }

    #[test]
    fn totals() {
        let s = extract_segments([W, W, W, M, M, W], M);
        let t = AxisTotals::of(&s);
        assert_eq!(t, AxisTotals { fixed: 3, stretch: 2 });
        assert_eq!(t.total(), 5);
        assert_eq!(AxisTotals::of(&[]), AxisTotals::default());
        assert_eq!(AxisTotals::checked_of(&s), Some(t));
    }

    #[test]
    fn inverted_segment_has_zero_length() {
        let s = Segment::new(4, 2, true);
        assert!(!s.is_ordered());
        assert_eq!(s.length(), 0);
        assert!(Segment::new(2, 2, false).is_ordered());
    }

    #[test]
    fn totals_overflow() {
        let huge = [
            Segment::new(0, u32::MAX - 1, false),
            Segment::new(0, 10, true),
        ];
        assert_eq!(AxisTotals::checked_of(&huge), None);
        let t = AxisTotals::of(&huge);
        assert_eq!(t.fixed, u32::MAX);
        assert_eq!(t.total(), u32::MAX);
    }
}
