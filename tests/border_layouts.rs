//! Border scans through to destination tiles, for small hand-checked
//! patches.

use zenpatch::*;

const W: u32 = 0xFFFF_FFFF;
const M: u32 = MARKER;

fn widths(g: &Grids) -> Vec<(u32, u32)> {
    g.destination.row(0).iter().map(|r| (r.x, r.width)).collect()
}

#[test]
fn six_pixel_border_scales_to_nine() {
    let h = extract_segments([W, W, W, M, M, W], M);
    assert_eq!(
        h,
        [
            Segment::new(1, 2, false),
            Segment::new(3, 4, true),
            Segment::new(5, 5, false),
        ]
    );
    assert_eq!(AxisTotals::of(&h), AxisTotals { fixed: 3, stretch: 2 });

    let v = extract_segments([W, M], M);
    let g = build_grids(&h, &v, 9, 3).unwrap();
    // The stretch column gets 2 * (9 - 3) / 2 = 6 pixels.
    assert_eq!(widths(&g), [(0, 2), (2, 6), (8, 1)]);
    let last = g.destination.row(0)[2];
    assert_eq!(last.right(), 9);
}

#[test]
fn target_at_fixed_size_collapses_stretch_columns() {
    let h = extract_segments([W, W, W, M, M, W], M);
    let v = extract_segments([W, M], M);
    let g = build_grids(&h, &v, 3, 1).unwrap();
    assert_eq!(widths(&g), [(0, 2), (2, 0), (2, 1)]);
    let total: u32 = g.destination.row(0).iter().map(|r| r.width).sum();
    assert_eq!(total, 3);
}

#[test]
fn separated_marker_runs_become_two_stretch_segments() {
    let h = extract_segments([W, M, M, W, M, M, M, W], M);
    assert_eq!(h.iter().filter(|s| s.stretch).count(), 2);

    // Spare space is split 2:3.
    let v = extract_segments([W, M], M);
    let g = build_grids(&h, &v, 12, 1).unwrap();
    assert_eq!(widths(&g), [(0, 4), (4, 1), (5, 6), (11, 1)]);
}

#[test]
fn corner_only_border_cannot_be_laid_out() {
    // A 2×2 patch has no pixels between its corners.
    let src = PixelBuffer::new(2, 2, M);
    let patch = NinePatch::decode(&src);
    assert!(patch.horizontal().is_empty());
    assert_eq!(
        patch.layout(4, 4),
        Err(LayoutError::EmptySegmentList {
            axis: Axis::Horizontal
        })
    );

    // The bare segment lists are rejected the same way.
    let empty = extract_segments([M], M);
    assert!(empty.is_empty());
    let some = extract_segments([W, M], M);
    assert_eq!(
        build_grids(&some, &empty, 4, 4),
        Err(LayoutError::EmptySegmentList {
            axis: Axis::Vertical
        })
    );
}

#[test]
fn all_fixed_axis_only_accepts_its_own_size() {
    let h = extract_segments([W, W, W, W], M);
    let v = extract_segments([W, M, M], M);
    assert!(build_grids(&h, &v, 3, 10).is_ok());
    for target in [0, 2, 4, 100] {
        let err = build_grids(&h, &v, target, 10).unwrap_err();
        assert_eq!(
            err,
            LayoutError::DegenerateAxis {
                axis: Axis::Horizontal,
                target,
                fixed: 3
            },
            "target {target}"
        );
    }
}

#[test]
fn hand_built_segments_must_tile_from_pixel_one() {
    let v = [Segment::new(1, 1, true)];
    for h in [
        vec![Segment::new(4, 2, true)],
        vec![Segment::new(5, 6, true), Segment::new(20, 20, false)],
        vec![Segment::new(1, 2, false), Segment::new(2, 3, true)],
    ] {
        assert_eq!(
            build_grids(&h, &v, 10, 10),
            Err(LayoutError::InvalidSegments {
                axis: Axis::Horizontal
            }),
            "{h:?}"
        );
    }
    // Scanned lists always pass.
    let h = extract_segments([W, M, W, W, M, M], M);
    assert!(build_grids(&h, &v, 10, 10).is_ok());
}

#[test]
fn layout_error_is_a_std_error() {
    let err: Box<dyn std::error::Error> = Box::new(LayoutError::EmptySegmentList {
        axis: Axis::Vertical,
    });
    assert_eq!(err.to_string(), "vertical border has no segments");
}
