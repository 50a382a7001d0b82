//! SVG visualization of a nine-patch layout.
//!
//! Generates two annotated panels: the source bitmap with its stretch bands,
//! and the target canvas with every destination tile outlined.
//!
//! # Example
//!
//! ```
//! use zenpatch::{NinePatch, PixelBuffer, MARKER, svg::render_patch_svg};
//!
//! let mut src = PixelBuffer::new(5, 5, 0xFFFF_FFFF);
//! src.set(2, 0, MARKER);
//! src.set(0, 2, MARKER);
//!
//! let patch = NinePatch::decode(&src);
//! let grids = patch.layout(40, 20).unwrap();
//!
//! let svg = render_patch_svg(&patch, &grids);
//! assert!(svg.starts_with("<svg"));
//! ```

#[cfg(not(feature = "std"))]
use alloc::format;
#[cfg(not(feature = "std"))]
use alloc::string::String;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::grid::{Grids, Size};
use crate::patch::NinePatch;

/// Maximum pixel width for any panel in the SVG output.
const MAX_PANEL_W: f64 = 300.0;
/// Maximum pixel height for any panel in the SVG output.
const MAX_PANEL_H: f64 = 200.0;
/// Vertical gap between panels.
const PANEL_GAP: f64 = 50.0;
/// Horizontal margin.
const MARGIN_X: f64 = 50.0;
/// Top margin for first panel.
const MARGIN_TOP: f64 = 30.0;
/// Height of label text area above each panel.
const LABEL_H: f64 = 22.0;

/// One rectangle inside a panel, in that panel's pixel space.
struct Tile {
    x: u32,
    y: u32,
    w: u32,
    h: u32,
    stretch: bool,
}

/// One panel of the diagram.
struct Panel {
    label: String,
    outer: Size,
    tiles: Vec<Tile>,
    annotation: String,
}

/// Render a complete SVG document showing source bands and target tiles.
pub fn render_patch_svg(patch: &NinePatch, grids: &Grids) -> String {
    let panels = [source_panel(patch), target_panel(patch, grids)];
    render_panels(&panels)
}

fn source_panel(patch: &NinePatch) -> Panel {
    let size = patch.source_size();
    let mut tiles = Vec::new();
    for s in patch.horizontal().iter().filter(|s| s.stretch) {
        tiles.push(Tile {
            x: s.start,
            y: 0,
            w: s.length(),
            h: size.height,
            stretch: true,
        });
    }
    for s in patch.vertical().iter().filter(|s| s.stretch) {
        tiles.push(Tile {
            x: 0,
            y: s.start,
            w: size.width,
            h: s.length(),
            stretch: true,
        });
    }
    let min = patch.min_size();
    Panel {
        label: format!("Source  {}×{}", size.width, size.height),
        outer: size,
        tiles,
        annotation: format!(
            "{}×{} segments, min {}×{}",
            patch.horizontal().len(),
            patch.vertical().len(),
            min.width,
            min.height
        ),
    }
}

fn target_panel(patch: &NinePatch, grids: &Grids) -> Panel {
    let h = patch.horizontal();
    let v = patch.vertical();
    let d = &grids.destination;
    let mut tiles = Vec::with_capacity(d.rows() * d.cols());
    for r in 0..d.rows() {
        for (c, rect) in d.row(r).iter().enumerate() {
            let stretch = h.get(c).is_some_and(|s| s.stretch) || v.get(r).is_some_and(|s| s.stretch);
            tiles.push(Tile {
                x: rect.x,
                y: rect.y,
                w: rect.width,
                h: rect.height,
                stretch,
            });
        }
    }
    Panel {
        label: format!("Target  {}×{}", grids.target.width, grids.target.height),
        outer: grids.target,
        tiles,
        annotation: format!("{} tiles", d.rows() * d.cols()),
    }
}

/// Compute scale factor to fit a size into the max panel dimensions.
fn scale_to_fit(size: Size) -> (f64, f64, f64) {
    let w = size.width as f64;
    let h = size.height as f64;
    if w == 0.0 || h == 0.0 {
        return (1.0, 1.0, 1.0);
    }
    let scale = (MAX_PANEL_W / w).min(MAX_PANEL_H / h);
    (w * scale, h * scale, scale)
}

/// Render panels into a complete SVG document.
fn render_panels(panels: &[Panel]) -> String {
    let total_h = MARGIN_TOP * 2.0
        + panels.len() as f64 * (LABEL_H + MAX_PANEL_H)
        + panels.len().saturating_sub(1) as f64 * PANEL_GAP;
    let total_w = MAX_PANEL_W + 2.0 * MARGIN_X;

    let mut svg = String::with_capacity(4096);
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        total_w as u32, total_h as u32, total_w, total_h
    ));
    svg.push('\n');

    svg.push_str(
        r##"<style>
  text { font-family: "Consolas", "DejaVu Sans Mono", "Courier New", monospace; }
  .label { font-size: 13px; font-weight: bold; fill: #333; }
  .annotation { font-size: 11px; fill: #666; }
  .outer { fill: #e8e8e8; stroke: #999; stroke-width: 1; }
  .fixed { fill: #6ba3d6; stroke: #2c6faa; stroke-width: 1; }
  .stretch { fill: #b8d4ee; stroke: #7baed0; stroke-width: 1; stroke-dasharray: 4,2; }
  @media (prefers-color-scheme: dark) {
    .label { fill: #e0e0e0; }
    .annotation { fill: #aaa; }
    .outer { fill: #2d2d2d; stroke: #555; }
    .fixed { fill: #3a72a4; stroke: #5a9fd4; }
    .stretch { fill: #2a4a65; stroke: #4a7a9e; }
  }
</style>
"##,
    );

    let center_x = total_w / 2.0;
    let mut y = MARGIN_TOP;
    for panel in panels {
        svg.push_str(&format!(
            r#"<text x="{}" y="{}" class="label" text-anchor="middle">{}</text>"#,
            center_x,
            y + 14.0,
            escape_xml(&panel.label)
        ));
        svg.push('\n');
        y += LABEL_H;

        let (pw, ph, scale) = scale_to_fit(panel.outer);
        let px = center_x - pw / 2.0;
        let py = y + (MAX_PANEL_H - ph) / 2.0;
        svg.push_str(&format!(
            r#"<rect x="{px:.1}" y="{py:.1}" width="{pw:.1}" height="{ph:.1}" class="outer"/>"#
        ));
        svg.push('\n');

        for t in panel.tiles.iter().filter(|t| t.w > 0 && t.h > 0) {
            let class = if t.stretch { "stretch" } else { "fixed" };
            svg.push_str(&format!(
                r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" class="{class}"/>"#,
                px + t.x as f64 * scale,
                py + t.y as f64 * scale,
                t.w as f64 * scale,
                t.h as f64 * scale
            ));
            svg.push('\n');
        }

        if !panel.annotation.is_empty() {
            svg.push_str(&format!(
                r#"<text x="{}" y="{:.1}" class="annotation" text-anchor="middle">{}</text>"#,
                center_x,
                py + ph + 14.0,
                escape_xml(&panel.annotation)
            ));
            svg.push('\n');
        }

        y += MAX_PANEL_H + PANEL_GAP;
    }

    svg.push_str("</svg>\n");
    svg
}

/// Escape special characters for XML text content.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
