//! Nine-patch decoding: segment detection and seamless stretch layout.
//!
//! A nine-patch is a bitmap whose top row and left column mark, with a
//! reserved color, which bands stay fixed and which stretch when the image
//! is drawn at another size. This crate scans those borders and computes
//! where every source tile lands on a target canvas. Pixel compositing is
//! delegated to a host graphics layer.
//!
//! # Modules
//!
//! - [`segment`]: Border scanning into fixed and stretch segments
//! - [`grid`]: Source and destination tile grids with edge snapping
//! - [`patch`]: Decoded nine-patch object and decode options
//! - [`pixels`]: Owned RGBA pixel buffer
//! - [`render`]: Host graphics trait and a software host
//! - `svg`: Layout diagrams (feature `svg`)
//!
//! # Example
//!
//! ```
//! use zenpatch::{NinePatch, PixelBuffer, MARKER};
//!
//! let mut src = PixelBuffer::new(6, 6, 0xFFFF_FFFF);
//! src.set(3, 0, MARKER);
//! src.set(0, 3, MARKER);
//!
//! let patch = NinePatch::decode(&src);
//! let grids = patch.layout(100, 40).unwrap();
//!
//! for (src, dst) in grids.cells() {
//!     assert!(dst.right() <= 100 && dst.bottom() <= 40);
//!     assert!(src.x >= 1 && src.y >= 1);
//! }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

pub mod grid;
pub mod patch;
pub mod pixels;
pub mod render;
pub mod segment;
#[cfg(feature = "svg")]
pub mod svg;

pub use grid::{Grid, Grids, LayoutError, Rect, Size, build_grids};
pub use patch::{BorderMode, DecodeOptions, NinePatch};
pub use pixels::{MARKER, PixelBuffer, PixelError, pack_rgba, unpack_rgba};
pub use render::{Host, RenderError, SoftwareHost, render};
pub use segment::{Axis, AxisTotals, Segment, extract_segments};
