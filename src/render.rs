//! Drawing a laid-out nine-patch through a host graphics layer.
//!
//! Pixel work is not done here. A [`Host`] supplies sub-image extraction,
//! canvas creation, drawing and export; [`render`] walks the tile grids and
//! drives it. [`SoftwareHost`] is a minimal host over [`PixelBuffer`] using
//! nearest-neighbor scaling.
//!
//! # Example
//!
//! ```
//! use zenpatch::{render, NinePatch, PixelBuffer, SoftwareHost, MARKER};
//!
//! let white = 0xFFFF_FFFF;
//! let mut src = PixelBuffer::new(4, 4, white);
//! src.set(2, 0, MARKER);
//! src.set(0, 2, MARKER);
//!
//! let patch = NinePatch::decode(&src);
//! let out = render(&patch, &mut SoftwareHost::new(0), &src, 20, 10).unwrap();
//! assert_eq!((out.width(), out.height()), (20, 10));
//! ```

use core::convert::Infallible;
use core::fmt;

use crate::grid::{LayoutError, Rect};
use crate::patch::NinePatch;
use crate::pixels::PixelBuffer;

/// Graphics operations the renderer needs from its host.
pub trait Host {
    /// The decoded source bitmap.
    type Source;
    /// A region extracted from the source.
    type SubImage;
    /// Drawing surface.
    type Canvas;
    /// Final exported artifact.
    type Output;
    /// Failure reported by any host operation.
    type Error;

    /// Extract `rect` of `source`.
    fn sub_image(&mut self, source: &Self::Source, rect: Rect)
    -> Result<Self::SubImage, Self::Error>;

    /// Create a blank `width × height` canvas.
    fn create_canvas(&mut self, width: u32, height: u32) -> Result<Self::Canvas, Self::Error>;

    /// Draw `image` scaled into `dest` on `canvas`.
    fn draw(
        &mut self,
        canvas: &mut Self::Canvas,
        image: &Self::SubImage,
        dest: Rect,
    ) -> Result<(), Self::Error>;

    /// Finish `canvas` into the output artifact.
    fn export(&mut self, canvas: Self::Canvas) -> Result<Self::Output, Self::Error>;
}

/// Failure while rendering a nine-patch.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RenderError<E> {
    /// The target size could not be laid out. Nothing was drawn.
    Layout(LayoutError),
    /// The host failed.
    Host(E),
}

impl<E> From<LayoutError> for RenderError<E> {
    fn from(e: LayoutError) -> Self {
        Self::Layout(e)
    }
}

impl<E: fmt::Display> fmt::Display for RenderError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Layout(e) => write!(f, "layout failed: {e}"),
            Self::Host(e) => write!(f, "host graphics failed: {e}"),
        }
    }
}

impl<E: fmt::Debug + fmt::Display> core::error::Error for RenderError<E> {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Layout(e) => Some(e),
            Self::Host(_) => None,
        }
    }
}

/// Render `patch` at `width × height`, reading tiles from `source`.
///
/// The layout is computed before the host is touched, so a layout error
/// leaves no canvas behind. Tiles whose destination is empty are skipped.
pub fn render<H: Host>(
    patch: &NinePatch,
    host: &mut H,
    source: &H::Source,
    width: u32,
    height: u32,
) -> Result<H::Output, RenderError<H::Error>> {
    let grids = patch.layout(width, height)?;
    let mut canvas = host.create_canvas(width, height).map_err(RenderError::Host)?;
    let mut drawn = 0usize;
    for (src, dst) in grids.cells() {
        if dst.is_empty() {
            continue;
        }
        let tile = host.sub_image(source, src).map_err(RenderError::Host)?;
        host.draw(&mut canvas, &tile, dst).map_err(RenderError::Host)?;
        drawn += 1;
    }
    log::debug!(
        "rendered nine-patch at {}x{}: {} of {} tiles drawn",
        width,
        height,
        drawn,
        grids.destination.rows() * grids.destination.cols()
    );
    host.export(canvas).map_err(RenderError::Host)
}

/// In-memory host over [`PixelBuffer`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SoftwareHost {
    background: u32,
}

impl SoftwareHost {
    /// Canvases start filled with `background`.
    pub const fn new(background: u32) -> Self {
        Self { background }
    }
}

impl Host for SoftwareHost {
    type Source = PixelBuffer;
    type SubImage = Option<PixelBuffer>;
    type Canvas = PixelBuffer;
    type Output = PixelBuffer;
    type Error = Infallible;

    fn sub_image(&mut self, source: &PixelBuffer, rect: Rect) -> Result<Self::SubImage, Infallible> {
        Ok(source.crop(rect))
    }

    fn create_canvas(&mut self, width: u32, height: u32) -> Result<PixelBuffer, Infallible> {
        Ok(PixelBuffer::new(width, height, self.background))
    }

    fn draw(
        &mut self,
        canvas: &mut PixelBuffer,
        image: &Self::SubImage,
        dest: Rect,
    ) -> Result<(), Infallible> {
        // Tiles outside the source (a patch decoded from another image)
        // draw nothing.
        if let Some(image) = image {
            canvas.blit_scaled(image, dest);
        }
        Ok(())
    }

    fn export(&mut self, canvas: PixelBuffer) -> Result<PixelBuffer, Infallible> {
        Ok(canvas)
    }
}
