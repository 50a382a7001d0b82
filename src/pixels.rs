//! Owned RGBA pixel buffer with bounds-checked access.
//!
//! Pixels are packed into a `u32` in big-endian RGBA order, so the byte
//! sequence `[r, g, b, a]` becomes `0xRRGGBBAA`. Opaque black is therefore
//! `0x000000FF`, which is the default nine-patch [`MARKER`].

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use crate::grid::Rect;

/// Marker color for stretch regions: opaque black.
pub const MARKER: u32 = 0x0000_00FF;

/// Pack 8-bit channels into a pixel value.
pub const fn pack_rgba(r: u8, g: u8, b: u8, a: u8) -> u32 {
    u32::from_be_bytes([r, g, b, a])
}

/// Split a pixel value into `[r, g, b, a]`.
pub const fn unpack_rgba(pixel: u32) -> [u8; 4] {
    pixel.to_be_bytes()
}

/// Error constructing a [`PixelBuffer`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PixelError {
    /// Width or height is zero.
    ZeroDimension,
    /// Stride is smaller than the width.
    StrideTooSmall { width: u32, stride: u32 },
    /// The pixel data does not match the declared geometry.
    LengthMismatch { expected: usize, actual: usize },
}

impl fmt::Display for PixelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroDimension => f.write_str("pixel buffer has a zero dimension"),
            Self::StrideTooSmall { width, stride } => {
                write!(f, "stride {stride} is smaller than width {width}")
            }
            Self::LengthMismatch { expected, actual } => {
                write!(f, "expected {expected} values, got {actual}")
            }
        }
    }
}

impl core::error::Error for PixelError {}

/// A contiguous RGBA image with explicit stride.
///
/// `stride` is measured in pixels, not bytes. Rows may carry padding
/// beyond `width`; padding pixels are never read through the public API.
#[derive(Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    stride: u32,
    data: Vec<u32>,
}

impl fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("stride", &self.stride)
            .finish_non_exhaustive()
    }
}

impl PixelBuffer {
    /// A buffer filled with one color.
    pub fn new(width: u32, height: u32, fill: u32) -> Self {
        Self {
            width,
            height,
            stride: width,
            data: vec![fill; width as usize * height as usize],
        }
    }

    /// Wrap packed pixels laid out with the given stride.
    pub fn from_pixels(
        width: u32,
        height: u32,
        stride: u32,
        data: Vec<u32>,
    ) -> Result<Self, PixelError> {
        if width == 0 || height == 0 {
            return Err(PixelError::ZeroDimension);
        }
        if stride < width {
            return Err(PixelError::StrideTooSmall { width, stride });
        }
        // The last row only needs `width` pixels.
        let expected = stride as usize * (height as usize - 1) + width as usize;
        if data.len() < expected {
            return Err(PixelError::LengthMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            stride,
            data,
        })
    }

    /// Build from tightly packed 8-bit RGBA bytes.
    pub fn from_rgba8(width: u32, height: u32, bytes: &[u8]) -> Result<Self, PixelError> {
        let expected = width as usize * height as usize * 4;
        if bytes.len() != expected {
            return Err(PixelError::LengthMismatch {
                expected,
                actual: bytes.len(),
            });
        }
        let data = bytes
            .chunks_exact(4)
            .map(|px| pack_rgba(px[0], px[1], px[2], px[3]))
            .collect();
        Self::from_pixels(width, height, width, data)
    }

    /// Tightly packed 8-bit RGBA bytes, stride padding removed.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.width as usize * self.height as usize * 4);
        for y in 0..self.height {
            for &px in self.row_slice(y) {
                out.extend_from_slice(&unpack_rgba(px));
            }
        }
        out
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row pitch in pixels.
    pub fn stride(&self) -> u32 {
        self.stride
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.stride as usize + x as usize)
        } else {
            None
        }
    }

    /// Pixel at `(x, y)`, or `None` when out of bounds.
    pub fn get(&self, x: u32, y: u32) -> Option<u32> {
        self.index(x, y).map(|i| self.data[i])
    }

    /// Overwrite the pixel at `(x, y)`. Returns false when out of bounds.
    pub fn set(&mut self, x: u32, y: u32, value: u32) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.data[i] = value;
                true
            }
            None => false,
        }
    }

    fn row_slice(&self, y: u32) -> &[u32] {
        let start = y as usize * self.stride as usize;
        &self.data[start..start + self.width as usize]
    }

    /// Pixels of row `y`, left to right. Empty when `y` is out of bounds.
    pub fn row(&self, y: u32) -> impl Iterator<Item = u32> + '_ {
        let slice = if y < self.height {
            self.row_slice(y)
        } else {
            &[]
        };
        slice.iter().copied()
    }

    /// Pixels of column `x`, top to bottom. Empty when `x` is out of bounds.
    pub fn column(&self, x: u32) -> impl Iterator<Item = u32> + '_ {
        let height = if x < self.width { self.height } else { 0 };
        (0..height).map(move |y| self.data[y as usize * self.stride as usize + x as usize])
    }

    /// Copy out a sub-rectangle, clamped to the buffer bounds.
    ///
    /// Returns `None` when the clamped region is empty.
    pub fn crop(&self, rect: Rect) -> Option<Self> {
        let x0 = rect.x.min(self.width);
        let y0 = rect.y.min(self.height);
        let w = rect.width.min(self.width - x0);
        let h = rect.height.min(self.height - y0);
        if w == 0 || h == 0 {
            return None;
        }
        let mut data = Vec::with_capacity(w as usize * h as usize);
        for y in y0..y0 + h {
            data.extend_from_slice(&self.row_slice(y)[x0 as usize..(x0 + w) as usize]);
        }
        Some(Self {
            width: w,
            height: h,
            stride: w,
            data,
        })
    }

    /// Nearest-neighbor scale `src` into `dest`, clipped to this buffer.
    pub fn blit_scaled(&mut self, src: &PixelBuffer, dest: Rect) {
        if dest.width == 0 || dest.height == 0 {
            return;
        }
        let x_end = dest.x.saturating_add(dest.width).min(self.width);
        let y_end = dest.y.saturating_add(dest.height).min(self.height);
        for dy in dest.y..y_end {
            let sy = ((dy - dest.y) as u64 * src.height as u64 / dest.height as u64) as u32;
            for dx in dest.x..x_end {
                let sx = ((dx - dest.x) as u64 * src.width as u64 / dest.width as u64) as u32;
                if let Some(px) = src.get(sx, sy) {
                    let i = dy as usize * self.stride as usize + dx as usize;
                    self.data[i] = px;
                }
            }
        }
    }
}

#[cfg(feature = "image")]
impl PixelBuffer {
    /// Convert from an `image` crate RGBA buffer.
    pub fn from_rgba_image(img: &image::RgbaImage) -> Result<Self, PixelError> {
        let (w, h) = img.dimensions();
        Self::from_rgba8(w, h, img.as_raw())
    }

    /// Convert into an `image` crate RGBA buffer.
    pub fn to_rgba_image(&self) -> Option<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.to_rgba8())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_is_opaque_black() {
        assert_eq!(pack_rgba(0, 0, 0, 255), MARKER);
        assert_eq!(unpack_rgba(MARKER), [0, 0, 0, 255]);
    }

    #[test]
    fn rgba8_roundtrip_preserves_channels() {
        let bytes = [1, 2, 3, 4, 5, 6, 7, 8];
        let buf = PixelBuffer::from_rgba8(2, 1, &bytes).unwrap();
        assert_eq!(buf.get(0, 0), Some(0x0102_0304));
        assert_eq!(buf.get(1, 0), Some(0x0506_0708));
        assert_eq!(buf.to_rgba8(), bytes);
    }

    #[test]
    fn rgba8_wrong_length_errors() {
        assert_eq!(
            PixelBuffer::from_rgba8(2, 2, &[0; 12]),
            Err(PixelError::LengthMismatch {
                expected: 16,
                actual: 12
            })
        );
    }

    #[test]
    fn from_pixels_validates_geometry() {
        assert_eq!(
            PixelBuffer::from_pixels(0, 1, 0, vec![]),
            Err(PixelError::ZeroDimension)
        );
        assert_eq!(
            PixelBuffer::from_pixels(4, 1, 3, vec![0; 4]),
            Err(PixelError::StrideTooSmall {
                width: 4,
                stride: 3
            })
        );
        // Last row may omit its padding.
        assert!(PixelBuffer::from_pixels(2, 2, 3, vec![0; 5]).is_ok());
    }

    #[test]
    fn stride_padding_is_skipped() {
        // 2x2 image with one pixel of padding per row.
        let buf = PixelBuffer::from_pixels(2, 2, 3, vec![1, 2, 99, 3, 4, 99]).unwrap();
        assert_eq!(buf.row(0).collect::<Vec<_>>(), [1, 2]);
        assert_eq!(buf.row(1).collect::<Vec<_>>(), [3, 4]);
        assert_eq!(buf.column(1).collect::<Vec<_>>(), [2, 4]);
        assert_eq!(buf.to_rgba8().len(), 16);
    }

    #[test]
    fn out_of_bounds_access() {
        let mut buf = PixelBuffer::new(2, 2, 0);
        assert_eq!(buf.get(2, 0), None);
        assert!(!buf.set(0, 2, 1));
        assert_eq!(buf.row(5).count(), 0);
        assert_eq!(buf.column(5).count(), 0);
    }

    #[test]
    fn crop_clamps_to_bounds() {
        let buf = PixelBuffer::from_pixels(3, 3, 3, (0..9).collect()).unwrap();
        let c = buf.crop(Rect::new(1, 1, 5, 5)).unwrap();
        assert_eq!((c.width(), c.height()), (2, 2));
        assert_eq!(c.row(0).collect::<Vec<_>>(), [4, 5]);
        assert_eq!(c.row(1).collect::<Vec<_>>(), [7, 8]);
        assert!(buf.crop(Rect::new(3, 0, 1, 1)).is_none());
    }

    #[test]
    fn blit_scaled_nearest_neighbor() {
        let src = PixelBuffer::from_pixels(2, 1, 2, vec![7, 8]).unwrap();
        let mut dst = PixelBuffer::new(5, 1, 0);
        dst.blit_scaled(&src, Rect::new(1, 0, 4, 1));
        assert_eq!(dst.row(0).collect::<Vec<_>>(), [0, 7, 7, 8, 8]);
    }

    #[test]
    fn blit_scaled_clips_to_canvas() {
        let src = PixelBuffer::new(1, 1, 3);
        let mut dst = PixelBuffer::new(2, 2, 0);
        dst.blit_scaled(&src, Rect::new(1, 1, 10, 10));
        assert_eq!(dst.get(1, 1), Some(3));
        assert_eq!(dst.get(0, 0), Some(0));
    }
}
