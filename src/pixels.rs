//! Owned pixel buffers and the sources they are copied out of.
//!
//! A [`PixelBuffer`] is a rectangle of raw channel bytes laid out row by row.
//! Rows may be followed by padding (`stride > width * bytes_per_pixel`); the
//! padding is never part of the pixel content.

use image::{DynamicImage, GenericImageView, ImageBuffer, Pixel};

/// A rectangle of raw pixel bytes with an explicit row stride.
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    bytes_per_pixel: usize,
    stride: usize,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap tightly packed rows (`stride == width * bytes_per_pixel`).
    ///
    /// Returns `None` if `data` is too short for the given shape.
    pub fn packed(width: u32, height: u32, bytes_per_pixel: usize, data: Vec<u8>) -> Option<Self> {
        let stride = width as usize * bytes_per_pixel;
        Self::with_stride(width, height, bytes_per_pixel, stride, data)
    }

    /// Wrap rows that start `stride` bytes apart.
    ///
    /// The last row does not need trailing padding. Returns `None` if the
    /// stride is narrower than a row or `data` is too short.
    pub fn with_stride(
        width: u32,
        height: u32,
        bytes_per_pixel: usize,
        stride: usize,
        data: Vec<u8>,
    ) -> Option<Self> {
        let row_len = width as usize * bytes_per_pixel;
        if stride < row_len {
            return None;
        }
        let needed = match height as usize {
            0 => 0,
            h => stride * (h - 1) + row_len,
        };
        if data.len() < needed {
            return None;
        }
        Some(Self {
            width,
            height,
            bytes_per_pixel,
            stride,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn bytes_per_pixel(&self) -> usize {
        self.bytes_per_pixel
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Number of content bytes in one row, excluding padding.
    pub fn row_len(&self) -> usize {
        self.width as usize * self.bytes_per_pixel
    }

    /// Content bytes of row `y`, or `None` past the last row.
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        if y >= self.height {
            return None;
        }
        let start = y as usize * self.stride;
        self.data.get(start..start + self.row_len())
    }

    /// Iterate over the content bytes of each row, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> + '_ {
        (0..self.height).filter_map(move |y| self.row(y))
    }

    /// True if both buffers describe the same width, height and channel layout.
    pub fn same_shape(&self, other: &PixelBuffer) -> bool {
        self.width == other.width
            && self.height == other.height
            && self.bytes_per_pixel == other.bytes_per_pixel
    }
}

/// Anything the grid slicer can copy rectangular regions out of.
pub trait PixelSource {
    /// Width in pixels.
    fn width(&self) -> u32;

    /// Height in pixels.
    fn height(&self) -> u32;

    /// Copy the pixels of the rectangle at (x, y) into an owned buffer.
    ///
    /// # Panics
    ///
    /// If the rectangle does not lie entirely within the source.
    fn region(&self, x: u32, y: u32, width: u32, height: u32) -> PixelBuffer;
}

/// Copy a rectangle out of tightly packed rows of `image_width` pixels.
fn copy_region(
    raw: &[u8],
    (image_width, image_height): (u32, u32),
    bytes_per_pixel: usize,
    (x, y, width, height): (u32, u32, u32, u32),
) -> PixelBuffer {
    assert!(
        x + width <= image_width && y + height <= image_height,
        "region {}x{} at ({}, {}) exceeds {}x{} image",
        width,
        height,
        x,
        y,
        image_width,
        image_height
    );

    let image_stride = image_width as usize * bytes_per_pixel;
    let row_len = width as usize * bytes_per_pixel;

    // One contiguous copy per row
    let mut data = Vec::with_capacity(row_len * height as usize);
    for row in y..y + height {
        let start = row as usize * image_stride + x as usize * bytes_per_pixel;
        data.extend_from_slice(&raw[start..start + row_len]);
    }

    PixelBuffer {
        width,
        height,
        bytes_per_pixel,
        stride: row_len,
        data,
    }
}

impl<P> PixelSource for ImageBuffer<P, Vec<u8>>
where
    P: Pixel<Subpixel = u8>,
{
    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }

    fn region(&self, x: u32, y: u32, width: u32, height: u32) -> PixelBuffer {
        copy_region(
            self.as_raw(),
            self.dimensions(),
            P::CHANNEL_COUNT as usize,
            (x, y, width, height),
        )
    }
}

/// Decoded images keep their native layout: a 16-bit PNG is compared on
/// all of its sample bytes, not on a down-converted copy.
impl PixelSource for DynamicImage {
    fn width(&self) -> u32 {
        GenericImageView::dimensions(self).0
    }

    fn height(&self) -> u32 {
        GenericImageView::dimensions(self).1
    }

    fn region(&self, x: u32, y: u32, width: u32, height: u32) -> PixelBuffer {
        copy_region(
            self.as_bytes(),
            GenericImageView::dimensions(self),
            self.color().bytes_per_pixel() as usize,
            (x, y, width, height),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};

    #[test]
    fn test_packed_buffer_rows() {
        let buf = PixelBuffer::packed(2, 2, 1, vec![1, 2, 3, 4]).unwrap();
        let rows: Vec<&[u8]> = buf.rows().collect();
        assert_eq!(rows, vec![&[1u8, 2][..], &[3u8, 4][..]]);
        assert_eq!(buf.stride(), 2);
    }

    #[test]
    fn test_strided_buffer_skips_padding() {
        // 2x2, 1 byte per pixel, stride 4: bytes 2-3 of each row are padding
        let buf = PixelBuffer::with_stride(2, 2, 1, 4, vec![1, 2, 99, 99, 3, 4]).unwrap();
        assert_eq!(buf.row(0), Some(&[1u8, 2][..]));
        assert_eq!(buf.row(1), Some(&[3u8, 4][..]));
        assert_eq!(buf.row(2), None);
    }

    #[test]
    fn test_buffer_too_short() {
        assert!(PixelBuffer::packed(2, 2, 4, vec![0; 15]).is_none());
    }

    #[test]
    fn test_stride_narrower_than_row() {
        assert!(PixelBuffer::with_stride(4, 1, 4, 8, vec![0; 16]).is_none());
    }

    #[test]
    fn test_zero_height_buffer() {
        let buf = PixelBuffer::packed(4, 0, 4, vec![]).unwrap();
        assert_eq!(buf.rows().count(), 0);
    }

    #[test]
    fn test_region_from_rgba_image() {
        let mut img = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 255]));
        img.put_pixel(2, 1, Rgba([10, 20, 30, 40]));

        let region = img.region(2, 1, 2, 2);
        assert_eq!((region.width(), region.height()), (2, 2));
        assert_eq!(region.bytes_per_pixel(), 4);
        assert_eq!(region.row(0), Some(&[10u8, 20, 30, 40, 0, 0, 0, 255][..]));
        assert_eq!(region.row(1), Some(&[0u8, 0, 0, 255, 0, 0, 0, 255][..]));
    }

    #[test]
    fn test_region_from_rgb_image() {
        let mut img = RgbImage::from_pixel(3, 2, Rgb([1, 1, 1]));
        img.put_pixel(2, 1, Rgb([7, 8, 9]));

        let region = img.region(1, 1, 2, 1);
        assert_eq!(region.bytes_per_pixel(), 3);
        assert_eq!(region.row(0), Some(&[1u8, 1, 1, 7, 8, 9][..]));
    }

    #[test]
    fn test_source_dimensions() {
        let img = RgbaImage::new(40, 24);
        assert_eq!(PixelSource::width(&img), 40);
        assert_eq!(PixelSource::height(&img), 24);
    }

    #[test]
    fn test_region_from_sixteen_bit_image_keeps_low_bytes() {
        // 256 and 257 collapse to the same 8-bit value; their raw bytes differ
        let img = ImageBuffer::<Rgba<u16>, Vec<u16>>::from_fn(2, 1, |x, _| {
            Rgba([256 + x as u16, 0, 0, u16::MAX])
        });
        let dynamic = DynamicImage::ImageRgba16(img);

        let left = dynamic.region(0, 0, 1, 1);
        let right = dynamic.region(1, 0, 1, 1);
        assert_eq!(left.bytes_per_pixel(), 8);
        assert_ne!(left.row(0), right.row(0));
    }

    #[test]
    fn test_region_from_dynamic_rgb8() {
        let mut img = RgbImage::from_pixel(3, 2, Rgb([1, 1, 1]));
        img.put_pixel(2, 1, Rgb([7, 8, 9]));
        let dynamic = DynamicImage::ImageRgb8(img);

        assert_eq!(PixelSource::width(&dynamic), 3);
        assert_eq!(PixelSource::height(&dynamic), 2);
        let region = dynamic.region(1, 1, 2, 1);
        assert_eq!(region.bytes_per_pixel(), 3);
        assert_eq!(region.row(0), Some(&[1u8, 1, 1, 7, 8, 9][..]));
    }

    #[test]
    #[should_panic]
    fn test_region_out_of_bounds_panics() {
        let img = RgbaImage::new(4, 4);
        img.region(2, 2, 4, 4);
    }
}
