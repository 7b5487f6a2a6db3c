//! Row-major software canvas
//!
//! Pixels are stored as the native-endian bytes of each color's packed value,
//! which is exactly what an SDL streaming texture of the same packed format
//! expects. A buffer is allocated once at its final size and lives as long as
//! the rasterizer that owns it.

use crate::color::{Color, PixelFormat};

const BYTES_PER_PIXEL: usize = 4;

pub struct PixelBuffer {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
    format: PixelFormat,
}

impl PixelBuffer {
    /// Allocate a zero-filled buffer
    pub fn new(format: PixelFormat, width: u32, height: u32) -> Self {
        Self {
            pixels: vec![0; width as usize * height as usize * BYTES_PER_PIXEL],
            width,
            height,
            format,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Check if coordinates are within bounds
    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32
    }

    /// Pixel index `y * width + x`; callers check bounds first
    #[inline]
    fn pixel_index(&self, x: u32, y: u32) -> usize {
        (y * self.width + x) as usize
    }

    /// Overwrite every pixel
    pub fn clear(&mut self, color: Color) {
        let bytes = color.to_format(self.format).packed().to_ne_bytes();
        for px in self.pixels.chunks_exact_mut(BYTES_PER_PIXEL) {
            px.copy_from_slice(&bytes);
        }
    }

    /// Write a pixel; out-of-bounds writes are dropped
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if !self.in_bounds(x, y) {
            return;
        }
        let offset = self.pixel_index(x as u32, y as u32) * BYTES_PER_PIXEL;
        let bytes = color.to_format(self.format).packed().to_ne_bytes();
        self.pixels[offset..offset + BYTES_PER_PIXEL].copy_from_slice(&bytes);
    }

    /// Read a pixel, None outside the buffer
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<Color> {
        if !self.in_bounds(x, y) {
            return None;
        }
        let offset = self.pixel_index(x as u32, y as u32) * BYTES_PER_PIXEL;
        let mut bytes = [0u8; BYTES_PER_PIXEL];
        bytes.copy_from_slice(&self.pixels[offset..offset + BYTES_PER_PIXEL]);
        Some(Color::from_packed(u32::from_ne_bytes(bytes), self.format))
    }

    /// Iterate pixels in row-major order
    pub fn pixels(&self) -> impl Iterator<Item = Color> + '_ {
        let format = self.format;
        self.pixels.chunks_exact(BYTES_PER_PIXEL).map(move |px| {
            Color::from_packed(u32::from_ne_bytes([px[0], px[1], px[2], px[3]]), format)
        })
    }

    /// Copy another buffer of the same size and format
    pub fn copy_from(&mut self, src: &PixelBuffer) {
        assert_eq!(
            (self.width, self.height, self.format),
            (src.width, src.height, src.format),
            "copy_from: buffer shape mismatch"
        );
        self.pixels.copy_from_slice(&src.pixels);
    }

    /// Raw bytes for texture upload
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    /// Bytes per row, as SDL's `Texture::update` expects
    #[inline]
    pub fn pitch(&self) -> usize {
        self.width as usize * BYTES_PER_PIXEL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_zero_filled() {
        let buf = PixelBuffer::new(PixelFormat::Rgba8888, 4, 3);
        assert_eq!(buf.as_bytes().len(), 48);
        assert!(buf.pixels().all(|c| c == Color::CLEAR_BLACK));
        assert_eq!(buf.pitch(), 16);
    }

    #[test]
    fn test_set_get_roundtrip_each_format() {
        for format in [PixelFormat::Rgba8888, PixelFormat::Argb8888, PixelFormat::Bgra8888] {
            let mut buf = PixelBuffer::new(format, 8, 8);
            buf.set_pixel(3, 5, Color::rgba(10, 20, 30, 40));
            let c = buf.get_pixel(3, 5).unwrap();
            assert_eq!(c, Color::rgba(10, 20, 30, 40));
            assert_eq!(c.format(), format);
        }
    }

    #[test]
    fn test_out_of_bounds_is_ignored() {
        let mut buf = PixelBuffer::new(PixelFormat::Rgba8888, 4, 4);
        buf.set_pixel(-1, 0, Color::WHITE);
        buf.set_pixel(4, 0, Color::WHITE);
        buf.set_pixel(0, 4, Color::WHITE);
        assert!(buf.pixels().all(|c| c == Color::CLEAR_BLACK));
        assert_eq!(buf.get_pixel(4, 0), None);
        assert_eq!(buf.get_pixel(0, -1), None);
    }

    #[test]
    fn test_row_major_index() {
        let mut buf = PixelBuffer::new(PixelFormat::Rgba8888, 5, 2);
        buf.set_pixel(1, 1, Color::RED);
        let idx = buf.pixels().position(|c| c == Color::RED);
        assert_eq!(idx, Some(6));
    }

    #[test]
    fn test_clear_and_copy() {
        let mut a = PixelBuffer::new(PixelFormat::Argb8888, 3, 3);
        a.clear(Color::BLUE);
        assert!(a.pixels().all(|c| c == Color::BLUE));

        let mut b = PixelBuffer::new(PixelFormat::Argb8888, 3, 3);
        b.copy_from(&a);
        assert_eq!(b.as_bytes(), a.as_bytes());
    }
}
