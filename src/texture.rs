//! Texture atlas storage and region sampling
//!
//! Pixels are kept as plain RGBA bytes. Sampling is always relative to a
//! [`SpriteRegion`] and takes normalized UV coordinates local to that region.

use crate::color::Color;
use crate::sprite::SpriteRegion;

/// A texture stored as RGBA pixels
#[derive(Clone)]
pub struct Texture {
    width: u32,
    height: u32,
    pixels: Vec<u8>, // RGBA format, 4 bytes per pixel
}

impl Texture {
    /// Create a new transparent texture
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; (width * height * 4) as usize],
        }
    }

    /// Create texture from raw RGBA data
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
        if data.len() == (width * height * 4) as usize {
            Some(Self {
                width,
                height,
                pixels: data,
            })
        } else {
            None
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

    /// Region covering the whole texture
    pub fn full_region(&self) -> SpriteRegion {
        SpriteRegion::new(0, 0, self.width, self.height)
    }

    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        if x < self.width && y < self.height {
            let idx = ((y * self.width + x) * 4) as usize;
            self.pixels[idx..idx + 4].copy_from_slice(&<[u8; 4]>::from(color));
        }
    }

    /// Read a texel, None outside the texture
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<Color> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        let idx = ((y as u32 * self.width + x as u32) * 4) as usize;
        let p = &self.pixels[idx..idx + 4];
        Some(Color::rgba(p[0], p[1], p[2], p[3]))
    }

    /// Copy a whole texture into this one at (x, y), clipped to bounds
    pub fn blit(&mut self, src: &Texture, x: u32, y: u32) {
        for sy in 0..src.height {
            for sx in 0..src.width {
                if let Some(c) = src.get_pixel(sx as i32, sy as i32) {
                    self.set_pixel(x + sx, y + sy, c);
                }
            }
        }
    }

    /// Nearest-texel sample: `region.offset + round(uv * region.size)`, clamped
    /// to the region's last texel. None when the texel falls outside the atlas.
    pub fn sample_nearest(&self, region: &SpriteRegion, u: f32, v: f32) -> Option<Color> {
        let tx = (u * region.width as f32).round() as i32;
        let ty = (v * region.height as f32).round() as i32;
        let (tx, ty) = region.clamp_local(tx, ty);
        self.get_pixel(region.x as i32 + tx, region.y as i32 + ty)
    }

    /// Bilinear sample over the 2x2 neighborhood at `uv * region.size`,
    /// neighbors clamped to the region edge.
    pub fn sample_bilinear(&self, region: &SpriteRegion, u: f32, v: f32) -> Option<Color> {
        let fu = u * region.width as f32;
        let fv = v * region.height as f32;
        let fx = fu.fract().max(0.0);
        let fy = fv.fract().max(0.0);

        let (x0, y0) = region.clamp_local(fu.floor() as i32, fv.floor() as i32);
        let (x1, y1) = region.clamp_local(x0 + 1, y0 + 1);
        let (ox, oy) = (region.x as i32, region.y as i32);

        // Sample 4 corners
        let c00 = self.get_pixel(ox + x0, oy + y0)?;
        let c10 = self.get_pixel(ox + x1, oy + y0).unwrap_or(c00);
        let c01 = self.get_pixel(ox + x0, oy + y1).unwrap_or(c00);
        let c11 = self.get_pixel(ox + x1, oy + y1).unwrap_or(c00);

        let lerp = |a: u8, b: u8, t: f32| a as f32 + (b as f32 - a as f32) * t;
        let mix = |a: u8, b: u8, c: u8, d: u8| -> u8 {
            let top = lerp(a, b, fx);
            let bottom = lerp(c, d, fx);
            (top + (bottom - top) * fy).round().clamp(0.0, 255.0) as u8
        };

        Some(Color::rgba(
            mix(c00.red(), c10.red(), c01.red(), c11.red()),
            mix(c00.green(), c10.green(), c01.green(), c11.green()),
            mix(c00.blue(), c10.blue(), c01.blue(), c11.blue()),
            mix(c00.alpha(), c10.alpha(), c01.alpha(), c11.alpha()),
        ))
    }
}

// ============================================================================
// Procedural Texture Generators
// ============================================================================

impl Texture {
    /// Generate a checkerboard pattern
    pub fn checkerboard(size: u32, tile_size: u32, c1: Color, c2: Color) -> Self {
        let mut tex = Self::new(size, size);
        let tile_size = tile_size.max(1);
        for y in 0..size {
            for x in 0..size {
                let checker = ((x / tile_size) + (y / tile_size)) % 2 == 0;
                tex.set_pixel(x, y, if checker { c1 } else { c2 });
            }
        }
        tex
    }

    /// Generate a plasma texture using sine waves
    pub fn plasma(size: u32, palette: &[Color]) -> Self {
        let mut tex = Self::new(size, size);
        if palette.is_empty() {
            return tex;
        }
        let scale = std::f32::consts::TAU / size as f32;

        for y in 0..size {
            for x in 0..size {
                let fx = x as f32 * scale;
                let fy = y as f32 * scale;

                // Sum of sines
                let v1 = (fx * 2.0).sin();
                let v2 = (fy * 3.0).sin();
                let v3 = ((fx + fy) * 1.5).sin();
                let v4 = ((fx * fx + fy * fy).sqrt() * 2.0).sin();

                let sum = (v1 + v2 + v3 + v4 + 4.0) / 8.0; // Normalize to 0-1
                let idx = (sum * (palette.len() - 1) as f32) as usize;
                tex.set_pixel(x, y, palette[idx.min(palette.len() - 1)]);
            }
        }
        tex
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient_texture() -> Texture {
        let mut tex = Texture::new(4, 4);
        for y in 0..4 {
            for x in 0..4 {
                tex.set_pixel(x, y, Color::rgba((x * 60) as u8, (y * 60) as u8, 7, 255));
            }
        }
        tex
    }

    #[test]
    fn test_from_rgba_checks_length() {
        assert!(Texture::from_rgba(2, 2, vec![0; 16]).is_some());
        assert!(Texture::from_rgba(2, 2, vec![0; 15]).is_none());
    }

    #[test]
    fn test_nearest_rounds_and_clamps_to_region() {
        let tex = gradient_texture();
        let region = SpriteRegion::new(1, 1, 2, 2);
        assert_eq!(tex.sample_nearest(&region, 0.0, 0.0), Some(Color::rgba(60, 60, 7, 255)));
        // u = 1 rounds to texel 2, clamped back to the region's last column
        assert_eq!(tex.sample_nearest(&region, 1.0, 1.0), Some(Color::rgba(120, 120, 7, 255)));
    }

    #[test]
    fn test_bilinear_matches_nearest_on_texel() {
        let tex = gradient_texture();
        let region = tex.full_region();
        for (u, v) in [(0.0, 0.0), (0.25, 0.5), (0.5, 0.75)] {
            assert_eq!(
                tex.sample_bilinear(&region, u, v),
                tex.sample_nearest(&region, u, v)
            );
        }
    }

    #[test]
    fn test_bilinear_blends_between_texels() {
        let tex = gradient_texture();
        let c = tex.sample_bilinear(&tex.full_region(), 0.125, 0.0).unwrap();
        assert_eq!(c.red(), 30);
        assert_eq!(c.green(), 0);
    }

    #[test]
    fn test_region_outside_atlas_samples_nothing() {
        let tex = gradient_texture();
        let region = SpriteRegion::new(10, 10, 4, 4);
        assert!(tex.sample_nearest(&region, 0.5, 0.5).is_none());
        assert!(tex.sample_bilinear(&region, 0.5, 0.5).is_none());
    }

    #[test]
    fn test_checkerboard_tiles() {
        let tex = Texture::checkerboard(8, 4, Color::WHITE, Color::BLACK);
        assert_eq!(tex.get_pixel(0, 0), Some(Color::WHITE));
        assert_eq!(tex.get_pixel(4, 0), Some(Color::BLACK));
        assert_eq!(tex.get_pixel(4, 4), Some(Color::WHITE));
    }

    #[test]
    fn test_blit_copies_into_place() {
        let mut atlas = Texture::new(8, 8);
        atlas.blit(&Texture::checkerboard(2, 1, Color::RED, Color::BLUE), 3, 3);
        assert_eq!(atlas.get_pixel(3, 3), Some(Color::RED));
        assert_eq!(atlas.get_pixel(4, 3), Some(Color::BLUE));
        assert_eq!(atlas.get_pixel(2, 3), Some(Color::CLEAR_BLACK));
    }
}
