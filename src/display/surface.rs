//! Presentation hand-off: where a finished frame goes

use crate::color::Color;
use crate::pixel_buffer::PixelBuffer;

/// Both layers of a finished frame plus how to place them on screen
pub struct Frame<'a> {
    pub background: &'a PixelBuffer,
    pub foreground: &'a PixelBuffer,
    pub magnification: u32,
    /// Shake displacement in window pixels
    pub offset: (i32, i32),
}

impl Frame<'_> {
    /// Foreground composited over background at logical resolution
    pub fn flatten(&self) -> PixelBuffer {
        composite_layers(self.background, self.foreground)
    }
}

/// Copy `background`, then alpha-blend `foreground` over it
pub fn composite_layers(background: &PixelBuffer, foreground: &PixelBuffer) -> PixelBuffer {
    let (w, h) = (background.width(), background.height());
    let mut out = PixelBuffer::new(background.format(), w, h);
    out.copy_from(background);
    for y in 0..h as i32 {
        for x in 0..w as i32 {
            let (Some(fg), Some(bg)) = (foreground.get_pixel(x, y), out.get_pixel(x, y)) else {
                continue;
            };
            if fg.alpha() > 0 {
                out.set_pixel(x, y, Color::blend_over(&fg, &bg));
            }
        }
    }
    out
}

/// Anything that can display a finished frame
pub trait PresentSurface {
    fn present(&mut self, frame: &Frame<'_>) -> Result<(), String>;
}

// ============================================================================
// Headless Surface
// ============================================================================

/// In-memory surface: keeps the last frame flattened, magnified and shifted
/// by the shake offset, with uncovered pixels left black.
#[derive(Default)]
pub struct HeadlessSurface {
    last: Option<PixelBuffer>,
    frames: u64,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_frame(&self) -> Option<&PixelBuffer> {
        self.last.as_ref()
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames
    }
}

impl PresentSurface for HeadlessSurface {
    fn present(&mut self, frame: &Frame<'_>) -> Result<(), String> {
        let flat = frame.flatten();
        let mag = frame.magnification.max(1) as i32;
        let (w, h) = (flat.width() as i32 * mag, flat.height() as i32 * mag);
        let (ox, oy) = frame.offset;

        let mut out = PixelBuffer::new(flat.format(), w as u32, h as u32);
        out.clear(Color::BLACK);
        for y in 0..h {
            for x in 0..w {
                let src_x = (x - ox).div_euclid(mag);
                let src_y = (y - oy).div_euclid(mag);
                if let Some(c) = flat.get_pixel(src_x, src_y) {
                    out.set_pixel(x, y, c);
                }
            }
        }

        self.last = Some(out);
        self.frames += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::PixelFormat;

    fn layers() -> (PixelBuffer, PixelBuffer) {
        let mut bg = PixelBuffer::new(PixelFormat::Rgba8888, 2, 2);
        bg.clear(Color::BLUE);
        let mut fg = PixelBuffer::new(PixelFormat::Rgba8888, 2, 2);
        fg.set_pixel(1, 0, Color::RED);
        (bg, fg)
    }

    #[test]
    fn test_composite_keeps_background_under_empty_foreground() {
        let (bg, fg) = layers();
        let out = composite_layers(&bg, &fg);
        assert_eq!(out.get_pixel(0, 0), Some(Color::BLUE));
        assert_eq!(out.get_pixel(1, 0), Some(Color::RED));
    }

    #[test]
    fn test_headless_magnifies_and_offsets() {
        let (bg, fg) = layers();
        let mut surface = HeadlessSurface::new();
        let frame = Frame {
            background: &bg,
            foreground: &fg,
            magnification: 2,
            offset: (1, 0),
        };
        surface.present(&frame).unwrap();

        let out = surface.last_frame().unwrap();
        assert_eq!((out.width(), out.height()), (4, 4));
        // Shifted right by one window pixel: first column is uncovered
        assert_eq!(out.get_pixel(0, 0), Some(Color::BLACK));
        assert_eq!(out.get_pixel(2, 1), Some(Color::BLUE));
        assert_eq!(surface.frames_presented(), 1);
    }
}
