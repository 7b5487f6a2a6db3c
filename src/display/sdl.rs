//! SDL2 window surface
//!
//! Two streaming textures mirror the two layers: the background is copied
//! opaque, the foreground alpha-blended on top, both into a destination
//! rectangle shifted by the shake offset.

use super::surface::{Frame, PresentSurface};
use crate::color::PixelFormat;
use crate::config::EngineConfig;
use crate::pixel_buffer::PixelBuffer;

use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::pixels::{Color as SdlColor, PixelFormatEnum};
use sdl2::rect::Rect;
use sdl2::render::{BlendMode, Canvas, Texture, TextureCreator};
use sdl2::video::{Window, WindowContext};
use sdl2::EventPump;

pub struct Display {
    canvas: Canvas<Window>,
    event_pump: EventPump,
    width: u32,
    height: u32,
    magnification: u32,
}

/// Layer textures; they borrow the creator returned by [`Display::with_config`]
pub struct RenderTarget<'a> {
    background: Texture<'a>,
    foreground: Texture<'a>,
}

#[derive(Debug, Clone)]
pub enum InputEvent {
    Quit,
    KeyDown(Keycode),
    KeyUp(Keycode),
}

fn sdl_format(format: PixelFormat) -> PixelFormatEnum {
    match format {
        PixelFormat::Rgba8888 => PixelFormatEnum::RGBA8888,
        PixelFormat::Argb8888 => PixelFormatEnum::ARGB8888,
        PixelFormat::Bgra8888 => PixelFormatEnum::BGRA8888,
    }
}

impl Display {
    /// Open a window of `width * magnification` by `height * magnification`
    pub fn with_config(
        title: &str,
        config: &EngineConfig,
    ) -> Result<(Self, TextureCreator<WindowContext>), String> {
        config.validate()?;
        let sdl_context = sdl2::init()?;
        let video_subsystem = sdl_context.video()?;

        let (window_w, window_h) = config.window_size();
        let window = video_subsystem
            .window(title, window_w, window_h)
            .position_centered()
            .build()
            .map_err(|e| e.to_string())?;

        let mut canvas_builder = window.into_canvas().accelerated();
        if config.vsync {
            canvas_builder = canvas_builder.present_vsync();
        }
        let canvas = canvas_builder.build().map_err(|e| e.to_string())?;

        let texture_creator = canvas.texture_creator();
        let event_pump = sdl_context.event_pump()?;

        log::info!(
            "display {}x{} (logical {}x{} x{}), vsync {}",
            window_w,
            window_h,
            config.width,
            config.height,
            config.magnification,
            config.vsync
        );

        Ok((
            Self {
                canvas,
                event_pump,
                width: config.width,
                height: config.height,
                magnification: config.magnification,
            },
            texture_creator,
        ))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn magnification(&self) -> u32 {
        self.magnification
    }

    /// Pair this window with its layer textures for presenting
    pub fn surface<'d, 'a>(&'d mut self, target: &'d mut RenderTarget<'a>) -> WindowSurface<'d, 'a> {
        WindowSurface {
            display: self,
            target,
        }
    }

    fn present(&mut self, target: &mut RenderTarget, frame: &Frame<'_>) -> Result<(), String> {
        upload(&mut target.background, frame.background)?;
        upload(&mut target.foreground, frame.foreground)?;

        let dest = Rect::new(
            frame.offset.0,
            frame.offset.1,
            frame.background.width() * frame.magnification,
            frame.background.height() * frame.magnification,
        );

        self.canvas.set_draw_color(SdlColor::RGB(0, 0, 0));
        self.canvas.clear();
        self.canvas.copy(&target.background, None, dest)?;
        self.canvas.copy(&target.foreground, None, dest)?;
        self.canvas.present();
        Ok(())
    }

    pub fn poll_events(&mut self) -> Vec<InputEvent> {
        let mut events = Vec::new();

        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => events.push(InputEvent::Quit),
                Event::KeyDown {
                    keycode: Some(k), ..
                } => events.push(InputEvent::KeyDown(k)),
                Event::KeyUp {
                    keycode: Some(k), ..
                } => events.push(InputEvent::KeyUp(k)),
                _ => {},
            }
        }

        events
    }
}

fn upload(texture: &mut Texture, buffer: &PixelBuffer) -> Result<(), String> {
    texture
        .update(None, buffer.as_bytes(), buffer.pitch())
        .map_err(|e| e.to_string())
}

impl<'a> RenderTarget<'a> {
    pub fn with_size(
        texture_creator: &'a TextureCreator<WindowContext>,
        format: PixelFormat,
        width: u32,
        height: u32,
    ) -> Result<Self, String> {
        let format = sdl_format(format);
        let mut background = texture_creator
            .create_texture_streaming(format, width, height)
            .map_err(|e| e.to_string())?;
        background.set_blend_mode(BlendMode::None);

        let mut foreground = texture_creator
            .create_texture_streaming(format, width, height)
            .map_err(|e| e.to_string())?;
        foreground.set_blend_mode(BlendMode::Blend);

        Ok(Self {
            background,
            foreground,
        })
    }
}

/// A window plus its layer textures, usable as a [`PresentSurface`]
pub struct WindowSurface<'d, 'a> {
    display: &'d mut Display,
    target: &'d mut RenderTarget<'a>,
}

impl PresentSurface for WindowSurface<'_, '_> {
    fn present(&mut self, frame: &Frame<'_>) -> Result<(), String> {
        self.display.present(self.target, frame)
    }
}
