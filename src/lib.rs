//! pixelcade: a CPU-side 2D rasterizer for arcade-style games
//!
//! Everything is drawn into two software layers at a small logical
//! resolution: a persistent background and a foreground that is cleared
//! after every present. Presentation magnifies both layers, applies the
//! screen-shake offset and hands them to a [`display::PresentSurface`]
//! (an SDL2 window with the `sdl` feature, or [`display::HeadlessSurface`]).

pub mod animation;
pub mod color;
pub mod config;
pub mod display;
pub mod easing;
pub mod font;
pub mod geometry;
pub mod pixel_buffer;
pub mod projector;
pub mod sprite;
pub mod texture;
pub mod util;

pub use animation::{AnimatedSprite, Animation, AnimationFrame, AnimationPlayer};
pub use color::{Color, PixelFormat};
pub use config::EngineConfig;
pub use display::{
    ColorParams, DrawTransform, GradientParams, GradientX, GradientY, HeadlessSurface, Layer,
    PresentSurface, Rasterizer, UvOrientation, UvParams,
};
pub use font::{BitmapFont, XAlign, YAlign};
pub use geometry::{AARect, Circle, Line2D, Ray2D, Shape, Triangle, Vec2};
pub use pixel_buffer::PixelBuffer;
pub use sprite::{SpriteRegion, SpriteSheet};
pub use texture::Texture;
