mod params;
mod rasterizer;
#[cfg(feature = "sdl")]
mod sdl;
mod shake;
mod surface;

pub use params::{
    ColorParams, DrawTransform, GradientParams, GradientX, GradientY, Layer, UvOrientation,
    UvParams,
};
pub use rasterizer::Rasterizer;
#[cfg(feature = "sdl")]
pub use sdl::{Display, InputEvent, RenderTarget, WindowSurface};
pub use shake::ScreenShake;
pub use surface::{composite_layers, Frame, HeadlessSurface, PresentSurface};
