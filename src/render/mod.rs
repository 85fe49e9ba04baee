//! Rendering seams
//!
//! The simulation never draws; scene painters in [`scenes`] walk the state
//! and issue primitive calls against the [`Surface`] trait. The web build
//! backs it with a canvas 2d context; tests back it with a recording stub.
//!
//! Image readiness is polled at draw time through [`ImageAsset::is_ready`].
//! A sprite whose asset has not finished loading falls back to a primitive
//! shape, every tick, until the asset becomes ready on its own.

pub mod scenes;

use glam::Vec2;

/// Solid RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const RED: Color = Color::rgb(220, 40, 40);
    pub const BLUE: Color = Color::rgb(40, 70, 220);
    pub const GREEN: Color = Color::rgb(40, 160, 70);
    pub const LIGHT_BLUE: Color = Color::rgb(170, 215, 240);
    pub const YELLOW: Color = Color::rgb(240, 210, 60);
    pub const GREY: Color = Color::rgb(130, 130, 130);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// CSS color string for canvas-style backends
    pub fn css(&self) -> String {
        format!("rgb({},{},{})", self.r, self.g, self.b)
    }
}

/// An image resource owned by the host. Loading is asynchronous; the only
/// capability the game needs is the readiness poll.
pub trait ImageAsset {
    fn is_ready(&self) -> bool;
}

/// An audio resource owned by the host.
pub trait AudioHandle {
    fn play(&self);
}

/// Primitive drawing surface
///
/// Coordinates are in logical pixels, origin top-left, y down - the same
/// space the simulation works in.
pub trait Surface {
    type Image: ImageAsset;

    fn width(&self) -> f32;
    fn height(&self) -> f32;

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color);
    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color);
    /// Filled circular sector from `start` to `end` radians
    fn fill_arc(&mut self, cx: f32, cy: f32, radius: f32, start: f32, end: f32, color: Color);
    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Color);
    fn fill_polygon(&mut self, points: &[Vec2], color: Color);
    fn text(&mut self, s: &str, x: f32, y: f32, size_px: f32, color: Color);
    /// Blit an image into the given box, optionally mirrored horizontally.
    /// Backends may no-op when the image is not ready; painters are expected
    /// to check readiness and draw a fallback shape themselves.
    fn draw_image(&mut self, image: &Self::Image, x: f32, y: f32, w: f32, h: f32, mirrored: bool);
}

/// Sprite lookup supplied by the rendering collaborator.
pub trait AssetSource<I: ImageAsset> {
    /// Sprite for a product variant
    fn product_sprite(&self, variant: u8) -> Option<&I>;
    /// Sprite for the player's cart
    fn cart_sprite(&self) -> Option<&I>;
}

/// Asset source with nothing in it; every draw takes the fallback path.
/// Handy for tests and the native smoke run.
pub struct NoAssets;

impl<I: ImageAsset> AssetSource<I> for NoAssets {
    fn product_sprite(&self, _variant: u8) -> Option<&I> {
        None
    }

    fn cart_sprite(&self) -> Option<&I> {
        None
    }
}
