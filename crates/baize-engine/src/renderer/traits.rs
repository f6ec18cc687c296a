//! Drawing surface contract.
//!
//! The engine never touches a real canvas. Each tick records its commands
//! into a [`DrawList`](super::draw::DrawList); a host replays them onto
//! whatever implements [`Surface`] (a browser Canvas2D context behind the
//! WASM bridge, a test recorder, a native backend).

use glam::Vec2;

use super::color::Color;

/// The four primitives a billiards frame is made of.
pub trait Surface {
    /// Clear an axis-aligned rectangle to transparent.
    fn clear_rect(&mut self, origin: Vec2, width: f32, height: f32);

    /// Fill an axis-aligned rectangle.
    fn fill_rect(&mut self, origin: Vec2, width: f32, height: f32, color: Color);

    /// Fill a circle.
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);

    /// Stroke a straight line segment.
    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color);
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn clear_rect(&mut self, origin: Vec2, width: f32, height: f32) {
        (**self).clear_rect(origin, width, height);
    }

    fn fill_rect(&mut self, origin: Vec2, width: f32, height: f32, color: Color) {
        (**self).fill_rect(origin, width, height, color);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        (**self).fill_circle(center, radius, color);
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        (**self).stroke_line(from, to, width, color);
    }
}
