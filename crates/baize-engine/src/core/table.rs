use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::renderer::color::Color;
use crate::renderer::traits::Surface;

/// Rectangular playing field.
///
/// The felt covers `[padding, padding + width] × [padding, padding + height]`;
/// the rail is the `padding`-wide border around it. Built once per session
/// and only ever handed out by shared reference.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Table {
    pub width: f32,
    pub height: f32,
    pub padding: f32,
    pub surface_color: Color,
    pub rail_color: Color,
}

impl Table {
    pub fn new(width: f32, height: f32, padding: f32) -> Self {
        Self {
            width,
            height,
            padding,
            ..Self::default()
        }
    }

    pub fn with_colors(mut self, surface_color: Color, rail_color: Color) -> Self {
        self.surface_color = surface_color;
        self.rail_color = rail_color;
        self
    }

    pub fn left(&self) -> f32 {
        self.padding
    }

    pub fn right(&self) -> f32 {
        self.padding + self.width
    }

    pub fn top(&self) -> f32 {
        self.padding
    }

    pub fn bottom(&self) -> f32 {
        self.padding + self.height
    }

    /// Center of the playing surface.
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.padding + self.width / 2.0, self.padding + self.height / 2.0)
    }

    /// Full drawing area: felt plus rail on every side.
    pub fn outer_size(&self) -> Vec2 {
        Vec2::new(self.width + 2.0 * self.padding, self.height + 2.0 * self.padding)
    }

    /// Whether a circle lies entirely on the felt (edges touching allowed).
    pub fn contains_circle(&self, center: Vec2, radius: f32) -> bool {
        center.x - radius >= self.left()
            && center.x + radius <= self.right()
            && center.y - radius >= self.top()
            && center.y + radius <= self.bottom()
    }

    /// Rail first, felt on top.
    pub fn draw(&self, surface: &mut impl Surface) {
        let outer = self.outer_size();
        surface.fill_rect(Vec2::ZERO, outer.x, outer.y, self.rail_color);
        surface.fill_rect(
            Vec2::splat(self.padding),
            self.width,
            self.height,
            self.surface_color,
        );
    }
}

impl Default for Table {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 400.0,
            padding: 10.0,
            surface_color: Color::FELT,
            rail_color: Color::RAIL,
        }
    }
}
