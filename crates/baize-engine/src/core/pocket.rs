use glam::Vec2;

use crate::core::table::Table;
use crate::renderer::color::Color;
use crate::renderer::traits::Surface;

/// A circular hole on the rail line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pocket {
    pub center: Vec2,
    pub radius: f32,
}

impl Pocket {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    /// A ball drops once its center is within the pocket radius.
    pub fn captures(&self, point: Vec2) -> bool {
        self.center.distance(point) <= self.radius
    }

    pub fn draw(&self, surface: &mut impl Surface, color: Color) {
        surface.fill_circle(self.center, self.radius, color);
    }
}

/// The six pockets of a table: four corners and the middle of both long
/// rails, sitting on the felt's edge.
#[derive(Debug, Clone, PartialEq)]
pub struct Pockets {
    pockets: [Pocket; 6],
    color: Color,
}

impl Pockets {
    pub fn for_table(table: &Table, radius: f32) -> Self {
        let (l, r, t, b) = (table.left(), table.right(), table.top(), table.bottom());
        let mid = table.center().x;
        Self {
            pockets: [
                Pocket::new(Vec2::new(l, t), radius),
                Pocket::new(Vec2::new(mid, t), radius),
                Pocket::new(Vec2::new(r, t), radius),
                Pocket::new(Vec2::new(l, b), radius),
                Pocket::new(Vec2::new(mid, b), radius),
                Pocket::new(Vec2::new(r, b), radius),
            ],
            color: Color::BLACK,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Index of the first pocket that captures `point`.
    pub fn capturing(&self, point: Vec2) -> Option<usize> {
        self.pockets.iter().position(|p| p.captures(point))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pocket> {
        self.pockets.iter()
    }

    pub fn draw(&self, surface: &mut impl Surface) {
        for pocket in &self.pockets {
            pocket.draw(surface, self.color);
        }
    }
}
