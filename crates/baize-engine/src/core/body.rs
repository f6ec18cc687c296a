use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::core::table::Table;
use crate::renderer::color::Color;
use crate::renderer::traits::Surface;

/// Cue ball or one of the numbered object balls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Cue,
    Object,
}

/// Rolling friction applied once per tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Friction {
    /// Velocity multiplier per tick.
    pub damping: f32,
    /// Velocity components below this magnitude snap to exactly zero.
    pub rest_epsilon: f32,
}

impl Default for Friction {
    fn default() -> Self {
        Self {
            damping: 0.98,
            rest_epsilon: 0.01,
        }
    }
}

/// A ball on the table.
///
/// Velocity is in units per tick; one tick is one rendered frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    /// 0 for the cue ball, 1..=15 for object balls.
    pub number: u8,
    pub kind: BodyKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: Color,
    pocketed: bool,
}

impl Body {
    pub fn new(number: u8, kind: BodyKind, pos: Vec2, radius: f32) -> Self {
        Self {
            number,
            kind,
            pos,
            vel: Vec2::ZERO,
            radius,
            color: Color::WHITE,
            pocketed: false,
        }
    }

    pub fn cue(pos: Vec2, radius: f32) -> Self {
        Self::new(0, BodyKind::Cue, pos, radius)
    }

    pub fn object(number: u8, pos: Vec2, radius: f32) -> Self {
        Self::new(number, BodyKind::Object, pos, radius)
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_vel(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    pub fn is_cue(&self) -> bool {
        self.kind == BodyKind::Cue
    }

    pub fn is_pocketed(&self) -> bool {
        self.pocketed
    }

    /// Drop the ball into a pocket. Stays pocketed unless it is the cue
    /// ball and gets [`respawn`](Self::respawn)ed.
    pub fn pocket(&mut self) {
        self.pocketed = true;
    }

    /// Put the cue ball back on the table at rest. No-op for object balls.
    pub fn respawn(&mut self, at: Vec2) {
        if !self.is_cue() {
            log::warn!("ball {} cannot be respawned", self.number);
            return;
        }
        self.pos = at;
        self.vel = Vec2::ZERO;
        self.pocketed = false;
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Whether either velocity component is still above the rest threshold.
    pub fn is_moving(&self, rest_epsilon: f32) -> bool {
        self.vel.x.abs() >= rest_epsilon || self.vel.y.abs() >= rest_epsilon
    }

    /// Advance one tick: move, apply friction, then bounce off the cushions.
    pub fn integrate(&mut self, table: &Table, friction: Friction) {
        if self.pocketed {
            return;
        }

        self.pos += self.vel;
        self.vel *= friction.damping;

        if self.vel.x.abs() < friction.rest_epsilon {
            self.vel.x = 0.0;
        }
        if self.vel.y.abs() < friction.rest_epsilon {
            self.vel.y = 0.0;
        }

        self.bounce(table);
    }

    /// Reflect off the cushions, each axis on its own so a corner hit flips
    /// both. The ball is clamped so its edge sits on the cushion.
    fn bounce(&mut self, table: &Table) {
        let r = self.radius;

        if self.pos.x - r < table.left() || self.pos.x + r > table.right() {
            self.vel.x = -self.vel.x;
            self.pos.x = self.pos.x.clamp(table.left() + r, table.right() - r);
        }
        if self.pos.y - r < table.top() || self.pos.y + r > table.bottom() {
            self.vel.y = -self.vel.y;
            self.pos.y = self.pos.y.clamp(table.top() + r, table.bottom() - r);
        }
    }

    pub fn draw(&self, surface: &mut impl Surface) {
        if self.pocketed {
            return;
        }
        surface.fill_circle(self.pos, self.radius, self.color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::draw::DrawList;

    fn table() -> Table {
        Table::default()
    }

    #[test]
    fn integrate_moves_then_damps() {
        let mut b = Body::object(1, Vec2::new(100.0, 100.0), 10.0).with_vel(Vec2::new(2.0, -1.0));
        b.integrate(&table(), Friction::default());
        assert_eq!(b.pos, Vec2::new(102.0, 99.0));
        assert!((b.vel.x - 1.96).abs() < 1e-6);
        assert!((b.vel.y + 0.98).abs() < 1e-6);
    }

    #[test]
    fn slow_components_snap_to_zero() {
        let mut b = Body::object(1, Vec2::new(100.0, 100.0), 10.0)
            .with_vel(Vec2::new(0.0101, 0.005));
        b.integrate(&table(), Friction::default());
        // 0.0101 * 0.98 < 0.01
        assert_eq!(b.vel, Vec2::ZERO);
        assert!(!b.is_moving(0.01));
    }

    #[test]
    fn only_the_slow_component_snaps() {
        let mut b = Body::object(1, Vec2::new(100.0, 100.0), 10.0)
            .with_vel(Vec2::new(3.0, 0.005));
        b.integrate(&table(), Friction::default());
        assert_eq!(b.vel.y, 0.0);
        assert!(b.vel.x > 2.9);
    }

    #[test]
    fn right_cushion_reflects_and_clamps() {
        let mut b = Body::object(1, Vec2::new(798.0, 200.0), 10.0).with_vel(Vec2::new(5.0, 0.0));
        b.integrate(&table(), Friction::default());
        assert_eq!(b.pos.x, 800.0);
        assert!(b.vel.x < 0.0);
    }

    #[test]
    fn corner_hit_reflects_both_axes() {
        let mut b = Body::object(1, Vec2::new(22.0, 22.0), 10.0).with_vel(Vec2::new(-4.0, -4.0));
        b.integrate(&table(), Friction::default());
        assert_eq!(b.pos, Vec2::new(20.0, 20.0));
        assert!(b.vel.x > 0.0 && b.vel.y > 0.0);
    }

    #[test]
    fn stays_on_felt_over_many_ticks() {
        let t = table();
        let mut b = Body::cue(Vec2::new(400.0, 200.0), 10.0).with_vel(Vec2::new(37.0, -23.0));
        for _ in 0..1000 {
            b.integrate(&t, Friction::default());
            assert!(t.contains_circle(b.pos, b.radius), "escaped at {:?}", b.pos);
        }
        assert_eq!(b.vel, Vec2::ZERO);
    }

    #[test]
    fn pocketed_body_is_frozen_and_invisible() {
        let mut b = Body::object(3, Vec2::new(100.0, 100.0), 10.0).with_vel(Vec2::new(1.0, 1.0));
        b.pocket();
        b.integrate(&table(), Friction::default());
        assert_eq!(b.pos, Vec2::new(100.0, 100.0));

        let mut list = DrawList::new();
        b.draw(&mut list);
        assert!(list.is_empty());
    }

    #[test]
    fn only_cue_respawns() {
        let mut cue = Body::cue(Vec2::new(10.0, 10.0), 10.0).with_vel(Vec2::new(3.0, 0.0));
        cue.pocket();
        cue.respawn(Vec2::new(150.0, 210.0));
        assert!(!cue.is_pocketed());
        assert_eq!(cue.pos, Vec2::new(150.0, 210.0));
        assert_eq!(cue.vel, Vec2::ZERO);

        let mut ball = Body::object(5, Vec2::new(10.0, 10.0), 10.0);
        ball.pocket();
        ball.respawn(Vec2::new(150.0, 210.0));
        assert!(ball.is_pocketed());
    }
}
