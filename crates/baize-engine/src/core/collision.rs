//! Ball-ball contact: overlap test and equal-mass elastic response.
//!
//! Every live pair is checked every tick. There is no broad phase; a rack
//! is sixteen balls.

use glam::Vec2;

use crate::core::body::Body;

/// Anything round that moves.
pub trait Disc {
    fn pos(&self) -> Vec2;
    fn vel(&self) -> Vec2;
    fn set_vel(&mut self, vel: Vec2);
    fn radius(&self) -> f32;
}

impl Disc for Body {
    fn pos(&self) -> Vec2 {
        self.pos
    }

    fn vel(&self) -> Vec2 {
        self.vel
    }

    fn set_vel(&mut self, vel: Vec2) {
        self.vel = vel;
    }

    fn radius(&self) -> f32 {
        self.radius
    }
}

/// Centers closer than the sum of radii. Touching is not colliding.
pub fn is_colliding<A: Disc, B: Disc>(a: &A, b: &B) -> bool {
    a.pos().distance(b.pos()) < a.radius() + b.radius()
}

/// Rotate `v` by `angle` radians (counter-clockwise in a y-up frame).
pub fn rotate(v: Vec2, angle: f32) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// Exchange the normal components of two equal-mass balls.
///
/// Skipped when the pair is already separating, so an overlap that lasts
/// several ticks is resolved once. Positions are left alone; the swapped
/// velocities pull the balls apart on the next tick. Coincident centers give
/// an arbitrary (x-axis) normal.
///
/// Returns whether velocities were changed.
pub fn resolve_collision<A: Disc, B: Disc>(a: &mut A, b: &mut B) -> bool {
    let rel_vel = a.vel() - b.vel();
    let offset = b.pos() - a.pos();
    if rel_vel.dot(offset) < 0.0 {
        return false;
    }

    let angle = -offset.y.atan2(offset.x);
    let u1 = rotate(a.vel(), angle);
    let u2 = rotate(b.vel(), angle);

    let v1 = Vec2::new(u2.x, u1.y);
    let v2 = Vec2::new(u1.x, u2.y);

    a.set_vel(rotate(v1, -angle));
    b.set_vel(rotate(v2, -angle));
    true
}

/// Test and resolve every unordered pair of balls still on the table, in
/// index order. Returns the number of contacts resolved.
pub fn resolve_pairs(bodies: &mut [Body]) -> usize {
    let mut resolved = 0;
    for i in 0..bodies.len() {
        let (head, tail) = bodies.split_at_mut(i + 1);
        let a = &mut head[i];
        if a.is_pocketed() {
            continue;
        }
        for b in tail.iter_mut().filter(|b| !b.is_pocketed()) {
            if is_colliding(a, b) && resolve_collision(a, b) {
                log::debug!("contact {} <-> {}", a.number, b.number);
                resolved += 1;
            }
        }
    }
    resolved
}
