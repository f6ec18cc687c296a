//! The table loop: one call to [`Simulation::tick`] is one frame.
//!
//! Within a tick the order is fixed: readouts, table, integrate (and draw)
//! every ball, resolve contacts, pocket test, drop pocketed object balls,
//! then aim controls. Each step reads what the previous one wrote.
//!
//! Scheduling belongs to the host. `tick` returns whether anything is still
//! rolling; the host keeps calling it while that holds and stops once the
//! table settles, until the next strike.

use glam::Vec2;

use crate::api::config::{ConfigError, SimConfig};
use crate::api::panel::Panel;
use crate::api::types::{events, GameEvent};
use crate::core::body::Body;
use crate::core::collision::resolve_pairs;
use crate::core::pocket::Pockets;
use crate::core::rack::{ball_color, rack};
use crate::core::table::Table;
use crate::input::queue::{Controls, InputEvent};
use crate::renderer::draw::DrawList;
use crate::renderer::traits::Surface;

/// Owns the table, the pockets, the balls still in play and the aiming
/// controls. The cue ball is always `bodies[0]`.
pub struct Simulation {
    config: SimConfig,
    table: Table,
    pockets: Pockets,
    bodies: Vec<Body>,
    cue_spot: Vec2,
    controls: Controls,
    panel: Panel,
    draw: DrawList,
    events: Vec<GameEvent>,
    /// Cue ball was scratched; put it back at the start of the next tick.
    cue_respawn_pending: bool,
    /// Ticks since the last strike, while the table is moving.
    shot_ticks: u32,
}

impl Simulation {
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: SimConfig) -> Self {
        let table = config.table;
        let pockets = Pockets::for_table(&table, config.pocket_radius).with_color(config.pocket_color);
        let cue_spot = Vec2::new(
            table.width / 2.0 - config.cue_spawn_offset,
            table.height / 2.0 + table.padding,
        );

        let mut sim = Self {
            config,
            table,
            pockets,
            bodies: Vec::with_capacity(16),
            cue_spot,
            controls: Controls::default(),
            panel: Panel::default(),
            draw: DrawList::new(),
            events: Vec::with_capacity(8),
            cue_respawn_pending: false,
            shot_ticks: 0,
        };
        sim.rack_balls();
        sim.refresh_controls();
        sim
    }

    fn rack_balls(&mut self) {
        let radius = self.config.ball_radius;
        let apex = Vec2::new(
            self.table.width / 2.0 + self.config.rack_offset,
            self.table.height / 2.0 + self.table.padding,
        );

        self.bodies.clear();
        self.bodies
            .push(Body::cue(self.cue_spot, radius).with_color(self.config.cue_ball_color));
        for (number, pos) in rack(apex, self.config.rack_spacing()) {
            self.bodies
                .push(Body::object(number, pos, radius).with_color(ball_color(number)));
        }
    }

    /// Re-rack, zero the counter and forget any shot in progress.
    pub fn reset(&mut self) {
        self.rack_balls();
        self.panel.pocketed = 0;
        self.cue_respawn_pending = false;
        self.shot_ticks = 0;
        self.refresh_controls();
        log::info!("table reset: {} balls racked", self.bodies.len() - 1);
    }

    /// Replace the bodies in play and start counting from zero. The list
    /// must hold exactly one cue ball, first; its position becomes the
    /// respawn spot.
    pub fn with_bodies(mut self, bodies: Vec<Body>) -> Result<Self, ConfigError> {
        let Some(cue) = bodies.first().filter(|b| b.is_cue()) else {
            return Err(ConfigError::Invalid { field: "bodies", reason: "must start with the cue ball" });
        };
        if bodies[1..].iter().any(Body::is_cue) {
            return Err(ConfigError::Invalid { field: "bodies", reason: "must hold exactly one cue ball" });
        }

        self.cue_spot = cue.pos;
        self.bodies = bodies;
        self.panel.pocketed = 0;
        self.cue_respawn_pending = false;
        self.shot_ticks = 0;
        self.refresh_controls();
        Ok(self)
    }

    // -- Input --

    /// Apply a frame's worth of input. Returns true when the host should run
    /// a tick even if nothing is moving (the aim changed and the stick needs
    /// redrawing, or the table was reset).
    ///
    /// Aim, force and strike are dropped while the controls are disabled;
    /// reset is always honoured.
    pub fn apply_input(&mut self, input: impl IntoIterator<Item = InputEvent>) -> bool {
        let mut redraw = false;
        for event in input {
            if event != InputEvent::Reset && !self.controls_enabled() {
                log::debug!("input {:?} dropped: controls disabled", event);
                continue;
            }
            match event {
                InputEvent::SetAngle { degrees } => {
                    if self.controls.set_angle(degrees) {
                        redraw = true;
                    }
                }
                InputEvent::SetForce { value } => {
                    self.controls.set_force(value);
                    self.panel.show_controls(&self.controls);
                }
                InputEvent::Strike => {
                    self.strike();
                }
                InputEvent::Reset => {
                    self.reset();
                    redraw = true;
                }
            }
        }
        redraw
    }

    /// Hit the cue ball with the current angle and force.
    /// Ignored (returning false) while anything is still rolling or once the
    /// rack is cleared.
    pub fn strike(&mut self) -> bool {
        if !self.controls_enabled() {
            log::debug!("strike ignored: controls disabled");
            return false;
        }

        let speed = self.controls.force() * self.config.force_multiplier;
        let vel = self.controls.direction() * speed;
        self.bodies[0].vel = vel;
        self.shot_ticks = 0;
        self.events.push(GameEvent::new(
            events::STRUCK,
            self.controls.angle_deg(),
            self.controls.force(),
            0.0,
        ));
        log::info!(
            "strike: angle={}deg force={} -> velocity {:?}",
            self.controls.angle_deg(),
            self.controls.force(),
            vel
        );
        true
    }

    // -- Loop --

    /// Advance one frame. Returns true while anything is still moving.
    pub fn tick(&mut self) -> bool {
        if self.cue_respawn_pending {
            self.respawn_cue();
        }

        self.panel.show_controls(&self.controls);

        self.draw.clear();
        let outer = self.table.outer_size();
        self.draw.clear_rect(Vec2::ZERO, outer.x, outer.y);
        self.table.draw(&mut self.draw);
        self.pockets.draw(&mut self.draw);

        let friction = self.config.friction;
        for body in &mut self.bodies {
            body.integrate(&self.table, friction);
            body.draw(&mut self.draw);
        }

        resolve_pairs(&mut self.bodies);

        self.pocket_balls();

        let before = self.object_balls_remaining();
        self.bodies.retain(|b| b.is_cue() || !b.is_pocketed());
        let remaining = self.object_balls_remaining();
        if before > 0 && remaining == 0 {
            log::info!("rack cleared: {} balls pocketed", self.panel.pocketed);
            self.events.push(GameEvent::signal(events::RACK_CLEARED));
        }

        let moving = !self.is_settled();
        if moving {
            self.shot_ticks += 1;
        } else if self.shot_ticks > 0 {
            log::info!("settled after {} ticks", self.shot_ticks);
            self.events
                .push(GameEvent::new(events::SETTLED, self.shot_ticks as f32, 0.0, 0.0));
            self.shot_ticks = 0;
        }
        self.refresh_controls();
        if self.panel.controls_enabled {
            self.draw_cue_stick();
        }

        self.draw.rebuild_records();
        moving
    }

    /// Tick until the table settles. Returns the number of ticks taken, or
    /// `None` if it was still moving after `max_ticks`.
    pub fn run_until_settled(&mut self, max_ticks: u32) -> Option<u32> {
        for n in 1..=max_ticks {
            if !self.tick() {
                return Some(n);
            }
        }
        None
    }

    fn pocket_balls(&mut self) {
        for body in self.bodies.iter_mut().filter(|b| !b.is_pocketed()) {
            let Some(pocket) = self.pockets.capturing(body.pos) else {
                continue;
            };
            body.pocket();

            if body.is_cue() {
                log::info!("scratch: cue ball dropped in pocket {}", pocket);
                self.cue_respawn_pending = true;
            } else {
                self.panel.pocketed += 1;
                log::info!(
                    "ball {} pocketed in pocket {} ({} total)",
                    body.number,
                    pocket,
                    self.panel.pocketed
                );
                self.events.push(GameEvent::new(
                    events::BALL_POCKETED,
                    body.number as f32,
                    pocket as f32,
                    self.panel.pocketed as f32,
                ));
            }
        }
    }

    fn refresh_controls(&mut self) {
        self.panel.controls_enabled = self.controls_enabled();
    }

    fn respawn_cue(&mut self) {
        self.bodies[0].respawn(self.cue_spot);
        self.cue_respawn_pending = false;
        self.events.push(GameEvent::signal(events::CUE_RESPAWNED));
        log::info!("cue ball respawned at {:?}", self.cue_spot);
    }

    fn draw_cue_stick(&mut self) {
        let cue = &self.bodies[0];
        let stick = self.config.cue_stick;
        let dir = self.controls.direction();
        let start = cue.pos - dir * stick.offset;
        let end = start - dir * stick.length;
        self.draw.stroke_line(start, end, stick.width, stick.color);
    }

    // -- Queries --

    /// No ball has a velocity component above the rest threshold and no
    /// scratch is waiting to be respotted.
    pub fn is_settled(&self) -> bool {
        let eps = self.config.friction.rest_epsilon;
        !self.cue_respawn_pending
            && self
                .bodies
                .iter()
                .filter(|b| !b.is_pocketed())
                .all(|b| !b.is_moving(eps))
    }

    /// Aim, force and strike are live only while the table is at rest with
    /// object balls left to play.
    pub fn controls_enabled(&self) -> bool {
        self.is_settled() && self.object_balls_remaining() > 0
    }

    pub fn object_balls_remaining(&self) -> usize {
        self.bodies.iter().filter(|b| !b.is_cue() && !b.is_pocketed()).count()
    }

    pub fn cue(&self) -> &Body {
        &self.bodies[0]
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn pockets(&self) -> &Pockets {
        &self.pockets
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    pub fn panel(&self) -> &Panel {
        &self.panel
    }

    /// Commands recorded by the latest tick.
    pub fn draw_list(&self) -> &DrawList {
        &self.draw
    }

    /// Events emitted since the last [`clear_events`](Self::clear_events).
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::build(SimConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::draw::DrawCommand;

    fn aim(sim: &mut Simulation, degrees: f32, force: f32) {
        sim.apply_input([
            InputEvent::SetAngle { degrees },
            InputEvent::SetForce { value: force },
        ]);
    }

    fn count(sim: &Simulation, kind: f32) -> usize {
        sim.events().iter().filter(|e| e.kind == kind).count()
    }

    #[test]
    fn default_session_layout() {
        let sim = Simulation::default();
        assert_eq!(sim.bodies().len(), 16);
        assert!(sim.cue().is_cue());
        assert_eq!(sim.cue().pos, Vec2::new(150.0, 210.0));
        assert_eq!(sim.bodies()[1].pos, Vec2::new(550.0, 210.0));
        assert_eq!(sim.object_balls_remaining(), 15);
        assert!(sim.is_settled());
    }

    #[test]
    fn first_tick_draws_table_and_enables_controls() {
        let mut sim = Simulation::default();
        assert!(!sim.tick());
        assert!(sim.panel().controls_enabled);
        assert_eq!(sim.panel().angle_text, "0");
        assert_eq!(sim.panel().force_text, "50");

        let cmds = sim.draw_list().commands();
        assert!(matches!(cmds[0], DrawCommand::ClearRect { .. }));
        // clear + rail + felt + 6 pockets + 16 balls + stick
        assert_eq!(cmds.len(), 1 + 2 + 6 + 16 + 1);
        assert!(matches!(cmds.last(), Some(DrawCommand::StrokeLine { .. })));
        assert_eq!(sim.draw_list().records().len(), cmds.len());
    }

    #[test]
    fn cue_stick_points_away_from_aim() {
        let mut sim = Simulation::default();
        aim(&mut sim, 0.0, 10.0);
        sim.tick();
        match sim.draw_list().commands().last() {
            Some(DrawCommand::StrokeLine { from, to, width, .. }) => {
                assert_eq!(*from, Vec2::new(135.0, 210.0));
                assert_eq!(*to, Vec2::new(35.0, 210.0));
                assert_eq!(*width, 4.0);
            }
            other => panic!("expected cue stick, got {:?}", other),
        }
    }

    #[test]
    fn strike_sets_cue_velocity() {
        let mut sim = Simulation::default();
        aim(&mut sim, 90.0, 40.0);
        assert!(sim.strike());
        let v = sim.cue().vel;
        assert!(v.x.abs() < 1e-5);
        assert!((v.y - 10.0).abs() < 1e-5);
        assert_eq!(count(&sim, events::STRUCK), 1);
    }

    #[test]
    fn strike_is_ignored_while_moving() {
        let mut sim = Simulation::default();
        aim(&mut sim, 0.0, 50.0);
        assert!(sim.strike());
        assert!(sim.tick());
        let vel = sim.cue().vel;

        aim(&mut sim, 180.0, 100.0);
        assert!(!sim.strike());
        assert_eq!(sim.cue().vel, vel);
        assert!(!sim.panel().controls_enabled);
    }

    #[test]
    fn break_shot_settles_in_bounded_ticks() {
        let mut sim = Simulation::default();
        aim(&mut sim, 0.0, 50.0);
        assert!(sim.strike());

        let ticks = sim.run_until_settled(2000).expect("table never settled");
        assert!(ticks > 1);
        assert!(sim.is_settled());
        assert!(sim.bodies().iter().all(|b| !b.is_moving(0.01)));
        assert_eq!(count(&sim, events::SETTLED), 1);

        let table = *sim.table();
        for b in sim.bodies() {
            assert!(table.contains_circle(b.pos, b.radius), "ball {} off table", b.number);
        }
        // Counter agrees with what left the table
        assert_eq!(sim.panel().pocketed as usize, 15 - sim.object_balls_remaining());
    }

    #[test]
    fn cue_ball_slows_monotonically() {
        let mut sim = Simulation::default();
        // The object ball sits off the cue's line so the cue only meets cushions
        sim = sim
            .with_bodies(vec![
                Body::cue(Vec2::new(150.0, 210.0), 10.0),
                Body::object(1, Vec2::new(400.0, 350.0), 10.0),
            ])
            .unwrap();
        aim(&mut sim, 0.0, 50.0);
        sim.strike();

        let mut last = sim.cue().speed();
        let mut ticks = 0;
        while sim.tick() {
            let speed = sim.cue().speed();
            assert!(speed <= last, "speed rose from {} to {}", last, speed);
            last = speed;
            ticks += 1;
            assert!(ticks < 2000);
        }
        assert_eq!(sim.cue().vel, Vec2::ZERO);
    }

    #[test]
    fn object_ball_pocketed_once() {
        let mut sim = Simulation::default().with_bodies(vec![
            Body::cue(Vec2::new(150.0, 210.0), 10.0),
            Body::object(3, Vec2::new(25.0, 25.0), 10.0).with_vel(Vec2::new(-3.0, -3.0)),
            Body::object(4, Vec2::new(400.0, 300.0), 10.0),
        ])
        .unwrap();

        sim.tick();
        assert_eq!(sim.panel().pocketed, 1);
        assert_eq!(sim.bodies().len(), 2);
        assert!(sim.bodies().iter().all(|b| b.number != 3));
        assert_eq!(count(&sim, events::BALL_POCKETED), 1);
        let ev = sim.events()[0];
        assert_eq!((ev.a, ev.b, ev.c), (3.0, 0.0, 1.0));

        for _ in 0..5 {
            sim.tick();
        }
        assert_eq!(sim.panel().pocketed, 1);
        assert_eq!(count(&sim, events::BALL_POCKETED), 1);
    }

    #[test]
    fn scratch_respawns_cue_on_next_tick() {
        let mut sim = Simulation::default().with_bodies(vec![
            Body::cue(Vec2::new(150.0, 210.0), 10.0),
            Body::object(1, Vec2::new(600.0, 210.0), 10.0),
        ])
        .unwrap();
        sim.bodies[0].pos = Vec2::new(25.0, 25.0);
        sim.bodies[0].vel = Vec2::new(-2.0, -2.0);

        // Scratch tick: cue stays in the list, counter untouched, loop keeps going
        assert!(sim.tick());
        assert!(sim.cue().is_pocketed());
        assert_eq!(sim.bodies().len(), 2);
        assert_eq!(sim.panel().pocketed, 0);
        assert!(!sim.strike());

        // Respot happens once, at the start of the following tick
        assert!(!sim.tick());
        assert!(!sim.cue().is_pocketed());
        assert_eq!(sim.cue().pos, Vec2::new(150.0, 210.0));
        assert_eq!(sim.cue().vel, Vec2::ZERO);
        assert_eq!(count(&sim, events::CUE_RESPAWNED), 1);
        assert!(sim.panel().controls_enabled);
    }

    #[test]
    fn pocketed_ball_is_not_drawn_or_collided() {
        let mut sim = Simulation::default().with_bodies(vec![
            Body::cue(Vec2::new(150.0, 210.0), 10.0),
            Body::object(2, Vec2::new(411.0, 21.0), 10.0),
        ])
        .unwrap();
        sim.tick();
        assert_eq!(sim.object_balls_remaining(), 0);

        sim.tick();
        let circles = sim
            .draw_list()
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillCircle { .. }))
            .count();
        // six pockets and the cue ball
        assert_eq!(circles, 7);
    }

    #[test]
    fn clearing_the_rack_disables_controls() {
        let mut sim = Simulation::default().with_bodies(vec![
            Body::cue(Vec2::new(150.0, 210.0), 10.0),
            Body::object(8, Vec2::new(795.0, 395.0), 10.0).with_vel(Vec2::new(2.0, 2.0)),
        ])
        .unwrap();
        sim.tick();
        assert_eq!(count(&sim, events::RACK_CLEARED), 1);
        assert!(sim.is_settled());
        assert!(!sim.panel().controls_enabled);
        assert!(!matches!(
            sim.draw_list().commands().last(),
            Some(DrawCommand::StrokeLine { .. })
        ));

        // Nothing left to shoot at: the cue ball stays put
        assert!(!sim.apply_input([InputEvent::SetAngle { degrees: 45.0 }, InputEvent::Strike]));
        assert!(!sim.strike());
        assert_eq!(sim.cue().vel, Vec2::ZERO);
        assert_eq!(sim.controls().angle_deg(), 0.0);
        assert_eq!(count(&sim, events::STRUCK), 0);

        // Reset still works and brings the controls back
        assert!(sim.apply_input([InputEvent::Reset]));
        assert!(sim.panel().controls_enabled);
    }

    #[test]
    fn controls_enabled_before_first_tick() {
        let sim = Simulation::default();
        assert!(sim.controls_enabled());
        assert!(sim.panel().controls_enabled);
    }

    #[test]
    fn with_bodies_requires_one_leading_cue() {
        let cue = || Body::cue(Vec2::new(150.0, 210.0), 10.0);
        let ball = || Body::object(1, Vec2::new(600.0, 210.0), 10.0);

        assert!(Simulation::default().with_bodies(vec![]).is_err());
        assert!(Simulation::default().with_bodies(vec![ball(), cue()]).is_err());
        assert!(Simulation::default().with_bodies(vec![cue(), ball(), cue()]).is_err());

        let mut sim = Simulation::default();
        aim(&mut sim, 0.0, 50.0);
        sim.strike();
        sim.run_until_settled(2000);
        let sim = sim.with_bodies(vec![cue(), ball()]).unwrap();
        assert_eq!(sim.panel().pocketed, 0);
        assert!(sim.is_settled());
        assert!(sim.panel().controls_enabled);
    }

    #[test]
    fn aim_and_force_are_locked_while_balls_roll() {
        let mut sim = Simulation::default();
        assert!(sim.apply_input([InputEvent::SetAngle { degrees: 30.0 }]));
        assert!(!sim.apply_input([InputEvent::SetForce { value: 20.0 }]));
        assert_eq!(sim.panel().force_text, "20");

        sim.strike();
        sim.tick();
        assert!(!sim.panel().controls_enabled);
        assert!(!sim.apply_input([
            InputEvent::SetAngle { degrees: 60.0 },
            InputEvent::SetForce { value: 90.0 },
        ]));
        assert_eq!(sim.controls().angle_deg(), 30.0);
        assert_eq!(sim.controls().force(), 20.0);
    }

    #[test]
    fn non_finite_input_never_reaches_the_cue() {
        let mut sim = Simulation::default();
        aim(&mut sim, f32::NAN, f32::NAN);
        assert_eq!(sim.controls().angle_deg(), 0.0);
        assert!(sim.strike());
        assert!(sim.cue().vel.is_finite());
    }

    #[test]
    fn reset_restores_full_rack() {
        let mut sim = Simulation::default();
        aim(&mut sim, 0.0, 50.0);
        sim.strike();
        sim.run_until_settled(2000);

        sim.apply_input([InputEvent::Reset]);
        assert_eq!(sim.bodies().len(), 16);
        assert_eq!(sim.panel().pocketed, 0);
        assert!(sim.is_settled());
        assert_eq!(sim.cue().pos, Vec2::new(150.0, 210.0));
    }

    #[test]
    fn new_rejects_invalid_config() {
        let config = SimConfig {
            ball_radius: -1.0,
            ..SimConfig::default()
        };
        assert!(Simulation::new(config).is_err());
        assert!(Simulation::new(SimConfig::default()).is_ok());
    }
}
