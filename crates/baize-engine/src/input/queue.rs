/// Input from the aiming controls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Aim slider moved. Degrees, 0 = +x, growing clockwise on screen.
    SetAngle { degrees: f32 },
    /// Force slider moved.
    SetForce { value: f32 },
    /// Strike button pressed.
    Strike,
    /// Re-rack and start over.
    Reset,
}

/// Events collected between frames.
/// The host pushes as the user interacts; the simulation drains once per frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(16),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Take all pending events, leaving the queue empty.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Current slider values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Controls {
    angle_deg: f32,
    force: f32,
}

impl Controls {
    pub fn new(angle_deg: f32, force: f32) -> Self {
        Self { angle_deg, force }
    }

    pub fn angle_deg(&self) -> f32 {
        self.angle_deg
    }

    pub fn angle_rad(&self) -> f32 {
        self.angle_deg.to_radians()
    }

    pub fn force(&self) -> f32 {
        self.force
    }

    /// Unit vector the cue ball will travel along.
    pub fn direction(&self) -> glam::Vec2 {
        let (sin, cos) = self.angle_rad().sin_cos();
        glam::Vec2::new(cos, sin)
    }

    /// Returns false (keeping the old angle) for NaN or infinite input.
    pub fn set_angle(&mut self, degrees: f32) -> bool {
        if !degrees.is_finite() {
            log::warn!("ignoring non-finite aim angle {}", degrees);
            return false;
        }
        self.angle_deg = degrees;
        true
    }

    /// Returns false (keeping the old force) for NaN or infinite input.
    /// Negative force is clamped to zero.
    pub fn set_force(&mut self, value: f32) -> bool {
        if !value.is_finite() {
            log::warn!("ignoring non-finite force {}", value);
            return false;
        }
        if value < 0.0 {
            log::warn!("clamping negative force {} to 0", value);
        }
        self.force = value.max(0.0);
        true
    }
}

impl Default for Controls {
    fn default() -> Self {
        Self::new(0.0, 50.0)
    }
}
