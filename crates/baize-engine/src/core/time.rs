/// Converts host frame time into whole simulation ticks.
///
/// Ball velocities are per tick, and a tick is one 60 Hz frame, so a 120 Hz
/// display gets a tick every other frame and a stalled tab catches up with
/// a bounded burst instead of fast-forwarding the shot.
#[derive(Debug, Clone)]
pub struct FrameClock {
    /// Seconds per tick.
    tick: f32,
    /// Frame time not yet spent on a tick.
    pending: f32,
}

impl FrameClock {
    /// Most ticks a single frame may ask for.
    pub const MAX_TICKS_PER_FRAME: u32 = 10;

    pub fn new(tick: f32) -> Self {
        Self { tick, pending: 0.0 }
    }

    /// Add one host frame's elapsed seconds. Returns how many ticks are due.
    pub fn ticks_due(&mut self, frame_dt: f32) -> u32 {
        if !frame_dt.is_finite() || frame_dt <= 0.0 {
            return 0;
        }
        let cap = self.tick * Self::MAX_TICKS_PER_FRAME as f32;
        self.pending = (self.pending + frame_dt).min(cap);
        let ticks = (self.pending / self.tick) as u32;
        self.pending -= ticks as f32 * self.tick;
        ticks
    }

    /// Forget carried-over time, e.g. when the table comes to rest.
    pub fn reset(&mut self) {
        self.pending = 0.0;
    }

    pub fn tick(&self) -> f32 {
        self.tick
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(1.0 / 60.0)
    }
}
