use bytemuck::{Pod, Zeroable};

/// A table event handed to the UI layer.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct GameEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl GameEvent {
    pub const FLOATS: usize = 4;

    pub fn new(kind: f32, a: f32, b: f32, c: f32) -> Self {
        Self { kind, a, b, c }
    }

    /// An event with no payload.
    pub fn signal(kind: f32) -> Self {
        Self::new(kind, 0.0, 0.0, 0.0)
    }
}

/// Values of [`GameEvent::kind`].
pub mod events {
    /// An object ball dropped. `a` = ball number, `b` = pocket index,
    /// `c` = pocketed total so far.
    pub const BALL_POCKETED: f32 = 1.0;
    /// The cue ball was scratched and put back on its spot.
    pub const CUE_RESPAWNED: f32 = 2.0;
    /// Every ball came to rest. `a` = ticks the shot took.
    pub const SETTLED: f32 = 3.0;
    /// The last object ball dropped.
    pub const RACK_CLEARED: f32 = 4.0;
    /// A strike was accepted. `a` = angle in degrees, `b` = force.
    pub const STRUCK: f32 = 5.0;
}
