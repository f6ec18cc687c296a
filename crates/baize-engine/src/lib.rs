pub mod api;
pub mod core;
pub mod input;
pub mod renderer;

// Re-export key types at crate root for convenience
pub use api::config::{ConfigError, CueStick, SimConfig};
pub use api::panel::Panel;
pub use api::types::{events, GameEvent};
pub use core::body::{Body, BodyKind, Friction};
pub use core::collision::{is_colliding, resolve_collision, resolve_pairs, Disc};
pub use core::pocket::{Pocket, Pockets};
pub use core::rack::{ball_color, rack};
pub use core::simulation::Simulation;
pub use core::table::Table;
pub use core::time::FrameClock;
pub use input::queue::{Controls, InputEvent, InputQueue};
pub use renderer::{Color, ColorError, DrawCommand, DrawList, DrawRecord, Surface};

#[cfg(feature = "vectors")]
pub use renderer::{MeshVertex, TableMesh};

pub use glam::Vec2;
