use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::body::Friction;
use crate::core::table::Table;
use crate::renderer::color::Color;

/// Everything that shapes a session: table geometry, ball and pocket sizes,
/// friction, shot scaling and where the balls start.
///
/// Every field has a default, so a JSON file only names what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub table: Table,
    pub ball_radius: f32,
    pub pocket_radius: f32,
    pub pocket_color: Color,
    pub cue_ball_color: Color,
    pub friction: Friction,
    /// Cue ball speed (units/tick) per unit of slider force.
    pub force_multiplier: f32,
    /// Rack apex distance right of the table's half width.
    pub rack_offset: f32,
    /// Gap left between neighbouring racked balls.
    pub rack_gap: f32,
    /// Cue spot distance left of the table's half width.
    pub cue_spawn_offset: f32,
    pub cue_stick: CueStick,
    /// Seconds per simulation tick.
    pub fixed_dt: f32,
}

/// Aiming stick drawn behind the cue ball while the table is at rest.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CueStick {
    /// Distance from the cue ball center to the stick's tip.
    pub offset: f32,
    pub length: f32,
    pub width: f32,
    pub color: Color,
}

impl Default for CueStick {
    fn default() -> Self {
        Self {
            offset: 15.0,
            length: 100.0,
            width: 4.0,
            color: Color::CUE_STICK,
        }
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            table: Table::default(),
            ball_radius: 10.0,
            pocket_radius: 20.0,
            pocket_color: Color::BLACK,
            cue_ball_color: Color::WHITE,
            friction: Friction::default(),
            force_multiplier: 0.25,
            rack_offset: 150.0,
            rack_gap: 5.0,
            cue_spawn_offset: 250.0,
            cue_stick: CueStick::default(),
            fixed_dt: 1.0 / 60.0,
        }
    }
}

/// Why a configuration was refused.
#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
    Invalid { field: &'static str, reason: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(e) => write!(f, "config is not valid JSON: {}", e),
            ConfigError::Invalid { field, reason } => write!(f, "config field `{}` {}", field, reason),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid { .. } => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl SimConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Distance between neighbouring ball centers in the rack.
    pub fn rack_spacing(&self) -> f32 {
        2.0 * self.ball_radius + self.rack_gap
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = |field: &'static str, v: f32| {
            if !v.is_finite() {
                Err(ConfigError::Invalid { field, reason: "must be finite" })
            } else if v <= 0.0 {
                Err(ConfigError::Invalid { field, reason: "must be positive" })
            } else {
                Ok(())
            }
        };
        let finite = |field: &'static str, v: f32| {
            if v.is_finite() {
                Ok(())
            } else {
                Err(ConfigError::Invalid { field, reason: "must be finite" })
            }
        };

        positive("table.width", self.table.width)?;
        positive("table.height", self.table.height)?;
        finite("table.padding", self.table.padding)?;
        if self.table.padding < 0.0 {
            return Err(ConfigError::Invalid { field: "table.padding", reason: "must not be negative" });
        }
        positive("ball_radius", self.ball_radius)?;
        positive("pocket_radius", self.pocket_radius)?;
        if 2.0 * self.ball_radius > self.table.width.min(self.table.height) {
            return Err(ConfigError::Invalid { field: "ball_radius", reason: "does not fit on the table" });
        }

        positive("friction.damping", self.friction.damping)?;
        if self.friction.damping > 1.0 {
            return Err(ConfigError::Invalid { field: "friction.damping", reason: "must be at most 1" });
        }
        positive("friction.rest_epsilon", self.friction.rest_epsilon)?;

        positive("force_multiplier", self.force_multiplier)?;
        finite("rack_offset", self.rack_offset)?;
        finite("rack_gap", self.rack_gap)?;
        finite("cue_spawn_offset", self.cue_spawn_offset)?;
        finite("cue_stick.offset", self.cue_stick.offset)?;
        finite("cue_stick.length", self.cue_stick.length)?;
        finite("cue_stick.width", self.cue_stick.width)?;
        positive("fixed_dt", self.fixed_dt)?;
        Ok(())
    }
}
