use serde_derive::{Deserialize, Serialize};

use crate::error::Error;

/// Session parameters. Lengths are canvas pixels, durations seconds.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SketchConfig {
    pub width: f32,
    pub height: f32,

    pub history_capacity: usize,
    pub smoothing_window: usize,
    /// Std-dev, in frames, of the gaussian age weighting.
    pub smoothing_sigma: f32,

    pub curl_max: f32,
    pub curl_multiplier: f32,

    pub floor_width: f32,
    pub floor_thickness: f32,
    /// Half the horizontal gap between a segment's two finger linkages.
    pub floor_tilt_offset: f32,

    pub ball_size: f32,
    /// Spawn height above the canvas top.
    pub ball_spawn_y: f32,
    pub bounds_margin: f32,

    pub point_size: f32,
    pub points_per_batch: usize,
    pub point_dying_secs: f32,
    pub point_respawn_delay_secs: f32,

    pub event_size: f32,
    pub event_lifetime_secs: f32,
    /// Chance that a point hit leaves an event behind.
    pub event_chance: f64,

    pub effect_secs: f32,
    pub pulse_decay: f32,

    pub gravity: f32,
    pub physics_dt: f32,

    pub seed: Option<u64>,
}

impl SketchConfig {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        let positive = [
            ("width", self.width),
            ("height", self.height),
            ("smoothing_sigma", self.smoothing_sigma),
            ("curl_max", self.curl_max),
            ("floor_width", self.floor_width),
            ("ball_size", self.ball_size),
            ("point_size", self.point_size),
            ("event_size", self.event_size),
            ("point_dying_secs", self.point_dying_secs),
            ("event_lifetime_secs", self.event_lifetime_secs),
            ("effect_secs", self.effect_secs),
            ("physics_dt", self.physics_dt),
        ];

        for (name, value) in positive {
            if !(value > 0.0 && value.is_finite()) {
                return Err(Error::InvalidConfig(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }

        if self.history_capacity == 0 || self.smoothing_window == 0 {
            return Err(Error::InvalidConfig(
                "history_capacity and smoothing_window must be non-zero".into(),
            ));
        }

        if self.points_per_batch == 0 {
            return Err(Error::InvalidConfig("points_per_batch must be non-zero".into()));
        }

        if !(0.0..=1.0).contains(&self.event_chance) {
            return Err(Error::InvalidConfig(format!(
                "event_chance must be within [0, 1], got {}",
                self.event_chance
            )));
        }

        Ok(())
    }
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
            history_capacity: 8,
            smoothing_window: 4,
            smoothing_sigma: 1.5,
            curl_max: 120.0,
            curl_multiplier: 1.3,
            floor_width: 300.0,
            floor_thickness: 10.0,
            floor_tilt_offset: 30.0,
            ball_size: 80.0,
            ball_spawn_y: -1000.0,
            bounds_margin: 200.0,
            point_size: 30.0,
            points_per_batch: 3,
            point_dying_secs: 0.3,
            point_respawn_delay_secs: 1.0,
            event_size: 50.0,
            event_lifetime_secs: 8.0,
            event_chance: 0.35,
            effect_secs: 0.4,
            pulse_decay: 2.0,
            gravity: 1000.0,
            physics_dt: 1.0 / 60.0,
            seed: None,
        }
    }
}
