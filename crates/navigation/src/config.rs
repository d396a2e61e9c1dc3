use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest usable pitch bound. At 90 degrees `front` lines up with world up
/// and the look-at basis collapses.
pub const MAX_PITCH_LIMIT: f32 = 89.9;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be finite")]
    NonFinite { field: &'static str },

    #[error("movement rate bounds are inverted or negative: min {min}, max {max}")]
    MovementRange { min: f32, max: f32 },

    #[error("pitch limit {0} must lie in [0, 89.9]")]
    PitchLimit(f32),

    #[error("field of view {0} must lie in (0, 180) degrees")]
    FieldOfView(f32),

    #[error("clip planes must satisfy 0 < near < far: near {near}, far {far}")]
    ClipPlanes { near: f32, far: f32 },
}

/// Constants that shape the navigation state.
///
/// The defaults describe the home pose: slightly above the ground, three units
/// back, looking down the negative Z axis at the pyramid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    pub home_position: Vec3,
    /// Point the home pose is oriented against when deriving `up` and `right`.
    pub home_target: Vec3,
    pub home_front: Vec3,
    pub home_yaw: f32,
    pub home_pitch: f32,
    pub world_up: Vec3,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// World units per second.
    pub initial_movement_rate: f32,
    pub min_movement_rate: f32,
    pub max_movement_rate: f32,
    /// Degrees of rotation per pixel of pointer travel.
    pub sensitivity: f32,
    /// Absolute pitch bound in degrees; must stay below 90.
    pub pitch_limit: f32,
    pub initial_cursor: Vec2,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            home_position: Vec3::new(0.0, 0.5, 3.0),
            home_target: Vec3::ZERO,
            home_front: Vec3::NEG_Z,
            home_yaw: -90.0,
            home_pitch: 0.0,
            world_up: Vec3::Y,
            fov_degrees: 45.0,
            near: 0.1,
            far: 100.0,
            initial_movement_rate: 10.0,
            min_movement_rate: 1.0,
            max_movement_rate: 55.0,
            sensitivity: 0.5,
            pitch_limit: 89.0,
            initial_cursor: Vec2::new(320.0, 240.0),
        }
    }
}

impl NavigationConfig {
    /// Start at the given speed, clamped to the configured range.
    pub fn with_initial_movement_rate(mut self, rate: f32) -> Self {
        if rate.is_finite() {
            // max/min rather than clamp: the bounds may not be validated yet.
            self.initial_movement_rate = rate.max(self.min_movement_rate).min(self.max_movement_rate);
        }
        self
    }

    /// Place the initial cursor baseline at the centre of a window.
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.initial_cursor = Vec2::new(width as f32 / 2.0, height as f32 / 2.0);
        self
    }

    /// Check every bound the navigation state relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let scalars = [
            ("home_yaw", self.home_yaw),
            ("home_pitch", self.home_pitch),
            ("initial_movement_rate", self.initial_movement_rate),
            ("sensitivity", self.sensitivity),
        ];
        if let Some((field, _)) = scalars.into_iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::NonFinite { field });
        }
        let vectors = [
            ("home_position", self.home_position),
            ("home_target", self.home_target),
            ("home_front", self.home_front),
            ("world_up", self.world_up),
        ];
        if let Some((field, _)) = vectors.into_iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::NonFinite { field });
        }
        if !self.initial_cursor.is_finite() {
            return Err(ConfigError::NonFinite {
                field: "initial_cursor",
            });
        }
        if !movement_range_is_valid(self.min_movement_rate, self.max_movement_rate) {
            return Err(ConfigError::MovementRange {
                min: self.min_movement_rate,
                max: self.max_movement_rate,
            });
        }
        if !(0.0..=MAX_PITCH_LIMIT).contains(&self.pitch_limit) {
            return Err(ConfigError::PitchLimit(self.pitch_limit));
        }
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(ConfigError::FieldOfView(self.fov_degrees));
        }
        if !clip_planes_are_valid(self.near, self.far) {
            return Err(ConfigError::ClipPlanes {
                near: self.near,
                far: self.far,
            });
        }
        Ok(())
    }

    /// Repair a config so it always passes [`validate`](Self::validate).
    ///
    /// Inverted speed bounds are swapped, the pitch limit is folded into
    /// `[0, MAX_PITCH_LIMIT]`, and anything else out of range falls back to
    /// its default.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        for (value, default) in [
            (&mut self.home_yaw, defaults.home_yaw),
            (&mut self.home_pitch, defaults.home_pitch),
            (&mut self.initial_movement_rate, defaults.initial_movement_rate),
            (&mut self.sensitivity, defaults.sensitivity),
        ] {
            if !value.is_finite() {
                *value = default;
            }
        }
        for (value, default) in [
            (&mut self.home_position, defaults.home_position),
            (&mut self.home_target, defaults.home_target),
            (&mut self.home_front, defaults.home_front),
            (&mut self.world_up, defaults.world_up),
        ] {
            if !value.is_finite() {
                *value = default;
            }
        }
        if !self.initial_cursor.is_finite() {
            self.initial_cursor = defaults.initial_cursor;
        }

        if self.min_movement_rate > self.max_movement_rate {
            std::mem::swap(&mut self.min_movement_rate, &mut self.max_movement_rate);
        }
        if !movement_range_is_valid(self.min_movement_rate, self.max_movement_rate) {
            self.min_movement_rate = defaults.min_movement_rate;
            self.max_movement_rate = defaults.max_movement_rate;
        }

        self.pitch_limit = if self.pitch_limit.is_nan() {
            defaults.pitch_limit
        } else {
            self.pitch_limit.abs().min(MAX_PITCH_LIMIT)
        };

        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            self.fov_degrees = defaults.fov_degrees;
        }
        if !clip_planes_are_valid(self.near, self.far) {
            self.near = defaults.near;
            self.far = defaults.far;
        }
        self
    }

    pub(crate) fn clamp_movement_rate(&self, rate: f32) -> f32 {
        rate.clamp(self.min_movement_rate, self.max_movement_rate)
    }

    pub(crate) fn clamp_pitch(&self, pitch: f32) -> f32 {
        pitch.clamp(-self.pitch_limit, self.pitch_limit)
    }
}

fn movement_range_is_valid(min: f32, max: f32) -> bool {
    min.is_finite() && max.is_finite() && 0.0 <= min && min <= max
}

fn clip_planes_are_valid(near: f32, far: f32) -> bool {
    near.is_finite() && far.is_finite() && 0.0 < near && near < far
}
