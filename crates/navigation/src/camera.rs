use crate::config::{ConfigError, NavigationConfig};
use glam::{Mat4, Vec2, Vec3};
use pyramid_input::{Action, Movement, MovementSet};
use serde::{Deserialize, Serialize};

/// Below this squared length `front` and `up` are treated as parallel.
const DEGENERATE_EPSILON: f32 = 1e-6;

/// Fly camera driven by per-frame ticks, held movement keys, pointer motion
/// and scroll.
///
/// `front` follows yaw/pitch. `up` and `right` are derived from the home pose
/// and only recomputed on reset; pointer motion leaves them alone.
#[derive(Debug, Clone)]
pub struct NavigationState {
    config: NavigationConfig,
    position: Vec3,
    front: Vec3,
    up: Vec3,
    right: Vec3,
    yaw: f32,
    pitch: f32,
    movement_rate: f32,
    last_cursor: Vec2,
    awaiting_first_move: bool,
    last_frame_time: Option<f64>,
}

/// Read-only snapshot of the camera for overlays, logs and CLI output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec3,
    pub front: Vec3,
    pub up: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub movement_rate: f32,
    pub fov_degrees: f32,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::new(NavigationConfig::default())
    }
}

impl NavigationState {
    /// Build a camera at the home pose. An out-of-range config is repaired
    /// with [`NavigationConfig::sanitized`] and a warning is logged.
    pub fn new(config: NavigationConfig) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(e) => {
                tracing::warn!("navigation config repaired: {e}");
                config.sanitized()
            }
        };
        Self::from_valid_config(config)
    }

    /// Like [`new`](Self::new), but rejects an out-of-range config.
    pub fn try_new(config: NavigationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: NavigationConfig) -> Self {
        let mut state = Self {
            position: config.home_position,
            front: config.home_front,
            up: config.world_up,
            right: Vec3::X,
            yaw: config.home_yaw,
            pitch: config.home_pitch,
            movement_rate: config.clamp_movement_rate(config.initial_movement_rate),
            last_cursor: config.initial_cursor,
            awaiting_first_move: true,
            last_frame_time: None,
            config,
        };
        state.restore_home_pose();
        state
    }

    pub fn config(&self) -> &NavigationConfig {
        &self.config
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    /// Yaw in degrees.
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Pitch in degrees.
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn fov_degrees(&self) -> f32 {
        self.config.fov_degrees
    }

    pub fn movement_rate(&self) -> f32 {
        self.movement_rate
    }

    pub fn last_cursor(&self) -> Vec2 {
        self.last_cursor
    }

    /// True until the next pointer sample is taken as a baseline.
    pub fn awaiting_first_move(&self) -> bool {
        self.awaiting_first_move
    }

    pub fn last_frame_time(&self) -> Option<f64> {
        self.last_frame_time
    }

    pub fn pose(&self) -> Pose {
        Pose {
            position: self.position,
            front: self.front,
            up: self.up,
            yaw: self.yaw,
            pitch: self.pitch,
            movement_rate: self.movement_rate,
            fov_degrees: self.config.fov_degrees,
        }
    }

    /// Record the current frame timestamp (seconds) and return the time since
    /// the previous one.
    ///
    /// The first call has no reference and returns zero. A clock that goes
    /// backwards also yields zero.
    pub fn advance_frame(&mut self, now: f64) -> f32 {
        let elapsed = match self.last_frame_time {
            Some(last) => (now - last).max(0.0) as f32,
            None => 0.0,
        };
        self.last_frame_time = Some(now);
        elapsed
    }

    /// Translate by every held movement for `elapsed` seconds.
    ///
    /// Directions add up without normalization, so two held keys move faster
    /// than one.
    pub fn apply_directional_input(&mut self, held: &MovementSet, elapsed: f32) -> Vec3 {
        let step = self.movement_rate * elapsed;
        if held.is_empty() || step == 0.0 || !step.is_finite() {
            return self.position;
        }

        let strafe = self.strafe_axis();
        let displacement: Vec3 = held
            .iter()
            .map(|movement| {
                let axis = match movement {
                    Movement::Forward => self.front,
                    Movement::Backward => -self.front,
                    Movement::StrafeLeft => -strafe,
                    Movement::StrafeRight => strafe,
                    Movement::Descend => -self.up,
                    Movement::Ascend => self.up,
                };
                axis * step
            })
            .sum();

        self.position += displacement;
        tracing::trace!(?displacement, position = ?self.position, "camera moved");
        self.position
    }

    /// Apply a discrete action. Returns true if the navigation state consumed it.
    ///
    /// Movement actions are tracked by the caller's [`MovementSet`] and are not
    /// consumed here.
    pub fn apply_action(&mut self, action: Action) -> bool {
        match action {
            Action::ResetCamera => {
                self.reset();
                true
            }
            Action::Move(_) | Action::Quit | Action::ToggleHud | Action::Noop => false,
        }
    }

    /// Return to the home pose and re-arm the first-move gate.
    ///
    /// Movement rate and frame timing are kept.
    pub fn reset(&mut self) {
        self.restore_home_pose();
        self.awaiting_first_move = true;
        tracing::debug!(position = ?self.position, "camera reset to home pose");
    }

    /// Feed an absolute pointer position in window coordinates.
    pub fn on_pointer_move(&mut self, x: f32, y: f32) -> Vec3 {
        let cursor = Vec2::new(x, y);
        if self.awaiting_first_move {
            self.awaiting_first_move = false;
            self.last_cursor = cursor;
            tracing::trace!(x, y, "pointer baseline recorded");
            return self.front;
        }

        // Window Y grows downwards; moving the pointer up should raise pitch.
        let dx = (x - self.last_cursor.x) * self.config.sensitivity;
        let dy = (self.last_cursor.y - y) * self.config.sensitivity;
        self.last_cursor = cursor;

        if !(dx.is_finite() && dy.is_finite()) {
            return self.front;
        }

        self.yaw = wrap_degrees(self.yaw + dx);
        self.pitch = self.config.clamp_pitch(self.pitch + dy);
        self.front = front_from_angles(self.yaw, self.pitch);
        self.front
    }

    /// Record a pointer sample without turning the camera.
    ///
    /// Used while an overlay owns the pointer, so the next
    /// [`on_pointer_move`](Self::on_pointer_move) measures from here instead
    /// of from where the overlay interaction began.
    pub fn track_pointer(&mut self, x: f32, y: f32) {
        self.last_cursor = Vec2::new(x, y);
        self.awaiting_first_move = false;
    }

    /// Scroll adjusts movement speed: positive offsets slow down.
    pub fn on_scroll(&mut self, y_offset: f32) -> f32 {
        if y_offset.is_finite() {
            let rate = self.config.clamp_movement_rate(self.movement_rate - y_offset);
            if rate != self.movement_rate {
                tracing::debug!(movement_rate = rate, "movement rate changed");
            }
            self.movement_rate = rate;
        }
        self.movement_rate
    }

    pub fn set_movement_rate(&mut self, rate: f32) -> f32 {
        if rate.is_finite() {
            self.movement_rate = self.config.clamp_movement_rate(rate);
        }
        self.movement_rate
    }

    /// Right-handed look-at from the camera position along `front`.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.reference_up())
    }

    /// Right-handed perspective projection with a `[0, 1]` depth range.
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        let aspect = if aspect.is_finite() && aspect > 0.0 {
            aspect
        } else {
            1.0
        };
        Mat4::perspective_rh(
            self.config.fov_degrees.to_radians(),
            aspect,
            self.config.near,
            self.config.far,
        )
    }

    fn restore_home_pose(&mut self) {
        let config = &self.config;
        let direction = (config.home_position - config.home_target)
            .try_normalize()
            .unwrap_or(Vec3::Z);
        let right = config
            .world_up
            .cross(direction)
            .try_normalize()
            .unwrap_or(Vec3::X);
        let up = direction.cross(right).try_normalize().unwrap_or(config.world_up);

        self.position = config.home_position;
        self.front = config.home_front.try_normalize().unwrap_or(Vec3::NEG_Z);
        self.right = right;
        self.up = up;
        self.yaw = config.home_yaw;
        self.pitch = config.clamp_pitch(config.home_pitch);
    }

    fn strafe_axis(&self) -> Vec3 {
        self.front.cross(self.up).try_normalize().unwrap_or(self.right)
    }

    // `up` is fixed at reset time while `front` rotates, so the two can line
    // up; world up cannot, because pitch never reaches 90 degrees.
    fn reference_up(&self) -> Vec3 {
        if self.front.cross(self.up).length_squared() < DEGENERATE_EPSILON {
            self.config.world_up
        } else {
            self.up
        }
    }
}

/// Fold an angle into `[-180, 180)` degrees.
fn wrap_degrees(degrees: f32) -> f32 {
    (degrees + 180.0).rem_euclid(360.0) - 180.0
}

fn front_from_angles(yaw: f32, pitch: f32) -> Vec3 {
    let (yaw, pitch) = (yaw.to_radians(), pitch.to_radians());
    Vec3::new(
        yaw.cos() * pitch.cos(),
        pitch.sin(),
        yaw.sin() * pitch.cos(),
    )
    .normalize()
}
