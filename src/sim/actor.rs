//! The player's craft
//!
//! Pose lives in arena-local coordinates (origin top-left, y down). Headings
//! are degrees in [0, 360); 0 faces +x and 90 faces +y (down the screen).
//! Every pose change is checked against the arena before anything is written.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bounds::Rect;
use crate::settings::Settings;
use crate::{normalize_degrees, shortest_turn};

/// Craft geometry and steering granularity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActorConfig {
    /// Arena width/height
    pub arena_size: Vec2,
    /// Footprint width/height at scale 1.0
    pub extent: Vec2,
    /// Heading restored by `reset`
    pub initial_heading: f32,
    pub min_turn_step: f32,
    pub min_thrust_distance: f32,
}

impl ActorConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            arena_size: settings.arena_size(),
            extent: settings.craft_extent(),
            initial_heading: settings.initial_heading,
            min_turn_step: settings.min_turn_step,
            min_thrust_distance: settings.min_thrust_distance,
        }
    }
}

/// Position (footprint top-left), heading and scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActorPose {
    pub position: Vec2,
    pub heading: f32,
    pub scale: f32,
}

/// Result of one steering step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SteerOutcome {
    /// Close enough, or target on the nose: nothing this tick
    Idle,
    /// Rotated by the given signed step
    Turned(f32),
    /// Attempted a thrust; `moved` is false when the arena edge rejected it
    Thrust { moved: bool },
}

/// The craft
#[derive(Debug, Clone)]
pub struct KinematicActor {
    config: ActorConfig,
    pose: ActorPose,
}

impl KinematicActor {
    pub fn new(config: ActorConfig) -> Self {
        Self {
            pose: Self::initial_pose(&config),
            config,
        }
    }

    fn initial_pose(config: &ActorConfig) -> ActorPose {
        ActorPose {
            position: (config.arena_size - config.extent) * 0.5,
            heading: normalize_degrees(config.initial_heading),
            scale: 1.0,
        }
    }

    /// Back to the centered starting pose
    pub fn reset(&mut self) {
        self.pose = Self::initial_pose(&self.config);
    }

    pub fn pose(&self) -> ActorPose {
        self.pose
    }

    pub fn extent(&self) -> Vec2 {
        self.config.extent * self.pose.scale
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.pose.position, self.extent())
    }

    pub fn center(&self) -> Vec2 {
        self.pose.position + self.extent() * 0.5
    }

    /// Heading in degrees, [0, 360)
    pub fn orientation(&self) -> f32 {
        self.pose.heading
    }

    pub fn min_turn_step(&self) -> f32 {
        self.config.min_turn_step
    }

    pub fn min_thrust_distance(&self) -> f32 {
        self.config.min_thrust_distance
    }

    /// The nose: the unrotated tip (half a width ahead of center along +x)
    /// rotated about the center by the current heading
    pub fn front_point(&self) -> Vec2 {
        let center = self.center();
        let tip = Vec2::new(center.x + self.extent().x * 0.5, center.y);
        let (sin, cos) = self.pose.heading.to_radians().sin_cos();
        let local = tip - center;
        center + Vec2::new(local.x * cos - local.y * sin, local.x * sin + local.y * cos)
    }

    /// Unit vector along the current heading
    pub fn forward(&self) -> Vec2 {
        let (sin, cos) = self.pose.heading.to_radians().sin_cos();
        Vec2::new(cos, sin)
    }

    /// Whether a footprint at `position` stays strictly inside the arena
    fn fits(&self, position: Vec2) -> bool {
        let far = position + self.extent();
        position.x > 0.0
            && position.y > 0.0
            && far.x < self.config.arena_size.x
            && far.y < self.config.arena_size.y
    }

    /// Apply a translation and rotation together, or neither
    ///
    /// Rotation does not change the axis-aligned footprint, so a pure
    /// rotation from a valid pose always passes.
    pub fn update(&mut self, delta_pos: Vec2, delta_heading: f32) -> bool {
        let position = self.pose.position + delta_pos;
        if !self.fits(position) {
            log::debug!("Rejected move to {:?}", position);
            return false;
        }
        self.pose.position = position;
        self.pose.heading = normalize_degrees(self.pose.heading + delta_heading);
        true
    }

    pub fn rotate(&mut self, delta_degrees: f32) -> bool {
        self.update(Vec2::ZERO, delta_degrees)
    }

    pub fn move_forward(&mut self, distance: f32) -> bool {
        self.update(self.forward() * distance, 0.0)
    }

    /// One tick of pointer-follow steering toward `target` (arena-local)
    ///
    /// Turns one step per tick until the nose is within a step of the target
    /// bearing, and only then thrusts by the minimum distance.
    pub fn steer_toward(&mut self, target: Vec2) -> SteerOutcome {
        let front = self.front_point();
        let to_target = target - front;
        if to_target.length_squared() <= f32::EPSILON {
            return SteerOutcome::Idle;
        }

        let bearing = normalize_degrees(to_target.y.atan2(to_target.x).to_degrees());
        let delta = shortest_turn(bearing - self.pose.heading);
        if delta.abs() > self.config.min_turn_step {
            let step = self.config.min_turn_step.copysign(delta);
            self.rotate(step);
            return SteerOutcome::Turned(step);
        }

        if to_target.length() < self.config.min_thrust_distance {
            return SteerOutcome::Idle;
        }
        SteerOutcome::Thrust {
            moved: self.move_forward(self.config.min_thrust_distance),
        }
    }
}
