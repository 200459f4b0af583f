use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Lower bound of the scroll-driven speed multiplier.
pub const MIN_SPEED_MULTIPLIER: f32 = 0.1;
/// Upper bound of the scroll-driven speed multiplier.
pub const MAX_SPEED_MULTIPLIER: f32 = 10.0;

const SCROLL_UP_FACTOR: f32 = 1.1;
const SCROLL_DOWN_FACTOR: f32 = 0.9;

/// Which view volume the projection matrix describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProjectionMode {
    #[default]
    Perspective,
    Orthographic,
}

/// Input bookkeeping shared between the event callbacks and the frame tick.
#[derive(Debug, Clone, PartialEq)]
pub struct InputState {
    last_cursor: Vec2,
    first_mouse: bool,
    delta_time: f32,
    last_frame: f32,
    speed_multiplier: f32,
    projection: ProjectionMode,
}

impl InputState {
    /// Fresh state; `cursor_seed` is only a placeholder until the first sample.
    pub fn new(cursor_seed: Vec2) -> Self {
        Self {
            last_cursor: cursor_seed,
            first_mouse: true,
            delta_time: 0.0,
            last_frame: 0.0,
            speed_multiplier: 1.0,
            projection: ProjectionMode::Perspective,
        }
    }

    /// Offset since the previous cursor sample, with Y flipped so that moving
    /// the cursor up yields a positive value.
    ///
    /// The first sample after construction (or [`reset_cursor`](Self::reset_cursor))
    /// seeds the last position and yields zero.
    pub fn cursor_offset(&mut self, x: f32, y: f32) -> Vec2 {
        if self.first_mouse {
            self.last_cursor = Vec2::new(x, y);
            self.first_mouse = false;
        }

        let offset = Vec2::new(x - self.last_cursor.x, self.last_cursor.y - y);
        self.last_cursor = Vec2::new(x, y);
        offset
    }

    /// Forget the last cursor sample; the next one re-seeds.
    pub fn reset_cursor(&mut self) {
        self.first_mouse = true;
    }

    /// Scale the speed multiplier by one scroll event's direction.
    pub fn process_scroll(&mut self, y_offset: f32) {
        if y_offset > 0.0 {
            self.speed_multiplier *= SCROLL_UP_FACTOR;
        } else if y_offset < 0.0 {
            self.speed_multiplier *= SCROLL_DOWN_FACTOR;
        }
        self.speed_multiplier = self
            .speed_multiplier
            .clamp(MIN_SPEED_MULTIPLIER, MAX_SPEED_MULTIPLIER);
    }

    pub fn speed_multiplier(&self) -> f32 {
        self.speed_multiplier
    }

    /// Record a frame timestamp (seconds) and return the elapsed time since
    /// the previous one.
    pub fn advance_clock(&mut self, now: f32) -> f32 {
        self.delta_time = now - self.last_frame;
        self.last_frame = now;
        self.delta_time
    }

    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    pub fn projection(&self) -> ProjectionMode {
        self.projection
    }

    pub fn set_projection(&mut self, mode: ProjectionMode) {
        self.projection = mode;
    }
}
