use crate::camera::{FlyCamera, ViewPreset};
use crate::projection::{self, Viewport};
use glam::{Mat4, Vec2};
use stilllife_common::{ShadingStage, Uniform};
use stilllife_input::{InputState, KeyState, ProjectionMode, ViewKey};

/// What the host loop should do after a frame has been prepared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameControl {
    Continue,
    Exit,
}

/// Owns the camera and input state; turns input into view and projection.
///
/// The host feeds cursor and scroll events as they arrive and calls
/// [`prepare_frame`](Self::prepare_frame) once per frame.
#[derive(Debug, Clone)]
pub struct ViewManager {
    camera: FlyCamera,
    input: InputState,
    viewport: Viewport,
}

impl Default for ViewManager {
    fn default() -> Self {
        Self::new(Viewport::default())
    }
}

impl ViewManager {
    pub fn new(viewport: Viewport) -> Self {
        let centre = Vec2::new(viewport.width as f32 / 2.0, viewport.height as f32 / 2.0);
        Self {
            camera: FlyCamera::default(),
            input: InputState::new(centre),
            viewport,
        }
    }

    pub fn camera(&self) -> &FlyCamera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut FlyCamera {
        &mut self.camera
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn projection_mode(&self) -> ProjectionMode {
        self.input.projection()
    }

    pub fn set_projection_mode(&mut self, mode: ProjectionMode) {
        if self.input.projection() != mode {
            tracing::info!("projection mode: {mode:?}");
        }
        self.input.set_projection(mode);
    }

    /// Cursor position sample from the host, in window pixels.
    pub fn on_cursor_moved(&mut self, x: f32, y: f32) {
        let offset = self.input.cursor_offset(x, y);
        self.camera.process_mouse_movement(offset.x, offset.y);
    }

    /// Scroll changes movement speed, not the field of view.
    pub fn on_scroll(&mut self, y_offset: f32) {
        self.input.process_scroll(y_offset);
        tracing::debug!("speed multiplier: {:.3}", self.input.speed_multiplier());
    }

    /// Apply the polled key state: movement, projection switches, presets.
    ///
    /// Returns [`FrameControl::Exit`] while Escape is held. The other keys
    /// still apply on that frame.
    pub fn process_keyboard<K: KeyState + ?Sized>(&mut self, keys: &K) -> FrameControl {
        let control = if keys.is_pressed(ViewKey::Escape) {
            tracing::info!("shutdown requested");
            FrameControl::Exit
        } else {
            FrameControl::Continue
        };

        let step = self.input.delta_time() * self.input.speed_multiplier();
        for key in ViewKey::ALL {
            if let Some(direction) = key.movement() {
                if keys.is_pressed(key) {
                    self.camera.process_keyboard(direction, step);
                }
            }
        }

        if keys.is_pressed(ViewKey::P) {
            self.set_projection_mode(ProjectionMode::Perspective);
        }
        if keys.is_pressed(ViewKey::O) {
            self.set_projection_mode(ProjectionMode::Orthographic);
        }

        let presets = [
            (ViewKey::One, ViewPreset::Front),
            (ViewKey::Two, ViewPreset::Right),
            (ViewKey::Three, ViewPreset::Top),
            (ViewKey::Four, ViewPreset::Left),
        ];
        for (key, preset) in presets {
            if keys.is_pressed(key) {
                let before = (self.camera.position, self.camera.front, self.camera.up);
                self.camera.snap_to(preset);
                if before != (self.camera.position, self.camera.front, self.camera.up) {
                    tracing::debug!("view preset: {preset:?}");
                }
            }
        }

        control
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.camera.view_matrix()
    }

    pub fn projection_matrix(&self) -> Mat4 {
        projection::projection_matrix(self.input.projection(), self.camera.zoom, self.viewport)
    }

    /// Advance the clock to `now` (seconds), apply input, and publish view,
    /// projection and camera position.
    pub fn prepare_frame<K, S>(&mut self, now: f32, keys: &K, stage: &mut S) -> FrameControl
    where
        K: KeyState + ?Sized,
        S: ShadingStage + ?Sized,
    {
        self.input.advance_clock(now);
        let control = self.process_keyboard(keys);

        stage.set_uniform(Uniform::View(self.view_matrix()));
        stage.set_uniform(Uniform::Projection(self.projection_matrix()));
        stage.set_uniform(Uniform::ViewPosition(self.camera.position));

        control
    }
}
