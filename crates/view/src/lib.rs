//! View: first-person camera, projection modes, and the per-frame coordinator.
//!
//! # Invariants
//! - Camera pitch stays strictly inside ±89 degrees.
//! - The camera's front is re-derived from yaw and pitch on every mouse
//!   update; up is rebuilt orthogonal to it.
//! - Projection mode only changes through the explicit Perspective and
//!   Orthographic triggers; there is no toggle.
//! - Camera and input state are owned by [`ViewManager`] and touched only
//!   from the frame thread.

mod camera;
mod manager;
mod projection;

pub use camera::{CameraPose, FlyCamera, MAX_PITCH, ViewPreset};
pub use manager::{FrameControl, ViewManager};
pub use projection::{
    FAR_PLANE, NEAR_PLANE, ORTHO_HALF_EXTENT, OrthoBounds, Viewport, WINDOW_HEIGHT, WINDOW_WIDTH,
    projection_matrix,
};

pub fn crate_info() -> &'static str {
    "stilllife-view v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("view"));
    }
}
