use glam::Mat4;
use stilllife_input::ProjectionMode;

pub const WINDOW_WIDTH: u32 = 1000;
pub const WINDOW_HEIGHT: u32 = 800;
pub const NEAR_PLANE: f32 = 0.1;
pub const FAR_PLANE: f32 = 100.0;
/// Half the horizontal extent of the orthographic box, in world units.
pub const ORTHO_HALF_EXTENT: f32 = 20.0;

/// Output surface size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: WINDOW_WIDTH,
            height: WINDOW_HEIGHT,
        }
    }
}

impl Viewport {
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

/// Clip planes of the orthographic view box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrthoBounds {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
    pub near: f32,
    pub far: f32,
}

impl OrthoBounds {
    /// Symmetric box of half-width [`ORTHO_HALF_EXTENT`]; the vertical half
    /// extent is scaled by the inverse aspect ratio.
    pub fn for_viewport(viewport: Viewport) -> Self {
        let vertical = ORTHO_HALF_EXTENT / viewport.aspect();
        Self {
            left: -ORTHO_HALF_EXTENT,
            right: ORTHO_HALF_EXTENT,
            bottom: -vertical,
            top: vertical,
            near: NEAR_PLANE,
            far: FAR_PLANE,
        }
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::orthographic_rh(
            self.left,
            self.right,
            self.bottom,
            self.top,
            self.near,
            self.far,
        )
    }
}

/// Projection for the given mode. `fov_degrees` is only used in perspective.
pub fn projection_matrix(mode: ProjectionMode, fov_degrees: f32, viewport: Viewport) -> Mat4 {
    match mode {
        ProjectionMode::Perspective => Mat4::perspective_rh(
            fov_degrees.to_radians(),
            viewport.aspect(),
            NEAR_PLANE,
            FAR_PLANE,
        ),
        ProjectionMode::Orthographic => OrthoBounds::for_viewport(viewport).matrix(),
    }
}
