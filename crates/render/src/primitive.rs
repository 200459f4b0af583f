use serde::{Deserialize, Serialize};
use std::fmt;

/// Geometry loaded once and redrawn with different state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MeshKind {
    Plane,
    Box,
    Sphere,
    Cylinder,
    TaperedCylinder,
    Torus,
    /// Torus with a 0.1 tube thickness.
    ThinTorus,
}

impl MeshKind {
    pub const ALL: [MeshKind; 7] = [
        MeshKind::Plane,
        MeshKind::Box,
        MeshKind::Sphere,
        MeshKind::Cylinder,
        MeshKind::TaperedCylinder,
        MeshKind::Torus,
        MeshKind::ThinTorus,
    ];
}

/// One face of the unit box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoxSide {
    Front,
    Left,
    Right,
    Bottom,
    Top,
    Back,
}

/// Which parts of a cylinder are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Caps {
    pub top: bool,
    pub bottom: bool,
    pub sides: bool,
}

impl Caps {
    pub const ALL: Self = Self::new(true, true, true);
    pub const SIDES: Self = Self::new(false, false, true);

    pub const fn new(top: bool, bottom: bool, sides: bool) -> Self {
        Self { top, bottom, sides }
    }
}

impl Default for Caps {
    fn default() -> Self {
        Self::ALL
    }
}

/// A single draw call against a loaded mesh, with its variant flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DrawPrimitive {
    Plane,
    Box,
    BoxSide(BoxSide),
    Sphere,
    HalfSphere,
    Cylinder(Caps),
    TaperedCylinder(Caps),
    Torus,
    HalfTorus,
    ThinTorus,
}

impl DrawPrimitive {
    /// Mesh that must be loaded before this draw.
    pub fn mesh(self) -> MeshKind {
        match self {
            DrawPrimitive::Plane => MeshKind::Plane,
            DrawPrimitive::Box | DrawPrimitive::BoxSide(_) => MeshKind::Box,
            DrawPrimitive::Sphere | DrawPrimitive::HalfSphere => MeshKind::Sphere,
            DrawPrimitive::Cylinder(_) => MeshKind::Cylinder,
            DrawPrimitive::TaperedCylinder(_) => MeshKind::TaperedCylinder,
            DrawPrimitive::Torus | DrawPrimitive::HalfTorus => MeshKind::Torus,
            DrawPrimitive::ThinTorus => MeshKind::ThinTorus,
        }
    }
}

impl fmt::Display for DrawPrimitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let caps = |f: &mut fmt::Formatter<'_>, name: &str, c: &Caps| {
            write!(
                f,
                "{name} (top={}, bottom={}, sides={})",
                c.top, c.bottom, c.sides
            )
        };
        match self {
            DrawPrimitive::Plane => f.write_str("plane"),
            DrawPrimitive::Box => f.write_str("box"),
            DrawPrimitive::BoxSide(side) => write!(f, "box side {side:?}"),
            DrawPrimitive::Sphere => f.write_str("sphere"),
            DrawPrimitive::HalfSphere => f.write_str("half sphere"),
            DrawPrimitive::Cylinder(c) => caps(f, "cylinder", c),
            DrawPrimitive::TaperedCylinder(c) => caps(f, "tapered cylinder", c),
            DrawPrimitive::Torus => f.write_str("torus"),
            DrawPrimitive::HalfTorus => f.write_str("half torus"),
            DrawPrimitive::ThinTorus => f.write_str("thin torus"),
        }
    }
}
