//! Composite objects of the still life, authored around local origins.

use glam::Vec3;
use stilllife_common::Transform;
use stilllife_render::{BoxSide, Caps, DrawPrimitive, Part, Placement, SceneObject, Surface};

const fn v(x: f32, y: f32, z: f32) -> Vec3 {
    Vec3::new(x, y, z)
}

const fn part(
    scale: Vec3,
    rotation: Vec3,
    position: Vec3,
    surface: Surface,
    material: Option<&'static str>,
    primitive: DrawPrimitive,
) -> Part {
    Part {
        transform: Transform::new(scale, rotation, position),
        surface,
        material,
        primitive,
    }
}

const NO_TURN: Vec3 = Vec3::ZERO;
const UPRIGHT: Vec3 = v(90.0, 0.0, 0.0);
const SIDE_WALL: Vec3 = v(90.0, 90.0, 0.0);

const RUBBER: Option<&str> = Some("pacifier_material");
const PLASTIC: Option<&str> = Some("plastic_bottle_material");
const BROWN_GLASS: Option<&str> = Some("brown_glass_material");
const METAL_LID: Option<&str> = Some("metal_lid_material");
const GLASS: Option<&str> = Some("glass");

const LOTION_PINK: Surface = Surface::rgba(0.94, 0.67, 0.83, 1.0);
const JAR_BROWN: Surface = Surface::rgba(0.28, 0.18, 0.10, 1.0);
const LID_GREEN: Surface = Surface::rgba(0.13, 0.33, 0.19, 1.0);
const BOTTLE_GREEN: Surface = Surface::rgba(0.16, 0.26, 0.10, 0.90);

/// Floor, back wall with door, side walls, and skirting trim.
pub static BACKGROUND: SceneObject = SceneObject {
    name: "background",
    parts: &[
        part(
            v(50.0, 1.0, 60.0),
            NO_TURN,
            v(0.0, 0.0, -10.0),
            Surface::texture("Floor", 0.3, 0.3),
            Some("floor_material"),
            DrawPrimitive::Plane,
        ),
        part(
            v(50.0, 1.0, 60.0),
            UPRIGHT,
            v(0.0, 64.0, -50.0),
            Surface::texture("Door", 1.0, 1.0),
            None,
            DrawPrimitive::Plane,
        ),
        part(
            v(50.0, 1.0, 3.0),
            UPRIGHT,
            v(0.0, 0.0, -50.0),
            Surface::texture("Trim2", 1.0, 0.1),
            None,
            DrawPrimitive::Plane,
        ),
        part(
            v(50.0, 1.0, 0.5),
            UPRIGHT,
            v(0.0, 3.5, -50.0),
            Surface::rgba(0.0, 0.0, 0.0, 1.0),
            None,
            DrawPrimitive::Plane,
        ),
        part(
            v(50.0, 1.0, 60.0),
            SIDE_WALL,
            v(-50.0, 64.0, 0.0),
            Surface::texture("Wall", 1.0, 1.0),
            None,
            DrawPrimitive::Plane,
        ),
        part(
            v(50.0, 1.0, 4.0),
            SIDE_WALL,
            v(-50.0, 0.0, 0.0),
            Surface::texture("Trim1", 1.0, 0.1),
            None,
            DrawPrimitive::Plane,
        ),
        part(
            v(50.0, 1.0, 60.0),
            SIDE_WALL,
            v(50.0, 64.0, 0.0),
            Surface::texture("Wall", 1.0, 1.0),
            None,
            DrawPrimitive::Plane,
        ),
        part(
            v(50.0, 1.0, 4.0),
            SIDE_WALL,
            v(50.0, 0.0, 0.0),
            Surface::texture("Trim1", 1.0, 0.1),
            None,
            DrawPrimitive::Plane,
        ),
    ],
};

pub static PACIFIER: SceneObject = SceneObject {
    name: "pacifier",
    parts: &[
        // handle
        part(
            v(1.25, 1.2, 1.0),
            v(225.0, 45.0, 0.0),
            v(0.0, 1.1, 0.0),
            Surface::texture("Yellow_rubber", 1.0, 0.2),
            RUBBER,
            DrawPrimitive::HalfTorus,
        ),
        // mouth guard
        part(
            v(0.25, 1.7, 1.7),
            v(0.0, -30.0, 55.0),
            v(0.0, 1.15, 0.0),
            Surface::texture("Yellow_rubber", 0.2, 0.2),
            RUBBER,
            DrawPrimitive::Sphere,
        ),
        part(
            v(0.85, 0.85, 0.85),
            v(30.0, 0.0, 315.0),
            v(0.0, 1.15, 0.0),
            Surface::texture("Yellow_rubber", 0.2, 0.2),
            RUBBER,
            DrawPrimitive::HalfSphere,
        ),
        // nipple
        part(
            v(0.4, 1.25, 0.4),
            v(30.0, 0.0, 325.0),
            v(0.35, 1.65, 0.35),
            Surface::texture("Yellow_rubber", 0.2, 0.2),
            RUBBER,
            DrawPrimitive::Cylinder(Caps::SIDES),
        ),
        part(
            v(0.45, 0.45, 0.45),
            NO_TURN,
            v(0.9, 2.45, 0.9),
            Surface::texture("Yellow_rubber", 0.2, 0.2),
            RUBBER,
            DrawPrimitive::Sphere,
        ),
    ],
};

/// The cup carries no material of its own.
pub static CUP: SceneObject = SceneObject {
    name: "cup",
    parts: &[
        part(
            v(4.5, 8.0, 4.5),
            v(0.0, 30.0, 0.0),
            v(0.0, 0.0, 0.0),
            Surface::texture("Blue_pastel", 1.0, 0.2),
            None,
            DrawPrimitive::Cylinder(Caps::new(false, true, true)),
        ),
        part(
            v(2.75, 4.0, 2.5),
            v(320.0, 0.0, 270.0),
            v(3.39, 4.0, -2.94),
            Surface::rgba(0.13, 0.25, 0.39, 1.0),
            None,
            DrawPrimitive::HalfTorus,
        ),
    ],
};

pub static BOTTLE: SceneObject = SceneObject {
    name: "bottle",
    parts: &[
        // label, mirrored so the print reads left to right
        part(
            v(3.75, 8.5, 3.75),
            v(0.0, 100.0, 0.0),
            v(0.0, 1.5, 0.0),
            Surface::texture("Bottle_label", -1.0, 1.0),
            None,
            DrawPrimitive::Cylinder(Caps::SIDES),
        ),
        part(
            v(1.79, 2.0, 1.79),
            NO_TURN,
            v(0.0, 15.75, 0.0),
            Surface::texture("Metal_Ribbon", 1.0, 1.0),
            None,
            DrawPrimitive::TaperedCylinder(Caps::SIDES),
        ),
        // foil-wrapped neck
        part(
            v(0.96, 5.5, 0.96),
            NO_TURN,
            v(0.0, 17.6, 0.0),
            Surface::texture("Metal_wrap", 1.0, 1.0),
            None,
            DrawPrimitive::Cylinder(Caps::new(true, false, true)),
        ),
        part(
            v(1.0, 1.0, 5.0),
            UPRIGHT,
            v(0.0, 22.0, 0.0),
            Surface::texture("Metal_wrap", 0.5, 0.5),
            None,
            DrawPrimitive::ThinTorus,
        ),
        // glass base
        part(
            v(3.39, 3.39, 15.0),
            UPRIGHT,
            v(0.0, 1.5, 0.0),
            BOTTLE_GREEN,
            GLASS,
            DrawPrimitive::ThinTorus,
        ),
        part(
            v(3.39, 1.0, 3.39),
            NO_TURN,
            v(0.0, 1.5, 0.0),
            BOTTLE_GREEN,
            GLASS,
            DrawPrimitive::Cylinder(Caps::new(false, true, false)),
        ),
        // shoulder
        part(
            v(3.39, 3.39, 20.0),
            UPRIGHT,
            v(0.0, 10.0, 0.0),
            BOTTLE_GREEN,
            GLASS,
            DrawPrimitive::ThinTorus,
        ),
        part(
            v(3.545, 4.0, 3.545),
            NO_TURN,
            v(0.0, 11.8, 0.0),
            BOTTLE_GREEN,
            GLASS,
            DrawPrimitive::TaperedCylinder(Caps::SIDES),
        ),
    ],
};

const JAR_BODY_SCALE: Vec3 = v(6.0, 3.0, 6.0);
const JAR_TURN: Vec3 = v(0.0, -15.0, 0.0);
const JAR_BODY_AT: Vec3 = v(0.0, 2.5, 0.0);

/// Jam jar: labelled body faces, glass base and shoulder, neck, lid.
pub static JAM: SceneObject = SceneObject {
    name: "jam",
    parts: &[
        part(
            JAR_BODY_SCALE,
            JAR_TURN,
            JAR_BODY_AT,
            Surface::texture("Jam_2", 1.0, 1.0),
            None,
            DrawPrimitive::BoxSide(BoxSide::Right),
        ),
        part(
            JAR_BODY_SCALE,
            JAR_TURN,
            JAR_BODY_AT,
            Surface::texture("Jam", 1.0, 1.0),
            None,
            DrawPrimitive::BoxSide(BoxSide::Bottom),
        ),
        part(
            JAR_BODY_SCALE,
            JAR_TURN,
            JAR_BODY_AT,
            Surface::texture("Nutrition_facts", 1.0, 1.0),
            None,
            DrawPrimitive::BoxSide(BoxSide::Left),
        ),
        part(
            JAR_BODY_SCALE,
            JAR_TURN,
            JAR_BODY_AT,
            JAR_BROWN,
            BROWN_GLASS,
            DrawPrimitive::BoxSide(BoxSide::Front),
        ),
        part(
            v(6.0, 1.0, 6.0),
            JAR_TURN,
            v(0.0, 0.5, 0.0),
            JAR_BROWN,
            BROWN_GLASS,
            DrawPrimitive::Box,
        ),
        part(
            v(6.0, 1.5, 6.0),
            JAR_TURN,
            v(0.0, 4.75, 0.0),
            JAR_BROWN,
            BROWN_GLASS,
            DrawPrimitive::Box,
        ),
        part(
            v(2.5, 1.0, 2.5),
            NO_TURN,
            v(0.0, 5.5, 0.0),
            JAR_BROWN,
            BROWN_GLASS,
            DrawPrimitive::Cylinder(Caps::SIDES),
        ),
        // lid rim and top
        part(
            v(2.5, 2.5, 5.0),
            UPRIGHT,
            v(0.0, 6.5, 0.0),
            LID_GREEN,
            METAL_LID,
            DrawPrimitive::ThinTorus,
        ),
        part(
            v(2.5, 1.0, 2.5),
            NO_TURN,
            v(0.0, 6.7, 0.0),
            LID_GREEN,
            METAL_LID,
            DrawPrimitive::Cylinder(Caps::new(false, true, false)),
        ),
    ],
};

pub static LOTION: SceneObject = SceneObject {
    name: "lotion",
    parts: &[
        // cap
        part(
            v(0.45, 1.0, 0.45),
            NO_TURN,
            v(0.0, 6.0, 0.0),
            Surface::rgba(0.92, 0.87, 0.90, 1.0),
            PLASTIC,
            DrawPrimitive::Cylinder(Caps::new(true, false, true)),
        ),
        // base, flipped upside down
        part(
            v(2.5, 2.0, 1.40),
            v(0.0, 0.0, 180.0),
            v(0.0, 2.001, 0.0),
            LOTION_PINK,
            PLASTIC,
            DrawPrimitive::TaperedCylinder(Caps::new(true, false, true)),
        ),
        part(
            v(2.5, 3.0, 1.40),
            NO_TURN,
            v(0.0, 2.0, 0.0),
            LOTION_PINK,
            PLASTIC,
            DrawPrimitive::TaperedCylinder(Caps::SIDES),
        ),
        // translucent shoulder
        part(
            v(1.25, 1.0, 0.70),
            NO_TURN,
            v(0.0, 5.0, 0.0),
            Surface::rgba(0.94, 0.67, 0.83, 0.30),
            PLASTIC,
            DrawPrimitive::TaperedCylinder(Caps::new(true, false, true)),
        ),
    ],
};

/// Every object in draw order with its world origin.
pub static TABLEAU: [Placement; 6] = [
    Placement {
        object: &BACKGROUND,
        origin: Vec3::ZERO,
    },
    Placement {
        object: &PACIFIER,
        origin: v(2.8, 0.075, 2.0),
    },
    Placement {
        object: &CUP,
        origin: v(-9.0, 0.005, -7.0),
    },
    Placement {
        object: &BOTTLE,
        origin: v(1.0, 0.0, -8.0),
    },
    Placement {
        object: &JAM,
        origin: v(9.0, 0.001, -4.0),
    },
    Placement {
        object: &LOTION,
        origin: Vec3::ZERO,
    },
];

/// Find a placed object by name.
pub fn placement(name: &str) -> Option<&'static Placement> {
    TABLEAU.iter().find(|p| p.object.name == name)
}
