use glam::Vec3;
use serde::Serialize;
use stilllife_common::PointLight;
use stilllife_render::MeshKind;

/// Texture tag and the file it is read from, relative to the texture
/// directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TextureSpec {
    pub tag: &'static str,
    pub file: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MaterialSpec {
    pub tag: &'static str,
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub shininess: f32,
}

const fn texture(tag: &'static str, file: &'static str) -> TextureSpec {
    TextureSpec { tag, file }
}

const fn material(tag: &'static str, diffuse: Vec3, specular: Vec3, shininess: f32) -> MaterialSpec {
    MaterialSpec {
        tag,
        diffuse,
        specular,
        shininess,
    }
}

/// Registration order decides texture units.
pub const TEXTURES: [TextureSpec; 13] = [
    texture("Floor", "wood-floor.jpg"),
    texture("Yellow_rubber", "Mustard_Yellow_Rubber.jpg"),
    texture("Bottle_label", "Martinellis_Label.jpg"),
    texture("Metal_wrap", "Aluminium_Foil.jpg"),
    texture("Blue_pastel", "Cup_Blue_Pastel.jpg"),
    texture("Metal_Ribbon", "Metal_Ribbon.jpg"),
    texture("Door", "Door.png"),
    texture("Trim1", "Wood_trim_1.jpg"),
    texture("Trim2", "Wood_trim_2.jpg"),
    texture("Wall", "Wall_texture.jpg"),
    texture("Jam", "Jam_lable.png"),
    texture("Jam_2", "Jam_lable_2.png"),
    texture("Nutrition_facts", "Nutrition_Label.png"),
];

pub const MATERIALS: [MaterialSpec; 6] = [
    material(
        "pacifier_material",
        Vec3::new(1.0, 0.85, 0.2),
        Vec3::new(0.8, 0.7, 0.3),
        32.0,
    ),
    material("floor_material", Vec3::splat(0.7), Vec3::splat(0.3), 2.0),
    material("glass", Vec3::new(0.2, 0.6, 0.2), Vec3::ONE, 128.0),
    material(
        "metal_lid_material",
        Vec3::new(0.1, 0.3, 0.1),
        Vec3::splat(0.5),
        64.0,
    ),
    material(
        "plastic_bottle_material",
        Vec3::new(0.95, 0.85, 0.9),
        Vec3::splat(0.4),
        5.0,
    ),
    material(
        "brown_glass_material",
        Vec3::new(0.5, 0.3, 0.1),
        Vec3::splat(0.3),
        128.0,
    ),
];

/// Overhead key light and a low fill light from the front.
pub const LIGHTS: [PointLight; 2] = [
    PointLight {
        position: Vec3::new(0.0, 70.0, 0.0),
        ambient: Vec3::splat(0.35),
        diffuse: Vec3::splat(0.65),
        specular: Vec3::splat(0.35),
        constant: 1.0,
        linear: 0.075,
        quadratic: 0.02,
        active: true,
    },
    PointLight {
        position: Vec3::new(0.0, 2.0, 30.0),
        ambient: Vec3::splat(0.2),
        diffuse: Vec3::splat(0.5),
        specular: Vec3::splat(0.25),
        constant: 1.0,
        linear: 0.1,
        quadratic: 0.03,
        active: true,
    },
];

/// Meshes loaded at prepare time, in load order.
pub const REQUIRED_MESHES: [MeshKind; 7] = [
    MeshKind::Plane,
    MeshKind::Torus,
    MeshKind::Sphere,
    MeshKind::Cylinder,
    MeshKind::TaperedCylinder,
    MeshKind::ThinTorus,
    MeshKind::Box,
];
