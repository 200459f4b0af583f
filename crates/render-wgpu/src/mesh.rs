//! Procedural primitive meshes.
//!
//! Unit conventions: the plane spans [-1, 1] in X and Z at y = 0 facing +Y;
//! the box is a unit cube centred on the origin; the sphere has radius 1;
//! cylinders have radius 1 and span y in [0, 1] (tapered top radius 0.5);
//! tori lie in the XY plane with main radius 1.
//!
//! Each mesh records index ranges for the pieces a draw can select (box
//! faces, caps, halves), so every variant draws from the same buffers.

use bytemuck::{Pod, Zeroable};
use std::f32::consts::{PI, TAU};
use std::ops::Range;
use stilllife_render::{BoxSide, DrawPrimitive, MeshKind};

const RADIAL_SEGMENTS: u32 = 48;
const SPHERE_RINGS: u32 = 24;
const TORUS_TUBE_SEGMENTS: u32 = 24;
const TORUS_THICKNESS: f32 = 0.2;
const THIN_TORUS_THICKNESS: f32 = 0.1;
const TAPERED_TOP_RADIUS: f32 = 0.5;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

/// A selectable piece of a mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Face(BoxSide),
    Top,
    Bottom,
    Sides,
    /// Upper hemisphere of the sphere, or the first half sweep of a torus.
    Half,
}

/// Index ranges of a mesh, by section.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectionMap {
    total: u32,
    sections: Vec<(Section, Range<u32>)>,
}

impl SectionMap {
    pub fn section(&self, section: Section) -> Option<Range<u32>> {
        self.sections
            .iter()
            .find(|(s, _)| *s == section)
            .map(|(_, r)| r.clone())
    }

    /// Index ranges to draw for `primitive`.
    pub fn ranges(&self, primitive: DrawPrimitive) -> Vec<Range<u32>> {
        let pick = |s| self.section(s).into_iter().collect::<Vec<_>>();
        match primitive {
            DrawPrimitive::BoxSide(side) => pick(Section::Face(side)),
            DrawPrimitive::HalfSphere | DrawPrimitive::HalfTorus => pick(Section::Half),
            DrawPrimitive::Cylinder(caps) | DrawPrimitive::TaperedCylinder(caps) => [
                (caps.top, Section::Top),
                (caps.bottom, Section::Bottom),
                (caps.sides, Section::Sides),
            ]
            .into_iter()
            .filter(|(on, _)| *on)
            .filter_map(|(_, s)| self.section(s))
            .collect(),
            _ => vec![0..self.total],
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Geometry {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub sections: SectionMap,
}

impl Geometry {
    pub fn build(kind: MeshKind) -> Self {
        let mut g = Geometry::default();
        match kind {
            MeshKind::Plane => g.plane(),
            MeshKind::Box => g.cube(),
            MeshKind::Sphere => g.sphere(),
            MeshKind::Cylinder => g.cylinder(1.0),
            MeshKind::TaperedCylinder => g.cylinder(TAPERED_TOP_RADIUS),
            MeshKind::Torus => g.torus(TORUS_THICKNESS),
            MeshKind::ThinTorus => g.torus(THIN_TORUS_THICKNESS),
        }
        debug_assert!(g.vertices.len() <= u32::MAX as usize);
        debug_assert!(g.indices.len() <= u32::MAX as usize);
        g.sections.total = g.indices.len() as u32;
        g
    }

    fn mark(&mut self, section: Section, start: usize) {
        debug_assert!(self.indices.len() <= u32::MAX as usize);
        let range = start as u32..self.indices.len() as u32;
        self.sections.sections.push((section, range));
    }

    fn push(&mut self, position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> u32 {
        self.vertices.push(Vertex {
            position,
            normal,
            uv,
        });
        debug_assert!(self.vertices.len() <= u32::MAX as usize);
        self.vertices.len() as u32 - 1
    }

    fn quad(&mut self, corners: [[f32; 3]; 4], normal: [f32; 3]) {
        let uvs = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
        let base = self.vertices.len() as u32;
        for (corner, uv) in corners.into_iter().zip(uvs) {
            self.push(corner, normal, uv);
        }
        self.indices
            .extend([base, base + 1, base + 2, base + 2, base + 3, base]);
    }

    fn plane(&mut self) {
        self.quad(
            [
                [-1.0, 0.0, 1.0],
                [1.0, 0.0, 1.0],
                [1.0, 0.0, -1.0],
                [-1.0, 0.0, -1.0],
            ],
            [0.0, 1.0, 0.0],
        );
    }

    fn cube(&mut self) {
        let p = 0.5_f32;
        #[rustfmt::skip]
        let faces = [
            (BoxSide::Front,  [[-p, -p,  p], [ p, -p,  p], [ p,  p,  p], [-p,  p,  p]], [0.0, 0.0, 1.0]),
            (BoxSide::Back,   [[ p, -p, -p], [-p, -p, -p], [-p,  p, -p], [ p,  p, -p]], [0.0, 0.0, -1.0]),
            (BoxSide::Right,  [[ p, -p,  p], [ p, -p, -p], [ p,  p, -p], [ p,  p,  p]], [1.0, 0.0, 0.0]),
            (BoxSide::Left,   [[-p, -p, -p], [-p, -p,  p], [-p,  p,  p], [-p,  p, -p]], [-1.0, 0.0, 0.0]),
            (BoxSide::Top,    [[-p,  p,  p], [ p,  p,  p], [ p,  p, -p], [-p,  p, -p]], [0.0, 1.0, 0.0]),
            (BoxSide::Bottom, [[-p, -p, -p], [ p, -p, -p], [ p, -p,  p], [-p, -p,  p]], [0.0, -1.0, 0.0]),
        ];
        for (side, corners, normal) in faces {
            let start = self.indices.len();
            self.quad(corners, normal);
            self.mark(Section::Face(side), start);
        }
    }

    fn sphere(&mut self) {
        let columns = RADIAL_SEGMENTS + 1;
        for ring in 0..=SPHERE_RINGS {
            let theta = ring as f32 * PI / SPHERE_RINGS as f32;
            for seg in 0..=RADIAL_SEGMENTS {
                let phi = seg as f32 * TAU / RADIAL_SEGMENTS as f32;
                let p = [theta.sin() * phi.cos(), theta.cos(), theta.sin() * phi.sin()];
                let uv = [
                    seg as f32 / RADIAL_SEGMENTS as f32,
                    1.0 - ring as f32 / SPHERE_RINGS as f32,
                ];
                self.push(p, p, uv);
            }
        }
        // Rings run top to bottom, so the first half of the indices is the
        // upper hemisphere.
        for ring in 0..SPHERE_RINGS {
            if ring == SPHERE_RINGS / 2 {
                self.mark(Section::Half, 0);
            }
            for seg in 0..RADIAL_SEGMENTS {
                let a = ring * columns + seg;
                let b = a + columns;
                self.indices.extend([a, b, a + 1, b, b + 1, a + 1]);
            }
        }
    }

    fn cylinder(&mut self, top_radius: f32) {
        let slope = 1.0 - top_radius;
        let start = self.indices.len();
        let base = self.vertices.len() as u32;
        for seg in 0..=RADIAL_SEGMENTS {
            let phi = seg as f32 * TAU / RADIAL_SEGMENTS as f32;
            let (s, c) = phi.sin_cos();
            let n = glam::Vec3::new(c, slope, s).normalize().to_array();
            let u = seg as f32 / RADIAL_SEGMENTS as f32;
            self.push([c, 0.0, s], n, [u, 0.0]);
            self.push([c * top_radius, 1.0, s * top_radius], n, [u, 1.0]);
        }
        for seg in 0..RADIAL_SEGMENTS {
            let a = base + seg * 2;
            self.indices.extend([a, a + 1, a + 2, a + 2, a + 1, a + 3]);
        }
        self.mark(Section::Sides, start);

        self.disc(1.0, top_radius, Section::Top);
        self.disc(0.0, 1.0, Section::Bottom);
    }

    fn disc(&mut self, y: f32, radius: f32, section: Section) {
        let start = self.indices.len();
        let normal = if y > 0.0 { [0.0, 1.0, 0.0] } else { [0.0, -1.0, 0.0] };
        let centre = self.push([0.0, y, 0.0], normal, [0.5, 0.5]);
        for seg in 0..=RADIAL_SEGMENTS {
            let phi = seg as f32 * TAU / RADIAL_SEGMENTS as f32;
            let (s, c) = phi.sin_cos();
            self.push(
                [c * radius, y, s * radius],
                normal,
                [0.5 + c * 0.5, 0.5 + s * 0.5],
            );
        }
        for seg in 0..RADIAL_SEGMENTS {
            let a = centre + 1 + seg;
            self.indices.extend([centre, a, a + 1]);
        }
        self.mark(section, start);
    }

    fn torus(&mut self, thickness: f32) {
        let tube = TORUS_TUBE_SEGMENTS + 1;
        for seg in 0..=RADIAL_SEGMENTS {
            let phi = seg as f32 * TAU / RADIAL_SEGMENTS as f32;
            let (ps, pc) = phi.sin_cos();
            for t in 0..=TORUS_TUBE_SEGMENTS {
                let theta = t as f32 * TAU / TORUS_TUBE_SEGMENTS as f32;
                let (ts, tc) = theta.sin_cos();
                let normal = [pc * tc, ps * tc, ts];
                let ring = 1.0 + thickness * tc;
                self.push(
                    [pc * ring, ps * ring, thickness * ts],
                    normal,
                    [
                        seg as f32 / RADIAL_SEGMENTS as f32,
                        t as f32 / TORUS_TUBE_SEGMENTS as f32,
                    ],
                );
            }
        }
        // Sweep order follows the main angle, so the first half of the
        // indices covers 0..PI.
        for seg in 0..RADIAL_SEGMENTS {
            if seg == RADIAL_SEGMENTS / 2 {
                self.mark(Section::Half, 0);
            }
            for t in 0..TORUS_TUBE_SEGMENTS {
                let a = seg * tube + t;
                let b = a + tube;
                self.indices.extend([a, b, a + 1, b, b + 1, a + 1]);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stilllife_render::Caps;

    fn assert_indices_valid(g: &Geometry) {
        assert_eq!(g.indices.len() % 3, 0);
        let n = g.vertices.len() as u32;
        assert!(g.indices.iter().all(|&i| i < n));
    }

    #[test]
    fn every_mesh_is_well_formed() {
        for kind in MeshKind::ALL {
            let g = Geometry::build(kind);
            assert!(!g.indices.is_empty(), "{kind:?}");
            assert_indices_valid(&g);
        }
    }

    #[test]
    fn section_ranges_cover_index_buffer() {
        for kind in MeshKind::ALL {
            let g = Geometry::build(kind);
            assert_eq!(g.sections.total as usize, g.indices.len(), "{kind:?}");
            for (_, range) in &g.sections.sections {
                assert!(range.start <= range.end && range.end <= g.sections.total, "{kind:?}");
            }
        }
    }

    #[test]
    fn plane_spans_unit_square() {
        let g = Geometry::build(MeshKind::Plane);
        for v in &g.vertices {
            assert_eq!(v.position[1], 0.0);
            assert_eq!(v.position[0].abs(), 1.0);
            assert_eq!(v.position[2].abs(), 1.0);
            assert_eq!(v.normal, [0.0, 1.0, 0.0]);
        }
    }

    #[test]
    fn box_sides_are_single_quads() {
        let g = Geometry::build(MeshKind::Box);
        let mut covered = 0;
        for side in [
            BoxSide::Front,
            BoxSide::Left,
            BoxSide::Right,
            BoxSide::Bottom,
            BoxSide::Top,
            BoxSide::Back,
        ] {
            let ranges = g.sections.ranges(DrawPrimitive::BoxSide(side));
            assert_eq!(ranges.len(), 1);
            assert_eq!(ranges[0].len(), 6);
            covered += ranges[0].len();
        }
        assert_eq!(covered, g.indices.len());
        assert_eq!(g.sections.ranges(DrawPrimitive::Box), vec![0..36]);
    }

    #[test]
    fn front_face_points_at_positive_z() {
        let g = Geometry::build(MeshKind::Box);
        let range = g.sections.section(Section::Face(BoxSide::Front)).unwrap();
        for &i in &g.indices[range.start as usize..range.end as usize] {
            let v = g.vertices[i as usize];
            assert_eq!(v.position[2], 0.5);
            assert_eq!(v.normal, [0.0, 0.0, 1.0]);
        }
    }

    #[test]
    fn cylinder_caps_select_sections() {
        let g = Geometry::build(MeshKind::Cylinder);
        let sides = g.sections.section(Section::Sides).unwrap();
        let top = g.sections.section(Section::Top).unwrap();
        let bottom = g.sections.section(Section::Bottom).unwrap();

        assert_eq!(
            g.sections.ranges(DrawPrimitive::Cylinder(Caps::SIDES)),
            vec![sides.clone()]
        );
        assert_eq!(
            g.sections
                .ranges(DrawPrimitive::Cylinder(Caps::new(true, false, true))),
            vec![top.clone(), sides.clone()]
        );
        assert_eq!(
            g.sections
                .ranges(DrawPrimitive::Cylinder(Caps::new(false, true, false))),
            vec![bottom]
        );
        assert!(
            g.sections
                .ranges(DrawPrimitive::Cylinder(Caps::new(false, false, false)))
                .is_empty()
        );
    }

    #[test]
    fn cylinder_spans_unit_height() {
        let g = Geometry::build(MeshKind::Cylinder);
        let (lo, hi) = g.vertices.iter().fold((f32::MAX, f32::MIN), |(lo, hi), v| {
            (lo.min(v.position[1]), hi.max(v.position[1]))
        });
        assert_eq!((lo, hi), (0.0, 1.0));
    }

    #[test]
    fn tapered_top_is_half_radius() {
        let g = Geometry::build(MeshKind::TaperedCylinder);
        let top_radius = g
            .vertices
            .iter()
            .filter(|v| v.position[1] == 1.0)
            .map(|v| glam::Vec2::new(v.position[0], v.position[2]).length())
            .fold(0.0_f32, f32::max);
        assert!((top_radius - 0.5).abs() < 1e-5);
    }

    #[test]
    fn halves_cover_half_the_indices() {
        for (kind, draw) in [
            (MeshKind::Sphere, DrawPrimitive::HalfSphere),
            (MeshKind::Torus, DrawPrimitive::HalfTorus),
        ] {
            let g = Geometry::build(kind);
            let ranges = g.sections.ranges(draw);
            assert_eq!(ranges.len(), 1);
            assert_eq!(ranges[0].start, 0);
            assert_eq!(ranges[0].len() * 2, g.indices.len());
        }
    }

    #[test]
    fn upper_hemisphere_stays_above_equator() {
        let g = Geometry::build(MeshKind::Sphere);
        let half = g.sections.section(Section::Half).unwrap();
        for &i in &g.indices[half.start as usize..half.end as usize] {
            assert!(g.vertices[i as usize].position[1] >= -1e-6);
        }
    }

    #[test]
    fn thin_torus_is_thinner() {
        let depth = |kind| {
            Geometry::build(kind)
                .vertices
                .iter()
                .map(|v| v.position[2].abs())
                .fold(0.0_f32, f32::max)
        };
        assert!((depth(MeshKind::ThinTorus) - 0.1).abs() < 1e-4);
        assert!(depth(MeshKind::Torus) > depth(MeshKind::ThinTorus));
    }
}
