//! Fixed world geometry: ground, staircase, tree row and pillar.
#![forbid(unsafe_code)]

pub mod shapes;
pub mod stairs;

pub use stairs::{Direction, Stairs};

use glowfield_geom::{Aabb, Triangle, Vec3};

/// Side length of the square ground plane centred on the origin.
pub const GROUND_SIZE: f32 = 400.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SurfaceKind {
    Ground,
    Step,
    Trunk,
    Foliage,
    Pillar,
}

/// One static primitive. Every static surface collides; only some accept placements.
#[derive(Clone, Debug)]
pub struct StaticSurface {
    pub kind: SurfaceKind,
    pub label: String,
    pub triangles: Vec<Triangle>,
    pub placeable: bool,
}

impl StaticSurface {
    pub fn new(kind: SurfaceKind, label: impl Into<String>, triangles: Vec<Triangle>) -> Self {
        Self {
            kind,
            label: label.into(),
            triangles,
            placeable: matches!(kind, SurfaceKind::Ground),
        }
    }

    pub fn bounds(&self) -> Option<Aabb> {
        Aabb::from_points(self.triangles.iter().flat_map(|t| [t.a, t.b, t.c]))
    }
}

#[derive(Clone, Debug, Default)]
pub struct Scene {
    pub surfaces: Vec<StaticSurface>,
}

impl Scene {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Ground plane only.
    pub fn flat() -> Self {
        let mut s = Self::empty();
        s.push(ground(GROUND_SIZE));
        s
    }

    /// The playable level: ground, a long eastward staircase, sixteen pines and a tall pillar.
    pub fn standard() -> Self {
        let mut s = Self::flat();
        let stairs = Stairs {
            start: Vec3::new(-12.0, 0.0, 6.0),
            direction: Direction::E,
            count: 67,
            width: 3.0,
        };
        for step in stairs.steps() {
            s.push(step);
        }
        for z in 11..=26 {
            for part in pine_tree(Vec3::new(10.0, 0.0, -(z as f32))) {
                s.push(part);
            }
        }
        s.push(pillar(Vec3::new(70.0, 10.0, 10.0), Vec3::new(5.0, 20.0, 5.0)));
        log::debug!(
            "scene: {} surfaces, {} triangles",
            s.surfaces.len(),
            s.triangle_count()
        );
        s
    }

    pub fn push(&mut self, surface: StaticSurface) {
        self.surfaces.push(surface);
    }

    pub fn triangle_count(&self) -> usize {
        self.surfaces.iter().map(|s| s.triangles.len()).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StaticSurface> {
        self.surfaces.iter()
    }
}

/// Square plane at y = 0 facing up.
pub fn ground(size: f32) -> StaticSurface {
    let h = size * 0.5;
    let a = Vec3::new(-h, 0.0, -h);
    let b = Vec3::new(-h, 0.0, h);
    let c = Vec3::new(h, 0.0, h);
    let d = Vec3::new(h, 0.0, -h);
    StaticSurface::new(
        SurfaceKind::Ground,
        "ground",
        vec![Triangle::new(a, b, c), Triangle::new(a, c, d)],
    )
}

/// Pine: a short trunk with three stacked cones, all relative to `base`.
pub fn pine_tree(base: Vec3) -> Vec<StaticSurface> {
    let label = |part: &str| format!("pine({:.0},{:.0}).{part}", base.x, base.z);
    let mut parts = vec![StaticSurface::new(
        SurfaceKind::Trunk,
        label("trunk"),
        shapes::cylinder(0.15, 0.2, 2.0, 8, base + Vec3::new(0.0, 5.0, 0.0)),
    )];
    for (i, (r, h, y)) in [(1.2, 2.0, 10.0), (1.0, 1.8, 15.0), (0.8, 1.5, 20.0)]
        .into_iter()
        .enumerate()
    {
        parts.push(StaticSurface::new(
            SurfaceKind::Foliage,
            label(&format!("cone{i}")),
            shapes::cone(r, h, 8, base + Vec3::new(0.0, y, 0.0)),
        ));
    }
    parts
}

pub fn pillar(center: Vec3, size: Vec3) -> StaticSurface {
    StaticSurface::new(
        SurfaceKind::Pillar,
        "pillar",
        shapes::cuboid(center, size),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_ground_is_placeable() {
        let scene = Scene::standard();
        let placeable: Vec<_> = scene.iter().filter(|s| s.placeable).collect();
        assert_eq!(placeable.len(), 1);
        assert_eq!(placeable[0].kind, SurfaceKind::Ground);
    }

    #[test]
    fn standard_scene_inventory() {
        let scene = Scene::standard();
        let count = |k: SurfaceKind| scene.iter().filter(|s| s.kind == k).count();
        assert_eq!(count(SurfaceKind::Ground), 1);
        assert_eq!(count(SurfaceKind::Step), 67);
        assert_eq!(count(SurfaceKind::Trunk), 16);
        assert_eq!(count(SurfaceKind::Foliage), 48);
        assert_eq!(count(SurfaceKind::Pillar), 1);
        // ground + steps + 16 trees of (32 trunk + 3 * 16 cone) + pillar
        assert_eq!(scene.triangle_count(), 2 + 67 * 12 + 16 * 80 + 12);
    }

    #[test]
    fn ground_faces_up_and_spans_size() {
        let g = ground(GROUND_SIZE);
        for t in &g.triangles {
            assert_eq!(t.normal(), Vec3::UP);
        }
        let b = g.bounds().unwrap();
        assert_eq!(b.min, Vec3::new(-200.0, 0.0, -200.0));
        assert_eq!(b.max, Vec3::new(200.0, 0.0, 200.0));
    }

    #[test]
    fn pillar_bounds() {
        let p = pillar(Vec3::new(70.0, 10.0, 10.0), Vec3::new(5.0, 20.0, 5.0));
        let b = p.bounds().unwrap();
        assert_eq!(b.min, Vec3::new(67.5, 0.0, 7.5));
        assert_eq!(b.max, Vec3::new(72.5, 20.0, 12.5));
    }

    #[test]
    fn tree_parts_float_above_base() {
        let parts = pine_tree(Vec3::new(10.0, 0.0, -11.0));
        let trunk = parts[0].bounds().unwrap();
        assert!((trunk.min.y - 4.0).abs() < 1e-5 && (trunk.max.y - 6.0).abs() < 1e-5);
        let top = parts[3].bounds().unwrap();
        assert!((top.max.y - 20.75).abs() < 1e-5);
    }
}
