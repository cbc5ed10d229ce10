use core::f32::consts::TAU;

use glowfield_geom::{Aabb, Triangle, Vec3};

/// Axis-aligned box of `size` centred on `center`.
pub fn cuboid(center: Vec3, size: Vec3) -> Vec<Triangle> {
    Aabb::from_center_half_extents(center, size * 0.5)
        .triangles()
        .to_vec()
}

/// Capped frustum centred on `center`, axis along +Y. A zero `radius_top` gives a cone.
pub fn cylinder(
    radius_top: f32,
    radius_bottom: f32,
    height: f32,
    segments: u32,
    center: Vec3,
) -> Vec<Triangle> {
    let segments = segments.max(3);
    let half = height * 0.5;
    let ring = |r: f32, y: f32, i: u32| {
        let theta = TAU * (i % segments) as f32 / segments as f32;
        center + Vec3::new(r * theta.sin(), y, r * theta.cos())
    };
    let top_c = center + Vec3::new(0.0, half, 0.0);
    let bot_c = center - Vec3::new(0.0, half, 0.0);
    let mut out = Vec::new();
    for i in 0..segments {
        let b0 = ring(radius_bottom, -half, i);
        let b1 = ring(radius_bottom, -half, i + 1);
        let t0 = ring(radius_top, half, i);
        let t1 = ring(radius_top, half, i + 1);
        out.push(Triangle::new(b0, b1, t0));
        if radius_top > 0.0 {
            out.push(Triangle::new(b1, t1, t0));
            out.push(Triangle::new(top_c, t0, t1));
        }
        if radius_bottom > 0.0 {
            out.push(Triangle::new(bot_c, b1, b0));
        }
    }
    out
}

pub fn cone(radius: f32, height: f32, segments: u32, center: Vec3) -> Vec<Triangle> {
    cylinder(0.0, radius, height, segments, center)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn faces_outward(tris: &[Triangle], center: Vec3) -> bool {
        tris.iter().all(|t| {
            let centroid = (t.a + t.b + t.c) / 3.0;
            t.normal().dot(centroid - center) > 0.0
        })
    }

    #[test]
    fn cylinder_triangle_count_and_winding() {
        let c = Vec3::new(1.0, 5.0, -2.0);
        let tris = cylinder(0.15, 0.2, 2.0, 8, c);
        assert_eq!(tris.len(), 32);
        assert!(faces_outward(&tris, c));
    }

    #[test]
    fn cone_has_no_top_cap() {
        let c = Vec3::new(0.0, 10.0, 0.0);
        let tris = cone(1.2, 2.0, 8, c);
        assert_eq!(tris.len(), 16);
        assert!(faces_outward(&tris, c));
        let apex_hits = tris
            .iter()
            .filter(|t| [t.a, t.b, t.c].contains(&Vec3::new(0.0, 11.0, 0.0)))
            .count();
        assert_eq!(apex_hits, 8);
    }

    #[test]
    fn cuboid_is_twelve_triangles() {
        let tris = cuboid(Vec3::ZERO, Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(tris.len(), 12);
        assert!(faces_outward(&tris, Vec3::ZERO));
    }
}
