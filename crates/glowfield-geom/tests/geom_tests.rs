use glowfield_geom::{Aabb, Quat, Ray, Triangle, Vec3};

fn approx_eq(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}

fn vec3_approx_eq(a: Vec3, b: Vec3, eps: f32) -> bool {
    approx_eq(a.x, b.x, eps) && approx_eq(a.y, b.y, eps) && approx_eq(a.z, b.z, eps)
}

#[test]
fn rotate_y_turns_forward_into_yawed_forward() {
    // Forward at yaw θ is (sin θ, 0, cos θ).
    let yaw = 0.7f32;
    let f = Vec3::Z.rotate_y(yaw);
    assert!(vec3_approx_eq(f, Vec3::new(yaw.sin(), 0.0, yaw.cos()), 1e-6));
    let quarter = Vec3::Z.rotate_y(std::f32::consts::FRAC_PI_2);
    assert!(vec3_approx_eq(quarter, Vec3::X, 1e-6));
}

#[test]
fn floor_and_lerp() {
    let v = Vec3::new(-0.5, 1.999, 2.0);
    assert_eq!(v.floor(), Vec3::new(-1.0, 1.0, 2.0));
    let m = Vec3::ZERO.lerp(Vec3::new(2.0, 4.0, -6.0), 0.25);
    assert!(vec3_approx_eq(m, Vec3::new(0.5, 1.0, -1.5), 1e-6));
}

#[test]
fn aabb_union_and_expand() {
    let a = Aabb::unit_cell(0, 0, 0);
    let b = Aabb::unit_cell(3, -2, 1);
    let u = a.union(&b);
    assert_eq!(u.min, Vec3::new(0.0, -2.0, 0.0));
    assert_eq!(u.max, Vec3::new(4.0, 1.0, 2.0));
    let e = a.expanded(0.5);
    assert_eq!(e.min, Vec3::splat(-0.5));
    assert_eq!(e.max, Vec3::splat(1.5));
    assert!(a.intersects(&Aabb::unit_cell(1, 0, 0)), "touching faces overlap");
    assert!(!a.intersects(&Aabb::unit_cell(2, 0, 0)));
}

#[test]
fn aabb_from_points_empty_is_none() {
    assert!(Aabb::from_points(std::iter::empty()).is_none());
    let bb = Aabb::from_points([Vec3::new(1.0, 2.0, 3.0), Vec3::new(-1.0, 5.0, 0.0)]).unwrap();
    assert_eq!(bb.min, Vec3::new(-1.0, 2.0, 0.0));
    assert_eq!(bb.max, Vec3::new(1.0, 5.0, 3.0));
}

#[test]
fn aabb_ray_reports_entry_face() {
    let cell = Aabb::unit_cell(2, 0, 0);
    let ray = Ray::new(Vec3::new(0.0, 0.5, 0.5), Vec3::X);
    let (t, n) = cell.ray_intersect(&ray).unwrap();
    assert!(approx_eq(t, 2.0, 1e-6));
    assert_eq!(n, Vec3::new(-1.0, 0.0, 0.0));

    let down = Ray::new(Vec3::new(2.5, 10.0, 0.5), Vec3::new(0.0, -1.0, 0.0));
    let (t, n) = cell.ray_intersect(&down).unwrap();
    assert!(approx_eq(t, 9.0, 1e-6));
    assert_eq!(n, Vec3::UP);

    let miss = Ray::new(Vec3::new(0.0, 5.0, 0.5), Vec3::X);
    assert!(cell.ray_intersect(&miss).is_none());
}

#[test]
fn aabb_triangles_face_outward() {
    let cell = Aabb::unit_cell(-1, 4, 7);
    let c = cell.center();
    let tris = cell.triangles();
    assert_eq!(tris.len(), 12);
    for t in tris.iter() {
        let centroid = (t.a + t.b + t.c) / 3.0;
        assert!(t.normal().dot(centroid - c) > 0.0, "inward triangle {t:?}");
        assert!(approx_eq(t.normal().length(), 1.0, 1e-6));
    }
}

#[test]
fn triangle_plane_distance_is_signed() {
    let t = Triangle::new(
        Vec3::new(0.0, 1.0, 0.0),
        Vec3::new(0.0, 1.0, 1.0),
        Vec3::new(1.0, 1.0, 0.0),
    );
    let p = t.plane();
    assert!(approx_eq(p.distance_to_point(Vec3::new(5.0, 3.0, 5.0)), 2.0, 1e-6));
    assert!(approx_eq(p.distance_to_point(Vec3::new(5.0, 0.5, 5.0)), -0.5, 1e-6));
}

#[test]
fn quat_orients_marker_normal() {
    let n = Vec3::new(1.0, 1.0, 0.0).normalized();
    let q = Quat::from_rotation_arc(Vec3::Z, n);
    assert!(vec3_approx_eq(q.rotate(Vec3::Z), n, 1e-5));
    assert!(approx_eq(q.rotate(Vec3::X).length(), 1.0, 1e-5));
}
