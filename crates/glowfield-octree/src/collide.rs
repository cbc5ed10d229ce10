use glowfield_geom::{Capsule, Triangle, closest_points_on_segments};

use crate::Contact;

/// Endpoints this far outside a plane still count as touching it, so a capsule
/// resting on a surface keeps reporting contact.
pub const CONTACT_SLOP: f32 = 1e-4;

/// Contact between one triangle and a capsule, or `None` when they are apart.
///
/// The segment point where the capsule crosses the plane (inflated by the radius) is
/// tried first; if it lies inside the triangle the plane normal is returned. Otherwise
/// the edge nearest the capsule's core segment decides the contact.
pub fn triangle_capsule_contact(tri: &Triangle, capsule: &Capsule) -> Option<Contact> {
    let plane = tri.plane();
    let r = capsule.radius;
    let d1 = plane.distance_to_point(capsule.start) - r;
    let d2 = plane.distance_to_point(capsule.end) - r;
    if (d1 > CONTACT_SLOP && d2 > CONTACT_SLOP) || (d1 < -r && d2 < -r) {
        return None;
    }

    let denom = d1.abs() + d2.abs();
    let delta = if denom > 0.0 { (d1 / denom).abs() } else { 0.0 };
    let crossing = capsule.start.lerp(capsule.end, delta);
    if tri.contains_point(crossing) {
        return Some(Contact {
            normal: plane.normal,
            depth: (-d1.min(d2)).max(0.0),
            floor: plane.normal.y > 0.0,
        });
    }

    // nearest edge only; a segment touching an edge exactly has no usable normal
    tri.edges()
        .into_iter()
        .map(|(a, b)| closest_points_on_segments(capsule.start, capsule.end, a, b))
        .map(|(on_segment, on_edge)| (on_segment.distance_squared(on_edge), on_segment, on_edge))
        .filter(|(dist2, _, _)| *dist2 < r * r && *dist2 > 0.0)
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(dist2, on_segment, on_edge)| {
            let normal = (on_segment - on_edge).normalized();
            Contact {
                normal,
                depth: r - dist2.sqrt(),
                floor: normal.y > 0.0,
            }
        })
}
