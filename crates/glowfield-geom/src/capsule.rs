use crate::{Aabb, Vec3};

/// Swept sphere between `start` and `end`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Capsule {
    pub start: Vec3,
    pub end: Vec3,
    pub radius: f32,
}

impl Capsule {
    #[inline]
    pub const fn new(start: Vec3, end: Vec3, radius: f32) -> Self {
        Self { start, end, radius }
    }

    /// Upright capsule whose lower endpoint sits at `feet`.
    #[inline]
    pub fn upright(feet: Vec3, height: f32, radius: f32) -> Self {
        Self::new(feet, feet + Vec3::UP * height, radius)
    }

    #[inline]
    pub fn translate(&mut self, v: Vec3) {
        self.start += v;
        self.end += v;
    }

    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.start + self.end) * 0.5
    }

    pub fn bounds(&self) -> Aabb {
        let r = Vec3::splat(self.radius);
        Aabb::new(
            self.start.min(self.end) - r,
            self.start.max(self.end) + r,
        )
    }
}

/// Closest points between segments `p1-q1` and `p2-q2`, returned in that order.
/// Degenerate (zero-length) segments are handled as points.
pub fn closest_points_on_segments(p1: Vec3, q1: Vec3, p2: Vec3, q2: Vec3) -> (Vec3, Vec3) {
    const EPS: f32 = 1e-10;
    let d1 = q1 - p1;
    let d2 = q2 - p2;
    let r = p1 - p2;
    let a = d1.dot(d1);
    let e = d2.dot(d2);
    let f = d2.dot(r);

    if a <= EPS && e <= EPS {
        return (p1, p2);
    }
    let (s, t);
    if a <= EPS {
        s = 0.0;
        t = (f / e).clamp(0.0, 1.0);
    } else {
        let c = d1.dot(r);
        if e <= EPS {
            t = 0.0;
            s = (-c / a).clamp(0.0, 1.0);
        } else {
            let b = d1.dot(d2);
            let denom = a * e - b * b;
            let mut s0 = if denom.abs() > EPS {
                ((b * f - c * e) / denom).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let mut t0 = (b * s0 + f) / e;
            if t0 < 0.0 {
                t0 = 0.0;
                s0 = (-c / a).clamp(0.0, 1.0);
            } else if t0 > 1.0 {
                t0 = 1.0;
                s0 = ((b - c) / a).clamp(0.0, 1.0);
            }
            s = s0;
            t = t0;
        }
    }
    (p1 + d1 * s, p2 + d2 * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crossing_segments_meet_at_intersection() {
        let (a, b) = closest_points_on_segments(
            Vec3::new(-1.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, -1.0, 0.5),
            Vec3::new(0.0, 1.0, 0.5),
        );
        assert!((a - Vec3::ZERO).length() < 1e-6);
        assert!((b - Vec3::new(0.0, 0.0, 0.5)).length() < 1e-6);
    }

    #[test]
    fn parallel_segments_pick_an_overlapping_pair() {
        let (a, b) = closest_points_on_segments(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 2.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(1.0, 3.0, 0.0),
        );
        assert!((a.distance(b) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn upright_capsule_bounds() {
        let c = Capsule::upright(Vec3::new(1.0, 0.5, -1.0), 0.8, 0.25);
        let bb = c.bounds();
        assert_eq!(bb.min, Vec3::new(0.75, 0.25, -1.25));
        assert!((bb.max - Vec3::new(1.25, 1.55, -0.75)).length() < 1e-5);
    }
}
