use crate::Vec3;

/// Unit quaternion, used for orienting flat markers against a surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quat {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quat {
    pub const IDENTITY: Quat = Quat {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 1.0,
    };

    #[inline]
    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        let a = axis.normalized();
        let (s, c) = (angle * 0.5).sin_cos();
        Quat {
            x: a.x * s,
            y: a.y * s,
            z: a.z * s,
            w: c,
        }
    }

    /// Shortest rotation taking unit vector `from` onto unit vector `to`.
    pub fn from_rotation_arc(from: Vec3, to: Vec3) -> Self {
        let d = from.dot(to);
        if d < -1.0 + 1e-6 {
            // Opposite vectors: rotate half a turn about any perpendicular axis.
            let mut axis = Vec3::X.cross(from);
            if axis.length_squared() < 1e-6 {
                axis = Vec3::UP.cross(from);
            }
            return Quat::from_axis_angle(axis, core::f32::consts::PI);
        }
        let c = from.cross(to);
        Quat {
            x: c.x,
            y: c.y,
            z: c.z,
            w: 1.0 + d,
        }
        .normalized()
    }

    #[inline]
    pub fn normalized(self) -> Self {
        let len = (self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w).sqrt();
        if len > 0.0 {
            Quat {
                x: self.x / len,
                y: self.y / len,
                z: self.z / len,
                w: self.w / len,
            }
        } else {
            Self::IDENTITY
        }
    }

    /// Apply the rotation to `v`.
    pub fn rotate(&self, v: Vec3) -> Vec3 {
        let q = Vec3::new(self.x, self.y, self.z);
        let t = q.cross(v) * 2.0;
        v + t * self.w + q.cross(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn arc_maps_z_onto_target() {
        for n in [
            Vec3::UP,
            Vec3::X,
            Vec3::new(0.0, -1.0, 0.0),
            Vec3::new(-1.0, 0.0, 0.0),
            Vec3::Z,
            Vec3::new(0.0, 0.0, -1.0),
        ] {
            let q = Quat::from_rotation_arc(Vec3::Z, n);
            assert!(close(q.rotate(Vec3::Z), n), "target {n:?}");
        }
    }

    #[test]
    fn identity_leaves_vectors_alone() {
        let v = Vec3::new(1.0, -2.0, 3.0);
        assert!(close(Quat::IDENTITY.rotate(v), v));
    }
}
