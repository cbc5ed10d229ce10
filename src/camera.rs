use glowfield_geom::{Ray, Vec3};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraParams {
    pub min_distance: f32,
    pub max_distance: f32,
    /// Distance change per unit of scroll.
    pub zoom_step: f32,
    /// Look-at height above the feet, in avatar heights.
    pub target_height_factor: f32,
}

impl Default for CameraParams {
    fn default() -> Self {
        Self {
            min_distance: 1.0,
            max_distance: 30.0,
            zoom_step: 0.01,
            target_height_factor: 1.8,
        }
    }
}

/// Derived view for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub eye: Vec3,
    pub target: Vec3,
    pub forward: Vec3,
    /// Far clipping distance for the renderer.
    pub far: f32,
}

impl CameraPose {
    /// Ray through the viewport centre.
    #[inline]
    pub fn reticle(&self) -> Ray {
        Ray::new(self.eye, self.forward)
    }
}

/// View direction; positive pitch looks down.
pub fn view_forward(yaw: f32, pitch: f32) -> Vec3 {
    let (sy, cy) = yaw.sin_cos();
    let (sp, cp) = pitch.sin_cos();
    Vec3::new(sy * cp, -sp, cy * cp)
}

/// Third-person orbit camera trailing the avatar.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraRig {
    pub distance: f32,
    pub far: f32,
    pub params: CameraParams,
}

pub const DEFAULT_FAR: f32 = 300.0;

impl CameraRig {
    pub fn new(distance: f32, params: CameraParams) -> Self {
        Self {
            distance: distance.clamp(params.min_distance, params.max_distance),
            far: DEFAULT_FAR,
            params,
        }
    }

    /// Apply one scroll event.
    pub fn zoom(&mut self, delta_y: f32) {
        if !delta_y.is_finite() {
            return;
        }
        self.distance = (self.distance + delta_y * self.params.zoom_step)
            .clamp(self.params.min_distance, self.params.max_distance);
    }

    pub fn pose(&self, feet: Vec3, height: f32, yaw: f32, pitch: f32) -> CameraPose {
        let target = feet + Vec3::UP * (height * self.params.target_height_factor);
        let forward = view_forward(yaw, pitch);
        CameraPose {
            eye: target - forward * self.distance,
            target,
            forward,
            far: self.far,
        }
    }
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new(4.0, CameraParams::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoom_clamps_both_ends() {
        let mut rig = CameraRig::default();
        assert_eq!(rig.distance, 4.0);
        rig.zoom(100.0);
        assert!((rig.distance - 5.0).abs() < 1e-5);
        rig.zoom(1e6);
        assert_eq!(rig.distance, 30.0);
        rig.zoom(-1e6);
        assert_eq!(rig.distance, 1.0);
        rig.zoom(f32::NAN);
        assert_eq!(rig.distance, 1.0);
    }

    #[test]
    fn level_camera_sits_behind_the_avatar() {
        let rig = CameraRig::default();
        let pose = rig.pose(Vec3::new(0.0, 0.26, 0.0), 0.8, 0.0, 0.0);
        assert!((pose.target.y - (0.26 + 1.44)).abs() < 1e-5);
        assert!((pose.eye.z + 4.0).abs() < 1e-5);
        assert!((pose.eye.y - pose.target.y).abs() < 1e-5);
        assert!((pose.forward - Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn looking_down_raises_the_eye() {
        let rig = CameraRig::default();
        let pose = rig.pose(Vec3::ZERO, 0.8, 1.0, 0.5);
        assert!(pose.forward.y < 0.0);
        assert!(pose.eye.y > pose.target.y);
        assert!((pose.eye.distance(pose.target) - 4.0).abs() < 1e-4);
        assert!((pose.forward.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn pose_carries_the_far_plane() {
        let mut rig = CameraRig::default();
        assert_eq!(rig.pose(Vec3::ZERO, 0.8, 0.0, 0.0).far, DEFAULT_FAR);
        rig.far = 120.0;
        assert_eq!(rig.pose(Vec3::ZERO, 0.8, 0.0, 0.0).far, 120.0);
    }

    #[test]
    fn reticle_starts_at_the_eye() {
        let rig = CameraRig::default();
        let pose = rig.pose(Vec3::new(3.0, 1.0, -2.0), 0.8, 2.0, 0.3);
        let ray = pose.reticle();
        assert_eq!(ray.origin, pose.eye);
        assert!((ray.dir - pose.forward).length() < 1e-5);
    }
}
