use glowfield_blocks::BlockRegistry;
use glowfield_scene::Scene;

use crate::avatar::Avatar;
use crate::camera::{CameraPose, CameraRig};
use crate::config::{GameConfig, Settings};
use crate::mode::ModeMachine;
use crate::player::Walker;
use crate::raycast::{EditError, EditOutcome, FaceMarker};

/// Result of the most recent place/remove attempt, for the HUD.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EditStatus {
    Idle,
    Done(EditOutcome),
    Rejected(EditError),
}

impl std::fmt::Display for EditStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EditStatus::Idle => write!(f, "-"),
            EditStatus::Done(EditOutcome::Placed { coord, .. }) => write!(f, "placed {coord}"),
            EditStatus::Done(EditOutcome::Removed { coord }) => write!(f, "removed {coord}"),
            EditStatus::Rejected(e) => write!(f, "rejected: {e}"),
        }
    }
}

pub struct GameState {
    pub tick: u64,
    pub elapsed_ms: f64,

    pub registry: BlockRegistry,

    // Player
    pub walker: Walker,
    pub avatar: Avatar,
    pub rig: CameraRig,
    pub pose: CameraPose,

    pub mode: ModeMachine,
    pub settings: Settings,

    // Placement
    pub max_range: f32,
    pub marker: Option<FaceMarker>,
    pub last_edit: EditStatus,
}

impl GameState {
    pub fn new(scene: Scene, config: &GameConfig, settings: Settings) -> Self {
        let registry = BlockRegistry::new(scene, config.placement.capacity);
        let walker = Walker::spawn(
            config.avatar.radius,
            config.avatar.height,
            config.physics.params(),
        );
        let mut rig = CameraRig::new(config.camera.initial_distance, config.camera.params());
        rig.far = settings.far_clip;
        let pose = rig.pose(walker.pos, walker.height, walker.yaw, walker.pitch);
        let mut avatar = Avatar::new(config.camera.fade_start, config.camera.fade_end);
        avatar.update_fade(rig.distance);
        Self {
            tick: 0,
            elapsed_ms: 0.0,
            registry,
            walker,
            avatar,
            rig,
            pose,
            mode: ModeMachine::new(),
            settings,
            max_range: config.placement.max_range,
            marker: None,
            last_edit: EditStatus::Idle,
        }
    }

    /// Camera pose for the walker's current position and orientation.
    pub fn camera_pose(&self) -> CameraPose {
        let w = &self.walker;
        self.rig.pose(w.pos, w.height, w.yaw, w.pitch)
    }
}
