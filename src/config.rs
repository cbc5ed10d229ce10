use std::path::Path;
use std::time::Duration;

use glowfield_field::{FeedConfig, FieldDims, WaveParams};
use glowfield_geom::Vec3;
use serde::{Deserialize, Serialize};

use crate::camera::CameraParams;
use crate::player::MovementParams;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("read error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Tunables for a run, read from `assets/glowfield.toml`. Every field is optional.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct GameConfig {
    #[serde(default)] pub physics: PhysicsConfig,
    #[serde(default)] pub avatar: AvatarConfig,
    #[serde(default)] pub placement: PlacementConfig,
    #[serde(default)] pub camera: CameraConfig,
    #[serde(default)] pub field: FieldConfig,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct PhysicsConfig {
    #[serde(default = "default_gravity")] pub gravity: f32,
    #[serde(default = "default_speed")] pub speed: f32,
    #[serde(default = "default_run_multiplier")] pub run_multiplier: f32,
    #[serde(default = "default_jump")] pub jump: f32,
    #[serde(default = "default_max_dt")] pub max_dt: f32,
    #[serde(default = "default_turn_rate")] pub turn_rate: f32,
    #[serde(default = "default_fine_turn_rate")] pub fine_turn_rate: f32,
}

fn default_gravity() -> f32 { 30.0 }
fn default_speed() -> f32 { 12.0 }
fn default_run_multiplier() -> f32 { 2.0 }
fn default_jump() -> f32 { 20.0 }
fn default_max_dt() -> f32 { 0.03 }
fn default_turn_rate() -> f32 { 0.07 }
fn default_fine_turn_rate() -> f32 { 0.03 }

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: default_gravity(),
            speed: default_speed(),
            run_multiplier: default_run_multiplier(),
            jump: default_jump(),
            max_dt: default_max_dt(),
            turn_rate: default_turn_rate(),
            fine_turn_rate: default_fine_turn_rate(),
        }
    }
}

impl PhysicsConfig {
    pub fn params(&self) -> MovementParams {
        MovementParams {
            gravity: self.gravity,
            speed: self.speed,
            run_multiplier: self.run_multiplier,
            jump: self.jump,
            max_dt: self.max_dt,
            turn_rate: self.turn_rate,
            fine_turn_rate: self.fine_turn_rate,
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct AvatarConfig {
    #[serde(default = "default_radius")] pub radius: f32,
    #[serde(default = "default_height")] pub height: f32,
}

fn default_radius() -> f32 { 0.26 }
fn default_height() -> f32 { 0.8 }

impl Default for AvatarConfig {
    fn default() -> Self {
        Self { radius: default_radius(), height: default_height() }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct PlacementConfig {
    #[serde(default = "default_max_range")] pub max_range: f32,
    #[serde(default = "default_capacity")] pub capacity: usize,
}

fn default_max_range() -> f32 { 10.0 }
fn default_capacity() -> usize { glowfield_blocks::DEFAULT_CAPACITY }

impl Default for PlacementConfig {
    fn default() -> Self {
        Self { max_range: default_max_range(), capacity: default_capacity() }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct CameraConfig {
    #[serde(default = "default_min_distance")] pub min_distance: f32,
    #[serde(default = "default_max_distance")] pub max_distance: f32,
    #[serde(default = "default_initial_distance")] pub initial_distance: f32,
    #[serde(default = "default_zoom_step")] pub zoom_step: f32,
    #[serde(default = "default_target_height_factor")] pub target_height_factor: f32,
    #[serde(default = "default_fade_start")] pub fade_start: f32,
    #[serde(default = "default_fade_end")] pub fade_end: f32,
}

fn default_min_distance() -> f32 { 1.0 }
fn default_max_distance() -> f32 { 30.0 }
fn default_initial_distance() -> f32 { 4.0 }
fn default_zoom_step() -> f32 { 0.01 }
fn default_target_height_factor() -> f32 { 1.8 }
fn default_fade_start() -> f32 { 1.0 }
fn default_fade_end() -> f32 { 2.0 }

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            min_distance: default_min_distance(),
            max_distance: default_max_distance(),
            initial_distance: default_initial_distance(),
            zoom_step: default_zoom_step(),
            target_height_factor: default_target_height_factor(),
            fade_start: default_fade_start(),
            fade_end: default_fade_end(),
        }
    }
}

impl CameraConfig {
    pub fn params(&self) -> CameraParams {
        CameraParams {
            min_distance: self.min_distance,
            max_distance: self.max_distance,
            zoom_step: self.zoom_step,
            target_height_factor: self.target_height_factor,
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct FieldConfig {
    #[serde(default = "default_enabled")] pub enabled: bool,
    #[serde(default = "default_start_delay_ms")] pub start_delay_ms: u64,
    #[serde(default = "default_timesteps")] pub timesteps: usize,
    #[serde(default = "default_size_x")] pub size_x: usize,
    #[serde(default = "default_size_y")] pub size_y: usize,
    #[serde(default = "default_size_z")] pub size_z: usize,
    #[serde(default = "default_particle_count")] pub particle_count: usize,
    #[serde(default = "default_slab")] pub slab: [f32; 3],
    #[serde(default = "default_seed")] pub seed: u64,
    /// Milliseconds each stored timestep stays on screen.
    #[serde(default = "default_frame_ms")] pub frame_ms: f64,
    #[serde(default = "default_amplitude")] pub amplitude: f32,
    #[serde(default = "default_wave_speed")] pub wave_speed: f32,
}

fn default_enabled() -> bool { true }
fn default_start_delay_ms() -> u64 { 5000 }
fn default_timesteps() -> usize { 500 }
fn default_size_x() -> usize { 100 }
fn default_size_y() -> usize { 2 }
fn default_size_z() -> usize { 100 }
fn default_particle_count() -> usize { 100_000 }
fn default_slab() -> [f32; 3] { [100.0, 2.0, 100.0] }
fn default_seed() -> u64 { 0x6c6f_7766 }
fn default_frame_ms() -> f64 { glowfield_field::data::FRAME_MS }
fn default_amplitude() -> f32 { 3.0 }
fn default_wave_speed() -> f32 { 2.0 }

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            start_delay_ms: default_start_delay_ms(),
            timesteps: default_timesteps(),
            size_x: default_size_x(),
            size_y: default_size_y(),
            size_z: default_size_z(),
            particle_count: default_particle_count(),
            slab: default_slab(),
            seed: default_seed(),
            frame_ms: default_frame_ms(),
            amplitude: default_amplitude(),
            wave_speed: default_wave_speed(),
        }
    }
}

impl FieldConfig {
    pub fn feed_config(&self) -> FeedConfig {
        FeedConfig {
            start_delay: Duration::from_millis(self.start_delay_ms),
            dims: FieldDims::new(self.timesteps, self.size_x, self.size_y, self.size_z),
            wave: WaveParams {
                amplitude: self.amplitude,
                speed: self.wave_speed,
                ..WaveParams::default()
            },
        }
    }

    pub fn slab_size(&self) -> Vec3 {
        Vec3::new(self.slab[0], self.slab[1], self.slab[2])
    }

    /// Field clock for `elapsed_ms` of wall time, rescaled to the field's native step length.
    pub fn field_time(&self, elapsed_ms: f64) -> f64 {
        if self.frame_ms > 0.0 {
            elapsed_ms * glowfield_field::data::FRAME_MS / self.frame_ms
        } else {
            0.0
        }
    }
}

impl GameConfig {
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let s = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&s)?)
    }

    /// Like [`GameConfig::load_from_path`], but a missing or broken file yields defaults.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load_from_path(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::warn!("config {}: {}; using defaults", path.display(), e);
                Self::default()
            }
        }
    }
}

/// Per-user preferences, persisted next to the binary and hot-reloaded when edited.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Settings {
    /// A/D strafe instead of turning.
    #[serde(default)] pub strafe_mode: bool,
    #[serde(default = "default_pointer_sensitivity")] pub pointer_sensitivity: f32,
    #[serde(default = "default_far_clip")] pub far_clip: f32,
}

fn default_pointer_sensitivity() -> f32 { 0.002 }
fn default_far_clip() -> f32 { 300.0 }

impl Default for Settings {
    fn default() -> Self {
        Self {
            strafe_mode: false,
            pointer_sensitivity: default_pointer_sensitivity(),
            far_clip: default_far_clip(),
        }
    }
}

impl Settings {
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let s = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&s)?)
    }

    pub fn load_or_default(path: &Path) -> Self {
        match Self::load_from_path(path) {
            Ok(s) => s,
            Err(ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("no settings at {}; using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                log::warn!("settings {}: {}; using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn save_to_path(&self, path: &Path) -> Result<(), ConfigError> {
        let s = toml::to_string_pretty(self)?;
        std::fs::write(path, s)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let cfg: GameConfig = toml::from_str("").unwrap();
        assert_eq!(cfg, GameConfig::default());
        assert_eq!(cfg.physics.gravity, 30.0);
        assert_eq!(cfg.placement.max_range, 10.0);
        assert_eq!(cfg.camera.initial_distance, 4.0);
        assert_eq!(cfg.field.timesteps, 500);
    }

    #[test]
    fn bundled_config_matches_defaults() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/glowfield.toml");
        let cfg = GameConfig::load_from_path(&path).unwrap();
        assert_eq!(cfg.physics, PhysicsConfig::default());
        assert_eq!(cfg.camera, CameraConfig::default());
        assert_eq!(cfg.placement, PlacementConfig::default());
        assert_eq!(cfg.field.seed, 7);
        assert!(cfg.field.enabled);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg: GameConfig = toml::from_str(
            "[physics]\ngravity = 9.8\n\n[placement]\nmax_range = 8.0\n",
        )
        .unwrap();
        assert_eq!(cfg.physics.gravity, 9.8);
        assert_eq!(cfg.physics.jump, 20.0);
        assert_eq!(cfg.placement.max_range, 8.0);
        assert_eq!(cfg.placement.capacity, 100_000);
    }

    #[test]
    fn bad_toml_is_a_parse_error() {
        let dir = std::env::temp_dir().join(format!("glowfield-cfg-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("broken.toml");
        std::fs::write(&path, "[physics\ngravity = ").unwrap();
        assert!(matches!(
            GameConfig::load_from_path(&path),
            Err(ConfigError::Parse(_))
        ));
        assert_eq!(GameConfig::load_or_default(&path), GameConfig::default());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn settings_round_trip_through_disk() {
        let dir = std::env::temp_dir().join(format!("glowfield-settings-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("settings.toml");
        let s = Settings {
            strafe_mode: true,
            pointer_sensitivity: 0.004,
            far_clip: 150.0,
        };
        s.save_to_path(&path).unwrap();
        assert_eq!(Settings::load_from_path(&path).unwrap(), s);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_settings_fall_back() {
        let s = Settings::load_or_default(Path::new("/nonexistent/glowfield/settings.toml"));
        assert_eq!(s, Settings::default());
        assert!(!s.strafe_mode);
    }

    #[test]
    fn field_time_rescales_playback() {
        let mut f = FieldConfig::default();
        assert_eq!(f.field_time(1000.0), 1000.0);
        f.frame_ms = 100.0;
        assert_eq!(f.field_time(1000.0), 500.0);
        f.frame_ms = 0.0;
        assert_eq!(f.field_time(1000.0), 0.0);
    }
}
