use std::f32::consts::TAU;
use std::fmt;

use glowfield_geom::Vec3;

/// Heading shown to the player: clockwise from +Z, unlike the internal yaw.
#[inline]
pub fn display_yaw(yaw: f32) -> f32 {
    (TAU - yaw).rem_euclid(TAU) % TAU
}

pub fn yaw_text(yaw: f32) -> String {
    let d = display_yaw(yaw);
    format!("{:.3} rad | {:.1}°", d, d.to_degrees())
}

pub fn position_text(p: Vec3) -> String {
    format!("x: {:.2}  y: {:.2}  z: {:.2}", p.x, p.y, p.z)
}

/// Horizontal scroll of the compass strip, in pixels, for a heading in degrees.
pub fn compass_offset(degrees: f32, width: f32) -> f32 {
    degrees * 0.47 * width / 360.0 - 8.0 * (0.0588 * width)
}

/// Frames-per-second readout refreshed on a fixed interval.
#[derive(Debug, Clone)]
pub struct FpsCounter {
    interval_ms: f64,
    frames: u32,
    accum_ms: f64,
    fps: f32,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new(500.0)
    }
}

impl FpsCounter {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            frames: 0,
            accum_ms: 0.0,
            fps: 0.0,
        }
    }

    /// Count a frame lasting `dt_ms`. Returns the new reading when it refreshes.
    pub fn frame(&mut self, dt_ms: f64) -> Option<f32> {
        self.frames += 1;
        self.accum_ms += dt_ms.max(0.0);
        if self.accum_ms < self.interval_ms {
            return None;
        }
        self.fps = (self.frames as f64 * 1000.0 / self.accum_ms) as f32;
        self.frames = 0;
        self.accum_ms = 0.0;
        Some(self.fps)
    }

    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }
}

/// Text overlay for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct HudSnapshot {
    pub name: String,
    pub yaw: String,
    pub position: String,
    pub fps: f32,
    pub compass_offset: f32,
    pub mode: String,
    pub field: String,
    pub edit: String,
    pub blocks: usize,
}

impl fmt::Display for HudSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} | {} | yaw {} | compass {:.1}px | {:.0} fps | blocks {} | field {} | edit {}",
            self.name,
            self.mode,
            self.position,
            self.yaw,
            self.compass_offset,
            self.fps,
            self.blocks,
            self.field,
            self.edit
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yaw_is_mirrored_for_display() {
        assert_eq!(display_yaw(0.0), 0.0);
        assert!((display_yaw(1.0) - (TAU - 1.0)).abs() < 1e-5);
        assert_eq!(yaw_text(0.0), "0.000 rad | 0.0°");
        assert_eq!(yaw_text(TAU - std::f32::consts::FRAC_PI_2), "1.571 rad | 90.0°");
    }

    #[test]
    fn position_uses_two_decimals() {
        assert_eq!(
            position_text(Vec3::new(1.0, 0.26, -3.456)),
            "x: 1.00  y: 0.26  z: -3.46"
        );
    }

    #[test]
    fn compass_strip_offset() {
        let w = 1000.0;
        assert!((compass_offset(0.0, w) + 470.4).abs() < 1e-3);
        assert!((compass_offset(360.0, w) - (470.0 - 470.4)).abs() < 1e-3);
    }

    #[test]
    fn fps_refreshes_every_half_second() {
        let mut c = FpsCounter::default();
        for _ in 0..31 {
            assert_eq!(c.frame(16.0), None);
        }
        let fps = c.frame(16.0).unwrap();
        assert!((fps - 62.5).abs() < 1e-3);
        assert_eq!(c.fps(), fps);
    }
}
