use glowfield_geom::Vec3;

use crate::{StaticSurface, SurfaceKind, shapes};

pub const RISE: f32 = 0.6;
pub const RUN: f32 = 1.0;
/// The top step is this many runs deep, forming a landing.
pub const PLATFORM_MULTIPLIER: f32 = 4.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    N,
    S,
    E,
    W,
}

impl Direction {
    /// Unit step on the ground plane. North is -Z.
    pub fn offset(self) -> (f32, f32) {
        match self {
            Direction::N => (0.0, -1.0),
            Direction::S => (0.0, 1.0),
            Direction::E => (1.0, 0.0),
            Direction::W => (-1.0, 0.0),
        }
    }
}

/// A straight flight of solid steps climbing away from `start`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stairs {
    pub start: Vec3,
    pub direction: Direction,
    pub count: u32,
    pub width: f32,
}

impl Stairs {
    pub fn steps(&self) -> Vec<StaticSurface> {
        let (dx, dz) = self.direction.offset();
        (0..self.count)
            .map(|i| {
                let last = i + 1 == self.count;
                let depth = if last { RUN * PLATFORM_MULTIPLIER } else { RUN };
                let along = RUN * i as f32 + if last { (depth - RUN) * 0.5 } else { 0.0 };
                let center = Vec3::new(
                    self.start.x + dx * along,
                    self.start.y + RISE * i as f32 + RISE * 0.5,
                    self.start.z + dz * along,
                );
                let size = match self.direction {
                    Direction::N | Direction::S => Vec3::new(self.width, RISE, depth),
                    Direction::E | Direction::W => Vec3::new(depth, RISE, self.width),
                };
                StaticSurface::new(
                    SurfaceKind::Step,
                    format!("step{i}"),
                    shapes::cuboid(center, size),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eastward_steps_climb_and_advance() {
        let s = Stairs {
            start: Vec3::new(-12.0, 0.0, 6.0),
            direction: Direction::E,
            count: 3,
            width: 3.0,
        };
        let steps = s.steps();
        let first = steps[0].bounds().unwrap();
        assert_eq!(first.min, Vec3::new(-12.5, 0.0, 4.5));
        assert!((first.max - Vec3::new(-11.5, 0.6, 7.5)).length() < 1e-5);
        let second = steps[1].bounds().unwrap();
        assert!((second.min.y - 0.6).abs() < 1e-5);
        assert!((second.min.x + 11.5).abs() < 1e-5);
    }

    #[test]
    fn last_step_is_a_deep_landing() {
        let s = Stairs {
            start: Vec3::ZERO,
            direction: Direction::N,
            count: 5,
            width: 2.0,
        };
        let steps = s.steps();
        let last = steps[4].bounds().unwrap();
        let e = last.extents();
        assert!((e.z - 4.0).abs() < 1e-5);
        assert!((e.x - 2.0).abs() < 1e-5);
        // The landing starts where a regular fifth step would.
        assert!((last.max.z + 3.5).abs() < 1e-5);
    }
}
