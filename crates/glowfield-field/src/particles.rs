use glowfield_geom::Vec3;

use crate::{FieldData, particle_size};

/// Size every particle starts with before field data arrives.
pub const BASE_SIZE: f32 = 0.5;

/// Point cloud whose per-point size follows the scalar field.
#[derive(Clone, Debug)]
pub struct EmParticles {
    pub positions: Vec<Vec3>,
    pub sizes: Vec<f32>,
}

impl EmParticles {
    /// `count` points uniformly inside the box `[0, slab)` from a fixed seed.
    pub fn seeded(count: usize, slab: Vec3, seed: u64) -> Self {
        let mut rng = fastrand::Rng::with_seed(seed);
        let positions = (0..count)
            .map(|_| {
                Vec3::new(
                    rng.f32() * slab.x,
                    rng.f32() * slab.y,
                    rng.f32() * slab.z,
                )
            })
            .collect();
        Self {
            positions,
            sizes: vec![BASE_SIZE; count],
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Resize every particle from the field slice shown at `time_ms`.
    pub fn update(&mut self, field: &FieldData, time_ms: f64) {
        for (p, s) in self.positions.iter().zip(self.sizes.iter_mut()) {
            *s = particle_size(field.sample(time_ms, *p));
        }
    }

    /// Number of particles currently drawn at non-zero size.
    pub fn visible(&self) -> usize {
        self.sizes.iter().filter(|s| **s > 0.0).count()
    }
}
