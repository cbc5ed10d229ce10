use glowfield_geom::Vec3;

use crate::FeedError;

/// Milliseconds each stored time slice is shown for.
pub const FRAME_MS: f64 = 50.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldDims {
    pub t: usize,
    pub x: usize,
    pub y: usize,
    pub z: usize,
}

impl FieldDims {
    pub const fn new(t: usize, x: usize, y: usize, z: usize) -> Self {
        Self { t, x, y, z }
    }

    #[inline]
    pub fn cells_per_slice(&self) -> usize {
        self.x * self.y * self.z
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.t * self.cells_per_slice()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Dense `[t][x][y][z]` magnitudes.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldData {
    dims: FieldDims,
    values: Vec<f32>,
}

impl FieldData {
    pub fn new(dims: FieldDims, values: Vec<f32>) -> Result<Self, FeedError> {
        if dims.is_empty() || values.len() != dims.len() {
            return Err(FeedError::InvalidDimensions {
                dims,
                len: values.len(),
            });
        }
        Ok(Self { dims, values })
    }

    pub fn zeros(dims: FieldDims) -> Result<Self, FeedError> {
        Self::new(dims, vec![0.0; dims.len()])
    }

    #[inline]
    pub fn dims(&self) -> FieldDims {
        self.dims
    }

    #[inline]
    pub fn index(&self, t: usize, x: usize, y: usize, z: usize) -> usize {
        let d = self.dims;
        ((t * d.x + x) * d.y + y) * d.z + z
    }

    #[inline]
    pub fn get(&self, t: usize, x: usize, y: usize, z: usize) -> f32 {
        self.values[self.index(t, x, y, z)]
    }

    #[inline]
    pub fn set(&mut self, t: usize, x: usize, y: usize, z: usize, v: f32) {
        let i = self.index(t, x, y, z);
        self.values[i] = v;
    }

    /// One time slice as a flat `[x][y][z]` slab.
    pub fn slice(&self, t: usize) -> &[f32] {
        let n = self.dims.cells_per_slice();
        &self.values[t * n..(t + 1) * n]
    }

    pub fn slice_mut(&mut self, t: usize) -> &mut [f32] {
        let n = self.dims.cells_per_slice();
        &mut self.values[t * n..(t + 1) * n]
    }

    /// Slice shown at `time_ms`, cycling through the stored steps.
    pub fn time_index(&self, time_ms: f64) -> usize {
        let step = (time_ms / FRAME_MS).floor();
        if !step.is_finite() || step < 0.0 {
            return 0;
        }
        (step as u64 % self.dims.t as u64) as usize
    }

    /// Value under world position `p` at `time_ms`; zero outside `[0, dim)` on any axis.
    pub fn sample(&self, time_ms: f64, p: Vec3) -> f32 {
        let cell = |v: f32, dim: usize| -> Option<usize> {
            let f = v.floor();
            (f >= 0.0 && (f as usize) < dim).then_some(f as usize)
        };
        let (Some(x), Some(y), Some(z)) = (
            cell(p.x, self.dims.x),
            cell(p.y, self.dims.y),
            cell(p.z, self.dims.z),
        ) else {
            return 0.0;
        };
        self.get(self.time_index(time_ms), x, y, z)
    }
}

/// Display size for a sampled magnitude: `max(0, -6 + 70 ln(1 + |v|))`.
#[inline]
pub fn particle_size(v: f32) -> f32 {
    (-6.0 + 70.0 * v.abs().ln_1p()).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp() -> FieldData {
        let dims = FieldDims::new(3, 2, 2, 2);
        let values = (0..dims.len()).map(|i| i as f32).collect();
        FieldData::new(dims, values).unwrap()
    }

    #[test]
    fn rejects_mismatched_lengths() {
        let dims = FieldDims::new(2, 2, 2, 2);
        assert!(matches!(
            FieldData::new(dims, vec![0.0; 5]),
            Err(FeedError::InvalidDimensions { len: 5, .. })
        ));
        assert!(FieldData::zeros(FieldDims::new(0, 4, 4, 4)).is_err());
    }

    #[test]
    fn time_index_cycles_every_fifty_ms() {
        let f = ramp();
        assert_eq!(f.time_index(0.0), 0);
        assert_eq!(f.time_index(49.9), 0);
        assert_eq!(f.time_index(50.0), 1);
        assert_eq!(f.time_index(149.0), 2);
        assert_eq!(f.time_index(150.0), 0);
        assert_eq!(f.time_index(-10.0), 0);
    }

    #[test]
    fn sample_floors_and_bounds() {
        let f = ramp();
        assert_eq!(f.sample(0.0, Vec3::new(1.7, 0.2, 1.9)), f.get(0, 1, 0, 1));
        assert_eq!(f.sample(60.0, Vec3::new(0.0, 1.0, 0.0)), f.get(1, 0, 1, 0));
        // x == dim is outside.
        assert_eq!(f.sample(0.0, Vec3::new(2.0, 0.0, 0.0)), 0.0);
        assert_eq!(f.sample(0.0, Vec3::new(-0.01, 0.0, 0.0)), 0.0);
        assert_eq!(f.sample(0.0, Vec3::new(0.5, 0.5, 5.0)), 0.0);
    }

    #[test]
    fn particle_size_curve() {
        assert_eq!(particle_size(0.0), 0.0);
        // Small magnitudes stay hidden until 70 ln(1+|v|) exceeds 6.
        assert_eq!(particle_size(0.05), 0.0);
        let big = particle_size(1.0);
        assert!((big - (-6.0 + 70.0 * 2f32.ln())).abs() < 1e-4);
        assert_eq!(particle_size(-1.0), big);
    }
}
