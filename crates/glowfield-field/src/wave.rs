use crate::{FeedError, FieldData, FieldDims};

/// Scalar wave equation on a periodic grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaveParams {
    /// Initial impulse placed at the grid centre in the first slice.
    pub amplitude: f32,
    pub speed: f32,
    pub dt: f32,
    pub dx: f32,
}

impl Default for WaveParams {
    fn default() -> Self {
        Self {
            amplitude: 3.0,
            speed: 2.0,
            dt: 0.1,
            dx: 1.0,
        }
    }
}

impl WaveParams {
    #[inline]
    pub fn coeff(&self) -> f32 {
        let k = self.speed * self.dt / self.dx;
        k * k
    }
}

/// Leapfrog integration of a point source at the centre cell.
///
/// Slice 1 starts at rest, so slice `t + 1` is derived from slices `t` and `t - 1`
/// for `t` in `1..T-1`. Neighbours wrap around each axis.
pub fn simulate(dims: FieldDims, params: &WaveParams) -> Result<FieldData, FeedError> {
    let mut field = FieldData::zeros(dims)?;
    let (nx, ny, nz) = (dims.x, dims.y, dims.z);
    field.set(0, nx / 2, ny / 2, nz / 2, params.amplitude);
    let coeff = params.coeff();
    let idx = |x: usize, y: usize, z: usize| (x * ny + y) * nz + z;
    let mut next = vec![0.0f32; dims.cells_per_slice()];
    for t in 1..dims.t.saturating_sub(1) {
        {
            let prev = field.slice(t - 1);
            let cur = field.slice(t);
            for x in 0..nx {
                let (xm, xp) = ((x + nx - 1) % nx, (x + 1) % nx);
                for y in 0..ny {
                    let (ym, yp) = ((y + ny - 1) % ny, (y + 1) % ny);
                    for z in 0..nz {
                        let (zm, zp) = ((z + nz - 1) % nz, (z + 1) % nz);
                        let c = cur[idx(x, y, z)];
                        let lap = cur[idx(xm, y, z)]
                            + cur[idx(xp, y, z)]
                            + cur[idx(x, ym, z)]
                            + cur[idx(x, yp, z)]
                            + cur[idx(x, y, zm)]
                            + cur[idx(x, y, zp)]
                            - 6.0 * c;
                        next[idx(x, y, z)] = 2.0 * c - prev[idx(x, y, z)] + coeff * lap;
                    }
                }
            }
        }
        field.slice_mut(t + 1).copy_from_slice(&next);
    }
    log::debug!(
        "wave field simulated: {}x{}x{}x{}",
        dims.t,
        dims.x,
        dims.y,
        dims.z
    );
    Ok(field)
}
