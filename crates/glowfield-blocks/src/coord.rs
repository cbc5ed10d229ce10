use core::fmt;

use glowfield_geom::{Aabb, Vec3};

/// Integer cell; the cube it names spans `[x, x+1) × [y, y+1) × [z, z+1)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridCoord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl GridCoord {
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Cell containing `p`.
    #[inline]
    pub fn from_world(p: Vec3) -> Self {
        let f = p.floor();
        Self::new(f.x as i32, f.y as i32, f.z as i32)
    }

    #[inline]
    pub fn center(self) -> Vec3 {
        Vec3::new(
            self.x as f32 + 0.5,
            self.y as f32 + 0.5,
            self.z as f32 + 0.5,
        )
    }

    #[inline]
    pub fn aabb(self) -> Aabb {
        Aabb::unit_cell(self.x, self.y, self.z)
    }
}

impl fmt::Display for GridCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{},{})", self.x, self.y, self.z)
    }
}

/// What produced an indexed triangle: a static scene primitive or a placed block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SurfaceId {
    Static(u32),
    Block(GridCoord),
}

impl SurfaceId {
    #[inline]
    pub fn is_static(self) -> bool {
        matches!(self, SurfaceId::Static(_))
    }

    #[inline]
    pub fn block(self) -> Option<GridCoord> {
        match self {
            SurfaceId::Block(c) => Some(c),
            SurfaceId::Static(_) => None,
        }
    }
}

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceId::Static(i) => write!(f, "static#{i}"),
            SurfaceId::Block(c) => write!(f, "block{c}"),
        }
    }
}
