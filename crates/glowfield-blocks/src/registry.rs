use glowfield_geom::{Aabb, Ray, Triangle, Vec3};
use glowfield_octree::{Octree, TaggedTriangle};
use glowfield_scene::{Scene, StaticSurface};
use hashbrown::{HashMap, HashSet};

use crate::{GridCoord, PlaceError, RemoveError, SurfaceId};

/// Instance slots available to placed blocks unless configured otherwise.
pub const DEFAULT_CAPACITY: usize = 100_000;

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryStats {
    pub blocks: usize,
    pub capacity: usize,
    pub free_slots: usize,
    pub static_surfaces: usize,
    pub indexed_triangles: usize,
    pub rebuilds: u64,
}

/// Geometry a reticle ray can land on.
#[derive(Clone, Copy, Debug)]
pub enum PlaceableShape<'a> {
    Mesh(&'a [Triangle]),
    Cube(Aabb),
}

#[derive(Clone, Copy, Debug)]
pub struct PlaceableSurface<'a> {
    pub id: SurfaceId,
    pub shape: PlaceableShape<'a>,
}

impl PlaceableSurface<'_> {
    /// Nearest hit distance along `ray` and the struck face's world normal.
    pub fn ray_hit(&self, ray: &Ray) -> Option<(f32, Vec3)> {
        match self.shape {
            PlaceableShape::Cube(bb) => bb.ray_intersect(ray),
            PlaceableShape::Mesh(tris) => tris
                .iter()
                .filter_map(|t| t.ray_intersect(ray).map(|d| (d, t.normal())))
                .min_by(|a, b| a.0.total_cmp(&b.0)),
        }
    }
}

/// Placed blocks plus the protected scene, with a collision index that always mirrors both.
///
/// Every successful `place`/`remove` rebuilds the index from scratch; a rejected call
/// touches nothing.
pub struct BlockRegistry {
    statics: Vec<StaticSurface>,
    by_coord: HashMap<GridCoord, u32>,
    // slot -> occupant, in slot order so rebuilds are deterministic
    slots: Vec<Option<GridCoord>>,
    free: Vec<u32>,
    capacity: usize,
    index: Octree<SurfaceId>,
    rebuilds: u64,
}

impl BlockRegistry {
    pub fn new(scene: Scene, capacity: usize) -> Self {
        let mut reg = Self {
            statics: scene.surfaces,
            by_coord: HashMap::new(),
            slots: Vec::new(),
            free: Vec::new(),
            capacity,
            index: Octree::new(),
            rebuilds: 0,
        };
        reg.rebuild_index();
        reg
    }

    pub fn with_default_capacity(scene: Scene) -> Self {
        Self::new(scene, DEFAULT_CAPACITY)
    }

    fn static_triangles(&self) -> impl Iterator<Item = TaggedTriangle<SurfaceId>> + '_ {
        self.statics.iter().enumerate().flat_map(|(i, s)| {
            s.triangles
                .iter()
                .map(move |t| TaggedTriangle::new(*t, SurfaceId::Static(i as u32)))
        })
    }

    fn block_triangles(&self) -> impl Iterator<Item = TaggedTriangle<SurfaceId>> + '_ {
        self.slots.iter().flatten().flat_map(|&c| {
            c.aabb()
                .triangles()
                .into_iter()
                .map(move |t| TaggedTriangle::new(t, SurfaceId::Block(c)))
        })
    }

    fn rebuild_index(&mut self) {
        let mut index = core::mem::take(&mut self.index);
        index.rebuild(self.static_triangles(), self.block_triangles());
        self.index = index;
        self.rebuilds += 1;
    }

    /// Occupy `coord` with a block. Rejects occupied cells and a full pool.
    pub fn place(&mut self, coord: GridCoord) -> Result<GridCoord, PlaceError> {
        if self.by_coord.contains_key(&coord) {
            return Err(PlaceError::AlreadyOccupied(coord));
        }
        let slot = if let Some(s) = self.free.pop() {
            s
        } else if self.slots.len() < self.capacity {
            self.slots.push(None);
            (self.slots.len() - 1) as u32
        } else {
            return Err(PlaceError::PoolExhausted {
                capacity: self.capacity,
            });
        };
        self.slots[slot as usize] = Some(coord);
        self.by_coord.insert(coord, slot);
        self.rebuild_index();
        log::debug!("placed block {coord} in slot {slot}");
        Ok(coord)
    }

    /// Remove the block behind `id`. Static geometry is never removable.
    pub fn remove(&mut self, id: SurfaceId) -> Result<(), RemoveError> {
        let coord = match id {
            SurfaceId::Static(_) => return Err(RemoveError::ProtectedGeometry(id)),
            SurfaceId::Block(c) => c,
        };
        let Some(slot) = self.by_coord.remove(&coord) else {
            return Err(RemoveError::NotFound(id));
        };
        self.slots[slot as usize] = None;
        self.free.push(slot);
        self.rebuild_index();
        log::debug!("removed block {coord} from slot {slot}");
        Ok(())
    }

    #[inline]
    pub fn remove_at(&mut self, coord: GridCoord) -> Result<(), RemoveError> {
        self.remove(SurfaceId::Block(coord))
    }

    /// Drop every placed block and release all slots.
    pub fn clear_blocks(&mut self) {
        if self.by_coord.is_empty() {
            return;
        }
        self.by_coord.clear();
        self.slots.clear();
        self.free.clear();
        self.rebuild_index();
    }

    #[inline]
    pub fn contains(&self, coord: GridCoord) -> bool {
        self.by_coord.contains_key(&coord)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.by_coord.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.by_coord.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn slot_of(&self, coord: GridCoord) -> Option<u32> {
        self.by_coord.get(&coord).copied()
    }

    /// Placed blocks with their instance slot, in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (GridCoord, u32)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.map(|c| (c, i as u32)))
    }

    pub fn statics(&self) -> &[StaticSurface] {
        &self.statics
    }

    pub fn static_surface(&self, id: SurfaceId) -> Option<&StaticSurface> {
        match id {
            SurfaceId::Static(i) => self.statics.get(i as usize),
            SurfaceId::Block(_) => None,
        }
    }

    /// Every surface the registry owns: one id per static primitive and per block.
    pub fn surface_ids(&self) -> HashSet<SurfaceId> {
        let statics = (0..self.statics.len() as u32).map(SurfaceId::Static);
        let blocks = self.by_coord.keys().copied().map(SurfaceId::Block);
        statics.chain(blocks).collect()
    }

    /// Surfaces the reticle may target: placeable statics (the ground) and every block.
    pub fn placeable_surfaces(&self) -> Vec<PlaceableSurface<'_>> {
        let statics = self
            .statics
            .iter()
            .enumerate()
            .filter(|(_, s)| s.placeable)
            .map(|(i, s)| PlaceableSurface {
                id: SurfaceId::Static(i as u32),
                shape: PlaceableShape::Mesh(&s.triangles),
            });
        let blocks = self.iter().map(|(c, _)| PlaceableSurface {
            id: SurfaceId::Block(c),
            shape: PlaceableShape::Cube(c.aabb()),
        });
        statics.chain(blocks).collect()
    }

    #[inline]
    pub fn index(&self) -> &Octree<SurfaceId> {
        &self.index
    }

    pub fn stats(&self) -> RegistryStats {
        RegistryStats {
            blocks: self.by_coord.len(),
            capacity: self.capacity,
            free_slots: self.capacity - self.by_coord.len(),
            static_surfaces: self.statics.len(),
            indexed_triangles: self.index.triangle_count(),
            rebuilds: self.rebuilds,
        }
    }
}
