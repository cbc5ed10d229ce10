//! Triangle octree used for capsule collision and ray picking.
#![forbid(unsafe_code)]

mod collide;

pub use collide::{CONTACT_SLOP, triangle_capsule_contact};

use core::hash::Hash;

use glowfield_geom::{Aabb, Capsule, Ray, Triangle, Vec3};
use hashbrown::HashSet;

/// A node holding more triangles than this splits, depth permitting.
pub const MAX_TRIANGLES_PER_LEAF: usize = 8;
pub const MAX_DEPTH: u8 = 16;
/// Padding added around the union of triangle bounds before the root is made cubic.
pub const ROOT_MARGIN: f32 = 0.01;

/// A triangle tagged with the surface that produced it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TaggedTriangle<T> {
    pub tri: Triangle,
    pub tag: T,
}

impl<T> TaggedTriangle<T> {
    #[inline]
    pub const fn new(tri: Triangle, tag: T) -> Self {
        Self { tri, tag }
    }
}

/// Net separation for a capsule: move it by `normal * depth` to clear the geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Contact {
    pub normal: Vec3,
    pub depth: f32,
    /// At least one resolved triangle pushed upward, even if the net correction is sideways.
    pub floor: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit<T> {
    pub t: f32,
    pub point: Vec3,
    /// Triangle normal facing back along the ray.
    pub normal: Vec3,
    pub tag: T,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OctreeStats {
    pub triangles: usize,
    pub nodes: usize,
    pub leaves: usize,
    pub max_depth: u8,
    /// Triangle references across all leaves; exceeds `triangles` when triangles straddle octants.
    pub references: usize,
}

struct Entry<T> {
    tri: Triangle,
    bounds: Aabb,
    tag: T,
}

struct Node {
    bounds: Aabb,
    depth: u8,
    tris: Vec<u32>,
    children: Vec<u32>,
}

/// Octree over tagged triangles, rebuilt wholesale on every change.
pub struct Octree<T> {
    entries: Vec<Entry<T>>,
    nodes: Vec<Node>,
}

impl<T> Default for Octree<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            nodes: Vec::new(),
        }
    }
}

impl<T: Copy + Eq + Hash> Octree<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_triangles<I>(tris: I) -> Self
    where
        I: IntoIterator<Item = TaggedTriangle<T>>,
    {
        let mut tree = Self::new();
        tree.rebuild(tris, core::iter::empty());
        tree
    }

    /// Discard all prior state and index `statics` followed by `dynamics`.
    pub fn rebuild<S, D>(&mut self, statics: S, dynamics: D)
    where
        S: IntoIterator<Item = TaggedTriangle<T>>,
        D: IntoIterator<Item = TaggedTriangle<T>>,
    {
        self.clear();
        for t in statics.into_iter().chain(dynamics) {
            // Degenerate triangles have no plane to collide against.
            if t.tri.normal() == Vec3::ZERO {
                continue;
            }
            self.entries.push(Entry {
                bounds: t.tri.bounds(),
                tri: t.tri,
                tag: t.tag,
            });
        }
        let Some(bounds) = Aabb::from_points(
            self.entries
                .iter()
                .flat_map(|e| [e.bounds.min, e.bounds.max]),
        ) else {
            return;
        };
        let root = cubic(bounds.expanded(ROOT_MARGIN));
        let all: Vec<u32> = (0..self.entries.len() as u32).collect();
        self.build_node(root, all, 0);
        log::trace!(
            "octree rebuilt: {} triangles, {} nodes",
            self.entries.len(),
            self.nodes.len()
        );
    }

    fn build_node(&mut self, bounds: Aabb, tris: Vec<u32>, depth: u8) -> u32 {
        let idx = self.nodes.len() as u32;
        self.nodes.push(Node {
            bounds,
            depth,
            tris: Vec::new(),
            children: Vec::new(),
        });
        if tris.len() > MAX_TRIANGLES_PER_LEAF && depth < MAX_DEPTH {
            let half = bounds.extents() * 0.5;
            let mut children = Vec::with_capacity(8);
            for octant in 0..8u32 {
                let offset = Vec3::new(
                    (octant & 1) as f32 * half.x,
                    ((octant >> 1) & 1) as f32 * half.y,
                    ((octant >> 2) & 1) as f32 * half.z,
                );
                let min = bounds.min + offset;
                let child = Aabb::new(min, min + half);
                let subset: Vec<u32> = tris
                    .iter()
                    .copied()
                    .filter(|&t| self.entries[t as usize].bounds.intersects(&child))
                    .collect();
                if !subset.is_empty() {
                    children.push(self.build_node(child, subset, depth + 1));
                }
            }
            self.nodes[idx as usize].children = children;
        } else {
            self.nodes[idx as usize].tris = tris;
        }
        idx
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.nodes.clear();
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Root box, if anything is indexed.
    pub fn bounds(&self) -> Option<Aabb> {
        self.nodes.first().map(|n| n.bounds)
    }

    /// Every distinct tag present in the index.
    pub fn surfaces(&self) -> HashSet<T> {
        self.entries.iter().map(|e| e.tag).collect()
    }

    pub fn stats(&self) -> OctreeStats {
        let mut s = OctreeStats {
            triangles: self.entries.len(),
            nodes: self.nodes.len(),
            ..OctreeStats::default()
        };
        for n in &self.nodes {
            if n.children.is_empty() {
                s.leaves += 1;
                s.references += n.tris.len();
            }
            s.max_depth = s.max_depth.max(n.depth);
        }
        s
    }

    /// Deduplicated indices of triangles stored in leaves overlapping `query`.
    fn candidates(&self, query: &Aabb) -> Vec<u32> {
        let mut out = Vec::new();
        if self.nodes.is_empty() {
            return out;
        }
        let mut stack = vec![0u32];
        while let Some(i) = stack.pop() {
            let node = &self.nodes[i as usize];
            if !node.bounds.intersects(query) {
                continue;
            }
            if node.children.is_empty() {
                out.extend(
                    node.tris
                        .iter()
                        .copied()
                        .filter(|&t| self.entries[t as usize].bounds.intersects(query)),
                );
            } else {
                stack.extend_from_slice(&node.children);
            }
        }
        out.sort_unstable();
        out.dedup();
        out
    }

    /// Resolve `capsule` against every nearby triangle in turn and report the net correction.
    ///
    /// Each contact moves a working copy of the capsule out of that triangle before the next
    /// is tested, so overlapping surfaces do not double-push. A resting touch yields the summed
    /// contact normal with zero depth.
    pub fn capsule_intersect(&self, capsule: &Capsule) -> Option<Contact> {
        let mut working = *capsule;
        let mut normal_sum = Vec3::ZERO;
        let mut hit = false;
        let mut floor = false;
        for i in self.candidates(&capsule.bounds()) {
            let entry = &self.entries[i as usize];
            if let Some(c) = triangle_capsule_contact(&entry.tri, &working) {
                hit = true;
                floor |= c.floor;
                normal_sum += c.normal;
                working.translate(c.normal * c.depth);
            }
        }
        if !hit {
            return None;
        }
        let correction = working.start - capsule.start;
        let depth = correction.length();
        if depth > 0.0 {
            Some(Contact {
                normal: correction / depth,
                depth,
                floor,
            })
        } else {
            Some(Contact {
                normal: normal_sum.normalized(),
                depth: 0.0,
                floor,
            })
        }
    }

    /// Nearest triangle hit along `ray` within `max_dist`.
    pub fn ray_intersect(&self, ray: &Ray, max_dist: f32) -> Option<RayHit<T>> {
        if self.nodes.is_empty() {
            return None;
        }
        let mut best: Option<(f32, u32)> = None;
        let mut stack = vec![0u32];
        while let Some(i) = stack.pop() {
            let node = &self.nodes[i as usize];
            let limit = best.map_or(max_dist, |(t, _)| t);
            match node.bounds.ray_intersect(ray) {
                Some((t, _)) if t <= limit => {}
                _ => continue,
            }
            if !node.children.is_empty() {
                stack.extend_from_slice(&node.children);
                continue;
            }
            for &ti in &node.tris {
                if let Some(t) = self.entries[ti as usize].tri.ray_intersect(ray) {
                    if t <= max_dist && best.is_none_or(|(bt, _)| t < bt) {
                        best = Some((t, ti));
                    }
                }
            }
        }
        best.map(|(t, ti)| {
            let e = &self.entries[ti as usize];
            let n = e.tri.normal();
            RayHit {
                t,
                point: ray.at(t),
                normal: if n.dot(ray.dir) > 0.0 { -n } else { n },
                tag: e.tag,
            }
        })
    }
}

fn cubic(b: Aabb) -> Aabb {
    let half = b.extents().max_element() * 0.5;
    Aabb::from_center_half_extents(b.center(), Vec3::splat(half))
}
