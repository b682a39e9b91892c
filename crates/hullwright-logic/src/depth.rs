//! Depth bookkeeping for hull voxels.
//!
//! Every voxel the shape builder touches gets a depth: 1 for the outer
//! shell, 2..=31 for armor layers counted inward from a face. A coordinate
//! reached by several synthesis stages keeps the smallest depth, so the map
//! exposes two distinct writes and the callers never conflate them:
//!
//! - [`DepthMap::insert_if_absent`] — armor layers never displace an
//!   existing entry, whatever its value;
//! - [`DepthMap::insert_min`] — shell and bow-wall writes, which may make
//!   an existing entry shallower but never deeper.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use crate::voxel::Coord;

/// Deepest armor layer a blueprint color index can express.
pub const MAX_DEPTH: u8 = 31;

/// Mapping from voxel coordinate to shell/armor depth.
///
/// Built once by the shape builder and never mutated afterward; the
/// consolidator works on a [`VoxelsByDepth`] partition derived from it.
#[derive(Debug, Clone, Default)]
pub struct DepthMap {
    depths: HashMap<Coord, u8>,
}

impl DepthMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `depth` at `at` only if nothing is recorded there yet.
    pub fn insert_if_absent(&mut self, at: Coord, depth: u8) {
        self.depths.entry(at).or_insert(depth);
    }

    /// Record `depth` at `at`, keeping whichever of the old and new values
    /// is smaller.
    pub fn insert_min(&mut self, at: Coord, depth: u8) {
        self.depths
            .entry(at)
            .and_modify(|d| *d = (*d).min(depth))
            .or_insert(depth);
    }

    pub fn get(&self, at: Coord) -> Option<u8> {
        self.depths.get(&at).copied()
    }

    pub fn len(&self) -> usize {
        self.depths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.depths.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Coord, u8)> + '_ {
        self.depths.iter().map(|(&c, &d)| (c, d))
    }

    /// Split the map into per-depth working sets for consolidation.
    ///
    /// Entries with depths outside 1..=[`MAX_DEPTH`] have no color index
    /// and are dropped.
    pub fn partition(&self) -> VoxelsByDepth {
        let mut sets: BTreeMap<u8, BTreeSet<Coord>> = BTreeMap::new();
        for (&coord, &depth) in &self.depths {
            if (1..=MAX_DEPTH).contains(&depth) {
                sets.entry(depth).or_default().insert(coord);
            }
        }
        VoxelsByDepth { sets }
    }
}

/// Per-depth sets of voxels not yet covered by a beam.
///
/// The sets are ordered, and every scan over them iterates lexicographically
/// on (x, y, z) — that fixed order is what makes beam segmentation
/// reproducible from run to run.
#[derive(Debug, Clone, Default)]
pub struct VoxelsByDepth {
    sets: BTreeMap<u8, BTreeSet<Coord>>,
}

impl VoxelsByDepth {
    /// Depths that still have unconsolidated voxels, ascending.
    pub fn depths(&self) -> Vec<u8> {
        self.sets.keys().copied().collect()
    }

    pub fn set(&self, depth: u8) -> Option<&BTreeSet<Coord>> {
        self.sets.get(&depth)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, &BTreeSet<Coord>)> {
        self.sets.iter().map(|(&d, s)| (d, s))
    }

    pub fn total_voxels(&self) -> usize {
        self.sets.values().map(BTreeSet::len).sum()
    }

    /// Drop every voxel in `visited` from the given depth's set.
    pub fn remove_visited(&mut self, depth: u8, visited: &HashSet<Coord>) {
        if let Some(set) = self.sets.get_mut(&depth) {
            set.retain(|c| !visited.contains(c));
            if set.is_empty() {
                self.sets.remove(&depth);
            }
        }
    }
}
