//! Beam consolidation — greedy run-length merging of hull voxels.
//!
//! For each depth independently, collinear runs of 2..=4 voxels become one
//! beam block: first a pass along +z, then a pass along +y over whatever
//! the first pass left behind, then singles for everything else. Scans
//! iterate each depth's set in lexicographic (x, y, z) order, so the beams
//! chosen are reproducible from run to run; the covered voxel set is
//! invariant whatever the order.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use crate::catalog::{BlockCatalog, ROT_FORWARD, ROT_UP};
use crate::depth::VoxelsByDepth;
use crate::sink::BlueprintSink;
use crate::voxel::{Coord, FORWARD, UP};

/// Longest run a single beam block can cover.
pub const MAX_BEAM_LENGTH: i32 = 4;

/// An axis-aligned run of same-depth voxels, pending emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Run {
    origin: Coord,
    length: i32,
}

/// Consolidation counters for one depth.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DepthReport {
    pub depth: u8,
    /// Voxels at this depth before consolidation.
    pub voxels: usize,
    /// Beams emitted by the z-axis pass.
    pub forward_beams: usize,
    /// Beams emitted by the y-axis pass.
    pub upward_beams: usize,
    /// Voxels left for single blocks.
    pub singles: usize,
    /// Times a voxel was marked visited twice — always a bug if nonzero.
    pub duplicate_visits: usize,
}

/// Counters for a whole consolidation run, one entry per populated depth.
#[derive(Debug, Clone, Default)]
pub struct ConsolidationReport {
    pub depths: Vec<DepthReport>,
}

impl ConsolidationReport {
    pub fn total_beams(&self) -> usize {
        self.depths
            .iter()
            .map(|d| d.forward_beams + d.upward_beams)
            .sum()
    }

    pub fn total_singles(&self) -> usize {
        self.depths.iter().map(|d| d.singles).sum()
    }

    pub fn duplicate_visits(&self) -> usize {
        self.depths.iter().map(|d| d.duplicate_visits).sum()
    }
}

/// Merges each depth's voxels into beams and singles.
pub struct BeamConsolidator<'a> {
    catalog: &'a BlockCatalog,
}

impl<'a> BeamConsolidator<'a> {
    pub fn new(catalog: &'a BlockCatalog) -> Self {
        Self { catalog }
    }

    /// Consume `voxels`, emitting beams and singles into `sink`.
    pub fn consolidate<S: BlueprintSink>(
        &self,
        mut voxels: VoxelsByDepth,
        sink: &mut S,
    ) -> ConsolidationReport {
        let mut reports: BTreeMap<u8, DepthReport> = BTreeMap::new();
        for (depth, set) in voxels.iter() {
            reports.insert(
                depth,
                DepthReport {
                    depth,
                    voxels: set.len(),
                    ..DepthReport::default()
                },
            );
        }

        self.consolidate_axis(&mut voxels, FORWARD, ROT_FORWARD, sink, &mut reports);
        self.consolidate_axis(&mut voxels, UP, ROT_UP, sink, &mut reports);

        for (depth, set) in voxels.iter() {
            for &v in set {
                sink.place_block(v, self.catalog.single(), ROT_FORWARD, depth - 1);
            }
            if let Some(report) = reports.get_mut(&depth) {
                report.singles = set.len();
            }
        }

        ConsolidationReport {
            depths: reports.into_values().collect(),
        }
    }

    /// One pass over every depth along a single axis. The mirror scan keeps
    /// port and starboard beams segmented alike: right after scanning a
    /// voxel, its reflection across x = 0 is scanned too, so symmetric
    /// geometry is consumed in symmetric order.
    fn consolidate_axis<S: BlueprintSink>(
        &self,
        voxels: &mut VoxelsByDepth,
        axis: Coord,
        rotation: u8,
        sink: &mut S,
        reports: &mut BTreeMap<u8, DepthReport>,
    ) {
        let mirror_scan = axis.x == 0;
        for depth in voxels.depths() {
            let Some(set) = voxels.set(depth) else { continue };
            let mut visited: HashSet<Coord> = HashSet::new();
            let mut beams = 0usize;
            let mut duplicates = 0usize;

            let order: Vec<Coord> = set.iter().copied().collect();
            for v in order {
                if let Some(d) = self.emit_run(v, depth, set, &mut visited, axis, rotation, sink) {
                    beams += 1;
                    duplicates += d;
                }
                if mirror_scan {
                    let mirror = v.mirror_x();
                    if set.contains(&mirror) {
                        if let Some(d) =
                            self.emit_run(mirror, depth, set, &mut visited, axis, rotation, sink)
                        {
                            beams += 1;
                            duplicates += d;
                        }
                    }
                }
            }

            log::debug!(
                "depth {depth}: turned {} voxels into {beams} beams along {axis:?}",
                visited.len()
            );

            if let Some(report) = reports.get_mut(&depth) {
                if axis == UP {
                    report.upward_beams += beams;
                } else {
                    report.forward_beams += beams;
                }
                report.duplicate_visits += duplicates;
            }
            voxels.remove_visited(depth, &visited);
        }
    }

    /// Scan from `v` and emit the run if one forms, marking it visited.
    /// Returns the number of duplicate visit marks, or `None` if no beam
    /// was emitted.
    fn emit_run<S: BlueprintSink>(
        &self,
        v: Coord,
        depth: u8,
        set: &BTreeSet<Coord>,
        visited: &mut HashSet<Coord>,
        axis: Coord,
        rotation: u8,
        sink: &mut S,
    ) -> Option<usize> {
        let run = scan_run(v, set, visited, axis)?;
        let block = self.catalog.beam(run.length as usize);
        sink.place_block(run.origin, block, rotation, depth - 1);

        let mut duplicates = 0;
        for i in 0..run.length {
            let covered = run.origin.offset(axis.scaled(i));
            if !visited.insert(covered) {
                log::warn!("depth {depth}: voxel {covered:?} consolidated twice");
                duplicates += 1;
            }
        }
        Some(duplicates)
    }
}

/// Greedy scan along `axis` from `origin`: extend forward up to 3 steps
/// over voxels present in `set` and not yet visited, then extend backward
/// with total length capped at [`MAX_BEAM_LENGTH`]. Returns `None` when
/// `origin` is already visited or no neighbor joins it — single voxels are
/// not beams.
fn scan_run(
    origin: Coord,
    set: &BTreeSet<Coord>,
    visited: &HashSet<Coord>,
    axis: Coord,
) -> Option<Run> {
    if visited.contains(&origin) {
        return None;
    }

    let mut forward = 0;
    let mut cursor = origin;
    while forward + 1 < MAX_BEAM_LENGTH {
        cursor = cursor.offset(axis);
        if set.contains(&cursor) && !visited.contains(&cursor) {
            forward += 1;
        } else {
            break;
        }
    }

    let mut backward = 0;
    cursor = origin;
    while backward + 1 < MAX_BEAM_LENGTH - forward {
        cursor = cursor.offset(axis.inverse());
        if set.contains(&cursor) && !visited.contains(&cursor) {
            backward += 1;
        } else {
            break;
        }
    }

    let length = 1 + forward + backward;
    if length < 2 {
        return None;
    }
    Some(Run {
        origin: origin.offset(axis.scaled(-backward)),
        length,
    })
}
