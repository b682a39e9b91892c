//! Integration tests for the full hull generation pipeline.
//!
//! Exercises: HullConfig → HullShapeBuilder → DepthMap partition →
//! BeamConsolidator → MemorySink, and checks the geometric invariants the
//! generator promises: exact coverage, beam length bounds, port/starboard
//! symmetry, and reproducibility.

use std::collections::{BTreeMap, BTreeSet};

use hullwright_logic::catalog::{BlockCatalog, ROT_PORT, ROT_STARBOARD, ROT_UP};
use hullwright_logic::consolidate::{BeamConsolidator, ConsolidationReport};
use hullwright_logic::depth::DepthMap;
use hullwright_logic::hull_config::{validate_config, HullConfig};
use hullwright_logic::shape::HullShapeBuilder;
use hullwright_logic::sink::MemorySink;
use hullwright_logic::voxel::{Coord, FORWARD, UP};

// ── Helpers ────────────────────────────────────────────────────────────

fn plain_config() -> HullConfig {
    HullConfig {
        width: 3,
        height: 2,
        length: 4,
        slope: 2,
        side_armor: 0,
        deck_armor: 0,
        bottom_armor: 0,
    }
}

fn armored_config() -> HullConfig {
    HullConfig {
        width: 6,
        height: 4,
        length: 9,
        slope: 3,
        side_armor: 2,
        deck_armor: 1,
        bottom_armor: 1,
    }
}

/// Run the full pipeline and return all intermediate outputs.
fn run_pipeline(config: &HullConfig) -> (DepthMap, MemorySink, ConsolidationReport) {
    let catalog = BlockCatalog::default();
    let mut sink = MemorySink::default();
    let depths = HullShapeBuilder::new(config, &catalog).build(&mut sink);
    let report = BeamConsolidator::new(&catalog).consolidate(depths.partition(), &mut sink);
    (depths, sink, report)
}

/// Expand every beam and single block in the sink back into the voxels it
/// covers, grouped by color index. Panics if any voxel is covered twice.
/// Bow face blocks are not voxels and are skipped.
fn coverage_by_color(sink: &MemorySink, catalog: &BlockCatalog) -> BTreeMap<u8, BTreeSet<Coord>> {
    let mut by_color: BTreeMap<u8, BTreeSet<Coord>> = BTreeMap::new();
    for p in &sink.placements {
        if let Some(length) = catalog.beam_length(p.block) {
            let axis = if p.rotation == ROT_UP { UP } else { FORWARD };
            for i in 0..length as i32 {
                let covered = p.at.offset(axis.scaled(i));
                assert!(
                    by_color.entry(p.color).or_default().insert(covered),
                    "voxel {covered:?} covered twice"
                );
            }
        } else if p.block == catalog.single() {
            assert!(
                by_color.entry(p.color).or_default().insert(p.at),
                "voxel {:?} covered twice",
                p.at
            );
        }
    }
    by_color
}

// ── Coverage ───────────────────────────────────────────────────────────

#[test]
fn consolidation_covers_every_voxel_exactly_once() {
    let catalog = BlockCatalog::default();
    for config in [plain_config(), armored_config()] {
        let (depths, sink, _) = run_pipeline(&config);
        let covered = coverage_by_color(&sink, &catalog);

        for (depth, expected) in depths.partition().iter() {
            let got = covered
                .get(&(depth - 1))
                .unwrap_or_else(|| panic!("depth {depth} has no placements"));
            assert_eq!(got, expected, "coverage mismatch at depth {depth}");
        }
        let placed: usize = covered.values().map(BTreeSet::len).sum();
        assert_eq!(placed, depths.partition().total_voxels());
    }
}

#[test]
fn reports_match_the_depth_map() {
    let (depths, _, report) = run_pipeline(&armored_config());
    let by_depth = depths.partition();

    for entry in &report.depths {
        let expected = by_depth.set(entry.depth).map_or(0, BTreeSet::len);
        assert_eq!(entry.voxels, expected, "report miscounts depth {}", entry.depth);
        let beams = entry.forward_beams + entry.upward_beams;
        let in_beams = entry.voxels - entry.singles;
        if beams == 0 {
            assert_eq!(in_beams, 0, "depth {}: voxels covered without beams", entry.depth);
        } else {
            assert!(
                2 * beams <= in_beams && in_beams <= 4 * beams,
                "depth {}: {beams} beams cannot cover {in_beams} voxels",
                entry.depth
            );
        }
        assert_eq!(entry.duplicate_visits, 0);
    }
    assert_eq!(report.depths.len(), by_depth.depths().len());
}

// ── Shape invariants ───────────────────────────────────────────────────

#[test]
fn plain_hull_is_shell_only() {
    let (depths, _, _) = run_pipeline(&plain_config());
    assert!(!depths.is_empty());
    assert!(depths.iter().all(|(_, d)| d == 1));
}

#[test]
fn armored_hull_has_layers_up_to_thickest_armor() {
    let (depths, _, _) = run_pipeline(&armored_config());
    let max_depth = depths.iter().map(|(_, d)| d).max().unwrap();
    // side_armor = 2 is the thickest: shell + two layers.
    assert_eq!(max_depth, 3);
}

#[test]
fn voxel_coverage_is_symmetric_across_x() {
    let catalog = BlockCatalog::default();
    let (_, sink, _) = run_pipeline(&armored_config());
    for (color, set) in coverage_by_color(&sink, &catalog) {
        for coord in &set {
            assert!(
                set.contains(&coord.mirror_x()),
                "color {color}: {coord:?} has no mirror"
            );
        }
    }
}

#[test]
fn bow_faces_use_port_and_starboard_rotations() {
    let (_, sink, _) = run_pipeline(&plain_config());
    let port = sink.placements.iter().filter(|p| p.rotation == ROT_PORT).count();
    let starboard = sink
        .placements
        .iter()
        .filter(|p| p.rotation == ROT_STARBOARD)
        .count();
    assert!(port > 0);
    assert!(starboard > 0);
    assert!(sink
        .placements
        .iter()
        .filter(|p| p.rotation == ROT_PORT || p.rotation == ROT_STARBOARD)
        .all(|p| p.color == 0));
}

// ── Reproducibility ────────────────────────────────────────────────────

#[test]
fn pipeline_is_deterministic() {
    let (depths1, sink1, _) = run_pipeline(&armored_config());
    let (depths2, sink2, _) = run_pipeline(&armored_config());

    assert_eq!(depths1.len(), depths2.len());
    for (coord, depth) in depths1.iter() {
        assert_eq!(depths2.get(coord), Some(depth));
    }
    assert_eq!(sink1.placements, sink2.placements);
}

#[test]
fn reconsolidating_a_fresh_partition_reproduces_coverage() {
    let catalog = BlockCatalog::default();
    let mut face_sink = MemorySink::default();
    let depths = HullShapeBuilder::new(&armored_config(), &catalog).build(&mut face_sink);

    let mut sink1 = MemorySink::default();
    BeamConsolidator::new(&catalog).consolidate(depths.partition(), &mut sink1);
    let mut sink2 = MemorySink::default();
    BeamConsolidator::new(&catalog).consolidate(depths.partition(), &mut sink2);

    assert_eq!(
        coverage_by_color(&sink1, &catalog),
        coverage_by_color(&sink2, &catalog)
    );
}

// ── Configuration ──────────────────────────────────────────────────────

#[test]
fn pipeline_configs_are_valid() {
    assert!(validate_config(&plain_config()).is_empty());
    assert!(validate_config(&armored_config()).is_empty());
}
