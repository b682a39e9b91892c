//! Hull shape synthesis.
//!
//! Builds the depth map for a boxy hull: a main cuboid with shell walls and
//! optional armor layers, a stepped bow that narrows one column per side
//! every `slope` z-steps, and a flat stern. Stage order matters — each
//! stage proposes depths and the map keeps the minimum, so the shell
//! (depth 1) always wins over armor computed by a later walk.
//!
//! The sloped bow faces (slope, triangle and inverted blocks) cannot be
//! expressed as depth-map voxels; they are placed straight into the sink
//! while the walls are generated.

use crate::catalog::{BlockCatalog, ROT_PORT, ROT_STARBOARD};
use crate::depth::DepthMap;
use crate::hull_config::HullConfig;
use crate::sink::BlueprintSink;
use crate::voxel::Coord;

/// Synthesizes one hull from a validated configuration.
pub struct HullShapeBuilder<'a> {
    config: &'a HullConfig,
    catalog: &'a BlockCatalog,
}

/// Bow floor footprint handed from the skeleton stage to the wall stage:
/// the tip cross-section of the wedge and how far forward it reaches.
struct BowFootprint {
    w_min_start: i32,
    w_max_start: i32,
    front_cursor: i32,
}

impl<'a> HullShapeBuilder<'a> {
    pub fn new(config: &'a HullConfig, catalog: &'a BlockCatalog) -> Self {
        Self { config, catalog }
    }

    /// Synthesize the hull, returning its depth map.
    ///
    /// Bow face primitives go directly into `sink`; every other voxel is
    /// recorded in the map and placed later by the consolidator.
    pub fn build<S: BlueprintSink>(&self, sink: &mut S) -> DepthMap {
        let mut depths = DepthMap::new();
        self.build_cuboid(&mut depths);
        let bow = self.build_bow_floor(&mut depths);
        self.build_bow_walls(&mut depths, &bow, sink);
        self.build_stern(&mut depths);
        depths
    }

    /// Main cuboid: side walls with side armor, floor with bottom armor,
    /// top face with deck armor. Armor is written absent-only.
    fn build_cuboid(&self, depths: &mut DepthMap) {
        let c = self.config;
        let half = c.target_width() / 2;
        for z in 0..c.target_length() {
            for y in 0..c.target_height() {
                depths.insert_min(Coord::new(-half, y, z), 1);
                depths.insert_min(Coord::new(half, y, z), 1);
                for dx in 0..c.side_armor {
                    depths.insert_if_absent(Coord::new(-half + dx + 1, y, z), (2 + dx) as u8);
                    depths.insert_if_absent(Coord::new(half - dx - 1, y, z), (2 + dx) as u8);
                }
            }
            for x in -half..=half {
                depths.insert_min(Coord::new(x, 0, z), 1);
                for dy in 0..c.bottom_armor {
                    depths.insert_if_absent(Coord::new(x, dy + 1, z), (2 + dy) as u8);
                }
                depths.insert_min(Coord::new(x, c.target_height() - 1, z), 1);
                for dy in 0..c.deck_armor {
                    depths.insert_if_absent(
                        Coord::new(x, c.target_height() - 2 - dy, z),
                        (2 + dy) as u8,
                    );
                }
            }
        }
    }

    /// Bow floor skeleton: starting just past the cuboid, narrow the
    /// cross-section by one column per side every `slope` z-steps until the
    /// edges meet or cross, filling each band's floor and bottom armor.
    fn build_bow_floor(&self, depths: &mut DepthMap) -> BowFootprint {
        let c = self.config;
        let half = c.target_width() / 2;
        let stride = c.slope.clamp(1, 4);
        let mut w_min = -half;
        let mut w_max = half;
        let mut z = c.target_length();

        while w_min <= w_max {
            for dz in 0..=stride {
                for x in w_min..=w_max {
                    depths.insert_min(Coord::new(x, 0, z - 1 + dz), 1);
                    for dy in 0..c.bottom_armor {
                        depths.insert_if_absent(Coord::new(x, dy + 1, z - 1 + dz), (2 + dy) as u8);
                    }
                }
            }
            z += stride;
            w_min += 1;
            w_max -= 1;
        }

        // Step back to the last band that actually existed.
        BowFootprint {
            w_min_start: w_min - 1,
            w_max_start: w_max + 1,
            front_cursor: z - stride,
        }
    }

    /// Bow walls: one layer per y, each mirroring the floor's narrowing
    /// pattern. Walks from the tip backward to the cuboid, placing face
    /// primitives outboard of the edge columns and recording the edge
    /// voxels themselves. Side armor here is min-merged: a layer computed
    /// from a wider band never deepens one computed from a narrower band.
    /// The top layer fills its whole band and records deck armor instead.
    fn build_bow_walls<S: BlueprintSink>(
        &self,
        depths: &mut DepthMap,
        bow: &BowFootprint,
        sink: &mut S,
    ) {
        let c = self.config;
        let half = c.target_width() / 2;
        let stride = c.slope.clamp(1, 4);
        let faces = self.catalog.bow_faces(c.slope);
        let top = c.target_height() - 1;
        let mut front_cursor = bow.front_cursor;

        for y in 0..=top {
            let mut w_min = bow.w_min_start;
            let mut w_max = bow.w_max_start;
            let mut z = front_cursor;

            // Leading faces at the tip of this layer.
            sink.place_block(Coord::new(w_min - 1, y, z + stride), faces.triangle, ROT_PORT, 0);
            sink.place_block(
                Coord::new(w_max + 1, y, z + stride),
                faces.triangle,
                ROT_STARBOARD,
                0,
            );
            sink.place_block(Coord::new(w_min, y, z + stride), faces.slope, ROT_PORT, 0);
            if w_min != w_max {
                sink.place_block(Coord::new(w_max, y, z + stride), faces.slope, ROT_PORT, 0);
            }

            while z >= c.target_length() {
                if w_min - 1 >= -half {
                    sink.place_block(Coord::new(w_min - 1, y, z), faces.inverted, ROT_PORT, 0);
                }
                if w_max + 1 <= half {
                    sink.place_block(Coord::new(w_max + 1, y, z), faces.inverted, ROT_STARBOARD, 0);
                }
                if w_min - 2 >= -half {
                    sink.place_block(Coord::new(w_min - 2, y, z), faces.triangle, ROT_PORT, 0);
                }
                if w_max + 2 <= half {
                    sink.place_block(Coord::new(w_max + 2, y, z), faces.triangle, ROT_STARBOARD, 0);
                }

                for dz in 0..=stride {
                    if y == top {
                        for x in w_min..=w_max {
                            depths.insert_min(Coord::new(x, y, z - 1 + dz), 1);
                            if x > w_min + 1 && x < w_max - 1 {
                                for dy in 0..c.deck_armor {
                                    depths.insert_if_absent(
                                        Coord::new(x, y - 1 - dy, z - 1 + dz),
                                        (2 + dy) as u8,
                                    );
                                }
                            }
                        }
                    } else {
                        depths.insert_min(Coord::new(w_min, y, z - 1 + dz), 1);
                        depths.insert_min(Coord::new(w_max, y, z - 1 + dz), 1);
                        let layers = c.side_armor.min((w_max - w_min) / 2);
                        for dx in 0..layers {
                            depths.insert_min(Coord::new(w_min + dx + 1, y, z - 1 + dz), (2 + dx) as u8);
                            depths.insert_min(Coord::new(w_max - dx - 1, y, z - 1 + dz), (2 + dx) as u8);
                        }
                    }
                }

                w_min = (w_min - 1).max(-half);
                w_max = (w_max + 1).min(half);
                z -= stride;
            }

            // Each wall layer starts one band further forward than the last;
            // the top layer is the final one, so its cursor never advances.
            if y < top {
                front_cursor += stride;
            }
        }
    }

    /// Stern: the full cross-section at z = 0, with side armor extending
    /// forward into the hull.
    fn build_stern(&self, depths: &mut DepthMap) {
        let c = self.config;
        let half = c.target_width() / 2;
        for x in -half..=half {
            for y in 0..c.target_height() {
                depths.insert_min(Coord::new(x, y, 0), 1);
                for dz in 0..c.side_armor {
                    depths.insert_if_absent(Coord::new(x, y, 1 + dz), (2 + dz) as u8);
                }
            }
        }
    }
}
