//! Placement sink — where generated blocks go.
//!
//! The logic crate never touches files. Both components push placements
//! through `BlueprintSink`; the CLI implements it over the donor blueprint
//! document, and `MemorySink` records placements for inspection in tests.

use crate::catalog::BlockId;
use crate::voxel::Coord;

/// Append-only target for generated blocks.
///
/// Placements are order-independent for geometry; order only affects the
/// block indices in the emitted file.
pub trait BlueprintSink {
    fn place_block(&mut self, at: Coord, block: BlockId, rotation: u8, color: u8);
}

/// One recorded placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub at: Coord,
    pub block: BlockId,
    pub rotation: u8,
    pub color: u8,
}

/// In-memory sink.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub placements: Vec<Placement>,
}

impl MemorySink {
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}

impl BlueprintSink for MemorySink {
    fn place_block(&mut self, at: Coord, block: BlockId, rotation: u8, color: u8) {
        self.placements.push(Placement {
            at,
            block,
            rotation,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_sink_records_in_order() {
        let mut sink = MemorySink::default();
        sink.place_block(Coord::new(0, 0, 0), 100_000, 0, 0);
        sink.place_block(Coord::new(1, 2, 3), 100_003, 10, 4);
        assert_eq!(sink.len(), 2);
        assert_eq!(sink.placements[1].at, Coord::new(1, 2, 3));
        assert_eq!(sink.placements[1].rotation, 10);
        assert_eq!(sink.placements[1].color, 4);
    }
}
