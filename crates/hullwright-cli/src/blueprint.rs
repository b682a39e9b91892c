//! Donor-based blueprint container.
//!
//! The vehicle blueprint format is JSON with a lot of metadata the
//! generator does not understand (author tag, game version, vehicle
//! settings). Rather than modeling the whole format, the container keeps
//! the donor document as a `serde_json::Value`, strips the parts that
//! describe the donor's own blocks, and splices in the generated block
//! lists on save. Everything else passes through untouched.

use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde_json::{json, Value};

use hullwright_logic::catalog::BlockId;
use hullwright_logic::sink::BlueprintSink;
use hullwright_logic::voxel::Coord;

/// Item dictionary entries for every block kind the generator can place:
/// the single alloy block, the 2/3/4 beams, and the inverted, triangle and
/// slope families by slope variant.
const ITEM_GUIDS: &[(BlockId, &str)] = &[
    (100_000, "3cc75979-18ac-46c4-9a5b-25b327d99410"),
    (100_001, "8f9dbf41-6c2d-4e7b-855d-b2432c6942a2"),
    (100_002, "649f2aec-6f59-4157-ac01-0122ce2e6dad"),
    (100_003, "9411e401-27da-4546-b805-3334f200f055"),
    (100_011, "95a626e6-f1b8-491a-aa31-8de5a2beb513"),
    (100_012, "51b37dbf-2beb-425b-a817-89434838c857"),
    (100_013, "8c2aaf82-442e-46a7-9ea5-1b7862cacb87"),
    (100_014, "ba5c8d03-9093-47a9-a8cd-b721ceeee1dd"),
    (100_021, "a4b0d100-c480-4697-b606-489d80a6d376"),
    (100_022, "90c9965a-1dcc-4786-a2d2-6299fed7260f"),
    (100_023, "b2ca635d-350c-4977-b8d4-2b2dd28cd2d7"),
    (100_024, "a6cfd078-bc39-4ad8-a47f-49097913a27b"),
    (100_031, "911fe222-f9b2-4892-9cd6-8b154d55b2aa"),
    (100_032, "c6176cb5-0a32-4d68-a749-8ee33b2230c1"),
    (100_033, "a3ea61a8-018c-4277-afd9-ac0a34faa759"),
    (100_034, "2a3905ff-2030-421d-a2bf-90fba71c1c5e"),
];

/// A donor blueprint document plus the block lists being generated into it.
#[derive(Debug)]
pub struct JsonBlueprint {
    doc: Value,
    positions: Vec<String>,
    rotations: Vec<u8>,
    colors: Vec<u8>,
    block_ids: Vec<BlockId>,
}

impl JsonBlueprint {
    /// Load a donor blueprint file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("read donor blueprint {}", path.display()))?;
        let doc: Value = serde_json::from_str(&text)
            .with_context(|| format!("parse donor blueprint {}", path.display()))?;
        Ok(Self::from_value(doc))
    }

    fn from_value(doc: Value) -> Self {
        Self {
            doc,
            positions: Vec::new(),
            rotations: Vec::new(),
            colors: Vec::new(),
            block_ids: Vec::new(),
        }
    }

    /// Strip the donor's own block state and register the generator's block
    /// kinds in the item dictionary.
    pub fn prepare(&mut self) -> Result<()> {
        let root = self
            .doc
            .as_object_mut()
            .ok_or_else(|| anyhow!("donor blueprint is not a JSON object"))?;
        root.remove("SavedMaterialCost");

        let blueprint = root
            .get_mut("Blueprint")
            .and_then(Value::as_object_mut)
            .ok_or_else(|| anyhow!("donor blueprint has no Blueprint object"))?;
        blueprint.remove("VehicleData");
        blueprint.remove("CSI");
        blueprint.insert("ContainedMaterialCost".into(), json!(0.0));
        blueprint.insert("MinCords".into(), json!("0,0,0"));
        blueprint.insert("MaxCords".into(), json!("0,0,0"));

        let dictionary = root
            .entry("ItemDictionary")
            .or_insert_with(|| json!({}))
            .as_object_mut()
            .ok_or_else(|| anyhow!("donor ItemDictionary is not an object"))?;
        for (id, guid) in ITEM_GUIDS {
            dictionary.insert(id.to_string(), json!(guid));
        }
        Ok(())
    }

    /// Blocks placed so far.
    pub fn block_count(&self) -> usize {
        self.positions.len()
    }

    /// Splice the generated block lists into the document and serialize it.
    fn render(&mut self) -> Result<String> {
        let total = self.positions.len();
        let blueprint = self
            .doc
            .get_mut("Blueprint")
            .and_then(Value::as_object_mut)
            .ok_or_else(|| anyhow!("donor blueprint has no Blueprint object"))?;
        blueprint.insert("BLP".into(), json!(self.positions));
        blueprint.insert("BLR".into(), json!(self.rotations));
        blueprint.insert("BCI".into(), json!(self.colors));
        blueprint.insert("BlockIds".into(), json!(self.block_ids));
        blueprint.insert("TotalBlockCount".into(), json!(total));
        blueprint.insert("AliveCount".into(), json!(total));
        blueprint.insert("BlockState".into(), json!(format!("=0,{total}")));

        let root = self
            .doc
            .as_object_mut()
            .ok_or_else(|| anyhow!("donor blueprint is not a JSON object"))?;
        root.insert("SavedTotalBlockCount".into(), json!(total));

        serde_json::to_string(&self.doc).context("serialize blueprint")
    }

    /// Write the finished blueprint to `path`.
    pub fn save(&mut self, path: &Path) -> Result<()> {
        let text = self.render()?;
        fs::write(path, text).with_context(|| format!("write blueprint {}", path.display()))
    }
}

impl BlueprintSink for JsonBlueprint {
    fn place_block(&mut self, at: Coord, block: BlockId, rotation: u8, color: u8) {
        self.positions.push(format!("{},{},{}", at.x, at.y, at.z));
        self.rotations.push(rotation);
        self.colors.push(color);
        self.block_ids.push(block);
    }
}
