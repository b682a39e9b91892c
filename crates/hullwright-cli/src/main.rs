//! Hullwright — generates a simple boat hull blueprint, copying the author
//! tag and file envelope from a donor blueprint.
//!
//! Usage:
//!   hullwright <donor> <output> <width> <height> <length> <slope> \
//!              <side_armor> <deck_armor> <bottom_armor>

mod blueprint;

use std::env;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use hullwright_logic::catalog::BlockCatalog;
use hullwright_logic::consolidate::BeamConsolidator;
use hullwright_logic::hull_config::{validate_config, HullConfig};
use hullwright_logic::shape::HullShapeBuilder;

use crate::blueprint::JsonBlueprint;

#[derive(Debug)]
struct Args {
    donor: PathBuf,
    output: PathBuf,
    config: HullConfig,
}

fn parse_args() -> Result<Args> {
    let args: Vec<String> = env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        print_usage();
        std::process::exit(0);
    }
    if args.len() != 9 {
        print_usage();
        bail!("expected 9 arguments, got {}", args.len());
    }

    let int = |index: usize, name: &str| -> Result<i32> {
        args[index]
            .parse()
            .with_context(|| format!("{name} must be an integer, got {:?}", args[index]))
    };

    Ok(Args {
        donor: PathBuf::from(&args[0]),
        output: PathBuf::from(&args[1]),
        config: HullConfig {
            width: int(2, "width")?,
            height: int(3, "height")?,
            length: int(4, "length")?,
            slope: int(5, "slope")?,
            side_armor: int(6, "side_armor")?,
            deck_armor: int(7, "deck_armor")?,
            bottom_armor: int(8, "bottom_armor")?,
        },
    })
}

fn print_usage() {
    eprintln!(
        "\
Generates a simple boat hull, copying the author tag from a donor blueprint.

USAGE:
  hullwright <donor> <output> <width> <height> <length> <slope> <side_armor> <deck_armor> <bottom_armor>

ARGS:
  donor          Donor blueprint to copy the author tag from
  output         Output file name for the blueprint to produce
  width          Interior width of the main cuboid
  height         Interior height of the main cuboid
  length         Interior length of the main cuboid
  slope          Bow slope (1-4)
  side_armor     Additional side armor layers
  deck_armor     Additional deck armor layers
  bottom_armor   Additional bottom armor layers
"
    );
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = parse_args()?;
    let errors = validate_config(&args.config);
    if !errors.is_empty() {
        for error in &errors {
            log::error!("{error}");
        }
        bail!("invalid hull configuration ({} errors)", errors.len());
    }

    let mut blueprint = JsonBlueprint::load(&args.donor)?;
    blueprint.prepare()?;

    let catalog = BlockCatalog::default();
    let depths = HullShapeBuilder::new(&args.config, &catalog).build(&mut blueprint);
    log::info!("synthesized {} hull voxels", depths.len());

    let by_depth = depths.partition();
    for (depth, set) in by_depth.iter() {
        log::info!("depth {depth}: {} voxels", set.len());
    }

    let report = BeamConsolidator::new(&catalog).consolidate(by_depth, &mut blueprint);
    for entry in &report.depths {
        log::info!(
            "depth {}: {} voxels -> {} z-beams, {} y-beams, {} singles",
            entry.depth,
            entry.voxels,
            entry.forward_beams,
            entry.upward_beams,
            entry.singles
        );
    }
    if report.duplicate_visits() > 0 {
        log::warn!(
            "{} duplicate voxel visits during consolidation",
            report.duplicate_visits()
        );
    }

    blueprint.save(&args.output)?;
    log::info!(
        "wrote {} ({} blocks)",
        args.output.display(),
        blueprint.block_count()
    );
    Ok(())
}
