use std::collections::HashMap;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use island_generator::export;
use island_generator::seed::hash_seed;
use island_generator::{Biome, Map, MapConfig};

#[derive(Parser, Debug)]
#[command(name = "island_generator")]
#[command(about = "Generate procedural island maps on a hex-cell dual mesh")]
struct Args {
    /// Map width in pixels
    #[arg(short = 'W', long, default_value = "512")]
    width: u32,

    /// Map height in pixels
    #[arg(short = 'H', long, default_value = "512")]
    height: u32,

    /// Point spread used to size the spatial index
    #[arg(short = 'p', long, default_value = "10.0")]
    point_spread: f64,

    /// Seed string; a random 20-character seed is used when omitted
    #[arg(short, long, default_value = "")]
    seed: String,

    /// Write a biome-colored PNG of the generated map
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let config = MapConfig {
        width: args.width,
        height: args.height,
        point_spread: args.point_spread,
        seed: args.seed,
    };

    let mut map = match Map::new(config) {
        Ok(map) => map,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };
    map.generate();

    println!("Seed: {} ({})", map.seed(), hash_seed(map.seed()));
    print_statistics(&map);

    if let Some(path) = args.output {
        if let Err(err) = export::export_png(&map, &path) {
            eprintln!("error: failed to write {}: {err}", path.display());
            return ExitCode::FAILURE;
        }
        println!("Wrote {}", path.display());
    }

    ExitCode::SUCCESS
}

fn print_statistics(map: &Map) {
    let centers = map.centers();
    let ocean = centers.iter().filter(|c| c.ocean).count();
    let lake = centers.iter().filter(|c| c.water && !c.ocean).count();
    let coast = centers.iter().filter(|c| c.coast).count();
    let land = centers.len() - ocean - lake;
    let river_edges = map.edges().iter().filter(|e| e.river_volume > 0.0).count();

    println!(
        "Mesh: {} cells, {} corners, {} edges",
        centers.len(),
        map.corners().len(),
        map.edges().len()
    );
    println!(
        "Cells: {land} land ({coast} coast), {ocean} ocean, {lake} lake; {river_edges} river edges"
    );

    let mut histogram: HashMap<Biome, usize> = HashMap::new();
    for center in centers {
        *histogram.entry(center.biome).or_default() += 1;
    }
    let mut counts: Vec<(Biome, usize)> = histogram.into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    println!("Biomes:");
    for (biome, count) in counts {
        println!("  {biome:?}: {count}");
    }
}
