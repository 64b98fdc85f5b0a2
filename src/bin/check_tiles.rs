use std::path::PathBuf;

use clap::Parser;
use tileroads::coords::Direction;
use tileroads::road::{RoadNetwork, Roadmap};
use tileroads::tileset::TileSet;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser, Clone)]
#[command(name = "tileroads-check-tiles")]
#[command(about = "Validate a tile set and print how each roadmap decomposes")]
struct Args {
    /// JSON tile set; the built-in standard set when omitted
    tiles: Option<PathBuf>,

    /// Only report errors
    #[arg(long)]
    quiet: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();
    let args = Args::parse();

    let set = match &args.tiles {
        Some(path) => TileSet::from_json_file(path),
        None => Ok(TileSet::standard().clone()),
    };
    let set = set.unwrap_or_else(|err| {
        eprintln!("Error: {err}");
        if let Some(source) = std::error::Error::source(&err) {
            eprintln!("  caused by: {source}");
        }
        std::process::exit(1);
    });

    let mut network = RoadNetwork::new();
    let mut dead_ends = 0;
    let mut owned = 0;
    for template in &set.tiles {
        let roadmap = match Roadmap::parse(&template.roadmap, &mut network) {
            Ok(roadmap) => roadmap,
            Err(err) => {
                eprintln!("Error: tile {}: {err}", template.image);
                std::process::exit(1);
            }
        };
        let shapes = roadmap.shapes(&network);
        dead_ends += shapes.iter().filter(|s| s.is_dead_end()).count();
        owned += shapes.iter().filter(|s| s.owner.is_owned()).count();
        if args.quiet {
            continue;
        }
        let parts: Vec<String> = shapes
            .iter()
            .map(|shape| {
                let [a, b] = shape.endpoints;
                let ends = if b == Direction::Boundary {
                    format!("{a} end")
                } else {
                    format!("{a}-{b}")
                };
                if shape.owner.is_owned() {
                    format!("{ends} ({})", shape.owner)
                } else {
                    ends
                }
            })
            .collect();
        println!(
            "{:>3} {:<10} {}",
            template.image,
            format!("{:?}", template.roadmap),
            parts.join(", ")
        );
    }
    println!(
        "{}: {} tiles, {} segments, {} dead ends, {} markers",
        set.name,
        set.len(),
        network.len(),
        dead_ends,
        owned
    );
}
