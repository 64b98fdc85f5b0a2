use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use tileroads::cli::{render_board, render_scores};
use tileroads::game::{ConfigOverrides, Game, GameConfig, GameEvent, TurnCommand};
use tileroads::tileset::TileSet;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser, Clone)]
#[command(name = "tileroads-play")]
#[command(about = "Hot-seat road building on a tile grid")]
struct Args {
    /// Comma-separated player names, in turn order (at most 4)
    #[arg(long)]
    players: Option<String>,

    /// Random seed for the draw pile
    #[arg(long)]
    seed: Option<u64>,

    /// Score that ends the game
    #[arg(long)]
    score_to_win: Option<u32>,

    /// JSON game configuration; command-line flags override its fields
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON tile set replacing the configured one
    #[arg(long)]
    tiles: Option<PathBuf>,

    /// Keep the tile set order instead of shuffling
    #[arg(long)]
    no_shuffle: bool,

    /// Log road linking at debug level
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = build_config(&args).unwrap_or_else(|err| {
        eprintln!("Error: {err}");
        std::process::exit(1);
    });
    let mut game = Game::new(config).unwrap_or_else(|err| {
        eprintln!("Error: {err}");
        std::process::exit(1);
    });

    println!("Commands: place X Y | rotate | cancel | confirm | quit");
    println!("{}", "=".repeat(60));

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    while !game.is_over() {
        print_turn(&game);
        print!("> ");
        let _ = io::stdout().flush();

        let Some(Ok(line)) = lines.next() else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("q") {
            break;
        }
        let command = match line.parse::<TurnCommand>() {
            Ok(command) => command,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };
        match game.execute(command) {
            Ok(Some(outcome)) => report_events(&game, &outcome.events),
            Ok(None) => {}
            Err(err) => {
                if let Err(fatal) = check_fatal(err) {
                    eprintln!("Error: {fatal}");
                    std::process::exit(2);
                }
            }
        }
    }

    println!("\n{}", "=".repeat(60));
    println!("{}", render_board(&game.state));
    println!("FINAL SCORES:");
    println!("{}", render_scores(&game.state));
    let winners = game.winners();
    if !winners.is_empty() {
        let names: Vec<&str> = winners.iter().map(|p| p.name.as_str()).collect();
        println!("Winner: {}", names.join(", "));
    }
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .with_writer(io::stderr)
        .init();
}

fn build_config(args: &Args) -> Result<GameConfig, Box<dyn std::error::Error>> {
    let config = match &args.config {
        Some(path) => GameConfig::from_json_file(path)?,
        None => GameConfig::default(),
    };
    let tile_set = match &args.tiles {
        Some(path) => Some(TileSet::from_json_file(path)?),
        None => None,
    };
    Ok(config.with_overrides(ConfigOverrides {
        player_names: args
            .players
            .as_deref()
            .map(ConfigOverrides::parse_player_names),
        seed: args.seed,
        score_to_win: args.score_to_win,
        tile_set,
        no_shuffle: args.no_shuffle,
    }))
}

/// Declined moves are reported and the turn continues; broken road
/// topology ends the program.
fn check_fatal(err: tileroads::GameError) -> Result<(), tileroads::GameError> {
    match err {
        tileroads::GameError::Road(_) | tileroads::GameError::Config(_) => Err(err),
        other => {
            println!("Declined: {other}");
            Ok(())
        }
    }
}

fn print_turn(game: &Game) {
    let state = &game.state;
    println!("\n{}", render_board(state));
    println!("{}", render_scores(state));
    if let Some(tile) = state.current_tile() {
        let roads = tile.roadmap().current_encoding(state.network());
        let roads = if roads.is_empty() { "(no roads)" } else { &roads };
        println!(
            "Tile {} [{}], rotation {}, {} left, phase {}",
            tile.id,
            roads,
            tile.rotation(),
            state.pile_len(),
            state.phase()
        );
    }
}

fn report_events(game: &Game, events: &[GameEvent]) {
    for event in events {
        match event {
            GameEvent::RoadCompleted { length, .. } => {
                println!("Road of {length} segment(s) completed");
            }
            GameEvent::ScoreAwarded {
                player,
                points,
                total,
            } => {
                let name = game
                    .state
                    .players()
                    .get(*player)
                    .map(|p| p.name.as_str())
                    .unwrap_or("?");
                println!("{name} scores {points} (total {total})");
            }
            _ => {}
        }
    }
}
