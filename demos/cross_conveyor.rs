//! Builds a small conveyor system and prints it after every insertion.
//!
//! ```text
//! cargo run --example cross_conveyor -- --belt A=5 --belt B=5 --junction 2=A,B --junction 4
//! ```

use clap::Parser;
use cross_conveyor::{ConveyorLayout, ConveyorSystem};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(about = "Push items through fused conveyor belts")]
struct Args {
    /// Belt declaration as NAME=LENGTH. Repeatable.
    #[arg(long = "belt", value_parser = parse_belt)]
    belts: Vec<(String, usize)>,

    /// Junction declaration as POSITION or POSITION=A,B. Without names every belt reaching the
    /// position is fused.
    #[arg(long = "junction", value_parser = parse_junction)]
    junctions: Vec<(usize, Vec<String>)>,

    /// Number of items pushed into each of the first two belts.
    #[arg(long, default_value_t = 10)]
    rounds: i64,
}

fn parse_belt(raw: &str) -> Result<(String, usize), String> {
    let (name, length) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=LENGTH, got {raw}"))?;
    let length = length
        .parse()
        .map_err(|e| format!("invalid length in {raw}: {e}"))?;
    Ok((name.to_owned(), length))
}

fn parse_junction(raw: &str) -> Result<(usize, Vec<String>), String> {
    let (position, names) = raw.split_once('=').unwrap_or((raw, ""));
    let position = position
        .parse()
        .map_err(|e| format!("invalid position in {raw}: {e}"))?;
    let names = names
        .split(',')
        .filter(|n| !n.is_empty())
        .map(str::to_owned)
        .collect();
    Ok((position, names))
}

fn layout(args: &Args) -> ConveyorLayout {
    if args.belts.is_empty() {
        return ConveyorLayout::new()
            .with_belt("A", 5)
            .with_belt("B", 5)
            .with_belt("C", 20)
            .with_junction(2, ["A", "B"])
            .with_junction(4, Vec::<String>::new());
    }

    let layout = args
        .belts
        .iter()
        .fold(ConveyorLayout::new(), |l, (name, length)| l.with_belt(name.clone(), *length));
    args.junctions
        .iter()
        .fold(layout, |l, (position, names)| l.with_junction(*position, names.clone()))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let system: ConveyorSystem = layout(&args).build()?;
    tracing::info!(belts = ?system.belt_names(), "conveyor system ready");

    let names: Vec<String> = system.belt_names().into_iter().map(str::to_owned).collect();
    for (round, belt) in names.iter().take(2).enumerate() {
        let base = round as i64 * args.rounds;
        for value in base..base + args.rounds {
            if let Some(evicted) = system.insert(belt, value)? {
                tracing::info!(belt = %belt, evicted, "item left the belt");
            }
            println!("{system}");
        }
    }

    Ok(())
}
