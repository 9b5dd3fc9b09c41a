// Copyright (C) 2025 The runout authors
// SPDX-License-Identifier: Apache-2.0
//
// Exhaustive preflop equity for two or more hole hands, run with:
//
// ```bash
// $ cargo r --release --example equity -- AsKs QhQd 6c7c
// Player 1 hand: [A♠][K♠]  equity: 37.79%
// Player 2 hand: [Q♥][Q♦]  equity: 39.57%
// Player 3 hand: [6♣][7♣]  equity: 22.63%
//
// Calculation took 1.408s
// ```
use anyhow::Result;
use clap::Parser;
use std::time::Instant;

use runout_eval::*;

#[derive(Debug, Parser)]
struct Cli {
    /// The number of worker threads, defaults to one per core.
    #[clap(long, short)]
    workers: Option<usize>,

    /// Hole hands, two cards each like AsKs.
    #[clap(default_values_t = vec![
        "AsKs".to_string(),
        "QhQd".to_string(),
        "6c7c".to_string(),
    ])]
    hands: Vec<String>,
}

fn parse_hand(notation: &str) -> Result<[Card; 2]> {
    anyhow::ensure!(
        notation.len() == 4,
        "hand {notation:?} must be two cards like AsKs"
    );

    let (first, second) = notation.split_at(2);
    Ok([first.parse()?, second.parse()?])
}

fn main() -> Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();
    let hands = cli
        .hands
        .iter()
        .map(|notation| parse_hand(notation))
        .collect::<Result<Vec<_>>>()?;

    let calculator = match cli.workers {
        Some(workers) => EquityCalculator::with_workers(workers),
        None => EquityCalculator::new(),
    };

    let now = Instant::now();
    let equities = calculator.calculate_equity(&hands)?;
    let elapsed = now.elapsed().as_secs_f64();

    for (player, (hand, equity)) in hands.iter().zip(&equities).enumerate() {
        println!(
            "Player {} hand: {}{}  equity: {equity:.2}%",
            player + 1,
            hand[0].pretty(),
            hand[1].pretty()
        );
    }

    println!("\nCalculation took {elapsed:.3}s");
    Ok(())
}
