// Copyright (C) 2025 The runout authors
// SPDX-License-Identifier: Apache-2.0
//
// Times seven cards evaluations and heads up equity runs, run with:
//
// ```bash
// $ cargo r --release --example eval_speed
// Evaluated 200000 hands in 0.064s
// Hands/sec:       3117275
// Rank checksum:   912272062
//
// 10 equity runs, 1.302s avg per run
// ```
use anyhow::Result;
use std::time::Instant;

use runout_eval::{Deck, EquityCalculator, Evaluator};

const NUM_EVAL_HANDS: usize = 200_000;
const NUM_EQUITY_RUNS: usize = 10;

fn main() -> Result<()> {
    let evaluator = Evaluator::new();

    // Deal the hands outside the timed loop.
    let mut hands = Vec::with_capacity(NUM_EVAL_HANDS);
    for seed in 0..NUM_EVAL_HANDS {
        let mut deck = Deck::with_seed(seed as u64);
        deck.shuffle();
        hands.push(deck.draw(7)?);
    }

    // The checksum keeps the evaluations observable.
    let now = Instant::now();
    let mut checksum = 0u64;
    for hand in &hands {
        checksum += evaluator.evaluate(&hand[..2], &hand[2..])?.get() as u64;
    }

    let elapsed = now.elapsed().as_secs_f64();
    println!("Evaluated {} hands in {elapsed:.3}s", hands.len());
    println!("Hands/sec:       {:.0}", hands.len() as f64 / elapsed);
    println!("Rank checksum:   {checksum}\n");

    // Exhaustive heads up equity on random hole hands.
    let mut calculator = EquityCalculator::new();
    let mut elapsed = 0.0;
    for run in 0..NUM_EQUITY_RUNS {
        let mut deck = Deck::with_seed(run as u64);
        deck.shuffle();

        // Snapshot before drawing, the hole cards must stay in the pool.
        calculator.set_deck(&deck);
        let first = deck.draw(2)?;
        let second = deck.draw(2)?;
        let hands = [[first[0], first[1]], [second[0], second[1]]];

        let now = Instant::now();
        calculator.calculate_equity(&hands)?;
        elapsed += now.elapsed().as_secs_f64();
    }

    println!(
        "{NUM_EQUITY_RUNS} equity runs, {:.3}s avg per run",
        elapsed / NUM_EQUITY_RUNS as f64
    );

    Ok(())
}
