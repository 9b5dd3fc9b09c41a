// Copyright (C) 2025 The runout authors
// SPDX-License-Identifier: Apache-2.0
//
// Run with:
//
// ```bash
// $ cargo r --release --example eval_all5
// Total hands      2598960
// Distinct ranks   7462
// Elapsed:         0.331s
// Hands/sec:       7852443
//
// High Card:       1302540
// Pair:            1098240
// Two Pair:        123552
// Three of a Kind: 54912
// Straight:        10200
// Flush:           5108
// Full House:      3744
// Four of a Kind:  624
// Straight Flush:  36
// Royal Flush:     4
// ```
use anyhow::Result;
use std::time::Instant;

use runout_eval::{combinatorics::combinations, *};

fn main() -> Result<()> {
    // Evaluate all 2.6M five cards hands.
    let evaluator = Evaluator::new();
    let now = Instant::now();

    let mut counts = [0u64; 10];
    let mut ranks = ahash::HashSet::default();
    for hand in combinations(Deck::all_cards(), 5) {
        let rank = evaluator.evaluate(&hand, &[])?;
        counts[rank.class() as usize] += 1;
        ranks.insert(rank.get());
    }

    let elapsed = now.elapsed().as_secs_f64();
    let total = counts.iter().sum::<u64>();
    println!("Total hands      {total}");
    println!("Distinct ranks   {}", ranks.len());
    println!("Elapsed:         {elapsed:.3}s");
    println!("Hands/sec:       {:.0}\n", total as f64 / elapsed);

    println!("High Card:       {}", counts[RankClass::HighCard as usize]);
    println!("Pair:            {}", counts[RankClass::OnePair as usize]);
    println!("Two Pair:        {}", counts[RankClass::TwoPair as usize]);
    println!("Three of a Kind: {}", counts[RankClass::ThreeOfAKind as usize]);
    println!("Straight:        {}", counts[RankClass::Straight as usize]);
    println!("Flush:           {}", counts[RankClass::Flush as usize]);
    println!("Full House:      {}", counts[RankClass::FullHouse as usize]);
    println!("Four of a Kind:  {}", counts[RankClass::FourOfAKind as usize]);
    println!("Straight Flush:  {}", counts[RankClass::StraightFlush as usize]);
    println!("Royal Flush:     {}", counts[RankClass::RoyalFlush as usize]);

    Ok(())
}
