// Copyright (C) 2025 The runout authors
// SPDX-License-Identifier: Apache-2.0

//! Exhaustive equity calculation.
//!
//! The calculator scores every hole hand against every board the remaining
//! deck can deal, so the returned equities are exact rather than sampled.
//! Boards are split into contiguous windows of the lexicographic combination
//! sequence, one per worker thread, and each worker walks its window with
//! constant memory. The tallies do not depend on how many workers split the
//! work, the same deck always yields the same equities.
use log::debug;
use std::thread;
use thiserror::Error;

use runout_cards::{Card, Deck};

use crate::combinatorics::{binomial, next_index_combination, nth_combination};
use crate::eval::{EvalError, Evaluator};
use crate::lookup::HandRank;

/// Errors from equity calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EquityError {
    /// Fewer than two players.
    #[error("equity needs at least 2 players, got {0}")]
    TooFewPlayers(usize),
    /// More players than a deck can seat.
    #[error("equity supports at most 9 players, got {0}")]
    TooManyPlayers(usize),
    /// A hole card missing from the deck, dealt twice or already drawn.
    #[error("hole card {0} is not in the deck, dealt twice or already drawn")]
    DuplicateOrMissingCard(Card),
    /// Too few cards left to deal a board.
    #[error("only {0} cards left in the deck, a board needs 5")]
    InsufficientDeck(usize),
    /// A board evaluation failed.
    #[error(transparent)]
    Eval(#[from] EvalError),
}

/// Per player win and tie counts over a window of boards.
#[derive(Clone, Default)]
struct Tallies {
    wins: Vec<u64>,
    ties: Vec<u64>,
}

/// Exhaustive win and tie equity for two or more hole hands.
///
/// The calculator snapshots a deck, and for a set of hole hands enumerates
/// every five cards board from the snapshot minus the hole cards. A board
/// with a single best hand counts a win for its player, a board with tied
/// best hands counts a tie for every tied player. The equity of a player is
///
/// ```text
/// (wins + ties / players) / boards * 100
/// ```
///
/// so two way equities always sum to 100 while three or more players can
/// fall marginally short of 100 when only some of them tie a board.
pub struct EquityCalculator {
    evaluator: Evaluator,
    deck: Vec<Card>,
    num_workers: usize,
}

impl EquityCalculator {
    /// Minimum number of players in a hand.
    pub const MIN_PLAYERS: usize = 2;
    /// Maximum number of players in a hand.
    pub const MAX_PLAYERS: usize = 9;

    /// Creates a calculator with a full deck and one worker per available
    /// core.
    pub fn new() -> Self {
        Self {
            evaluator: Evaluator::new(),
            deck: Deck::all_cards().to_vec(),
            num_workers: num_cpus::get().max(1),
        }
    }

    /// Creates a calculator with a fixed worker count.
    pub fn with_workers(num_workers: usize) -> Self {
        Self {
            num_workers: num_workers.max(1),
            ..Self::new()
        }
    }

    /// Snapshots the remaining cards of `deck` for the next calculations.
    ///
    /// The deck itself is untouched, drawing from it later does not change
    /// the snapshot.
    pub fn set_deck(&mut self, deck: &Deck) {
        self.deck = deck.cards().to_vec();
    }

    /// Returns the equity percentage of each player's hole hand.
    ///
    /// Enumerates every possible board from the deck snapshot minus the
    /// hole cards, the returned percentages are in `hands` order.
    pub fn calculate_equity(&self, hands: &[[Card; 2]]) -> Result<Vec<f64>, EquityError> {
        let num_players = hands.len();
        if num_players < Self::MIN_PLAYERS {
            return Err(EquityError::TooFewPlayers(num_players));
        }
        if num_players > Self::MAX_PLAYERS {
            return Err(EquityError::TooManyPlayers(num_players));
        }

        // Boards come from the snapshot minus the hole cards, a hole card
        // that is not in the snapshot was dealt twice or already drawn.
        let mut deck = self.deck.clone();
        for &card in hands.iter().flatten() {
            let Some(pos) = deck.iter().position(|&c| c == card) else {
                return Err(EquityError::DuplicateOrMissingCard(card));
            };
            deck.remove(pos);
        }

        if deck.len() < 5 {
            return Err(EquityError::InsufficientDeck(deck.len()));
        }

        let total_boards = binomial(deck.len() as u64, 5);
        let num_chunks = (self.num_workers as u64).min(total_boards);
        let boards_per_chunk = total_boards.div_ceil(num_chunks);

        debug!(
            "calculating equity for {num_players} players over {total_boards} \
             boards on {num_chunks} workers"
        );

        let mut chunks: Vec<Result<Tallies, EvalError>> =
            vec![Ok(Tallies::default()); num_chunks as usize];

        thread::scope(|scope| {
            for (chunk, result) in chunks.iter_mut().enumerate() {
                // The ceil divided grid can overshoot the sequence, chunks
                // past the end get an empty window.
                let start = chunk as u64 * boards_per_chunk;
                let count = boards_per_chunk.min(total_boards.saturating_sub(start));
                let (evaluator, deck) = (&self.evaluator, &deck);
                scope.spawn(move || {
                    *result = count_window(evaluator, deck, hands, start, count);
                });
            }
        });

        let mut wins = vec![0u64; num_players];
        let mut ties = vec![0u64; num_players];
        for chunk in chunks {
            let tallies = chunk?;
            for (total, count) in wins.iter_mut().zip(&tallies.wins) {
                *total += count;
            }
            for (total, count) in ties.iter_mut().zip(&tallies.ties) {
                *total += count;
            }
        }

        let equities = wins
            .iter()
            .zip(&ties)
            .map(|(&wins, &ties)| {
                (wins as f64 + ties as f64 / num_players as f64) / total_boards as f64 * 100.0
            })
            .collect();

        Ok(equities)
    }
}

impl Default for EquityCalculator {
    fn default() -> Self {
        Self::new()
    }
}

/// Scores the window of `count` boards starting at the `start`-th five cards
/// combination of `deck` in lexicographic order.
fn count_window(
    evaluator: &Evaluator,
    deck: &[Card],
    hands: &[[Card; 2]],
    start: u64,
    count: u64,
) -> Result<Tallies, EvalError> {
    let num_players = hands.len();
    let mut tallies = Tallies {
        wins: vec![0; num_players],
        ties: vec![0; num_players],
    };

    if count == 0 {
        return Ok(tallies);
    }

    let mut positions = nth_combination(deck.len(), 5, start);
    let mut board = [deck[0]; 5];
    let mut scores = vec![HandRank::WORST; num_players];

    for visited in 0..count {
        for (slot, &pos) in board.iter_mut().zip(&positions[..5]) {
            *slot = deck[pos];
        }

        for (score, hand) in scores.iter_mut().zip(hands) {
            *score = evaluator.evaluate(hand, &board)?;
        }

        // Find all players at the best score before deciding between a win
        // and a tie so the outcome never depends on player order.
        let mut best = scores[0];
        for &score in &scores[1..] {
            best = best.min(score);
        }
        let winners = scores.iter().filter(|&&score| score == best).count();

        if winners > 1 {
            for (player, &score) in scores.iter().enumerate() {
                if score == best {
                    tallies.ties[player] += 1;
                }
            }
        } else {
            for (player, &score) in scores.iter().enumerate() {
                if score == best {
                    tallies.wins[player] += 1;
                }
            }
        }

        if visited + 1 < count && !next_index_combination(deck.len(), &mut positions[..5]) {
            break;
        }
    }

    Ok(tallies)
}
