// Copyright (C) 2025 The runout authors
// SPDX-License-Identifier: Apache-2.0

//! Poker hand evaluator.
//!
//! This evaluator is a port of the [Cactus Kev's][kevlink] perfect hash
//! evaluator. A five cards hand reduces to a prime product key looked up in
//! the [LookupTable], a seven cards hand to the best of its five cards
//! subsets with a shortcut that restricts the scan to the flush suit when
//! one holds five or more cards.
//!
//! [kevlink]: http://suffe.cool/poker/evaluator.html
use thiserror::Error;

use runout_cards::{Card, Rank, Suit};

use crate::lookup::{prime_product_from_rank_bits, HandRank, LookupTable};

/// Errors from hand evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EvalError {
    /// Evaluation called with a number of cards other than 5 or 7.
    #[error("hand evaluation takes 5 or 7 cards, got {0}")]
    UnsupportedHandSize(usize),
    /// A hand key missing from the lookup tables, repeating a card can
    /// collapse a flush pattern to fewer than five ranks.
    #[error("no rank for prime product {0}, the hand repeats a card")]
    UnknownRankPattern(u32),
    /// A rank value outside `1..=7462`.
    #[error("hand rank {0} outside 1..=7462")]
    InvalidHandRank(u16),
}

/// A five and seven cards hand evaluator.
///
/// Creating an evaluator builds the rank lookup tables, the instance is
/// immutable afterwards and can be shared across threads.
pub struct Evaluator {
    table: LookupTable,
}

impl Evaluator {
    /// Creates an evaluator and builds its lookup tables.
    pub fn new() -> Self {
        Self {
            table: LookupTable::new(),
        }
    }

    /// Evaluates the hole and board cards as a single hand.
    ///
    /// Returns the rank of the best five cards hand. The hole and board
    /// together must hold exactly 5 or 7 cards, any other size fails with
    /// [EvalError::UnsupportedHandSize].
    pub fn evaluate(&self, hole: &[Card], board: &[Card]) -> Result<HandRank, EvalError> {
        let total = hole.len() + board.len();
        match total {
            5 | 7 => {}
            n => return Err(EvalError::UnsupportedHandSize(n)),
        }

        let mut cards = [Card::new(Rank::Ace, Suit::Hearts); 7];
        for (slot, &card) in cards.iter_mut().zip(hole.iter().chain(board)) {
            *slot = card;
        }

        if total == 5 {
            self.eval_five(&cards[..5])
        } else {
            self.eval_seven(&cards)
        }
    }

    /// Evaluates a five cards hand.
    fn eval_five(&self, cards: &[Card]) -> Result<HandRank, EvalError> {
        debug_assert_eq!(cards.len(), 5);

        // A suit bit surviving the fold means all five cards share it.
        let flush = cards.iter().fold(!0u32, |acc, c| acc & c.id()) & 0xF000 != 0;
        if flush {
            let bits = cards.iter().fold(0u32, |acc, c| acc | c.id()) >> 16;
            let key = prime_product_from_rank_bits(bits);
            self.table
                .flush_rank(key)
                .ok_or(EvalError::UnknownRankPattern(key))
        } else {
            let key = cards.iter().map(|c| c.prime_bits()).product();
            self.table
                .unsuited_rank(key)
                .ok_or(EvalError::UnknownRankPattern(key))
        }
    }

    /// Evaluates a seven cards hand as the best of its five cards subsets.
    fn eval_seven(&self, cards: &[Card; 7]) -> Result<HandRank, EvalError> {
        // With five or more cards in one suit neither four of a kind nor a
        // full house is possible, so the best hand is a flush or straight
        // flush found among the flush suit cards alone.
        let mut suit_counts = [0u8; 4];
        for card in cards {
            suit_counts[card.suit_bits().trailing_zeros() as usize] += 1;
        }

        if let Some(suit) = suit_counts.iter().position(|&n| n >= 5) {
            let suit_bits = 1u8 << suit;
            let mut flush_cards = [cards[0]; 7];
            let mut count = 0;
            for &card in cards {
                if card.suit_bits() == suit_bits {
                    flush_cards[count] = card;
                    count += 1;
                }
            }
            return self.best_five_of(&flush_cards[..count]);
        }

        self.best_five_of(cards)
    }

    /// Returns the minimum rank over all five cards subsets of a five to
    /// seven cards hand.
    fn best_five_of(&self, cards: &[Card]) -> Result<HandRank, EvalError> {
        if cards.len() == 5 {
            return self.eval_five(cards);
        }
        debug_assert!(cards.len() == 6 || cards.len() == 7);

        let mut hand = [cards[0]; 5];
        let mut best = HandRank::WORST;

        if cards.len() == 6 {
            for skip in 0..6 {
                fill_hand(&mut hand, cards, skip, skip);
                best = best.min(self.eval_five(&hand)?);
            }
        } else {
            for skip1 in 0..6 {
                for skip2 in (skip1 + 1)..7 {
                    fill_hand(&mut hand, cards, skip1, skip2);
                    best = best.min(self.eval_five(&hand)?);
                }
            }
        }

        Ok(best)
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

/// Copies every card except the skipped positions into `hand`.
fn fill_hand(hand: &mut [Card; 5], cards: &[Card], skip1: usize, skip2: usize) {
    let mut count = 0;
    for (pos, &card) in cards.iter().enumerate() {
        if pos != skip1 && pos != skip2 {
            hand[count] = card;
            count += 1;
        }
    }
}
