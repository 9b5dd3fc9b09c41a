// Copyright (C) 2025 The runout authors
// SPDX-License-Identifier: Apache-2.0

//! Runout Poker hand evaluator.
//!
//! Poker hand evaluator and equity calculator for 5 and 7 cards Texas Hold'em
//! hands. The evaluator is a port of the [Cactus Kev's][kevlink] perfect hash
//! evaluator: every 5 cards hand maps to one of 7462 equivalence classes where
//! rank 1 is the royal flush and rank 7462 the worst high card, so comparing
//! two hands is comparing two integers. The [EquityCalculator] enumerates
//! every possible board for a set of hole hands and scores them in parallel.
//!
//! To rank a hand pass its hole and board cards to the [Evaluator]:
//!
//! ```
//! use runout_eval::{Card, Evaluator, Rank, RankClass, Suit};
//!
//! let evaluator = Evaluator::new();
//!
//! let hole = [
//!     Card::new(Rank::Ace, Suit::Spades),
//!     Card::new(Rank::King, Suit::Spades),
//! ];
//! let board = [
//!     Card::new(Rank::Queen, Suit::Spades),
//!     Card::new(Rank::Jack, Suit::Spades),
//!     Card::new(Rank::Ten, Suit::Spades),
//! ];
//!
//! let rank = evaluator.evaluate(&hole, &board).unwrap();
//! assert_eq!(rank.get(), 1);
//! assert_eq!(rank.class(), RankClass::RoyalFlush);
//! ```
//!
//! [kevlink]: http://suffe.cool/poker/evaluator.html
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
pub mod combinatorics;
pub mod equity;
pub mod eval;
pub mod lookup;

pub use equity::{EquityCalculator, EquityError};
pub use eval::{EvalError, Evaluator};
pub use lookup::{HandRank, LookupTable, RankClass};

// Reexport cards types.
pub use runout_cards::{Card, Deck, Rank, Suit};
