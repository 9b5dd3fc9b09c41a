// Copyright (C) 2025 The runout authors
// SPDX-License-Identifier: Apache-2.0

//! Runout Poker cards types.
//!
//! This crate defines types to create cards:
//!
//! ```
//! # use runout_cards::{Card, Rank, Suit};
//! let ah = Card::new(Rank::Ace, Suit::Hearts);
//! let kd: Card = "Kd".parse()?;
//! assert_eq!(kd.to_string(), "KD");
//! # Ok::<(), runout_cards::ParseCardError>(())
//! ```
//!
//! and a [Deck] type that owns its shuffling generator, so two decks created
//! with the same seed deal the same cards:
//!
//! ```
//! # use runout_cards::Deck;
//! let mut deck = Deck::with_seed(42);
//! deck.shuffle();
//!
//! // Two cards for each of three players.
//! let hands = (0..3).map(|_| deck.draw(2)).collect::<Result<Vec<_>, _>>()?;
//! assert_eq!(deck.count(), 46);
//! # Ok::<(), runout_cards::DeckError>(())
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
mod cards;
pub use cards::{Card, Deck, DeckError, ParseCardError, Rank, Suit};
