// Copyright (C) 2025 The runout authors
// SPDX-License-Identifier: Apache-2.0

//! Hand rank lookup tables.
//!
//! Every five cards hand maps to one of 7462 equivalence classes, two hands
//! in the same class always tie. The tables key each class by a product of
//! distinct primes so card order never matters: flush hands by the product
//! over their five rank primes, every other hand by the product over the
//! cards prime weights where paired ranks repeat their factor.
use ahash::AHashMap;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

use runout_cards::Rank;

use crate::combinatorics::next_bit_pattern;
use crate::eval::EvalError;

/// Rank of a royal flush, the strongest hand.
pub const MAX_ROYAL_FLUSH: u16 = 1;
/// Worst rank for a straight flush.
pub const MAX_STRAIGHT_FLUSH: u16 = 10;
/// Worst rank for four of a kind.
pub const MAX_FOUR_OF_A_KIND: u16 = 166;
/// Worst rank for a full house.
pub const MAX_FULL_HOUSE: u16 = 322;
/// Worst rank for a flush.
pub const MAX_FLUSH: u16 = 1599;
/// Worst rank for a straight.
pub const MAX_STRAIGHT: u16 = 1609;
/// Worst rank for three of a kind.
pub const MAX_THREE_OF_A_KIND: u16 = 2467;
/// Worst rank for two pair.
pub const MAX_TWO_PAIR: u16 = 3325;
/// Worst rank for one pair.
pub const MAX_PAIR: u16 = 6185;
/// Worst rank for a high card, the weakest hand.
pub const MAX_HIGH_CARD: u16 = 7462;

/// The ten straight rank masks from the royal flush down to the wheel.
const STRAIGHT_MASKS: [u32; 10] = [7936, 3968, 1984, 992, 496, 248, 124, 62, 31, 4111];

/// The strength of a five cards hand.
///
/// Ranks span `1..=7462` where a lower rank is a stronger hand, 1 is the
/// royal flush and 7462 the worst high card. The derived ordering compares
/// raw values so the best hand is the minimum rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HandRank(u16);

impl HandRank {
    /// The strongest rank, a royal flush.
    pub const BEST: HandRank = HandRank(MAX_ROYAL_FLUSH);
    /// The weakest rank, a 7 high card.
    pub const WORST: HandRank = HandRank(MAX_HIGH_CARD);

    /// Creates a rank from its integer value.
    ///
    /// Fails with [EvalError::InvalidHandRank] when the value falls outside
    /// `1..=7462`.
    pub fn new(rank: u16) -> Result<HandRank, EvalError> {
        if (MAX_ROYAL_FLUSH..=MAX_HIGH_CARD).contains(&rank) {
            Ok(HandRank(rank))
        } else {
            Err(EvalError::InvalidHandRank(rank))
        }
    }

    /// This rank integer value.
    pub fn get(self) -> u16 {
        self.0
    }

    /// The hand category this rank belongs to.
    pub fn class(self) -> RankClass {
        match self.0 {
            MAX_ROYAL_FLUSH => RankClass::RoyalFlush,
            ..=MAX_STRAIGHT_FLUSH => RankClass::StraightFlush,
            ..=MAX_FOUR_OF_A_KIND => RankClass::FourOfAKind,
            ..=MAX_FULL_HOUSE => RankClass::FullHouse,
            ..=MAX_FLUSH => RankClass::Flush,
            ..=MAX_STRAIGHT => RankClass::Straight,
            ..=MAX_THREE_OF_A_KIND => RankClass::ThreeOfAKind,
            ..=MAX_TWO_PAIR => RankClass::TwoPair,
            ..=MAX_PAIR => RankClass::OnePair,
            _ => RankClass::HighCard,
        }
    }
}

impl fmt::Display for HandRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The hand category of a [HandRank].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RankClass {
    /// Ten to ace straight in one suit.
    RoyalFlush = 0,
    /// Five consecutive ranks in one suit.
    StraightFlush,
    /// Four cards of one rank.
    FourOfAKind,
    /// Three cards of one rank and a pair.
    FullHouse,
    /// Five cards in one suit.
    Flush,
    /// Five consecutive ranks.
    Straight,
    /// Three cards of one rank.
    ThreeOfAKind,
    /// Two pairs.
    TwoPair,
    /// Two cards of one rank.
    OnePair,
    /// None of the above.
    HighCard,
}

impl fmt::Display for RankClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RankClass::RoyalFlush => "Royal Flush",
            RankClass::StraightFlush => "Straight Flush",
            RankClass::FourOfAKind => "Four of a Kind",
            RankClass::FullHouse => "Full House",
            RankClass::Flush => "Flush",
            RankClass::Straight => "Straight",
            RankClass::ThreeOfAKind => "Three of a Kind",
            RankClass::TwoPair => "Two Pair",
            RankClass::OnePair => "Pair",
            RankClass::HighCard => "High Card",
        };
        write!(f, "{name}")
    }
}

/// The flush and unsuited rank tables.
///
/// Built once at startup, immutable afterwards so lookups can run from many
/// threads without synchronization.
pub struct LookupTable {
    flush: AHashMap<u32, HandRank>,
    unsuited: AHashMap<u32, HandRank>,
}

impl LookupTable {
    /// Number of keys in the flush table, 10 straight flushes and 1277
    /// other flushes per choice of 5 out of 13 ranks.
    pub const FLUSH_KEYS: usize = 1287;
    /// Number of keys in the unsuited table, the remaining 6175 classes.
    pub const UNSUITED_KEYS: usize = 6175;

    /// Builds the tables.
    pub fn new() -> Self {
        let mut table = Self {
            flush: AHashMap::with_capacity(Self::FLUSH_KEYS),
            unsuited: AHashMap::with_capacity(Self::UNSUITED_KEYS),
        };

        table.flushes();
        table.multiples();

        debug!(
            "lookup tables built, {} flush keys {} unsuited keys",
            table.flush.len(),
            table.unsuited.len()
        );

        table
    }

    /// Rank of the flush hand with the given product of rank primes.
    pub fn flush_rank(&self, prime_product: u32) -> Option<HandRank> {
        self.flush.get(&prime_product).copied()
    }

    /// Rank of the unsuited hand with the given product of card primes.
    pub fn unsuited_rank(&self, prime_product: u32) -> Option<HandRank> {
        self.unsuited.get(&prime_product).copied()
    }

    /// Fills the flush table, and hands off the flush rank patterns that
    /// also order straights and high cards.
    fn flushes(&mut self) {
        // All 5 out of 13 rank patterns that are not straights, generated in
        // increasing numeric order starting right above the wheel mask.
        let mut masks = Vec::with_capacity(Self::FLUSH_KEYS - STRAIGHT_MASKS.len());
        let mut bits = 0b11111u32;
        for _ in 0..1286 {
            bits = next_bit_pattern(bits);
            if !STRAIGHT_MASKS.contains(&bits) {
                masks.push(bits);
            }
        }

        // Reverse so iteration runs from the strongest pattern to the
        // weakest, an ace high flush must get a better rank than a seven
        // high one.
        masks.reverse();

        let mut rank = MAX_ROYAL_FLUSH;
        for mask in STRAIGHT_MASKS {
            self.flush
                .insert(prime_product_from_rank_bits(mask), HandRank(rank));
            rank += 1;
        }

        let mut rank = MAX_FULL_HOUSE + 1;
        for &mask in &masks {
            self.flush
                .insert(prime_product_from_rank_bits(mask), HandRank(rank));
            rank += 1;
        }

        self.straights_and_high_cards(&masks);
    }

    /// Fills the straight and high card unsuited ranks, both reuse the
    /// flush rank patterns with different offsets.
    fn straights_and_high_cards(&mut self, high_cards: &[u32]) {
        let mut rank = MAX_FLUSH + 1;
        for mask in STRAIGHT_MASKS {
            self.unsuited
                .insert(prime_product_from_rank_bits(mask), HandRank(rank));
            rank += 1;
        }

        let mut rank = MAX_PAIR + 1;
        for &mask in high_cards {
            self.unsuited
                .insert(prime_product_from_rank_bits(mask), HandRank(rank));
            rank += 1;
        }
    }

    /// Fills the unsuited ranks for hands with repeated ranks.
    ///
    /// Each category iterates its primary ranks and kickers from the ace
    /// down so ranks increase as hands weaken, the same order of the
    /// original Cactus Kev tables.
    fn multiples(&mut self) {
        let ranks = Rank::ranks().rev().collect::<Vec<_>>();

        // Four of a kind with one kicker.
        let mut rank = MAX_STRAIGHT_FLUSH + 1;
        for &quad in &ranks {
            for kicker in ranks.iter().filter(|&&r| r != quad) {
                let key = quad.prime().pow(4) * kicker.prime();
                self.unsuited.insert(key, HandRank(rank));
                rank += 1;
            }
        }

        // Full house.
        let mut rank = MAX_FOUR_OF_A_KIND + 1;
        for &trips in &ranks {
            for pair in ranks.iter().filter(|&&r| r != trips) {
                let key = trips.prime().pow(3) * pair.prime().pow(2);
                self.unsuited.insert(key, HandRank(rank));
                rank += 1;
            }
        }

        // Three of a kind with two kickers.
        let mut rank = MAX_STRAIGHT + 1;
        for &trips in &ranks {
            let kickers = ranks
                .iter()
                .copied()
                .filter(|&r| r != trips)
                .collect::<Vec<_>>();
            for (pos, high) in kickers.iter().enumerate() {
                for low in &kickers[pos + 1..] {
                    let key = trips.prime().pow(3) * high.prime() * low.prime();
                    self.unsuited.insert(key, HandRank(rank));
                    rank += 1;
                }
            }
        }

        // Two pair with one kicker.
        let mut rank = MAX_THREE_OF_A_KIND + 1;
        for (pos, &high) in ranks.iter().enumerate() {
            for &low in &ranks[pos + 1..] {
                for kicker in ranks.iter().filter(|&&r| r != high && r != low) {
                    let key = high.prime().pow(2) * low.prime().pow(2) * kicker.prime();
                    self.unsuited.insert(key, HandRank(rank));
                    rank += 1;
                }
            }
        }

        // One pair with three kickers.
        let mut rank = MAX_TWO_PAIR + 1;
        for &pair in &ranks {
            let kickers = ranks
                .iter()
                .copied()
                .filter(|&r| r != pair)
                .collect::<Vec<_>>();
            for (pos1, first) in kickers.iter().enumerate() {
                for (pos2, second) in kickers.iter().enumerate().skip(pos1 + 1) {
                    for third in &kickers[pos2 + 1..] {
                        let key = pair.prime().pow(2)
                            * first.prime()
                            * second.prime()
                            * third.prime();
                        self.unsuited.insert(key, HandRank(rank));
                        rank += 1;
                    }
                }
            }
        }
    }
}

impl Default for LookupTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns the product of the rank primes for the set bits of `bits`.
pub(crate) fn prime_product_from_rank_bits(bits: u32) -> u32 {
    Rank::ranks()
        .filter(|&r| bits & (1 << r as u32) != 0)
        .map(|r| r.prime())
        .product()
}

#[cfg(test)]
mod tests {
    use super::*;
    use runout_cards::Rank::*;

    fn unsuited_key(ranks: &[Rank]) -> u32 {
        ranks.iter().map(|r| r.prime()).product()
    }

    #[test]
    fn test_table_sizes() {
        let table = LookupTable::new();
        assert_eq!(table.flush.len(), LookupTable::FLUSH_KEYS);
        assert_eq!(table.unsuited.len(), LookupTable::UNSUITED_KEYS);
    }

    #[test]
    fn test_straight_flush_ranks() {
        let table = LookupTable::new();
        for (pos, mask) in STRAIGHT_MASKS.iter().enumerate() {
            let rank = table.flush_rank(prime_product_from_rank_bits(*mask));
            assert_eq!(rank, Some(HandRank(pos as u16 + 1)), "mask {mask:#b}");
        }
    }

    #[test]
    fn test_flush_ranks() {
        let table = LookupTable::new();

        // Best flush below the straight flushes is A K Q J 9, worst is
        // 7 5 4 3 2.
        let best = unsuited_key(&[Ace, King, Queen, Jack, Nine]);
        assert_eq!(table.flush_rank(best), Some(HandRank(MAX_FULL_HOUSE + 1)));

        let worst = unsuited_key(&[Seven, Five, Four, Trey, Deuce]);
        assert_eq!(table.flush_rank(worst), Some(HandRank(MAX_FLUSH)));
    }

    #[test]
    fn test_straight_and_high_card_ranks() {
        let table = LookupTable::new();

        let broadway = unsuited_key(&[Ace, King, Queen, Jack, Ten]);
        assert_eq!(
            table.unsuited_rank(broadway),
            Some(HandRank(MAX_FLUSH + 1))
        );

        let wheel = unsuited_key(&[Ace, Five, Four, Trey, Deuce]);
        assert_eq!(table.unsuited_rank(wheel), Some(HandRank(MAX_STRAIGHT)));

        let best_high = unsuited_key(&[Ace, King, Queen, Jack, Nine]);
        assert_eq!(
            table.unsuited_rank(best_high),
            Some(HandRank(MAX_PAIR + 1))
        );

        let worst_high = unsuited_key(&[Seven, Five, Four, Trey, Deuce]);
        assert_eq!(
            table.unsuited_rank(worst_high),
            Some(HandRank(MAX_HIGH_CARD))
        );
    }

    #[test]
    fn test_multiples_ranks() {
        let table = LookupTable::new();

        // Best and worst hand of each category with repeated ranks.
        let cases = [
            (vec![Ace, Ace, Ace, Ace, King], MAX_STRAIGHT_FLUSH + 1),
            (vec![Deuce, Deuce, Deuce, Deuce, Trey], MAX_FOUR_OF_A_KIND),
            (vec![Ace, Ace, Ace, King, King], MAX_FOUR_OF_A_KIND + 1),
            (vec![Deuce, Deuce, Deuce, Trey, Trey], MAX_FULL_HOUSE),
            (vec![Ace, Ace, Ace, King, Queen], MAX_STRAIGHT + 1),
            (vec![Deuce, Deuce, Deuce, Four, Trey], MAX_THREE_OF_A_KIND),
            (vec![Ace, Ace, King, King, Queen], MAX_THREE_OF_A_KIND + 1),
            (vec![Trey, Trey, Deuce, Deuce, Four], MAX_TWO_PAIR),
            (vec![Ace, Ace, King, Queen, Jack], MAX_TWO_PAIR + 1),
            (vec![Deuce, Deuce, Five, Four, Trey], MAX_PAIR),
        ];

        for (ranks, expected) in cases {
            let rank = table.unsuited_rank(unsuited_key(&ranks));
            assert_eq!(rank, Some(HandRank(expected)), "ranks {ranks:?}");
        }
    }

    #[test]
    fn test_hand_rank_domain() {
        assert_eq!(HandRank::new(0), Err(EvalError::InvalidHandRank(0)));
        assert_eq!(HandRank::new(7463), Err(EvalError::InvalidHandRank(7463)));

        let rank = HandRank::new(1).unwrap();
        assert_eq!(rank.get(), 1);
        assert_eq!(rank, HandRank::BEST);
        assert_eq!(HandRank::new(7462).unwrap(), HandRank::WORST);
        assert!(HandRank::BEST < HandRank::WORST);
    }

    #[test]
    fn test_rank_classes() {
        let classes = [
            (1, RankClass::RoyalFlush),
            (2, RankClass::StraightFlush),
            (10, RankClass::StraightFlush),
            (11, RankClass::FourOfAKind),
            (166, RankClass::FourOfAKind),
            (167, RankClass::FullHouse),
            (322, RankClass::FullHouse),
            (323, RankClass::Flush),
            (1599, RankClass::Flush),
            (1600, RankClass::Straight),
            (1609, RankClass::Straight),
            (1610, RankClass::ThreeOfAKind),
            (2467, RankClass::ThreeOfAKind),
            (2468, RankClass::TwoPair),
            (3325, RankClass::TwoPair),
            (3326, RankClass::OnePair),
            (6185, RankClass::OnePair),
            (6186, RankClass::HighCard),
            (7462, RankClass::HighCard),
        ];

        for (value, class) in classes {
            let rank = HandRank::new(value).unwrap();
            assert_eq!(rank.class(), class, "rank {value}");
        }
    }

    #[test]
    fn test_rank_class_names() {
        assert_eq!(RankClass::RoyalFlush.to_string(), "Royal Flush");
        assert_eq!(RankClass::FourOfAKind.to_string(), "Four of a Kind");
        assert_eq!(RankClass::OnePair.to_string(), "Pair");
        assert_eq!(RankClass::HighCard.to_string(), "High Card");
    }
}
