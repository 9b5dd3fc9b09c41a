// Copyright (C) 2025 The runout authors
// SPDX-License-Identifier: Apache-2.0

//! Poker cards definitions.
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr, sync::LazyLock};
use thiserror::Error;

/// Primes used to encode a card rank.
const PRIMES: [u32; 13] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41];

/// A Poker card.
///
/// A card is represented using the encoding in the [Cactus Kev's][kevlink] Poker
/// hand evaluator with each card having the following format:
///
/// ```text
///   +--------+--------+--------+--------+
///   |xxxbbbbb|bbbbbbbb|cdhsrrrr|xxpppppp|
///   +--------+--------+--------+--------+
///   p = prime number of rank (deuce=2,trey=3,four=5,five=7,...,ace=41)
///   r = rank of card (deuce=0,trey=1,four=2,five=3,...,ace=12)
///   cdhs = suit of card
///   b = bit turned on depending on rank of card
/// ```
///
/// [kevlink]: http://suffe.cool/poker/evaluator.html
#[derive(Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Card(u32);

impl Card {
    /// Creates a card given a rank and a suit.
    pub fn new(rank: Rank, suit: Suit) -> Card {
        let (rank, suit) = (rank as u32, suit as u32);
        Self(PRIMES[rank as usize] | (rank << 8) | (suit << 12) | (1 << (rank + 16)))
    }

    /// This card unique id.
    pub fn id(&self) -> u32 {
        self.0
    }

    /// Returns the card suit.
    pub fn suit(&self) -> Suit {
        match self.suit_bits() {
            0x8 => Suit::Clubs,
            0x4 => Suit::Diamonds,
            0x2 => Suit::Hearts,
            0x1 => Suit::Spades,
            _ => panic!("Invalid suit value 0x{:x}", self.0),
        }
    }

    /// Returns the card rank.
    pub fn rank(&self) -> Rank {
        match self.rank_bits() {
            0 => Rank::Deuce,
            1 => Rank::Trey,
            2 => Rank::Four,
            3 => Rank::Five,
            4 => Rank::Six,
            5 => Rank::Seven,
            6 => Rank::Eight,
            7 => Rank::Nine,
            8 => Rank::Ten,
            9 => Rank::Jack,
            10 => Rank::Queen,
            11 => Rank::King,
            12 => Rank::Ace,
            _ => panic!("Invalid rank 0x{:x}", self.0),
        }
    }

    /// Returns the rank bits.
    #[inline]
    pub fn rank_bits(&self) -> u8 {
        ((self.0 >> 8) & 0xf) as u8
    }

    /// Returns the suit bits.
    #[inline]
    pub fn suit_bits(&self) -> u8 {
        ((self.0 >> 12) & 0xf) as u8
    }

    /// Returns the rank prime weight stored in the low 6 bits.
    #[inline]
    pub fn prime_bits(&self) -> u32 {
        self.0 & 0x3F
    }

    /// Formats the card with its Unicode suit symbol, `[A♠]` for the ace
    /// of spades.
    pub fn pretty(&self) -> String {
        format!("[{}{}]", self.rank(), self.suit().symbol())
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank(), self.suit())
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Card({}{})", self.rank(), self.suit())
    }
}

impl FromStr for Card {
    type Err = ParseCardError;

    /// Parses a card from a rank and a suit character, `"As"` for the ace
    /// of spades, `"Td"` for the ten of diamonds. Characters may be in
    /// either case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(rank), Some(suit), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(ParseCardError::InvalidNotation(s.to_string()));
        };

        Ok(Card::new(Rank::try_from(rank)?, Suit::try_from(suit)?))
    }
}

/// Errors from parsing card notation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseCardError {
    /// The notation is not a two characters rank and suit.
    #[error("card notation must be a rank and a suit, got {0:?}")]
    InvalidNotation(String),
    /// The rank character is not one of `23456789TJQKA`.
    #[error("invalid rank character {0:?}")]
    InvalidRank(char),
    /// The suit character is not one of `shdc`.
    #[error("invalid suit character {0:?}")]
    InvalidSuit(char),
}

/// Card rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rank {
    /// Deuce
    Deuce = 0,
    /// Trey
    Trey,
    /// Four
    Four,
    /// Five
    Five,
    /// Six
    Six,
    /// Seven
    Seven,
    /// Eight
    Eight,
    /// Nine
    Nine,
    /// Ten
    Ten,
    /// Jack
    Jack,
    /// Queen
    Queen,
    /// King
    King,
    /// Ace
    Ace,
}

impl Rank {
    /// Returns all ranks.
    pub fn ranks() -> impl DoubleEndedIterator<Item = Rank> {
        use Rank::*;
        [
            Deuce, Trey, Four, Five, Six, Seven, Eight, Nine, Ten, Jack, Queen, King, Ace,
        ]
        .into_iter()
    }

    /// The prime weight assigned to this rank.
    pub fn prime(self) -> u32 {
        PRIMES[self as usize]
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rank = match self {
            Rank::Deuce => '2',
            Rank::Trey => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
        };

        write!(f, "{rank}")
    }
}

impl TryFrom<char> for Rank {
    type Error = ParseCardError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        let rank = match c.to_ascii_uppercase() {
            '2' => Rank::Deuce,
            '3' => Rank::Trey,
            '4' => Rank::Four,
            '5' => Rank::Five,
            '6' => Rank::Six,
            '7' => Rank::Seven,
            '8' => Rank::Eight,
            '9' => Rank::Nine,
            'T' => Rank::Ten,
            'J' => Rank::Jack,
            'Q' => Rank::Queen,
            'K' => Rank::King,
            'A' => Rank::Ace,
            _ => return Err(ParseCardError::InvalidRank(c)),
        };

        Ok(rank)
    }
}

/// Card suit.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Suit {
    /// Clubs suit.
    Clubs = 8,
    /// Diamonds suit.
    Diamonds = 4,
    /// Hearts suit.
    Hearts = 2,
    /// Spades suit.
    Spades = 1,
}

impl Suit {
    /// Returns all suits.
    pub fn suits() -> impl DoubleEndedIterator<Item = Suit> {
        [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades].into_iter()
    }

    /// The Unicode symbol for this suit.
    pub fn symbol(self) -> char {
        match self {
            Suit::Clubs => '♣',
            Suit::Diamonds => '♦',
            Suit::Hearts => '♥',
            Suit::Spades => '♠',
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suit = match self {
            Suit::Clubs => 'C',
            Suit::Diamonds => 'D',
            Suit::Hearts => 'H',
            Suit::Spades => 'S',
        };

        write!(f, "{suit}")
    }
}

impl TryFrom<char> for Suit {
    type Error = ParseCardError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        let suit = match c.to_ascii_lowercase() {
            'c' => Suit::Clubs,
            'd' => Suit::Diamonds,
            'h' => Suit::Hearts,
            's' => Suit::Spades,
            _ => return Err(ParseCardError::InvalidSuit(c)),
        };

        Ok(suit)
    }
}

/// The full deck in suit major order, built once and never mutated.
static FULL_DECK: LazyLock<[Card; Deck::SIZE]> = LazyLock::new(|| {
    let mut cards = [Card::new(Rank::Deuce, Suit::Clubs); Deck::SIZE];
    let mut pos = 0;
    for suit in Suit::suits() {
        for rank in Rank::ranks() {
            cards[pos] = Card::new(rank, suit);
            pos += 1;
        }
    }
    cards
});

/// A cards deck.
///
/// The deck owns the generator used for shuffling, callers that need
/// reproducible deals create it with [Deck::with_seed] or [Deck::with_rng].
#[derive(Debug)]
pub struct Deck {
    cards: Vec<Card>,
    rng: SmallRng,
}

impl Deck {
    /// The number of cards in a full deck.
    pub const SIZE: usize = 52;

    /// Creates a full ordered deck with a generator seeded from OS entropy.
    pub fn new() -> Self {
        Self::with_rng(SmallRng::from_os_rng())
    }

    /// Creates a full ordered deck with a generator seeded from `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(SmallRng::seed_from_u64(seed))
    }

    /// Creates a full ordered deck that shuffles with the given generator.
    pub fn with_rng(rng: SmallRng) -> Self {
        Self {
            cards: FULL_DECK.to_vec(),
            rng,
        }
    }

    /// All 52 cards in deck order.
    pub fn all_cards() -> &'static [Card; Self::SIZE] {
        &FULL_DECK
    }

    /// Shuffles the deck with its owned generator.
    pub fn shuffle(&mut self) {
        self.cards.shuffle(&mut self.rng);
    }

    /// Draws the last `n` cards from the deck.
    ///
    /// Fails with [DeckError::InsufficientCards] when fewer than `n` cards
    /// remain, leaving the deck untouched.
    pub fn draw(&mut self, n: usize) -> Result<Vec<Card>, DeckError> {
        if n > self.cards.len() {
            return Err(DeckError::InsufficientCards {
                requested: n,
                available: self.cards.len(),
            });
        }

        let at = self.cards.len() - n;
        Ok(self.cards.split_off(at))
    }

    /// Removes the given cards from the deck.
    pub fn remove_cards(&mut self, cards: &[Card]) {
        self.cards.retain(|c| !cards.contains(c));
    }

    /// The cards left in the deck.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Checks if the deck is empty.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Number of cards left in the deck.
    pub fn count(&self) -> usize {
        self.cards.len()
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

impl IntoIterator for Deck {
    type Item = Card;
    type IntoIter = std::vec::IntoIter<Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.into_iter()
    }
}

/// Errors from deck operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DeckError {
    /// A draw requested more cards than the deck holds.
    #[error("cannot draw {requested} cards, {available} left in the deck")]
    InsufficientCards {
        /// Number of cards requested by the draw.
        requested: usize,
        /// Number of cards left in the deck.
        available: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use ahash::HashSet;

    #[test]
    fn card_encoding() {
        let mut cards = HashSet::default();

        for card in Deck::all_cards() {
            assert_eq!(card.id() & 0xFF, PRIMES[card.rank() as usize]);
            assert_eq!((card.id() >> 8) & 0xF, card.rank() as u32);
            assert_eq!((card.id() >> 12) & 0xF, card.suit() as u32);
            assert_eq!(card.id() >> 16, 1 << (card.rank() as usize));
            assert_eq!(card.prime_bits(), card.rank().prime());
            cards.insert(card.id());
        }

        // Check uniquness.
        assert_eq!(cards.len(), Deck::SIZE);

        // From the Cactus Kev's website.
        let kd = Card::new(Rank::King, Suit::Diamonds);
        assert_eq!(kd.id(), 0x08004b25);

        let fs = Card::new(Rank::Five, Suit::Spades);
        assert_eq!(fs.id(), 0x00081307);

        let jc = Card::new(Rank::Jack, Suit::Clubs);
        assert_eq!(jc.id(), 0x0200891d);
    }

    #[test]
    fn card_to_string() {
        let c = Card::new(Rank::King, Suit::Diamonds);
        assert_eq!(c.to_string(), "KD");

        let c = Card::new(Rank::Five, Suit::Spades);
        assert_eq!(c.to_string(), "5S");

        let c = Card::new(Rank::Jack, Suit::Clubs);
        assert_eq!(c.to_string(), "JC");

        let c = Card::new(Rank::Ten, Suit::Hearts);
        assert_eq!(c.to_string(), "TH");

        let c = Card::new(Rank::Ace, Suit::Hearts);
        assert_eq!(c.to_string(), "AH");
    }

    #[test]
    fn card_pretty() {
        let c = Card::new(Rank::Ace, Suit::Spades);
        assert_eq!(c.pretty(), "[A♠]");

        let c = Card::new(Rank::King, Suit::Diamonds);
        assert_eq!(c.pretty(), "[K♦]");

        let c = Card::new(Rank::Ten, Suit::Hearts);
        assert_eq!(c.pretty(), "[T♥]");

        let c = Card::new(Rank::Seven, Suit::Clubs);
        assert_eq!(c.pretty(), "[7♣]");
    }

    #[test]
    fn card_parsing() {
        let c: Card = "As".parse().unwrap();
        assert_eq!(c, Card::new(Rank::Ace, Suit::Spades));

        // Characters case is ignored.
        let c: Card = "kd".parse().unwrap();
        assert_eq!(c, Card::new(Rank::King, Suit::Diamonds));

        let c: Card = "TH".parse().unwrap();
        assert_eq!(c, Card::new(Rank::Ten, Suit::Hearts));

        // Display output parses back to the same card.
        for &card in Deck::all_cards() {
            assert_eq!(card.to_string().parse::<Card>().unwrap(), card);
        }

        assert_eq!(
            "".parse::<Card>(),
            Err(ParseCardError::InvalidNotation(String::new()))
        );
        assert_eq!(
            "A".parse::<Card>(),
            Err(ParseCardError::InvalidNotation("A".to_string()))
        );
        assert_eq!(
            "Asx".parse::<Card>(),
            Err(ParseCardError::InvalidNotation("Asx".to_string()))
        );
        assert_eq!("1s".parse::<Card>(), Err(ParseCardError::InvalidRank('1')));
        assert_eq!("Ax".parse::<Card>(), Err(ParseCardError::InvalidSuit('x')));
    }

    #[test]
    fn deck_draw() {
        let mut deck = Deck::with_seed(42);
        deck.shuffle();

        let hole = deck.draw(2).unwrap();
        assert_eq!(hole.len(), 2);
        assert_eq!(deck.count(), 50);

        let board = deck.draw(5).unwrap();
        assert_eq!(board.len(), 5);
        assert_eq!(deck.count(), 45);

        // Drawn cards are no longer in the deck.
        for card in hole.iter().chain(board.iter()) {
            assert!(!deck.cards().contains(card));
        }

        // A draw past the remaining cards fails and leaves the deck alone.
        assert_eq!(
            deck.draw(46),
            Err(DeckError::InsufficientCards {
                requested: 46,
                available: 45,
            })
        );
        assert_eq!(deck.count(), 45);
    }

    #[test]
    fn deck_draw_order() {
        // An unshuffled deck draws from the end in deck order.
        let mut deck = Deck::with_seed(0);
        let cards = deck.draw(2).unwrap();
        assert_eq!(cards[0], Card::new(Rank::King, Suit::Spades));
        assert_eq!(cards[1], Card::new(Rank::Ace, Suit::Spades));
    }

    #[test]
    fn deck_shuffle_seeded() {
        let mut d1 = Deck::with_seed(42);
        let mut d2 = Deck::with_seed(42);
        d1.shuffle();
        d2.shuffle();
        assert_eq!(d1.cards(), d2.cards());

        let mut d3 = Deck::with_seed(7);
        d3.shuffle();
        assert_ne!(d1.cards(), d3.cards());
    }

    #[test]
    fn deck_remove_cards() {
        let mut deck = Deck::with_seed(0);
        let removed = [
            Card::new(Rank::Ace, Suit::Diamonds),
            Card::new(Rank::King, Suit::Diamonds),
        ];

        deck.remove_cards(&removed);
        assert_eq!(deck.count(), 50);
        for card in &removed {
            assert!(!deck.cards().contains(card));
        }

        // Removing again is a no-op.
        deck.remove_cards(&removed);
        assert_eq!(deck.count(), 50);
    }

    #[test]
    fn full_deck_constant() {
        let cards = Deck::all_cards();
        assert_eq!(cards.len(), Deck::SIZE);
        assert_eq!(
            cards.iter().collect::<HashSet<_>>().len(),
            Deck::SIZE,
            "all cards are distinct"
        );
        assert_eq!(Deck::new().cards(), cards.as_slice());
    }
}
