//! Deck construction and seeded shuffling.

use alloc::vec::Vec;

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

use crate::card::{Card, MAX_RANK, MIN_RANK, RANK_COUNT, Suit};

/// Copies of each numbered card in a full deck.
pub const COPIES_PER_CARD: usize = 2;

/// Jokers in a full deck.
pub const JOKERS_PER_DECK: usize = 6;

/// Number of cards in a full (double) deck.
pub const DECK_SIZE: usize = Suit::COUNT * RANK_COUNT * COPIES_PER_CARD + JOKERS_PER_DECK;

/// Number of cards in a deck of unique card values.
pub const UNIQUE_DECK_SIZE: usize = Suit::COUNT * RANK_COUNT + 1;

/// Builds a deck in a fixed order.
///
/// A full deck holds two copies of every numbered card and six jokers. With
/// `unique` set it holds each distinct card value once, including a single
/// joker.
///
/// Cards are laid out suit by suit in [`Suit::ALL`] order, ranks ascending,
/// with the jokers last.
///
/// # Example
///
/// ```
/// use meldrs::deck::{new_deck, DECK_SIZE, UNIQUE_DECK_SIZE};
///
/// assert_eq!(new_deck(false).len(), DECK_SIZE);
/// assert_eq!(new_deck(true).len(), UNIQUE_DECK_SIZE);
/// ```
#[must_use]
pub fn new_deck(unique: bool) -> Vec<Card> {
    let (copies, jokers) = if unique {
        (1, 1)
    } else {
        (COPIES_PER_CARD, JOKERS_PER_DECK)
    };

    let mut cards = Vec::with_capacity(Suit::COUNT * RANK_COUNT * copies + jokers);

    for suit in Suit::ALL {
        for rank in MIN_RANK..=MAX_RANK {
            let Some(card) = Card::new(rank, suit) else {
                continue;
            };
            for _ in 0..copies {
                cards.push(card);
            }
        }
    }

    cards.extend(core::iter::repeat_n(Card::JOKER, jokers));
    cards
}

/// Returns a permutation of `cards` determined by `seed`.
///
/// The permutation is a Fisher-Yates shuffle driven by a `ChaCha8` generator, so
/// the same seed and input always produce the same order.
///
/// # Example
///
/// ```
/// use meldrs::deck::{new_deck, shuffle};
///
/// let deck = new_deck(false);
/// assert_eq!(shuffle(&deck, 123), shuffle(&deck, 123));
/// ```
#[must_use]
pub fn shuffle(cards: &[Card], seed: u64) -> Vec<Card> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut shuffled = cards.to_vec();
    shuffled.shuffle(&mut rng);
    shuffled
}

/// Builds a full deck and shuffles it with `seed`.
#[must_use]
pub fn shuffled_deck(seed: u64) -> Vec<Card> {
    shuffle(&new_deck(false), seed)
}
