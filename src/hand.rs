//! Multiset hand representation.

extern crate alloc;

use alloc::vec::Vec;

use crate::card::{CARD_KINDS, Card};
use crate::meld::Meld;
use crate::scoring::score_card;

/// A hand of cards stored as a count per distinct card value.
///
/// `Hand` is `Copy`: the search takes a private copy for every branch it
/// explores, so sibling branches never observe each other's removals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hand {
    /// Remaining copies per card index.
    counts: [u16; CARD_KINDS],
}

impl Hand {
    /// Creates an empty hand.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            counts: [0; CARD_KINDS],
        }
    }

    /// Creates a hand holding the given cards.
    ///
    /// Each card value holds at most `u16::MAX` copies; further copies are
    /// dropped, as in [`Hand::add`]. Real decks hold two copies of a card and
    /// six jokers, far below the cap.
    #[must_use]
    pub fn from_cards(cards: &[Card]) -> Self {
        cards.iter().copied().collect()
    }

    /// Adds one copy of a card.
    ///
    /// Counts saturate at `u16::MAX`: adding a card already held that many
    /// times leaves the hand unchanged.
    pub const fn add(&mut self, card: Card) {
        let count = &mut self.counts[card.index()];
        *count = count.saturating_add(1);
    }

    /// Removes one copy of a card.
    ///
    /// Returns `false`, leaving the hand unchanged, if the card is not held.
    pub const fn remove(&mut self, card: Card) -> bool {
        let count = &mut self.counts[card.index()];
        if *count == 0 {
            return false;
        }
        *count -= 1;
        true
    }

    /// Returns the number of copies of a card in the hand.
    #[must_use]
    pub const fn count(&self, card: Card) -> u16 {
        self.counts[card.index()]
    }

    /// Returns whether at least one copy of a card is held.
    #[must_use]
    pub const fn contains(&self, card: Card) -> bool {
        self.count(card) > 0
    }

    /// Returns whether every card of the meld is held.
    ///
    /// Melds never repeat a card, so one copy of each is enough.
    #[must_use]
    pub fn can_apply(&self, meld: &Meld) -> bool {
        meld.cards().iter().all(|&card| self.contains(card))
    }

    /// Returns a copy of this hand with the meld's cards removed, or `None` if
    /// the meld is not realizable from this hand.
    #[must_use]
    pub fn without_meld(&self, meld: &Meld) -> Option<Self> {
        if !self.can_apply(meld) {
            return None;
        }
        let mut next = *self;
        for &card in meld.cards() {
            next.counts[card.index()] -= 1;
        }
        Some(next)
    }

    /// Returns the total number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.iter().map(|&count| usize::from(count)).sum()
    }

    /// Returns whether the hand holds no cards.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&count| count == 0)
    }

    /// Returns the number of jokers held.
    #[must_use]
    pub const fn jokers(&self) -> u16 {
        self.count(Card::JOKER)
    }

    /// Iterates over held card values with their counts, in index order.
    pub fn iter(&self) -> impl Iterator<Item = (Card, u16)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(|(index, &count)| (Card::from_index(index), count))
    }

    /// Returns every card in the hand, one entry per copy, in card order.
    #[must_use]
    pub fn cards(&self) -> Vec<Card> {
        let mut cards: Vec<Card> = self
            .iter()
            .flat_map(|(card, count)| core::iter::repeat_n(card, usize::from(count)))
            .collect();
        cards.sort_unstable();
        cards
    }

    /// Returns the deadwood score of the hand: the sum of every remaining
    /// card's value, jokers included at their fixed value.
    #[must_use]
    pub fn deadwood_score(&self) -> u32 {
        self.iter()
            .map(|(card, count)| score_card(card) * u32::from(count))
            .sum()
    }
}

impl Default for Hand {
    fn default() -> Self {
        Self::new()
    }
}

/// Collects cards into a hand. Copies beyond `u16::MAX` of one card value are
/// dropped.
impl FromIterator<Card> for Hand {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        let mut hand = Self::new();
        hand.extend(iter);
        hand
    }
}

impl Extend<Card> for Hand {
    fn extend<I: IntoIterator<Item = Card>>(&mut self, iter: I) {
        for card in iter {
            self.add(card);
        }
    }
}
