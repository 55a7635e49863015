//! Runs and sets.

use alloc::vec::Vec;
use core::fmt;

use crate::card::{Card, Suit, encode_sequence};
use crate::error::MeldError;
use crate::scoring::score_sequence;

/// Smallest number of cards in a meld.
pub const MIN_MELD_LEN: usize = 3;

/// Kind of meld.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MeldKind {
    /// Consecutive ranks in one suit.
    Run,
    /// One rank in pairwise distinct suits.
    Set,
}

/// A validated meld. Cards are kept in ascending card order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Meld {
    kind: MeldKind,
    cards: Vec<Card>,
}

impl Meld {
    /// Validates cards as a run or a set.
    ///
    /// # Errors
    ///
    /// Returns a [`MeldError`] if there are fewer than three cards, a joker is
    /// present, or the cards form neither a run nor a set.
    ///
    /// # Example
    ///
    /// ```
    /// use meldrs::card::decode_sequence;
    /// use meldrs::meld::{Meld, MeldKind};
    ///
    /// let meld = Meld::new(decode_sequence("9-R:7-R:8-R").unwrap()).unwrap();
    /// assert_eq!(meld.kind(), MeldKind::Run);
    /// assert_eq!(meld.to_string(), "7-R:8-R:9-R");
    /// ```
    pub fn new(mut cards: Vec<Card>) -> Result<Self, MeldError> {
        if cards.len() < MIN_MELD_LEN {
            return Err(MeldError::TooShort { len: cards.len() });
        }
        if cards.iter().any(|card| card.is_joker()) {
            return Err(MeldError::ContainsJoker);
        }
        cards.sort_unstable();
        let kind = classify_sorted(&cards).ok_or(MeldError::NotRunOrSet)?;
        Ok(Self { kind, cards })
    }

    /// Builds a meld from cards already known to be a sorted run or set.
    pub(crate) const fn from_sorted(kind: MeldKind, cards: Vec<Card>) -> Self {
        Self { kind, cards }
    }

    /// Returns the kind of meld.
    #[must_use]
    pub const fn kind(&self) -> MeldKind {
        self.kind
    }

    /// Returns the cards in ascending order.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Returns the number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Always `false`; a meld holds at least three cards.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Returns the point value of the meld's cards.
    #[must_use]
    pub fn score(&self) -> u32 {
        score_sequence(&self.cards)
    }

    /// Returns the cards that could be taken out while leaving a valid meld:
    /// either end of a run, or any member of a set, once the meld is longer
    /// than the minimum.
    #[must_use]
    pub fn spare_cards(&self) -> Vec<Card> {
        if self.cards.len() <= MIN_MELD_LEN {
            return Vec::new();
        }
        match self.kind {
            MeldKind::Set => self.cards.clone(),
            MeldKind::Run => self
                .cards
                .first()
                .into_iter()
                .chain(self.cards.last())
                .copied()
                .collect(),
        }
    }

    /// Consumes the meld and returns its cards.
    #[must_use]
    pub fn into_cards(self) -> Vec<Card> {
        self.cards
    }
}

impl fmt::Display for Meld {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode_sequence(&self.cards))
    }
}

/// Classifies cards as a run or a set, in any order.
///
/// Returns `None` if they are neither, including when fewer than three cards
/// are given or a joker is present.
#[must_use]
pub fn classify(cards: &[Card]) -> Option<MeldKind> {
    let mut sorted = cards.to_vec();
    sorted.sort_unstable();
    classify_sorted(&sorted)
}

/// Returns whether the cards form a run: three or more cards of one suit with
/// consecutive ranks.
#[must_use]
pub fn is_run(cards: &[Card]) -> bool {
    classify(cards) == Some(MeldKind::Run)
}

/// Returns whether the cards form a set: three or more cards of one rank with
/// pairwise distinct suits.
#[must_use]
pub fn is_set(cards: &[Card]) -> bool {
    classify(cards) == Some(MeldKind::Set)
}

fn classify_sorted(cards: &[Card]) -> Option<MeldKind> {
    if cards.len() < MIN_MELD_LEN {
        return None;
    }
    let faces: Vec<(u8, Suit)> = cards
        .iter()
        .map(|card| Some((card.rank()?, card.suit()?)))
        .collect::<Option<_>>()?;

    let same_suit = faces.windows(2).all(|w| w[0].1 == w[1].1);
    let consecutive = faces.windows(2).all(|w| w[1].0 == w[0].0 + 1);
    if same_suit && consecutive {
        return Some(MeldKind::Run);
    }

    // Sorted by suit, so distinct suits means no two neighbours share one.
    let same_rank = faces.windows(2).all(|w| w[0].0 == w[1].0);
    let distinct_suits = faces.windows(2).all(|w| w[0].1 != w[1].1);
    if same_rank && distinct_suits {
        return Some(MeldKind::Set);
    }

    None
}
