//! Search result types.

extern crate alloc;

use alloc::vec::Vec;

use crate::card::Card;
use crate::meld::Meld;

/// A split of a hand into melds and leftover deadwood.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decomposition {
    /// Melds in the order they were chosen.
    pub melds: Vec<Meld>,
    /// Cards not placed in any meld, in card order.
    pub leftover: Vec<Card>,
    /// Deadwood score of the leftover cards.
    pub score: u32,
}

impl Decomposition {
    /// Returns the decomposition of an empty hand.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            melds: Vec::new(),
            leftover: Vec::new(),
            score: 0,
        }
    }

    /// Returns whether every card was placed in a meld.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.leftover.is_empty()
    }

    /// Returns the melds followed by each leftover card as a single-card
    /// sequence.
    #[must_use]
    pub fn sequences(&self) -> Vec<Vec<Card>> {
        self.melds
            .iter()
            .map(|meld| meld.cards().to_vec())
            .chain(self.leftover.iter().map(|&card| alloc::vec![card]))
            .collect()
    }
}

/// Counters collected while searching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchStatistics {
    /// Nodes expanded (memo hits excluded).
    pub nodes: u64,
    /// Leaves scored.
    pub leaves: u64,
    /// Subtrees answered from the memo table.
    pub memo_hits: u64,
    /// Whether the node budget or a monitor cut the search short.
    pub truncated: bool,
}

/// Result of a monitored search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchReport {
    /// The best decomposition found.
    pub decomposition: Decomposition,
    /// Search counters.
    pub statistics: SearchStatistics,
}
