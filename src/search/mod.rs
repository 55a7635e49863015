//! Deadwood-minimizing decomposition search.
//!
//! The search is a depth-bounded branch-and-bound over meld choices. Each node
//! asks [`candidates`] for the melds realizable from its remaining cards and
//! recurses on a private copy of the hand with each candidate removed. A node
//! with no candidates, or with no melds left to place, is a leaf scored by its
//! deadwood. Every node returns its best leaf: lowest score first, then the
//! most melds, then the first found.

use alloc::vec::Vec;
#[cfg(all(not(feature = "std"), feature = "alloc"))]
use hashbrown::HashMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

use crate::candidates::candidates;
use crate::card::Card;
use crate::error::ConfigError;
use crate::hand::Hand;
use crate::meld::Meld;
use crate::options::SearchOptions;
use crate::result::{Decomposition, SearchReport, SearchStatistics};

pub mod monitor;

pub use monitor::{
    EventLog, NoOpMonitor, NodeLimitMonitor, SearchCommand, SearchEvent, SearchMonitor,
};

/// Finds the decomposition of `hand` with the lowest deadwood score using at
/// most `options.max_melds` melds.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the options are invalid.
///
/// # Example
///
/// ```
/// use meldrs::card::decode_sequence;
/// use meldrs::{Hand, SearchOptions, search};
///
/// let cards = decode_sequence("7-R:8-R:9-R:5-B:5-R:5-Y").unwrap();
/// let best = search(&Hand::from_cards(&cards), &SearchOptions::default()).unwrap();
/// assert_eq!(best.melds.len(), 2);
/// assert_eq!(best.score, 0);
/// ```
pub fn search(hand: &Hand, options: &SearchOptions) -> Result<Decomposition, ConfigError> {
    search_with_monitor(hand, options, &mut NoOpMonitor).map(|report| report.decomposition)
}

/// Like [`search`], for a slice of cards.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the options are invalid.
pub fn search_cards(cards: &[Card], options: &SearchOptions) -> Result<Decomposition, ConfigError> {
    search(&Hand::from_cards(cards), options)
}

/// Runs the search, reporting progress to `monitor`, and returns the best
/// decomposition together with the search counters.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the options are invalid. The monitor is not
/// called in that case.
pub fn search_with_monitor<M>(
    hand: &Hand,
    options: &SearchOptions,
    monitor: &mut M,
) -> Result<SearchReport, ConfigError>
where
    M: SearchMonitor + ?Sized,
{
    options.validate()?;

    monitor.on_enter_search(hand);

    let mut searcher = Searcher::new(options, monitor);
    let best = searcher.explore(hand, options.max_melds);
    let statistics = searcher.stats;
    searcher.monitor.on_exit_search(&statistics);

    Ok(SearchReport {
        decomposition: Decomposition {
            melds: best.melds,
            leftover: best.remaining.cards(),
            score: best.score,
        },
        statistics,
    })
}

/// Best leaf of a subtree, with the melds chosen below the subtree root.
#[derive(Debug, Clone)]
struct Branch {
    melds: Vec<Meld>,
    remaining: Hand,
    score: u32,
}

impl Branch {
    fn beats(&self, other: &Self) -> bool {
        self.score < other.score
            || (self.score == other.score && self.melds.len() > other.melds.len())
    }
}

struct Searcher<'m, M: SearchMonitor + ?Sized> {
    monitor: &'m mut M,
    node_limit: Option<NodeLimitMonitor>,
    memo: Option<HashMap<(Hand, usize), Branch>>,
    stats: SearchStatistics,
    /// Melds chosen from the search root down to the current node.
    path: Vec<Meld>,
    /// Score and meld count of the best leaf reported so far.
    best_seen: Option<(u32, usize)>,
    stopped: bool,
}

impl<'m, M: SearchMonitor + ?Sized> Searcher<'m, M> {
    fn new(options: &SearchOptions, monitor: &'m mut M) -> Self {
        Self {
            monitor,
            node_limit: options.node_limit.map(NodeLimitMonitor::new),
            memo: options.memoize.then(HashMap::new),
            stats: SearchStatistics::default(),
            path: Vec::with_capacity(options.max_melds),
            best_seen: None,
            stopped: false,
        }
    }

    fn explore(&mut self, hand: &Hand, melds_left: usize) -> Branch {
        if let Some(hit) = self
            .memo
            .as_ref()
            .and_then(|memo| memo.get(&(*hand, melds_left)))
        {
            self.stats.memo_hits += 1;
            return hit.clone();
        }

        self.stats.nodes += 1;
        if !self.stopped && self.should_stop() {
            self.stopped = true;
            self.stats.truncated = true;
        }

        let choices = if melds_left == 0 || self.stopped {
            Vec::new()
        } else {
            candidates(hand)
        };

        let mut best: Option<Branch> = None;
        for meld in choices {
            let Some(next) = hand.without_meld(&meld) else {
                continue;
            };

            self.path.push(meld.clone());
            let mut child = self.explore(&next, melds_left - 1);
            self.path.pop();

            child.melds.insert(0, meld);
            if best.as_ref().is_none_or(|current| child.beats(current)) {
                best = Some(child);
            }
        }

        let best = best.unwrap_or_else(|| self.leaf(hand));

        // A truncated subtree is not the true optimum, so it is never reused.
        if !self.stopped {
            if let Some(memo) = self.memo.as_mut() {
                memo.insert((*hand, melds_left), best.clone());
            }
        }

        best
    }

    fn should_stop(&mut self) -> bool {
        let limited = self
            .node_limit
            .as_mut()
            .is_some_and(|limit| limit.on_node(&self.stats) == SearchCommand::Stop);
        limited || self.monitor.on_node(&self.stats) == SearchCommand::Stop
    }

    fn leaf(&mut self, hand: &Hand) -> Branch {
        self.stats.leaves += 1;
        let score = hand.deadwood_score();
        let depth = self.path.len();

        self.monitor.on_leaf(&self.path, score);
        let improved = self
            .best_seen
            .is_none_or(|(best, melds)| score < best || (score == best && depth > melds));
        if improved {
            self.best_seen = Some((score, depth));
            self.monitor.on_improvement(&self.path, score);
        }

        Branch {
            melds: Vec::new(),
            remaining: *hand,
            score,
        }
    }
}
