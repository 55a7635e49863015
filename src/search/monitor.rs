//! Search monitors: observation and cooperative cancellation.

use alloc::vec::Vec;
use core::fmt;

use crate::card::Card;
use crate::hand::Hand;
use crate::meld::Meld;
use crate::result::SearchStatistics;

/// Instruction returned by a monitor after each node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchCommand {
    /// Keep searching.
    Continue,
    /// Stop expanding nodes; remaining nodes are scored as they stand.
    Stop,
}

impl fmt::Display for SearchCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Continue => write!(f, "Continue"),
            Self::Stop => write!(f, "Stop"),
        }
    }
}

/// Hooks called by the decomposition search.
///
/// Every hook except [`SearchMonitor::name`] has a no-op default.
pub trait SearchMonitor {
    /// Called once before the search begins.
    fn on_enter_search(&mut self, _hand: &Hand) {}

    /// Called each time a node is expanded. Returning
    /// [`SearchCommand::Stop`] ends the search early.
    fn on_node(&mut self, _stats: &SearchStatistics) -> SearchCommand {
        SearchCommand::Continue
    }

    /// Called when a leaf is scored, with the melds on the path to it.
    fn on_leaf(&mut self, _melds: &[Meld], _score: u32) {}

    /// Called when a leaf beats every leaf scored before it.
    fn on_improvement(&mut self, _melds: &[Meld], _score: u32) {}

    /// Called once when the search is finished, whether exhausted or stopped.
    fn on_exit_search(&mut self, _stats: &SearchStatistics) {}

    /// Returns the name of the monitor.
    fn name(&self) -> &str;
}

impl fmt::Debug for dyn SearchMonitor + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SearchMonitor({})", self.name())
    }
}

/// A monitor that observes nothing and never stops the search.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpMonitor;

impl SearchMonitor for NoOpMonitor {
    fn name(&self) -> &'static str {
        "NoOpMonitor"
    }
}

/// Stops the search once more than `limit` nodes have been expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeLimitMonitor {
    limit: u64,
}

impl NodeLimitMonitor {
    /// Creates a monitor allowing `limit` expanded nodes.
    #[must_use]
    pub const fn new(limit: u64) -> Self {
        Self { limit }
    }

    /// Returns the node limit.
    #[must_use]
    pub const fn limit(&self) -> u64 {
        self.limit
    }
}

impl SearchMonitor for NodeLimitMonitor {
    fn on_node(&mut self, stats: &SearchStatistics) -> SearchCommand {
        if stats.nodes > self.limit {
            SearchCommand::Stop
        } else {
            SearchCommand::Continue
        }
    }

    fn name(&self) -> &'static str {
        "NodeLimitMonitor"
    }
}

/// A structured search event recorded by [`EventLog`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEvent {
    /// The search started on these cards.
    Enter {
        /// The cards searched.
        cards: Vec<Card>,
    },
    /// A leaf was scored.
    Leaf {
        /// Melds on the path to the leaf.
        melds: usize,
        /// Deadwood score at the leaf.
        score: u32,
    },
    /// A new best leaf was found.
    Improvement {
        /// Melds on the path to the leaf.
        melds: Vec<Meld>,
        /// Deadwood score at the leaf.
        score: u32,
    },
    /// The search finished.
    Exit {
        /// Final counters.
        statistics: SearchStatistics,
    },
}

/// Records every search event in order.
///
/// Leaf events can be numerous; disable them with
/// [`EventLog::without_leaves`] when only improvements matter.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<SearchEvent>,
    skip_leaves: bool,
}

impl EventLog {
    /// Creates an empty log recording all events.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            events: Vec::new(),
            skip_leaves: false,
        }
    }

    /// Creates an empty log that ignores leaf events.
    #[must_use]
    pub const fn without_leaves() -> Self {
        Self {
            events: Vec::new(),
            skip_leaves: true,
        }
    }

    /// Returns the recorded events.
    #[must_use]
    pub fn events(&self) -> &[SearchEvent] {
        &self.events
    }

    /// Returns the improvements, oldest first.
    pub fn improvements(&self) -> impl Iterator<Item = (&[Meld], u32)> + '_ {
        self.events.iter().filter_map(|event| match event {
            SearchEvent::Improvement { melds, score } => Some((melds.as_slice(), *score)),
            _ => None,
        })
    }
}

impl SearchMonitor for EventLog {
    fn on_enter_search(&mut self, hand: &Hand) {
        self.events.push(SearchEvent::Enter {
            cards: hand.cards(),
        });
    }

    fn on_leaf(&mut self, melds: &[Meld], score: u32) {
        if !self.skip_leaves {
            self.events.push(SearchEvent::Leaf {
                melds: melds.len(),
                score,
            });
        }
    }

    fn on_improvement(&mut self, melds: &[Meld], score: u32) {
        self.events.push(SearchEvent::Improvement {
            melds: melds.to_vec(),
            score,
        });
    }

    fn on_exit_search(&mut self, stats: &SearchStatistics) {
        self.events.push(SearchEvent::Exit { statistics: *stats });
    }

    fn name(&self) -> &'static str {
        "EventLog"
    }
}
