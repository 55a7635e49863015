//! Search configuration options.

use crate::deck::DECK_SIZE;
use crate::error::ConfigError;
use crate::meld::MIN_MELD_LEN;

/// Largest accepted [`SearchOptions::max_melds`]: the most melds a full deck
/// could ever be split into.
pub const MAX_MELDS_LIMIT: usize = DECK_SIZE / MIN_MELD_LEN;

/// Configuration options for the decomposition search.
///
/// Use the builder pattern to customize options:
///
/// ```
/// use meldrs::SearchOptions;
///
/// let options = SearchOptions::default()
///     .with_max_melds(3)
///     .with_memoize(false)
///     .with_node_limit(Some(10_000));
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SearchOptions {
    /// Maximum number of melds in one decomposition.
    pub max_melds: usize,
    /// Whether subtree results are memoized by remaining cards and melds
    /// still allowed. Results are identical either way.
    pub memoize: bool,
    /// Maximum number of search nodes to expand. `None` searches exhaustively.
    ///
    /// Once the budget is spent, unexpanded nodes are scored as they stand, so
    /// the result is the best decomposition seen so far.
    pub node_limit: Option<u64>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            max_melds: 2,
            memoize: true,
            node_limit: None,
        }
    }
}

impl SearchOptions {
    /// Sets the maximum number of melds.
    ///
    /// # Example
    ///
    /// ```
    /// use meldrs::SearchOptions;
    ///
    /// let options = SearchOptions::default().with_max_melds(4);
    /// assert_eq!(options.max_melds, 4);
    /// ```
    #[must_use]
    pub const fn with_max_melds(mut self, max_melds: usize) -> Self {
        self.max_melds = max_melds;
        self
    }

    /// Sets whether subtree results are memoized.
    ///
    /// # Example
    ///
    /// ```
    /// use meldrs::SearchOptions;
    ///
    /// let options = SearchOptions::default().with_memoize(false);
    /// assert!(!options.memoize);
    /// ```
    #[must_use]
    pub const fn with_memoize(mut self, memoize: bool) -> Self {
        self.memoize = memoize;
        self
    }

    /// Sets the node budget.
    ///
    /// # Example
    ///
    /// ```
    /// use meldrs::SearchOptions;
    ///
    /// let options = SearchOptions::default().with_node_limit(Some(500));
    /// assert_eq!(options.node_limit, Some(500));
    /// ```
    #[must_use]
    pub const fn with_node_limit(mut self, node_limit: Option<u64>) -> Self {
        self.node_limit = node_limit;
        self
    }

    /// Checks the options before a search starts.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MaxMeldsTooLarge`] if `max_melds` exceeds
    /// [`MAX_MELDS_LIMIT`], or [`ConfigError::ZeroNodeLimit`] for a node limit
    /// of zero.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.max_melds > MAX_MELDS_LIMIT {
            return Err(ConfigError::MaxMeldsTooLarge {
                max_melds: self.max_melds,
                limit: MAX_MELDS_LIMIT,
            });
        }
        if matches!(self.node_limit, Some(0)) {
            return Err(ConfigError::ZeroNodeLimit);
        }
        Ok(())
    }
}
