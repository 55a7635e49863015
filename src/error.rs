//! Error types for parsing, configuration, and decisions.

use alloc::string::String;

use thiserror::Error;

/// Errors that can occur while decoding a card token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The token is empty.
    #[error("empty card token")]
    Empty,
    /// The rank part is missing or not a number.
    #[error("unable to decode rank in card token `{token}`")]
    InvalidRank {
        /// The offending token.
        token: String,
    },
    /// The rank is a number outside 3..=13.
    #[error("rank {rank} out of range in card token `{token}`")]
    RankOutOfRange {
        /// The offending token.
        token: String,
        /// The decoded rank.
        rank: u32,
    },
    /// The suit part is missing or not one of `B`, `R`, `Y`, `X`, `G`.
    #[error("invalid suit in card token `{token}`")]
    InvalidSuit {
        /// The offending token.
        token: String,
    },
}

/// Errors that reject a search configuration before the search starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// More melds were requested than any hand could hold.
    #[error("max melds {max_melds} exceeds the limit of {limit}")]
    MaxMeldsTooLarge {
        /// The requested meld count.
        max_melds: usize,
        /// The largest accepted meld count.
        limit: usize,
    },
    /// A node budget of zero would not allow the root to be scored.
    #[error("node limit must be at least 1")]
    ZeroNodeLimit,
}

/// Errors that can occur when validating a meld.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MeldError {
    /// Fewer than three cards.
    #[error("meld has {len} cards, at least 3 are required")]
    TooShort {
        /// The number of cards supplied.
        len: usize,
    },
    /// Jokers never take part in a meld.
    #[error("meld contains a joker")]
    ContainsJoker,
    /// The cards form neither a run nor a set.
    #[error("cards form neither a run nor a set")]
    NotRunOrSet,
}

/// Errors that can occur while answering a decision request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdviceError {
    /// A card token could not be decoded.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The search options are invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The hand holds no cards to discard.
    #[error("hand is empty")]
    EmptyHand,
    /// A draw decision needs a card on the discard pile.
    #[error("discard pile is empty")]
    EmptyDiscard,
}
