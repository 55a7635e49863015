//! A Rummy-style meld decomposition and deadwood scoring engine with optional
//! `no_std` support.
//!
//! Cards are numbered 3 to 13 in five suits, plus jokers. Given a hand, the
//! crate finds the runs and sets that leave the least deadwood, using at most a
//! configured number of melds. See [`search`] for the engine and [`advisor`]
//! for the draw, discard, and scoring decisions built on it.
//!
//! # Example
//!
//! ```
//! use meldrs::card::decode_sequence;
//! use meldrs::{Hand, SearchOptions, search};
//!
//! let cards = decode_sequence("3-B:3-R:3-Y:10-G").unwrap();
//! let best = search(&Hand::from_cards(&cards), &SearchOptions::default()).unwrap();
//! assert_eq!(best.melds[0].to_string(), "3-B:3-R:3-Y");
//! assert_eq!(best.score, 10);
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(all(not(feature = "std"), not(feature = "alloc")))]
compile_error!(
    "`std` is disabled but `alloc` feature is not enabled. Enable `alloc` or keep `std` enabled."
);

extern crate alloc;

pub mod advisor;
pub mod candidates;
pub mod card;
pub mod deck;
pub mod error;
pub mod hand;
pub mod meld;
pub mod options;
pub mod protocol;
pub mod result;
pub mod scoring;
pub mod search;

// Re-export main types
pub use candidates::candidates;
pub use card::{Card, Suit, decode, encode};
pub use deck::{DECK_SIZE, UNIQUE_DECK_SIZE, new_deck, shuffle};
pub use error::{AdviceError, ConfigError, MeldError, ParseError};
pub use hand::Hand;
pub use meld::{Meld, MeldKind};
pub use options::SearchOptions;
pub use result::{Decomposition, SearchReport, SearchStatistics};
pub use scoring::{JOKER_VALUE, score_card, score_sequence};
pub use search::{search, search_cards, search_with_monitor};
