//! Card types, token encoding, and ordering.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt;
use core::str::FromStr;

use crate::error::ParseError;

/// Lowest rank of a numbered card.
pub const MIN_RANK: u8 = 3;

/// Highest rank of a numbered card.
pub const MAX_RANK: u8 = 13;

/// Number of distinct ranks.
pub const RANK_COUNT: usize = (MAX_RANK - MIN_RANK + 1) as usize;

/// Number of distinct card values (every rank in every suit, plus the joker).
pub const CARD_KINDS: usize = Suit::COUNT * RANK_COUNT + 1;

/// Token used for the joker.
pub const JOKER_TOKEN: &str = "*";

/// Separator between tokens in an encoded sequence.
pub const SEQUENCE_SEPARATOR: char = ':';

const JOKER_INDEX: u8 = (CARD_KINDS - 1) as u8;

/// Card suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Suit {
    /// Blue (`B`).
    Blue,
    /// Red (`R`).
    Red,
    /// Yellow (`Y`).
    Yellow,
    /// Black (`X`).
    Black,
    /// Green (`G`).
    Green,
}

impl Suit {
    /// Number of suits.
    pub const COUNT: usize = 5;

    /// All suits in deck order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Blue,
        Self::Red,
        Self::Yellow,
        Self::Black,
        Self::Green,
    ];

    /// Returns the letter used for this suit in card tokens.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::Blue => 'B',
            Self::Red => 'R',
            Self::Yellow => 'Y',
            Self::Black => 'X',
            Self::Green => 'G',
        }
    }

    /// Parses a suit letter.
    #[must_use]
    pub const fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'B' => Some(Self::Blue),
            'R' => Some(Self::Red),
            'Y' => Some(Self::Yellow),
            'X' => Some(Self::Black),
            'G' => Some(Self::Green),
            _ => None,
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

// Suits sort by their token letter.
impl Ord for Suit {
    fn cmp(&self, other: &Self) -> Ordering {
        self.letter().cmp(&other.letter())
    }
}

impl PartialOrd for Suit {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// A playing card: a numbered card of rank 3..=13 in one of five suits, or a
/// joker.
///
/// A card is a dense index into the [`CARD_KINDS`] distinct values, so it is
/// always valid once constructed.
///
/// Cards order numbered cards first (by suit letter, then rank) and jokers last.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card(u8);

impl Card {
    /// The joker.
    pub const JOKER: Self = Self(JOKER_INDEX);

    /// Creates a numbered card.
    ///
    /// Returns `None` if the rank is outside 3..=13.
    #[must_use]
    pub const fn new(rank: u8, suit: Suit) -> Option<Self> {
        if rank < MIN_RANK || rank > MAX_RANK {
            return None;
        }
        Some(Self((suit.index() * RANK_COUNT) as u8 + (rank - MIN_RANK)))
    }

    /// Returns whether this card is the joker.
    #[must_use]
    pub const fn is_joker(self) -> bool {
        self.0 == JOKER_INDEX
    }

    /// Returns the rank, or `None` for the joker.
    #[must_use]
    pub const fn rank(self) -> Option<u8> {
        if self.is_joker() {
            None
        } else {
            Some(self.0 % RANK_COUNT as u8 + MIN_RANK)
        }
    }

    /// Returns the suit, or `None` for the joker.
    #[must_use]
    pub const fn suit(self) -> Option<Suit> {
        if self.is_joker() {
            None
        } else {
            Some(Suit::ALL[self.0 as usize / RANK_COUNT])
        }
    }

    /// Dense index in `0..CARD_KINDS`.
    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }

    /// Inverse of [`Card::index`]. The caller guarantees `index < CARD_KINDS`.
    pub(crate) const fn from_index(index: usize) -> Self {
        Self(index as u8)
    }

    /// Encodes the card as a token, e.g. `"10-R"` or `"*"`.
    #[must_use]
    pub fn encode(self) -> String {
        self.to_string()
    }
}

impl Ord for Card {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.suit(), other.suit()) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(a), Some(b)) => a.cmp(&b).then_with(|| self.rank().cmp(&other.rank())),
        }
    }
}

impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.rank(), self.suit()) {
            (Some(rank), Some(suit)) => write!(f, "{rank}-{suit}"),
            _ => f.write_str(JOKER_TOKEN),
        }
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Card({self})")
    }
}

impl FromStr for Card {
    type Err = ParseError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        decode(token)
    }
}

/// Decodes a card token such as `"7-R"` or `"*"`.
///
/// # Errors
///
/// Returns a [`ParseError`] if the token is empty, the rank is not a number
/// in 3..=13, or the suit is not one of `B`, `R`, `Y`, `X`, `G`.
///
/// The rank must be plain ASCII digits. Leading zeros are accepted (`"07-R"`
/// is `7-R`), but a sign is not: `"+7-R"` is rejected even though some
/// integer parsers would take it.
///
/// # Example
///
/// ```
/// use meldrs::card::{decode, Suit};
///
/// let card = decode("7-R").unwrap();
/// assert_eq!(card.rank(), Some(7));
/// assert_eq!(card.suit(), Some(Suit::Red));
/// assert!(decode("2-R").is_err());
/// ```
pub fn decode(token: &str) -> Result<Card, ParseError> {
    if token.is_empty() {
        return Err(ParseError::Empty);
    }
    if token == JOKER_TOKEN {
        return Ok(Card::JOKER);
    }

    let (rank_part, suit_part) = token.split_once('-').unwrap_or((token, ""));

    let invalid_rank = || ParseError::InvalidRank {
        token: token.to_string(),
    };
    if !rank_part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid_rank());
    }
    let rank: u32 = rank_part.parse().map_err(|_| invalid_rank())?;
    if rank < u32::from(MIN_RANK) || rank > u32::from(MAX_RANK) {
        return Err(ParseError::RankOutOfRange {
            token: token.to_string(),
            rank,
        });
    }

    let mut letters = suit_part.chars();
    let suit = match (letters.next(), letters.next()) {
        (Some(letter), None) => Suit::from_letter(letter),
        _ => None,
    }
    .ok_or_else(|| ParseError::InvalidSuit {
        token: token.to_string(),
    })?;

    Card::new(rank as u8, suit).ok_or_else(|| ParseError::RankOutOfRange {
        token: token.to_string(),
        rank,
    })
}

/// Encodes a card as a token. Inverse of [`decode`].
#[must_use]
pub fn encode(card: Card) -> String {
    card.encode()
}

/// Decodes a `:`-separated sequence such as `"10-R:*:8-Y"`.
///
/// Empty segments are ignored, so `""` decodes to an empty sequence.
///
/// # Errors
///
/// Returns the [`ParseError`] of the first malformed token.
pub fn decode_sequence(encoded: &str) -> Result<Vec<Card>, ParseError> {
    encoded
        .split(SEQUENCE_SEPARATOR)
        .filter(|segment| !segment.is_empty())
        .map(decode)
        .collect()
}

/// Encodes cards as a `:`-separated sequence.
#[must_use]
pub fn encode_sequence(cards: &[Card]) -> String {
    let mut out = String::new();
    for (i, card) in cards.iter().enumerate() {
        if i != 0 {
            out.push(SEQUENCE_SEPARATOR);
        }
        out.push_str(&card.encode());
    }
    out
}

/// Decodes a list of tokens.
///
/// # Errors
///
/// Returns the [`ParseError`] of the first malformed token.
pub fn decode_cards<S: AsRef<str>>(tokens: &[S]) -> Result<Vec<Card>, ParseError> {
    tokens.iter().map(|token| decode(token.as_ref())).collect()
}

/// Encodes cards as a list of tokens.
#[must_use]
pub fn encode_cards(cards: &[Card]) -> Vec<String> {
    cards.iter().map(|card| card.encode()).collect()
}

#[cfg(feature = "serde")]
impl serde::Serialize for Card {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Card {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = <String as serde::Deserialize>::deserialize(deserializer)?;
        decode(&token).map_err(serde::de::Error::custom)
    }
}
