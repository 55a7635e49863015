//! Point values for cards and sequences.

use crate::card::Card;

/// Points a joker is worth when scored.
pub const JOKER_VALUE: u32 = 25;

/// Returns the point value of a card: its rank, or [`JOKER_VALUE`] for the
/// joker.
#[must_use]
pub const fn score_card(card: Card) -> u32 {
    match card.rank() {
        Some(rank) => rank as u32,
        None => JOKER_VALUE,
    }
}

/// Sums the point values of a sequence of cards.
///
/// # Example
///
/// ```
/// use meldrs::card::decode_sequence;
/// use meldrs::scoring::score_sequence;
///
/// assert_eq!(score_sequence(&[]), 0);
/// assert_eq!(score_sequence(&decode_sequence("*:*").unwrap()), 50);
/// assert_eq!(score_sequence(&decode_sequence("7-R:8-R:9-R").unwrap()), 24);
/// ```
#[must_use]
pub fn score_sequence(cards: &[Card]) -> u32 {
    cards.iter().map(|&card| score_card(card)).sum()
}
