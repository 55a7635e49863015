//! Play decisions built on the decomposition search.
//!
//! These answer the three questions a player faces on a turn: how a hand
//! scores, which stack to draw from, and which card to throw away.

use alloc::vec::Vec;

use crate::card::Card;
use crate::error::{AdviceError, ConfigError};
use crate::hand::Hand;
use crate::meld::Meld;
use crate::options::SearchOptions;
use crate::protocol::Stack;
use crate::result::Decomposition;
use crate::scoring::score_card;
use crate::search::search;

/// How a hand scores when laid down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scoring {
    /// Melds followed by each deadwood card on its own.
    pub sequences: Vec<Vec<Card>>,
    /// Deadwood score.
    pub deadwood: u32,
    /// Whether every card is melded, so the hand can go out.
    pub flop: bool,
}

impl From<&Decomposition> for Scoring {
    fn from(decomposition: &Decomposition) -> Self {
        Self {
            sequences: decomposition.sequences(),
            deadwood: decomposition.score,
            flop: decomposition.is_complete(),
        }
    }
}

/// A discard decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discard {
    /// The card to throw away.
    pub card: Card,
    /// How the hand scores without that card.
    pub scoring: Scoring,
}

/// Scores a hand by its best decomposition.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the options are invalid.
///
/// # Example
///
/// ```
/// use meldrs::advisor::score_hand;
/// use meldrs::card::decode_sequence;
/// use meldrs::SearchOptions;
///
/// let hand = decode_sequence("3-B:3-R:3-Y:10-G").unwrap();
/// let scoring = score_hand(&hand, &SearchOptions::default()).unwrap();
/// assert_eq!(scoring.deadwood, 10);
/// assert!(!scoring.flop);
/// ```
pub fn score_hand(cards: &[Card], options: &SearchOptions) -> Result<Scoring, ConfigError> {
    let decomposition = search(&Hand::from_cards(cards), options)?;
    Ok(Scoring::from(&decomposition))
}

/// Chooses the stack to draw from.
///
/// The discard is taken only when it ends up in a meld, i.e. when holding it
/// scores lower than the current deadwood plus the card's own value.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the options are invalid.
pub fn choose_stack(
    cards: &[Card],
    top_discard: Card,
    options: &SearchOptions,
) -> Result<Stack, ConfigError> {
    let mut hand = Hand::from_cards(cards);
    let current = search(&hand, options)?.score;

    hand.add(top_discard);
    let with_discard = search(&hand, options)?.score;

    if with_discard < current + score_card(top_discard) {
        Ok(Stack::Discard)
    } else {
        Ok(Stack::Deck)
    }
}

/// Chooses the card to discard.
///
/// The highest-valued deadwood card goes first. With no deadwood, the
/// highest card that can leave its meld without breaking it is chosen, and
/// failing that the highest card in the hand.
///
/// # Errors
///
/// Returns [`AdviceError::EmptyHand`] for an empty hand, or
/// [`AdviceError::Config`] if the options are invalid.
pub fn choose_discard(cards: &[Card], options: &SearchOptions) -> Result<Discard, AdviceError> {
    let mut hand = Hand::from_cards(cards);
    if hand.is_empty() {
        return Err(AdviceError::EmptyHand);
    }

    let decomposition = search(&hand, options)?;
    let card = worst_card(&decomposition).ok_or(AdviceError::EmptyHand)?;

    hand.remove(card);
    let scoring = Scoring::from(&search(&hand, options)?);

    Ok(Discard { card, scoring })
}

fn worst_card(decomposition: &Decomposition) -> Option<Card> {
    highest(decomposition.leftover.iter().copied())
        .or_else(|| highest(decomposition.melds.iter().flat_map(Meld::spare_cards)))
        .or_else(|| {
            highest(
                decomposition
                    .melds
                    .iter()
                    .flat_map(|meld| meld.cards().iter().copied()),
            )
        })
}

/// Highest-valued card, ties going to the later card in card order.
fn highest(cards: impl Iterator<Item = Card>) -> Option<Card> {
    cards.max_by(|a, b| score_card(*a).cmp(&score_card(*b)).then_with(|| a.cmp(b)))
}
