//! Request and response envelopes of the decision service.
//!
//! With the `serde` feature these serialize to the JSON shape the game client
//! sends and expects: camelCase field names, lowercase actions and stacks,
//! and cards as tokens.

use alloc::string::String;
use alloc::vec::Vec;

use crate::advisor::{Scoring, choose_discard, choose_stack, score_hand};
use crate::card::{decode, decode_cards, encode_cards};
use crate::error::AdviceError;
use crate::options::SearchOptions;

/// The decision being asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Action {
    /// Choose a stack to draw from.
    Draw,
    /// Lay the hand down for scoring.
    Score,
    /// Choose a card to discard.
    Discard,
}

/// A stack to draw from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Stack {
    /// The face-down deck.
    Deck,
    /// The face-up discard pile.
    Discard,
}

/// A decision request.
///
/// Cards are tokens such as `"7-R"` or `"*"`. The discard pile lists its top
/// card first.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct BotRequest {
    /// The decision being asked for.
    pub action: Action,
    /// The discard pile, top card first.
    #[cfg_attr(feature = "serde", serde(default))]
    pub discard: Vec<String>,
    /// The player's hand.
    #[cfg_attr(feature = "serde", serde(default))]
    pub hand: Vec<String>,
    /// The card most recently drawn.
    #[cfg_attr(feature = "serde", serde(default))]
    pub newest_card: String,
    /// Number of players at the table.
    #[cfg_attr(feature = "serde", serde(default))]
    pub player_count: u32,
    /// Current round number.
    #[cfg_attr(feature = "serde", serde(default))]
    pub round: u32,
    /// Whether this is the player's last turn of the round.
    #[cfg_attr(feature = "serde", serde(default))]
    pub last_turn: bool,
}

impl BotRequest {
    /// Creates a request with the given action and hand and every other field
    /// empty.
    #[must_use]
    pub const fn new(action: Action, hand: Vec<String>) -> Self {
        Self {
            action,
            discard: Vec::new(),
            hand,
            newest_card: String::new(),
            player_count: 0,
            round: 0,
            last_turn: false,
        }
    }

    /// Sets the discard pile.
    #[must_use]
    pub fn with_discard(mut self, discard: Vec<String>) -> Self {
        self.discard = discard;
        self
    }
}

/// Answer to a draw request.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DrawResponse {
    /// Always [`Action::Draw`].
    pub action: Action,
    /// The stack to draw from.
    pub stack: Stack,
}

/// Answer to a discard request.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiscardResponse {
    /// Always [`Action::Discard`].
    pub action: Action,
    /// The remaining hand as melds followed by single deadwood cards.
    pub sequences: Vec<Vec<String>>,
    /// The card to discard.
    pub card: String,
    /// Whether the remaining hand can go out.
    pub flop: bool,
}

/// Answer to a score request.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoreResponse {
    /// Always [`Action::Score`].
    pub action: Action,
    /// The hand as melds followed by single deadwood cards.
    pub sequences: Vec<Vec<String>>,
    /// Whether the hand can go out.
    pub flop: bool,
}

/// Any decision answer.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum BotResponse {
    /// Answer to [`Action::Draw`].
    Draw(DrawResponse),
    /// Answer to [`Action::Discard`].
    Discard(DiscardResponse),
    /// Answer to [`Action::Score`].
    Score(ScoreResponse),
}

/// Answers a decision request.
///
/// # Errors
///
/// Returns an [`AdviceError`] if a card token is malformed, the options are
/// invalid, a draw is requested with an empty discard pile, or a discard is
/// requested from an empty hand.
///
/// # Example
///
/// ```
/// use meldrs::protocol::{respond, Action, BotRequest, BotResponse};
/// use meldrs::SearchOptions;
///
/// let hand = ["7-R", "8-R", "9-R", "4-B"].map(String::from).to_vec();
/// let request = BotRequest::new(Action::Score, hand);
/// let BotResponse::Score(response) = respond(&request, &SearchOptions::default()).unwrap() else {
///     panic!("expected a score response");
/// };
/// assert_eq!(response.sequences[0], ["7-R", "8-R", "9-R"]);
/// assert!(!response.flop);
/// ```
pub fn respond(request: &BotRequest, options: &SearchOptions) -> Result<BotResponse, AdviceError> {
    let hand = decode_cards(&request.hand)?;

    match request.action {
        Action::Score => {
            let scoring = score_hand(&hand, options)?;
            Ok(BotResponse::Score(ScoreResponse {
                action: Action::Score,
                sequences: encode_sequences(&scoring),
                flop: scoring.flop,
            }))
        }
        Action::Draw => {
            let top = request.discard.first().ok_or(AdviceError::EmptyDiscard)?;
            let stack = choose_stack(&hand, decode(top)?, options)?;
            Ok(BotResponse::Draw(DrawResponse {
                action: Action::Draw,
                stack,
            }))
        }
        Action::Discard => {
            let discard = choose_discard(&hand, options)?;
            Ok(BotResponse::Discard(DiscardResponse {
                action: Action::Discard,
                sequences: encode_sequences(&discard.scoring),
                card: discard.card.encode(),
                flop: discard.scoring.flop,
            }))
        }
    }
}

fn encode_sequences(scoring: &Scoring) -> Vec<Vec<String>> {
    scoring
        .sequences
        .iter()
        .map(|sequence| encode_cards(sequence))
        .collect()
}
