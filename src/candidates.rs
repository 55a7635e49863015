//! Meld candidate generation.

use alloc::collections::BTreeSet;
use alloc::vec::Vec;

use crate::card::{Card, MAX_RANK, MIN_RANK, Suit};
use crate::hand::Hand;
use crate::meld::{MIN_MELD_LEN, Meld, MeldKind};

/// Returns every run and set currently realizable from the hand.
///
/// For each held numbered card this emits every contiguous sub-run of length
/// three or more inside the maximal run through that card, and every subset
/// of three or more cards of the set of distinct suits held at its rank.
/// Candidates are deduplicated by their sorted cards and returned in the order
/// they were first found. Jokers are ignored.
///
/// # Example
///
/// ```
/// use meldrs::card::decode_sequence;
/// use meldrs::candidates::candidates;
/// use meldrs::hand::Hand;
///
/// let hand = Hand::from_cards(&decode_sequence("7-R:8-R:9-R:10-R").unwrap());
/// // 7-8-9, 8-9-10 and 7-8-9-10
/// assert_eq!(candidates(&hand).len(), 3);
/// ```
#[must_use]
pub fn candidates(hand: &Hand) -> Vec<Meld> {
    let mut seen: BTreeSet<Vec<Card>> = BTreeSet::new();
    let mut melds = Vec::new();

    let mut emit = |kind: MeldKind, cards: Vec<Card>| {
        if seen.insert(cards.clone()) {
            melds.push(Meld::from_sorted(kind, cards));
        }
    };

    for (card, _) in hand.iter() {
        let (Some(rank), Some(suit)) = (card.rank(), card.suit()) else {
            continue;
        };

        let run = maximal_run(hand, rank, suit);
        for len in MIN_MELD_LEN..=run.len() {
            for window in run.windows(len) {
                emit(MeldKind::Run, window.to_vec());
            }
        }

        let set = maximal_set(hand, rank);
        if set.len() >= MIN_MELD_LEN {
            for mask in 0u32..(1 << set.len()) {
                if (mask.count_ones() as usize) < MIN_MELD_LEN {
                    continue;
                }
                let subset = set
                    .iter()
                    .enumerate()
                    .filter(|&(i, _)| mask & (1 << i) != 0)
                    .map(|(_, &card)| card)
                    .collect();
                emit(MeldKind::Set, subset);
            }
        }
    }

    melds
}

/// Walks down then up from `rank` within `suit` while cards are held.
fn maximal_run(hand: &Hand, rank: u8, suit: Suit) -> Vec<Card> {
    let held = |rank: u8| Card::new(rank, suit).is_some_and(|card| hand.contains(card));

    let mut low = rank;
    while low > MIN_RANK && held(low - 1) {
        low -= 1;
    }
    let mut high = rank;
    while high < MAX_RANK && held(high + 1) {
        high += 1;
    }

    (low..=high).filter_map(|r| Card::new(r, suit)).collect()
}

/// One card of `rank` from every suit that holds it, in card order.
fn maximal_set(hand: &Hand, rank: u8) -> Vec<Card> {
    let mut set: Vec<Card> = Suit::ALL
        .iter()
        .filter_map(|&suit| Card::new(rank, suit))
        .filter(|&card| hand.contains(card))
        .collect();
    set.sort_unstable();
    set
}
