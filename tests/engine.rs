//! Engine integration tests.

use meldrs::card::{decode_sequence, encode_sequence};
use meldrs::deck::{COPIES_PER_CARD, JOKERS_PER_DECK, shuffled_deck};
use meldrs::meld::{classify, is_run, is_set};
use meldrs::search::{EventLog, SearchCommand, SearchEvent, SearchMonitor};
use meldrs::{
    Card, ConfigError, DECK_SIZE, Decomposition, Hand, Meld, MeldError, MeldKind, ParseError,
    SearchOptions, SearchStatistics, Suit, UNIQUE_DECK_SIZE, candidates, decode, encode,
    new_deck, score_card, score_sequence, search, search_cards, search_with_monitor, shuffle,
};

fn cards(encoded: &str) -> Vec<Card> {
    decode_sequence(encoded).unwrap()
}

fn hand(encoded: &str) -> Hand {
    Hand::from_cards(&cards(encoded))
}

fn best(encoded: &str, max_melds: usize) -> Decomposition {
    search(
        &hand(encoded),
        &SearchOptions::default().with_max_melds(max_melds),
    )
    .unwrap()
}

fn meld_strings(decomposition: &Decomposition) -> Vec<String> {
    let mut melds: Vec<String> = decomposition
        .melds
        .iter()
        .map(ToString::to_string)
        .collect();
    melds.sort();
    melds
}

/// Checks that melds plus leftover add back up to the original hand and that
/// every meld is a valid run or set.
fn assert_conserves(original: &Hand, decomposition: &Decomposition) {
    let mut rebuilt: Hand = decomposition.leftover.iter().copied().collect();
    for meld in &decomposition.melds {
        assert!(classify(meld.cards()).is_some(), "invalid meld {meld}");
        assert_eq!(Meld::new(meld.cards().to_vec()).unwrap(), *meld);
        rebuilt.extend(meld.cards().iter().copied());
    }
    assert_eq!(rebuilt, *original);
    assert_eq!(decomposition.score, score_sequence(&decomposition.leftover));
}

#[test]
fn card_tokens_round_trip() {
    for card in new_deck(true) {
        assert_eq!(decode(&encode(card)).unwrap(), card);
        assert_eq!(card.to_string().parse::<Card>().unwrap(), card);
    }
    assert_eq!(encode(Card::JOKER), "*");
    assert_eq!(encode(Card::new(10, Suit::Red).unwrap()), "10-R");
}

#[test]
fn card_accessors() {
    let card = decode("12-X").unwrap();
    assert_eq!(card.rank(), Some(12));
    assert_eq!(card.suit(), Some(Suit::Black));
    assert!(!card.is_joker());

    assert!(Card::JOKER.is_joker());
    assert_eq!(Card::JOKER.rank(), None);
    assert_eq!(Card::JOKER.suit(), None);

    assert_eq!(Card::new(2, Suit::Blue), None);
    assert_eq!(Card::new(14, Suit::Blue), None);
}

#[test]
fn decode_accepts_leading_zeros() {
    assert_eq!(decode("07-R").unwrap(), decode("7-R").unwrap());
    assert_eq!(decode("003-B").unwrap().rank(), Some(3));
}

#[test]
fn decode_rejects_malformed_tokens() {
    assert_eq!(decode("").unwrap_err(), ParseError::Empty);
    assert_eq!(
        decode("2-R").unwrap_err(),
        ParseError::RankOutOfRange {
            token: "2-R".into(),
            rank: 2,
        }
    );
    assert_eq!(
        decode("14-B").unwrap_err(),
        ParseError::RankOutOfRange {
            token: "14-B".into(),
            rank: 14,
        }
    );
    assert_eq!(
        decode("x-R").unwrap_err(),
        ParseError::InvalidRank {
            token: "x-R".into()
        }
    );
    assert_eq!(
        decode("-R").unwrap_err(),
        ParseError::InvalidRank { token: "-R".into() }
    );
    assert_eq!(
        decode("+7-R").unwrap_err(),
        ParseError::InvalidRank {
            token: "+7-R".into()
        }
    );
    assert_eq!(
        decode("7-Q").unwrap_err(),
        ParseError::InvalidSuit {
            token: "7-Q".into()
        }
    );
    assert_eq!(
        decode("7").unwrap_err(),
        ParseError::InvalidSuit { token: "7".into() }
    );
    assert_eq!(
        decode("7-RR").unwrap_err(),
        ParseError::InvalidSuit {
            token: "7-RR".into()
        }
    );
    assert_eq!(
        decode("7-r").unwrap_err(),
        ParseError::InvalidSuit {
            token: "7-r".into()
        }
    );
}

#[test]
fn sequences_encode_and_decode() {
    assert_eq!(cards("7-R::8-R:"), cards("7-R:8-R"));
    assert!(cards("").is_empty());
    assert_eq!(encode_sequence(&cards("*:10-R")), "*:10-R");
    assert_eq!(
        decode_sequence("*:10-R:7-G:1-B").unwrap_err(),
        ParseError::RankOutOfRange {
            token: "1-B".into(),
            rank: 1,
        }
    );
}

#[test]
fn cards_sort_by_suit_letter_then_rank_with_jokers_last() {
    let mut sequence = cards("9-Y:*:8-R:9-R");
    sequence.sort();
    assert_eq!(encode_sequence(&sequence), "8-R:9-R:9-Y:*");

    let mut suits = Suit::ALL;
    suits.sort();
    assert_eq!(
        suits,
        [Suit::Blue, Suit::Green, Suit::Red, Suit::Black, Suit::Yellow]
    );

    assert!(decode("11-B").unwrap() > decode("10-B").unwrap());
    assert!(decode("3-R").unwrap() > decode("13-B").unwrap());
}

#[test]
fn full_deck_has_two_of_each_card_and_six_jokers() {
    let deck = new_deck(false);
    assert_eq!(deck.len(), DECK_SIZE);
    assert_eq!(DECK_SIZE, 116);

    let counts = Hand::from_cards(&deck);
    for card in new_deck(true) {
        let expected = if card.is_joker() {
            JOKERS_PER_DECK
        } else {
            COPIES_PER_CARD
        };
        assert_eq!(usize::from(counts.count(card)), expected, "{card}");
    }
}

#[test]
fn unique_deck_has_each_card_once() {
    let deck = new_deck(true);
    assert_eq!(deck.len(), UNIQUE_DECK_SIZE);
    assert_eq!(UNIQUE_DECK_SIZE, 56);

    let counts = Hand::from_cards(&deck);
    assert!(counts.iter().all(|(_, count)| count == 1));
    assert_eq!(counts.iter().count(), 56);
    assert_eq!(deck.first().copied(), Card::new(3, Suit::Blue));
    assert_eq!(deck.last().copied(), Some(Card::JOKER));
}

#[test]
fn shuffle_is_a_seeded_permutation() {
    let deck = new_deck(false);

    let first = shuffle(&deck, 123);
    assert_eq!(first, shuffle(&deck, 123));
    assert_eq!(first, shuffled_deck(123));
    assert_ne!(first, shuffle(&deck, 124));
    assert_ne!(first, deck);
    assert_eq!(Hand::from_cards(&first), Hand::from_cards(&deck));

    assert!(shuffle(&[], 7).is_empty());
}

#[test]
fn score_sequence_values() {
    assert_eq!(score_sequence(&[]), 0);
    assert_eq!(score_sequence(&cards("*:*")), 50);
    assert_eq!(score_sequence(&cards("7-R:8-R:9-R")), 24);
    assert_eq!(score_card(Card::JOKER), 25);
    assert_eq!(score_card(decode("13-G").unwrap()), 13);
}

#[test]
fn hand_counts_and_removal() {
    let mut counts = hand("7-R:7-R:*");
    assert_eq!(counts.len(), 3);
    assert_eq!(counts.count(decode("7-R").unwrap()), 2);
    assert_eq!(counts.jokers(), 1);
    assert_eq!(counts.deadwood_score(), 39);

    assert!(counts.remove(Card::JOKER));
    assert!(!counts.remove(Card::JOKER));
    assert_eq!(counts.cards(), cards("7-R:7-R"));

    let run = Meld::new(cards("7-R:8-R:9-R")).unwrap();
    assert!(!counts.can_apply(&run));
    assert_eq!(counts.without_meld(&run), None);

    let full = hand("7-R:8-R:9-R:9-R");
    let rest = full.without_meld(&run).unwrap();
    assert_eq!(rest.cards(), cards("9-R"));
    assert_eq!(full.len(), 4);
    assert!(Hand::new().is_empty());
}

#[test]
fn hand_counts_saturate() {
    let seven = decode("7-R").unwrap();
    let mut counts: Hand = core::iter::repeat_n(seven, usize::from(u16::MAX)).collect();
    assert_eq!(counts.count(seven), u16::MAX);

    counts.add(seven);
    assert_eq!(counts.count(seven), u16::MAX);
    assert_eq!(counts.len(), usize::from(u16::MAX));

    assert!(counts.remove(seven));
    assert_eq!(counts.count(seven), u16::MAX - 1);
}

#[test]
fn meld_validation() {
    let run = Meld::new(cards("9-R:7-R:8-R")).unwrap();
    assert_eq!(run.kind(), MeldKind::Run);
    assert_eq!(run.to_string(), "7-R:8-R:9-R");
    assert_eq!(run.score(), 24);

    let set = Meld::new(cards("5-Y:5-B:5-R")).unwrap();
    assert_eq!(set.kind(), MeldKind::Set);
    assert_eq!(set.to_string(), "5-B:5-R:5-Y");

    assert_eq!(
        Meld::new(cards("7-R:8-R")).unwrap_err(),
        MeldError::TooShort { len: 2 }
    );
    assert_eq!(
        Meld::new(cards("7-R:8-R:*")).unwrap_err(),
        MeldError::ContainsJoker
    );
    assert_eq!(
        Meld::new(cards("7-R:8-R:10-R")).unwrap_err(),
        MeldError::NotRunOrSet
    );
    assert_eq!(
        Meld::new(cards("5-B:5-B:5-R")).unwrap_err(),
        MeldError::NotRunOrSet
    );
    assert_eq!(
        Meld::new(cards("7-R:8-B:9-R")).unwrap_err(),
        MeldError::NotRunOrSet
    );

    assert!(is_run(&cards("11-G:13-G:12-G")));
    assert!(is_set(&cards("13-G:13-X:13-Y:13-B:13-R")));
    assert!(!is_set(&cards("13-G:13-X")));
}

#[test]
fn spare_cards_keep_the_meld_valid() {
    let run = Meld::new(cards("3-R:4-R:5-R:6-R")).unwrap();
    assert_eq!(run.spare_cards(), cards("3-R:6-R"));

    let set = Meld::new(cards("8-B:8-G:8-R:8-X")).unwrap();
    assert_eq!(set.spare_cards(), set.cards());

    let short = Meld::new(cards("3-R:4-R:5-R")).unwrap();
    assert!(short.spare_cards().is_empty());
}

#[test]
fn candidates_include_every_sub_run() {
    let found: Vec<String> = candidates(&hand("3-R:4-R:5-R:6-R:7-R"))
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(
        found,
        [
            "3-R:4-R:5-R",
            "4-R:5-R:6-R",
            "5-R:6-R:7-R",
            "3-R:4-R:5-R:6-R",
            "4-R:5-R:6-R:7-R",
            "3-R:4-R:5-R:6-R:7-R",
        ]
    );
}

#[test]
fn candidates_include_every_set_subset() {
    let found = candidates(&hand("5-B:5-R:5-Y:5-X:5-G"));
    // C(5,3) + C(5,4) + C(5,5)
    assert_eq!(found.len(), 16);
    assert!(found.iter().all(|meld| meld.kind() == MeldKind::Set));
    assert_eq!(found.iter().filter(|meld| meld.len() == 5).count(), 1);
}

#[test]
fn candidates_never_repeat_a_suit_or_use_jokers() {
    let found = candidates(&hand("5-B:5-B:5-R:5-Y:*:*:*"));
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].to_string(), "5-B:5-R:5-Y");

    assert!(candidates(&hand("*:*:*")).is_empty());
    assert!(candidates(&hand("3-R:4-R:6-R:7-B")).is_empty());
    assert!(candidates(&Hand::new()).is_empty());
}

#[test]
fn candidates_are_valid_and_distinct() {
    let counts = Hand::from_cards(&shuffled_deck(5)[..20]);
    let found = candidates(&counts);
    for (i, meld) in found.iter().enumerate() {
        assert_eq!(classify(meld.cards()), Some(meld.kind()));
        assert!(counts.can_apply(meld));
        assert!(!found[..i].contains(meld));
    }
}

#[test]
fn search_finds_run_and_set() {
    let result = best("7-R:8-R:9-R:5-B:5-R:5-Y", 2);
    assert_eq!(meld_strings(&result), ["5-B:5-R:5-Y", "7-R:8-R:9-R"]);
    assert!(result.leftover.is_empty());
    assert!(result.is_complete());
    assert_eq!(result.score, 0);
}

#[test]
fn search_keeps_unmatched_card_as_deadwood() {
    let result = best("3-B:3-R:3-Y:10-G", 2);
    assert_eq!(meld_strings(&result), ["3-B:3-R:3-Y"]);
    assert_eq!(result.leftover, cards("10-G"));
    assert_eq!(result.score, 10);
}

#[test]
fn search_without_melds_scores_every_card() {
    let result = best("4-B:6-R:11-Y", 2);
    assert!(result.melds.is_empty());
    assert_eq!(result.leftover, cards("4-B:6-R:11-Y"));
    assert_eq!(result.score, 21);
}

#[test]
fn search_selects_the_best_branch_not_the_first() {
    // The first candidate tried is 3-4-5, which leaves 13 points.
    let result = best("3-R:4-R:5-R:6-R:7-R", 1);
    assert_eq!(meld_strings(&result), ["3-R:4-R:5-R:6-R:7-R"]);
    assert_eq!(result.score, 0);

    let result = best("3-R:4-R:5-R:6-R:7-R:13-R:13-B:13-Y", 1);
    assert_eq!(meld_strings(&result), ["13-B:13-R:13-Y"]);
    assert_eq!(result.score, 25);
}

#[test]
fn equal_scores_prefer_more_melds() {
    // The six-card run and the two three-card runs both leave nothing.
    let counts = hand("3-R:4-R:5-R:6-R:7-R:8-R");
    for memoize in [true, false] {
        let result = best_of(&counts, 2, memoize);
        assert_eq!(meld_strings(&result), ["3-R:4-R:5-R", "6-R:7-R:8-R"]);
        assert_eq!(result.score, 0);
    }

    let result = best_of(&counts, 1, true);
    assert_eq!(meld_strings(&result), ["3-R:4-R:5-R:6-R:7-R:8-R"]);
}

#[test]
fn search_respects_max_melds() {
    let text = "3-R:4-R:5-R:8-B:9-B:10-B:12-G:12-X:12-Y";
    assert_eq!(best(text, 0).score, 75);
    assert_eq!(best(text, 1).score, 39);
    assert_eq!(best(text, 2).score, 12);
    assert_eq!(best(text, 3).score, 0);
    assert_eq!(best(text, 3).melds.len(), 3);
}

#[test]
fn search_handles_duplicate_cards() {
    let result = best("7-R:7-R:8-R:8-R:9-R:9-R", 2);
    assert_eq!(meld_strings(&result), ["7-R:8-R:9-R", "7-R:8-R:9-R"]);
    assert_eq!(result.score, 0);
}

#[test]
fn jokers_stay_in_deadwood_at_fixed_value() {
    let result = best("*:7-R:8-R:9-R", 2);
    assert_eq!(meld_strings(&result), ["7-R:8-R:9-R"]);
    assert_eq!(result.leftover, vec![Card::JOKER]);
    assert_eq!(result.score, 25);

    let result = best("*:*", 2);
    assert!(result.melds.is_empty());
    assert_eq!(result.score, 50);
}

#[test]
fn empty_hand_gives_trivial_decomposition() {
    let result = search(&Hand::new(), &SearchOptions::default()).unwrap();
    assert_eq!(result, Decomposition::empty());
    assert_eq!(
        search_cards(&[], &SearchOptions::default()).unwrap(),
        result
    );
}

#[test]
fn invalid_options_are_rejected() {
    let counts = hand("3-B:3-R:3-Y");
    assert_eq!(
        search(&counts, &SearchOptions::default().with_max_melds(39)).unwrap_err(),
        ConfigError::MaxMeldsTooLarge {
            max_melds: 39,
            limit: 38,
        }
    );
    assert_eq!(
        search(&counts, &SearchOptions::default().with_node_limit(Some(0))).unwrap_err(),
        ConfigError::ZeroNodeLimit
    );
    assert!(
        search(&counts, &SearchOptions::default().with_max_melds(38)).is_ok()
    );
}

#[test]
fn search_conserves_cards_on_random_hands() {
    for seed in 0..6 {
        let deck = shuffled_deck(seed);
        let counts = Hand::from_cards(&deck[..11]);
        for max_melds in 0..=3 {
            let result = best_of(&counts, max_melds, true);
            assert!(result.melds.len() <= max_melds);
            assert_conserves(&counts, &result);
        }
    }
}

#[test]
fn memoization_does_not_change_results() {
    for seed in 10..16 {
        let deck = shuffled_deck(seed);
        let counts = Hand::from_cards(&deck[..12]);
        assert_eq!(best_of(&counts, 3, true), best_of(&counts, 3, false));
    }
}

#[test]
fn adding_a_card_costs_at_most_its_value() {
    for seed in 20..24 {
        let deck = shuffled_deck(seed);
        let counts = Hand::from_cards(&deck[..9]);
        let before = best_of(&counts, 2, true).score;

        for &extra in &deck[9..14] {
            let mut more = counts;
            more.add(extra);
            let after = best_of(&more, 2, true).score;
            assert!(
                after <= before + score_card(extra),
                "adding {extra} raised {before} to {after}"
            );
        }
    }
}

#[test]
fn more_melds_never_hurt() {
    let deck = shuffled_deck(99);
    let counts = Hand::from_cards(&deck[..12]);
    let scores: Vec<u32> = (0..=3).map(|k| best_of(&counts, k, true).score).collect();
    assert!(scores.windows(2).all(|w| w[1] <= w[0]), "{scores:?}");
}

fn best_of(counts: &Hand, max_melds: usize, memoize: bool) -> Decomposition {
    let options = SearchOptions::default()
        .with_max_melds(max_melds)
        .with_memoize(memoize);
    search(counts, &options).unwrap()
}

#[test]
fn event_log_records_improvements_in_order() {
    let counts = hand("3-R:4-R:5-R:6-R:7-R");
    let options = SearchOptions::default().with_max_melds(1);
    let mut log = EventLog::new();

    let report = search_with_monitor(&counts, &options, &mut log).unwrap();
    assert_eq!(report.decomposition.score, 0);

    let scores: Vec<u32> = log.improvements().map(|(_, score)| score).collect();
    assert_eq!(scores, [13, 10, 7, 3, 0]);

    let (melds, _) = log.improvements().last().unwrap();
    assert_eq!(melds, report.decomposition.melds.as_slice());

    assert_eq!(
        report.statistics,
        SearchStatistics {
            nodes: 7,
            leaves: 6,
            memo_hits: 0,
            truncated: false,
        }
    );

    let events = log.events();
    assert_eq!(
        events.first(),
        Some(&SearchEvent::Enter {
            cards: counts.cards()
        })
    );
    assert_eq!(
        events.last(),
        Some(&SearchEvent::Exit {
            statistics: report.statistics
        })
    );
    let leaves = events
        .iter()
        .filter(|event| matches!(event, SearchEvent::Leaf { .. }))
        .count();
    assert_eq!(leaves, 6);

    let mut quiet = EventLog::without_leaves();
    search_with_monitor(&counts, &options, &mut quiet).unwrap();
    assert!(
        !quiet
            .events()
            .iter()
            .any(|event| matches!(event, SearchEvent::Leaf { .. }))
    );
}

struct StopImmediately;

impl SearchMonitor for StopImmediately {
    fn on_node(&mut self, _stats: &SearchStatistics) -> SearchCommand {
        SearchCommand::Stop
    }

    fn name(&self) -> &str {
        "StopImmediately"
    }
}

#[test]
fn monitor_can_stop_the_search() {
    let counts = hand("3-R:4-R:5-R:6-R:7-R");
    let report =
        search_with_monitor(&counts, &SearchOptions::default(), &mut StopImmediately).unwrap();

    assert!(report.statistics.truncated);
    assert_eq!(report.statistics.nodes, 1);
    assert!(report.decomposition.melds.is_empty());
    assert_eq!(report.decomposition.score, 25);
    assert_conserves(&counts, &report.decomposition);
}

#[test]
fn node_limit_truncates_but_stays_valid() {
    let counts = Hand::from_cards(&shuffled_deck(3)[..14]);
    let options = SearchOptions::default().with_max_melds(3);

    let full = search_with_monitor(&counts, &options, &mut EventLog::without_leaves()).unwrap();
    assert!(!full.statistics.truncated);

    let limited = search_with_monitor(
        &counts,
        &options.with_node_limit(Some(1)),
        &mut EventLog::without_leaves(),
    )
    .unwrap();
    assert_conserves(&counts, &limited.decomposition);
    assert!(limited.decomposition.score >= full.decomposition.score);
    assert!(limited.decomposition.melds.len() <= 1);
    if !candidates(&counts).is_empty() {
        assert!(limited.statistics.truncated);
    }
}
