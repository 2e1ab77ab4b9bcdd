/// Property-based tests for card-code parsing using proptest
///
/// These tests verify that decoding and re-encoding the two-character card
/// codes is lossless for every valid code and rejects everything else.
use poker_at_home::Card;
use proptest::prelude::*;

const RANKS: &[char] = &['A', '2', '3', '4', '5', '6', '7', '8', '9', 'T', 'J', 'Q', 'K'];
const SUITS: &[char] = &['h', 'd', 's', 'c'];

// Strategy to generate a valid two-character card code
fn valid_code_strategy() -> impl Strategy<Value = String> {
    (
        prop::sample::select(RANKS.to_vec()),
        prop::sample::select(SUITS.to_vec()),
    )
        .prop_map(|(rank, suit)| format!("{rank}{suit}"))
}

proptest! {
    #[test]
    fn test_valid_codes_roundtrip(code in valid_code_strategy()) {
        let card: Card = code.parse().expect("valid code must parse");
        prop_assert_eq!(card.to_string(), code);
    }

    #[test]
    fn test_parsing_is_deterministic(code in valid_code_strategy()) {
        let first: Card = code.parse().unwrap();
        let second: Card = code.parse().unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_invalid_rank_is_rejected(rank in any::<char>(), suit in prop::sample::select(SUITS.to_vec())) {
        prop_assume!(!RANKS.contains(&rank));
        let code = format!("{rank}{suit}");
        prop_assert!(code.parse::<Card>().is_err());
    }

    #[test]
    fn test_invalid_suit_is_rejected(rank in prop::sample::select(RANKS.to_vec()), suit in any::<char>()) {
        prop_assume!(!SUITS.contains(&suit));
        let code = format!("{rank}{suit}");
        prop_assert!(code.parse::<Card>().is_err());
    }

    #[test]
    fn test_wrong_length_is_rejected(code in "[A2-9TJQK][hdsc][a-z0-9]{1,3}") {
        prop_assert!(code.parse::<Card>().is_err());
    }
}

#[test]
fn test_all_fifty_two_codes_roundtrip() {
    for rank in RANKS {
        for suit in SUITS {
            let code = format!("{rank}{suit}");
            let card: Card = code.parse().unwrap();
            assert_eq!(card.to_string(), code);
        }
    }
}
