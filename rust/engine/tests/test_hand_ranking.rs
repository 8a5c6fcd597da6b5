use std::cmp::Ordering;

use pokersim_engine::cards::parse_cards;
use pokersim_engine::hand::{compare_hands, evaluate, evaluate_cards, Category, HandStrength};

fn eval(s: &str) -> HandStrength {
    evaluate_cards(&parse_cards(s).unwrap())
}

#[test]
fn categories_detected() {
    let cases = [
        ("A♥ K♥ Q♥ J♥ 10♥ 2♣ 3♦", Category::RoyalFlush),
        ("9♠ 10♠ J♠ Q♠ K♠ 2♦ 2♣", Category::StraightFlush),
        ("7♣ 7♦ 7♥ 7♠ 2♦ 3♣ 9♥", Category::FourOfAKind),
        ("K♣ K♦ K♥ 4♠ 4♦ 9♣ 2♥", Category::FullHouse),
        ("2♦ 6♦ 9♦ J♦ K♦ A♣ 3♠", Category::Flush),
        ("5♣ 6♦ 7♥ 8♠ 9♦ K♣ K♥", Category::Straight),
        ("A♣ 2♦ 3♥ 4♠ 5♦ 9♣ J♥", Category::Straight),
        ("Q♣ Q♦ Q♥ 2♠ 5♦ 9♣ J♥", Category::ThreeOfAKind),
        ("J♣ J♦ 4♥ 4♠ 8♦ 9♣ 2♥", Category::TwoPair),
        ("10♣ 10♦ 4♥ 3♠ 8♦ K♣ 2♥", Category::Pair),
        ("A♣ J♦ 4♥ 3♠ 8♦ 9♣ 2♥", Category::HighCard),
    ];
    for (cards, want) in cases {
        assert_eq!(eval(cards).category, want, "{}", cards);
    }
}

#[test]
fn straight_flush_beats_trips_aces() {
    let sf = eval("9♠ 10♠ J♠ Q♠ K♠");
    let trips = eval("A♥ A♦ A♣ K♠ Q♠");
    assert_eq!(compare_hands(&sf, &trips), Ordering::Greater);
}

#[test]
fn wheel_is_the_lowest_straight() {
    let wheel = eval("A♣ 2♦ 3♥ 4♠ 5♦");
    let six_high = eval("2♦ 3♥ 4♠ 5♦ 6♣");
    assert_eq!(wheel.category, Category::Straight);
    assert!(wheel < six_high);
}

#[test]
fn kickers_decide_equal_pairs() {
    let a = eval("K♣ K♦ A♥ 7♠ 3♦");
    let b = eval("K♥ K♠ Q♥ J♠ 9♦");
    assert_eq!(compare_hands(&a, &b), Ordering::Greater);
}

#[test]
fn two_pair_compares_high_pair_then_low_pair_then_kicker() {
    let a = eval("Q♣ Q♦ 3♥ 3♠ 2♦");
    let b = eval("J♥ J♠ 10♥ 10♠ A♦");
    let c = eval("Q♥ Q♠ 3♣ 3♦ 4♦");
    assert!(a > b);
    assert!(c > a);
}

#[test]
fn shared_board_straight_ties() {
    let board = parse_cards("5♣ 6♦ 7♥ 8♠ 9♦").unwrap();
    let a = evaluate(&parse_cards("2♣ 2♦").unwrap(), &board);
    let b = evaluate(&parse_cards("K♣ 3♥").unwrap(), &board);
    assert_eq!(a.category, Category::Straight);
    assert_eq!(compare_hands(&a, &b), Ordering::Equal);
}

#[test]
fn flush_compares_all_five_cards() {
    let a = eval("A♦ J♦ 9♦ 6♦ 3♦");
    let b = eval("A♣ J♣ 9♣ 6♣ 2♣");
    assert!(a > b);
}

#[test]
fn empty_board_uses_preflop_strength() {
    let pair = evaluate(&parse_cards("Q♣ Q♦").unwrap(), &[]);
    assert_eq!(pair.category, Category::Pair);
    let junk = evaluate(&parse_cards("7♣ 2♦").unwrap(), &[]);
    assert_eq!(junk.category, Category::HighCard);
    assert_eq!(junk.tie_break, vec![0]);
}
