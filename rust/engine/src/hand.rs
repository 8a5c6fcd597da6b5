use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Rank, ALL_SUITS};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum Category {
    HighCard = 0,
    Pair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
    RoyalFlush = 9,
}

impl Category {
    pub fn name(self) -> &'static str {
        match self {
            Category::HighCard => "High Card",
            Category::Pair => "Pair",
            Category::TwoPair => "Two Pair",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::Straight => "Straight",
            Category::Flush => "Flush",
            Category::FullHouse => "Full House",
            Category::FourOfAKind => "Four of a Kind",
            Category::StraightFlush => "Straight Flush",
            Category::RoyalFlush => "Royal Flush",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Classified hand. Ordered by category, then lexicographically by
/// `tie_break` (rank ordinals, most significant first).
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct HandStrength {
    pub category: Category,
    pub tie_break: Vec<u8>,
}

impl HandStrength {
    fn from_cards(category: Category, cards: &[Card]) -> Self {
        Self {
            category,
            tie_break: cards.iter().map(|c| c.rank.ordinal()).collect(),
        }
    }
}

impl fmt::Display for HandStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ranks: Vec<&str> = self
            .tie_break
            .iter()
            .filter_map(|&o| Rank::from_ordinal(o))
            .map(Rank::label)
            .collect();
        write!(f, "{} [{}]", self.category, ranks.join(" "))
    }
}

/// Strength of a player's holding given the community cards seen so far.
///
/// With an empty board this is the pre-flop heuristic from
/// [`preflop_strength`], not a poker ranking. Otherwise hole and board cards
/// are pooled and classified by [`evaluate_cards`].
pub fn evaluate(hole: &[Card], board: &[Card]) -> HandStrength {
    if board.is_empty() {
        return preflop_strength(hole);
    }
    let mut all = Vec::with_capacity(hole.len() + board.len());
    all.extend_from_slice(hole);
    all.extend_from_slice(board);
    evaluate_cards(&all)
}

/// Coarse pre-flop classification used to feed decision policies.
///
/// - pocket pair of Tens or better: `Pair [rank]`
/// - smaller pocket pair, or a Jack or better: `HighCard [rank]`
/// - anything else, including no cards: `HighCard [0]`
pub fn preflop_strength(hole: &[Card]) -> HandStrength {
    let (category, rank) = match hole {
        [a, b] if a.rank == b.rank => {
            if a.rank >= Rank::Ten {
                (Category::Pair, a.rank.ordinal())
            } else {
                (Category::HighCard, a.rank.ordinal())
            }
        }
        _ => match hole.iter().map(|c| c.rank).max() {
            Some(high) if high >= Rank::Jack => (Category::HighCard, high.ordinal()),
            _ => (Category::HighCard, 0),
        },
    };
    HandStrength {
        category,
        tie_break: vec![rank],
    }
}

/// Classifies 2 to 7 cards into the best five-card category.
///
/// Categories are tested strongest first and the first match wins. Every
/// detector returns the scoring cards followed by kickers, so the tie-break
/// always carries the full comparison key for its category.
pub fn evaluate_cards(cards: &[Card]) -> HandStrength {
    let mut sorted = cards.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));

    if let Some(sf) = straight_flush(&sorted) {
        let category = if sf[0].rank == Rank::Ace {
            Category::RoyalFlush
        } else {
            Category::StraightFlush
        };
        return HandStrength {
            category,
            tie_break: vec![sf[0].rank.ordinal()],
        };
    }
    if let Some(quads) = four_of_a_kind(&sorted) {
        return HandStrength::from_cards(Category::FourOfAKind, &quads);
    }
    if let Some(boat) = full_house(&sorted) {
        return HandStrength::from_cards(Category::FullHouse, &boat);
    }
    if let Some(flush) = flush(&sorted) {
        return HandStrength::from_cards(Category::Flush, &flush);
    }
    if let Some(run) = straight(&sorted) {
        return HandStrength {
            category: Category::Straight,
            tie_break: vec![run[0].rank.ordinal()],
        };
    }
    if let Some(trips) = three_of_a_kind(&sorted) {
        return HandStrength::from_cards(Category::ThreeOfAKind, &trips);
    }
    if let Some(two) = two_pair(&sorted) {
        return HandStrength::from_cards(Category::TwoPair, &two);
    }
    if let Some(pair) = pair(&sorted) {
        return HandStrength::from_cards(Category::Pair, &pair);
    }
    let top: Vec<Card> = sorted.iter().take(5).copied().collect();
    HandStrength::from_cards(Category::HighCard, &top)
}

pub fn compare_hands(a: &HandStrength, b: &HandStrength) -> Ordering {
    match a.category.cmp(&b.category) {
        Ordering::Equal => a.tie_break.cmp(&b.tie_break),
        ord => ord,
    }
}

// Detectors below take cards sorted high to low.

/// Groups of equal rank, largest group first, higher rank first within a size.
fn rank_groups(sorted: &[Card]) -> Vec<Vec<Card>> {
    let mut groups: Vec<Vec<Card>> = Vec::new();
    for &c in sorted {
        match groups.last_mut() {
            Some(g) if g[0].rank == c.rank => g.push(c),
            _ => groups.push(vec![c]),
        }
    }
    groups.sort_by(|a, b| b.len().cmp(&a.len()).then(b[0].rank.cmp(&a[0].rank)));
    groups
}

fn kickers(sorted: &[Card], used: &[Card], n: usize) -> Vec<Card> {
    sorted
        .iter()
        .filter(|c| !used.iter().any(|u| u.rank == c.rank))
        .take(n)
        .copied()
        .collect()
}

fn with_kickers(sorted: &[Card], mut made: Vec<Card>, n: usize) -> Vec<Card> {
    let extra = kickers(sorted, &made, n);
    made.extend(extra);
    made
}

fn straight_flush(sorted: &[Card]) -> Option<Vec<Card>> {
    ALL_SUITS
        .iter()
        .filter_map(|&s| {
            let suited: Vec<Card> = sorted.iter().filter(|c| c.suit == s).copied().collect();
            if suited.len() >= 5 {
                straight(&suited)
            } else {
                None
            }
        })
        .max_by_key(|run| run[0].rank)
}

fn four_of_a_kind(sorted: &[Card]) -> Option<Vec<Card>> {
    let groups = rank_groups(sorted);
    let quads = groups.iter().find(|g| g.len() == 4)?.clone();
    Some(with_kickers(sorted, quads, 1))
}

fn full_house(sorted: &[Card]) -> Option<Vec<Card>> {
    let groups = rank_groups(sorted);
    let trips = groups.iter().find(|g| g.len() >= 3)?;
    let pair = groups
        .iter()
        .filter(|g| g[0].rank != trips[0].rank && g.len() >= 2)
        .max_by_key(|g| g[0].rank)?;
    let mut made: Vec<Card> = trips.iter().take(3).copied().collect();
    made.extend(pair.iter().take(2));
    Some(made)
}

fn flush(sorted: &[Card]) -> Option<Vec<Card>> {
    ALL_SUITS
        .iter()
        .map(|&s| {
            sorted
                .iter()
                .filter(|c| c.suit == s)
                .take(5)
                .copied()
                .collect::<Vec<Card>>()
        })
        .filter(|suited| suited.len() == 5)
        .max_by(|a, b| {
            let ka: Vec<Rank> = a.iter().map(|c| c.rank).collect();
            let kb: Vec<Rank> = b.iter().map(|c| c.rank).collect();
            ka.cmp(&kb)
        })
}

/// Highest five-card run, including the Ace-low wheel (returned as 5-4-3-2-A).
fn straight(sorted: &[Card]) -> Option<Vec<Card>> {
    let mut distinct: Vec<Card> = Vec::with_capacity(sorted.len());
    for &c in sorted {
        if distinct.last().is_none_or(|l| l.rank != c.rank) {
            distinct.push(c);
        }
    }
    for w in distinct.windows(5) {
        if w[0].rank.ordinal() - w[4].rank.ordinal() == 4 {
            return Some(w.to_vec());
        }
    }
    let ace = distinct.first().filter(|c| c.rank == Rank::Ace)?;
    let mut wheel: Vec<Card> = [Rank::Five, Rank::Four, Rank::Three, Rank::Two]
        .iter()
        .filter_map(|r| distinct.iter().find(|c| c.rank == *r).copied())
        .collect();
    if wheel.len() == 4 {
        wheel.push(*ace);
        Some(wheel)
    } else {
        None
    }
}

fn three_of_a_kind(sorted: &[Card]) -> Option<Vec<Card>> {
    let groups = rank_groups(sorted);
    let trips: Vec<Card> = groups.iter().find(|g| g.len() >= 3)?.iter().take(3).copied().collect();
    Some(with_kickers(sorted, trips, 2))
}

fn two_pair(sorted: &[Card]) -> Option<Vec<Card>> {
    let groups = rank_groups(sorted);
    let mut pairs = groups.iter().filter(|g| g.len() >= 2);
    let high = pairs.next()?;
    let low = pairs.next()?;
    let mut made: Vec<Card> = high.iter().take(2).copied().collect();
    made.extend(low.iter().take(2));
    Some(with_kickers(sorted, made, 1))
}

fn pair(sorted: &[Card]) -> Option<Vec<Card>> {
    let groups = rank_groups(sorted);
    let pair: Vec<Card> = groups.iter().find(|g| g.len() >= 2)?.iter().take(2).copied().collect();
    Some(with_kickers(sorted, pair, 3))
}
