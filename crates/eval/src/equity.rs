// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Win, tie, and loss odds against random opponents.
//!
//! The odds for a hero hand are computed over all the ways to complete the
//! board and deal the opponents hole cards from the unknown cards. When the
//! number of these deals is at most [EquityConfig::exact_threshold] they are
//! all enumerated, otherwise a fixed number of deals is sampled in parallel.
//!
//! Each deal counts as a whole win, tie, or loss for the hero, ties are not
//! split between the tied players.
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

use handscope_cards::{Card, Deck, combinations, ensure_distinct, nck};

use crate::{EvalError, HandValue};

/// Number of cards in a complete board.
pub const BOARD_SIZE: usize = 5;

/// Number of hole cards per player.
pub const HOLE_SIZE: usize = 2;

/// Odds computation settings.
#[derive(Debug, Clone)]
pub struct EquityConfig {
    /// Enumerate all deals when there are at most this many.
    pub exact_threshold: u64,
    /// The number of sampled deals when enumeration is too large.
    pub samples: usize,
    /// The number of sampling threads.
    pub num_tasks: usize,
    /// Sampling seed, if set the sampled odds are deterministic.
    pub seed: Option<u64>,
}

impl Default for EquityConfig {
    fn default() -> Self {
        Self {
            exact_threshold: 100_000,
            samples: 50_000,
            num_tasks: 4,
            seed: None,
        }
    }
}

/// How the odds were computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EquityMode {
    /// All deals were enumerated.
    Exact,
    /// Deals were sampled.
    Sampled,
}

/// The result of a single deal for the hero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The hero hand beats every opponent.
    Win,
    /// The hero hand is the best and at least one opponent matches it.
    Tie,
    /// An opponent has a better hand.
    Loss,
}

impl Outcome {
    /// Compares the hero hand with the best opponent hand.
    pub fn showdown(hero: HandValue, best_opponent: HandValue) -> Outcome {
        match hero.cmp(&best_opponent) {
            std::cmp::Ordering::Greater => Outcome::Win,
            std::cmp::Ordering::Equal => Outcome::Tie,
            std::cmp::Ordering::Less => Outcome::Loss,
        }
    }
}

/// Win, tie, and loss counters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EquityCounts {
    /// Deals won.
    pub wins: u64,
    /// Deals tied.
    pub ties: u64,
    /// Deals lost.
    pub losses: u64,
}

impl EquityCounts {
    /// Counts a deal outcome.
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Tie => self.ties += 1,
            Outcome::Loss => self.losses += 1,
        }
    }

    /// The number of deals counted.
    pub fn total(&self) -> u64 {
        self.wins + self.ties + self.losses
    }

    /// Converts counts to probabilities.
    pub fn to_equity(self, mode: EquityMode) -> Equity {
        let trials = self.total();
        let p = |n: u64| {
            if trials == 0 {
                0.0
            } else {
                n as f64 / trials as f64
            }
        };

        Equity {
            win: p(self.wins),
            tie: p(self.ties),
            loss: p(self.losses),
            trials,
            mode,
        }
    }
}

/// Per task counters for parallel sampling.
#[derive(Default)]
struct Counter {
    wins: AtomicU64,
    ties: AtomicU64,
    losses: AtomicU64,
}

impl Counter {
    fn record(&self, outcome: Outcome) {
        let counter = match outcome {
            Outcome::Win => &self.wins,
            Outcome::Tie => &self.ties,
            Outcome::Loss => &self.losses,
        };

        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn counts(&self) -> EquityCounts {
        EquityCounts {
            wins: self.wins.load(Ordering::Relaxed),
            ties: self.ties.load(Ordering::Relaxed),
            losses: self.losses.load(Ordering::Relaxed),
        }
    }
}

/// Hero odds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Equity {
    /// Probability of winning.
    pub win: f64,
    /// Probability of tying.
    pub tie: f64,
    /// Probability of losing.
    pub loss: f64,
    /// The number of deals evaluated.
    pub trials: u64,
    /// How the deals were generated.
    pub mode: EquityMode,
}

/// Returns the number of ways to deal `missing_board` board cards and then
/// two hole cards to each of `opponents` players from `unknown` cards.
///
/// Opponents are dealt in order, the count saturates at `u64::MAX`.
pub fn trial_space(unknown: usize, missing_board: usize, opponents: usize) -> u64 {
    let mut total = nck(unknown, missing_board);
    let mut left = unknown.saturating_sub(missing_board);
    for _ in 0..opponents {
        total = total.saturating_mul(nck(left, HOLE_SIZE));
        left = left.saturating_sub(HOLE_SIZE);
    }

    total
}

/// Computes the hero win, tie, and loss probabilities against
/// `num_opponents` players with random hole cards.
///
/// The board can be empty or have 3, 4, or 5 cards, the missing board cards
/// are dealt with the opponents cards from the cards not in the hero hand or
/// in the board.
pub fn compute_odds(
    hero: &[Card],
    board: &[Card],
    num_opponents: usize,
    config: &EquityConfig,
) -> Result<Equity, EvalError> {
    if hero.len() != HOLE_SIZE {
        return Err(EvalError::InvalidCardCount {
            count: hero.len(),
            expected: "2 hole cards",
        });
    }

    if !matches!(board.len(), 0 | 3 | 4 | 5) {
        return Err(EvalError::InvalidBoardSize(board.len()));
    }

    let known = [hero, board].concat();
    ensure_distinct(&known)?;

    let deck = Deck::without(&known);
    let missing = BOARD_SIZE - board.len();
    let max_opponents = (deck.count() - missing) / HOLE_SIZE;
    if num_opponents == 0 || num_opponents > max_opponents {
        return Err(EvalError::InvalidOpponentCount {
            requested: num_opponents,
            max: max_opponents,
        });
    }

    let equity = if trial_space(deck.count(), missing, num_opponents) <= config.exact_threshold {
        enumerate(hero, board, deck.cards(), num_opponents).to_equity(EquityMode::Exact)
    } else {
        sample(hero, board, &deck, num_opponents, config).to_equity(EquityMode::Sampled)
    };

    Ok(equity)
}

/// Counts the outcomes of all the deals from `unknown` cards.
fn enumerate(hero: &[Card], board: &[Card], unknown: &[Card], num_opponents: usize) -> EquityCounts {
    let mut counts = EquityCounts::default();
    let mut hand = [Card::default(); HOLE_SIZE + BOARD_SIZE];
    hand[..HOLE_SIZE].copy_from_slice(hero);
    hand[HOLE_SIZE..HOLE_SIZE + board.len()].copy_from_slice(board);

    for fill in combinations(unknown, BOARD_SIZE - board.len()) {
        hand[HOLE_SIZE + board.len()..].copy_from_slice(&fill);
        let hero_value = HandValue::eval(&hand);

        let mut full_board = [Card::default(); BOARD_SIZE];
        full_board.copy_from_slice(&hand[HOLE_SIZE..]);

        let used = mask(&fill);
        let rest = unknown
            .iter()
            .copied()
            .filter(|c| used & c.mask() == 0)
            .collect::<Vec<_>>();

        deal_opponents(&rest, num_opponents, &full_board, hero_value, None, &mut counts);
    }

    counts
}

/// Deals hole cards to the remaining opponents recursively and records the
/// showdown outcome once every opponent has cards.
fn deal_opponents(
    rest: &[Card],
    opponents: usize,
    board: &[Card; BOARD_SIZE],
    hero: HandValue,
    best: Option<HandValue>,
    counts: &mut EquityCounts,
) {
    let mut hand = [Card::default(); HOLE_SIZE + BOARD_SIZE];
    hand[HOLE_SIZE..].copy_from_slice(board);

    for hole in combinations(rest, HOLE_SIZE) {
        hand[..HOLE_SIZE].copy_from_slice(&hole);
        let value = HandValue::eval(&hand);
        let best = best.map_or(value, |b| b.max(value));

        if opponents == 1 {
            counts.record(Outcome::showdown(hero, best));
        } else {
            let used = mask(&hole);
            let rest = rest
                .iter()
                .copied()
                .filter(|c| used & c.mask() == 0)
                .collect::<Vec<_>>();

            deal_opponents(&rest, opponents - 1, board, hero, Some(best), counts);
        }
    }
}

/// Counts the outcomes of `config.samples` random deals from the deck.
fn sample(
    hero: &[Card],
    board: &[Card],
    deck: &Deck,
    num_opponents: usize,
    config: &EquityConfig,
) -> EquityCounts {
    let num_tasks = config.num_tasks.max(1);
    let missing = BOARD_SIZE - board.len();

    // Create per task counters to avoid contention.
    let task_counters = (0..num_tasks)
        .map(|_| Counter::default())
        .collect::<Vec<_>>();

    // The missing board cards followed by two cards for each opponent.
    let sample_size = missing + num_opponents * HOLE_SIZE;

    deck.par_sample(
        num_tasks,
        config.samples.max(1),
        sample_size,
        config.seed,
        |task_id, sample| {
            let mut hand = [Card::default(); HOLE_SIZE + BOARD_SIZE];
            hand[..HOLE_SIZE].copy_from_slice(hero);
            hand[HOLE_SIZE..HOLE_SIZE + board.len()].copy_from_slice(board);
            hand[HOLE_SIZE + board.len()..].copy_from_slice(&sample[..missing]);
            let hero_value = HandValue::eval(&hand);

            let best = sample[missing..]
                .chunks_exact(HOLE_SIZE)
                .map(|hole| {
                    hand[..HOLE_SIZE].copy_from_slice(hole);
                    HandValue::eval(&hand)
                })
                .max();

            if let Some(best) = best {
                task_counters[task_id].record(Outcome::showdown(hero_value, best));
            }
        },
    );

    // Aggregate counters.
    task_counters
        .iter()
        .map(Counter::counts)
        .fold(EquityCounts::default(), |acc, c| EquityCounts {
            wins: acc.wins + c.wins,
            ties: acc.ties + c.ties,
            losses: acc.losses + c.losses,
        })
}

fn mask(cards: &[Card]) -> u64 {
    cards.iter().fold(0, |mask, c| mask | c.mask())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Rank;

    fn cards(tokens: &str) -> Vec<Card> {
        Card::parse_many(&tokens.split_whitespace().collect::<Vec<_>>()).unwrap()
    }

    fn assert_sums_to_one(equity: &Equity) {
        let sum = equity.win + equity.tie + equity.loss;
        assert!((sum - 1.0).abs() < 1e-9, "sum={sum}");
    }

    #[test]
    fn test_trial_space() {
        assert_eq!(trial_space(45, 0, 1), 990);
        assert_eq!(trial_space(46, 1, 1), 45_540);
        assert_eq!(trial_space(47, 2, 1), 1_070_190);
        assert_eq!(trial_space(45, 0, 2), 893_970);
        assert_eq!(trial_space(6, 0, 2), 90);
        assert_eq!(trial_space(50, 5, 22), u64::MAX);
    }

    #[test]
    fn river_two_pair_exact() {
        let hero = cards("As Ks");
        let board = cards("Ad Kd 2c 2d 7h");
        let equity = compute_odds(&hero, &board, 1, &EquityConfig::default()).unwrap();

        assert_eq!(equity.mode, EquityMode::Exact);
        assert_eq!(equity.trials, 990);
        assert_sums_to_one(&equity);
        assert!(equity.win > equity.loss);

        // Brute force over all the opponent hands.
        let deck = Deck::without(&[hero.clone(), board.clone()].concat());
        let hero_value = HandValue::eval(&[hero, board.clone()].concat());
        let mut counts = EquityCounts::default();
        for hole in combinations(deck.cards(), 2) {
            let value = HandValue::eval(&[hole.to_vec(), board.clone()].concat());
            counts.record(Outcome::showdown(hero_value, value));
        }

        assert_eq!(counts.total(), 990);
        assert_eq!(equity, counts.to_equity(EquityMode::Exact));
    }

    #[test]
    fn turn_exact() {
        let hero = cards("Jh Th");
        let board = cards("9h 8c 2h Kd");
        let equity = compute_odds(&hero, &board, 1, &EquityConfig::default()).unwrap();

        assert_eq!(equity.mode, EquityMode::Exact);
        assert_eq!(equity.trials, 45_540);
        assert_sums_to_one(&equity);
    }

    #[test]
    fn board_ties_and_locks() {
        // Everybody plays the royal flush on the board.
        let equity = compute_odds(
            &cards("2c 3d"),
            &cards("Ts Js Qs Ks As"),
            1,
            &EquityConfig::default(),
        )
        .unwrap();
        assert_eq!((equity.win, equity.tie, equity.loss), (0.0, 1.0, 0.0));

        // Quad aces can't be beaten or tied on this board.
        let equity = compute_odds(
            &cards("Ah Ad"),
            &cards("Ac As Kd 7h 2c"),
            1,
            &EquityConfig::default(),
        )
        .unwrap();
        assert_eq!((equity.win, equity.tie, equity.loss), (1.0, 0.0, 0.0));
    }

    #[test]
    fn enumerate_multiple_opponents() {
        let hero = cards("Ac Ad");
        let board = cards("Kc Kd 7h 5s 2c");
        let unknown = cards("3h 4h 8s 9s Ah Kh");

        let counts = enumerate(&hero, &board, &unknown, 2);
        assert_eq!(counts.total(), trial_space(unknown.len(), 0, 2));

        // Hero loses only when an opponent holds Kh.
        let kh = Card::new(Rank::King, crate::Suit::Hearts);
        let mut expected = EquityCounts::default();
        for h1 in combinations(&unknown, 2) {
            let rest = unknown
                .iter()
                .copied()
                .filter(|c| !h1.contains(c))
                .collect::<Vec<_>>();
            for h2 in combinations(&rest, 2) {
                if h1.contains(&kh) || h2.contains(&kh) {
                    expected.record(Outcome::Loss);
                } else {
                    expected.record(Outcome::Win);
                }
            }
        }

        assert_eq!(counts, expected);
    }

    #[test]
    fn enumerate_split_pots_with_opponents() {
        let hero = cards("Ac 3d");
        let board = cards("Kc Kd 7h 5s 2c");
        let unknown = cards("Ah 3h 4h 6s 7d 8s");

        let counts = enumerate(&hero, &board, &unknown, 2);
        assert_eq!(counts.total(), trial_space(unknown.len(), 0, 2));

        // Showdown against the best of the two opponents.
        let hero_value = HandValue::eval(&[hero, board.clone()].concat());
        let mut expected = EquityCounts::default();
        let mut tie_with_beaten_opponent = false;
        for h1 in combinations(&unknown, 2) {
            let rest = unknown
                .iter()
                .copied()
                .filter(|c| !h1.contains(c))
                .collect::<Vec<_>>();
            for h2 in combinations(&rest, 2) {
                let v1 = HandValue::eval(&[h1.to_vec(), board.clone()].concat());
                let v2 = HandValue::eval(&[h2.to_vec(), board.clone()].concat());
                let outcome = Outcome::showdown(hero_value, v1.max(v2));
                if outcome == Outcome::Tie && v1.min(v2) < hero_value {
                    tie_with_beaten_opponent = true;
                }
                expected.record(outcome);
            }
        }

        // Ah 3h ties the hero while the other opponent can be beaten.
        assert!(tie_with_beaten_opponent);
        assert!(expected.ties > 0 && expected.wins > 0 && expected.losses > 0);
        assert_eq!(counts, expected);
    }

    #[test]
    fn max_opponents_are_accepted() {
        let config = EquityConfig {
            samples: 200,
            seed: Some(7),
            ..Default::default()
        };

        for board in ["2c 3c 4c 5c 6c", "2c 3c 4c 5c", "2c 3c 4c", ""] {
            let equity = compute_odds(&cards("As Ks"), &cards(board), 22, &config).unwrap();
            assert_eq!(equity.mode, EquityMode::Sampled, "{board}");
            assert_eq!(equity.trials, 200, "{board}");
            assert_sums_to_one(&equity);
        }

        // The missing river card comes from the unknown cards too.
        assert_eq!(
            compute_odds(&cards("As Ks"), &cards("2c 3c 4c 5c"), 23, &config),
            Err(EvalError::InvalidOpponentCount {
                requested: 23,
                max: 22
            })
        );
    }

    #[test]
    fn flop_is_sampled() {
        let config = EquityConfig {
            samples: 10_000,
            seed: Some(1),
            ..Default::default()
        };

        let equity = compute_odds(&cards("As Ks"), &cards("Qs Js 2d"), 1, &config).unwrap();
        assert_eq!(equity.mode, EquityMode::Sampled);
        assert_eq!(equity.trials, 10_000);
        assert_sums_to_one(&equity);

        // Open ended straight flush draw with overcards.
        assert!(equity.win > 0.55, "win={}", equity.win);
    }

    #[test]
    fn sampled_with_seed_is_deterministic() {
        let config = EquityConfig {
            samples: 5_000,
            num_tasks: 3,
            seed: Some(42),
            ..Default::default()
        };

        let hero = cards("8d 8h");
        let e1 = compute_odds(&hero, &[], 3, &config).unwrap();
        let e2 = compute_odds(&hero, &[], 3, &config).unwrap();
        assert_eq!(e1, e2);
        assert_eq!(e1.trials, 5_000);
        assert_sums_to_one(&e1);
    }

    #[test]
    fn preflop_aces() {
        let config = EquityConfig {
            samples: 20_000,
            seed: Some(99),
            ..Default::default()
        };

        // Pocket aces win about 85% against one random hand.
        let equity = compute_odds(&cards("Ah Ac"), &[], 1, &config).unwrap();
        assert!(equity.win > 0.80 && equity.win < 0.90, "win={}", equity.win);

        // And much less against many.
        let many = compute_odds(&cards("Ah Ac"), &[], 6, &config).unwrap();
        assert!(many.win < equity.win);
    }

    #[test]
    fn sampled_matches_exact() {
        let hero = cards("Jh Th");
        let board = cards("9h 8c 2h Kd");
        let exact = compute_odds(&hero, &board, 1, &EquityConfig::default()).unwrap();

        let config = EquityConfig {
            exact_threshold: 0,
            samples: 20_000,
            seed: Some(5),
            ..Default::default()
        };
        let sampled = compute_odds(&hero, &board, 1, &config).unwrap();

        assert_eq!(sampled.mode, EquityMode::Sampled);
        assert!((exact.win - sampled.win).abs() < 0.03);
        assert!((exact.loss - sampled.loss).abs() < 0.03);
    }

    #[test]
    fn invalid_requests() {
        let config = EquityConfig::default();

        assert!(matches!(
            compute_odds(&cards("As"), &[], 1, &config),
            Err(EvalError::InvalidCardCount { count: 1, .. })
        ));
        assert_eq!(
            compute_odds(&cards("As Ks"), &cards("2c 3c"), 1, &config),
            Err(EvalError::InvalidBoardSize(2))
        );
        assert_eq!(
            compute_odds(&cards("As Ks"), &cards("2c 3c 4c 5c 6c 7c"), 1, &config),
            Err(EvalError::InvalidBoardSize(6))
        );
        assert_eq!(
            compute_odds(&cards("As Ks"), &cards("As 3c 4c"), 1, &config),
            Err(EvalError::DuplicateCard(Card::new(Rank::Ace, crate::Suit::Spades)))
        );
        assert_eq!(
            compute_odds(&cards("As Ks"), &[], 0, &config),
            Err(EvalError::InvalidOpponentCount {
                requested: 0,
                max: 22
            })
        );
        assert_eq!(
            compute_odds(&cards("As Ks"), &[], 23, &config),
            Err(EvalError::InvalidOpponentCount {
                requested: 23,
                max: 22
            })
        );
        assert_eq!(
            compute_odds(&cards("As Ks"), &cards("2c 3c 4c 5c 6c"), 23, &config),
            Err(EvalError::InvalidOpponentCount {
                requested: 23,
                max: 22
            })
        );
    }
}
