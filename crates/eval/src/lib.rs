// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Handscope Poker hand evaluator.
//!
//! Poker hand evaluator for 5, 6 and 7 cards hands and win/tie/loss odds
//! calculator against random opponents.
//!
//! To use the evaluator create a hand and use [HandValue] to evaluate the hand
//! and get its rank:
//!
//! ```
//! # use handscope_eval::*;
//! // 2c, 3c, .., Jc
//! let cards = Deck::default().into_iter().take(10).collect::<Vec<_>>();
//! let v1 = HandValue::eval(&cards[0..5]);
//! let v2 = HandValue::eval(&cards[5..]);
//! assert!(v2 > v1);
//! ```
//!
//! For input that comes from users use [evaluate] that checks the cards
//! count and duplicates:
//!
//! ```
//! # use handscope_eval::*;
//! let cards = Card::parse_many(&["2s", "2h", "7d", "7c", "7s"]).unwrap();
//! let value = evaluate(&cards).unwrap();
//! assert_eq!(value.rank(), HandRank::FullHouse);
//! ```
//!
//! Odds are computed by [compute_odds](equity::compute_odds) that enumerates
//! all the outcomes when there are few of them or samples them in parallel:
//!
//! ```
//! # use handscope_eval::{*, equity::*};
//! let hero = Card::parse_many(&["As", "Ks"]).unwrap();
//! let board = Card::parse_many(&["Ad", "Kd", "2c", "2d", "7h"]).unwrap();
//! let equity = compute_odds(&hero, &board, 1, &EquityConfig::default()).unwrap();
//! assert_eq!(equity.mode, EquityMode::Exact);
//! assert!(equity.win > equity.loss);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
pub mod equity;
pub mod eval;
pub use eval::{HandRank, HandValue, evaluate};

mod error;
pub use error::EvalError;

// Reexport cards types.
pub use handscope_cards::{Card, CardError, Deck, Rank, Suit};
