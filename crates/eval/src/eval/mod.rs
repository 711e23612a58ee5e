// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Poker hand evaluator.
//!
//! Five cards hands are classified directly by grouping the cards by rank and
//! by suit. Six and seven cards hands are evaluated by taking the best value
//! among all their five cards subsets.
//!
//! [HandValue::eval] skips input validation and is used in the odds loops,
//! [evaluate] checks the number of cards and duplicates first.

mod hand;
pub use hand::{HandRank, HandValue, evaluate};
