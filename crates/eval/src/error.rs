// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Evaluation errors.
use thiserror::Error;

use handscope_cards::{Card, CardError};

/// Validation errors for evaluation and odds requests.
///
/// All checks run before any computation so a request either produces a full
/// result or exactly one of these errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// A card token with an unknown rank or suit.
    #[error("invalid card format {0:?}")]
    InvalidCardFormat(String),
    /// The same card appears more than once.
    #[error("duplicate card {0}")]
    DuplicateCard(Card),
    /// Wrong number of cards for the operation.
    #[error("invalid card count {count}, expected {expected}")]
    InvalidCardCount {
        /// The number of cards received.
        count: usize,
        /// The accepted counts.
        expected: &'static str,
    },
    /// The board is not empty, a flop, a turn or a river.
    #[error("invalid board size {0}, expected 0, 3, 4 or 5 cards")]
    InvalidBoardSize(usize),
    /// Zero opponents or more than the deck can deal to.
    #[error("invalid opponent count {requested}, expected 1 to {max}")]
    InvalidOpponentCount {
        /// The number of opponents requested.
        requested: usize,
        /// The maximum number of opponents for this request.
        max: usize,
    },
}

impl EvalError {
    /// The error variant name.
    pub fn kind(&self) -> &'static str {
        match self {
            EvalError::InvalidCardFormat(_) => "InvalidCardFormat",
            EvalError::DuplicateCard(_) => "DuplicateCard",
            EvalError::InvalidCardCount { .. } => "InvalidCardCount",
            EvalError::InvalidBoardSize(_) => "InvalidBoardSize",
            EvalError::InvalidOpponentCount { .. } => "InvalidOpponentCount",
        }
    }
}

impl From<CardError> for EvalError {
    fn from(err: CardError) -> Self {
        match err {
            CardError::InvalidCardFormat(token) => EvalError::InvalidCardFormat(token),
            CardError::DuplicateCard(card) => EvalError::DuplicateCard(card),
        }
    }
}
