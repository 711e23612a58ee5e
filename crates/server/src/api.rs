// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! HTTP handlers and JSON request and response types.
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Instant;
use thiserror::Error;

use handscope_eval::{
    Card, EvalError, evaluate as evaluate_cards,
    equity::{self, BOARD_SIZE, Equity, EquityMode, HOLE_SIZE},
};

use crate::server::AppState;

/// Hand evaluation request.
#[derive(Debug, Serialize, Deserialize)]
pub struct EvaluateRequest {
    /// The player hole cards.
    pub hole_cards: Vec<String>,
    /// The board cards.
    #[serde(default)]
    pub board_cards: Vec<String>,
}

/// Hand evaluation response.
#[derive(Debug, Serialize, Deserialize)]
pub struct EvaluateResponse {
    /// The hand name.
    pub hand: String,
    /// The hand value, greater is stronger.
    pub rank: u32,
    /// The five cards that make the hand.
    pub best_hand: Vec<Card>,
}

/// Hand odds request.
#[derive(Debug, Serialize, Deserialize)]
pub struct OddsRequest {
    /// The player hole cards.
    pub hole_cards: Vec<String>,
    /// The board cards.
    #[serde(default)]
    pub board_cards: Vec<String>,
    /// The number of opponents with random hole cards.
    pub num_opponents: usize,
}

/// Hand odds response.
#[derive(Debug, Serialize, Deserialize)]
pub struct OddsResponse {
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

impl From<Equity> for OddsResponse {
    fn from(equity: Equity) -> Self {
        Self {
            win: equity.win,
            tie: equity.tie,
            loss: equity.loss,
            trials: equity.trials,
            mode: equity.mode,
        }
    }
}

/// Errors returned by the handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid input.
    #[error(transparent)]
    Eval(#[from] EvalError),
    /// The odds worker failed.
    #[error("odds worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
    /// The odds permits were closed.
    #[error("odds workers unavailable")]
    Unavailable(#[from] tokio::sync::AcquireError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind) = match &self {
            ApiError::Eval(e) => {
                warn!("Rejected request: {e}");
                (StatusCode::BAD_REQUEST, e.kind())
            }
            ApiError::Worker(e) => {
                error!("Odds worker error: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal")
            }
            ApiError::Unavailable(_) => {
                error!("Odds permits closed");
                (StatusCode::SERVICE_UNAVAILABLE, "Unavailable")
            }
        };

        let body = Json(json!({
            "error": self.to_string(),
            "kind": kind,
        }));

        (status, body).into_response()
    }
}

/// Health check.
///
/// GET /health
pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// Evaluates the best hand from the hole and board cards.
///
/// POST /evaluate
pub async fn evaluate(Json(req): Json<EvaluateRequest>) -> Result<Json<EvaluateResponse>, ApiError> {
    let now = Instant::now();

    let (hole, board) = parse_cards(&req.hole_cards, &req.board_cards)?;
    let cards = [hole, board].concat();
    let value = evaluate_cards(&cards)?;

    info!(
        "Evaluated {} cards: {value} in {:.3}ms",
        cards.len(),
        now.elapsed().as_secs_f64() * 1e3
    );

    Ok(Json(EvaluateResponse {
        hand: value.name(),
        rank: value.value(),
        best_hand: value.hand().to_vec(),
    }))
}

/// Computes win, tie, and loss probabilities against random opponents.
///
/// POST /odds
pub async fn odds(
    State(state): State<AppState>,
    Json(req): Json<OddsRequest>,
) -> Result<Json<OddsResponse>, ApiError> {
    let now = Instant::now();

    let (hole, board) = parse_cards(&req.hole_cards, &req.board_cards)?;
    let num_opponents = req.num_opponents;

    // Sampling is CPU bound, keep it off the async workers. The permit is
    // held by the worker so a dropped request still counts until it ends.
    let permit = state.odds_permits.clone().acquire_owned().await?;
    let config = state.equity.clone();
    let equity = tokio::task::spawn_blocking(move || {
        let _permit = permit;
        equity::compute_odds(&hole, &board, num_opponents, &config)
    })
    .await??;

    debug!("Odds mode {:?} with {} trials", equity.mode, equity.trials);
    info!(
        "Computed odds against {num_opponents} opponents: win {:.4} tie {:.4} loss {:.4} in {:.3}ms",
        equity.win,
        equity.tie,
        equity.loss,
        now.elapsed().as_secs_f64() * 1e3
    );

    Ok(Json(equity.into()))
}

/// Parses hole and board tokens checking the cards counts.
fn parse_cards(hole: &[String], board: &[String]) -> Result<(Vec<Card>, Vec<Card>), EvalError> {
    let hole = Card::parse_many(hole)?;
    if hole.len() != HOLE_SIZE {
        return Err(EvalError::InvalidCardCount {
            count: hole.len(),
            expected: "2 hole cards",
        });
    }

    let board = Card::parse_many(board)?;
    if board.len() > BOARD_SIZE {
        return Err(EvalError::InvalidBoardSize(board.len()));
    }

    Ok((hole, board))
}
