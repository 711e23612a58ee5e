// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Commands output.
use anyhow::Result;
use std::{fmt::Write, time::Instant};

use handscope_eval::{
    Card, evaluate as evaluate_cards,
    equity::{EquityConfig, compute_odds},
};

/// Evaluates cards tokens and formats the best hand.
pub fn evaluate(tokens: &[String]) -> Result<String> {
    let cards = Card::parse_many(tokens)?;
    let value = evaluate_cards(&cards)?;

    let kickers = value
        .kickers()
        .iter()
        .map(|r| r.to_string())
        .collect::<Vec<_>>()
        .join(" ");

    let mut out = String::new();
    writeln!(out, "Hand:      {}", value.name())?;
    writeln!(out, "Best five: {}", join(value.hand()))?;
    writeln!(out, "Kickers:   {kickers}")?;
    write!(out, "Rank:      {}", value.value())?;

    Ok(out)
}

/// Odds settings from the command line flags.
pub fn odds_config(samples: usize, tasks: usize, seed: Option<u64>) -> EquityConfig {
    EquityConfig {
        samples,
        num_tasks: tasks,
        seed,
        ..Default::default()
    }
}

/// Computes and formats the odds of a hand.
pub fn odds(
    hole: &[String],
    board: &[String],
    opponents: usize,
    config: &EquityConfig,
) -> Result<String> {
    let hole = Card::parse_many(hole)?;
    let board = Card::parse_many(board)?;

    let now = Instant::now();
    let equity = compute_odds(&hole, &board, opponents, config)?;
    let elapsed = now.elapsed().as_secs_f64();

    let mut out = String::new();
    writeln!(out, "Hole:      {}", join(&hole))?;
    writeln!(out, "Board:     {}", join(&board))?;
    writeln!(out, "Opponents: {opponents}")?;
    writeln!(out, "Win:       {:6.2}%", equity.win * 100.0)?;
    writeln!(out, "Tie:       {:6.2}%", equity.tie * 100.0)?;
    writeln!(out, "Loss:      {:6.2}%", equity.loss * 100.0)?;
    writeln!(out, "Trials:    {} ({:?})", equity.trials, equity.mode)?;
    write!(out, "Elapsed:   {elapsed:.3}s")?;

    Ok(out)
}

fn join(cards: &[Card]) -> String {
    cards
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
