// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Handscope command line evaluator.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
use anyhow::Result;
use clap::{Parser, Subcommand, value_parser};

mod commands;

#[derive(Debug, Parser)]
#[command(about = "Poker hand evaluation and odds")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Evaluates the best hand out of 5 to 7 cards.
    Evaluate {
        /// The cards, for example As Kd Td 7c 2h.
        #[clap(required = true, num_args = 5..=7)]
        cards: Vec<String>,
    },
    /// Computes win, tie, and loss odds against random opponents.
    Odds {
        /// The two hole cards.
        #[clap(long, num_args = 2, required = true)]
        hole: Vec<String>,
        /// The board cards, none or 3 to 5 cards.
        #[clap(long, num_args = 0..=5)]
        board: Vec<String>,
        /// The number of opponents.
        #[clap(long, short, default_value_t = 1, value_parser = value_parser!(u8).range(1..=22))]
        opponents: u8,
        /// Number of sampled deals when odds can't be enumerated.
        #[clap(long, default_value_t = 50_000)]
        samples: usize,
        /// Number of sampling threads.
        #[clap(long, default_value_t = 4, value_parser = value_parser!(u16).range(1..=64))]
        tasks: u16,
        /// Fixed sampling seed.
        #[clap(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let report = match cli.command {
        Command::Evaluate { cards } => commands::evaluate(&cards)?,
        Command::Odds {
            hole,
            board,
            opponents,
            samples,
            tasks,
            seed,
        } => {
            let config = commands::odds_config(samples, tasks as usize, seed);
            commands::odds(&hole, &board, opponents as usize, &config)?
        }
    };

    println!("{report}");

    Ok(())
}
