// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0
use clap::Parser;
use handscope_server::server;
use log::error;

#[derive(Debug, Parser)]
struct Cli {
    /// The server listening address.
    #[clap(long, short, default_value = "127.0.0.1")]
    address: String,
    /// The server listening port.
    #[clap(long, short, default_value_t = 8001)]
    port: u16,
    /// Number of sampling threads per odds request.
    #[clap(long, default_value_t = 4, value_parser = clap::value_parser!(u16).range(1..=64))]
    tasks: u16,
    /// Number of sampled deals when odds can't be enumerated.
    #[clap(long, default_value_t = 50_000, value_parser = clap::value_parser!(u32).range(1_000..=1_000_000))]
    samples: u32,
    /// Enumerate all deals when there are at most this many.
    #[clap(long, default_value_t = 100_000, value_parser = clap::value_parser!(u64).range(1..=10_000_000))]
    exact_threshold: u64,
    /// Fixed sampling seed for reproducible odds.
    #[clap(long)]
    seed: Option<u64>,
    /// Maximum number of odds requests computed at the same time.
    #[clap(long, default_value_t = server::DEFAULT_MAX_ODDS as u16, value_parser = clap::value_parser!(u16).range(1..=256))]
    max_odds: u16,
}


#[tokio::main]
async fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .format_timestamp_millis()
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    let config = handscope_server::Config {
        address: cli.address,
        port: cli.port,
        tasks: cli.tasks as usize,
        samples: cli.samples as usize,
        exact_threshold: cli.exact_threshold,
        seed: cli.seed,
        max_odds: cli.max_odds as usize,
    };

    if let Err(e) = server::run(config).await {
        error!("{e}");
    }
}
