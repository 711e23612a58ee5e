// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Handscope server entry point.
use anyhow::{Result, anyhow};
use axum::{
    Router,
    routing::{get, post},
};
use log::info;
use std::sync::Arc;
use tokio::{net::TcpListener, signal, sync::Semaphore};

use handscope_eval::equity::EquityConfig;

use crate::api;

/// Server config.
#[derive(Debug)]
pub struct Config {
    /// The server listening address.
    pub address: String,
    /// The server listening port.
    pub port: u16,
    /// The number of sampling threads per odds request.
    pub tasks: usize,
    /// The number of sampled deals when odds can't be enumerated.
    pub samples: usize,
    /// Enumerate all deals when there are at most this many.
    pub exact_threshold: u64,
    /// Optional fixed sampling seed.
    pub seed: Option<u64>,
    /// The maximum number of odds requests computed at the same time.
    pub max_odds: usize,
}

impl Config {
    /// The odds settings for this server.
    pub fn equity_config(&self) -> EquityConfig {
        EquityConfig {
            exact_threshold: self.exact_threshold,
            samples: self.samples,
            num_tasks: self.tasks,
            seed: self.seed,
        }
    }
}

/// Default number of odds requests computed at the same time.
pub const DEFAULT_MAX_ODDS: usize = 8;

/// State shared by all the request handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The odds settings.
    pub equity: EquityConfig,
    /// Permits for running odds computations, requests over the limit wait.
    pub odds_permits: Arc<Semaphore>,
}

impl AppState {
    /// Creates a state that runs at most `max_odds` odds computations.
    pub fn new(equity: EquityConfig, max_odds: usize) -> Self {
        Self {
            equity,
            odds_permits: Arc::new(Semaphore::new(max_odds)),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(EquityConfig::default(), DEFAULT_MAX_ODDS)
    }
}

/// Builds the server routes.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/evaluate", post(api::evaluate))
        .route("/odds", post(api::odds))
        .with_state(state)
}

/// Server entry point.
pub async fn run(config: Config) -> Result<()> {
    let addr = format!("{}:{}", config.address, config.port);
    info!("Starting server listening on {}", addr);

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| anyhow!("Tcp listener bind error: {e}"))?;

    let state = AppState::new(config.equity_config(), config.max_odds);

    info!(
        "Odds settings: exact threshold {}, samples {}, tasks {}, max requests {}",
        state.equity.exact_threshold,
        state.equity.samples,
        state.equity.num_tasks,
        config.max_odds
    );

    serve(listener, state, async {
        let _ = signal::ctrl_c().await;
        info!("Received shutdown signal...");
    })
    .await
}

/// Serves requests from a listener until the shutdown future completes.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| anyhow!("Server error: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpStream,
        sync::oneshot,
    };

    #[tokio::test]
    async fn serve_http_requests() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (tx, rx) = oneshot::channel::<()>();
        let server = tokio::spawn(serve(listener, AppState::default(), async {
            let _ = rx.await;
        }));

        let body = r#"{"hole_cards":["2s","2h"],"board_cards":["7d","7c","7s"]}"#;
        let request = format!(
            "POST /evaluate HTTP/1.1\r\n\
             Host: {addr}\r\n\
             Content-Type: application/json\r\n\
             Content-Length: {}\r\n\
             Connection: close\r\n\r\n{body}",
            body.len()
        );

        let mut stream = TcpStream::connect(addr).await.unwrap();
        stream.write_all(request.as_bytes()).await.unwrap();

        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        assert!(response.starts_with("HTTP/1.1 200 OK"), "{response}");
        assert!(response.contains(r#""hand":"Full House""#), "{response}");

        tx.send(()).unwrap();
        server.await.unwrap().unwrap();
    }

    #[test]
    fn config_to_equity_config() {
        let config = Config {
            address: "127.0.0.1".to_string(),
            port: 8001,
            tasks: 2,
            samples: 1_000,
            exact_threshold: 10,
            seed: Some(3),
            max_odds: 2,
        };

        let equity = config.equity_config();
        assert_eq!(equity.num_tasks, 2);
        assert_eq!(equity.samples, 1_000);
        assert_eq!(equity.exact_threshold, 10);
        assert_eq!(equity.seed, Some(3));

        let state = AppState::new(equity, config.max_odds);
        assert_eq!(state.odds_permits.available_permits(), 2);
    }
}
