//! Trivia · Question API Backend
//!
//! - Axum HTTP JSON API: categories, paginated questions, search, create/delete, quiz play
//! - In-memory question store seeded with a built-in bank (+ optional TOML bank)
//!
//! Important env variables:
//!   PORT                : u16 (default 5000)
//!   TRIVIA_CONFIG_PATH  : path to TOML config (page size, quiz seed, extra questions)
//!   LOG_LEVEL           : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT          : "pretty" (default) or "json"

mod telemetry;
mod util;
mod domain;
mod config;
mod seeds;
mod store;
mod paginate;
mod quiz;
mod state;
mod protocol;
mod error;
mod logic;
mod routes;

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::info;

use crate::config::{load_config_from_env, port_from_env};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  let cfg = load_config_from_env();
  let state = Arc::new(AppState::from_config(cfg).await);

  // Routes plus CORS, JSON fallbacks and tracing layers.
  let app = build_router(state);

  let addr = SocketAddr::from(([0, 0, 0, 0], port_from_env()));
  let listener = TcpListener::bind(addr).await?;
  info!(target: "trivia_backend", %addr, "HTTP server listening");
  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await?;
  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::error!(target: "trivia_backend", error = %e, "Failed to listen for ctrl-c; running until killed");
    std::future::pending::<()>().await;
  }
  info!(target: "trivia_backend", "Shutdown requested");
}
