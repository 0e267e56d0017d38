//! # pay-api
//!
//! HTTP API layer for charge-relay.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - Method dispatch for charge requests and CORS preflight
//! - Configuration from environment and `config/relay.toml`
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | POST | any | Validate `payment_info` and forward to Stripe |
//! | OPTIONS | any | CORS preflight |

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
