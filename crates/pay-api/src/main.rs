//! # Charge Relay
//!
//! Forwards browser payment requests to the Stripe Charges API.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export STRIPE_API_KEY_SECRET_TEST=sk_test_...
//! export STRIPE_API_KEY_SECRET_LIVE=sk_live_...
//!
//! # Run the server
//! charge-relay
//! ```

use pay_api::{routes, state::AppState};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging (LOG_FORMAT=json for structured output)
    let filter = EnvFilter::builder()
        .with_default_directive(Level::INFO.into())
        .from_env_lossy();
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer())
            .with(filter)
            .init();
    }

    // Print banner
    print_banner();

    // Initialize application state
    let state = AppState::new()?;

    let addr = state.config.socket_addr()?;
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);
    info!("Charge provider: {}", state.forwarder.provider_name());
    info!(
        "CORS: {}",
        if state.config.cors_enabled {
            "Access-Control-Allow-Origin: *"
        } else {
            "disabled"
        }
    );

    // Create router
    let app = routes::create_router(state);

    // Start server
    info!("Charge relay starting on http://{}", addr);

    if !is_prod {
        info!("Health: http://{}/health", addr);
        info!("Charge: POST http://{}/", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn print_banner() {
    println!(
        r#"
  Charge Relay
  ━━━━━━━━━━━━━━━━━━━━━━━
  JSON → Stripe Charges
  Version: {}

"#,
        env!("CARGO_PKG_VERSION")
    );
}
