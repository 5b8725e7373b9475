//! Standalone REST API server binary.
//!
//! ## Purpose
//! Runs the REST API server on its own, without loading a `.env` file.
//!
//! ## Intended use
//! Useful during development when the environment is already set up by the shell. The
//! workspace's main `er-run` binary does the same job after loading `.env`.

use er_core::config::core_config_from_values;
use er_core::constants::{HOLDING_CAPACITY_ENV, OVERFLOW_POLICY_ENV, REST_ADDR_ENV};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the ER REST API server
///
/// # Environment Variables
/// - `ER_REST_ADDR`: Server address (default: "0.0.0.0:3000")
/// - `ER_HOLDING_CAPACITY`: Holding-area capacity (default: 5)
/// - `ER_OVERFLOW_POLICY`: `reject` or `evict-oldest` (default: `reject`)
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the capacity or overflow policy is invalid,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?)
                .add_directive("er_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = core_config_from_values(
        std::env::var(HOLDING_CAPACITY_ENV).ok(),
        std::env::var(OVERFLOW_POLICY_ENV).ok(),
    )?;
    let addr =
        std::env::var(REST_ADDR_ENV).unwrap_or_else(|_| er_core::DEFAULT_REST_ADDR.into());

    api_rest::serve(&addr, &cfg).await
}
