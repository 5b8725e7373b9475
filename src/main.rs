use er_core::config::core_config_from_values;
use er_core::constants::{HOLDING_CAPACITY_ENV, OVERFLOW_POLICY_ENV, REST_ADDR_ENV};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the ER application
///
/// Loads `.env`, resolves the core configuration once, and serves the REST API with
/// OpenAPI/Swagger UI at `/swagger-ui`.
///
/// # Environment Variables
/// - `ER_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `ER_HOLDING_CAPACITY`: Holding-area capacity (default: 5)
/// - `ER_OVERFLOW_POLICY`: `reject` or `evict-oldest` (default: `reject`)
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If configuration, startup or the server fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("er_run=info".parse()?)
                .add_directive("api_rest=info".parse()?)
                .add_directive("er_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = core_config_from_values(
        std::env::var(HOLDING_CAPACITY_ENV).ok(),
        std::env::var(OVERFLOW_POLICY_ENV).ok(),
    )?;
    let rest_addr =
        std::env::var(REST_ADDR_ENV).unwrap_or_else(|_| er_core::DEFAULT_REST_ADDR.into());

    tracing::info!("++ Starting ER on {}", rest_addr);

    api_rest::serve(&rest_addr, &cfg).await
}
