//! # Configuration
//!
//! The server is configured through:
//! - Base configuration file (`base_config.ron`)
//! - Environment variables prefixed with `USERREGISTRY_` (override base config)
//!
//! ## Base Configuration
//!
//! The default configuration is loaded from `base_config.ron`:
//!
//! ```ron
//! Config(
//!     app: AppConfig(
//!         listen: "localhost:8081",
//!         cors_allowed_origins: ["*"],
//!     ),
//!     deployment: DeploymentConfig(
//!         profile: "development",
//!         host: "localhost",
//!     ),
//!     store: StoreConfig(
//!         data_file: "data/users.json",
//!         local_storage_dir: "local-storage",
//!     ),
//! )
//! ```
//!
//! ## Environment Variable Overrides
//!
//! Use double underscores (`__`) to override nested configuration fields:
//!
//! ```bash
//! export USERREGISTRY_APP__LISTEN="0.0.0.0:8081"
//! export USERREGISTRY_APP__CORS_ALLOWED_ORIGINS="http://localhost:5173,http://localhost:3000"
//!
//! # Anything but development on a loopback host uses the client-local store
//! export USERREGISTRY_DEPLOYMENT__PROFILE="production"
//! export USERREGISTRY_DEPLOYMENT__HOST="registry.example.com"
//!
//! export USERREGISTRY_STORE__DATA_FILE="./data/users.json"
//! export USERREGISTRY_STORE__LOCAL_STORAGE_DIR="./local-storage"
//!
//! cargo run --bin user-registry-server
//! ```
//!
//! ## CORS Configuration
//!
//! The `cors_allowed_origins` field controls cross-origin resource sharing:
//! - **Empty array `[]`**: CORS is disabled
//! - **Specific origins**: Only listed origins are allowed
//! - **Wildcard `["*"]`**: All origins are allowed (permissive mode, the default)
//!
//! When specific origins are configured, the server allows GET, POST and OPTIONS with a
//! `Content-Type` header.
//!
//! # Logging
//!
//! Logging is controlled via the `RUST_LOG` environment variable. Defaults to `info` level.
//!
//! ```text
//! INFO server listening at localhost:8081
//! INFO open_selected_store{profile=development host=localhost}: using file-backed record store path=data/users.json
//! WARN signup{username=ann1}: Username or mobile number already exists failure=conflict
//! ```

use core::str::FromStr;

use axum::http::{HeaderValue, Method, header};
use tokio::{net::TcpListener, signal, task};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{Subscriber, subscriber};
use tracing_subscriber::{EnvFilter, Registry, fmt::format::FmtSpan, layer::SubscriberExt};
use user_registry_engine::{
    AccountService,
    selector::{self, DeploymentContext, StoreLocations},
};
use user_registry_server::{App, config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = task::spawn_blocking(config::get_configuration).await??;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    subscriber::set_global_default(make_tracing_subscriber(env_filter))?;

    let app = {
        let context = DeploymentContext::from(config.deployment);
        let locations = StoreLocations::from(config.store);

        let selected = selector::open_selected_store(&context, &locations).await?;

        App::builder().service(AccountService::new(selected.store().clone())).build()
    };

    let router = {
        let router = user_registry_server::create_router(app).layer(TraceLayer::new_for_http());

        match create_cors_layer(&config.app.cors_allowed_origins)? {
            Some(cors) => router.layer(cors),
            None => router,
        }
    };

    let listener = TcpListener::bind(&config.app.listen)
        .await
        .inspect(|_| tracing::info!("server listening at {}", config.app.listen))?;

    axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await?;

    Ok(())
}

fn create_cors_layer<S>(allowed_origins: &[S]) -> anyhow::Result<Option<CorsLayer>>
where
    S: AsRef<str>,
{
    if allowed_origins.is_empty() {
        return Ok(None);
    }

    if allowed_origins.iter().map(AsRef::as_ref).any(|s| s == "*") {
        return Ok(Some(CorsLayer::permissive()));
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .map(AsRef::as_ref)
        .map(FromStr::from_str)
        .collect::<Result<_, _>>()?;

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Ok(Some(cors))
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
        core::future::pending::<()>().await;
    }

    tracing::info!("shutting down");
}

fn make_tracing_subscriber(env_filter: EnvFilter) -> impl Subscriber {
    Registry::default()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_line_number(true)
                .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE),
        )
        .with(env_filter)
}
