//! Role Map server composition root.

use std::sync::Arc;
use std::time::Duration;

use http::HeaderValue;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use role_map::adapters::http::{role_map_router, RoleMapAppState};
use role_map::adapters::platform::InMemoryPlatform;
use role_map::config::{AppConfig, PlatformConfig, ServerConfig, ValidationError};
use role_map::domain::role_map::MulticheckSelection;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config.server);

    let platform = Arc::new(seed_platform(&config.platform)?);
    let state = RoleMapAppState::from_platform(platform);

    let app = role_map_router()
        .with_state(state)
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.server));

    let address = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(address).await?;

    info!(%address, environment = ?config.server.environment, "role-map listening");

    axum::serve(listener, app).await?;
    Ok(())
}

fn init_tracing(server: &ServerConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    if server.is_production() {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .compact()
            .init();
    }
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    let layer = if origins.is_empty() {
        CorsLayer::new().allow_origin(Any)
    } else {
        CorsLayer::new().allow_origin(origins)
    };
    layer.allow_methods(Any).allow_headers(Any)
}

fn seed_platform(config: &PlatformConfig) -> Result<InMemoryPlatform, ValidationError> {
    let mut builder = InMemoryPlatform::builder().default_role(config.default_role_id()?);

    for role in config.catalog_roles()? {
        builder = builder.role(role.id, role.name);
    }
    if let Some(roles) = config.membership_roles_list()? {
        builder = builder.membership_roles(MulticheckSelection::enabled(roles));
    }

    Ok(builder.build())
}
