#![warn(clippy::pedantic, clippy::all, clippy::nursery)]
#![allow(clippy::single_match_else)]

use crate::{
    config::RuntimeConfiguration,
    error::{BindListenerSnafu, MahasiswaResult, ServeSnafu},
    routes::router,
    state::MahasiswaState,
};
use snafu::ResultExt;
use sqlx::mysql::MySqlPoolOptions;
use tokio::net::TcpListener;
use tokio::signal;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[macro_use]
extern crate tracing;

mod config;
mod data;
mod envelope;
mod error;
mod maud_conveniences;
mod routes;
mod service;
mod state;
mod views;

const MAX_CONNECTIONS: u32 = 10;

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    warn!("signal received, starting graceful shutdown");
}

#[tokio::main]
async fn main() -> MahasiswaResult<()> {
    let dotenv = dotenvy::dotenv();

    tracing::subscriber::set_global_default(
        FmtSubscriber::builder()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .finish(),
    )
    .expect("unable to set tracing subscriber");

    info!("`tracing` online");
    if let Err(e) = dotenv {
        debug!(?e, "No .env loaded, using process environment only");
    }

    let config = RuntimeConfiguration::new()?;
    let state = MahasiswaState::new(
        MySqlPoolOptions::new().max_connections(MAX_CONNECTIONS),
        config,
    );

    let server_address = state.config().server_address();
    let listener = TcpListener::bind(server_address)
        .await
        .context(BindListenerSnafu {
            address: server_address,
        })?;
    info!(%server_address, "Listening");

    state.spawn_connectivity_check();

    let served = axum::serve(listener, router(state.clone()))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context(ServeSnafu);

    state.sensible_shutdown().await;
    served
}
