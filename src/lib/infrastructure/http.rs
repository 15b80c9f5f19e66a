//! HTTP Server

use std::{
    net::{Ipv4Addr, SocketAddr, TcpListener},
    time::Duration,
};

use anyhow::Context;
use axum::{
    extract::Request,
    http::{header, HeaderValue},
    Router,
};
use axum_server::Handle;
use clap::Parser;
use state::AppState;
use tokio::signal;
use tower_http::{
    catch_panic::CatchPanicLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer,
};
use tracing::{debug, info, info_span};

use crate::domain::contact::ContactService;

mod errors;
mod handlers;
mod open_api;

pub mod state;

pub use errors::{ApiError, ErrorResponse};

/// Configuration for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
pub struct HttpServerConfig {
    /// The port to listen on
    #[arg(short, long, env = "HTTP_PORT", default_value = "3000")]
    pub port: u16,
}

/// The application's HTTP server
#[derive(Debug)]
pub struct HttpServer {
    router: Router,
    listener: TcpListener,
}

impl HttpServer {
    /// Returns a new HTTP server bound to the port specified in `config`.
    pub async fn new(
        contact_service: impl ContactService,
        config: HttpServerConfig,
    ) -> anyhow::Result<Self> {
        let router = router(AppState::new(contact_service));

        let address = SocketAddr::from((Ipv4Addr::UNSPECIFIED, config.port));
        let listener = TcpListener::bind(address)
            .with_context(|| format!("failed to listen on {}", config.port))?;

        listener
            .set_nonblocking(true)
            .context("failed to make listener non-blocking")?;

        Ok(Self { router, listener })
    }

    /// The address the server is bound to
    pub fn local_addr(&self) -> anyhow::Result<SocketAddr> {
        self.listener
            .local_addr()
            .context("failed to get local address")
    }

    /// Runs the HTTP server until a shutdown signal arrives.
    #[mutants::skip]
    pub async fn run(self) -> anyhow::Result<()> {
        debug!("listening on {}", self.local_addr()?);

        let handle = Handle::new();

        let server = axum_server::from_tcp(self.listener)
            .handle(handle.clone())
            .serve(self.router.into_make_service());

        tokio::select! {
            result = server => result.context("server error")?,
            _ = shutdown_signal(Some(handle)) => {
                info!("Shutting down HTTP server");
            }
        }

        Ok(())
    }
}

/// Create the application's router.
///
/// Every response, errors and fallbacks included, carries permissive CORS
/// headers.
pub fn router<C: ContactService>(state: AppState<C>) -> Router {
    let trace_layer = TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
        let uri = request.uri().to_string();
        info_span!("http_request", method = ?request.method(), uri)
    });

    Router::new()
        .nest("/api", handlers::router::<C>())
        .layer(CatchPanicLayer::custom(handlers::panic_handler))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("POST, OPTIONS"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        ))
        .layer(trace_layer)
        .with_state(state)
}

#[mutants::skip]
async fn shutdown_signal(handle: Option<Handle>) {
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
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    if let Some(handle) = handle {
        debug!("shutting down gracefully");
        handle.graceful_shutdown(Some(Duration::from_secs(10)));
    }
}
