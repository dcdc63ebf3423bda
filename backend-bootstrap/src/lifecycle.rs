use anyhow::Result;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use backend_interfaces_http::{build_router, BotState};

use crate::context::AppContext;
use crate::polling_bridge::spawn_polling_bridge;

fn build_router_with_layers(state: BotState) -> Router {
    let max_body_bytes = state.app.config.max_body_bytes;
    let request_timeout_seconds = state.app.config.request_timeout_seconds;
    build_router(state)
        .layer(CorsLayer::permissive())
        .layer(RequestBodyLimitLayer::new(
            usize::try_from(max_body_bytes).unwrap_or(usize::MAX),
        ))
        .layer(TimeoutLayer::new(std::time::Duration::from_secs(
            request_timeout_seconds,
        )))
        .layer(TraceLayer::new_for_http())
}

pub async fn run_standalone() -> Result<()> {
    let context = AppContext::new().await?;
    let state = context.state.clone();
    let bot_state = BotState::new(state.clone());

    match &state.config.public_base_url {
        Some(base_url) => {
            let webhook_url = format!("{}/webhook", base_url);
            context
                .telegram
                .set_webhook(&webhook_url, state.config.webhook_secret.as_deref())
                .await?;
        }
        None => {
            info!("no public_base_url configured, falling back to long polling");
            spawn_polling_bridge(bot_state.clone(), context.telegram.clone());
        }
    }

    let app = build_router_with_layers(bot_state);
    let addr: std::net::SocketAddr = state.config.bind_addr.parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!("listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = signal(SignalKind::terminate()).expect("sigterm handler");
        sigterm.recv().await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
