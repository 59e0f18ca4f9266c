//! Keep-alive HTTP endpoint
//!
//! One static route so an external process supervisor can see the
//! process as alive. Carries no bot logic.

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;
use tracing::info;

async fn liveness() -> &'static str {
    "Discord bot is running!"
}

pub fn router() -> Router {
    Router::new()
        .route("/", get(liveness))
        .layer(TraceLayer::new_for_http())
}

pub async fn serve(port: u16) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!(port = %port, "Keep-alive endpoint listening");
    axum::serve(listener, router()).await
}
