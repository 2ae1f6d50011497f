//! HTTP gateway for the floating contact widget.
//!
//! Two surfaces share one router: the admin settings API under
//! `/api/settings/{tenant}`, and the public widget endpoints under
//! `/widget/{tenant}` that host pages embed cross-origin.

pub mod render;
pub mod settings_routes;
pub mod state;
pub mod widget_routes;

use std::net::SocketAddr;

use {
    axum::{Router, routing::get},
    tower_http::cors::CorsLayer,
    tracing::info,
};

pub use state::{AppState, SharedState};

/// Build the gateway router.
pub fn router(state: SharedState) -> Router {
    let admin = Router::new().route(
        "/api/settings/{tenant}",
        get(settings_routes::get_settings)
            .put(settings_routes::put_settings)
            .delete(settings_routes::delete_settings),
    );

    // The widget endpoints are fetched from arbitrary host pages.
    let public = Router::new()
        .route("/widget/{tenant}", get(widget_routes::widget_html))
        .route("/widget/{tenant}/embed.js", get(widget_routes::embed_js))
        .layer(CorsLayer::permissive());

    admin.merge(public).with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn serve(listen: SocketAddr, state: SharedState) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(listen).await?;
    info!(%listen, "floatkit gateway listening");
    axum::serve(listener, router(state)).await?;
    Ok(())
}
