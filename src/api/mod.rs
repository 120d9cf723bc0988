use std::sync::Arc;

use axum::routing::{ get, post };
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod qr;
pub mod hosting;
pub mod share;
pub mod events;
pub mod ui;

use crate::config::Config;
use crate::services::{ GeneratorService, ImageHost };
use crate::session::SessionStore;

#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<GeneratorService>,
    pub sessions: Arc<SessionStore>,
    pub image_host: Option<Arc<dyn ImageHost>>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(
        generator: Arc<GeneratorService>,
        sessions: Arc<SessionStore>,
        image_host: Option<Arc<dyn ImageHost>>,
        config: Arc<Config>
    ) -> Self {
        Self {
            generator,
            sessions,
            image_host,
            config,
        }
    }
}

/// The full HTTP surface. A function rather than part of `main` so
/// integration tests can mount the same router against mock collaborators.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(ui::index))
        .route("/health", get(health_check))
        .route("/api/qr", post(qr::generate))
        .route("/api/qr/{session_id}", get(qr::get_artifact).delete(qr::clear))
        .route("/api/qr/{session_id}/image", get(qr::get_image))
        .route("/api/qr/{session_id}/download", get(qr::download))
        .route("/api/qr/{session_id}/host", post(hosting::host))
        .route("/api/qr/{session_id}/share-links", get(share::share_links))
        .route("/api/qr/{session_id}/events", get(events::subscribe))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

async fn health_check() -> &'static str {
    "OK"
}
