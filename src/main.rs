use std::sync::Arc;

use qr_studio::{ Config, Result };
use tracing_subscriber::{ layer::SubscriberExt, util::SubscriberInitExt };

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber
        ::registry()
        .with(
            tracing_subscriber::EnvFilter
                ::try_from_default_env()
                .unwrap_or_else(|_| "qr_studio=debug,tower_http=debug".into())
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| qr_studio::AppError::Config(e.to_string()))?;

    tracing::info!("Starting qr-studio (hosting enabled: {})", config.hosting_enabled());

    // Initialize services
    let generator = Arc::new(qr_studio::services::GeneratorService::new());
    let sessions = Arc::new(qr_studio::session::SessionStore::new());

    let image_host: Option<Arc<dyn qr_studio::services::ImageHost>> = match &config.hosting {
        Some(hosting) => {
            let host = qr_studio::services::CloudinaryHost::new(hosting)?;
            tracing::info!("Image hosting configured for cloud {}", hosting.cloud_name);
            Some(Arc::new(host))
        }
        None => None,
    };

    let config = Arc::new(config);

    // Create app state and router
    let app_state = qr_studio::api::AppState::new(generator, sessions, image_host, config.clone());
    let app = qr_studio::api::router(app_state);

    // Start server
    let addr = format!("{}:{}", config.server_host, config.server_port);
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener
        ::bind(&addr).await
        .map_err(|e| qr_studio::AppError::Internal(e.to_string()))?;

    axum::serve(listener, app).await.map_err(|e| qr_studio::AppError::Internal(e.to_string()))?;

    Ok(())
}
