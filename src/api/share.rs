use axum::extract::{ Path, State };
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use crate::error::{ AppError, Result };
use crate::services::share_links::{ build_share_links, ShareLink };

use super::AppState;

#[derive(Serialize)]
pub struct ShareLinksResponse {
    pub target: String,
    pub links: Vec<ShareLink>,
}

/// Share links for the session's artifact. The hosted URL is the target
/// when one is attached; otherwise the configured fallback stands in, as
/// in deployments without a hosting stage.
pub async fn share_links(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>
) -> Result<Json<ShareLinksResponse>> {
    let (_, artifact) = state.sessions
        .snapshot(session_id).await
        .ok_or(AppError::ArtifactNotFound)?;

    let target = artifact.hosted_url.unwrap_or_else(|| state.config.share_fallback_url.clone());

    Ok(
        Json(ShareLinksResponse {
            links: build_share_links(&target),
            target,
        })
    )
}
