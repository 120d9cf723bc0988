use axum::extract::{ Path, State };
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use crate::error::{ AppError, Result };
use crate::services::generator_service::DOWNLOAD_FILENAME;

use super::AppState;

#[derive(Serialize)]
pub struct HostResponse {
    pub session_id: Uuid,
    pub hosted_url: String,
}

/// Upload the session's current artifact. The snapshot's revision token is
/// re-checked after the upload so a URL never attaches to bytes that were
/// replaced or cleared while the request was in flight.
pub async fn host(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>
) -> Result<Json<HostResponse>> {
    let image_host = state.image_host.as_ref().ok_or(AppError::HostingDisabled)?;

    let (revision, artifact) = state.sessions
        .snapshot(session_id).await
        .ok_or(AppError::ArtifactNotFound)?;

    let hosted_url = match image_host.upload(&artifact.image_bytes, DOWNLOAD_FILENAME).await {
        Ok(url) => url,
        Err(e) => {
            // Non-fatal: the stored artifact and its download stay usable.
            tracing::warn!(session_id = %session_id, error = %e, "image upload failed");
            return Err(e);
        }
    };

    let attached = state.sessions.attach_hosted_url(
        session_id,
        revision,
        hosted_url.clone()
    ).await;
    if !attached {
        return Err(AppError::StaleArtifact);
    }

    tracing::info!(session_id = %session_id, "artifact hosted");

    Ok(Json(HostResponse { session_id, hosted_url }))
}
