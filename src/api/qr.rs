use axum::extract::{ Path, State };
use axum::http::{ header, StatusCode };
use axum::response::IntoResponse;
use axum::Json;
use base64::Engine;
use serde::{ Deserialize, Serialize };
use uuid::Uuid;

use crate::error::{ AppError, Result };
use crate::services::generator_service::{ QrArtifact, QrRequest, DOWNLOAD_FILENAME };

use super::AppState;

fn default_fill_color() -> String {
    "#000000".to_string()
}

fn default_back_color() -> String {
    "#FFFFFF".to_string()
}

#[derive(Deserialize)]
pub struct GenerateQrRequest {
    pub session_id: Uuid,
    pub content: String,
    #[serde(default = "default_fill_color")]
    pub fill_color: String,
    #[serde(default = "default_back_color")]
    pub back_color: String,
}

#[derive(Serialize)]
pub struct ArtifactResponse {
    pub session_id: Uuid,
    pub mime_type: String,
    pub byte_size: usize,
    pub hosted_url: Option<String>,
    pub data_uri: String,
    pub download_filename: String,
}

impl ArtifactResponse {
    /// Base64 happens here and nowhere else: the core hands out raw bytes
    /// plus a MIME type, the data URI is a presentation-boundary encoding.
    fn from_artifact(session_id: Uuid, artifact: &QrArtifact) -> Self {
        let encoded = base64::engine::general_purpose::STANDARD.encode(&artifact.image_bytes);
        Self {
            session_id,
            mime_type: artifact.mime_type.to_string(),
            byte_size: artifact.image_bytes.len(),
            hosted_url: artifact.hosted_url.clone(),
            data_uri: format!("data:{};base64,{}", artifact.mime_type, encoded),
            download_filename: DOWNLOAD_FILENAME.to_string(),
        }
    }
}

pub async fn generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateQrRequest>
) -> Result<Json<ArtifactResponse>> {
    let artifact = state.generator.generate(
        &(QrRequest {
            content: request.content,
            fill_color: request.fill_color,
            back_color: request.back_color,
        })
    )?;

    tracing::debug!(session_id = %request.session_id, bytes = artifact.image_bytes.len(), "generated QR artifact");

    let response = ArtifactResponse::from_artifact(request.session_id, &artifact);
    state.sessions.insert(request.session_id, artifact).await;

    Ok(Json(response))
}

pub async fn get_artifact(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>
) -> Result<Json<ArtifactResponse>> {
    let (_, artifact) = state.sessions
        .snapshot(session_id).await
        .ok_or(AppError::ArtifactNotFound)?;

    Ok(Json(ArtifactResponse::from_artifact(session_id, &artifact)))
}

pub async fn get_image(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>
) -> Result<impl IntoResponse> {
    let (_, artifact) = state.sessions
        .snapshot(session_id).await
        .ok_or(AppError::ArtifactNotFound)?;

    Ok(([(header::CONTENT_TYPE, artifact.mime_type)], artifact.image_bytes))
}

pub async fn download(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>
) -> Result<impl IntoResponse> {
    let (_, artifact) = state.sessions
        .snapshot(session_id).await
        .ok_or(AppError::ArtifactNotFound)?;

    let disposition = format!("attachment; filename=\"{}\"", DOWNLOAD_FILENAME);

    Ok((
        [
            (header::CONTENT_TYPE, artifact.mime_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        artifact.image_bytes,
    ))
}

pub async fn clear(State(state): State<AppState>, Path(session_id): Path<Uuid>) -> StatusCode {
    state.sessions.clear(session_id).await;
    StatusCode::NO_CONTENT
}
