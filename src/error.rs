use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Content too long for this QR configuration")]
    CapacityExceeded,

    #[error("QR encoding error: {0}")] Encoding(String),

    #[error("Invalid {field} value: {value}")] InvalidColor {
        field: &'static str,
        value: String,
    },

    #[error("No QR artifact for this session")]
    ArtifactNotFound,

    #[error("Artifact was replaced while hosting was in flight")]
    StaleArtifact,

    #[error("Image hosting is not configured")]
    HostingDisabled,

    #[error("Upload failed: {0}")] Upload(String),

    #[error("Image encoding error: {0}")] Image(#[from] image::ImageError),

    #[error("Configuration error: {0}")] Config(String),

    #[error("Internal error: {0}")] Internal(String),
}

#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(serde::Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl AppError {
    pub fn to_error_response(&self) -> ErrorResponse {
        let (code, message, field) = match self {
            AppError::CapacityExceeded =>
                (
                    "CAPACITY_EXCEEDED",
                    "Content too long for this QR configuration".to_string(),
                    Some("content".to_string()),
                ),
            AppError::Encoding(msg) => ("ENCODING_ERROR", msg.clone(), None),
            AppError::InvalidColor { field, value } =>
                (
                    "INVALID_COLOR",
                    format!("{} is not a valid hex RGB color", value),
                    Some(field.to_string()),
                ),
            AppError::ArtifactNotFound =>
                ("ARTIFACT_NOT_FOUND", "No QR artifact for this session".to_string(), None),
            AppError::StaleArtifact =>
                (
                    "STALE_ARTIFACT",
                    "Artifact was replaced while hosting was in flight".to_string(),
                    None,
                ),
            AppError::HostingDisabled =>
                ("HOSTING_DISABLED", "Image hosting is not configured".to_string(), None),
            AppError::Upload(msg) => ("UPLOAD_FAILED", msg.clone(), None),
            AppError::Image(e) => ("IMAGE_ERROR", e.to_string(), None),
            AppError::Config(msg) => ("CONFIG_ERROR", msg.clone(), None),
            AppError::Internal(msg) => ("INTERNAL_ERROR", msg.clone(), None),
        };

        ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                field,
            },
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            AppError::CapacityExceeded => axum::http::StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Encoding(_) | AppError::InvalidColor { .. } => {
                axum::http::StatusCode::BAD_REQUEST
            }
            AppError::ArtifactNotFound => axum::http::StatusCode::NOT_FOUND,
            AppError::StaleArtifact => axum::http::StatusCode::CONFLICT,
            AppError::HostingDisabled => axum::http::StatusCode::NOT_IMPLEMENTED,
            AppError::Upload(_) => axum::http::StatusCode::BAD_GATEWAY,
            _ => axum::http::StatusCode::INTERNAL_SERVER_ERROR,
        };

        let response = self.to_error_response();
        (status, axum::Json(response)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
