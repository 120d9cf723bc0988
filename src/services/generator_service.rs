use image::Rgb;
use qrcode::types::QrError;
use qrcode::{EcLevel, QrCode, Version};

use crate::error::{AppError, Result};

// Symbol parameters are fixed; only content and colors vary per request.
const VERSION_HINT: Version = Version::Normal(1);
const ERROR_CORRECTION: EcLevel = EcLevel::H;
const MODULE_PIXEL_SIZE: u32 = 5;

pub const QR_MIME_TYPE: &str = "image/png";
pub const DOWNLOAD_FILENAME: &str = "custom_qr_code.png";

/// Inputs captured for one generation interaction. Content is arbitrary;
/// colors are `#RRGGBB` strings (leading `#` optional).
#[derive(Debug, Clone)]
pub struct QrRequest {
    pub content: String,
    pub fill_color: String,
    pub back_color: String,
}

/// A generated QR image. `hosted_url` is attached later, and only while
/// these exact bytes are still the session's current artifact.
#[derive(Debug, Clone)]
pub struct QrArtifact {
    pub image_bytes: Vec<u8>,
    pub mime_type: &'static str,
    pub hosted_url: Option<String>,
}

/// Renders QR symbols into PNG buffers. Pure: no session state is touched
/// here, the caller decides where the artifact lives.
pub struct GeneratorService;

impl GeneratorService {
    pub fn new() -> Self {
        Self
    }

    pub fn generate(&self, request: &QrRequest) -> Result<QrArtifact> {
        let fill = parse_hex_color("fill_color", &request.fill_color)?;
        let back = parse_hex_color("back_color", &request.back_color)?;

        let code = Self::encode(request.content.as_bytes())?;

        let image = code
            .render::<Rgb<u8>>()
            .dark_color(fill)
            .light_color(back)
            .module_dimensions(MODULE_PIXEL_SIZE, MODULE_PIXEL_SIZE)
            .quiet_zone(true)
            .build();

        let mut buffer = Vec::new();
        image.write_to(&mut std::io::Cursor::new(&mut buffer), image::ImageFormat::Png)?;

        Ok(QrArtifact {
            image_bytes: buffer,
            mime_type: QR_MIME_TYPE,
            hosted_url: None,
        })
    }

    /// Try the fixed version hint first, then let the library pick the
    /// smallest version that fits. Content beyond version-40 capacity at
    /// level H is a user-facing error, never a truncation.
    fn encode(data: &[u8]) -> Result<QrCode> {
        match QrCode::with_version(data, VERSION_HINT, ERROR_CORRECTION) {
            Ok(code) => Ok(code),
            Err(QrError::DataTooLong) => {
                match QrCode::with_error_correction_level(data, ERROR_CORRECTION) {
                    Ok(code) => Ok(code),
                    Err(QrError::DataTooLong) => Err(AppError::CapacityExceeded),
                    Err(e) => Err(AppError::Encoding(e.to_string())),
                }
            }
            Err(e) => Err(AppError::Encoding(e.to_string())),
        }
    }
}

impl Default for GeneratorService {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a `#RRGGBB` hex string (the shape browser color pickers emit).
fn parse_hex_color(field: &'static str, value: &str) -> Result<Rgb<u8>> {
    let digits = value.strip_prefix('#').unwrap_or(value);

    let bytes = hex::decode(digits).map_err(|_| AppError::InvalidColor {
        field,
        value: value.to_string(),
    })?;

    if bytes.len() != 3 {
        return Err(AppError::InvalidColor {
            field,
            value: value.to_string(),
        });
    }

    Ok(Rgb([bytes[0], bytes[1], bytes[2]]))
}
