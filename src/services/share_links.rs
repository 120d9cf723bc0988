use std::fmt;

use serde::Serialize;

/// Platforms we can hand a link to. Each one has a share-intent URL that
/// pre-populates its compose UI with the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SharePlatform {
    #[serde(rename = "whatsapp")]
    WhatsApp,
    Instagram,
    GoogleDrive,
    Facebook,
}

impl SharePlatform {
    pub fn as_str(&self) -> &'static str {
        match self {
            SharePlatform::WhatsApp => "whatsapp",
            SharePlatform::Instagram => "instagram",
            SharePlatform::GoogleDrive => "google_drive",
            SharePlatform::Facebook => "facebook",
        }
    }

    /// Human-readable display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            SharePlatform::WhatsApp => "WhatsApp",
            SharePlatform::Instagram => "Instagram",
            SharePlatform::GoogleDrive => "Google Drive",
            SharePlatform::Facebook => "Facebook",
        }
    }

    /// Substitute the percent-encoded target into this platform's
    /// share-intent template.
    pub fn share_url(&self, target: &str) -> String {
        let encoded = urlencoding::encode(target);
        match self {
            SharePlatform::WhatsApp => format!("https://wa.me/?text={}", encoded),
            SharePlatform::Instagram => {
                format!("https://www.instagram.com/share?url={}", encoded)
            }
            SharePlatform::GoogleDrive => {
                format!("https://drive.google.com/uc?export=download&url={}", encoded)
            }
            SharePlatform::Facebook => {
                format!("https://www.facebook.com/sharer/sharer.php?u={}", encoded)
            }
        }
    }

    pub fn all() -> &'static [SharePlatform] {
        &[
            SharePlatform::WhatsApp,
            SharePlatform::Instagram,
            SharePlatform::GoogleDrive,
            SharePlatform::Facebook,
        ]
    }
}

impl fmt::Display for SharePlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the share surface, ready for the UI.
#[derive(Debug, Clone, Serialize)]
pub struct ShareLink {
    pub platform: SharePlatform,
    pub label: String,
    pub url: String,
}

/// One link per supported platform, in a stable order.
pub fn build_share_links(target: &str) -> Vec<ShareLink> {
    SharePlatform::all()
        .iter()
        .map(|platform| ShareLink {
            platform: *platform,
            label: platform.display_name().to_string(),
            url: platform.share_url(target),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_link_per_platform() {
        let links = build_share_links("https://example.com/x");

        assert_eq!(links.len(), 4);
        let platforms: Vec<SharePlatform> = links.iter().map(|l| l.platform).collect();
        assert_eq!(platforms, SharePlatform::all());
    }

    #[test]
    fn test_target_is_encoded_into_each_template() {
        let links = build_share_links("https://example.com/x");
        let encoded = urlencoding::encode("https://example.com/x").into_owned();

        for link in &links {
            assert!(
                link.url.contains(&encoded),
                "{} missing encoded target: {}",
                link.platform,
                link.url
            );
        }
    }

    #[test]
    fn test_platform_templates() {
        let target = "https://cdn.example/qr.png";
        let encoded = urlencoding::encode(target).into_owned();

        assert_eq!(
            SharePlatform::WhatsApp.share_url(target),
            format!("https://wa.me/?text={}", encoded)
        );
        assert_eq!(
            SharePlatform::Instagram.share_url(target),
            format!("https://www.instagram.com/share?url={}", encoded)
        );
        assert_eq!(
            SharePlatform::GoogleDrive.share_url(target),
            format!("https://drive.google.com/uc?export=download&url={}", encoded)
        );
        assert_eq!(
            SharePlatform::Facebook.share_url(target),
            format!("https://www.facebook.com/sharer/sharer.php?u={}", encoded)
        );
    }

    #[test]
    fn test_display_names() {
        assert_eq!(SharePlatform::WhatsApp.display_name(), "WhatsApp");
        assert_eq!(SharePlatform::GoogleDrive.display_name(), "Google Drive");
        assert_eq!(SharePlatform::WhatsApp.to_string(), "whatsapp");
    }
}
