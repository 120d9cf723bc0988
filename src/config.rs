use std::env;

const DEFAULT_API_BASE: &str = "https://api.cloudinary.com";
const DEFAULT_SHARE_FALLBACK_URL: &str = "https://example.com";

/// Credentials and endpoint for the optional hosting stage.
#[derive(Debug, Clone)]
pub struct HostingConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    pub api_base: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub share_fallback_url: String,
    pub hosting: Option<HostingConfig>,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenv::dotenv().ok();

        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()?;

        let share_fallback_url = env::var("SHARE_FALLBACK_URL")
            .unwrap_or_else(|_| DEFAULT_SHARE_FALLBACK_URL.to_string());

        let hosting = Self::hosting_from_parts(
            env::var("CLOUDINARY_CLOUD_NAME").ok(),
            env::var("CLOUDINARY_API_KEY").ok(),
            env::var("CLOUDINARY_API_SECRET").ok(),
            env::var("CLOUDINARY_API_BASE").ok(),
        )?;

        Ok(Config {
            server_host,
            server_port,
            share_fallback_url,
            hosting,
        })
    }

    /// All three credentials make a hosting config; none disables hosting
    /// entirely; anything in between is a configuration error so a broken
    /// deployment fails at startup instead of at the first upload.
    fn hosting_from_parts(
        cloud_name: Option<String>,
        api_key: Option<String>,
        api_secret: Option<String>,
        api_base: Option<String>,
    ) -> Result<Option<HostingConfig>, Box<dyn std::error::Error>> {
        match (cloud_name, api_key, api_secret) {
            (Some(cloud_name), Some(api_key), Some(api_secret)) => {
                Ok(Some(HostingConfig {
                    cloud_name,
                    api_key,
                    api_secret,
                    api_base: api_base.unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
                }))
            }
            (None, None, None) => Ok(None),
            _ => Err(
                "CLOUDINARY_CLOUD_NAME, CLOUDINARY_API_KEY and CLOUDINARY_API_SECRET must be set together (or all left unset)".into()
            ),
        }
    }

    /// Whether the hosting stage is available in this deployment.
    pub fn hosting_enabled(&self) -> bool {
        self.hosting.is_some()
    }
}
