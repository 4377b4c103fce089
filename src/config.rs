//! Application configuration loaded from environment variables.
//!
//! Nothing secret is compiled in: the AI API key and the session signing key
//! must be provided by the environment (or a local `.env` file).

use std::env;

/// Default generative model used for all prompts.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";

/// Default base URL of the generative-language REST API.
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Environment Variables (non-sensitive) ---
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// GCP project ID (Firestore)
    pub gcp_project_id: String,
    /// Server port
    pub port: u16,
    /// Generative model name
    pub gemini_model: String,
    /// Generative-language API base URL
    pub gemini_base_url: String,
    /// Whether the session cookie carries the `Secure` attribute
    pub cookie_secure: bool,

    // --- Secrets ---
    /// Generative-language API key
    pub gemini_api_key: String,
    /// JWT signing key for session tokens (raw bytes)
    pub jwt_signing_key: Vec<u8>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let frontend_url =
            env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:5173".to_string());

        let cookie_secure = match env::var("COOKIE_SECURE") {
            Ok(raw) => parse_bool(&raw).ok_or(ConfigError::Invalid("COOKIE_SECURE"))?,
            Err(_) => !is_local_url(&frontend_url),
        };

        Ok(Self {
            cookie_secure,
            frontend_url,
            gcp_project_id: env::var("GCP_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string()),
            gemini_base_url: env::var("GEMINI_BASE_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| DEFAULT_GEMINI_BASE_URL.to_string()),

            gemini_api_key: env::var("GEMINI_API_KEY")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("GEMINI_API_KEY"))?,
            jwt_signing_key: signing_key(
                env::var("JWT_SIGNING_KEY").map_err(|_| ConfigError::Missing("JWT_SIGNING_KEY"))?,
            )?,
        })
    }

    /// Config for tests only.
    pub fn test_default() -> Self {
        Self {
            frontend_url: "http://localhost:5173".to_string(),
            gcp_project_id: "test-project".to_string(),
            port: 8080,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            cookie_secure: false,
            gemini_api_key: "test_api_key".to_string(),
            jwt_signing_key: b"test_jwt_key_32_bytes_minimum!!".to_vec(),
        }
    }
}

/// Session signing key; a blank key would make HS256 tokens forgeable.
fn signing_key(raw: String) -> Result<Vec<u8>, ConfigError> {
    if raw.trim().is_empty() {
        return Err(ConfigError::Invalid("JWT_SIGNING_KEY"));
    }
    Ok(raw.into_bytes())
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Plain-HTTP URL whose host is exactly `localhost` or `127.0.0.1`, with an
/// optional numeric port.
pub(crate) fn is_local_url(url: &str) -> bool {
    let Some(rest) = url.strip_prefix("http://") else {
        return false;
    };
    let authority = rest.split('/').next().unwrap_or(rest);
    let (host, port) = match authority.rsplit_once(':') {
        Some((host, port)) => (host, Some(port)),
        None => (authority, None),
    };

    let port_ok = port.map_or(true, |p| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit()));
    port_ok && matches!(host, "localhost" | "127.0.0.1")
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        // Set required env vars for test
        env::set_var("GEMINI_API_KEY", " test_key ");
        env::set_var("JWT_SIGNING_KEY", "test_jwt_key_32_bytes_minimum!!");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.gemini_api_key, "test_key");
        assert_eq!(config.jwt_signing_key, b"test_jwt_key_32_bytes_minimum!!");
        assert!(!config.gemini_model.is_empty());
    }

    #[test]
    fn test_blank_signing_key_rejected() {
        assert!(matches!(
            signing_key(String::new()),
            Err(ConfigError::Invalid("JWT_SIGNING_KEY"))
        ));
        assert!(matches!(
            signing_key("   ".to_string()),
            Err(ConfigError::Invalid("JWT_SIGNING_KEY"))
        ));
        assert_eq!(signing_key("k3y".to_string()).unwrap(), b"k3y");
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool(" off "), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }

    #[test]
    fn test_is_local_url() {
        assert!(is_local_url("http://localhost:5173"));
        assert!(is_local_url("http://127.0.0.1:8080"));
        assert!(!is_local_url("https://gymbro.example.com"));
        assert!(is_local_url("http://localhost"));
        assert!(is_local_url("http://localhost:5173/dashboard"));
    }

    #[test]
    fn test_is_local_url_rejects_lookalike_hosts() {
        assert!(!is_local_url("http://localhost.attacker.example"));
        assert!(!is_local_url("http://127.0.0.1.nip.io:8080"));
        assert!(!is_local_url("http://localhost@evil.example"));
        assert!(!is_local_url("http://localhost:"));
        assert!(!is_local_url("http://localhost:80x"));
        assert!(!is_local_url("https://localhost:5173"));
    }
}
