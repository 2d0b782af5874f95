use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::domain::error::{AppError, Result};

/// Runtime settings, merged from defaults, an optional `intentcsv.toml`
/// next to the working directory, and `INTENTCSV_*` environment
/// variables (highest precedence).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Base URL of the intent API.
    pub api_base_url: String,
    /// Account name embedded in the custom authorization scheme.
    pub auth_user: String,
    /// Bearer token for the intent API.
    pub auth_token: String,
    /// Page the created intents belong to.
    pub page_id: String,
    /// Pause between consecutive submissions, in milliseconds.
    pub request_delay_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: "https://api-enterprise.zwiz.app".to_string(),
            auth_user: "jm_admin01".to_string(),
            auth_token: String::new(),
            page_id: String::new(),
            request_delay_ms: 200,
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self> {
        Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file("intentcsv.toml"))
            .merge(Env::prefixed("INTENTCSV_"))
            .extract()
            .map_err(|e| AppError::ConfigError(e.to_string()))
    }

    /// Settings that are fine for a dry run may still be unusable for
    /// submission; check those before any request goes out.
    pub fn validate_for_submission(&self) -> Result<()> {
        if self.auth_token.trim().is_empty() {
            return Err(AppError::ConfigError(
                "auth_token is required for submission (set INTENTCSV_AUTH_TOKEN)".to_string(),
            ));
        }
        if self.page_id.trim().is_empty() {
            return Err(AppError::ConfigError(
                "page_id is required for submission (set INTENTCSV_PAGE_ID)".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.api_base_url, "https://api-enterprise.zwiz.app");
        assert_eq!(settings.request_delay_ms, 200);
        assert!(settings.auth_token.is_empty());
    }

    #[test]
    fn test_submission_requires_token_and_page() {
        let mut settings = Settings::default();
        assert!(settings.validate_for_submission().is_err());

        settings.auth_token = "token".to_string();
        assert!(settings.validate_for_submission().is_err());

        settings.page_id = "PAGE-1".to_string();
        assert!(settings.validate_for_submission().is_ok());
    }
}
