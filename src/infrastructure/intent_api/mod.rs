// ============================================================
// INTENT API CLIENT
// ============================================================
// Authenticated HTTPS client for the remote intent-creation API.

use async_trait::async_trait;

use crate::domain::error::{AppError, Result};
use crate::domain::intent::IntentPayload;
use crate::domain::record::SubmissionRecord;
use crate::infrastructure::config::Settings;

/// Seam between the submission workflow and the remote API, so the
/// batch loop can be exercised without a network.
#[async_trait]
pub trait IntentApi: Send + Sync {
    /// Create one intent. Returns the API's response body on success;
    /// a non-2xx status or transport failure becomes an error carrying
    /// the status code when one exists.
    async fn create_intent(&self, record: &SubmissionRecord) -> Result<serde_json::Value>;
}

pub struct IntentApiClient {
    client: reqwest::Client,
    base_url: String,
    authorization: String,
    page_id: String,
}

impl IntentApiClient {
    pub fn new(settings: &Settings) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: settings.api_base_url.trim_end_matches('/').to_string(),
            // The remote uses a custom scheme, not plain RFC 6750 Bearer.
            authorization: format!("BEARER {} {}", settings.auth_user, settings.auth_token),
            page_id: settings.page_id.clone(),
        }
    }
}

#[async_trait]
impl IntentApi for IntentApiClient {
    async fn create_intent(&self, record: &SubmissionRecord) -> Result<serde_json::Value> {
        let url = format!("{}/intents", self.base_url);
        let payload = IntentPayload::from_record(record, &self.page_id);

        let response = self
            .client
            .post(&url)
            .header("accept", "*/*")
            .header("accept-language", "th-TH,th;q=0.9,en;q=0.8")
            .header("authorization", &self.authorization)
            .json(&payload)
            .send()
            .await
            .map_err(|e| AppError::ApiError {
                status: e.status().map(|s| s.as_u16()),
                message: format!("Request failed: {}", e),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(AppError::ApiError {
                status: Some(status.as_u16()),
                message: text,
            });
        }

        response.json().await.map_err(|e| AppError::ApiError {
            status: None,
            message: format!("Failed to parse response JSON: {}", e),
        })
    }
}
