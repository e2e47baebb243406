//! Supabase PostgREST client module
//!
//! Encapsulates the HTTP boundary to the hosted store: one insert call per
//! table, submitting a flat JSON record and returning whatever rows the
//! store echoes back.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;

use crate::errors::StoreError;

static HTTP_CLIENT: std::sync::LazyLock<Client> = std::sync::LazyLock::new(|| {
    Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .unwrap_or_else(|_| Client::new())
});

/// Row-insert boundary to the remote store.
///
/// [`PostgrestClient`] is the production implementation; tests substitute
/// their own to simulate echoes and failures without a live store.
#[async_trait]
pub trait TableInsert: Send + Sync {
    /// Inserts one record into `table`, returning the echoed rows.
    /// An empty echo is success with zero rows, not an error.
    async fn insert(&self, table: &str, record: &Value) -> Result<Vec<Value>, StoreError>;
}

/// Error payload PostgREST returns alongside a non-2xx status.
#[derive(Debug, Deserialize)]
struct PostgrestErrorBody {
    message: Option<String>,
}

/// HTTP client for the Supabase PostgREST endpoint.
pub struct PostgrestClient {
    base_url: String,
    api_key: String,
}

impl PostgrestClient {
    #[must_use]
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    fn endpoint(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }
}

#[async_trait]
impl TableInsert for PostgrestClient {
    async fn insert(&self, table: &str, record: &Value) -> Result<Vec<Value>, StoreError> {
        let response = HTTP_CLIENT
            .post(self.endpoint(table))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Prefer", "return=representation")
            .json(record)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<PostgrestErrorBody>(&body)
                .ok()
                .and_then(|b| b.message)
                .unwrap_or(body);
            return Err(StoreError::Rejected {
                status: status.as_u16(),
                detail,
            });
        }

        if status == StatusCode::NO_CONTENT {
            return Ok(Vec::new());
        }

        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(Vec::new());
        }
        match serde_json::from_str::<Value>(&body) {
            Ok(Value::Array(rows)) => Ok(rows),
            Ok(row @ Value::Object(_)) => Ok(vec![row]),
            Ok(_) => Ok(Vec::new()),
            Err(e) => Err(StoreError::Decode(e.to_string())),
        }
    }
}
