//! Persistence gateway for the insurance-policy workflow.
//!
//! One store type, six append-only operations. Two operations establish
//! identity (`create_user`, `create_policy`) and surface store failures to
//! the caller; the other four are best-effort audit writes that log the
//! failure and return the caller's data so the workflow keeps moving.
//! Without configured credentials the store runs in a degraded mode that
//! echoes mock records and never touches the network.

use serde_json::{Map, Value, json};
use tracing::{error, warn};
use uuid::Uuid;

use crate::clients::postgrest_client::{PostgrestClient, TableInsert};
use crate::core::config::AppConfig;
use crate::errors::StoreError;

/// Table names on the remote store, one per record kind.
pub mod tables {
    pub const USERS: &str = "users";
    pub const POLICIES: &str = "policies";
    pub const RISK_ASSESSMENTS: &str = "risk_assessments";
    pub const PRICING_DETAILS: &str = "pricing_details";
    pub const POLICY_VERSIONS: &str = "policy_versions";
    pub const PROMPTS_LOG: &str = "prompts_log";
}

/// Identifier echoed for users created in degraded mode.
pub const MOCK_USER_ID: &str = "mock-user-id";
/// Identifier echoed for policies created in degraded mode.
pub const MOCK_POLICY_ID: &str = "mock-policy-id";

enum Backend {
    Remote(Box<dyn TableInsert>),
    Mock,
}

/// Gateway over the hosted Supabase store.
///
/// The mode is fixed at construction: with both credentials configured the
/// store talks to PostgREST, otherwise every write is mocked locally. The
/// store holds no other state, so sharing it across requests is safe.
pub struct SupabaseStore {
    backend: Backend,
}

impl SupabaseStore {
    #[must_use]
    pub fn new(config: &AppConfig) -> Self {
        match (&config.supabase_url, &config.supabase_key) {
            (Some(url), Some(key)) => Self {
                backend: Backend::Remote(Box::new(PostgrestClient::new(url, key))),
            },
            _ => {
                warn!("Supabase credentials not found. DB operations will be bypassed.");
                Self {
                    backend: Backend::Mock,
                }
            }
        }
    }

    /// Builds a connected store over an arbitrary insert client.
    #[must_use]
    pub fn with_client(client: Box<dyn TableInsert>) -> Self {
        Self {
            backend: Backend::Remote(client),
        }
    }

    /// Whether a live store connection is configured.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        matches!(self.backend, Backend::Remote(_))
    }

    /// Inserts a user record with a gateway-generated id.
    ///
    /// # Errors
    ///
    /// Returns the store error when the insert fails; the caller decides
    /// how to surface it.
    pub async fn create_user(&self, user_data: &Map<String, Value>) -> Result<Value, StoreError> {
        let Backend::Remote(client) = &self.backend else {
            let mut mock = user_data.clone();
            mock.insert("id".to_string(), Value::from(MOCK_USER_ID));
            return Ok(Value::Object(mock));
        };

        // Generate the id here so the caller has one even if the echo is empty.
        let mut data = user_data.clone();
        data.insert("id".to_string(), Value::from(Uuid::new_v4().to_string()));
        let data = Value::Object(data);

        match client.insert(tables::USERS, &data).await {
            Ok(rows) => Ok(rows.into_iter().next().unwrap_or(data)),
            Err(e) => {
                error!("DB error (create_user): {e}");
                Err(e)
            }
        }
    }

    /// Inserts a policy record for `user_id` with status `"active"`.
    ///
    /// # Errors
    ///
    /// Returns the store error when the insert fails.
    pub async fn create_policy(
        &self,
        user_id: &str,
        insurance_details: &Map<String, Value>,
    ) -> Result<Value, StoreError> {
        let field = |key: &str| insurance_details.get(key).cloned().unwrap_or(Value::Null);
        let mut policy_data = json!({
            "id": Uuid::new_v4().to_string(),
            "user_id": user_id,
            "type": field("type"),
            "coverage_amount": field("coverage_amount"),
            "duration": field("duration"),
            "status": "active",
        });

        let Backend::Remote(client) = &self.backend else {
            policy_data["id"] = Value::from(MOCK_POLICY_ID);
            return Ok(policy_data);
        };

        match client.insert(tables::POLICIES, &policy_data).await {
            Ok(rows) => Ok(rows.into_iter().next().unwrap_or(policy_data)),
            Err(e) => {
                error!("DB error (create_policy): {e}");
                Err(e)
            }
        }
    }

    /// Records a risk assessment for a policy. Best-effort: always returns
    /// the caller's `risk_data` unchanged, even when the write fails.
    pub async fn save_risk_assessment(
        &self,
        policy_id: &str,
        risk_data: &Map<String, Value>,
    ) -> Value {
        let input = Value::Object(risk_data.clone());
        let Backend::Remote(client) = &self.backend else {
            return input;
        };

        let field = |key: &str| risk_data.get(key).cloned().unwrap_or(Value::Null);
        let data = json!({
            "policy_id": policy_id,
            "score": field("score"),
            "score_value": coerce_score_value(risk_data.get("score_value")),
            "factors": field("factors"),
            "explanation": field("explanation"),
        });

        if let Err(e) = client.insert(tables::RISK_ASSESSMENTS, &data).await {
            warn!("DB error (save_risk_assessment): {e}");
        }
        input
    }

    /// Records pricing details for a policy. Best-effort: always returns
    /// the caller's `pricing_data` unchanged.
    pub async fn save_pricing(&self, policy_id: &str, pricing_data: &Map<String, Value>) -> Value {
        let input = Value::Object(pricing_data.clone());
        let Backend::Remote(client) = &self.backend else {
            return input;
        };

        let field = |key: &str| pricing_data.get(key).cloned().unwrap_or(Value::Null);
        let data = json!({
            "policy_id": policy_id,
            "monthly_premium": field("monthly_premium"),
            "yearly_premium": field("yearly_premium"),
            "breakdown": field("breakdown"),
            "explanation": field("explanation"),
        });

        if let Err(e) = client.insert(tables::PRICING_DETAILS, &data).await {
            warn!("DB error (save_pricing): {e}");
        }
        input
    }

    /// Appends a policy text version. `version_note` defaults to `"Update"`.
    /// Best-effort: returns the constructed record in every case.
    pub async fn save_policy_version(
        &self,
        policy_id: &str,
        policy_text: &str,
        version_note: Option<&str>,
    ) -> Value {
        let data = json!({
            "policy_id": policy_id,
            "policy_text": policy_text,
            "version_note": version_note.unwrap_or("Update"),
        });

        let Backend::Remote(client) = &self.backend else {
            return data;
        };
        if let Err(e) = client.insert(tables::POLICY_VERSIONS, &data).await {
            warn!("DB error (save_policy_version): {e}");
        }
        data
    }

    /// Appends a prompt to the log for a policy. Best-effort.
    pub async fn log_prompt(&self, policy_id: &str, prompt_text: &str) -> Value {
        let data = json!({
            "policy_id": policy_id,
            "prompt_text": prompt_text,
        });

        let Backend::Remote(client) = &self.backend else {
            return data;
        };
        if let Err(e) = client.insert(tables::PROMPTS_LOG, &data).await {
            warn!("DB error (log_prompt): {e}");
        }
        data
    }
}

/// Coerces an incoming `score_value` to a float for storage.
/// Numbers pass through, numeric strings parse, anything else is 0.0.
fn coerce_score_value(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or_else(|_| {
            warn!("non-numeric score_value {s:?}; storing 0.0");
            0.0
        }),
        _ => 0.0,
    }
}
