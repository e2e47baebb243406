use std::env;

use serde_json::{Value, json};

/// Application configuration sourced from the process environment.
///
/// Both Supabase settings are optional on purpose: a missing URL or key
/// selects the store's degraded (mock) mode instead of failing startup.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub supabase_url: Option<String>,
    pub supabase_key: Option<String>,
}

impl AppConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            supabase_url: non_empty(env::var("SUPABASE_URL").ok()),
            supabase_key: non_empty(env::var("SUPABASE_KEY").ok()),
        }
    }

    /// Reports which settings are present without exposing their values,
    /// suitable for a debug endpoint or log line.
    #[must_use]
    pub fn status(&self) -> Value {
        json!({
            "supabase_url_set": self.supabase_url.is_some(),
            "supabase_key_set": self.supabase_key.is_some(),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
