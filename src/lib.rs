/// policy-store - Persistence layer for an insurance-policy web backend.
///
/// The crate exposes one gateway type, [`store::SupabaseStore`], with six
/// append-only operations over a hosted Supabase/PostgREST store:
/// creating users and policies (identity-establishing, failures surface to
/// the caller) and recording risk assessments, pricing details, policy
/// text versions, and prompt logs (best-effort audit writes, failures are
/// logged and masked). With no credentials configured the store runs
/// degraded and echoes mock records, which keeps route handlers and tests
/// working without a live database.
///
/// # Example
///
/// ```no_run
/// use policy_store::core::config::AppConfig;
/// use policy_store::store::SupabaseStore;
/// use serde_json::{Map, json};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     policy_store::setup_logging();
///
///     let config = AppConfig::from_env();
///     let store = SupabaseStore::new(&config);
///
///     let mut user = Map::new();
///     user.insert("age".to_string(), json!(30));
///     user.insert("location".to_string(), json!("NYC"));
///     let created = store.create_user(&user).await?;
///     let user_id = created["id"].as_str().unwrap_or_default().to_string();
///
///     let mut details = Map::new();
///     details.insert("type".to_string(), json!("life"));
///     details.insert("coverage_amount".to_string(), json!(250_000));
///     details.insert("duration".to_string(), json!("20y"));
///     let policy = store.create_policy(&user_id, &details).await?;
///
///     // Audit writes never fail the workflow.
///     let policy_id = policy["id"].as_str().unwrap_or_default();
///     store.log_prompt(policy_id, "generate policy text").await;
///
///     Ok(())
/// }
/// ```
// Module declarations
pub mod clients;
pub mod core;
pub mod errors;
pub mod store;

/// Configure structured logging for the backend.
///
/// Sets up a tracing-subscriber fmt layer; call it once at process start,
/// before constructing the store.
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(true);

    tracing_subscriber::registry().with(fmt_layer).init();
}
