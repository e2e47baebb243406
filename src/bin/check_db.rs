//! Connectivity probe for the hosted store.
//!
//! Reports which credentials are configured, then attempts a sentinel
//! insert into the `users` table. An insert is the real test: a select can
//! succeed on a project whose key is not allowed to write.

use anyhow::{Context, bail};
use serde_json::json;

use policy_store::clients::postgrest_client::{PostgrestClient, TableInsert};
use policy_store::core::config::AppConfig;
use policy_store::store::tables;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    policy_store::setup_logging();

    let config = AppConfig::from_env();
    println!(
        "URL found: {}",
        if config.supabase_url.is_some() { "Yes" } else { "No" }
    );
    println!(
        "KEY found: {}",
        if config.supabase_key.is_some() { "Yes" } else { "No" }
    );

    let (Some(url), Some(key)) = (&config.supabase_url, &config.supabase_key) else {
        bail!("missing SUPABASE_URL or SUPABASE_KEY in the environment");
    };

    println!("Connecting to {url}...");
    let client = PostgrestClient::new(url, key);
    let probe = json!({
        "age": 99,
        "gender": "CHECK_DB_TEST",
        "location": "Test",
        "income": 0,
        "lifestyle_factors": "test",
    });

    let rows = client
        .insert(tables::USERS, &probe)
        .await
        .context("test insert failed")?;

    println!("SUCCESS! Data inserted.");
    println!("Response: {}", serde_json::to_string_pretty(&rows)?);
    Ok(())
}
