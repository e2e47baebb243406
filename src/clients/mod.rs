//! Client modules for external API interactions

pub mod postgrest_client;

pub use postgrest_client::{PostgrestClient, TableInsert};
