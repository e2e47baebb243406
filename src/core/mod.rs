//! Core configuration types shared across the crate.

pub mod config;
