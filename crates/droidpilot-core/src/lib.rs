//! Core building blocks shared by the DroidPilot crates.
//!
//! - [`config`] — on-disk settings (chosen model, API keys) with env overrides
//! - [`types`] — chat message types handed to the provider layer
//! - [`utils`] — data directory and secret masking

pub mod config;
pub mod types;
pub mod utils;
