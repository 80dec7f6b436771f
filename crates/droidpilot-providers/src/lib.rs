//! Model registry and request-dispatch layer for DroidPilot.
//!
//! # Architecture
//!
//! - [`provider::Provider`] — closed set of backends a model can belong to
//! - [`registry::ModelRegistry`] — immutable, ordered catalog of [`registry::Model`]s
//! - [`traits::ProviderHandler`] — per-provider URL / header / body builder
//! - [`handlers`] — the OpenAI, Gemini and OpenRouter handlers + provider → handler table
//! - [`dispatch::Dispatcher`] — resolve a model id and hand back its request shape
//! - [`selection`] — turn the configured model into a registry entry
//! - [`request`] — hand a request shape over to `reqwest`
//!
//! Nothing in this crate performs I/O; sending the request is up to the caller.

pub mod dispatch;
pub mod error;
pub mod handlers;
pub mod provider;
pub mod registry;
pub mod request;
pub mod selection;
pub mod traits;

// Re-export main types for convenience
pub use dispatch::{Dispatcher, PreparedRequest};
pub use error::{ProviderError, Result};
pub use handlers::handler_for;
pub use provider::Provider;
pub use registry::{Model, ModelRegistry};
pub use request::RequestShape;
pub use selection::{select_model, select_model_or_default, ModelSelection};
pub use traits::{LlmRequestConfig, ProviderHandler};
