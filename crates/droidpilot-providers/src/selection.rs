//! Model selection — turn the configured model id into a registry entry.
//!
//! "No model configured" and "unknown model configured" are different cases:
//! the first quietly uses the default, the second is a
//! [`ProviderError::ModelNotFound`] the settings layer has to decide about.

use tracing::warn;

use droidpilot_core::config::schema::DEFAULT_MODEL;

use crate::error::Result;
use crate::registry::{Model, ModelRegistry};

/// Where the selected model came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModelSelection<'a> {
    /// The configured identifier matched a registry entry.
    Configured(&'a Model),
    /// Nothing usable was configured; this is the default model.
    Default(&'a Model),
}

impl<'a> ModelSelection<'a> {
    pub fn model(&self) -> &'a Model {
        match self {
            ModelSelection::Configured(m) | ModelSelection::Default(m) => m,
        }
    }

    pub fn is_default(&self) -> bool {
        matches!(self, ModelSelection::Default(_))
    }
}

/// Select the configured model, or the default when none is configured.
///
/// A blank `configured` counts as "none". Any other value must match a
/// registry identifier exactly.
pub fn select_model<'a>(
    registry: &'a ModelRegistry,
    configured: Option<&str>,
) -> Result<ModelSelection<'a>> {
    match configured.filter(|id| !id.trim().is_empty()) {
        Some(id) => registry.from_identifier(id).map(ModelSelection::Configured),
        None => registry
            .from_identifier(DEFAULT_MODEL)
            .map(ModelSelection::Default),
    }
}

/// Like [`select_model`], but an unknown configured model falls back to the
/// default with a warning.
pub fn select_model_or_default<'a>(
    registry: &'a ModelRegistry,
    configured: Option<&str>,
) -> Result<ModelSelection<'a>> {
    match select_model(registry, configured) {
        Err(e) if e.is_not_found() && configured.is_some() => {
            warn!(
                configured = configured.unwrap_or_default(),
                fallback = DEFAULT_MODEL,
                "Configured model is not in the registry, using default"
            );
            select_model(registry, None)
        }
        other => other,
    }
}
