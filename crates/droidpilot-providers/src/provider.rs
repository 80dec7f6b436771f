//! Provider enumeration — the closed set of backends a model can belong to.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ProviderError;

/// A backend model-serving service.
///
/// Adding a variant requires a matching arm in [`crate::handlers::handler_for`],
/// which the compiler enforces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// OpenAI chat completions API.
    OpenAi,
    /// Google Gemini `generateContent` API.
    Gemini,
    /// OpenRouter — aggregator routing `vendor/model` ids to many vendors.
    OpenRouter,
}

impl Provider {
    /// Every provider, in declaration order.
    pub const ALL: [Provider; 3] = [Provider::OpenAi, Provider::Gemini, Provider::OpenRouter];

    /// Stable lowercase key used in config files and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Provider::OpenAi => "openai",
            Provider::Gemini => "gemini",
            Provider::OpenRouter => "openrouter",
        }
    }

    /// Human-readable name.
    pub fn display_name(self) -> &'static str {
        match self {
            Provider::OpenAi => "OpenAI",
            Provider::Gemini => "Gemini",
            Provider::OpenRouter => "OpenRouter",
        }
    }

    /// Whether the vendor is selected by the request body rather than the endpoint.
    pub fn is_aggregator(self) -> bool {
        matches!(self, Provider::OpenRouter)
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Provider {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Provider::ALL
            .into_iter()
            .find(|p| p.name() == wanted)
            .ok_or_else(|| ProviderError::unknown_provider(s))
    }
}
