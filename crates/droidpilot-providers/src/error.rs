//! Error types for registry lookups and request shaping.

use thiserror::Error;

use crate::provider::Provider;

/// Errors raised by the registry, the dispatcher and the transport hand-off.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// No registry entry has this exact identifier.
    #[error("model '{identifier}' not found")]
    ModelNotFound { identifier: String },

    /// A provider name that is not one of the supported backends.
    #[error("unknown provider '{name}'")]
    UnknownProvider { name: String },

    /// Two registry entries share an identifier.
    #[error("model '{identifier}' is registered more than once")]
    DuplicateModel { identifier: String },

    /// A provider present in the registry has no request handler.
    #[error("no request handler registered for provider '{provider}'")]
    MissingHandler { provider: Provider },

    /// A header could not be turned into a valid HTTP header.
    #[error("invalid header '{name}': {reason}")]
    InvalidHeader { name: String, reason: String },
}

impl ProviderError {
    pub fn model_not_found(identifier: impl Into<String>) -> Self {
        Self::ModelNotFound {
            identifier: identifier.into(),
        }
    }

    pub fn unknown_provider(name: impl Into<String>) -> Self {
        Self::UnknownProvider { name: name.into() }
    }

    pub fn duplicate_model(identifier: impl Into<String>) -> Self {
        Self::DuplicateModel {
            identifier: identifier.into(),
        }
    }

    pub fn invalid_header(name: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidHeader {
            name: name.into(),
            reason: reason.to_string(),
        }
    }

    /// Whether this is the "unknown model" case a settings layer can recover from.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ModelNotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, ProviderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            ProviderError::model_not_found("gpt-5").to_string(),
            "model 'gpt-5' not found"
        );
        assert_eq!(
            ProviderError::MissingHandler {
                provider: Provider::Gemini
            }
            .to_string(),
            "no request handler registered for provider 'Gemini'"
        );
    }

    #[test]
    fn test_is_not_found() {
        assert!(ProviderError::model_not_found("x").is_not_found());
        assert!(!ProviderError::duplicate_model("x").is_not_found());
    }
}
