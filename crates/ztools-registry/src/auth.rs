//! Token authentication for the registry.

use ztools_core::config::ENV_REGISTRY_TOKEN;

/// Token provider for registry authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenProvider {
    /// Static token (from config or env).
    Static(String),

    /// No authentication.
    None,
}

impl TokenProvider {
    /// Create a static token provider.
    pub fn static_token(token: impl Into<String>) -> Self {
        Self::Static(token.into())
    }

    /// `ZTOOLS_REGISTRY_TOKEN` if set and non-empty, no auth otherwise.
    pub fn from_env() -> Self {
        match std::env::var(ENV_REGISTRY_TOKEN) {
            Ok(token) if !token.is_empty() => Self::Static(token),
            _ => Self::None,
        }
    }

    /// Bearer token to send, if any.
    pub fn token(&self) -> Option<&str> {
        match self {
            Self::Static(token) => Some(token),
            Self::None => None,
        }
    }

    /// Check if authentication is configured.
    pub fn is_authenticated(&self) -> bool {
        !matches!(self, Self::None)
    }
}

impl Default for TokenProvider {
    fn default() -> Self {
        Self::from_env()
    }
}
