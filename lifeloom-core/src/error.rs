//! Error types for LifeLoom

use thiserror::Error;

/// Result type alias for LifeLoom operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for LifeLoom operations
///
/// Plan parsing has no variant here: the parser always produces a plan.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The provider credential is not set
    #[error(
        "{provider} API key not found. Please set {env_var} in your environment \
         or add it to the secrets file."
    )]
    MissingCredential {
        /// Human-readable provider name
        provider: &'static str,
        /// Environment variable that holds the key
        env_var: &'static str,
    },

    /// The provider client could not be constructed
    #[error("Failed to initialize LLM client: {0}")]
    ClientInit(String),

    /// The provider call failed
    #[error("Failed to generate plan with {provider}: {message}")]
    Generation {
        /// Human-readable provider name
        provider: &'static str,
        /// Underlying failure
        message: String,
    },

    /// Anything that escaped the generation pipeline
    #[error("An unexpected error occurred while generating your plan: {0}")]
    Unexpected(String),
}
