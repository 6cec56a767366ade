// Crate-wide error taxonomy
//
// The gateway is the only place that sees raw transport or parse failures;
// everything it surfaces is already classified into one of these kinds.
// Each variant carries a stable, human-readable message so the presentation
// layer can display errors verbatim.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Required credential is absent — detected before any network attempt.
    #[error("No API key configured. Set GEMINI_API_KEY or add api_key to ~/.hardshell/config.toml.")]
    Configuration,

    /// The remote rejected the configured credential.
    #[error("The API rejected the configured key. Check that it is valid and has not expired.")]
    Authentication,

    /// Transport-level connectivity failure.
    #[error("Could not reach the generation API: {0}")]
    Network(String),

    /// The remote signalled quota or throughput exhaustion.
    #[error("The API rate limit was hit. Wait a moment and try again.")]
    RateLimit,

    /// A structured response did not match the declared shape.
    #[error("The API returned a response that could not be parsed: {0}")]
    MalformedResponse(String),

    /// A caller-supplied precondition was violated.
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Any other remote failure, reported without leaking transport detail.
    #[error("The generation API reported an error: {0}")]
    Api(String),
}

impl Error {
    pub fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }

    /// Short kind tag, useful for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Configuration => "configuration",
            Error::Authentication => "authentication",
            Error::Network(_) => "network",
            Error::RateLimit => "rate_limit",
            Error::MalformedResponse(_) => "malformed_response",
            Error::Validation(_) => "validation",
            Error::Api(_) => "api",
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_has_a_message() {
        let errors = [
            Error::Configuration,
            Error::Authentication,
            Error::Network("dns failure".into()),
            Error::RateLimit,
            Error::MalformedResponse("missing field".into()),
            Error::Validation("not a script".into()),
            Error::Api("500".into()),
        ];
        for e in errors {
            assert!(!e.to_string().is_empty());
            assert!(!e.kind().is_empty());
        }
    }

    #[test]
    fn test_kind_tags_are_distinct() {
        let kinds = [
            Error::Configuration.kind(),
            Error::Authentication.kind(),
            Error::Network(String::new()).kind(),
            Error::RateLimit.kind(),
            Error::MalformedResponse(String::new()).kind(),
            Error::Validation(String::new()).kind(),
            Error::Api(String::new()).kind(),
        ];
        let unique: std::collections::HashSet<_> = kinds.iter().collect();
        assert_eq!(unique.len(), kinds.len());
    }
}
