use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The primary search path failed. Unlike a degraded vector path this is
    /// surfaced to the caller, which should offer a retry.
    #[error("Lexical search failed: {0}")]
    LexicalSearch(anyhow::Error),

    #[error("Authentication required to request generation")]
    Unauthenticated,

    /// An identical request (query, difficulty, user) was accepted within
    /// the configured suppression window.
    #[error("An identical generation request was just submitted")]
    DuplicateRequest,

    #[error("Generation request failed: {0}")]
    GenerationRequestFailed(anyhow::Error),

    #[error("Operation failed: {0}")]
    Operation(String),
}

pub type Result<T> = std::result::Result<T, Error>;
