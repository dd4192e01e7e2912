use thiserror::Error;

/// Errors produced while regenerating the fixture calendar.
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("fixture feed request failed: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("fixture feed returned an unexpected payload: {0}")]
    MalformedFeed(String),

    #[error("fixture '{context}' is missing required field '{field}'")]
    MissingField {
        context: String,
        field: &'static str,
    },

    #[error("could not parse kickoff time '{value}': {reason}")]
    Kickoff { value: String, reason: String },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type GeneratorResult<T> = Result<T, GeneratorError>;
