use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("unknown output format '{0}'")]
    FormatNotFound(String),
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl From<svrf_parser::svrf::formats::FormatError> for FormatError {
    fn from(err: svrf_parser::svrf::formats::FormatError) -> Self {
        FormatError::Serialization(err.to_string())
    }
}
