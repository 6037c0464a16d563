/// Failures of the collaborators the analysis core depends on.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Parser unavailable: {0}")]
    ParserUnavailable(String),
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
