use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("failed to read hook input: {0}")]
    Read(#[from] std::io::Error),

    #[error("hook input is not valid UTF-8: {0}")]
    NotUtf8(#[from] std::string::FromUtf8Error),

    #[error("hook input is not a JSON object: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("allowlist entry {index} is empty")]
    EmptyPattern { index: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
