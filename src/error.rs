use thiserror::Error;

#[derive(Error, Debug)]
pub enum CipherError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Word List Parsing Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Input Error: {0}")]
    Input(String),
}

pub type CfResult<T> = Result<T, CipherError>;
