use thiserror::Error;

#[derive(Error, Debug)]
pub enum DrillError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed Board: {0}")]
    MalformedBoard(String),

    #[error("Empty Board: found {0} hole(s), a tour needs at least 2")]
    EmptyBoard(usize),

    #[error("Degenerate Instance: {0}")]
    DegenerateInstance(String),

    #[error("Invalid Parameter: {0}")]
    InvalidParameter(String),
}

pub type DpResult<T> = Result<T, DrillError>;
