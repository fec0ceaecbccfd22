use thiserror::Error;

#[derive(Error, Debug)]
pub enum EstimatorError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("No data to send")]
    NoData,

    #[error("input file has no '{column}' column")]
    MissingColumn { column: String },

    #[error("malformed response line {line:?}: expected '<email> <score>'")]
    MalformedLine { line: String },

    #[error("completion response contained no choices")]
    EmptyCompletion,

    #[error("completion API returned status {status}: {body}")]
    CompletionStatus { status: u16, body: String },

    #[error("Invalid value for {field}: {value} ({reason})")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfig { field: String },
}

pub type Result<T> = std::result::Result<T, EstimatorError>;
