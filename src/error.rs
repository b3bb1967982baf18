use thiserror::Error;

pub type DedupResult<T> = Result<T, DedupError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DedupError {
    #[error("unknown field '{field}' (table columns: {schema})")]
    UnknownField { field: String, schema: String },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("row {row} has {got} values but the schema has {expected} fields")]
    RaggedRow {
        row: usize,
        got: usize,
        expected: usize,
    },
    #[error("scan cancelled")]
    Cancelled,
}

impl DedupError {
    pub fn unknown_field(field: &str, schema: &[String]) -> DedupError {
        DedupError::UnknownField {
            field: field.to_string(),
            schema: schema.join(", "),
        }
    }

    pub fn invalid_config<T: std::fmt::Display>(msg: T) -> DedupError {
        DedupError::InvalidConfig(msg.to_string())
    }
}
