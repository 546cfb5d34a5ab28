use thiserror::Error;

#[derive(Error, Debug)]
pub enum TreeError {
    #[error("Cannot read reference table '{table}': {source}")]
    Csv {
        table: &'static str,
        #[source]
        source: csv::Error,
    },

    #[error("Reference table '{table}' is invalid: {reason}")]
    InvalidTable { table: &'static str, reason: String },

    #[error("Reference table '{table}' has no entry for {key}")]
    MissingEntry { table: &'static str, key: String },

    #[error("Nothing to draw from in '{pool}' for {key}")]
    EmptyPool { pool: &'static str, key: String },
}

impl TreeError {
    pub(crate) fn missing(table: &'static str, key: impl ToString) -> Self {
        Self::MissingEntry { table, key: key.to_string() }
    }

    pub(crate) fn invalid(table: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidTable { table, reason: reason.into() }
    }
}

pub type TreeResult<T> = Result<T, TreeError>;
