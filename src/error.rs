use thiserror::Error;

/// Error taxonomy for the catalog and ledger.
///
/// Nothing here is fatal to the process: every failure is recoverable at
/// the request boundary by retrying the user action.
#[derive(Error, Debug)]
pub enum DeskError {
    /// Listing dataset or ledger file unreadable or corrupt.
    #[error("Data load error: {0}")]
    DataLoad(String),
    /// Ledger write failed.
    #[error("Data write error: {0}")]
    DataWrite(String),
    /// Required contact fields missing or inconsistent.
    #[error("Validation error: {0}")]
    Validation(String),
}

impl DeskError {
    pub fn data_load(msg: impl Into<String>) -> Self {
        DeskError::DataLoad(msg.into())
    }

    pub fn data_write(msg: impl Into<String>) -> Self {
        DeskError::DataWrite(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        DeskError::Validation(msg.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, DeskError::Validation(_))
    }
}
