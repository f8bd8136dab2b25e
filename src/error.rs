/// Errors raised by ledger mutations and the desk that dispatches them.
///
/// Summaries never produce these for malformed optional fields; they degrade
/// to `None` instead. Only mutations and missing identifiers surface here.
#[derive(Debug, Clone, PartialEq)]
pub enum LedgerError {
    /// The session or the caller is not in a state that allows the mutation.
    InvalidState(String),
    /// Caller-supplied input is malformed.
    Validation(String),
    /// Stored records reference something that does not exist.
    DataIntegrity(String),
    /// The persistent store failed; nothing is retried.
    Storage(String),
}

impl LedgerError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidState(_) => "invalid state",
            Self::Validation(_) => "validation",
            Self::DataIntegrity(_) => "data integrity",
            Self::Storage(_) => "storage",
        }
    }
}

impl std::fmt::Display for LedgerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidState(s) => write!(f, "invalid state: {}", s),
            Self::Validation(s) => write!(f, "validation failed: {}", s),
            Self::DataIntegrity(s) => write!(f, "data integrity: {}", s),
            Self::Storage(s) => write!(f, "storage: {}", s),
        }
    }
}

impl std::error::Error for LedgerError {}

impl From<anyhow::Error> for LedgerError {
    fn from(e: anyhow::Error) -> Self {
        Self::Storage(e.to_string())
    }
}
