use std::fmt;

/// Parse or evaluation failure of a DSL line, located by byte offset.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DslError {
    /// Byte offset into the source line.
    pub offset: usize,
    /// Human-readable description.
    pub message: String,
}

impl DslError {
    /// Error at byte `offset`.
    pub fn new(offset: usize, message: impl Into<String>) -> Self {
        Self {
            offset,
            message: message.into(),
        }
    }
}

impl fmt::Display for DslError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dsl error at byte {}: {}", self.offset, self.message)
    }
}

impl std::error::Error for DslError {}
