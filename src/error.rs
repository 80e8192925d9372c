//! Error types for tree operations.

/// Result type for tree operations.
pub type Result<T> = std::result::Result<T, TreeError>;

/// Errors that can occur during tree mutation.
///
/// Both variants are recoverable by the caller: the tree's contents and
/// invariants are guaranteed unchanged when either is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// The key being inserted is already present.
    #[error("Duplicate key insertion is not allowed")]
    DuplicateKey,

    /// The key being removed is not present.
    #[error("Key not found in the tree")]
    KeyNotFound,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            TreeError::DuplicateKey.to_string(),
            "Duplicate key insertion is not allowed"
        );
        assert_eq!(
            TreeError::KeyNotFound.to_string(),
            "Key not found in the tree"
        );
    }
}
