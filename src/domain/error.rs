use thiserror::Error;

/// Errors raised by the character-class, graph and classifier layers.
///
/// None of these are recoverable at the call site: the caller handed in
/// malformed input or asked an untrained classifier for an answer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Invalid input: expected a single character or nothing, got {0:?}")]
    InvalidInput(String),

    #[error("No display symbol is defined for character class bits {0}")]
    UndefinedSymbol(u8),

    #[error("Character class bits out of range 1..=15: {0}")]
    InvalidClassBits(u8),

    #[error("Classifier has no templates; train it before classifying")]
    NoTemplates,

    #[error("Duplicate template label '{0}'")]
    DuplicateLabel(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            GraphError::InvalidInput("ab".to_string()).to_string(),
            "Invalid input: expected a single character or nothing, got \"ab\""
        );
        assert_eq!(
            GraphError::UndefinedSymbol(0).to_string(),
            "No display symbol is defined for character class bits 0"
        );
        assert!(GraphError::NoTemplates.to_string().contains("no templates"));
        assert_eq!(
            GraphError::DuplicateLabel("X".to_string()).to_string(),
            "Duplicate template label 'X'"
        );
    }
}
