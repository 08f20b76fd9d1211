//! Error types for dice, games and analysis

use thiserror::Error;

/// Coarse classification of a [`DiceError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Bad argument value (counts, layouts, duplicate or mismatched faces)
    Validation,
    /// Value of the wrong kind (weight that is not a usable number)
    Type,
    /// Face that does not exist on the die
    Lookup,
    /// Operation requires a completed play
    State,
    /// Declarative configuration could not be parsed
    Config,
}

/// Dice simulation errors
///
/// Every variant describes caller misuse; none of them is transient.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DiceError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Type error: {0}")]
    Type(String),

    #[error("Face not found: {0}")]
    Lookup(String),

    #[error("Invalid state: {0}")]
    State(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl DiceError {
    /// Error kind for matching without inspecting messages
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Type(_) => ErrorKind::Type,
            Self::Lookup(_) => ErrorKind::Lookup,
            Self::State(_) => ErrorKind::State,
            Self::Config(_) => ErrorKind::Config,
        }
    }

    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub(crate) fn not_played() -> Self {
        Self::State("no play has occurred yet".to_string())
    }
}

impl From<serde_json::Error> for DiceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(format!("JSON: {err}"))
    }
}

impl From<serde_yml::Error> for DiceError {
    fn from(err: serde_yml::Error) -> Self {
        Self::Config(format!("YAML: {err}"))
    }
}

/// Result type for dice operations
pub type DiceResult<T> = Result<T, DiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        assert_eq!(DiceError::validation("x").kind(), ErrorKind::Validation);
        assert_eq!(DiceError::Type("x".into()).kind(), ErrorKind::Type);
        assert_eq!(DiceError::Lookup("x".into()).kind(), ErrorKind::Lookup);
        assert_eq!(DiceError::not_played().kind(), ErrorKind::State);
        assert_eq!(DiceError::Config("x".into()).kind(), ErrorKind::Config);
    }

    #[test]
    fn test_display() {
        let err = DiceError::Lookup("'7'".into());
        assert_eq!(err.to_string(), "Face not found: '7'");
    }
}
