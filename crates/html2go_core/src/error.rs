use thiserror::Error;

pub type Result<T, E = ConversionError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("failed to parse markup: {0}")]
    Parse(#[from] std::io::Error),
}

/// Delimiter counts that do not match. Only counts are compared; nesting
/// order is never inspected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImbalancedDelimiters {
    #[error("unbalanced parentheses: {opening} opening vs {closing} closing")]
    Parentheses { opening: usize, closing: usize },

    #[error("unbalanced braces: {opening} opening vs {closing} closing")]
    Braces { opening: usize, closing: usize },
}

#[derive(Debug, Error)]
pub enum ConversionError {
    #[error(transparent)]
    Generator(#[from] GeneratorError),

    #[error(transparent)]
    Imbalanced(#[from] ImbalancedDelimiters),
}
