use thiserror::Error;

/// Errors raised by exact complex arithmetic and polynomial solving
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A value cannot be represented as an exact rational (NaN, infinity, ...)
    #[error("invalid value: {0}")]
    InvalidValue(String),

    /// Division or inversion by an exact zero
    #[error("division by zero")]
    DivisionByZero,

    /// The operation is not defined for the given operands
    #[error("invalid operation: {0}")]
    InvalidOperation(String),
}

impl Error {
    pub(crate) fn invalid_value(msg: impl Into<String>) -> Self {
        Error::InvalidValue(msg.into())
    }

    pub(crate) fn invalid_operation(msg: impl Into<String>) -> Self {
        Error::InvalidOperation(msg.into())
    }
}
