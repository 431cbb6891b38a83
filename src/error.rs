use thiserror::Error;

// Unified error type for fnspace

/// Coarse error family, mirroring the value/type/not-implemented split
/// callers usually dispatch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad value: wrong shape, aliasing, out-of-range index, invalid argument.
    Value,
    /// Incompatible dtype, field, scalar or operator domain/range.
    Type,
    /// Capability missing from the selected backend.
    NotImplemented,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FnError {
    #[error("shape mismatch: {0}")]
    Shape(String),
    #[error("type error: {0}")]
    Type(String),
    #[error("not implemented: {0}")]
    NotImplemented(String),
    #[error("aliased input and output: {0}")]
    Aliasing(String),
    #[error("invalid value: {0}")]
    Value(String),
    #[error("index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },
}

impl FnError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FnError::Type(_) => ErrorKind::Type,
            FnError::NotImplemented(_) => ErrorKind::NotImplemented,
            FnError::Shape(_)
            | FnError::Aliasing(_)
            | FnError::Value(_)
            | FnError::IndexOutOfBounds { .. } => ErrorKind::Value,
        }
    }

    pub fn is_value_error(&self) -> bool {
        self.kind() == ErrorKind::Value
    }

    pub fn is_type_error(&self) -> bool {
        self.kind() == ErrorKind::Type
    }
}

pub type Result<T> = std::result::Result<T, FnError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_and_aliasing_are_value_errors() {
        assert!(FnError::Shape("3 != 4".into()).is_value_error());
        assert!(FnError::Aliasing("apply".into()).is_value_error());
        assert!(FnError::IndexOutOfBounds { index: 3, len: 3 }.is_value_error());
        assert!(!FnError::Type("f64 vs c128".into()).is_value_error());
        assert_eq!(FnError::NotImplemented("complex".into()).kind(), ErrorKind::NotImplemented);
    }
}
