use thiserror::Error;

/// Errors raised by chain operations.
///
/// Every error is raised synchronously at the point of violation and
/// propagates to the immediate caller; nothing is caught or retried
/// internally. An operation either completes its structural transition
/// or fails before mutating any chain state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ChainError {
    /// The operation requires at least one element, but the chain is empty.
    #[error("cannot operate on an empty chain")]
    EmptyChain,

    /// The requested position exceeds the valid bound for the operation.
    ///
    /// Note that the bound differs between insertion (which accepts the
    /// one-past-end append position) and access or removal (which do not).
    #[error("index {index} out of range for chain of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// A malformed parameter that is not a position, e.g. a destination
    /// slice too small for a bulk copy.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
}

#[cfg(test)]
mod tests {
    use super::ChainError;

    #[test]
    fn error_display() {
        assert_eq!(
            ChainError::EmptyChain.to_string(),
            "cannot operate on an empty chain"
        );
        assert_eq!(
            ChainError::IndexOutOfRange { index: 5, len: 3 }.to_string(),
            "index 5 out of range for chain of length 3"
        );
        assert_eq!(
            ChainError::InvalidArgument("bad destination").to_string(),
            "invalid argument: bad destination"
        );
    }
}
