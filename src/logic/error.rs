use thiserror::Error;

/// Everything a quote request can fail with.
///
/// `InvalidRequest` is always raised before the graph is touched. `InsufficientLiquidity` is
/// recovered per candidate path by the quote service and only surfaces when a caller prices a
/// single pool directly. The arithmetic variants and `PathLimitExceeded` abort the whole request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuoteError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Insufficient liquidity in pool {0}")]
    InsufficientLiquidity(String),
    #[error("No route found from {token_in} to {token_out}")]
    NoRouteFound { token_in: String, token_out: String },
    #[error("Arithmetic overflow")]
    ArithmeticOverflow,
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Duplicate pool key: {0}")]
    DuplicatePoolKey(String),
    #[error("Invalid pool: {0}")]
    InvalidPool(String),
    #[error("More than {max_paths} candidate paths, the best route cannot be guaranteed")]
    PathLimitExceeded { max_paths: usize },
}

impl QuoteError {
    /// Arithmetic failures are internal errors and must never be read as "no route". A truncated
    /// enumeration would silently return a worse route.
    pub fn is_fatal(&self) -> bool {
        matches!(self, QuoteError::ArithmeticOverflow | QuoteError::DivisionByZero | QuoteError::PathLimitExceeded { .. })
    }

    pub fn invalid_request<S: Into<String>>(reason: S) -> Self {
        QuoteError::InvalidRequest(reason.into())
    }
}
