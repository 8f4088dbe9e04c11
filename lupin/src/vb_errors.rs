use thiserror::Error;

/// Fatal conditions of a fit. Reaching the iteration cap is not one of
/// them; see [`crate::VbFit::hit_iteration_cap`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VbError {
    /// Malformed data or hyperparameters, detected before the first iteration
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// `diag(E[α]) + XᵀX` is not numerically positive-definite
    #[error("coefficient precision matrix is not positive-definite at iteration {iteration}")]
    SingularSystem { iteration: usize },

    /// Cancellation was requested before `iteration` started
    #[error("cancelled before iteration {iteration}")]
    Cancelled { iteration: usize },
}

pub type VbResult<T> = std::result::Result<T, VbError>;
