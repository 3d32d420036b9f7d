//! Error types for example data generation.

/// Errors raised while generating example data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    /// Could not find another unique username within the attempt budget.
    #[error("no unused username found after {attempts} attempts")]
    UsernameSpaceExhausted {
        /// Number of candidates tried before giving up.
        attempts: usize,
    },
}
