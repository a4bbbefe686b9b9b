//! Error kinds
//!
//! Steady-state gameplay has no error path; these cover token generation,
//! round setup, configuration parsing and host binding.

/// Token generation failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerateError {
    /// No sequence can satisfy the constraints for these parameters
    #[error("no token set of {count} values below {bound} can satisfy the constraints")]
    Infeasible { count: usize, bound: u32 },

    /// Rejection sampling hit its attempt cap without a valid sequence
    #[error("no valid token set of {count} values below {bound} after {attempts} attempts")]
    Exhausted {
        count: usize,
        bound: u32,
        attempts: u32,
    },
}

/// Round setup failures
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RoundError {
    #[error(transparent)]
    Generate(#[from] GenerateError),

    /// A token could not be placed without overlapping the craft or another token
    #[error("could not place token {value} after {attempts} attempts")]
    Placement { value: u32, attempts: u32 },
}

/// Configuration parse failures
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Host binding failures (web only in practice)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlatformError {
    #[error("host element not found: {0}")]
    MissingElement(String),

    #[error("failed to bind host listener: {0}")]
    Binding(String),
}
