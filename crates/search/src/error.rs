use thiserror::Error;

/// Rejected [`crate::RolloutConfig`] values.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("trajectory_samples must be at least 1")]
    ZeroSamples,

    #[error("discount must be in (0, 1], got {0}")]
    DiscountOutOfRange(f32),

    #[error("tie tolerance must be finite and non-negative, got {0}")]
    NegativeTolerance(f32),
}

/// Errors that can occur while choosing an action.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SearchError {
    /// A selection step found no placement at all. Every live state offers at
    /// least one legal placement, so this means the simulator broke its contract.
    #[error("invariant violated: no candidate placement to choose from")]
    NoCandidates,

    #[error("invalid rollout config: {0}")]
    InvalidConfig(#[from] ConfigError),
}
