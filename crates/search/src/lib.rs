//! Rollout search crate - one-ply and Monte-Carlo rollout placement policies.

mod candidates;
mod config;
mod error;
mod greedy;
mod policy;
mod rollout;

pub use candidates::{CandidateList, TieRule};
pub use config::RolloutConfig;
pub use error::{ConfigError, SearchError};
pub use greedy::GreedyPolicy;
pub use policy::Policy;
pub use rollout::{PlacementScore, RolloutPolicy};
