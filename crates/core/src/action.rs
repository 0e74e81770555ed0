//! Committed placement choice.

use crate::Rotation;
use serde::{Deserialize, Serialize};

/// A placement: rotate the active piece, then drop it with its leftmost cell in `column`.
///
/// Actions are `Copy`: every hand-off is a fresh value, so a returned action never
/// aliases one still held by a search.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub struct Action {
    pub rotation: Rotation,
    pub column: usize,
}

impl Action {
    pub const fn new(rotation: Rotation, column: usize) -> Self {
        Self { rotation, column }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}@{}", self.rotation, self.column)
    }
}
