use serde::{Deserialize, Serialize};

/// Derived shelf status, recomputed on every inventory or waitlist change.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookStatus {
    Available,
    Borrowed,
    Reserved,
}
