use serde::{Deserialize, Serialize};

/// Derived lifecycle label. `Overdue` is computed against a clock, never
/// written to the record itself.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanStatus {
    Active,
    Returned,
    Overdue,
}
