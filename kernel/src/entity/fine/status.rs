use serde::{Deserialize, Serialize};

/// `Pending` and `Overdue` are open and settleable; `Paid` and `Waived`
/// are terminal. Escalation to `Overdue` belongs to the administrative
/// caller, not this core.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FineStatus {
    Pending,
    Paid,
    Waived,
    Overdue,
}
