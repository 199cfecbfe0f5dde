use serde::{Deserialize, Serialize};

/// Standing supplied by the membership service. A suspended member can
/// neither borrow nor reserve.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberStatus {
    Active,
    Suspended,
}
