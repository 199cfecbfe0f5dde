use serde::{Deserialize, Serialize};

/// Copy counter. Unsigned so the ledger can never go negative.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct CopyCount(u32);

impl CopyCount {
    pub fn new(count: impl Into<u32>) -> Self {
        Self(count.into())
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl From<CopyCount> for u32 {
    fn from(count: CopyCount) -> Self {
        count.0
    }
}
