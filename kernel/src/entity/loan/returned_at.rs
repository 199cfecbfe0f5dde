use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReturnedAt(OffsetDateTime);

impl ReturnedAt {
    pub fn new(time: impl Into<OffsetDateTime>) -> Self {
        Self(time.into())
    }
}

impl From<ReturnedAt> for OffsetDateTime {
    fn from(time: ReturnedAt) -> Self {
        time.0
    }
}

impl AsRef<OffsetDateTime> for ReturnedAt {
    fn as_ref(&self) -> &OffsetDateTime {
        &self.0
    }
}
