use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct FineId(Uuid);

impl FineId {
    pub fn new(id: impl Into<Uuid>) -> Self {
        Self(id.into())
    }
}

impl From<FineId> for Uuid {
    fn from(id: FineId) -> Self {
        id.0
    }
}

impl AsRef<Uuid> for FineId {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}
