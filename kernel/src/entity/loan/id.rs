use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct LoanId(Uuid);

impl LoanId {
    pub fn new(id: impl Into<Uuid>) -> Self {
        Self(id.into())
    }
}

impl From<LoanId> for Uuid {
    fn from(id: LoanId) -> Self {
        id.0
    }
}

impl AsRef<Uuid> for LoanId {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}
