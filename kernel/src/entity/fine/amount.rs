use serde::{Deserialize, Serialize};

/// Currency units owed. Non-negative by construction of the policy.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct FineAmount(f64);

impl FineAmount {
    pub const ZERO: FineAmount = FineAmount(0.0);

    pub fn new(amount: impl Into<f64>) -> Self {
        Self(amount.into())
    }

    pub fn get(self) -> f64 {
        self.0
    }

    pub fn is_positive(self) -> bool {
        self.0 > 0.0
    }
}

impl From<FineAmount> for f64 {
    fn from(amount: FineAmount) -> Self {
        amount.0
    }
}
