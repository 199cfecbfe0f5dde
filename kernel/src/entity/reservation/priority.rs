use serde::{Deserialize, Serialize};

/// Position in a book's waitlist, starting at 1 for the head.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct Priority(u32);

impl Priority {
    pub fn new(position: impl Into<u32>) -> Self {
        Self(position.into())
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl From<Priority> for u32 {
    fn from(priority: Priority) -> Self {
        priority.0
    }
}
