use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct BookCategory(String);

impl BookCategory {
    pub fn new(category: impl Into<String>) -> Self {
        Self(category.into())
    }
}

impl From<BookCategory> for String {
    fn from(category: BookCategory) -> Self {
        category.0
    }
}

impl AsRef<str> for BookCategory {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
