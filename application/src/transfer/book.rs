use uuid::Uuid;

use kernel::prelude::entity::{Book, BookStatus, DestructBook};

#[derive(Debug, Clone)]
pub struct BookDto {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub category: String,
    pub total_copies: u32,
    pub available_copies: u32,
    pub status: BookStatus,
}

impl From<Book> for BookDto {
    fn from(value: Book) -> Self {
        let DestructBook {
            id,
            title,
            author,
            isbn,
            category,
            total_copies,
            available_copies,
            status,
        } = value.into_destruct();
        Self {
            id: id.into(),
            title: title.into(),
            author: author.into(),
            isbn: isbn.into(),
            category: category.into(),
            total_copies: total_copies.into(),
            available_copies: available_copies.into(),
            status,
        }
    }
}

pub struct GetBookDto {
    pub book_id: Uuid,
}
