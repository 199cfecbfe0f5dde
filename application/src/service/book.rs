use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::query::{BookQuery, DependOnBookQuery};
use kernel::prelude::entity::BookId;
use kernel::KernelError;

use crate::transfer::{BookDto, GetBookDto};

/// Inventory view for the catalog collaborator.
#[async_trait::async_trait]
pub trait GetBookService<Connection: Transaction + Send>:
    'static + Sync + Send + DependOnDatabaseConnection<Connection> + DependOnBookQuery<Connection>
{
    async fn get_book(&self, dto: GetBookDto) -> error_stack::Result<Option<BookDto>, KernelError> {
        let mut con = self.database_connection().transact().await?;

        let book_id = BookId::new(dto.book_id);
        let book = self.book_query().find_by_id(&mut con, &book_id).await?;
        Ok(book.map(BookDto::from))
    }

    async fn get_books(&self) -> error_stack::Result<Vec<BookDto>, KernelError> {
        let mut con = self.database_connection().transact().await?;

        let books = self.book_query().find_all(&mut con).await?;
        Ok(books.into_iter().map(BookDto::from).collect())
    }
}

impl<Connection: Transaction + Send, T> GetBookService<Connection> for T where
    T: DependOnDatabaseConnection<Connection> + DependOnBookQuery<Connection>
{
}
