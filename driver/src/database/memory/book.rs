use kernel::interface::query::BookQuery;
use kernel::interface::update::BookModifier;
use kernel::prelude::entity::{Book, BookId};
use kernel::KernelError;

use crate::database::memory::InMemoryTransaction;

pub struct InMemoryBookRepository;

#[async_trait::async_trait]
impl BookQuery<InMemoryTransaction> for InMemoryBookRepository {
    async fn find_by_id(
        &self,
        con: &mut InMemoryTransaction,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        Ok(con.state().books.get(id).cloned())
    }

    async fn find_all(
        &self,
        con: &mut InMemoryTransaction,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        let mut books: Vec<Book> = con.state().books.values().cloned().collect();
        books.sort_by(|a, b| a.title().as_ref().cmp(b.title().as_ref()));
        Ok(books)
    }
}

#[async_trait::async_trait]
impl BookModifier<InMemoryTransaction> for InMemoryBookRepository {
    async fn create(
        &self,
        con: &mut InMemoryTransaction,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        con.state_mut()
            .books
            .insert(book.id().clone(), book.clone());
        Ok(())
    }

    async fn update(
        &self,
        con: &mut InMemoryTransaction,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        con.state_mut()
            .books
            .insert(book.id().clone(), book.clone());
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use uuid::Uuid;

    use kernel::interface::database::DatabaseConnection;
    use kernel::interface::query::BookQuery;
    use kernel::interface::update::BookModifier;
    use kernel::prelude::entity::{
        Book, BookAuthor, BookCategory, BookId, BookStatus, BookTitle, CopyCount, Isbn,
    };
    use kernel::KernelError;

    use crate::database::memory::{InMemoryBookRepository, InMemoryDatabase};

    #[tokio::test]
    async fn test() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let mut con = db.transact().await?;

        let book_id = BookId::new(Uuid::new_v4());
        let mut book = Book::new(
            book_id.clone(),
            BookTitle::new("The Master and Margarita"),
            BookAuthor::new("Mikhail Bulgakov"),
            Isbn::new("9780141180144"),
            BookCategory::new("Fiction"),
            CopyCount::new(2u32),
            CopyCount::new(2u32),
            BookStatus::Available,
        );
        InMemoryBookRepository.create(&mut con, &book).await?;

        let found = InMemoryBookRepository.find_by_id(&mut con, &book_id).await?;
        assert_eq!(found, Some(book.clone()));

        book.take_copy()?;
        book.refresh_status(false);
        InMemoryBookRepository.update(&mut con, &book).await?;

        let found = InMemoryBookRepository
            .find_by_id(&mut con, &book_id)
            .await?
            .unwrap();
        assert_eq!(found.available_copies().get(), 1);
        Ok(())
    }
}
