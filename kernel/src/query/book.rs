use crate::database::Transaction;
use crate::entity::{Book, BookId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait BookQuery<Connection: Transaction>: Sync + Send + 'static {
    async fn find_by_id(
        &self,
        con: &mut Connection,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError>;

    async fn find_all(&self, con: &mut Connection)
        -> error_stack::Result<Vec<Book>, KernelError>;
}

pub trait DependOnBookQuery<Connection: Transaction>: Sync + Send + 'static {
    type BookQuery: BookQuery<Connection>;
    fn book_query(&self) -> &Self::BookQuery;
}
