use crate::database::Transaction;
use crate::entity::{BookId, Reservation, ReservationId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait ReservationQuery<Connection: Transaction>: Sync + Send + 'static {
    async fn find_by_id(
        &self,
        con: &mut Connection,
        id: &ReservationId,
    ) -> error_stack::Result<Option<Reservation>, KernelError>;

    /// A book's waitlist, priority ascending.
    async fn find_active_by_book_id(
        &self,
        con: &mut Connection,
        book_id: &BookId,
    ) -> error_stack::Result<Vec<Reservation>, KernelError>;

    async fn find_active_all(
        &self,
        con: &mut Connection,
    ) -> error_stack::Result<Vec<Reservation>, KernelError>;
}

pub trait DependOnReservationQuery<Connection: Transaction>: Sync + Send + 'static {
    type ReservationQuery: ReservationQuery<Connection>;
    fn reservation_query(&self) -> &Self::ReservationQuery;
}
