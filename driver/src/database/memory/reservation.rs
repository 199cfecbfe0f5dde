use kernel::interface::query::ReservationQuery;
use kernel::interface::update::ReservationModifier;
use kernel::prelude::entity::{BookId, Reservation, ReservationId};
use kernel::KernelError;

use crate::database::memory::InMemoryTransaction;

pub struct InMemoryReservationRepository;

#[async_trait::async_trait]
impl ReservationQuery<InMemoryTransaction> for InMemoryReservationRepository {
    async fn find_by_id(
        &self,
        con: &mut InMemoryTransaction,
        id: &ReservationId,
    ) -> error_stack::Result<Option<Reservation>, KernelError> {
        Ok(con.state().reservations.get(id).cloned())
    }

    async fn find_active_by_book_id(
        &self,
        con: &mut InMemoryTransaction,
        book_id: &BookId,
    ) -> error_stack::Result<Vec<Reservation>, KernelError> {
        let mut queue: Vec<Reservation> = con
            .state()
            .reservations
            .values()
            .filter(|reservation| reservation.book_id() == book_id && reservation.is_active())
            .cloned()
            .collect();
        queue.sort_by(|a, b| {
            a.priority()
                .cmp(&b.priority())
                .then_with(|| a.reserved_at().cmp(b.reserved_at()))
        });
        Ok(queue)
    }

    async fn find_active_all(
        &self,
        con: &mut InMemoryTransaction,
    ) -> error_stack::Result<Vec<Reservation>, KernelError> {
        Ok(con
            .state()
            .reservations
            .values()
            .filter(|reservation| reservation.is_active())
            .cloned()
            .collect())
    }
}

#[async_trait::async_trait]
impl ReservationModifier<InMemoryTransaction> for InMemoryReservationRepository {
    async fn create(
        &self,
        con: &mut InMemoryTransaction,
        reservation: &Reservation,
    ) -> error_stack::Result<(), KernelError> {
        con.state_mut()
            .reservations
            .insert(reservation.id().clone(), reservation.clone());
        Ok(())
    }

    async fn update(
        &self,
        con: &mut InMemoryTransaction,
        reservation: &Reservation,
    ) -> error_stack::Result<(), KernelError> {
        con.state_mut()
            .reservations
            .insert(reservation.id().clone(), reservation.clone());
        Ok(())
    }
}
