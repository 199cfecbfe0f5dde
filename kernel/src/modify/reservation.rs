use crate::database::Transaction;
use crate::entity::Reservation;
use crate::KernelError;

#[async_trait::async_trait]
pub trait ReservationModifier<Connection: Transaction>: 'static + Sync + Send {
    async fn create(
        &self,
        con: &mut Connection,
        reservation: &Reservation,
    ) -> error_stack::Result<(), KernelError>;

    async fn update(
        &self,
        con: &mut Connection,
        reservation: &Reservation,
    ) -> error_stack::Result<(), KernelError>;
}

pub trait DependOnReservationModifier<Connection: Transaction>: 'static + Sync + Send {
    type ReservationModifier: ReservationModifier<Connection>;
    fn reservation_modifier(&self) -> &Self::ReservationModifier;
}
