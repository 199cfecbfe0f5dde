use time::OffsetDateTime;
use uuid::Uuid;

use kernel::prelude::entity::{DestructReservation, Reservation, ReservationStatus};

#[derive(Debug, Clone)]
pub struct ReservationDto {
    pub id: Uuid,
    pub book_id: Uuid,
    pub member_id: Uuid,
    pub reserved_at: OffsetDateTime,
    pub expires_at: OffsetDateTime,
    pub status: ReservationStatus,
    pub priority: u32,
}

impl From<Reservation> for ReservationDto {
    fn from(value: Reservation) -> Self {
        let DestructReservation {
            id,
            book_id,
            member_id,
            reserved_at,
            expires_at,
            status,
            priority,
        } = value.into_destruct();
        Self {
            id: id.into(),
            book_id: book_id.into(),
            member_id: member_id.into(),
            reserved_at,
            expires_at,
            status,
            priority: priority.into(),
        }
    }
}

pub struct ReserveBookDto {
    pub member_id: Uuid,
    pub book_id: Uuid,
}

pub struct CancelReservationDto {
    pub reservation_id: Uuid,
}

pub struct FulfillNextDto {
    pub book_id: Uuid,
}
