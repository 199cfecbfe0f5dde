mod id;
mod priority;
mod status;

pub use self::{id::*, priority::*, status::*};
use destructure::Destructure;
use time::OffsetDateTime;

use crate::entity::{BookId, MemberId};

/// A place in a book's waitlist. Active reservations for one book always
/// carry the contiguous priorities 1..N.
#[derive(Debug, Clone, Eq, PartialEq, Destructure)]
pub struct Reservation {
    id: ReservationId,
    book_id: BookId,
    member_id: MemberId,
    reserved_at: OffsetDateTime,
    expires_at: OffsetDateTime,
    status: ReservationStatus,
    priority: Priority,
}

impl Reservation {
    pub fn new(
        id: ReservationId,
        book_id: BookId,
        member_id: MemberId,
        reserved_at: OffsetDateTime,
        expires_at: OffsetDateTime,
        priority: Priority,
    ) -> Self {
        Self {
            id,
            book_id,
            member_id,
            reserved_at,
            expires_at,
            status: ReservationStatus::Active,
            priority,
        }
    }

    pub fn id(&self) -> &ReservationId {
        &self.id
    }

    pub fn book_id(&self) -> &BookId {
        &self.book_id
    }

    pub fn member_id(&self) -> &MemberId {
        &self.member_id
    }

    pub fn reserved_at(&self) -> &OffsetDateTime {
        &self.reserved_at
    }

    pub fn expires_at(&self) -> &OffsetDateTime {
        &self.expires_at
    }

    pub fn status(&self) -> &ReservationStatus {
        &self.status
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn is_active(&self) -> bool {
        self.status == ReservationStatus::Active
    }

    pub fn is_expired_at(&self, as_of: OffsetDateTime) -> bool {
        self.is_active() && self.expires_at < as_of
    }

    pub fn mark_fulfilled(&mut self) {
        self.status = ReservationStatus::Fulfilled;
    }

    pub fn mark_cancelled(&mut self) {
        self.status = ReservationStatus::Cancelled;
    }

    pub fn mark_expired(&mut self) {
        self.status = ReservationStatus::Expired;
    }
}

/// Next reservation in line: lowest priority, earliest `reserved_at` on a
/// tie.
pub fn queue_head(active: &[Reservation]) -> Option<&Reservation> {
    active
        .iter()
        .min_by(|a, b| {
            a.priority
                .cmp(&b.priority)
                .then_with(|| a.reserved_at.cmp(&b.reserved_at))
        })
}

/// Reassigns the contiguous priorities 1..N over a book's remaining active
/// reservations, preserving their relative order. Returns only the rows
/// whose priority actually changed, ready to be persisted.
pub fn recompact_priorities(mut active: Vec<Reservation>) -> Vec<Reservation> {
    active.sort_by(|a, b| {
        a.priority
            .cmp(&b.priority)
            .then_with(|| a.reserved_at.cmp(&b.reserved_at))
    });
    active
        .into_iter()
        .enumerate()
        .filter_map(|(index, mut reservation)| {
            let assigned = Priority::new((index + 1) as u32);
            if reservation.priority == assigned {
                None
            } else {
                reservation.priority = assigned;
                Some(reservation)
            }
        })
        .collect()
}
