mod id;
mod returned_at;
mod status;

pub use self::{id::*, returned_at::*, status::*};
use destructure::Destructure;
use time::OffsetDateTime;

use crate::entity::{BookId, FineAmount, MemberId};

/// One member borrowing one copy of one book. Loans are append-only history:
/// a returned loan is never deleted or reopened.
#[derive(Debug, Clone, PartialEq, Destructure)]
pub struct Loan {
    id: LoanId,
    book_id: BookId,
    member_id: MemberId,
    borrowed_at: OffsetDateTime,
    due_date: OffsetDateTime,
    returned_at: Option<ReturnedAt>,
    fine_amount: FineAmount,
}

impl Loan {
    pub fn new(
        id: LoanId,
        book_id: BookId,
        member_id: MemberId,
        borrowed_at: OffsetDateTime,
        due_date: OffsetDateTime,
    ) -> Self {
        Self {
            id,
            book_id,
            member_id,
            borrowed_at,
            due_date,
            returned_at: None,
            fine_amount: FineAmount::ZERO,
        }
    }

    pub fn id(&self) -> &LoanId {
        &self.id
    }

    pub fn book_id(&self) -> &BookId {
        &self.book_id
    }

    pub fn member_id(&self) -> &MemberId {
        &self.member_id
    }

    pub fn borrowed_at(&self) -> &OffsetDateTime {
        &self.borrowed_at
    }

    pub fn due_date(&self) -> &OffsetDateTime {
        &self.due_date
    }

    pub fn returned_at(&self) -> Option<&ReturnedAt> {
        self.returned_at.as_ref()
    }

    pub fn fine_amount(&self) -> FineAmount {
        self.fine_amount
    }

    pub fn is_returned(&self) -> bool {
        self.returned_at.is_some()
    }

    /// Overdue is a label derived from the clock, not a stored transition.
    pub fn is_overdue_at(&self, as_of: OffsetDateTime) -> bool {
        self.returned_at.is_none() && as_of > self.due_date
    }

    pub fn status(&self, as_of: OffsetDateTime) -> LoanStatus {
        if self.is_returned() {
            LoanStatus::Returned
        } else if self.is_overdue_at(as_of) {
            LoanStatus::Overdue
        } else {
            LoanStatus::Active
        }
    }

    pub fn mark_returned(&mut self, returned_at: ReturnedAt, fine_amount: FineAmount) {
        self.returned_at = Some(returned_at);
        self.fine_amount = fine_amount;
    }
}
