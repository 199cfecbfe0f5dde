use time::OffsetDateTime;
use uuid::Uuid;

use kernel::prelude::entity::{DestructLoan, Loan, LoanStatus};

use crate::transfer::{FineDto, ReservationDto};

#[derive(Debug, Clone)]
pub struct LoanDto {
    pub id: Uuid,
    pub book_id: Uuid,
    pub member_id: Uuid,
    pub borrowed_at: OffsetDateTime,
    pub due_date: OffsetDateTime,
    pub returned_at: Option<OffsetDateTime>,
    pub status: LoanStatus,
    pub fine_amount: f64,
}

impl LoanDto {
    /// `as_of` fixes the derived status label, which is clock-dependent.
    pub fn from_loan(loan: Loan, as_of: OffsetDateTime) -> Self {
        let status = loan.status(as_of);
        let DestructLoan {
            id,
            book_id,
            member_id,
            borrowed_at,
            due_date,
            returned_at,
            fine_amount,
        } = loan.into_destruct();
        Self {
            id: id.into(),
            book_id: book_id.into(),
            member_id: member_id.into(),
            borrowed_at,
            due_date,
            returned_at: returned_at.map(Into::into),
            status,
            fine_amount: fine_amount.into(),
        }
    }
}

pub struct BorrowBookDto {
    pub member_id: Uuid,
    pub book_id: Uuid,
}

pub struct ReturnBookDto {
    pub loan_id: Uuid,
}

pub struct LoanHistoryDto {
    pub member_id: Uuid,
}

pub struct BookLoansDto {
    pub book_id: Uuid,
}

/// Outcome of a return: the closed loan, the fine it raised if it was
/// late, and the reservation the freed copy was offered to, if any.
#[derive(Debug, Clone)]
pub struct ReturnReceiptDto {
    pub loan: LoanDto,
    pub fine: Option<FineDto>,
    pub fulfilled_reservation: Option<ReservationDto>,
}
