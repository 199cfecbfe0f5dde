mod amount;
mod id;
mod status;

pub use self::{amount::*, id::*, status::*};
use destructure::Destructure;
use time::OffsetDateTime;

use crate::entity::{LoanId, MemberId};

/// A charge against a member for a late return. `Paid` and `Waived` are
/// terminal: a settled fine never changes again.
#[derive(Debug, Clone, PartialEq, Destructure)]
pub struct Fine {
    id: FineId,
    loan_id: LoanId,
    member_id: MemberId,
    amount: FineAmount,
    days_overdue: i64,
    status: FineStatus,
    created_at: OffsetDateTime,
    paid_at: Option<OffsetDateTime>,
    waived_at: Option<OffsetDateTime>,
    waived_by: Option<String>,
    waiver_reason: Option<String>,
}

impl Fine {
    pub fn new(
        id: FineId,
        loan_id: LoanId,
        member_id: MemberId,
        amount: FineAmount,
        days_overdue: i64,
        created_at: OffsetDateTime,
    ) -> Self {
        Self {
            id,
            loan_id,
            member_id,
            amount,
            days_overdue,
            status: FineStatus::Pending,
            created_at,
            paid_at: None,
            waived_at: None,
            waived_by: None,
            waiver_reason: None,
        }
    }

    pub fn id(&self) -> &FineId {
        &self.id
    }

    pub fn loan_id(&self) -> &LoanId {
        &self.loan_id
    }

    pub fn member_id(&self) -> &MemberId {
        &self.member_id
    }

    pub fn amount(&self) -> FineAmount {
        self.amount
    }

    pub fn days_overdue(&self) -> i64 {
        self.days_overdue
    }

    pub fn status(&self) -> &FineStatus {
        &self.status
    }

    pub fn created_at(&self) -> &OffsetDateTime {
        &self.created_at
    }

    pub fn paid_at(&self) -> Option<&OffsetDateTime> {
        self.paid_at.as_ref()
    }

    pub fn waived_at(&self) -> Option<&OffsetDateTime> {
        self.waived_at.as_ref()
    }

    pub fn waived_by(&self) -> Option<&str> {
        self.waived_by.as_deref()
    }

    pub fn waiver_reason(&self) -> Option<&str> {
        self.waiver_reason.as_deref()
    }

    /// Pending fines, and fines an administrator escalated to overdue,
    /// can still be settled.
    pub fn is_open(&self) -> bool {
        matches!(self.status, FineStatus::Pending | FineStatus::Overdue)
    }

    pub fn mark_paid(&mut self, paid_at: OffsetDateTime) {
        self.status = FineStatus::Paid;
        self.paid_at = Some(paid_at);
    }

    pub fn mark_waived(
        &mut self,
        waived_at: OffsetDateTime,
        waived_by: impl Into<String>,
        reason: impl Into<String>,
    ) {
        self.status = FineStatus::Waived;
        self.waived_at = Some(waived_at);
        self.waived_by = Some(waived_by.into());
        self.waiver_reason = Some(reason.into());
    }
}
