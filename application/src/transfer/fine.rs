use time::OffsetDateTime;
use uuid::Uuid;

use kernel::prelude::entity::{DestructFine, Fine, FineStatus};

#[derive(Debug, Clone)]
pub struct FineDto {
    pub id: Uuid,
    pub loan_id: Uuid,
    pub member_id: Uuid,
    pub amount: f64,
    pub days_overdue: i64,
    pub status: FineStatus,
    pub created_at: OffsetDateTime,
    pub paid_at: Option<OffsetDateTime>,
    pub waived_at: Option<OffsetDateTime>,
    pub waived_by: Option<String>,
    pub waiver_reason: Option<String>,
}

impl From<Fine> for FineDto {
    fn from(value: Fine) -> Self {
        let DestructFine {
            id,
            loan_id,
            member_id,
            amount,
            days_overdue,
            status,
            created_at,
            paid_at,
            waived_at,
            waived_by,
            waiver_reason,
        } = value.into_destruct();
        Self {
            id: id.into(),
            loan_id: loan_id.into(),
            member_id: member_id.into(),
            amount: amount.into(),
            days_overdue,
            status,
            created_at,
            paid_at,
            waived_at,
            waived_by,
            waiver_reason,
        }
    }
}

pub struct GetFinesDto {
    pub member_id: Uuid,
}

pub struct PreviewFineDto {
    pub loan_id: Uuid,
}

/// Fine-to-date for a loan that is still out.
#[derive(Debug, Clone, Copy)]
pub struct AccruedFineDto {
    pub loan_id: Uuid,
    pub days_overdue: i64,
    pub amount: f64,
}

pub struct PayFineDto {
    pub fine_id: Uuid,
}

pub struct WaiveFineDto {
    pub fine_id: Uuid,
    pub waived_by: String,
    pub reason: String,
}
