use error_stack::Report;

use kernel::interface::clock::{Clock, DependOnClock};
use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::query::{
    DependOnFineQuery, DependOnLoanQuery, FineQuery, LoanQuery,
};
use kernel::interface::update::{DependOnFineModifier, FineModifier};
use kernel::prelude::entity::{Fine, FineId, LoanId, MemberId};
use kernel::prelude::policy::DependOnLendingPolicy;
use kernel::KernelError;

use crate::transfer::{
    AccruedFineDto, FineDto, GetFinesDto, PayFineDto, PreviewFineDto, WaiveFineDto,
};

async fn require_open_fine<Connection, Q>(
    query: &Q,
    con: &mut Connection,
    fine_id: &FineId,
) -> error_stack::Result<Fine, KernelError>
where
    Connection: Transaction + Send,
    Q: FineQuery<Connection>,
{
    query
        .find_by_id(con, fine_id)
        .await?
        .filter(Fine::is_open)
        .ok_or_else(|| {
            Report::new(KernelError::NotFound)
                .attach_printable(format!("no open fine {fine_id:?}"))
        })
}

#[async_trait::async_trait]
pub trait GetFineService<Connection: Transaction + Send>:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection<Connection>
    + DependOnFineQuery<Connection>
    + DependOnLoanQuery<Connection>
    + DependOnClock
    + DependOnLendingPolicy
{
    async fn get_fines(&self, dto: GetFinesDto) -> error_stack::Result<Vec<FineDto>, KernelError> {
        let mut con = self.database_connection().transact().await?;

        let member_id = MemberId::new(dto.member_id);
        let fines = self
            .fine_query()
            .find_by_member_id(&mut con, &member_id)
            .await?;
        Ok(fines.into_iter().map(FineDto::from).collect())
    }

    /// Fine a still-open loan would cost if it came back right now. Pure
    /// preview: nothing is written, and a later call can only grow.
    async fn preview_fine(
        &self,
        dto: PreviewFineDto,
    ) -> error_stack::Result<AccruedFineDto, KernelError> {
        let now = self.clock().now();
        let mut con = self.database_connection().transact().await?;

        let loan_id = LoanId::new(dto.loan_id);
        let loan = self
            .loan_query()
            .find_by_id(&mut con, &loan_id)
            .await?
            .filter(|loan| !loan.is_returned())
            .ok_or_else(|| {
                Report::new(KernelError::NotFound)
                    .attach_printable(format!("no open loan {loan_id:?}"))
            })?;

        let (days_overdue, amount) = self.lending_policy().fine().assess(*loan.due_date(), now);
        Ok(AccruedFineDto {
            loan_id: dto.loan_id,
            days_overdue,
            amount: amount.get(),
        })
    }
}

impl<Connection: Transaction + Send, T> GetFineService<Connection> for T where
    T: DependOnDatabaseConnection<Connection>
        + DependOnFineQuery<Connection>
        + DependOnLoanQuery<Connection>
        + DependOnClock
        + DependOnLendingPolicy
{
}

#[async_trait::async_trait]
pub trait SettleFineService<Connection: Transaction + Send>:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection<Connection>
    + DependOnFineQuery<Connection>
    + DependOnFineModifier<Connection>
    + DependOnClock
{
    async fn pay_fine(&self, dto: PayFineDto) -> error_stack::Result<FineDto, KernelError> {
        let now = self.clock().now();
        let mut con = self.database_connection().transact().await?;

        let fine_id = FineId::new(dto.fine_id);
        let mut fine = require_open_fine(self.fine_query(), &mut con, &fine_id).await?;
        fine.mark_paid(now);
        self.fine_modifier().update(&mut con, &fine).await?;

        con.commit().await?;
        Ok(FineDto::from(fine))
    }

    async fn waive_fine(&self, dto: WaiveFineDto) -> error_stack::Result<FineDto, KernelError> {
        let now = self.clock().now();
        let mut con = self.database_connection().transact().await?;

        let fine_id = FineId::new(dto.fine_id);
        let mut fine = require_open_fine(self.fine_query(), &mut con, &fine_id).await?;
        fine.mark_waived(now, dto.waived_by, dto.reason);
        self.fine_modifier().update(&mut con, &fine).await?;

        con.commit().await?;
        tracing::info!(fine_id = ?fine.id(), "fine waived");
        Ok(FineDto::from(fine))
    }
}

impl<Connection: Transaction + Send, T> SettleFineService<Connection> for T where
    T: DependOnDatabaseConnection<Connection>
        + DependOnFineQuery<Connection>
        + DependOnFineModifier<Connection>
        + DependOnClock
{
}

#[cfg(test)]
mod test {
    use time::Duration;

    use kernel::prelude::entity::FineStatus;
    use kernel::KernelError;

    use crate::service::fixture::TestApp;
    use crate::service::{BorrowBookService, GetFineService, ReturnBookService, SettleFineService};
    use crate::transfer::{
        BorrowBookDto, GetFinesDto, PayFineDto, PreviewFineDto, ReturnBookDto, WaiveFineDto,
    };

    async fn late_fine(app: &TestApp) -> (uuid::Uuid, crate::transfer::FineDto) {
        let book = app.seed_book("Pedro Páramo", 1).await;
        let member = app.seed_member("M1").await;
        let loan = app
            .borrow_book(BorrowBookDto {
                member_id: member,
                book_id: book,
            })
            .await
            .unwrap();
        app.clock.advance(Duration::days(17));
        let receipt = app.return_book(ReturnBookDto { loan_id: loan.id }).await.unwrap();
        (member, receipt.fine.unwrap())
    }

    #[tokio::test]
    async fn preview_grows_with_the_clock_and_writes_nothing() {
        let app = TestApp::new().await;
        let book = app.seed_book("Pedro Páramo", 1).await;
        let member = app.seed_member("M1").await;
        let loan = app
            .borrow_book(BorrowBookDto {
                member_id: member,
                book_id: book,
            })
            .await
            .unwrap();

        app.clock.advance(Duration::days(15));
        let first = app.preview_fine(PreviewFineDto { loan_id: loan.id }).await.unwrap();
        assert_eq!(first.days_overdue, 1);
        assert_eq!(first.amount, 1.0);

        app.clock.advance(Duration::days(2));
        let second = app.preview_fine(PreviewFineDto { loan_id: loan.id }).await.unwrap();
        assert_eq!(second.days_overdue, 3);
        assert!(second.amount >= first.amount);

        let fines = app
            .get_fines(GetFinesDto { member_id: member })
            .await
            .unwrap();
        assert!(fines.is_empty(), "previewing must not create a fine");
    }

    #[tokio::test]
    async fn paying_a_fine_is_terminal() {
        let app = TestApp::new().await;
        let (_, fine) = late_fine(&app).await;

        let paid = app.pay_fine(PayFineDto { fine_id: fine.id }).await.unwrap();
        assert_eq!(paid.status, FineStatus::Paid);
        assert!(paid.paid_at.is_some());

        let report = app.pay_fine(PayFineDto { fine_id: fine.id }).await.unwrap_err();
        assert_eq!(*report.current_context(), KernelError::NotFound);
    }

    #[tokio::test]
    async fn waiving_records_who_and_why() {
        let app = TestApp::new().await;
        let (member, fine) = late_fine(&app).await;

        let waived = app
            .waive_fine(WaiveFineDto {
                fine_id: fine.id,
                waived_by: "head-librarian".into(),
                reason: "damaged copy was our fault".into(),
            })
            .await
            .unwrap();
        assert_eq!(waived.status, FineStatus::Waived);
        assert_eq!(waived.waived_by.as_deref(), Some("head-librarian"));
        assert!(waived.waiver_reason.is_some());

        let fines = app
            .get_fines(GetFinesDto { member_id: member })
            .await
            .unwrap();
        assert_eq!(fines.len(), 1);
        assert_eq!(fines[0].status, FineStatus::Waived);
    }
}
