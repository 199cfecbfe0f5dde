use error_stack::Report;
use uuid::Uuid;

use kernel::interface::clock::{Clock, DependOnClock};
use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::notify::{DependOnNotifier, Notifier};
use kernel::interface::query::{
    BookQuery, DependOnBookQuery, DependOnLoanQuery, DependOnMemberQuery,
    DependOnReservationQuery, LoanQuery, MemberQuery, ReservationQuery,
};
use kernel::interface::update::{
    BookModifier, DependOnBookModifier, DependOnFineModifier, DependOnLoanModifier,
    DependOnReservationModifier, FineModifier, LoanModifier,
};
use kernel::prelude::entity::{
    BookId, Fine, FineId, Loan, LoanId, MemberId, ReturnedAt,
};
use kernel::prelude::policy::DependOnLendingPolicy;
use kernel::KernelError;

use crate::service::reservation::fulfill_queue_head;
use crate::service::{require_book, require_eligible_member};
use crate::transfer::{
    BookLoansDto, BorrowBookDto, FineDto, LoanDto, LoanHistoryDto, ReservationDto, ReturnBookDto,
    ReturnReceiptDto,
};

#[async_trait::async_trait]
pub trait BorrowBookService<Connection: Transaction + Send>:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection<Connection>
    + DependOnMemberQuery<Connection>
    + DependOnBookQuery<Connection>
    + DependOnBookModifier<Connection>
    + DependOnLoanQuery<Connection>
    + DependOnLoanModifier<Connection>
    + DependOnReservationQuery<Connection>
    + DependOnClock
    + DependOnLendingPolicy
{
    async fn borrow_book(&self, dto: BorrowBookDto) -> error_stack::Result<LoanDto, KernelError> {
        let now = self.clock().now();
        let mut con = self.database_connection().transact().await?;

        let member_id = MemberId::new(dto.member_id);
        require_eligible_member(self.member_query(), &mut con, &member_id).await?;

        let book_id = BookId::new(dto.book_id);
        let mut book = require_book(self.book_query(), &mut con, &book_id).await?;

        let open_loans = self
            .loan_query()
            .find_unreturned_by_member_id(&mut con, &member_id)
            .await?;
        // One overdue loan freezes all further borrowing for the member.
        if open_loans.iter().any(|loan| loan.is_overdue_at(now)) {
            return Err(Report::new(KernelError::MemberHasOverdue).attach_printable(format!(
                "member {member_id:?} holds an overdue loan and cannot borrow"
            )));
        }
        if open_loans.iter().any(|loan| loan.book_id() == &book_id) {
            return Err(Report::new(KernelError::AlreadyBorrowed).attach_printable(format!(
                "member {member_id:?} already borrows book {book_id:?}"
            )));
        }

        book.take_copy()?;
        let waitlisted = !self
            .reservation_query()
            .find_active_by_book_id(&mut con, &book_id)
            .await?
            .is_empty();
        book.refresh_status(waitlisted);
        self.book_modifier().update(&mut con, &book).await?;

        let loan = Loan::new(
            LoanId::new(Uuid::new_v4()),
            book_id,
            member_id,
            now,
            self.lending_policy().due_date(now),
        );
        self.loan_modifier().create(&mut con, &loan).await?;

        con.commit().await?;
        tracing::debug!(loan_id = ?loan.id(), due = %loan.due_date(), "loan opened");
        Ok(LoanDto::from_loan(loan, now))
    }
}

impl<Connection: Transaction + Send, T> BorrowBookService<Connection> for T where
    T: DependOnDatabaseConnection<Connection>
        + DependOnMemberQuery<Connection>
        + DependOnBookQuery<Connection>
        + DependOnBookModifier<Connection>
        + DependOnLoanQuery<Connection>
        + DependOnLoanModifier<Connection>
        + DependOnReservationQuery<Connection>
        + DependOnClock
        + DependOnLendingPolicy
{
}

#[async_trait::async_trait]
pub trait ReturnBookService<Connection: Transaction + Send>:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection<Connection>
    + DependOnBookQuery<Connection>
    + DependOnBookModifier<Connection>
    + DependOnLoanQuery<Connection>
    + DependOnLoanModifier<Connection>
    + DependOnFineModifier<Connection>
    + DependOnReservationQuery<Connection>
    + DependOnReservationModifier<Connection>
    + DependOnClock
    + DependOnLendingPolicy
    + DependOnNotifier
{
    async fn return_book(
        &self,
        dto: ReturnBookDto,
    ) -> error_stack::Result<ReturnReceiptDto, KernelError> {
        let now = self.clock().now();
        let mut con = self.database_connection().transact().await?;

        let loan_id = LoanId::new(dto.loan_id);
        let mut loan = self
            .loan_query()
            .find_by_id(&mut con, &loan_id)
            .await?
            .filter(|loan| !loan.is_returned())
            .ok_or_else(|| {
                Report::new(KernelError::NotFound)
                    .attach_printable(format!("no open loan {loan_id:?}"))
            })?;

        let (days_overdue, amount) = self.lending_policy().fine().assess(*loan.due_date(), now);
        loan.mark_returned(ReturnedAt::new(now), amount);
        self.loan_modifier().update(&mut con, &loan).await?;

        let fine = if amount.is_positive() {
            let fine = Fine::new(
                FineId::new(Uuid::new_v4()),
                loan.id().clone(),
                loan.member_id().clone(),
                amount,
                days_overdue,
                now,
            );
            self.fine_modifier().create(&mut con, &fine).await?;
            tracing::info!(
                loan_id = ?loan.id(),
                days_overdue,
                amount = amount.get(),
                "late return fined"
            );
            Some(fine)
        } else {
            None
        };

        // The loan must reference a catalogued book; anything else means
        // the records disagree.
        let mut book = self
            .book_query()
            .find_by_id(&mut con, loan.book_id())
            .await?
            .ok_or_else(|| {
                Report::new(KernelError::Consistency).attach_printable(format!(
                    "loan {loan_id:?} references unknown book {:?}",
                    loan.book_id()
                ))
            })?;
        book.return_copy().map_err(|report| {
            tracing::error!(book_id = ?loan.book_id(), "copy count would exceed registered total");
            report
        })?;

        // The freed copy goes to the head of the waitlist, if there is one.
        let fulfilled = fulfill_queue_head(
            self.reservation_query(),
            self.reservation_modifier(),
            &mut con,
            loan.book_id(),
        )
        .await?;

        let waitlisted = !self
            .reservation_query()
            .find_active_by_book_id(&mut con, loan.book_id())
            .await?
            .is_empty();
        book.refresh_status(waitlisted);
        self.book_modifier().update(&mut con, &book).await?;

        con.commit().await?;

        if let Some(reservation) = &fulfilled {
            if let Err(report) = self
                .notifier()
                .reservation_ready(reservation.member_id(), reservation.book_id())
                .await
            {
                tracing::warn!(?report, "could not notify member of fulfilled reservation");
            }
        }

        Ok(ReturnReceiptDto {
            loan: LoanDto::from_loan(loan, now),
            fine: fine.map(FineDto::from),
            fulfilled_reservation: fulfilled.map(ReservationDto::from),
        })
    }
}

impl<Connection: Transaction + Send, T> ReturnBookService<Connection> for T where
    T: DependOnDatabaseConnection<Connection>
        + DependOnBookQuery<Connection>
        + DependOnBookModifier<Connection>
        + DependOnLoanQuery<Connection>
        + DependOnLoanModifier<Connection>
        + DependOnFineModifier<Connection>
        + DependOnReservationQuery<Connection>
        + DependOnReservationModifier<Connection>
        + DependOnClock
        + DependOnLendingPolicy
        + DependOnNotifier
{
}

#[async_trait::async_trait]
pub trait LoanHistoryService<Connection: Transaction + Send>:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection<Connection>
    + DependOnMemberQuery<Connection>
    + DependOnBookQuery<Connection>
    + DependOnLoanQuery<Connection>
    + DependOnClock
{
    /// A member's full borrow history, newest first, with the lifecycle
    /// label fixed as of now.
    async fn borrow_history(
        &self,
        dto: LoanHistoryDto,
    ) -> error_stack::Result<Vec<LoanDto>, KernelError> {
        let now = self.clock().now();
        let mut con = self.database_connection().transact().await?;

        let member_id = MemberId::new(dto.member_id);
        self.member_query()
            .find_by_id(&mut con, &member_id)
            .await?
            .ok_or_else(|| {
                Report::new(KernelError::NotFound)
                    .attach_printable(format!("member {member_id:?} is not registered"))
            })?;

        let loans = self
            .loan_query()
            .find_by_member_id(&mut con, &member_id)
            .await?;
        Ok(loans
            .into_iter()
            .map(|loan| LoanDto::from_loan(loan, now))
            .collect())
    }

    /// Copies of a book currently out, for the catalog collaborator.
    async fn open_loans_for_book(
        &self,
        dto: BookLoansDto,
    ) -> error_stack::Result<Vec<LoanDto>, KernelError> {
        let now = self.clock().now();
        let mut con = self.database_connection().transact().await?;

        let book_id = BookId::new(dto.book_id);
        require_book(self.book_query(), &mut con, &book_id).await?;

        let loans = self
            .loan_query()
            .find_unreturned_by_book_id(&mut con, &book_id)
            .await?;
        Ok(loans
            .into_iter()
            .map(|loan| LoanDto::from_loan(loan, now))
            .collect())
    }
}

impl<Connection: Transaction + Send, T> LoanHistoryService<Connection> for T where
    T: DependOnDatabaseConnection<Connection>
        + DependOnMemberQuery<Connection>
        + DependOnBookQuery<Connection>
        + DependOnLoanQuery<Connection>
        + DependOnClock
{
}
