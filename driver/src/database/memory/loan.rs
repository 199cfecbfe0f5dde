use kernel::interface::query::LoanQuery;
use kernel::interface::update::LoanModifier;
use kernel::prelude::entity::{BookId, Loan, LoanId, MemberId};
use kernel::KernelError;

use crate::database::memory::InMemoryTransaction;

pub struct InMemoryLoanRepository;

#[async_trait::async_trait]
impl LoanQuery<InMemoryTransaction> for InMemoryLoanRepository {
    async fn find_by_id(
        &self,
        con: &mut InMemoryTransaction,
        id: &LoanId,
    ) -> error_stack::Result<Option<Loan>, KernelError> {
        Ok(con.state().loans.get(id).cloned())
    }

    async fn find_by_member_id(
        &self,
        con: &mut InMemoryTransaction,
        member_id: &MemberId,
    ) -> error_stack::Result<Vec<Loan>, KernelError> {
        let mut loans: Vec<Loan> = con
            .state()
            .loans
            .values()
            .filter(|loan| loan.member_id() == member_id)
            .cloned()
            .collect();
        loans.sort_by(|a, b| b.borrowed_at().cmp(a.borrowed_at()));
        Ok(loans)
    }

    async fn find_unreturned_by_member_id(
        &self,
        con: &mut InMemoryTransaction,
        member_id: &MemberId,
    ) -> error_stack::Result<Vec<Loan>, KernelError> {
        Ok(con
            .state()
            .loans
            .values()
            .filter(|loan| loan.member_id() == member_id && !loan.is_returned())
            .cloned()
            .collect())
    }

    async fn find_unreturned_by_book_id(
        &self,
        con: &mut InMemoryTransaction,
        book_id: &BookId,
    ) -> error_stack::Result<Vec<Loan>, KernelError> {
        Ok(con
            .state()
            .loans
            .values()
            .filter(|loan| loan.book_id() == book_id && !loan.is_returned())
            .cloned()
            .collect())
    }
}

#[async_trait::async_trait]
impl LoanModifier<InMemoryTransaction> for InMemoryLoanRepository {
    async fn create(
        &self,
        con: &mut InMemoryTransaction,
        loan: &Loan,
    ) -> error_stack::Result<(), KernelError> {
        con.state_mut()
            .loans
            .insert(loan.id().clone(), loan.clone());
        Ok(())
    }

    async fn update(
        &self,
        con: &mut InMemoryTransaction,
        loan: &Loan,
    ) -> error_stack::Result<(), KernelError> {
        con.state_mut()
            .loans
            .insert(loan.id().clone(), loan.clone());
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use time::macros::datetime;
    use time::Duration;
    use uuid::Uuid;

    use kernel::interface::database::DatabaseConnection;
    use kernel::interface::query::LoanQuery;
    use kernel::interface::update::LoanModifier;
    use kernel::prelude::entity::{BookId, FineAmount, Loan, LoanId, MemberId, ReturnedAt};
    use kernel::KernelError;

    use crate::database::memory::{InMemoryDatabase, InMemoryLoanRepository};

    #[tokio::test]
    async fn test() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let mut con = db.transact().await?;

        let member_id = MemberId::new(Uuid::new_v4());
        let book_id = BookId::new(Uuid::new_v4());
        let first_borrowed = datetime!(2024-01-10 09:00 UTC);
        let second_borrowed = datetime!(2024-02-01 09:00 UTC);

        let mut first = Loan::new(
            LoanId::new(Uuid::new_v4()),
            book_id.clone(),
            member_id.clone(),
            first_borrowed,
            first_borrowed + Duration::days(14),
        );
        let second = Loan::new(
            LoanId::new(Uuid::new_v4()),
            book_id.clone(),
            member_id.clone(),
            second_borrowed,
            second_borrowed + Duration::days(14),
        );
        InMemoryLoanRepository.create(&mut con, &first).await?;
        InMemoryLoanRepository.create(&mut con, &second).await?;

        let history = InMemoryLoanRepository
            .find_by_member_id(&mut con, &member_id)
            .await?;
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].id(), second.id(), "newest loan comes first");

        first.mark_returned(
            ReturnedAt::new(first_borrowed + Duration::days(5)),
            FineAmount::ZERO,
        );
        InMemoryLoanRepository.update(&mut con, &first).await?;

        let open = InMemoryLoanRepository
            .find_unreturned_by_member_id(&mut con, &member_id)
            .await?;
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].id(), second.id());

        let open_for_book = InMemoryLoanRepository
            .find_unreturned_by_book_id(&mut con, &book_id)
            .await?;
        assert_eq!(open_for_book.len(), 1);
        Ok(())
    }
}
