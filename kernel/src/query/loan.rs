use crate::database::Transaction;
use crate::entity::{BookId, Loan, LoanId, MemberId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait LoanQuery<Connection: Transaction>: Sync + Send + 'static {
    async fn find_by_id(
        &self,
        con: &mut Connection,
        id: &LoanId,
    ) -> error_stack::Result<Option<Loan>, KernelError>;

    /// Full borrow history of a member, newest `borrowed_at` first.
    async fn find_by_member_id(
        &self,
        con: &mut Connection,
        member_id: &MemberId,
    ) -> error_stack::Result<Vec<Loan>, KernelError>;

    async fn find_unreturned_by_member_id(
        &self,
        con: &mut Connection,
        member_id: &MemberId,
    ) -> error_stack::Result<Vec<Loan>, KernelError>;

    async fn find_unreturned_by_book_id(
        &self,
        con: &mut Connection,
        book_id: &BookId,
    ) -> error_stack::Result<Vec<Loan>, KernelError>;
}

pub trait DependOnLoanQuery<Connection: Transaction>: Sync + Send + 'static {
    type LoanQuery: LoanQuery<Connection>;
    fn loan_query(&self) -> &Self::LoanQuery;
}
