use error_stack::Report;

use kernel::interface::database::Transaction;
use kernel::interface::query::{BookQuery, MemberQuery};
use kernel::prelude::entity::{Book, BookId, Member, MemberId};
use kernel::KernelError;

pub use self::{book::*, fine::*, loan::*, reservation::*};

mod book;
mod fine;
mod loan;
mod reservation;

#[cfg(test)]
pub(crate) mod fixture;

/// Borrowing and reserving both require a known, non-suspended member.
pub(crate) async fn require_eligible_member<Connection, Q>(
    query: &Q,
    con: &mut Connection,
    member_id: &MemberId,
) -> error_stack::Result<Member, KernelError>
where
    Connection: Transaction + Send,
    Q: MemberQuery<Connection>,
{
    let member = query
        .find_by_id(con, member_id)
        .await?
        .ok_or_else(|| {
            Report::new(KernelError::NotFound)
                .attach_printable(format!("member {member_id:?} is not registered"))
        })?;
    if !member.is_active() {
        return Err(Report::new(KernelError::MemberNotEligible)
            .attach_printable(format!("member {member_id:?} is suspended")));
    }
    Ok(member)
}

pub(crate) async fn require_book<Connection, Q>(
    query: &Q,
    con: &mut Connection,
    book_id: &BookId,
) -> error_stack::Result<Book, KernelError>
where
    Connection: Transaction + Send,
    Q: BookQuery<Connection>,
{
    query.find_by_id(con, book_id).await?.ok_or_else(|| {
        Report::new(KernelError::NotFound)
            .attach_printable(format!("book {book_id:?} is not in the catalog"))
    })
}
