use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::prelude::entity::{
    Book, BookId, Fine, FineId, Loan, LoanId, Member, MemberId, Reservation, ReservationId,
};
use kernel::KernelError;

pub use self::{book::*, fine::*, loan::*, member::*, reservation::*};

mod book;
mod fine;
mod loan;
mod member;
mod reservation;

#[derive(Debug, Clone, Default)]
pub(in crate::database) struct StoreState {
    books: HashMap<BookId, Book>,
    members: HashMap<MemberId, Member>,
    loans: HashMap<LoanId, Loan>,
    fines: HashMap<FineId, Fine>,
    reservations: HashMap<ReservationId, Reservation>,
}

/// In-process store. `transact` hands out the store under an owned mutex
/// guard, so every open transaction is also the mutual-exclusion scope that
/// serializes inventory-mutating operations: two borrowers racing for the
/// last copy are ordered here, and the loser finds an empty shelf.
#[derive(Clone, Default)]
pub struct InMemoryDatabase {
    store: Arc<Mutex<StoreState>>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl DatabaseConnection<InMemoryTransaction> for InMemoryDatabase {
    async fn transact(&self) -> error_stack::Result<InMemoryTransaction, KernelError> {
        let guard = Arc::clone(&self.store).lock_owned().await;
        let snapshot = guard.clone();
        Ok(InMemoryTransaction {
            guard,
            snapshot: Some(snapshot),
        })
    }
}

/// Mutates the store in place and keeps a snapshot taken at `transact`.
/// Dropping without commit restores the snapshot, so an operation that
/// fails halfway leaves nothing behind.
pub struct InMemoryTransaction {
    guard: OwnedMutexGuard<StoreState>,
    snapshot: Option<StoreState>,
}

impl InMemoryTransaction {
    pub(in crate::database) fn state(&self) -> &StoreState {
        &self.guard
    }

    pub(in crate::database) fn state_mut(&mut self) -> &mut StoreState {
        &mut self.guard
    }
}

#[async_trait::async_trait]
impl Transaction for InMemoryTransaction {
    async fn commit(mut self) -> error_stack::Result<(), KernelError> {
        self.snapshot = None;
        Ok(())
    }

    async fn roll_back(self) -> error_stack::Result<(), KernelError> {
        // Drop restores the snapshot.
        Ok(())
    }
}

impl Drop for InMemoryTransaction {
    fn drop(&mut self) {
        if let Some(snapshot) = self.snapshot.take() {
            *self.guard = snapshot;
        }
    }
}

#[cfg(test)]
mod test {
    use uuid::Uuid;

    use kernel::interface::database::{DatabaseConnection, Transaction};
    use kernel::interface::query::BookQuery;
    use kernel::interface::update::BookModifier;
    use kernel::prelude::entity::{
        Book, BookAuthor, BookCategory, BookId, BookStatus, BookTitle, CopyCount, Isbn,
    };
    use kernel::KernelError;

    use super::{InMemoryBookRepository, InMemoryDatabase};

    fn book(id: &BookId) -> Book {
        Book::new(
            id.clone(),
            BookTitle::new("Molloy"),
            BookAuthor::new("Samuel Beckett"),
            Isbn::new("9780802151360"),
            BookCategory::new("Fiction"),
            CopyCount::new(3u32),
            CopyCount::new(3u32),
            BookStatus::Available,
        )
    }

    #[tokio::test]
    async fn committed_changes_survive_the_transaction() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let id = BookId::new(Uuid::new_v4());

        let mut con = db.transact().await?;
        InMemoryBookRepository.create(&mut con, &book(&id)).await?;
        con.commit().await?;

        let mut con = db.transact().await?;
        let found = InMemoryBookRepository.find_by_id(&mut con, &id).await?;
        assert!(found.is_some());
        Ok(())
    }

    #[tokio::test]
    async fn dropped_transaction_rolls_back() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let id = BookId::new(Uuid::new_v4());

        {
            let mut con = db.transact().await?;
            InMemoryBookRepository.create(&mut con, &book(&id)).await?;
            // no commit
        }

        let mut con = db.transact().await?;
        let found = InMemoryBookRepository.find_by_id(&mut con, &id).await?;
        assert!(found.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn explicit_roll_back_discards_changes() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let id = BookId::new(Uuid::new_v4());

        let mut con = db.transact().await?;
        InMemoryBookRepository.create(&mut con, &book(&id)).await?;
        con.roll_back().await?;

        let mut con = db.transact().await?;
        let found = InMemoryBookRepository.find_by_id(&mut con, &id).await?;
        assert!(found.is_none());
        Ok(())
    }
}
