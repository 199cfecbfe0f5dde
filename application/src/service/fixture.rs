use time::macros::datetime;
use uuid::Uuid;

use driver::clock::FixedClock;
use driver::database::{
    InMemoryBookRepository, InMemoryDatabase, InMemoryFineRepository, InMemoryLoanRepository,
    InMemoryMemberRepository, InMemoryReservationRepository, InMemoryTransaction,
};
use driver::notify::TracingNotifier;
use kernel::interface::clock::DependOnClock;
use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::notify::DependOnNotifier;
use kernel::interface::query::{
    DependOnBookQuery, DependOnFineQuery, DependOnLoanQuery, DependOnMemberQuery,
    DependOnReservationQuery, ReservationQuery,
};
use kernel::interface::update::{
    BookModifier, DependOnBookModifier, DependOnFineModifier, DependOnLoanModifier,
    DependOnReservationModifier, MemberModifier,
};
use kernel::prelude::entity::{
    Book, BookAuthor, BookCategory, BookId, BookStatus, BookTitle, CopyCount, Isbn, Member,
    MemberId, MemberName, MemberStatus,
};
use kernel::prelude::policy::{DependOnLendingPolicy, LendingPolicy};

use crate::service::LoanHistoryService;
use crate::transfer::{LoanDto, LoanHistoryDto, ReservationDto};

/// Composition root for the service tests: every collaborator wired to its
/// in-memory driver implementation, time under test control.
pub(crate) struct TestApp {
    db: InMemoryDatabase,
    pub(crate) clock: FixedClock,
    policy: LendingPolicy,
    notifier: TracingNotifier,
    book_repository: InMemoryBookRepository,
    member_repository: InMemoryMemberRepository,
    loan_repository: InMemoryLoanRepository,
    fine_repository: InMemoryFineRepository,
    reservation_repository: InMemoryReservationRepository,
}

impl TestApp {
    pub(crate) async fn new() -> Self {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        Self {
            db: InMemoryDatabase::new(),
            clock: FixedClock::new(datetime!(2024-02-01 12:00 UTC)),
            policy: LendingPolicy::default(),
            notifier: TracingNotifier,
            book_repository: InMemoryBookRepository,
            member_repository: InMemoryMemberRepository,
            loan_repository: InMemoryLoanRepository,
            fine_repository: InMemoryFineRepository,
            reservation_repository: InMemoryReservationRepository,
        }
    }

    pub(crate) async fn seed_book(&self, title: &str, copies: u32) -> Uuid {
        let id = Uuid::new_v4();
        let book = Book::new(
            BookId::new(id),
            BookTitle::new(title),
            BookAuthor::new("unknown"),
            Isbn::new("0000000000000"),
            BookCategory::new("Fiction"),
            CopyCount::new(copies),
            CopyCount::new(copies),
            BookStatus::Available,
        );
        let mut con = self.db.transact().await.unwrap();
        self.book_repository.create(&mut con, &book).await.unwrap();
        con.commit().await.unwrap();
        id
    }

    pub(crate) async fn seed_member(&self, name: &str) -> Uuid {
        self.seed_member_with_status(name, MemberStatus::Active).await
    }

    pub(crate) async fn seed_member_with_status(&self, name: &str, status: MemberStatus) -> Uuid {
        let id = Uuid::new_v4();
        let member = Member::new(MemberId::new(id), MemberName::new(name), status);
        let mut con = self.db.transact().await.unwrap();
        self.member_repository.create(&mut con, &member).await.unwrap();
        con.commit().await.unwrap();
        id
    }

    pub(crate) async fn active_queue(&self, book_id: Uuid) -> Vec<ReservationDto> {
        let mut con = self.db.transact().await.unwrap();
        self.reservation_repository
            .find_active_by_book_id(&mut con, &BookId::new(book_id))
            .await
            .unwrap()
            .into_iter()
            .map(ReservationDto::from)
            .collect()
    }

    pub(crate) async fn member_history(&self, member_id: Uuid) -> Vec<LoanDto> {
        self.borrow_history(LoanHistoryDto { member_id }).await.unwrap()
    }
}

impl DependOnDatabaseConnection<InMemoryTransaction> for TestApp {
    type DatabaseConnection = InMemoryDatabase;
    fn database_connection(&self) -> &Self::DatabaseConnection {
        &self.db
    }
}

impl DependOnClock for TestApp {
    type Clock = FixedClock;
    fn clock(&self) -> &Self::Clock {
        &self.clock
    }
}

impl DependOnNotifier for TestApp {
    type Notifier = TracingNotifier;
    fn notifier(&self) -> &Self::Notifier {
        &self.notifier
    }
}

impl DependOnLendingPolicy for TestApp {
    fn lending_policy(&self) -> &LendingPolicy {
        &self.policy
    }
}

impl DependOnBookQuery<InMemoryTransaction> for TestApp {
    type BookQuery = InMemoryBookRepository;
    fn book_query(&self) -> &Self::BookQuery {
        &self.book_repository
    }
}

impl DependOnBookModifier<InMemoryTransaction> for TestApp {
    type BookModifier = InMemoryBookRepository;
    fn book_modifier(&self) -> &Self::BookModifier {
        &self.book_repository
    }
}

impl DependOnMemberQuery<InMemoryTransaction> for TestApp {
    type MemberQuery = InMemoryMemberRepository;
    fn member_query(&self) -> &Self::MemberQuery {
        &self.member_repository
    }
}

impl DependOnLoanQuery<InMemoryTransaction> for TestApp {
    type LoanQuery = InMemoryLoanRepository;
    fn loan_query(&self) -> &Self::LoanQuery {
        &self.loan_repository
    }
}

impl DependOnLoanModifier<InMemoryTransaction> for TestApp {
    type LoanModifier = InMemoryLoanRepository;
    fn loan_modifier(&self) -> &Self::LoanModifier {
        &self.loan_repository
    }
}

impl DependOnFineQuery<InMemoryTransaction> for TestApp {
    type FineQuery = InMemoryFineRepository;
    fn fine_query(&self) -> &Self::FineQuery {
        &self.fine_repository
    }
}

impl DependOnFineModifier<InMemoryTransaction> for TestApp {
    type FineModifier = InMemoryFineRepository;
    fn fine_modifier(&self) -> &Self::FineModifier {
        &self.fine_repository
    }
}

impl DependOnReservationQuery<InMemoryTransaction> for TestApp {
    type ReservationQuery = InMemoryReservationRepository;
    fn reservation_query(&self) -> &Self::ReservationQuery {
        &self.reservation_repository
    }
}

impl DependOnReservationModifier<InMemoryTransaction> for TestApp {
    type ReservationModifier = InMemoryReservationRepository;
    fn reservation_modifier(&self) -> &Self::ReservationModifier {
        &self.reservation_repository
    }
}
