use error_stack::Report;
use uuid::Uuid;

use kernel::interface::clock::{Clock, DependOnClock};
use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::notify::{DependOnNotifier, Notifier};
use kernel::interface::query::{
    BookQuery, DependOnBookQuery, DependOnMemberQuery, DependOnReservationQuery, ReservationQuery,
};
use kernel::interface::update::{
    BookModifier, DependOnBookModifier, DependOnReservationModifier, ReservationModifier,
};
use kernel::prelude::entity::{
    queue_head, recompact_priorities, BookId, MemberId, Priority, Reservation, ReservationId,
};
use kernel::prelude::policy::DependOnLendingPolicy;
use kernel::KernelError;

use crate::service::{require_book, require_eligible_member};
use crate::transfer::{CancelReservationDto, FulfillNextDto, ReservationDto, ReserveBookDto};

/// Marks the waitlist head fulfilled and closes the priority gap it leaves.
/// Returns the fulfilled reservation so the caller can notify the member
/// once its transaction has committed.
pub(crate) async fn fulfill_queue_head<Connection, Q, M>(
    query: &Q,
    modifier: &M,
    con: &mut Connection,
    book_id: &BookId,
) -> error_stack::Result<Option<Reservation>, KernelError>
where
    Connection: Transaction + Send,
    Q: ReservationQuery<Connection>,
    M: ReservationModifier<Connection>,
{
    let queue = query.find_active_by_book_id(con, book_id).await?;
    let Some(head) = queue_head(&queue) else {
        return Ok(None);
    };
    let mut head = head.clone();
    head.mark_fulfilled();
    modifier.update(con, &head).await?;

    let remaining: Vec<Reservation> = queue
        .into_iter()
        .filter(|reservation| reservation.id() != head.id())
        .collect();
    for changed in recompact_priorities(remaining) {
        modifier.update(con, &changed).await?;
    }
    Ok(Some(head))
}

/// Reassigns 1..N over a book's waitlist and persists the moved rows.
/// Returns the remaining queue length for status derivation.
pub(crate) async fn recompact_book_queue<Connection, Q, M>(
    query: &Q,
    modifier: &M,
    con: &mut Connection,
    book_id: &BookId,
) -> error_stack::Result<usize, KernelError>
where
    Connection: Transaction + Send,
    Q: ReservationQuery<Connection>,
    M: ReservationModifier<Connection>,
{
    let queue = query.find_active_by_book_id(con, book_id).await?;
    let remaining = queue.len();
    for changed in recompact_priorities(queue) {
        modifier.update(con, &changed).await?;
    }
    Ok(remaining)
}

#[async_trait::async_trait]
pub trait ReserveBookService<Connection: Transaction + Send>:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection<Connection>
    + DependOnMemberQuery<Connection>
    + DependOnBookQuery<Connection>
    + DependOnBookModifier<Connection>
    + DependOnReservationQuery<Connection>
    + DependOnReservationModifier<Connection>
    + DependOnClock
    + DependOnLendingPolicy
{
    /// Joins the waitlist at the tail. Availability is deliberately not
    /// checked: reserving an in-stock book is allowed, it just fulfills
    /// quickly.
    async fn reserve_book(
        &self,
        dto: ReserveBookDto,
    ) -> error_stack::Result<ReservationDto, KernelError> {
        let now = self.clock().now();
        let mut con = self.database_connection().transact().await?;

        let member_id = MemberId::new(dto.member_id);
        require_eligible_member(self.member_query(), &mut con, &member_id).await?;

        let book_id = BookId::new(dto.book_id);
        let mut book = require_book(self.book_query(), &mut con, &book_id).await?;

        let queue = self
            .reservation_query()
            .find_active_by_book_id(&mut con, &book_id)
            .await?;
        if queue
            .iter()
            .any(|reservation| reservation.member_id() == &member_id)
        {
            return Err(Report::new(KernelError::AlreadyReserved).attach_printable(format!(
                "member {member_id:?} already waits on book {book_id:?}"
            )));
        }

        let reservation = Reservation::new(
            ReservationId::new(Uuid::new_v4()),
            book_id.clone(),
            member_id,
            now,
            self.lending_policy().reservation_expiry(now),
            Priority::new((queue.len() + 1) as u32),
        );
        self.reservation_modifier()
            .create(&mut con, &reservation)
            .await?;

        // A waitlist on an out-of-stock book flips it from borrowed to
        // reserved.
        book.refresh_status(true);
        self.book_modifier().update(&mut con, &book).await?;

        con.commit().await?;
        tracing::debug!(priority = reservation.priority().get(), "reservation queued");
        Ok(ReservationDto::from(reservation))
    }
}

impl<Connection: Transaction + Send, T> ReserveBookService<Connection> for T where
    T: DependOnDatabaseConnection<Connection>
        + DependOnMemberQuery<Connection>
        + DependOnBookQuery<Connection>
        + DependOnBookModifier<Connection>
        + DependOnReservationQuery<Connection>
        + DependOnReservationModifier<Connection>
        + DependOnClock
        + DependOnLendingPolicy
{
}

#[async_trait::async_trait]
pub trait CancelReservationService<Connection: Transaction + Send>:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection<Connection>
    + DependOnBookQuery<Connection>
    + DependOnBookModifier<Connection>
    + DependOnReservationQuery<Connection>
    + DependOnReservationModifier<Connection>
{
    async fn cancel_reservation(
        &self,
        dto: CancelReservationDto,
    ) -> error_stack::Result<(), KernelError> {
        let mut con = self.database_connection().transact().await?;

        let reservation_id = ReservationId::new(dto.reservation_id);
        let mut reservation = self
            .reservation_query()
            .find_by_id(&mut con, &reservation_id)
            .await?
            .filter(Reservation::is_active)
            .ok_or_else(|| {
                Report::new(KernelError::NotFound).attach_printable(format!(
                    "no active reservation {reservation_id:?}"
                ))
            })?;

        reservation.mark_cancelled();
        self.reservation_modifier()
            .update(&mut con, &reservation)
            .await?;

        let remaining = recompact_book_queue(
            self.reservation_query(),
            self.reservation_modifier(),
            &mut con,
            reservation.book_id(),
        )
        .await?;

        if let Some(mut book) = self
            .book_query()
            .find_by_id(&mut con, reservation.book_id())
            .await?
        {
            book.refresh_status(remaining > 0);
            self.book_modifier().update(&mut con, &book).await?;
        }

        con.commit().await?;
        Ok(())
    }
}

impl<Connection: Transaction + Send, T> CancelReservationService<Connection> for T where
    T: DependOnDatabaseConnection<Connection>
        + DependOnBookQuery<Connection>
        + DependOnBookModifier<Connection>
        + DependOnReservationQuery<Connection>
        + DependOnReservationModifier<Connection>
{
}

#[async_trait::async_trait]
pub trait FulfillReservationService<Connection: Transaction + Send>:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection<Connection>
    + DependOnBookQuery<Connection>
    + DependOnBookModifier<Connection>
    + DependOnReservationQuery<Connection>
    + DependOnReservationModifier<Connection>
    + DependOnNotifier
{
    /// Offers an available copy to the head of the waitlist. Inventory is
    /// untouched: converting the offer into a loan is a borrow.
    async fn fulfill_next(
        &self,
        dto: FulfillNextDto,
    ) -> error_stack::Result<Option<ReservationDto>, KernelError> {
        let mut con = self.database_connection().transact().await?;

        let book_id = BookId::new(dto.book_id);
        let fulfilled = fulfill_queue_head(
            self.reservation_query(),
            self.reservation_modifier(),
            &mut con,
            &book_id,
        )
        .await?;
        let Some(fulfilled) = fulfilled else {
            return Ok(None);
        };

        let remaining = self
            .reservation_query()
            .find_active_by_book_id(&mut con, &book_id)
            .await?
            .len();
        if let Some(mut book) = self.book_query().find_by_id(&mut con, &book_id).await? {
            book.refresh_status(remaining > 0);
            self.book_modifier().update(&mut con, &book).await?;
        }

        con.commit().await?;

        if let Err(report) = self
            .notifier()
            .reservation_ready(fulfilled.member_id(), fulfilled.book_id())
            .await
        {
            tracing::warn!(?report, "could not notify member of fulfilled reservation");
        }
        Ok(Some(ReservationDto::from(fulfilled)))
    }
}

impl<Connection: Transaction + Send, T> FulfillReservationService<Connection> for T where
    T: DependOnDatabaseConnection<Connection>
        + DependOnBookQuery<Connection>
        + DependOnBookModifier<Connection>
        + DependOnReservationQuery<Connection>
        + DependOnReservationModifier<Connection>
        + DependOnNotifier
{
}

#[async_trait::async_trait]
pub trait ExpireReservationsService<Connection: Transaction + Send>:
    'static
    + Sync
    + Send
    + DependOnDatabaseConnection<Connection>
    + DependOnBookQuery<Connection>
    + DependOnBookModifier<Connection>
    + DependOnReservationQuery<Connection>
    + DependOnReservationModifier<Connection>
    + DependOnClock
{
    /// Periodic sweep: lapses every reservation past its expiry and closes
    /// the gaps it left in each affected waitlist.
    async fn expire_stale(&self) -> error_stack::Result<Vec<ReservationDto>, KernelError> {
        let now = self.clock().now();
        let mut con = self.database_connection().transact().await?;

        let stale: Vec<Reservation> = self
            .reservation_query()
            .find_active_all(&mut con)
            .await?
            .into_iter()
            .filter(|reservation| reservation.is_expired_at(now))
            .collect();

        let mut affected_books: Vec<BookId> = Vec::new();
        let mut expired = Vec::with_capacity(stale.len());
        for mut reservation in stale {
            reservation.mark_expired();
            self.reservation_modifier()
                .update(&mut con, &reservation)
                .await?;
            if !affected_books.contains(reservation.book_id()) {
                affected_books.push(reservation.book_id().clone());
            }
            expired.push(reservation);
        }

        for book_id in affected_books {
            let remaining = recompact_book_queue(
                self.reservation_query(),
                self.reservation_modifier(),
                &mut con,
                &book_id,
            )
            .await?;
            if let Some(mut book) = self.book_query().find_by_id(&mut con, &book_id).await? {
                book.refresh_status(remaining > 0);
                self.book_modifier().update(&mut con, &book).await?;
            }
        }

        con.commit().await?;
        if !expired.is_empty() {
            tracing::info!(count = expired.len(), "expired stale reservations");
        }
        Ok(expired.into_iter().map(ReservationDto::from).collect())
    }
}

impl<Connection: Transaction + Send, T> ExpireReservationsService<Connection> for T where
    T: DependOnDatabaseConnection<Connection>
        + DependOnBookQuery<Connection>
        + DependOnBookModifier<Connection>
        + DependOnReservationQuery<Connection>
        + DependOnReservationModifier<Connection>
        + DependOnClock
{
}
