//! In-memory [`Database`] implementation.
//!
//! Mirrors the constraints of the Postgres schema (uniqueness, foreign keys,
//! cascading deletes), so it can stand in for Postgres in tests.
//! Transactions are exclusive: a [`Tx`] holds the whole [`State`] until it's
//! committed or dropped, and dropping it without a [`Commit`] discards every
//! change made through it.

mod impls;

use std::{collections::HashMap, future::Future, sync::Arc};

use common::operations::{Commit, Transact};
use derive_more::{Display, Error as StdError};
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracerr::Traced;

use crate::{
    domain::{
        actor, genre, performance, play, reservation, theatre_hall, Actor,
        Genre, Performance, Play, Reservation, Seat, TheatreHall, Ticket,
    },
    infra::{database, Database},
};

/// In-memory [`Database`] client.
#[derive(Clone, Debug)]
pub struct Memory<T = NonTx>(T);

impl Memory {
    /// Creates a new empty [`Memory`] database.
    #[must_use]
    pub fn new() -> Self {
        Self(NonTx {
            state: Arc::new(Mutex::new(State::default())),
        })
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

/// Non-transactional [`Memory`] client applying every operation immediately.
#[derive(Clone, Debug)]
pub struct NonTx {
    /// Shared [`State`] of the database.
    state: Arc<Mutex<State>>,
}

/// Transactional [`Memory`] client.
#[derive(Clone, Debug)]
pub struct Tx {
    /// Pending transaction, if not finished yet.
    inner: Arc<Mutex<Option<Pending>>>,
}

/// Transaction in progress.
#[derive(Debug)]
struct Pending {
    /// Exclusive access to the committed [`State`].
    committed: OwnedMutexGuard<State>,

    /// Copy of the [`State`] the transaction modifies.
    scratch: State,
}

/// Access to the [`State`] of a [`Memory`] database.
///
/// Operations check their constraints before changing anything, so a failed
/// operation leaves the [`State`] untouched.
pub trait Storage {
    /// Applies the provided function to the [`State`].
    ///
    /// # Errors
    ///
    /// If the function fails, or the transaction is already finished.
    fn with<R>(
        &self,
        f: impl FnOnce(&mut State) -> Result<R, Error>,
    ) -> impl Future<Output = Result<R, Traced<database::Error>>>;
}

impl Storage for NonTx {
    async fn with<R>(
        &self,
        f: impl FnOnce(&mut State) -> Result<R, Error>,
    ) -> Result<R, Traced<database::Error>> {
        f(&mut *self.state.lock().await)
            .map_err(tracerr::from_and_wrap!(=> database::Error))
    }
}

impl Storage for Tx {
    async fn with<R>(
        &self,
        f: impl FnOnce(&mut State) -> Result<R, Error>,
    ) -> Result<R, Traced<database::Error>> {
        let mut inner = self.inner.lock().await;
        let pending = inner
            .as_mut()
            .ok_or(Error::TxFinished)
            .map_err(tracerr::from_and_wrap!(=> database::Error))?;
        f(&mut pending.scratch)
            .map_err(tracerr::from_and_wrap!(=> database::Error))
    }
}

impl<C: Storage> Memory<C> {
    /// Applies the provided function to the [`State`] of this [`Memory`].
    async fn with<R>(
        &self,
        f: impl FnOnce(&mut State) -> Result<R, Error>,
    ) -> Result<R, Traced<database::Error>> {
        self.0.with(f).await
    }
}

impl Database<Transact> for Memory<NonTx> {
    type Ok = Memory<Tx>;
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Transact) -> Result<Self::Ok, Self::Err> {
        let committed = Arc::clone(&self.0.state).lock_owned().await;
        let scratch = committed.clone();
        Ok(Memory(Tx {
            inner: Arc::new(Mutex::new(Some(Pending { committed, scratch }))),
        }))
    }
}

impl Database<Transact> for Memory<Tx> {
    type Ok = Self;
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Transact) -> Result<Self::Ok, Self::Err> {
        Ok(self.clone())
    }
}

impl Database<Commit> for Memory<Tx> {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Commit) -> Result<Self::Ok, Self::Err> {
        let Pending {
            mut committed,
            scratch,
        } = self
            .0
            .inner
            .lock()
            .await
            .take()
            .ok_or(Error::TxFinished)
            .map_err(tracerr::from_and_wrap!(=> database::Error))?;
        *committed = scratch;
        Ok(())
    }
}

/// Contents of a [`Memory`] database.
#[derive(Clone, Debug, Default)]
pub struct State {
    /// Stored [`Actor`]s.
    actors: HashMap<actor::Id, Actor>,

    /// Stored [`Genre`]s.
    genres: HashMap<genre::Id, Genre>,

    /// Stored [`Play`]s.
    plays: HashMap<play::Id, Play>,

    /// Stored [`TheatreHall`]s.
    theatre_halls: HashMap<theatre_hall::Id, TheatreHall>,

    /// Stored [`Performance`]s.
    performances: HashMap<performance::Id, Performance>,

    /// Stored [`Reservation`]s.
    reservations: HashMap<reservation::Id, Reservation>,

    /// Stored [`Ticket`]s, unique per [`Performance`] and [`Seat`].
    tickets: HashMap<(performance::Id, Seat), Ticket>,
}

impl State {
    /// Removes the [`Play`] with the provided ID along with its
    /// [`Performance`]s.
    fn remove_play(&mut self, id: play::Id) {
        if self.plays.remove(&id).is_some() {
            self.remove_performances(|p| p.play_id == id);
        }
    }

    /// Removes the [`TheatreHall`] with the provided ID along with its
    /// [`Performance`]s.
    fn remove_theatre_hall(&mut self, id: theatre_hall::Id) {
        if self.theatre_halls.remove(&id).is_some() {
            self.remove_performances(|p| p.theatre_hall_id == id);
        }
    }

    /// Removes the [`Performance`]s matching the provided predicate along
    /// with their [`Ticket`]s.
    fn remove_performances(&mut self, pred: impl Fn(&Performance) -> bool) {
        self.performances.retain(|_, p| !pred(p));
        let performances = &self.performances;
        self.tickets
            .retain(|(id, _), _| performances.contains_key(id));
    }

    /// Removes the [`Reservation`] with the provided ID along with its
    /// [`Ticket`]s.
    fn remove_reservation(&mut self, id: reservation::Id) {
        if self.reservations.remove(&id).is_some() {
            self.tickets.retain(|_, t| t.reservation_id != id);
        }
    }
}

/// [`Memory`] database error.
#[derive(Clone, Copy, Debug, Display, StdError)]
pub enum Error {
    /// Value references a missing one.
    #[display("foreign key constraint `{_0}` violated")]
    ForeignKeyViolation(#[error(not(source))] &'static str),

    /// Transaction is already committed.
    #[display("transaction is already committed")]
    TxFinished,
}

#[cfg(test)]
mod spec {
    use common::operations::{By, Insert, Select, Transact};

    use crate::{
        domain::{ticket, Seat, Ticket},
        fixture,
        infra::Database as _,
        read,
    };

    #[tokio::test]
    async fn keeps_first_ticket_of_seat() {
        let svc = fixture::service();
        let performance = fixture::performance(&svc, 2, 2).await;
        let first = fixture::reserve(&svc, performance.id, [Seat::new(1, 1)])
            .await
            .unwrap();
        let second =
            fixture::reserve(&svc, performance.id, Vec::<Seat>::new())
                .await
                .unwrap();
        let db = svc.database();

        let is_inserted = db
            .execute(Insert(Ticket {
                id: ticket::Id::new(),
                seat: Seat::new(1, 1),
                performance_id: performance.id,
                reservation_id: second.id,
            }))
            .await
            .unwrap();

        assert_eq!(is_inserted, false);
        let tickets = db
            .execute(Select(By::<Vec<Ticket>, _>::new(second.id)))
            .await
            .unwrap();
        assert!(tickets.is_empty());
        let tickets = db
            .execute(Select(By::<Vec<Ticket>, _>::new(first.id)))
            .await
            .unwrap();
        assert_eq!(tickets.len(), 1);
    }

    #[tokio::test]
    async fn keeps_first_ticket_of_seat_in_transaction() {
        let svc = fixture::service();
        let performance = fixture::performance(&svc, 2, 2).await;
        let first = fixture::reserve(&svc, performance.id, [Seat::new(2, 1)])
            .await
            .unwrap();
        let tx = svc.database().execute(Transact).await.unwrap();

        let is_inserted = tx
            .execute(Insert(Ticket {
                id: ticket::Id::new(),
                seat: Seat::new(2, 1),
                performance_id: performance.id,
                reservation_id: first.id,
            }))
            .await
            .unwrap();
        let is_taken = tx
            .execute(Select(By::<read::ticket::IsTaken, _>::new((
                performance.id,
                Seat::new(2, 1),
            ))))
            .await
            .unwrap();

        assert_eq!(is_inserted, false);
        assert_eq!(is_taken, true);
    }
}
