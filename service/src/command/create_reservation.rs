//! [`Command`] for reserving [`Seat`]s of a [`Performance`].

use std::collections::HashSet;

use common::{
    operations::{By, Commit, Insert, Select, Transact, Transacted},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::domain::Performance;
use crate::{
    domain::{
        performance, reservation, seat, ticket, user, Reservation, Seat,
        Ticket,
    },
    infra::{database, Database},
    query::performance::check_seat,
    read, Service,
};

use super::Command;

/// [`Command`] for reserving [`Seat`]s of a [`Performance`].
///
/// Either every requested [`Seat`] is sold within a new [`Reservation`], or
/// nothing is stored at all.
#[derive(Clone, Debug)]
pub struct CreateReservation {
    /// ID of the [`User`] making the [`Reservation`].
    ///
    /// [`User`]: crate::domain::User
    pub user_id: user::Id,

    /// ID of the [`Performance`] to reserve [`Seat`]s of.
    pub performance_id: performance::Id,

    /// [`Seat`]s to reserve.
    ///
    /// May be empty, producing a [`Reservation`] without [`Ticket`]s.
    pub seats: Vec<Seat>,
}

impl<Db> Command<CreateReservation> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<read::Seating>, performance::Id>>,
            Ok = Option<read::Seating>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<read::ticket::IsTaken, (performance::Id, Seat)>>,
            Ok = read::ticket::IsTaken,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<read::reservation::TicketCount, reservation::Id>>,
            Ok = read::reservation::TicketCount,
            Err = Traced<database::Error>,
        > + Database<Insert<Reservation>, Err = Traced<database::Error>>
        + Database<
            Insert<Ticket>,
            Ok = read::ticket::IsInserted,
            Err = Traced<database::Error>,
        > + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Reservation;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateReservation,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateReservation {
            user_id,
            performance_id,
            seats,
        } = cmd;

        // Rolled back on drop unless committed.
        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let seating = tx
            .execute(Select(By::new(performance_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::PerformanceNotExists(performance_id))
            .map_err(tracerr::wrap!())?;

        let reservation = Reservation {
            id: reservation::Id::new(),
            user_id,
            created_at: DateTime::now().coerce(),
        };
        tx.execute(Insert(reservation))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let mut requested = HashSet::with_capacity(seats.len());
        for &seat in &seats {
            let checked = if requested.insert(seat) {
                check_seat(&tx, &seating, seat)
                    .await
                    .map_err(tracerr::map_from_and_wrap!(=> E))?
            } else {
                Err(seat::Error::AlreadyTaken(seat))
            };
            if let Err(e) = checked {
                log::warn!(
                    %performance_id,
                    %user_id,
                    error = %e,
                    "reservation rejected",
                );
                return Err(tracerr::new!(E::Seat(e)));
            }
        }

        let mut tickets = seats
            .iter()
            .map(|&seat| Ticket {
                id: ticket::Id::new(),
                seat,
                performance_id,
                reservation_id: reservation.id,
            })
            .collect::<Vec<_>>();
        // Overlapping reservations lock `Seat`s in the same order.
        tickets.sort_unstable_by_key(|t| t.seat);
        for ticket in &tickets {
            let is_inserted = tx
                .execute(Insert(*ticket))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?;
            if !*is_inserted {
                let e = seat::Error::AlreadyTaken(ticket.seat);
                log::warn!(
                    %performance_id,
                    %user_id,
                    error = %e,
                    "reservation rejected",
                );
                return Err(tracerr::new!(E::Seat(e)));
            }
        }

        let count = tx
            .execute(Select(By::new(reservation.id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if count != tickets.len() {
            let e = E::Partial {
                expected: tickets.len(),
                actual: count,
            };
            log::error!(
                reservation_id = %reservation.id,
                %performance_id,
                error = %e,
                "reservation rolled back",
            );
            return Err(tracerr::new!(e));
        }

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        log::info!(
            reservation_id = %reservation.id,
            %user_id,
            %performance_id,
            tickets = tickets.len(),
            "reservation created",
        );

        Ok(reservation)
    }
}

/// Error of [`CreateReservation`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Performance`] with the provided ID does not exist.
    #[display("`Performance(id: {_0})` does not exist")]
    PerformanceNotExists(#[error(not(source))] performance::Id),

    /// Requested [`Seat`] can't be sold.
    #[display("{_0}")]
    Seat(seat::Error),

    /// Number of stored [`Ticket`]s differs from the requested one.
    #[display(
        "`Reservation` has {actual} `Ticket`s stored instead of {expected}"
    )]
    Partial {
        /// Number of requested [`Ticket`]s.
        expected: usize,

        /// Number of [`Ticket`]s actually stored.
        actual: read::reservation::TicketCount,
    },
}

#[cfg(test)]
mod spec {
    use common::operations::{By, Commit, Insert, Select, Transact};
    use futures::future;
    use tracerr::Traced;

    use crate::{
        domain::{performance, reservation, seat, Reservation, Seat, Ticket},
        fixture,
        infra::{database, Database},
        query, read, Command as _, Query as _,
    };

    use super::{CreateReservation, ExecutionError};

    /// [`Database`] seeing every [`Seat`] as free when checking it, while
    /// still storing [`Ticket`]s into the wrapped one.
    #[derive(Clone, Debug)]
    struct StaleReads<Db>(Db);

    impl<Db: Database<Transact>> Database<Transact> for StaleReads<Db> {
        type Ok = StaleReads<Db::Ok>;
        type Err = Db::Err;

        async fn execute(&self, op: Transact) -> Result<Self::Ok, Self::Err> {
            self.0.execute(op).await.map(StaleReads)
        }
    }

    impl<Db>
        Database<Select<By<read::ticket::IsTaken, (performance::Id, Seat)>>>
        for StaleReads<Db>
    {
        type Ok = read::ticket::IsTaken;
        type Err = Traced<database::Error>;

        async fn execute(
            &self,
            _: Select<By<read::ticket::IsTaken, (performance::Id, Seat)>>,
        ) -> Result<Self::Ok, Self::Err> {
            Ok(read::ticket::IsTaken(false))
        }
    }

    macro_rules! delegate {
        ($($op:ty),* $(,)?) => {$(
            impl<Db: Database<$op>> Database<$op> for StaleReads<Db> {
                type Ok = <Db as Database<$op>>::Ok;
                type Err = <Db as Database<$op>>::Err;

                async fn execute(
                    &self,
                    op: $op,
                ) -> Result<Self::Ok, Self::Err> {
                    self.0.execute(op).await
                }
            }
        )*};
    }

    delegate![
        Select<By<Option<read::Seating>, performance::Id>>,
        Select<By<read::reservation::TicketCount, reservation::Id>>,
        Insert<Reservation>,
        Insert<Ticket>,
        Commit,
    ];

    fn seats<const N: usize>(seats: [(i32, i32); N]) -> Vec<Seat> {
        seats.into_iter().map(|(r, s)| Seat::new(r, s)).collect()
    }

    async fn available(
        svc: &fixture::Service,
        id: performance::Id,
    ) -> u32 {
        svc.execute(query::performance::AvailableCount::by(id))
            .await
            .unwrap()
            .unwrap()
            .into()
    }

    #[tokio::test]
    async fn sells_seats_of_hall() {
        let svc = fixture::service();
        let performance = fixture::performance(&svc, 5, 10).await;
        let _ = fixture::reserve(
            &svc,
            performance.id,
            [Seat::new(1, 1), Seat::new(1, 2), Seat::new(4, 7)],
        )
        .await
        .unwrap();
        assert_eq!(available(&svc, performance.id).await, 47);

        let out_of_bounds =
            fixture::reserve(&svc, performance.id, [Seat::new(6, 1)])
                .await
                .unwrap_err();
        assert!(matches!(
            out_of_bounds.as_ref(),
            ExecutionError::Seat(seat::Error::OutOfBounds(s))
                if *s == Seat::new(6, 1),
        ));

        let taken = fixture::reserve(&svc, performance.id, [Seat::new(4, 7)])
            .await
            .unwrap_err();
        assert!(matches!(
            taken.as_ref(),
            ExecutionError::Seat(seat::Error::AlreadyTaken(s))
                if *s == Seat::new(4, 7),
        ));
        assert_eq!(available(&svc, performance.id).await, 47);

        let reservation =
            fixture::reserve(&svc, performance.id, [Seat::new(2, 2)])
                .await
                .unwrap();
        assert_eq!(available(&svc, performance.id).await, 46);

        let tickets = svc
            .execute(query::reservation::Tickets::by(reservation.id))
            .await
            .unwrap();
        assert_eq!(tickets.len(), 1);
        assert_eq!(tickets[0].seat, Seat::new(2, 2));
        assert_eq!(tickets[0].performance_id, performance.id);
    }

    #[tokio::test]
    async fn rolls_back_on_any_failed_seat() {
        let svc = fixture::service();
        let performance = fixture::performance(&svc, 5, 10).await;
        let _ = fixture::reserve(&svc, performance.id, [Seat::new(3, 3)])
            .await
            .unwrap();

        let err = fixture::reserve(
            &svc,
            performance.id,
            [Seat::new(1, 1), Seat::new(3, 3), Seat::new(1, 2)],
        )
        .await
        .unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::Seat(seat::Error::AlreadyTaken(s))
                if *s == Seat::new(3, 3),
        ));
        let taken = svc
            .execute(query::performance::TakenSeats::by(performance.id))
            .await
            .unwrap();
        assert_eq!(taken.into_iter().collect::<Vec<_>>(), [Seat::new(3, 3)]);
        let reservations = svc
            .execute(query::reservations::ByUser::by(fixture::user()))
            .await
            .unwrap();
        assert_eq!(reservations.len(), 1, "failed reservation is stored");
    }

    #[tokio::test]
    async fn reports_first_failed_seat_in_request_order() {
        let svc = fixture::service();
        let performance = fixture::performance(&svc, 5, 10).await;
        let _ = fixture::reserve(&svc, performance.id, [Seat::new(1, 1)])
            .await
            .unwrap();

        let err = fixture::reserve(
            &svc,
            performance.id,
            [Seat::new(2, 2), Seat::new(9, 9), Seat::new(1, 1)],
        )
        .await
        .unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::Seat(seat::Error::OutOfBounds(s))
                if *s == Seat::new(9, 9),
        ));
    }

    #[tokio::test]
    async fn rejects_seat_sold_after_being_checked() {
        let svc = fixture::service();
        let performance = fixture::performance(&svc, 5, 10).await;
        let _ = fixture::reserve(&svc, performance.id, [Seat::new(1, 1)])
            .await
            .unwrap();
        let stale = crate::Service::new(StaleReads(svc.database().clone()));

        let err = stale
            .execute(CreateReservation {
                user_id: fixture::user(),
                performance_id: performance.id,
                seats: seats([(2, 2), (1, 1)]),
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::Seat(seat::Error::AlreadyTaken(s))
                if *s == Seat::new(1, 1),
        ));
        let taken = svc
            .execute(query::performance::TakenSeats::by(performance.id))
            .await
            .unwrap();
        assert_eq!(taken.into_iter().collect::<Vec<_>>(), [Seat::new(1, 1)]);
        let reservations = svc
            .execute(query::reservations::ByUser::by(fixture::user()))
            .await
            .unwrap();
        assert_eq!(reservations.len(), 1);
    }

    #[tokio::test]
    async fn rejects_duplicated_seat_in_request() {
        let svc = fixture::service();
        let performance = fixture::performance(&svc, 5, 10).await;

        let err = fixture::reserve(
            &svc,
            performance.id,
            [Seat::new(1, 1), Seat::new(1, 1)],
        )
        .await
        .unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::Seat(seat::Error::AlreadyTaken(s))
                if *s == Seat::new(1, 1),
        ));
        assert_eq!(available(&svc, performance.id).await, 50);
    }

    #[tokio::test]
    async fn accepts_empty_reservation() {
        let svc = fixture::service();
        let performance = fixture::performance(&svc, 5, 10).await;

        let reservation = svc
            .execute(CreateReservation {
                user_id: fixture::user(),
                performance_id: performance.id,
                seats: vec![],
            })
            .await
            .unwrap();

        let tickets = svc
            .execute(query::reservation::Tickets::by(reservation.id))
            .await
            .unwrap();
        assert!(tickets.is_empty());
        assert_eq!(reservation.user_id, fixture::user());
        assert_eq!(available(&svc, performance.id).await, 50);
    }

    #[tokio::test]
    async fn fails_for_missing_performance() {
        let svc = fixture::service();
        let id = performance::Id::new();

        let err = fixture::reserve(&svc, id, [Seat::new(1, 1)])
            .await
            .unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::PerformanceNotExists(i) if *i == id,
        ));
    }

    #[tokio::test]
    async fn sells_contested_seat_only_once() {
        let svc = fixture::service();
        let performance = fixture::performance(&svc, 5, 10).await;

        let results = future::join_all((0..16).map(|_| {
            svc.execute(CreateReservation {
                user_id: fixture::user(),
                performance_id: performance.id,
                seats: seats([(3, 4)]),
            })
        }))
        .await;

        let (ok, err): (Vec<_>, Vec<_>) =
            results.into_iter().partition(Result::is_ok);
        assert_eq!(ok.len(), 1);
        assert_eq!(err.len(), 15);
        for e in err {
            assert!(matches!(
                e.unwrap_err().as_ref(),
                ExecutionError::Seat(seat::Error::AlreadyTaken(_)),
            ));
        }
        assert_eq!(available(&svc, performance.id).await, 49);
    }

    #[tokio::test]
    async fn sells_overlapping_requests_consistently() {
        let svc = fixture::service();
        let performance = fixture::performance(&svc, 2, 2).await;

        let requests = [
            seats([(1, 1), (1, 2)]),
            seats([(1, 2), (2, 2)]),
            seats([(2, 1), (2, 2)]),
            seats([(2, 2), (1, 1)]),
        ];
        let results = future::join_all(requests.into_iter().map(|seats| {
            svc.execute(CreateReservation {
                user_id: fixture::user(),
                performance_id: performance.id,
                seats,
            })
        }))
        .await;

        let mut sold = 0;
        for reservation in results.into_iter().flatten() {
            let tickets = svc
                .execute(query::reservation::Tickets::by(reservation.id))
                .await
                .unwrap();
            assert_eq!(tickets.len(), 2, "reservation is partial");
            sold += tickets.len();
        }
        let taken = svc
            .execute(query::performance::TakenSeats::by(performance.id))
            .await
            .unwrap();
        assert_eq!(taken.len(), sold);
        assert_eq!(
            available(&svc, performance.id).await,
            4 - u32::try_from(sold).unwrap(),
        );
    }
}
