//! [`Query`] collection related to a single [`Performance`].

use common::operations::{By, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{performance, seat, Performance, Seat},
    infra::{database, Database},
    read, Service,
};

use super::{DatabaseQuery, Query};

/// Queries a [`Performance`] by its [`performance::Id`].
pub type ById = DatabaseQuery<By<Option<Performance>, performance::Id>>;

/// Queries the number of [`Seat`]s of a [`Performance`] still free for sale.
///
/// [`None`] if the [`Performance`] doesn't exist.
pub type AvailableCount = DatabaseQuery<
    By<Option<read::performance::AvailableCount>, performance::Id>,
>;

/// Queries the [`Seat`]s of a [`Performance`] already sold.
pub type TakenSeats =
    DatabaseQuery<By<read::performance::TakenSeats, performance::Id>>;

/// [`Query`] checking whether a [`Seat`] of a [`Performance`] can be sold.
///
/// Advisory only: the [`Seat`] may be sold right after the check. Reserving
/// re-checks it.
#[derive(Clone, Copy, Debug)]
pub struct ValidateSeat {
    /// ID of the [`Performance`] to check the [`Seat`] for.
    pub performance_id: performance::Id,

    /// [`Seat`] to check.
    pub seat: Seat,
}

impl<Db> Query<ValidateSeat> for Service<Db>
where
    Db: Database<
            Select<By<Option<read::Seating>, performance::Id>>,
            Ok = Option<read::Seating>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<read::ticket::IsTaken, (performance::Id, Seat)>>,
            Ok = read::ticket::IsTaken,
            Err = Traced<database::Error>,
        >,
{
    type Ok = ();
    type Err = Traced<ValidationError>;

    async fn execute(
        &self,
        ValidateSeat {
            performance_id,
            seat,
        }: ValidateSeat,
    ) -> Result<Self::Ok, Self::Err> {
        use ValidationError as E;

        let seating = self
            .database()
            .execute(Select(By::new(performance_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::PerformanceNotExists(performance_id))
            .map_err(tracerr::wrap!())?;

        check_seat(self.database(), &seating, seat)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .map_err(tracerr::from_and_wrap!(=> E))
    }
}

/// Checks the provided [`Seat`] against the [`read::Seating`] bounds first,
/// and against the sold tickets then.
///
/// # Errors
///
/// With [`database::Error`] only. The outcome of the check is returned as
/// the inner [`Result`].
pub(crate) async fn check_seat<Db>(
    db: &Db,
    seating: &read::Seating,
    seat: Seat,
) -> Result<Result<(), seat::Error>, Traced<database::Error>>
where
    Db: Database<
        Select<By<read::ticket::IsTaken, (performance::Id, Seat)>>,
        Ok = read::ticket::IsTaken,
        Err = Traced<database::Error>,
    >,
{
    if let Err(e) = seating.geometry.check(seat) {
        return Ok(Err(e));
    }

    let is_taken = db
        .execute(Select(By::new((seating.performance_id, seat))))
        .await
        .map_err(tracerr::wrap!())?;
    Ok(if *is_taken {
        Err(seat::Error::AlreadyTaken(seat))
    } else {
        Ok(())
    })
}

/// Error of [`ValidateSeat`] [`Query`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ValidationError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Performance`] with the provided ID does not exist.
    #[display("`Performance(id: {_0})` does not exist")]
    PerformanceNotExists(#[error(not(source))] performance::Id),

    /// [`Seat`] can't be sold.
    #[display("{_0}")]
    #[from]
    Seat(seat::Error),
}

#[cfg(test)]
mod spec {
    use crate::{
        domain::{performance, seat, Seat},
        fixture, read, Query as _,
    };

    use super::{AvailableCount, TakenSeats, ValidateSeat, ValidationError};

    #[tokio::test]
    async fn counts_available_seats() {
        let svc = fixture::service();
        let performance = fixture::performance(&svc, 5, 10).await;
        let _ = fixture::reserve(
            &svc,
            performance.id,
            [Seat::new(1, 1), Seat::new(1, 2), Seat::new(3, 3)],
        )
        .await
        .unwrap();

        let available = svc
            .execute(AvailableCount::by(performance.id))
            .await
            .unwrap()
            .unwrap();
        let taken = svc
            .execute(TakenSeats::by(performance.id))
            .await
            .unwrap();

        assert_eq!(available, read::performance::AvailableCount::new(50, 3));
        assert_eq!(u32::from(available), 50 - 3);
        assert_eq!(
            taken.into_iter().collect::<Vec<_>>(),
            [Seat::new(1, 1), Seat::new(1, 2), Seat::new(3, 3)],
        );
    }

    #[tokio::test]
    async fn counts_nothing_for_missing_performance() {
        let svc = fixture::service();

        let available = svc
            .execute(AvailableCount::by(performance::Id::new()))
            .await
            .unwrap();

        assert_eq!(available, None);
    }

    #[tokio::test]
    async fn validates_seats() {
        let svc = fixture::service();
        let performance = fixture::performance(&svc, 5, 10).await;
        let _ = fixture::reserve(&svc, performance.id, [Seat::new(2, 3)])
            .await
            .unwrap();
        let validate = |seat| ValidateSeat {
            performance_id: performance.id,
            seat,
        };

        svc.execute(validate(Seat::new(2, 2))).await.unwrap();
        assert!(matches!(
            svc.execute(validate(Seat::new(2, 3))).await.unwrap_err().as_ref(),
            ValidationError::Seat(seat::Error::AlreadyTaken(s))
                if *s == Seat::new(2, 3),
        ));
        assert!(matches!(
            svc.execute(validate(Seat::new(6, 1))).await.unwrap_err().as_ref(),
            ValidationError::Seat(seat::Error::OutOfBounds(s))
                if *s == Seat::new(6, 1),
        ));
    }

    #[tokio::test]
    async fn reports_bounds_before_occupancy() {
        let svc = fixture::service();
        let performance = fixture::performance(&svc, 5, 10).await;
        let _ = fixture::reserve(&svc, performance.id, [Seat::new(5, 10)])
            .await
            .unwrap();

        for seat in [Seat::new(0, 0), Seat::new(5, 11), Seat::new(-1, 4)] {
            let err = svc
                .execute(ValidateSeat {
                    performance_id: performance.id,
                    seat,
                })
                .await
                .unwrap_err();
            assert!(matches!(
                err.as_ref(),
                ValidationError::Seat(seat::Error::OutOfBounds(_)),
            ));
        }
    }

    #[tokio::test]
    async fn fails_for_missing_performance() {
        let svc = fixture::service();
        let id = performance::Id::new();

        let err = svc
            .execute(ValidateSeat {
                performance_id: id,
                seat: Seat::new(1, 1),
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ValidationError::PerformanceNotExists(i) if *i == id,
        ));
    }
}
