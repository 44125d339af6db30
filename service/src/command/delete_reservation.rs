//! [`Command`] for cancelling a [`Reservation`].

use common::operations::{By, Commit, Delete, Select, Transact, Transacted};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{reservation, user, Reservation},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for cancelling a [`Reservation`] of a [`User`], releasing its
/// [`Seat`]s for sale.
///
/// [`Seat`]: crate::domain::Seat
/// [`User`]: crate::domain::User
#[derive(Clone, Copy, Debug)]
pub struct DeleteReservation {
    /// ID of the [`User`] owning the [`Reservation`].
    ///
    /// [`User`]: crate::domain::User
    pub user_id: user::Id,

    /// ID of the [`Reservation`] to cancel.
    pub reservation_id: reservation::Id,
}

impl<Db> Command<DeleteReservation> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Reservation>, reservation::Id>>,
            Ok = Option<Reservation>,
            Err = Traced<database::Error>,
        > + Database<
            Delete<By<Reservation, reservation::Id>>,
            Err = Traced<database::Error>,
        > + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: DeleteReservation,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let DeleteReservation {
            user_id,
            reservation_id: id,
        } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Foreign reservations are reported as missing ones.
        _ = tx
            .execute(Select(By::<Option<Reservation>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .filter(|r| r.user_id == user_id)
            .ok_or(E::ReservationNotExists(id))
            .map_err(tracerr::wrap!())?;

        tx.execute(Delete(By::<Reservation, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        log::info!(reservation_id = %id, %user_id, "reservation cancelled");

        Ok(())
    }
}

/// Error of [`DeleteReservation`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Reservation`] with the provided ID does not exist.
    #[display("`Reservation(id: {_0})` does not exist")]
    ReservationNotExists(#[error(not(source))] reservation::Id),
}

#[cfg(test)]
mod spec {
    use uuid::Uuid;

    use crate::{domain::Seat, fixture, query, Command as _, Query as _};

    use super::{DeleteReservation, ExecutionError};

    #[tokio::test]
    async fn releases_seats() {
        let svc = fixture::service();
        let performance = fixture::performance(&svc, 1, 3).await;
        let reservation = fixture::reserve(
            &svc,
            performance.id,
            [Seat::new(1, 1), Seat::new(1, 3)],
        )
        .await
        .unwrap();

        svc.execute(DeleteReservation {
            user_id: fixture::user(),
            reservation_id: reservation.id,
        })
        .await
        .unwrap();

        let taken = svc
            .execute(query::performance::TakenSeats::by(performance.id))
            .await
            .unwrap();
        assert!(taken.is_empty());
        let reservations = svc
            .execute(query::reservations::ByUser::by(fixture::user()))
            .await
            .unwrap();
        assert!(reservations.is_empty());
        let _ = fixture::reserve(&svc, performance.id, [Seat::new(1, 1)])
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn hides_reservation_of_another_user() {
        let svc = fixture::service();
        let performance = fixture::performance(&svc, 1, 3).await;
        let reservation =
            fixture::reserve(&svc, performance.id, [Seat::new(1, 2)])
                .await
                .unwrap();

        let err = svc
            .execute(DeleteReservation {
                user_id: Uuid::from_u128(2).into(),
                reservation_id: reservation.id,
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::ReservationNotExists(_),
        ));
        let taken = svc
            .execute(query::performance::TakenSeats::by(performance.id))
            .await
            .unwrap();
        assert_eq!(taken.len(), 1);
    }
}
