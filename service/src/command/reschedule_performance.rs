//! [`Command`] for moving a [`Performance`] to another time or hall.

use common::operations::{
    By, Commit, Lock, Select, Transact, Transacted, Update,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{performance, theatre_hall, Performance, TheatreHall},
    infra::{database, Database},
    read, Service,
};

use super::Command;

/// [`Command`] for moving a [`Performance`] to another
/// [`performance::ShowTime`] or [`TheatreHall`].
///
/// Once any [`Ticket`] of the [`Performance`] is sold, it cannot be moved.
///
/// [`Ticket`]: crate::domain::Ticket
#[derive(Clone, Copy, Debug)]
pub struct ReschedulePerformance {
    /// ID of the [`Performance`] to move.
    pub id: performance::Id,

    /// ID of the [`TheatreHall`] to host the [`Performance`].
    pub theatre_hall_id: theatre_hall::Id,

    /// New [`performance::ShowTime`] of the [`Performance`].
    pub show_time: performance::ShowTime,
}

impl<Db> Command<ReschedulePerformance> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Lock<By<Performance, performance::Id>>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Performance>, performance::Id>>,
            Ok = Option<Performance>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<TheatreHall>, theatre_hall::Id>>,
            Ok = Option<TheatreHall>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<read::performance::HasTickets, performance::Id>>,
            Ok = read::performance::HasTickets,
            Err = Traced<database::Error>,
        > + Database<Update<Performance>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Performance;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: ReschedulePerformance,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let ReschedulePerformance {
            id,
            theatre_hall_id,
            show_time,
        } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Lock(By::<Performance, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        let mut performance = tx
            .execute(Select(By::<Option<Performance>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::PerformanceNotExists(id))
            .map_err(tracerr::wrap!())?;

        if performance.theatre_hall_id == theatre_hall_id
            && performance.show_time == show_time
        {
            return Ok(performance);
        }

        let read::performance::HasTickets(sold) = tx
            .execute(Select(By::<read::performance::HasTickets, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if sold {
            return Err(tracerr::new!(E::PerformanceHasTickets(id)));
        }

        _ = tx
            .execute(Select(By::<Option<TheatreHall>, _>::new(
                theatre_hall_id,
            )))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::TheatreHallNotExists(theatre_hall_id))
            .map_err(tracerr::wrap!())?;

        performance.theatre_hall_id = theatre_hall_id;
        performance.show_time = show_time;
        tx.execute(Update(performance))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        log::info!(
            performance_id = %id,
            %theatre_hall_id,
            "performance rescheduled",
        );

        Ok(performance)
    }
}

/// Error of [`ReschedulePerformance`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Performance`] with the provided ID does not exist.
    #[display("`Performance(id: {_0})` does not exist")]
    PerformanceNotExists(#[error(not(source))] performance::Id),

    /// [`TheatreHall`] with the provided ID does not exist.
    #[display("`TheatreHall(id: {_0})` does not exist")]
    TheatreHallNotExists(#[error(not(source))] theatre_hall::Id),

    /// [`Performance`] has sold tickets, so it cannot be moved.
    #[display("`Performance(id: {_0})` has sold tickets")]
    PerformanceHasTickets(#[error(not(source))] performance::Id),
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use crate::{domain::Seat, fixture, query, Command as _, Query as _};

    use super::{ExecutionError, ReschedulePerformance};

    #[tokio::test]
    async fn moves_performance_to_another_hall() {
        let svc = fixture::service();
        let performance = fixture::performance(&svc, 2, 2).await;
        let hall = fixture::hall(&svc, 3, 3).await;

        let moved = svc
            .execute(ReschedulePerformance {
                id: performance.id,
                theatre_hall_id: hall.id,
                show_time: performance.show_time
                    + Duration::from_secs(60 * 60),
            })
            .await
            .unwrap();

        assert_eq!(moved.theatre_hall_id, hall.id);
        let available = svc
            .execute(query::performance::AvailableCount::by(performance.id))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(u32::from(available), 9);
    }

    #[tokio::test]
    async fn keeps_performance_with_sold_tickets() {
        let svc = fixture::service();
        let performance = fixture::performance(&svc, 2, 2).await;
        let _ = fixture::reserve(&svc, performance.id, [Seat::new(1, 2)])
            .await
            .unwrap();

        let err = svc
            .execute(ReschedulePerformance {
                id: performance.id,
                theatre_hall_id: performance.theatre_hall_id,
                show_time: performance.show_time
                    + Duration::from_secs(60 * 60),
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::PerformanceHasTickets(_),
        ));
        let stored = svc
            .execute(query::performance::ById::by(performance.id))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.show_time, performance.show_time);
    }
}
