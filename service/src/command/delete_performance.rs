//! [`Command`] for deleting a [`Performance`].

use common::operations::{
    By, Commit, Delete, Lock, Select, Transact, Transacted,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{performance, Performance},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for cancelling a [`Performance`] along with its sold
/// [`Ticket`]s.
///
/// [`Ticket`]: crate::domain::Ticket
#[derive(Clone, Copy, Debug)]
pub struct DeletePerformance {
    /// ID of the [`Performance`] to delete.
    pub id: performance::Id,
}

impl<Db> Command<DeletePerformance> for Service<Db>
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
            Delete<By<Performance, performance::Id>>,
            Err = Traced<database::Error>,
        > + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: DeletePerformance,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let DeletePerformance { id } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Lock(By::<Performance, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        _ = tx
            .execute(Select(By::<Option<Performance>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::PerformanceNotExists(id))
            .map_err(tracerr::wrap!())?;

        tx.execute(Delete(By::<Performance, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        log::info!(performance_id = %id, "performance deleted");

        Ok(())
    }
}

/// Error of [`DeletePerformance`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Performance`] with the provided ID does not exist.
    #[display("`Performance(id: {_0})` does not exist")]
    PerformanceNotExists(#[error(not(source))] performance::Id),
}

#[cfg(test)]
mod spec {
    use crate::{domain::Seat, fixture, query, Command as _, Query as _};

    use super::{DeletePerformance, ExecutionError};

    #[tokio::test]
    async fn deletes_performance_with_tickets() {
        let svc = fixture::service();
        let performance = fixture::performance(&svc, 2, 2).await;
        let reservation =
            fixture::reserve(&svc, performance.id, [Seat::new(2, 2)])
                .await
                .unwrap();

        svc.execute(DeletePerformance { id: performance.id })
            .await
            .unwrap();

        let tickets = svc
            .execute(query::reservation::Tickets::by(reservation.id))
            .await
            .unwrap();
        assert!(tickets.is_empty());

        let err = svc
            .execute(DeletePerformance { id: performance.id })
            .await
            .unwrap_err();
        assert!(matches!(
            err.as_ref(),
            ExecutionError::PerformanceNotExists(_),
        ));
    }
}
