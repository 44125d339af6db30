//! [`Command`] for deleting a [`TheatreHall`].

use common::operations::{
    By, Commit, Delete, Lock, Select, Transact, Transacted,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{theatre_hall, TheatreHall},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for deleting a [`TheatreHall`] along with its
/// [`Performance`]s and their [`Ticket`]s.
///
/// [`Performance`]: crate::domain::Performance
/// [`Ticket`]: crate::domain::Ticket
#[derive(Clone, Copy, Debug)]
pub struct DeleteTheatreHall {
    /// ID of the [`TheatreHall`] to delete.
    pub id: theatre_hall::Id,
}

impl<Db> Command<DeleteTheatreHall> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Lock<By<TheatreHall, theatre_hall::Id>>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<TheatreHall>, theatre_hall::Id>>,
            Ok = Option<TheatreHall>,
            Err = Traced<database::Error>,
        > + Database<
            Delete<By<TheatreHall, theatre_hall::Id>>,
            Err = Traced<database::Error>,
        > + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: DeleteTheatreHall,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let DeleteTheatreHall { id } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Lock(By::<TheatreHall, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        _ = tx
            .execute(Select(By::<Option<TheatreHall>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::TheatreHallNotExists(id))
            .map_err(tracerr::wrap!())?;

        tx.execute(Delete(By::<TheatreHall, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        log::info!(theatre_hall_id = %id, "theatre hall deleted");

        Ok(())
    }
}

/// Error of [`DeleteTheatreHall`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`TheatreHall`] with the provided ID does not exist.
    #[display("`TheatreHall(id: {_0})` does not exist")]
    TheatreHallNotExists(#[error(not(source))] theatre_hall::Id),
}

#[cfg(test)]
mod spec {
    use crate::{domain::theatre_hall, fixture, query, Command as _, Query as _};

    use super::{DeleteTheatreHall, ExecutionError};

    #[tokio::test]
    async fn deletes_hall_with_performances() {
        let svc = fixture::service();
        let performance = fixture::performance(&svc, 3, 3).await;

        svc.execute(DeleteTheatreHall {
            id: performance.theatre_hall_id,
        })
        .await
        .unwrap();

        let halls = svc
            .execute(query::theatre_halls::List::by(()))
            .await
            .unwrap();
        assert!(halls.is_empty());
        let performance = svc
            .execute(query::performance::ById::by(performance.id))
            .await
            .unwrap();
        assert!(performance.is_none());
    }

    #[tokio::test]
    async fn fails_for_missing_hall() {
        let svc = fixture::service();

        let err = svc
            .execute(DeleteTheatreHall {
                id: theatre_hall::Id::new(),
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::TheatreHallNotExists(_),
        ));
    }
}
