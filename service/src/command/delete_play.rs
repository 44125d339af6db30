//! [`Command`] for deleting a [`Play`].

use common::operations::{By, Commit, Delete, Select, Transact, Transacted};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{play, Play},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for deleting a [`Play`].
///
/// Every scheduled [`Performance`] of the [`Play`] is deleted along with it,
/// including the sold [`Ticket`]s.
///
/// [`Performance`]: crate::domain::Performance
/// [`Ticket`]: crate::domain::Ticket
#[derive(Clone, Copy, Debug)]
pub struct DeletePlay {
    /// ID of the [`Play`] to delete.
    pub id: play::Id,
}

impl<Db> Command<DeletePlay> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Play>, play::Id>>,
            Ok = Option<Play>,
            Err = Traced<database::Error>,
        > + Database<Delete<By<Play, play::Id>>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: DeletePlay) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let DeletePlay { id } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        _ = tx
            .execute(Select(By::<Option<Play>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::PlayNotExists(id))
            .map_err(tracerr::wrap!())?;

        tx.execute(Delete(By::<Play, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        log::info!(play_id = %id, "play deleted");

        Ok(())
    }
}

/// Error of [`DeletePlay`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Play`] with the provided ID does not exist.
    #[display("`Play(id: {_0})` does not exist")]
    PlayNotExists(#[error(not(source))] play::Id),
}

#[cfg(test)]
mod spec {
    use crate::{
        domain::{play, Seat},
        fixture, query, Command as _, Query as _,
    };

    use super::{DeletePlay, ExecutionError};

    #[tokio::test]
    async fn deletes_play_with_performances() {
        let svc = fixture::service();
        let performance = fixture::performance(&svc, 2, 2).await;
        let reservation =
            fixture::reserve(&svc, performance.id, [Seat::new(1, 1)])
                .await
                .unwrap();

        svc.execute(DeletePlay {
            id: performance.play_id,
        })
        .await
        .unwrap();

        let play = svc
            .execute(query::play::ById::by(performance.play_id))
            .await
            .unwrap();
        assert!(play.is_none());
        let performance = svc
            .execute(query::performance::ById::by(performance.id))
            .await
            .unwrap();
        assert!(performance.is_none());
        let tickets = svc
            .execute(query::reservation::Tickets::by(reservation.id))
            .await
            .unwrap();
        assert!(tickets.is_empty());
    }

    #[tokio::test]
    async fn fails_for_missing_play() {
        let svc = fixture::service();

        let err = svc
            .execute(DeletePlay { id: play::Id::new() })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::PlayNotExists(_)));
    }
}
