//! [`Command`] for updating a [`TheatreHall`].

use common::operations::{
    By, Commit, Lock, Select, Transact, Transacted, Update,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{theatre_hall, TheatreHall},
    infra::{database, Database},
    read, Service,
};

use super::Command;

/// [`Command`] for updating a [`TheatreHall`].
///
/// [`theatre_hall::Geometry`] cannot be changed once any [`Ticket`] for a
/// [`Performance`] in the [`TheatreHall`] is sold.
///
/// [`Performance`]: crate::domain::Performance
/// [`Ticket`]: crate::domain::Ticket
#[derive(Clone, Debug)]
pub struct UpdateTheatreHall {
    /// ID of the [`TheatreHall`] to update.
    pub id: theatre_hall::Id,

    /// New [`theatre_hall::Name`] of the [`TheatreHall`].
    pub name: theatre_hall::Name,

    /// New [`theatre_hall::Geometry`] of the [`TheatreHall`].
    pub geometry: theatre_hall::Geometry,
}

impl<Db> Command<UpdateTheatreHall> for Service<Db>
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
            Select<By<read::theatre_hall::HasSoldTickets, theatre_hall::Id>>,
            Ok = read::theatre_hall::HasSoldTickets,
            Err = Traced<database::Error>,
        > + Database<Update<TheatreHall>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = TheatreHall;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateTheatreHall,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateTheatreHall { id, name, geometry } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Lock(By::<TheatreHall, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        let mut hall = tx
            .execute(Select(By::<Option<TheatreHall>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::TheatreHallNotExists(id))
            .map_err(tracerr::wrap!())?;

        if hall.geometry != geometry {
            let read::theatre_hall::HasSoldTickets(sold) = tx
                .execute(Select(
                    By::<read::theatre_hall::HasSoldTickets, _>::new(id),
                ))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?;
            if sold {
                return Err(tracerr::new!(E::HallHasSoldTickets(id)));
            }
        }

        hall.name = name;
        hall.geometry = geometry;
        tx.execute(Update(hall.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        log::info!(
            theatre_hall_id = %id,
            %geometry,
            "theatre hall updated",
        );

        Ok(hall)
    }
}

/// Error of [`UpdateTheatreHall`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`TheatreHall`] with the provided ID does not exist.
    #[display("`TheatreHall(id: {_0})` does not exist")]
    TheatreHallNotExists(#[error(not(source))] theatre_hall::Id),

    /// [`TheatreHall`] has sold tickets, so its geometry is frozen.
    #[display("`TheatreHall(id: {_0})` has sold tickets")]
    HallHasSoldTickets(#[error(not(source))] theatre_hall::Id),
}

#[cfg(test)]
mod spec {
    use crate::{
        domain::{theatre_hall::Geometry, Seat},
        fixture, query, Command as _, Query as _,
    };

    use super::{ExecutionError, UpdateTheatreHall};

    #[tokio::test]
    async fn resizes_hall_without_sales() {
        let svc = fixture::service();
        let performance = fixture::performance(&svc, 5, 10).await;

        let hall = svc
            .execute(UpdateTheatreHall {
                id: performance.theatre_hall_id,
                name: "Studio".parse().unwrap(),
                geometry: Geometry::new(2, 3).unwrap(),
            })
            .await
            .unwrap();

        assert_eq!(AsRef::<str>::as_ref(&hall.name), "Studio");
        let available = svc
            .execute(query::performance::AvailableCount::by(performance.id))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(u32::from(available), 6);
    }

    #[tokio::test]
    async fn freezes_geometry_after_sales() {
        let svc = fixture::service();
        let performance = fixture::performance(&svc, 5, 10).await;
        let _ = fixture::reserve(&svc, performance.id, [Seat::new(5, 10)])
            .await
            .unwrap();
        let hall = svc
            .execute(query::theatre_hall::ById::by(
                performance.theatre_hall_id,
            ))
            .await
            .unwrap()
            .unwrap();

        let err = svc
            .execute(UpdateTheatreHall {
                id: hall.id,
                name: hall.name.clone(),
                geometry: Geometry::new(4, 10).unwrap(),
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err.as_ref(),
            ExecutionError::HallHasSoldTickets(_),
        ));

        let renamed = svc
            .execute(UpdateTheatreHall {
                id: hall.id,
                name: "Studio".parse().unwrap(),
                geometry: hall.geometry,
            })
            .await
            .unwrap();
        assert_eq!(renamed.geometry, hall.geometry);
    }

    #[tokio::test]
    async fn takes_name_of_another_hall() {
        let svc = fixture::service();
        let first = fixture::hall(&svc, 1, 1).await;
        let second = fixture::hall(&svc, 1, 1).await;

        let renamed = svc
            .execute(UpdateTheatreHall {
                id: second.id,
                name: first.name.clone(),
                geometry: second.geometry,
            })
            .await
            .unwrap();

        assert_eq!(renamed.id, second.id);
        assert_eq!(renamed.name, first.name);
        let halls = svc
            .execute(query::theatre_halls::List::by(()))
            .await
            .unwrap();
        assert_eq!(halls.len(), 2);
    }
}
