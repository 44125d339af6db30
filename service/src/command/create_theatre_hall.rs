//! [`Command`] for creating a new [`TheatreHall`].

use common::operations::Insert;
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{theatre_hall, TheatreHall},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`TheatreHall`].
#[derive(Clone, Debug)]
pub struct CreateTheatreHall {
    /// [`theatre_hall::Name`] of a new [`TheatreHall`].
    pub name: theatre_hall::Name,

    /// [`theatre_hall::Geometry`] of a new [`TheatreHall`].
    pub geometry: theatre_hall::Geometry,
}

impl<Db> Command<CreateTheatreHall> for Service<Db>
where
    Db: Database<Insert<TheatreHall>, Err = Traced<database::Error>>,
{
    type Ok = TheatreHall;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateTheatreHall,
    ) -> Result<Self::Ok, Self::Err> {
        let CreateTheatreHall { name, geometry } = cmd;

        let hall = TheatreHall {
            id: theatre_hall::Id::new(),
            name,
            geometry,
        };
        self.database()
            .execute(Insert(hall.clone()))
            .await
            .map_err(tracerr::wrap!())
            .map(drop)?;

        log::info!(
            theatre_hall_id = %hall.id,
            %geometry,
            "theatre hall created",
        );

        Ok(hall)
    }
}

/// Error of [`CreateTheatreHall`] [`Command`] execution.
pub type ExecutionError = database::Error;

#[cfg(test)]
mod spec {
    use crate::{
        domain::theatre_hall::Geometry, fixture, query, Command as _,
        Query as _,
    };

    use super::CreateTheatreHall;

    #[tokio::test]
    async fn creates_hall() {
        let svc = fixture::service();

        let hall = svc
            .execute(CreateTheatreHall {
                name: "Main Stage".parse().unwrap(),
                geometry: Geometry::new(12, 20).unwrap(),
            })
            .await
            .unwrap();

        let stored = svc
            .execute(query::theatre_hall::ById::by(hall.id))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.geometry.capacity(), 240);
    }

    #[tokio::test]
    async fn allows_same_name_twice() {
        let svc = fixture::service();
        let cmd = CreateTheatreHall {
            name: "Main Stage".parse().unwrap(),
            geometry: Geometry::new(1, 1).unwrap(),
        };
        let _ = svc.execute(cmd.clone()).await.unwrap();

        let _ = svc.execute(cmd).await.unwrap();

        let halls = svc
            .execute(query::theatre_halls::List::by(()))
            .await
            .unwrap();
        assert_eq!(halls.len(), 2);
        assert_eq!(halls[0].name, halls[1].name);
    }
}
