//! [`TheatreHall`]-related [`Database`] implementations.

use std::collections::HashMap;

use common::operations::{By, Delete, Insert, Lock, Select, Update};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{theatre_hall, TheatreHall},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read,
};

/// Reads a [`theatre_hall::Geometry`] out of the provided [`Row`].
pub(super) fn geometry(row: &Row) -> theatre_hall::Geometry {
    theatre_hall::Geometry::new(row.get("rows"), row.get("seats_in_row"))
        .expect("`theatre_halls_geometry_check` constraint")
}

/// Reads a [`TheatreHall`] out of the provided [`Row`].
fn theatre_hall(row: &Row) -> TheatreHall {
    TheatreHall {
        id: row.get("id"),
        name: row.get("name"),
        geometry: geometry(row),
    }
}

/// Returns the raw `(rows, seats_in_row)` of the provided [`TheatreHall`].
fn dimensions(hall: &TheatreHall) -> (i32, i32) {
    (
        i32::from(hall.geometry.rows.get()),
        i32::from(hall.geometry.seats_in_row.get()),
    )
}

impl<C> Database<Insert<TheatreHall>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(hall): Insert<TheatreHall>,
    ) -> Result<Self::Ok, Self::Err> {
        let (rows, seats_in_row) = dimensions(&hall);

        const SQL: &str = "\
            INSERT INTO theatre_halls (id, name, rows, seats_in_row) \
            VALUES ($1::UUID, $2::VARCHAR, $3::INT4, $4::INT4)";
        self.exec(SQL, &[&hall.id, &hall.name, &rows, &seats_in_row])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Update<TheatreHall>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(hall): Update<TheatreHall>,
    ) -> Result<Self::Ok, Self::Err> {
        let (rows, seats_in_row) = dimensions(&hall);

        const SQL: &str = "\
            UPDATE theatre_halls \
            SET name = $2::VARCHAR, \
                rows = $3::INT4, \
                seats_in_row = $4::INT4 \
            WHERE id = $1::UUID";
        self.exec(SQL, &[&hall.id, &hall.name, &rows, &seats_in_row])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C, IDs> Database<Select<By<HashMap<theatre_hall::Id, TheatreHall>, IDs>>>
    for Postgres<C>
where
    C: Connection,
    IDs: AsRef<[theatre_hall::Id]>,
{
    type Ok = HashMap<theatre_hall::Id, TheatreHall>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<HashMap<theatre_hall::Id, TheatreHall>, IDs>>,
    ) -> Result<Self::Ok, Self::Err> {
        let ids = by.into_inner();
        // Avoid subtle change for SQL.
        let ids: &[theatre_hall::Id] = ids.as_ref();
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        const SQL: &str = "\
            SELECT id, name, rows, seats_in_row \
            FROM theatre_halls \
            WHERE id = ANY($1::UUID[])";
        Ok(self
            .query(SQL, &[&ids])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(theatre_hall)
            .map(|h| (h.id, h))
            .collect())
    }
}

impl<C> Database<Select<By<Option<TheatreHall>, theatre_hall::Id>>>
    for Postgres<C>
where
    C: Connection,
    Self: Database<
        Select<
            By<HashMap<theatre_hall::Id, TheatreHall>, [theatre_hall::Id; 1]>,
        >,
        Ok = HashMap<theatre_hall::Id, TheatreHall>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Option<TheatreHall>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<TheatreHall>, theatre_hall::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self
            .execute(Select(By::new([id])))
            .await
            .map_err(tracerr::wrap!())?
            .remove(&id))
    }
}

impl<C> Database<Select<By<Vec<TheatreHall>, ()>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<TheatreHall>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<TheatreHall>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT id, name, rows, seats_in_row \
            FROM theatre_halls \
            ORDER BY name, id";
        Ok(self
            .query(SQL, &[])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(theatre_hall)
            .collect())
    }
}

impl<C> Database<Lock<By<TheatreHall, theatre_hall::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<TheatreHall, theatre_hall::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id: theatre_hall::Id = by.into_inner();

        // Waits for the transactions selling tickets in this hall, as they
        // hold a share lock on it.
        const SQL: &str = "\
            SELECT id \
            FROM theatre_halls \
            WHERE id = $1::UUID \
            FOR UPDATE";
        self.query(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C>
    Database<Select<By<read::theatre_hall::HasSoldTickets, theatre_hall::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = read::theatre_hall::HasSoldTickets;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<read::theatre_hall::HasSoldTickets, theatre_hall::Id>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let id: theatre_hall::Id = by.into_inner();

        const SQL: &str = "\
            SELECT EXISTS (SELECT 1 \
                           FROM tickets t \
                           JOIN performances p ON p.id = t.performance_id \
                           WHERE p.theatre_hall_id = $1::UUID)";
        self.query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| {
                read::theatre_hall::HasSoldTickets(
                    row.expect("always exists").get(0),
                )
            })
    }
}

impl<C> Database<Delete<By<TheatreHall, theatre_hall::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<TheatreHall, theatre_hall::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id: theatre_hall::Id = by.into_inner();

        const SQL: &str = "\
            DELETE FROM theatre_halls \
            WHERE id = $1::UUID";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}
