//! [`Reservation`]-related [`Database`] implementations.

use common::operations::{By, Delete, Insert, Select};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{reservation, user, Reservation},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read,
};

/// Reads a [`Reservation`] out of the provided [`Row`].
fn reservation(row: &Row) -> Reservation {
    Reservation {
        id: row.get("id"),
        user_id: row.get("user_id"),
        created_at: row.get("created_at"),
    }
}

impl<C> Database<Insert<Reservation>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(r): Insert<Reservation>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            INSERT INTO reservations (id, user_id, created_at) \
            VALUES ($1::UUID, $2::UUID, $3::TIMESTAMPTZ)";
        self.exec(SQL, &[&r.id, &r.user_id, &r.created_at])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Select<By<Option<Reservation>, reservation::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Reservation>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Reservation>, reservation::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id: reservation::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id, user_id, created_at \
            FROM reservations \
            WHERE id = $1::UUID";
        Ok(self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .as_ref()
            .map(reservation))
    }
}

impl<C> Database<Select<By<Vec<Reservation>, user::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Reservation>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Reservation>, user::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let user_id: user::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id, user_id, created_at \
            FROM reservations \
            WHERE user_id = $1::UUID \
            ORDER BY created_at DESC, id";
        Ok(self
            .query(SQL, &[&user_id])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(reservation)
            .collect())
    }
}

impl<C> Database<Select<By<read::reservation::TicketCount, reservation::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = read::reservation::TicketCount;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<read::reservation::TicketCount, reservation::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id: reservation::Id = by.into_inner();

        const SQL: &str = "\
            SELECT COUNT(*) \
            FROM tickets \
            WHERE reservation_id = $1::UUID";
        self.query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| {
                let count = row.expect("always exists").get::<_, i64>(0);
                u32::try_from(count).unwrap_or(u32::MAX).into()
            })
    }
}

impl<C> Database<Delete<By<Reservation, reservation::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Reservation, reservation::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id: reservation::Id = by.into_inner();

        const SQL: &str = "\
            DELETE FROM reservations \
            WHERE id = $1::UUID";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}
