//! [`Performance`]-related [`Database`] implementations.

use common::operations::{By, Delete, Insert, Lock, Select, Update};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{performance, Performance, Seat},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read,
};

use super::theatre_hall::geometry;

/// Reads a [`Performance`] out of the provided [`Row`].
fn performance(row: &Row) -> Performance {
    Performance {
        id: row.get("id"),
        play_id: row.get("play_id"),
        theatre_hall_id: row.get("theatre_hall_id"),
        show_time: row.get("show_time"),
    }
}

/// Reads the `tickets_available` column out of the provided [`Row`].
fn tickets_available(row: &Row) -> read::performance::AvailableCount {
    let available = row.get::<_, i64>("tickets_available");
    u32::try_from(available).unwrap_or_default().into()
}

impl<C> Database<Insert<Performance>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(p): Insert<Performance>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            INSERT INTO performances (id, play_id, theatre_hall_id, \
                                      show_time) \
            VALUES ($1::UUID, $2::UUID, $3::UUID, $4::TIMESTAMPTZ)";
        self.exec(SQL, &[&p.id, &p.play_id, &p.theatre_hall_id, &p.show_time])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Update<Performance>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(p): Update<Performance>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            UPDATE performances \
            SET play_id = $2::UUID, \
                theatre_hall_id = $3::UUID, \
                show_time = $4::TIMESTAMPTZ \
            WHERE id = $1::UUID";
        self.exec(SQL, &[&p.id, &p.play_id, &p.theatre_hall_id, &p.show_time])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Select<By<Option<Performance>, performance::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Performance>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Performance>, performance::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id: performance::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id, play_id, theatre_hall_id, show_time \
            FROM performances \
            WHERE id = $1::UUID";
        Ok(self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .as_ref()
            .map(performance))
    }
}

impl<C> Database<Lock<By<Performance, performance::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<Performance, performance::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id: performance::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id \
            FROM performances \
            WHERE id = $1::UUID \
            FOR UPDATE";
        self.query(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Delete<By<Performance, performance::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Performance, performance::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id: performance::Id = by.into_inner();

        const SQL: &str = "\
            DELETE FROM performances \
            WHERE id = $1::UUID";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Select<By<Option<read::Seating>, performance::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<read::Seating>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<read::Seating>, performance::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id: performance::Id = by.into_inner();

        // Share locks prevent rescheduling the performance and resizing the
        // hall until the current transaction ends.
        const SQL: &str = "\
            SELECT p.id, p.theatre_hall_id, h.rows, h.seats_in_row \
            FROM performances p \
            JOIN theatre_halls h ON h.id = p.theatre_hall_id \
            WHERE p.id = $1::UUID \
            FOR SHARE OF p, h";
        Ok(self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| read::Seating {
                performance_id: row.get("id"),
                theatre_hall_id: row.get("theatre_hall_id"),
                geometry: geometry(&row),
            }))
    }
}

impl<C>
    Database<
        Select<By<Option<read::performance::AvailableCount>, performance::Id>>,
    > for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<read::performance::AvailableCount>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<Option<read::performance::AvailableCount>, performance::Id>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let id: performance::Id = by.into_inner();

        const SQL: &str = "\
            SELECT GREATEST(h.rows::INT8 * h.seats_in_row \
                            - (SELECT COUNT(*) \
                               FROM tickets t \
                               WHERE t.performance_id = p.id), \
                            0) AS tickets_available \
            FROM performances p \
            JOIN theatre_halls h ON h.id = p.theatre_hall_id \
            WHERE p.id = $1::UUID";
        Ok(self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .as_ref()
            .map(tickets_available))
    }
}

impl<C> Database<Select<By<read::performance::TakenSeats, performance::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = read::performance::TakenSeats;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<read::performance::TakenSeats, performance::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id: performance::Id = by.into_inner();

        const SQL: &str = "\
            SELECT \"row\", seat \
            FROM tickets \
            WHERE performance_id = $1::UUID \
            ORDER BY \"row\", seat";
        Ok(self
            .query(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| Seat {
                row: row.get("row"),
                number: row.get("seat"),
            })
            .collect())
    }
}

impl<C> Database<Select<By<read::performance::HasTickets, performance::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = read::performance::HasTickets;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<read::performance::HasTickets, performance::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id: performance::Id = by.into_inner();

        const SQL: &str = "\
            SELECT EXISTS (SELECT 1 \
                           FROM tickets \
                           WHERE performance_id = $1::UUID)";
        self.query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| {
                read::performance::HasTickets(
                    row.expect("always exists").get(0),
                )
            })
    }
}

impl<C>
    Database<
        Select<
            By<
                Vec<read::performance::list::Item>,
                read::performance::list::Filter,
            >,
        >,
    > for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<read::performance::list::Item>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<
                Vec<read::performance::list::Item>,
                read::performance::list::Filter,
            >,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let read::performance::list::Filter { date, play_id } =
            by.into_inner();
        let since: Option<performance::ShowTime> = date.map(|d| d.start());
        let until: Option<performance::ShowTime> = date.map(|d| d.end());

        const SQL: &str = "\
            SELECT p.id, p.show_time, \
                   pl.title AS play_title, \
                   h.name AS theatre_hall_name, \
                   GREATEST(h.rows::INT8 * h.seats_in_row \
                            - (SELECT COUNT(*) \
                               FROM tickets t \
                               WHERE t.performance_id = p.id), \
                            0) AS tickets_available \
            FROM performances p \
            JOIN plays pl ON pl.id = p.play_id \
            JOIN theatre_halls h ON h.id = p.theatre_hall_id \
            WHERE ($1::UUID IS NULL OR p.play_id = $1::UUID) \
              AND ($2::TIMESTAMPTZ IS NULL OR p.show_time >= $2::TIMESTAMPTZ) \
              AND ($3::TIMESTAMPTZ IS NULL OR p.show_time < $3::TIMESTAMPTZ) \
            ORDER BY p.show_time, p.id";
        Ok(self
            .query(SQL, &[&play_id, &since, &until])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(|row| read::performance::list::Item {
                id: row.get("id"),
                play_title: row.get("play_title"),
                theatre_hall_name: row.get("theatre_hall_name"),
                show_time: row.get("show_time"),
                tickets_available: tickets_available(row),
            })
            .collect())
    }
}
