//! [`Ticket`]-related [`Database`] implementations.

use common::operations::{By, Insert, Select};
use tracerr::Traced;

use crate::{
    domain::{performance, reservation, Seat, Ticket},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read,
};

impl<C> Database<Insert<Ticket>> for Postgres<C>
where
    C: Connection,
{
    type Ok = read::ticket::IsInserted;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(ticket): Insert<Ticket>,
    ) -> Result<Self::Ok, Self::Err> {
        // Concurrent inserts of the same seat are serialized by the unique
        // index, and all but the first one affect no rows.
        const SQL: &str = "\
            INSERT INTO tickets (id, \"row\", seat, \
                                 performance_id, reservation_id) \
            VALUES ($1::UUID, $2::INT4, $3::INT4, $4::UUID, $5::UUID) \
            ON CONFLICT (performance_id, \"row\", seat) DO NOTHING";
        self.exec(
            SQL,
            &[
                &ticket.id,
                &ticket.seat.row,
                &ticket.seat.number,
                &ticket.performance_id,
                &ticket.reservation_id,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(|affected| read::ticket::IsInserted(affected == 1))
    }
}

impl<C> Database<Select<By<read::ticket::IsTaken, (performance::Id, Seat)>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = read::ticket::IsTaken;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<read::ticket::IsTaken, (performance::Id, Seat)>>,
    ) -> Result<Self::Ok, Self::Err> {
        let (performance_id, seat) = by.into_inner();

        const SQL: &str = "\
            SELECT EXISTS (SELECT 1 \
                           FROM tickets \
                           WHERE performance_id = $1::UUID \
                             AND \"row\" = $2::INT4 \
                             AND seat = $3::INT4)";
        self.query_opt(SQL, &[&performance_id, &seat.row, &seat.number])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| {
                read::ticket::IsTaken(row.expect("always exists").get(0))
            })
    }
}

impl<C> Database<Select<By<Vec<Ticket>, reservation::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Ticket>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Ticket>, reservation::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id: reservation::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id, \"row\", seat, performance_id, reservation_id \
            FROM tickets \
            WHERE reservation_id = $1::UUID \
            ORDER BY \"row\", seat";
        Ok(self
            .query(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| Ticket {
                id: row.get("id"),
                seat: Seat {
                    row: row.get("row"),
                    number: row.get("seat"),
                },
                performance_id: row.get("performance_id"),
                reservation_id: row.get("reservation_id"),
            })
            .collect())
    }
}
