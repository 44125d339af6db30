//! [`Actor`]-related [`Database`] implementations.

use std::collections::HashMap;

use common::operations::{By, Insert, Select};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{actor, Actor},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

/// Reads an [`Actor`] out of the provided [`Row`].
fn actor(row: &Row) -> Actor {
    Actor {
        id: row.get("id"),
        first_name: row.get("first_name"),
        last_name: row.get("last_name"),
    }
}

impl<C> Database<Insert<Actor>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(actor): Insert<Actor>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            INSERT INTO actors (id, first_name, last_name) \
            VALUES ($1::UUID, $2::VARCHAR, $3::VARCHAR)";
        self.exec(SQL, &[&actor.id, &actor.first_name, &actor.last_name])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C, IDs> Database<Select<By<HashMap<actor::Id, Actor>, IDs>>>
    for Postgres<C>
where
    C: Connection,
    IDs: AsRef<[actor::Id]>,
{
    type Ok = HashMap<actor::Id, Actor>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<HashMap<actor::Id, Actor>, IDs>>,
    ) -> Result<Self::Ok, Self::Err> {
        let ids = by.into_inner();
        // Avoid subtle change for SQL.
        let ids: &[actor::Id] = ids.as_ref();
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        const SQL: &str = "\
            SELECT id, first_name, last_name \
            FROM actors \
            WHERE id = ANY($1::UUID[])";
        Ok(self
            .query(SQL, &[&ids])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(actor)
            .map(|a| (a.id, a))
            .collect())
    }
}

impl<C> Database<Select<By<Option<Actor>, actor::Id>>> for Postgres<C>
where
    C: Connection,
    Self: Database<
        Select<By<HashMap<actor::Id, Actor>, [actor::Id; 1]>>,
        Ok = HashMap<actor::Id, Actor>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Option<Actor>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Actor>, actor::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self
            .execute(Select(By::new([id])))
            .await
            .map_err(tracerr::wrap!())?
            .remove(&id))
    }
}

impl<C> Database<Select<By<Vec<Actor>, ()>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Actor>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<Actor>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT id, first_name, last_name \
            FROM actors \
            ORDER BY last_name, first_name, id";
        Ok(self
            .query(SQL, &[])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(actor)
            .collect())
    }
}
