//! [`Genre`]-related [`Database`] implementations.

use std::collections::HashMap;

use common::operations::{By, Insert, Select};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{genre, Genre},
    infra::{
        database::{
            self,
            postgres::{Connection, ContainsPattern},
            Postgres,
        },
        Database,
    },
    read,
};

/// Reads a [`Genre`] out of the provided [`Row`].
fn genre(row: &Row) -> Genre {
    Genre {
        id: row.get("id"),
        name: row.get("name"),
    }
}

impl<C> Database<Insert<Genre>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(genre): Insert<Genre>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            INSERT INTO genres (id, name) \
            VALUES ($1::UUID, $2::VARCHAR)";
        self.exec(SQL, &[&genre.id, &genre.name])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C, IDs> Database<Select<By<HashMap<genre::Id, Genre>, IDs>>>
    for Postgres<C>
where
    C: Connection,
    IDs: AsRef<[genre::Id]>,
{
    type Ok = HashMap<genre::Id, Genre>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<HashMap<genre::Id, Genre>, IDs>>,
    ) -> Result<Self::Ok, Self::Err> {
        let ids = by.into_inner();
        // Avoid subtle change for SQL.
        let ids: &[genre::Id] = ids.as_ref();
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        const SQL: &str = "\
            SELECT id, name \
            FROM genres \
            WHERE id = ANY($1::UUID[])";
        Ok(self
            .query(SQL, &[&ids])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(genre)
            .map(|g| (g.id, g))
            .collect())
    }
}

impl<C> Database<Select<By<Option<Genre>, genre::Id>>> for Postgres<C>
where
    C: Connection,
    Self: Database<
        Select<By<HashMap<genre::Id, Genre>, [genre::Id; 1]>>,
        Ok = HashMap<genre::Id, Genre>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Option<Genre>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Genre>, genre::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self
            .execute(Select(By::new([id])))
            .await
            .map_err(tracerr::wrap!())?
            .remove(&id))
    }
}

impl<C> Database<Select<By<Vec<Genre>, read::genre::list::Filter>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Genre>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Genre>, read::genre::list::Filter>>,
    ) -> Result<Self::Ok, Self::Err> {
        let read::genre::list::Filter { name } = by.into_inner();
        let pattern = name.as_deref().map(ContainsPattern::new);

        const SQL: &str = "\
            SELECT id, name \
            FROM genres \
            WHERE $1::VARCHAR IS NULL OR name ILIKE $1::VARCHAR \
            ORDER BY name, id";
        Ok(self
            .query(SQL, &[&pattern])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(genre)
            .collect())
    }
}
