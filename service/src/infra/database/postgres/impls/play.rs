//! [`Play`]-related [`Database`] implementations.

use std::collections::HashMap;

use common::operations::{By, Delete, Insert, Select};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{play, Play},
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

/// Reads a [`Play`] out of the provided [`Row`].
fn play(row: &Row) -> Play {
    Play {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        actors: row.get("actors"),
        genres: row.get("genres"),
    }
}

impl<C> Database<Insert<Play>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(play): Insert<Play>,
    ) -> Result<Self::Ok, Self::Err> {
        const PLAY_SQL: &str = "\
            INSERT INTO plays (id, title, description) \
            VALUES ($1::UUID, $2::VARCHAR, $3::TEXT)";
        self.exec(PLAY_SQL, &[&play.id, &play.title, &play.description])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)?;

        if !play.actors.is_empty() {
            const ACTORS_SQL: &str = "\
                INSERT INTO play_actors (play_id, actor_id) \
                SELECT $1::UUID, unnest($2::UUID[])";
            self.exec(ACTORS_SQL, &[&play.id, &play.actors])
                .await
                .map_err(tracerr::wrap!())
                .map(drop)?;
        }

        if !play.genres.is_empty() {
            const GENRES_SQL: &str = "\
                INSERT INTO play_genres (play_id, genre_id) \
                SELECT $1::UUID, unnest($2::UUID[])";
            self.exec(GENRES_SQL, &[&play.id, &play.genres])
                .await
                .map_err(tracerr::wrap!())
                .map(drop)?;
        }

        Ok(())
    }
}

impl<C, IDs> Database<Select<By<HashMap<play::Id, Play>, IDs>>>
    for Postgres<C>
where
    C: Connection,
    IDs: AsRef<[play::Id]>,
{
    type Ok = HashMap<play::Id, Play>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<HashMap<play::Id, Play>, IDs>>,
    ) -> Result<Self::Ok, Self::Err> {
        let ids = by.into_inner();
        // Avoid subtle change for SQL.
        let ids: &[play::Id] = ids.as_ref();
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        const SQL: &str = "\
            SELECT p.id, p.title, p.description, \
                   ARRAY(SELECT actor_id \
                         FROM play_actors \
                         WHERE play_id = p.id) AS actors, \
                   ARRAY(SELECT genre_id \
                         FROM play_genres \
                         WHERE play_id = p.id) AS genres \
            FROM plays p \
            WHERE p.id = ANY($1::UUID[])";
        Ok(self
            .query(SQL, &[&ids])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(play)
            .map(|p| (p.id, p))
            .collect())
    }
}

impl<C> Database<Select<By<Option<Play>, play::Id>>> for Postgres<C>
where
    C: Connection,
    Self: Database<
        Select<By<HashMap<play::Id, Play>, [play::Id; 1]>>,
        Ok = HashMap<play::Id, Play>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Option<Play>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Play>, play::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self
            .execute(Select(By::new([id])))
            .await
            .map_err(tracerr::wrap!())?
            .remove(&id))
    }
}

impl<C> Database<Select<By<Vec<Play>, read::play::list::Filter>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Play>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Play>, read::play::list::Filter>>,
    ) -> Result<Self::Ok, Self::Err> {
        let read::play::list::Filter {
            title,
            actors,
            genres,
        } = by.into_inner();
        let title = title.as_deref().map(ContainsPattern::new);

        const SQL: &str = "\
            SELECT p.id, p.title, p.description, \
                   ARRAY(SELECT actor_id \
                         FROM play_actors \
                         WHERE play_id = p.id) AS actors, \
                   ARRAY(SELECT genre_id \
                         FROM play_genres \
                         WHERE play_id = p.id) AS genres \
            FROM plays p \
            WHERE ($1::VARCHAR IS NULL OR p.title ILIKE $1::VARCHAR) \
              AND (cardinality($2::UUID[]) = 0 \
                   OR EXISTS (SELECT 1 \
                              FROM play_actors \
                              WHERE play_id = p.id \
                                AND actor_id = ANY($2::UUID[]))) \
              AND (cardinality($3::UUID[]) = 0 \
                   OR EXISTS (SELECT 1 \
                              FROM play_genres \
                              WHERE play_id = p.id \
                                AND genre_id = ANY($3::UUID[]))) \
            ORDER BY p.title, p.id";
        Ok(self
            .query(SQL, &[&title, &actors, &genres])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(play)
            .collect())
    }
}

impl<C> Database<Delete<By<Play, play::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Play, play::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id: play::Id = by.into_inner();

        const SQL: &str = "\
            DELETE FROM plays \
            WHERE id = $1::UUID";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}
