//! [`Command`] for creating a new [`Play`].

use std::collections::{HashMap, HashSet};

use common::operations::{By, Commit, Insert, Select, Transact, Transacted};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{actor, genre, play, Actor, Genre, Play},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Play`].
#[derive(Clone, Debug)]
pub struct CreatePlay {
    /// [`play::Title`] of a new [`Play`].
    pub title: play::Title,

    /// [`play::Description`] of a new [`Play`].
    pub description: play::Description,

    /// IDs of the existing [`Actor`]s performing in a new [`Play`].
    pub actors: Vec<actor::Id>,

    /// IDs of the existing [`Genre`]s of a new [`Play`].
    pub genres: Vec<genre::Id>,
}

impl<Db> Command<CreatePlay> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<HashMap<actor::Id, Actor>, Vec<actor::Id>>>,
            Ok = HashMap<actor::Id, Actor>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<HashMap<genre::Id, Genre>, Vec<genre::Id>>>,
            Ok = HashMap<genre::Id, Genre>,
            Err = Traced<database::Error>,
        > + Database<Insert<Play>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Play;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreatePlay) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreatePlay {
            title,
            description,
            mut actors,
            mut genres,
        } = cmd;
        let mut seen = HashSet::new();
        actors.retain(|id| seen.insert(*id));
        let mut seen = HashSet::new();
        genres.retain(|id| seen.insert(*id));

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let existing = tx
            .execute(Select(By::<HashMap<_, Actor>, _>::new(actors.clone())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if let Some(id) = actors.iter().find(|id| !existing.contains_key(id)) {
            return Err(tracerr::new!(E::ActorNotExists(*id)));
        }

        let existing = tx
            .execute(Select(By::<HashMap<_, Genre>, _>::new(genres.clone())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if let Some(id) = genres.iter().find(|id| !existing.contains_key(id)) {
            return Err(tracerr::new!(E::GenreNotExists(*id)));
        }

        let play = Play {
            id: play::Id::new(),
            title,
            description,
            actors,
            genres,
        };
        tx.execute(Insert(play.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(play)
    }
}

/// Error of [`CreatePlay`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Actor`] with the provided ID does not exist.
    #[display("`Actor(id: {_0})` does not exist")]
    ActorNotExists(#[error(not(source))] actor::Id),

    /// [`Genre`] with the provided ID does not exist.
    #[display("`Genre(id: {_0})` does not exist")]
    GenreNotExists(#[error(not(source))] genre::Id),
}

#[cfg(test)]
mod spec {
    use crate::{
        command::{CreateActor, CreateGenre},
        domain::{actor, Actor, Genre},
        fixture, query, read, Command as _, Query as _,
    };

    use super::{CreatePlay, ExecutionError};

    async fn actor(svc: &fixture::Service, last_name: &str) -> Actor {
        svc.execute(CreateActor {
            first_name: "John".parse().unwrap(),
            last_name: last_name.parse().unwrap(),
        })
        .await
        .unwrap()
    }

    async fn genre(svc: &fixture::Service, name: &str) -> Genre {
        svc.execute(CreateGenre {
            name: name.parse().unwrap(),
        })
        .await
        .unwrap()
    }

    fn play(title: &str) -> CreatePlay {
        CreatePlay {
            title: title.parse().unwrap(),
            description: "".parse().unwrap(),
            actors: vec![],
            genres: vec![],
        }
    }

    #[tokio::test]
    async fn creates_play_with_relations() {
        let svc = fixture::service();
        let gielgud = actor(&svc, "Gielgud").await;
        let drama = genre(&svc, "Drama").await;

        let play = svc
            .execute(CreatePlay {
                actors: vec![gielgud.id, gielgud.id],
                genres: vec![drama.id],
                ..play("Hamlet")
            })
            .await
            .unwrap();

        let stored = svc
            .execute(query::play::ById::by(play.id))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.actors, [gielgud.id]);
        assert_eq!(stored.genres, [drama.id]);
    }

    #[tokio::test]
    async fn rejects_unknown_actor() {
        let svc = fixture::service();
        let missing = actor::Id::new();

        let err = svc
            .execute(CreatePlay {
                actors: vec![missing],
                ..play("Hamlet")
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::ActorNotExists(id) if *id == missing,
        ));
        let all = read::play::list::Filter::default();
        let plays = svc
            .execute(query::plays::List::by(all))
            .await
            .unwrap();
        assert!(plays.is_empty());
    }

    #[tokio::test]
    async fn filters_plays() {
        let svc = fixture::service();
        let gielgud = actor(&svc, "Gielgud").await;
        let olivier = actor(&svc, "Olivier").await;
        let drama = genre(&svc, "Drama").await;
        let comedy = genre(&svc, "Comedy").await;
        for (title, actors, genres) in [
            ("Hamlet", vec![gielgud.id, olivier.id], vec![drama.id]),
            ("Macbeth", vec![olivier.id], vec![drama.id]),
            ("Twelfth Night", vec![gielgud.id], vec![comedy.id]),
        ] {
            let _ = svc
                .execute(CreatePlay {
                    actors,
                    genres,
                    ..play(title)
                })
                .await
                .unwrap();
        }
        let titles = |filter| {
            let svc = &svc;
            async move {
                svc.execute(query::plays::List::by(filter))
                    .await
                    .unwrap()
                    .into_iter()
                    .map(|p| p.title.to_string())
                    .collect::<Vec<_>>()
            }
        };

        assert_eq!(
            titles(read::play::list::Filter {
                title: Some("ET".into()),
                ..Default::default()
            })
            .await,
            ["Hamlet", "Macbeth"],
        );
        assert_eq!(
            titles(read::play::list::Filter {
                actors: vec![gielgud.id, olivier.id],
                ..Default::default()
            })
            .await,
            ["Hamlet", "Macbeth", "Twelfth Night"],
        );
        assert_eq!(
            titles(read::play::list::Filter {
                actors: vec![gielgud.id],
                genres: vec![drama.id],
                ..Default::default()
            })
            .await,
            ["Hamlet"],
        );
    }
}
