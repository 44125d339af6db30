//! [`Command`] for creating a new [`Genre`].

use common::operations::Insert;
use tracerr::Traced;

use crate::{
    domain::{genre, Genre},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Genre`].
#[derive(Clone, Debug)]
pub struct CreateGenre {
    /// [`genre::Name`] of a new [`Genre`].
    pub name: genre::Name,
}

impl<Db> Command<CreateGenre> for Service<Db>
where
    Db: Database<Insert<Genre>, Err = Traced<database::Error>>,
{
    type Ok = Genre;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateGenre) -> Result<Self::Ok, Self::Err> {
        let CreateGenre { name } = cmd;

        let genre = Genre {
            id: genre::Id::new(),
            name,
        };
        self.database()
            .execute(Insert(genre.clone()))
            .await
            .map_err(tracerr::wrap!())
            .map(drop)?;

        Ok(genre)
    }
}

/// Error of [`CreateGenre`] [`Command`] execution.
pub type ExecutionError = database::Error;

#[cfg(test)]
mod spec {
    use crate::{fixture, query, read, Command as _, Query as _};

    use super::CreateGenre;

    #[tokio::test]
    async fn allows_same_name_twice() {
        let svc = fixture::service();
        let cmd = CreateGenre {
            name: "Tragedy".parse().unwrap(),
        };

        let first = svc.execute(cmd.clone()).await.unwrap();
        let second = svc.execute(cmd).await.unwrap();

        assert_ne!(first.id, second.id);
        let stored = svc
            .execute(query::genre::ById::by(second.id))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.name, first.name);
        let all = svc
            .execute(query::genres::List::by(
                read::genre::list::Filter::default(),
            ))
            .await
            .unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn lists_genres_by_name_part() {
        let svc = fixture::service();
        for name in ["Comedy", "Tragicomedy", "Drama"] {
            let _ = svc
                .execute(CreateGenre {
                    name: name.parse().unwrap(),
                })
                .await
                .unwrap();
        }

        let found = svc
            .execute(query::genres::List::by(read::genre::list::Filter {
                name: Some("COMEDY".into()),
            }))
            .await
            .unwrap();

        assert_eq!(
            found.iter().map(|g| g.name.to_string()).collect::<Vec<_>>(),
            ["Comedy", "Tragicomedy"],
        );
    }
}
