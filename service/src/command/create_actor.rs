//! [`Command`] for creating a new [`Actor`].

use common::operations::Insert;
use tracerr::Traced;

use crate::{
    domain::{actor, Actor},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Actor`].
#[derive(Clone, Debug)]
pub struct CreateActor {
    /// [`actor::FirstName`] of a new [`Actor`].
    pub first_name: actor::FirstName,

    /// [`actor::LastName`] of a new [`Actor`].
    pub last_name: actor::LastName,
}

impl<Db> Command<CreateActor> for Service<Db>
where
    Db: Database<Insert<Actor>, Err = Traced<database::Error>>,
{
    type Ok = Actor;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateActor) -> Result<Self::Ok, Self::Err> {
        let CreateActor {
            first_name,
            last_name,
        } = cmd;

        let actor = Actor {
            id: actor::Id::new(),
            first_name,
            last_name,
        };
        self.database()
            .execute(Insert(actor.clone()))
            .await
            .map_err(tracerr::wrap!())
            .map(drop)?;

        Ok(actor)
    }
}

/// Error of [`CreateActor`] [`Command`] execution.
pub type ExecutionError = database::Error;

#[cfg(test)]
mod spec {
    use crate::{fixture, query, Command as _, Query as _};

    use super::CreateActor;

    #[tokio::test]
    async fn creates_actor() {
        let svc = fixture::service();

        let actor = svc
            .execute(CreateActor {
                first_name: "Laurence".parse().unwrap(),
                last_name: "Olivier".parse().unwrap(),
            })
            .await
            .unwrap();

        let stored = svc
            .execute(query::actor::ById::by(actor.id))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.full_name(), "Laurence Olivier");
        let all = svc.execute(query::actors::List::by(())).await.unwrap();
        assert_eq!(all.len(), 1);
    }
}
