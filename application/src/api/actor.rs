//! [`Actor`]-related definitions.

use derive_more::{AsRef, Display, From, Into};
use juniper::{graphql_object, GraphQLScalar};
use service::domain;
use uuid::Uuid;

use crate::{api, api::scalar, Context};

/// An actor performing in plays.
#[derive(Clone, Debug, From)]
pub struct Actor(domain::Actor);

/// An actor performing in plays.
#[graphql_object(context = Context)]
impl Actor {
    /// Unique identifier of this `Actor`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Actor.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// First name of this `Actor`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Actor.firstName",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn first_name(&self) -> FirstName {
        self.0.first_name.clone().into()
    }

    /// Last name of this `Actor`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Actor.lastName",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn last_name(&self) -> LastName {
        self.0.last_name.clone().into()
    }

    /// First and last names of this `Actor` joined with a space.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Actor.fullName",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn full_name(&self) -> String {
        self.0.full_name()
    }
}

/// Unique identifier of an `Actor`.
#[derive(Clone, Copy, Debug, Display, Into, From, GraphQLScalar)]
#[from(domain::actor::Id)]
#[into(domain::actor::Id)]
#[graphql(name = "ActorId", transparent)]
pub struct Id(Uuid);

/// First name of an `Actor`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "ActorFirstName",
    with = scalar::Via::<domain::actor::FirstName>,
)]
pub struct FirstName(domain::actor::FirstName);

/// Last name of an `Actor`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "ActorLastName",
    with = scalar::Via::<domain::actor::LastName>,
)]
pub struct LastName(domain::actor::LastName);
