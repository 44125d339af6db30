//! [`Genre`]-related definitions.

use derive_more::{AsRef, Display, From, Into};
use juniper::{graphql_object, GraphQLScalar};
use service::domain;
use uuid::Uuid;

use crate::{api, api::scalar, Context};

/// A genre of plays.
#[derive(Clone, Debug, From)]
pub struct Genre(domain::Genre);

/// A genre of plays.
#[graphql_object(context = Context)]
impl Genre {
    /// Unique identifier of this `Genre`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Genre.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// Unique name of this `Genre`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Genre.name",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn name(&self) -> Name {
        self.0.name.clone().into()
    }
}

/// Unique identifier of a `Genre`.
#[derive(Clone, Copy, Debug, Display, Into, From, GraphQLScalar)]
#[from(domain::genre::Id)]
#[into(domain::genre::Id)]
#[graphql(name = "GenreId", transparent)]
pub struct Id(Uuid);

/// Name of a `Genre`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "GenreName", with = scalar::Via::<domain::genre::Name>)]
pub struct Name(domain::genre::Name);
