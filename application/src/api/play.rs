//! [`Play`]-related definitions.

use std::future;

use derive_more::{AsRef, Display, From, Into};
use futures::TryFutureExt as _;
use juniper::{graphql_object, GraphQLScalar};
use service::{domain, query, Query as _};
use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::{api, api::scalar, AsError, Context, Error};

/// A play staged by the theatre.
#[derive(Clone, Debug)]
pub struct Play {
    /// ID of this [`Play`].
    id: Id,

    /// Underlying [`domain::Play`].
    play: OnceCell<domain::Play>,
}

impl From<domain::Play> for Play {
    fn from(play: domain::Play) -> Self {
        Self {
            id: play.id.into(),
            play: OnceCell::new_with(Some(play)),
        }
    }
}

impl Play {
    /// Creates a new [`Play`] with the provided ID.
    ///
    /// # Safety
    ///
    /// Caller must ensure that [`Play`] with the provided ID exists,
    /// otherwise accessing this [`Play`] will result with an error.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(id: impl Into<Id>) -> Self {
        Self {
            id: id.into(),
            play: OnceCell::new(),
        }
    }

    /// Returns the underlying [`domain::Play`].
    ///
    /// # Errors
    ///
    /// Errors if the [`domain::Play`] doesn't exist.
    async fn play(&self, ctx: &Context) -> Result<&domain::Play, Error> {
        let id = self.id.into();
        self.play
            .get_or_try_init(|| {
                ctx.service()
                    .execute(query::play::ById::by(id))
                    .map_err(AsError::into_error)
                    .map_err(ctx.error())
                    .and_then(|p| {
                        future::ready(p.ok_or_else(|| {
                            api::query::PlayError::NotExists.into()
                        }))
                    })
            })
            .await
    }
}

/// A play staged by the theatre.
#[graphql_object(context = Context)]
impl Play {
    /// Unique identifier of this `Play`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Play.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.id
    }

    /// Title of this `Play`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Play.title",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn title(&self, ctx: &Context) -> Result<Title, Error> {
        Ok(self.play(ctx).await?.title.clone().into())
    }

    /// Description of this `Play`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Play.description",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn description(
        &self,
        ctx: &Context,
    ) -> Result<Description, Error> {
        Ok(self.play(ctx).await?.description.clone().into())
    }

    /// `Actor`s performing in this `Play`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Play.actors",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn actors(
        &self,
        ctx: &Context,
    ) -> Result<Vec<api::Actor>, Error> {
        let ids = self.play(ctx).await?.actors.clone();
        let mut actors = ctx
            .service()
            .execute(query::actors::ByIds::by(ids.clone()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?;
        Ok(ids
            .iter()
            .filter_map(|id| actors.remove(id))
            .map(Into::into)
            .collect())
    }

    /// `Genre`s of this `Play`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Play.genres",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn genres(
        &self,
        ctx: &Context,
    ) -> Result<Vec<api::Genre>, Error> {
        let ids = self.play(ctx).await?.genres.clone();
        let mut genres = ctx
            .service()
            .execute(query::genres::ByIds::by(ids.clone()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?;
        Ok(ids
            .iter()
            .filter_map(|id| genres.remove(id))
            .map(Into::into)
            .collect())
    }
}

/// Unique identifier of a `Play`.
#[derive(Clone, Copy, Debug, Display, Into, From, GraphQLScalar)]
#[from(domain::play::Id)]
#[into(domain::play::Id)]
#[graphql(name = "PlayId", transparent)]
pub struct Id(Uuid);

/// Title of a `Play`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "PlayTitle", with = scalar::Via::<domain::play::Title>)]
pub struct Title(domain::play::Title);

/// Description of a `Play`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "PlayDescription",
    with = scalar::Via::<domain::play::Description>,
)]
pub struct Description(domain::play::Description);
