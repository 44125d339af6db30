//! [`TheatreHall`]-related definitions.

use std::future;

use derive_more::{AsRef, Display, From, Into};
use futures::TryFutureExt as _;
use juniper::{graphql_object, GraphQLScalar};
use service::{domain, query, Query as _};
use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::{api, api::scalar, AsError, Context, Error};

/// A hall where performances are shown.
#[derive(Clone, Debug)]
pub struct TheatreHall {
    /// ID of this [`TheatreHall`].
    id: Id,

    /// Underlying [`domain::TheatreHall`].
    hall: OnceCell<domain::TheatreHall>,
}

impl From<domain::TheatreHall> for TheatreHall {
    fn from(hall: domain::TheatreHall) -> Self {
        Self {
            id: hall.id.into(),
            hall: OnceCell::new_with(Some(hall)),
        }
    }
}

impl TheatreHall {
    /// Creates a new [`TheatreHall`] with the provided ID.
    ///
    /// # Safety
    ///
    /// Caller must ensure that [`TheatreHall`] with the provided ID exists,
    /// otherwise accessing this [`TheatreHall`] will result with an error.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(id: impl Into<Id>) -> Self {
        Self {
            id: id.into(),
            hall: OnceCell::new(),
        }
    }

    /// Returns the underlying [`domain::TheatreHall`].
    ///
    /// # Errors
    ///
    /// Errors if the [`domain::TheatreHall`] doesn't exist.
    async fn hall(
        &self,
        ctx: &Context,
    ) -> Result<&domain::TheatreHall, Error> {
        let id = self.id.into();
        self.hall
            .get_or_try_init(|| {
                ctx.service()
                    .execute(query::theatre_hall::ById::by(id))
                    .map_err(AsError::into_error)
                    .map_err(ctx.error())
                    .and_then(|h| {
                        future::ready(h.ok_or_else(|| {
                            api::query::TheatreHallError::NotExists.into()
                        }))
                    })
            })
            .await
    }
}

/// A hall where performances are shown.
///
/// Seats are arranged in a rectangle: rows are numbered from 1 to `rows` and
/// seats in every row from 1 to `seatsInRow`.
#[graphql_object(context = Context)]
impl TheatreHall {
    /// Unique identifier of this `TheatreHall`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "TheatreHall.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.id
    }

    /// Unique name of this `TheatreHall`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "TheatreHall.name",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn name(&self, ctx: &Context) -> Result<Name, Error> {
        Ok(self.hall(ctx).await?.name.clone().into())
    }

    /// Number of rows in this `TheatreHall`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "TheatreHall.rows",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn rows(&self, ctx: &Context) -> Result<i32, Error> {
        Ok(self.hall(ctx).await?.geometry.rows.get().into())
    }

    /// Number of seats in every row of this `TheatreHall`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "TheatreHall.seatsInRow",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn seats_in_row(&self, ctx: &Context) -> Result<i32, Error> {
        Ok(self.hall(ctx).await?.geometry.seats_in_row.get().into())
    }

    /// Total number of seats in this `TheatreHall`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "TheatreHall.capacity",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn capacity(&self, ctx: &Context) -> Result<i32, Error> {
        let capacity = self.hall(ctx).await?.geometry.capacity();
        i32::try_from(capacity)
            .map_err(AsError::into_error)
            .map_err(ctx.error())
    }
}

/// Unique identifier of a `TheatreHall`.
#[derive(Clone, Copy, Debug, Display, Into, From, GraphQLScalar)]
#[from(domain::theatre_hall::Id)]
#[into(domain::theatre_hall::Id)]
#[graphql(name = "TheatreHallId", transparent)]
pub struct Id(Uuid);

/// Name of a `TheatreHall`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "TheatreHallName",
    with = scalar::Via::<domain::theatre_hall::Name>,
)]
pub struct Name(domain::theatre_hall::Name);
