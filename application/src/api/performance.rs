//! [`Performance`]-related definitions.

use std::future;

use common::DateTime;
use derive_more::{Display, From, Into};
use futures::TryFutureExt as _;
use juniper::{graphql_object, GraphQLScalar};
use service::{domain, query, Query as _};
use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::{api, AsError, Context, Error};

/// A scheduled showing of a `Play` in a `TheatreHall`.
#[derive(Clone, Debug)]
pub struct Performance {
    /// ID of this [`Performance`].
    id: Id,

    /// Underlying [`domain::Performance`].
    performance: OnceCell<domain::Performance>,
}

impl From<domain::Performance> for Performance {
    fn from(performance: domain::Performance) -> Self {
        Self {
            id: performance.id.into(),
            performance: OnceCell::new_with(Some(performance)),
        }
    }
}

impl Performance {
    /// Creates a new [`Performance`] with the provided ID.
    ///
    /// # Safety
    ///
    /// Caller must ensure that [`Performance`] with the provided ID exists,
    /// otherwise accessing this [`Performance`] will result with an error.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(id: impl Into<Id>) -> Self {
        Self {
            id: id.into(),
            performance: OnceCell::new(),
        }
    }

    /// Returns the underlying [`domain::Performance`].
    ///
    /// # Errors
    ///
    /// Errors if the [`domain::Performance`] doesn't exist.
    async fn performance(
        &self,
        ctx: &Context,
    ) -> Result<&domain::Performance, Error> {
        let id = self.id.into();
        self.performance
            .get_or_try_init(|| {
                ctx.service()
                    .execute(query::performance::ById::by(id))
                    .map_err(AsError::into_error)
                    .map_err(ctx.error())
                    .and_then(|p| {
                        future::ready(p.ok_or_else(|| {
                            api::query::PerformanceError::NotExists.into()
                        }))
                    })
            })
            .await
    }
}

/// A scheduled showing of a `Play` in a `TheatreHall`.
#[graphql_object(context = Context)]
impl Performance {
    /// Unique identifier of this `Performance`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Performance.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.id
    }

    /// `DateTime` when this `Performance` starts.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Performance.showTime",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn show_time(&self, ctx: &Context) -> Result<DateTime, Error> {
        Ok(self.performance(ctx).await?.show_time.coerce())
    }

    /// `Play` shown in this `Performance`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Performance.play",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn play(&self, ctx: &Context) -> Result<api::Play, Error> {
        let id = self.performance(ctx).await?.play_id;

        #[expect(
            unsafe_code,
            reason = "`Performance` loaded from repository guarantees `Play` \
                      existence"
        )]
        let play = unsafe { api::Play::new_unchecked(id) };
        Ok(play)
    }

    /// `TheatreHall` hosting this `Performance`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Performance.theatreHall",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn theatre_hall(
        &self,
        ctx: &Context,
    ) -> Result<api::TheatreHall, Error> {
        let id = self.performance(ctx).await?.theatre_hall_id;

        #[expect(
            unsafe_code,
            reason = "`Performance` loaded from repository guarantees \
                      `TheatreHall` existence"
        )]
        let hall = unsafe { api::TheatreHall::new_unchecked(id) };
        Ok(hall)
    }

    /// Already sold `Seat`s of this `Performance`, ordered by row and then by
    /// seat number.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Performance.takenSeats",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn taken_seats(
        &self,
        ctx: &Context,
    ) -> Result<Vec<api::Seat>, Error> {
        ctx.service()
            .execute(query::performance::TakenSeats::by(self.id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|seats| seats.into_iter().map(Into::into).collect())
    }

    /// Number of `Seat`s of this `Performance` still available for sale.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Performance.ticketsAvailable",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn tickets_available(
        &self,
        ctx: &Context,
    ) -> Result<i32, Error> {
        let count = ctx
            .service()
            .execute(query::performance::AvailableCount::by(self.id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| api::query::PerformanceError::NotExists.into())
            .map_err(ctx.error())?;
        i32::try_from(u32::from(count))
            .map_err(AsError::into_error)
            .map_err(ctx.error())
    }
}

/// Unique identifier of a `Performance`.
#[derive(Clone, Copy, Debug, Display, Into, From, GraphQLScalar)]
#[from(domain::performance::Id)]
#[into(domain::performance::Id)]
#[graphql(name = "PerformanceId", transparent)]
pub struct Id(Uuid);

pub mod list {
    //! Definitions related to `Performance`s lists.

    use common::DateTime;
    use juniper::graphql_object;
    use service::read::performance::list;

    use crate::{api, AsError, Context, Error};

    /// Short summary of a `Performance` in a list.
    #[derive(Clone, Debug, derive_more::From)]
    pub struct Item(list::Item);

    /// Short summary of a `Performance` in a list.
    #[graphql_object(name = "PerformanceListItem", context = Context)]
    impl Item {
        /// Unique identifier of the `Performance`.
        #[tracing::instrument(
            skip_all,
            fields(
                gql.name = "PerformanceListItem.id",
                otel.name = api::Query::SPAN_NAME,
            ),
        )]
        pub fn id(&self) -> api::performance::Id {
            self.0.id.into()
        }

        /// Title of the shown `Play`.
        #[tracing::instrument(
            skip_all,
            fields(
                gql.name = "PerformanceListItem.playTitle",
                otel.name = api::Query::SPAN_NAME,
            ),
        )]
        pub fn play_title(&self) -> api::play::Title {
            self.0.play_title.clone().into()
        }

        /// Name of the hosting `TheatreHall`.
        #[tracing::instrument(
            skip_all,
            fields(
                gql.name = "PerformanceListItem.theatreHallName",
                otel.name = api::Query::SPAN_NAME,
            ),
        )]
        pub fn theatre_hall_name(&self) -> api::theatre_hall::Name {
            self.0.theatre_hall_name.clone().into()
        }

        /// `DateTime` when the `Performance` starts.
        #[tracing::instrument(
            skip_all,
            fields(
                gql.name = "PerformanceListItem.showTime",
                otel.name = api::Query::SPAN_NAME,
            ),
        )]
        pub fn show_time(&self) -> DateTime {
            self.0.show_time.coerce()
        }

        /// Number of `Seat`s still available for sale.
        #[tracing::instrument(
            skip_all,
            fields(
                gql.name = "PerformanceListItem.ticketsAvailable",
                otel.name = api::Query::SPAN_NAME,
            ),
        )]
        pub fn tickets_available(&self, ctx: &Context) -> Result<i32, Error> {
            i32::try_from(u32::from(self.0.tickets_available))
                .map_err(AsError::into_error)
                .map_err(ctx.error())
        }
    }
}
