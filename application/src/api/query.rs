//! GraphQL [`Query`]s definitions.

use common::Date;
use juniper::graphql_object;
use service::{domain, query, read, Query as _};

use crate::{api, define_error, AsError, Context, Error};

/// Root of all GraphQL queries.
#[derive(Clone, Copy, Debug)]
pub struct Query;

impl Query {
    /// Name of the [`tracing::Span`] for the queries.
    pub(crate) const SPAN_NAME: &'static str = "GraphQL query";
}

#[graphql_object(context = Context)]
impl Query {
    /// Lists `Play`s ordered by title.
    ///
    /// Every provided filter must match: `title` as a case-insensitive part of
    /// the title, `actors` and `genres` as sets any of which must be involved.
    #[tracing::instrument(
        skip_all,
        fields(
            actors = ?actors,
            genres = ?genres,
            gql.name = "plays",
            otel.name = Self::SPAN_NAME,
            title = ?title,
        ),
    )]
    pub async fn plays(
        title: Option<String>,
        actors: Option<Vec<api::actor::Id>>,
        genres: Option<Vec<api::genre::Id>>,
        ctx: &Context,
    ) -> Result<Vec<api::Play>, Error> {
        ctx.service()
            .execute(query::plays::List::by(read::play::list::Filter {
                title,
                actors: actors
                    .unwrap_or_default()
                    .into_iter()
                    .map(Into::into)
                    .collect(),
                genres: genres
                    .unwrap_or_default()
                    .into_iter()
                    .map(Into::into)
                    .collect(),
            }))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|plays| plays.into_iter().map(Into::into).collect())
    }

    /// Returns the `Play` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `PLAY_NOT_EXISTS` - the `Play` with the specified ID does not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "play",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn play(
        id: api::play::Id,
        ctx: &Context,
    ) -> Result<api::Play, Error> {
        ctx.service()
            .execute(query::play::ById::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| PlayError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Lists all `Actor`s ordered by name.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "actors",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn actors(ctx: &Context) -> Result<Vec<api::Actor>, Error> {
        ctx.service()
            .execute(query::actors::List::by(()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|actors| actors.into_iter().map(Into::into).collect())
    }

    /// Lists `Genre`s ordered by name, optionally filtered by a
    /// case-insensitive part of it.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "genres",
            name = ?name,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn genres(
        name: Option<String>,
        ctx: &Context,
    ) -> Result<Vec<api::Genre>, Error> {
        ctx.service()
            .execute(query::genres::List::by(read::genre::list::Filter {
                name,
            }))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|genres| genres.into_iter().map(Into::into).collect())
    }

    /// Lists all `TheatreHall`s ordered by name.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "theatreHalls",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn theatre_halls(
        ctx: &Context,
    ) -> Result<Vec<api::TheatreHall>, Error> {
        ctx.service()
            .execute(query::theatre_halls::List::by(()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|halls| halls.into_iter().map(Into::into).collect())
    }

    /// Returns the `TheatreHall` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `THEATRE_HALL_NOT_EXISTS` - the `TheatreHall` with the specified ID
    ///                               does not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "theatreHall",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn theatre_hall(
        id: api::theatre_hall::Id,
        ctx: &Context,
    ) -> Result<api::TheatreHall, Error> {
        ctx.service()
            .execute(query::theatre_hall::ById::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| TheatreHallError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Lists `Performance`s ordered by show time, optionally only the ones
    /// starting at the specified UTC `date` or showing the specified `play`.
    #[tracing::instrument(
        skip_all,
        fields(
            date = ?date,
            gql.name = "performances",
            otel.name = Self::SPAN_NAME,
            play = ?play,
        ),
    )]
    pub async fn performances(
        date: Option<Date>,
        play: Option<api::play::Id>,
        ctx: &Context,
    ) -> Result<Vec<api::performance::list::Item>, Error> {
        ctx.service()
            .execute(query::performances::List::by(
                read::performance::list::Filter {
                    date,
                    play_id: play.map(Into::into),
                },
            ))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|items| items.into_iter().map(Into::into).collect())
    }

    /// Returns the `Performance` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `PERFORMANCE_NOT_EXISTS` - the `Performance` with the specified ID
    ///                              does not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "performance",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn performance(
        id: api::performance::Id,
        ctx: &Context,
    ) -> Result<api::Performance, Error> {
        ctx.service()
            .execute(query::performance::ById::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| PerformanceError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Checks whether the specified `Seat` of a `Performance` can be reserved
    /// right now.
    ///
    /// The answer is advisory: the `Seat` may be sold right after the check.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `PERFORMANCE_NOT_EXISTS` - the `Performance` with the specified ID
    ///                              does not exist;
    /// - `SEAT_OUT_OF_BOUNDS` - the `Seat` is outside of the `TheatreHall`;
    /// - `SEAT_ALREADY_TAKEN` - the `Seat` is sold already.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "seatAvailability",
            otel.name = Self::SPAN_NAME,
            performance_id = %performance_id,
            row = row,
            seat = seat,
        ),
    )]
    pub async fn seat_availability(
        performance_id: api::performance::Id,
        row: i32,
        seat: i32,
        ctx: &Context,
    ) -> Result<bool, Error> {
        ctx.service()
            .execute(query::ValidateSeat {
                performance_id: performance_id.into(),
                seat: domain::Seat::new(row, seat),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|()| true)
    }

    /// Lists `Reservation`s of the authenticated user, the latest first.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request is not authorized.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "myReservations",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn my_reservations(
        ctx: &Context,
    ) -> Result<Vec<api::Reservation>, Error> {
        let my_id = ctx.current_session().await?.user_id;

        ctx.service()
            .execute(query::reservations::ByUser::by(my_id))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|rs| rs.into_iter().map(Into::into).collect())
    }

    /// Returns the `Reservation` of the authenticated user with the specified
    /// ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request is not authorized;
    /// - `RESERVATION_NOT_EXISTS` - the authenticated user has no
    ///                              `Reservation` with the specified ID.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "reservation",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn reservation(
        id: api::reservation::Id,
        ctx: &Context,
    ) -> Result<api::Reservation, Error> {
        let my_id = ctx.current_session().await?.user_id;

        ctx.service()
            .execute(query::reservation::ById::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .filter(|r| r.user_id == my_id)
            .ok_or_else(|| ReservationError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }
}

impl AsError for query::performance::ValidationError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::PerformanceNotExists(_) => {
                Some(PerformanceError::NotExists.into())
            }
            Self::Seat(e) => e.try_as_error(),
        }
    }
}

define_error! {
    enum PerformanceError {
        #[code = "PERFORMANCE_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Performance` with the specified ID does not exist"]
        NotExists,
    }
}

define_error! {
    enum PlayError {
        #[code = "PLAY_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Play` with the specified ID does not exist"]
        NotExists,
    }
}

define_error! {
    enum ReservationError {
        #[code = "RESERVATION_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Reservation` with the specified ID does not exist"]
        NotExists,
    }
}

define_error! {
    enum TheatreHallError {
        #[code = "THEATRE_HALL_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`TheatreHall` with the specified ID does not exist"]
        NotExists,
    }
}
