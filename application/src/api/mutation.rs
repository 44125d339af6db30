//! GraphQL [`Mutation`]s definitions.

use common::DateTime;
use juniper::graphql_object;
use service::{command, domain, Command as _};

use crate::{api, define_error, AsError, Context, Error};

/// Root of all GraphQL mutations.
#[derive(Clone, Copy, Debug)]
pub struct Mutation;

impl Mutation {
    /// Name of the [`tracing::Span`] for the mutations.
    const SPAN_NAME: &'static str = "GraphQL mutation";
}

#[graphql_object(context = Context)]
impl Mutation {
    /// Reserves the provided `Seat`s of a `Performance` for the authenticated
    /// user.
    ///
    /// Either all the `Seat`s are reserved, or none of them.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request is not authorized;
    /// - `PERFORMANCE_NOT_EXISTS` - the `Performance` with the specified ID
    ///                              does not exist;
    /// - `SEAT_OUT_OF_BOUNDS` - one of the `Seat`s is outside of the
    ///                          `TheatreHall`;
    /// - `SEAT_ALREADY_TAKEN` - one of the `Seat`s is sold already.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "createReservation",
            otel.name = Self::SPAN_NAME,
            performance_id = %performance_id,
            seats = seats.len(),
        ),
    )]
    pub async fn create_reservation(
        performance_id: api::performance::Id,
        seats: Vec<api::seat::SeatInput>,
        ctx: &Context,
    ) -> Result<api::Reservation, Error> {
        let my_id = ctx.current_session().await?.user_id;

        ctx.service()
            .execute(command::CreateReservation {
                user_id: my_id,
                performance_id: performance_id.into(),
                seats: seats.into_iter().map(Into::into).collect(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Cancels the `Reservation` of the authenticated user, releasing its
    /// `Seat`s.
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
            gql.name = "deleteReservation",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn delete_reservation(
        id: api::reservation::Id,
        ctx: &Context,
    ) -> Result<bool, Error> {
        let my_id = ctx.current_session().await?.user_id;

        ctx.service()
            .execute(command::DeleteReservation {
                user_id: my_id,
                reservation_id: id.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|()| true)
    }

    /// Creates a new `Actor`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request is not authorized;
    /// - `STAFF_REQUIRED` - the authenticated user is not a staff member.
    #[tracing::instrument(
        skip_all,
        fields(
            first_name = %first_name,
            gql.name = "createActor",
            last_name = %last_name,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn create_actor(
        first_name: api::actor::FirstName,
        last_name: api::actor::LastName,
        ctx: &Context,
    ) -> Result<api::Actor, Error> {
        _ = ctx.staff_session().await?;

        ctx.service()
            .execute(command::CreateActor {
                first_name: first_name.into(),
                last_name: last_name.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Creates a new `Genre`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request is not authorized;
    /// - `STAFF_REQUIRED` - the authenticated user is not a staff member.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "createGenre",
            name = %name,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn create_genre(
        name: api::genre::Name,
        ctx: &Context,
    ) -> Result<api::Genre, Error> {
        _ = ctx.staff_session().await?;

        ctx.service()
            .execute(command::CreateGenre { name: name.into() })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Creates a new `Play` performed by the specified `Actor`s and belonging
    /// to the specified `Genre`s.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request is not authorized;
    /// - `STAFF_REQUIRED` - the authenticated user is not a staff member;
    /// - `ACTOR_NOT_EXISTS` - one of the `Actor`s does not exist;
    /// - `GENRE_NOT_EXISTS` - one of the `Genre`s does not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            actors = actors.len(),
            genres = genres.len(),
            gql.name = "createPlay",
            otel.name = Self::SPAN_NAME,
            title = %title,
        ),
    )]
    pub async fn create_play(
        title: api::play::Title,
        description: api::play::Description,
        actors: Vec<api::actor::Id>,
        genres: Vec<api::genre::Id>,
        ctx: &Context,
    ) -> Result<api::Play, Error> {
        _ = ctx.staff_session().await?;

        ctx.service()
            .execute(command::CreatePlay {
                title: title.into(),
                description: description.into(),
                actors: actors.into_iter().map(Into::into).collect(),
                genres: genres.into_iter().map(Into::into).collect(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Deletes the `Play` along with all its `Performance`s.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request is not authorized;
    /// - `STAFF_REQUIRED` - the authenticated user is not a staff member;
    /// - `PLAY_NOT_EXISTS` - the `Play` with the specified ID does not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "deletePlay",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn delete_play(
        id: api::play::Id,
        ctx: &Context,
    ) -> Result<bool, Error> {
        _ = ctx.staff_session().await?;

        ctx.service()
            .execute(command::DeletePlay { id: id.into() })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|()| true)
    }

    /// Creates a new `TheatreHall` of the provided geometry.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request is not authorized;
    /// - `STAFF_REQUIRED` - the authenticated user is not a staff member;
    /// - `INVALID_GEOMETRY` - `rows` or `seatsInRow` is out of range.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "createTheatreHall",
            name = %name,
            otel.name = Self::SPAN_NAME,
            rows = rows,
            seats_in_row = seats_in_row,
        ),
    )]
    pub async fn create_theatre_hall(
        name: api::theatre_hall::Name,
        rows: i32,
        seats_in_row: i32,
        ctx: &Context,
    ) -> Result<api::TheatreHall, Error> {
        _ = ctx.staff_session().await?;
        let geometry = geometry(rows, seats_in_row).map_err(ctx.error())?;

        ctx.service()
            .execute(command::CreateTheatreHall {
                name: name.into(),
                geometry,
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Renames and resizes the `TheatreHall`.
    ///
    /// Geometry of a `TheatreHall` can't be changed once any `Seat` of its
    /// `Performance`s is sold.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request is not authorized;
    /// - `STAFF_REQUIRED` - the authenticated user is not a staff member;
    /// - `INVALID_GEOMETRY` - `rows` or `seatsInRow` is out of range;
    /// - `THEATRE_HALL_NOT_EXISTS` - the `TheatreHall` with the specified ID
    ///                               does not exist;
    /// - `HALL_HAS_SOLD_TICKETS` - the geometry is frozen by sold tickets.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "updateTheatreHall",
            id = %id,
            name = %name,
            otel.name = Self::SPAN_NAME,
            rows = rows,
            seats_in_row = seats_in_row,
        ),
    )]
    pub async fn update_theatre_hall(
        id: api::theatre_hall::Id,
        name: api::theatre_hall::Name,
        rows: i32,
        seats_in_row: i32,
        ctx: &Context,
    ) -> Result<api::TheatreHall, Error> {
        _ = ctx.staff_session().await?;
        let geometry = geometry(rows, seats_in_row).map_err(ctx.error())?;

        ctx.service()
            .execute(command::UpdateTheatreHall {
                id: id.into(),
                name: name.into(),
                geometry,
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Deletes the `TheatreHall` along with all its `Performance`s.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request is not authorized;
    /// - `STAFF_REQUIRED` - the authenticated user is not a staff member;
    /// - `THEATRE_HALL_NOT_EXISTS` - the `TheatreHall` with the specified ID
    ///                               does not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "deleteTheatreHall",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn delete_theatre_hall(
        id: api::theatre_hall::Id,
        ctx: &Context,
    ) -> Result<bool, Error> {
        _ = ctx.staff_session().await?;

        ctx.service()
            .execute(command::DeleteTheatreHall { id: id.into() })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|()| true)
    }

    /// Schedules a new `Performance` of the `Play` in the `TheatreHall`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request is not authorized;
    /// - `STAFF_REQUIRED` - the authenticated user is not a staff member;
    /// - `PLAY_NOT_EXISTS` - the `Play` with the specified ID does not exist;
    /// - `THEATRE_HALL_NOT_EXISTS` - the `TheatreHall` with the specified ID
    ///                               does not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "schedulePerformance",
            otel.name = Self::SPAN_NAME,
            play = %play,
            show_time = ?show_time,
            theatre_hall = %theatre_hall,
        ),
    )]
    pub async fn schedule_performance(
        play: api::play::Id,
        theatre_hall: api::theatre_hall::Id,
        show_time: DateTime,
        ctx: &Context,
    ) -> Result<api::Performance, Error> {
        _ = ctx.staff_session().await?;

        ctx.service()
            .execute(command::SchedulePerformance {
                play_id: play.into(),
                theatre_hall_id: theatre_hall.into(),
                show_time: show_time.coerce(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Moves the `Performance` to another time or `TheatreHall`.
    ///
    /// A `Performance` can't be moved once any of its `Seat`s is sold.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request is not authorized;
    /// - `STAFF_REQUIRED` - the authenticated user is not a staff member;
    /// - `PERFORMANCE_NOT_EXISTS` - the `Performance` with the specified ID
    ///                              does not exist;
    /// - `THEATRE_HALL_NOT_EXISTS` - the `TheatreHall` with the specified ID
    ///                               does not exist;
    /// - `PERFORMANCE_HAS_TICKETS` - the `Performance` has sold tickets.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "reschedulePerformance",
            id = %id,
            otel.name = Self::SPAN_NAME,
            show_time = ?show_time,
            theatre_hall = %theatre_hall,
        ),
    )]
    pub async fn reschedule_performance(
        id: api::performance::Id,
        theatre_hall: api::theatre_hall::Id,
        show_time: DateTime,
        ctx: &Context,
    ) -> Result<api::Performance, Error> {
        _ = ctx.staff_session().await?;

        ctx.service()
            .execute(command::ReschedulePerformance {
                id: id.into(),
                theatre_hall_id: theatre_hall.into(),
                show_time: show_time.coerce(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Cancels the `Performance` along with all its sold tickets.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - the request is not authorized;
    /// - `STAFF_REQUIRED` - the authenticated user is not a staff member;
    /// - `PERFORMANCE_NOT_EXISTS` - the `Performance` with the specified ID
    ///                              does not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "deletePerformance",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn delete_performance(
        id: api::performance::Id,
        ctx: &Context,
    ) -> Result<bool, Error> {
        _ = ctx.staff_session().await?;

        ctx.service()
            .execute(command::DeletePerformance { id: id.into() })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|()| true)
    }
}

/// Builds a [`domain::theatre_hall::Geometry`] out of the raw GraphQL input.
fn geometry(
    rows: i32,
    seats_in_row: i32,
) -> Result<domain::theatre_hall::Geometry, Error> {
    domain::theatre_hall::Geometry::new(rows, seats_in_row)
        .ok_or_else(|| GeometryError::Invalid.into())
}

define_error! {
    enum GeometryError {
        #[code = "INVALID_GEOMETRY"]
        #[status = BAD_REQUEST]
        #[message = "`rows` and `seatsInRow` must be positive, fit into \
                     16 bits, and give at most 2147483647 seats"]
        Invalid,
    }
}

define_error! {
    enum ActorError {
        #[code = "ACTOR_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Actor` with the specified ID does not exist"]
        NotExists,
    }
}

define_error! {
    enum GenreError {
        #[code = "GENRE_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Genre` with the specified ID does not exist"]
        NotExists,
    }
}

define_error! {
    enum TheatreHallError {
        #[code = "HALL_HAS_SOLD_TICKETS"]
        #[status = CONFLICT]
        #[message = "`TheatreHall` geometry can't be changed, as it has sold \
                     tickets"]
        HasSoldTickets,
    }
}

impl AsError for command::create_play::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::ActorNotExists(_) => Some(ActorError::NotExists.into()),
            Self::GenreNotExists(_) => Some(GenreError::NotExists.into()),
        }
    }
}

impl AsError for command::delete_play::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::PlayNotExists(_) => {
                Some(api::query::PlayError::NotExists.into())
            }
        }
    }
}

impl AsError for command::update_theatre_hall::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::TheatreHallNotExists(_) => {
                Some(api::query::TheatreHallError::NotExists.into())
            }
            Self::HallHasSoldTickets(_) => {
                Some(TheatreHallError::HasSoldTickets.into())
            }
        }
    }
}

impl AsError for command::delete_theatre_hall::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::TheatreHallNotExists(_) => {
                Some(api::query::TheatreHallError::NotExists.into())
            }
        }
    }
}

impl AsError for command::schedule_performance::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::PlayNotExists(_) => {
                Some(api::query::PlayError::NotExists.into())
            }
            Self::TheatreHallNotExists(_) => {
                Some(api::query::TheatreHallError::NotExists.into())
            }
        }
    }
}

impl AsError for command::reschedule_performance::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "PERFORMANCE_HAS_TICKETS"]
                #[status = CONFLICT]
                #[message = "`Performance` can't be moved, as it has sold \
                             tickets"]
                HasTickets,
            }
        }

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::PerformanceNotExists(_) => {
                Some(api::query::PerformanceError::NotExists.into())
            }
            Self::TheatreHallNotExists(_) => {
                Some(api::query::TheatreHallError::NotExists.into())
            }
            Self::PerformanceHasTickets(_) => Some(Error::HasTickets.into()),
        }
    }
}

impl AsError for command::delete_performance::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::PerformanceNotExists(_) => {
                Some(api::query::PerformanceError::NotExists.into())
            }
        }
    }
}

impl AsError for command::create_reservation::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::PerformanceNotExists(_) => {
                Some(api::query::PerformanceError::NotExists.into())
            }
            Self::Seat(e) => e.try_as_error(),
            Self::Partial { .. } => None,
        }
    }
}

impl AsError for command::delete_reservation::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::ReservationNotExists(_) => {
                Some(api::query::ReservationError::NotExists.into())
            }
        }
    }
}
