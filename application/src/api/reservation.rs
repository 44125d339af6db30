//! [`Reservation`]-related definitions.

use common::DateTime;
use derive_more::{Display, From, Into};
use juniper::{graphql_object, GraphQLScalar};
use service::{domain, query, Query as _};
use uuid::Uuid;

use crate::{api, AsError, Context, Error};

/// Seats bought by a user at once.
#[derive(Clone, Copy, Debug, From)]
pub struct Reservation(domain::Reservation);

/// Seats bought by a user at once.
#[graphql_object(context = Context)]
impl Reservation {
    /// Unique identifier of this `Reservation`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Reservation.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// `DateTime` when this `Reservation` was made.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Reservation.createdAt",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn created_at(&self) -> DateTime {
        self.0.created_at.coerce()
    }

    /// `Ticket`s of this `Reservation`, ordered by seat.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Reservation.tickets",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn tickets(&self, ctx: &Context) -> Result<Vec<Ticket>, Error> {
        ctx.service()
            .execute(query::reservation::Tickets::by(self.0.id))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|tickets| tickets.into_iter().map(Ticket).collect())
    }
}

/// Unique identifier of a `Reservation`.
#[derive(Clone, Copy, Debug, Display, Into, From, GraphQLScalar)]
#[from(domain::reservation::Id)]
#[into(domain::reservation::Id)]
#[graphql(name = "ReservationId", transparent)]
pub struct Id(Uuid);

/// A sold seat of a `Performance`.
#[derive(Clone, Copy, Debug, From)]
pub struct Ticket(domain::Ticket);

/// A sold seat of a `Performance`.
#[graphql_object(context = Context)]
impl Ticket {
    /// Unique identifier of this `Ticket`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Ticket.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Uuid {
        self.0.id.into()
    }

    /// `Seat` this `Ticket` is sold for.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Ticket.seat",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn seat(&self) -> api::Seat {
        self.0.seat.into()
    }

    /// `Performance` this `Ticket` is sold for.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Ticket.performance",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn performance(&self) -> api::Performance {
        #[expect(
            unsafe_code,
            reason = "`Ticket` loaded from repository guarantees \
                      `Performance` existence"
        )]
        unsafe {
            api::Performance::new_unchecked(self.0.performance_id)
        }
    }
}
