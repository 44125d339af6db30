//! GraphQL API definitions.

pub mod actor;
pub mod genre;
mod mutation;
pub mod performance;
pub mod play;
mod query;
pub mod reservation;
pub mod scalar;
pub mod seat;
pub mod theatre_hall;

use juniper::EmptySubscription;

use crate::Context;

pub use self::{
    actor::Actor,
    genre::Genre,
    mutation::Mutation,
    performance::Performance,
    play::Play,
    query::Query,
    reservation::Reservation,
    seat::Seat,
    theatre_hall::TheatreHall,
};

/// GraphQL schema.
pub type Schema =
    juniper::RootNode<'static, Query, Mutation, EmptySubscription<Context>>;
