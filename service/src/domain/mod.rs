//! Domain definitions.

pub mod actor;
pub mod genre;
pub mod performance;
pub mod play;
pub mod reservation;
pub mod seat;
pub mod theatre_hall;
pub mod ticket;
pub mod user;

pub use self::{
    actor::Actor, genre::Genre, performance::Performance, play::Play,
    reservation::Reservation, seat::Seat, theatre_hall::TheatreHall,
    ticket::Ticket, user::User,
};
