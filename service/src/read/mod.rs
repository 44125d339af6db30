//! Read entities definitions.

pub mod genre;
pub mod performance;
pub mod play;
pub mod reservation;
pub mod theatre_hall;
pub mod ticket;

pub use self::performance::Seating;
