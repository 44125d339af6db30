//! [`Command`] definition.

pub mod create_actor;
pub mod create_genre;
pub mod create_play;
pub mod create_reservation;
pub mod create_theatre_hall;
pub mod delete_performance;
pub mod delete_play;
pub mod delete_reservation;
pub mod delete_theatre_hall;
pub mod reschedule_performance;
pub mod schedule_performance;
pub mod update_theatre_hall;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    create_actor::CreateActor, create_genre::CreateGenre,
    create_play::CreatePlay, create_reservation::CreateReservation,
    create_theatre_hall::CreateTheatreHall,
    delete_performance::DeletePerformance, delete_play::DeletePlay,
    delete_reservation::DeleteReservation,
    delete_theatre_hall::DeleteTheatreHall,
    reschedule_performance::ReschedulePerformance,
    schedule_performance::SchedulePerformance,
    update_theatre_hall::UpdateTheatreHall,
};
