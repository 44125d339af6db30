//! Shared setup of [`Service`] tests.

use common::Date;
use tracerr::Traced;
use uuid::Uuid;

use crate::{
    command::{
        create_reservation, CreatePlay, CreateReservation, CreateTheatreHall,
        SchedulePerformance,
    },
    domain::{
        performance, theatre_hall, user, Performance, Play, Reservation, Seat,
        TheatreHall,
    },
    infra::Memory,
    Command as _,
};

/// [`crate::Service`] backed by an empty [`Memory`] database.
pub(crate) type Service = crate::Service<Memory>;

/// Creates a new [`Service`] over an empty [`Memory`] database.
pub(crate) fn service() -> Service {
    crate::Service::new(Memory::new())
}

/// ID of the [`user::User`] making reservations in tests.
pub(crate) fn user() -> user::Id {
    Uuid::from_u128(1).into()
}

/// Creates a new [`TheatreHall`] of the provided size with a unique name.
pub(crate) async fn hall(
    svc: &Service,
    rows: i32,
    seats_in_row: i32,
) -> TheatreHall {
    svc.execute(CreateTheatreHall {
        name: theatre_hall::Name::new(format!("Hall {}", Uuid::new_v4()))
            .unwrap(),
        geometry: theatre_hall::Geometry::new(rows, seats_in_row).unwrap(),
    })
    .await
    .unwrap()
}

/// Creates a new [`Play`] without actors and genres.
pub(crate) async fn play(svc: &Service) -> Play {
    svc.execute(CreatePlay {
        title: "Hamlet".parse().unwrap(),
        description: "Prince of Denmark".parse().unwrap(),
        actors: vec![],
        genres: vec![],
    })
    .await
    .unwrap()
}

/// Schedules a new [`Performance`] in a new [`TheatreHall`] of the provided
/// size.
pub(crate) async fn performance(
    svc: &Service,
    rows: i32,
    seats_in_row: i32,
) -> Performance {
    let hall = hall(svc, rows, seats_in_row).await;
    let play = play(svc).await;
    svc.execute(SchedulePerformance {
        play_id: play.id,
        theatre_hall_id: hall.id,
        show_time: Date::from_calendar_date(2024, 3, 1).unwrap().start(),
    })
    .await
    .unwrap()
}

/// Reserves the provided [`Seat`]s of a [`Performance`] for the [`user()`].
pub(crate) async fn reserve(
    svc: &Service,
    performance_id: performance::Id,
    seats: impl IntoIterator<Item = Seat>,
) -> Result<Reservation, Traced<create_reservation::ExecutionError>> {
    svc.execute(CreateReservation {
        user_id: user(),
        performance_id,
        seats: seats.into_iter().collect(),
    })
    .await
}
