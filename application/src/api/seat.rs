//! [`Seat`]-related definitions.

use juniper::{GraphQLInputObject, GraphQLObject};
use service::domain;

use crate::{AsError, Error};

/// A seat of a `TheatreHall`.
#[derive(Clone, Copy, Debug, GraphQLObject)]
pub struct Seat {
    /// Row of this `Seat`, starting from 1.
    pub row: i32,

    /// Number of this `Seat` in its row, starting from 1.
    pub seat: i32,
}

impl From<domain::Seat> for Seat {
    fn from(seat: domain::Seat) -> Self {
        Self {
            row: seat.row.get(),
            seat: seat.number.get(),
        }
    }
}

/// A seat of a `TheatreHall` to reserve or check.
#[derive(Clone, Copy, Debug, GraphQLInputObject)]
pub struct SeatInput {
    /// Row of the `Seat`, starting from 1.
    pub row: i32,

    /// Number of the `Seat` in its row, starting from 1.
    pub seat: i32,
}

impl From<SeatInput> for domain::Seat {
    fn from(input: SeatInput) -> Self {
        Self::new(input.row, input.seat)
    }
}

impl AsError for domain::seat::Error {
    fn try_as_error(&self) -> Option<Error> {
        use domain::seat::Error as E;

        let (code, status_code) = match self {
            E::OutOfBounds(_) => {
                ("SEAT_OUT_OF_BOUNDS", http::StatusCode::BAD_REQUEST)
            }
            E::AlreadyTaken(_) => {
                ("SEAT_ALREADY_TAKEN", http::StatusCode::CONFLICT)
            }
        };
        Some(Error {
            code,
            status_code,
            message: self.to_string(),
            backtrace: None,
        })
    }
}

#[cfg(test)]
mod spec {
    use service::domain::{seat, Seat};

    use crate::AsError as _;

    #[test]
    fn names_offending_seat() {
        let err = seat::Error::AlreadyTaken(Seat::new(2, 7)).as_error();

        assert_eq!(err.code, "SEAT_ALREADY_TAKEN");
        assert_eq!(err.status_code, http::StatusCode::CONFLICT);
        assert!(err.message.contains("row 2, seat 7"), "{}", err.message);

        let err = seat::Error::OutOfBounds(Seat::new(6, 1)).as_error();

        assert_eq!(err.code, "SEAT_OUT_OF_BOUNDS");
        assert_eq!(err.status_code, http::StatusCode::BAD_REQUEST);
    }
}
