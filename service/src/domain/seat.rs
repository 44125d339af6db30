//! [`Seat`] definitions.

use derive_more::{Display, Error as StdError, From, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};

#[cfg(doc)]
use crate::domain::{Performance, TheatreHall};

/// Seat of a [`TheatreHall`] addressed by its [`Row`] and its [`Number`] in
/// that [`Row`].
///
/// [`Seat`]s are ordered by [`Row`] first and by [`Number`] second.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[display("row {row}, seat {number}")]
pub struct Seat {
    /// [`Row`] of this [`Seat`].
    pub row: Row,

    /// [`Number`] of this [`Seat`] in its [`Row`].
    pub number: Number,
}

impl Seat {
    /// Creates a new [`Seat`] out of the provided raw coordinates.
    ///
    /// Coordinates are not validated here, as only the [`TheatreHall`]
    /// geometry knows whether they are valid.
    #[must_use]
    pub const fn new(row: i32, number: i32) -> Self {
        Self {
            row: Row(row),
            number: Number(number),
        }
    }
}

/// Row of a [`Seat`], counted from `1`.
#[derive(
    Clone,
    Copy,
    Debug,
    Display,
    Eq,
    From,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Row(i32);

impl Row {
    /// Returns the raw value of this [`Row`].
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

/// Number of a [`Seat`] in its [`Row`], counted from `1`.
#[derive(
    Clone,
    Copy,
    Debug,
    Display,
    Eq,
    From,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Number(i32);

impl Number {
    /// Returns the raw value of this [`Number`].
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

/// Reason of a [`Seat`] being unavailable for a [`Performance`].
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, StdError)]
pub enum Error {
    /// [`Seat`] lies outside of the [`TheatreHall`] geometry.
    #[display("`Seat({_0})` is out of the hall bounds")]
    OutOfBounds(#[error(not(source))] Seat),

    /// [`Seat`] is already occupied by a sold ticket.
    #[display("`Seat({_0})` is already taken")]
    AlreadyTaken(#[error(not(source))] Seat),
}

impl Error {
    /// Returns the offending [`Seat`] of this [`Error`].
    #[must_use]
    pub const fn seat(&self) -> Seat {
        match self {
            Self::OutOfBounds(s) | Self::AlreadyTaken(s) => *s,
        }
    }
}

#[cfg(test)]
mod spec {
    use super::Seat;

    #[test]
    fn orders_by_row_then_number() {
        let mut seats = vec![
            Seat::new(2, 1),
            Seat::new(1, 3),
            Seat::new(1, 1),
            Seat::new(2, 0),
        ];
        seats.sort();

        assert_eq!(
            seats,
            [
                Seat::new(1, 1),
                Seat::new(1, 3),
                Seat::new(2, 0),
                Seat::new(2, 1),
            ],
        );
    }

    #[test]
    fn displays_coordinates() {
        assert_eq!(Seat::new(4, 12).to_string(), "row 4, seat 12");
    }
}
