//! [`Ticket`] definitions.

use derive_more::{Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{performance, reservation, Seat};

/// Right to occupy a [`Seat`] during a [`Performance`].
///
/// At most one [`Ticket`] exists for any `(performance, seat)` pair.
///
/// [`Performance`]: crate::domain::Performance
#[derive(Clone, Copy, Debug)]
pub struct Ticket {
    /// ID of this [`Ticket`].
    pub id: Id,

    /// Occupied [`Seat`].
    pub seat: Seat,

    /// ID of the [`Performance`] this [`Ticket`] is valid for.
    ///
    /// [`Performance`]: crate::domain::Performance
    pub performance_id: performance::Id,

    /// ID of the [`Reservation`] this [`Ticket`] belongs to.
    ///
    /// [`Reservation`]: crate::domain::Reservation
    pub reservation_id: reservation::Id,
}

/// ID of a [`Ticket`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}
