//! [`Performance`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::DateTimeOf;
use derive_more::{Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{play, theatre_hall};

/// Scheduled showing of a [`Play`] in a [`TheatreHall`].
///
/// [`Play`]: crate::domain::Play
/// [`TheatreHall`]: crate::domain::TheatreHall
#[derive(Clone, Copy, Debug)]
pub struct Performance {
    /// ID of this [`Performance`].
    pub id: Id,

    /// ID of the shown [`Play`].
    ///
    /// [`Play`]: crate::domain::Play
    pub play_id: play::Id,

    /// ID of the [`TheatreHall`] hosting this [`Performance`].
    ///
    /// [`TheatreHall`]: crate::domain::TheatreHall
    pub theatre_hall_id: theatre_hall::Id,

    /// [`DateTime`] when this [`Performance`] starts.
    pub show_time: ShowTime,
}

/// ID of a [`Performance`].
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

/// Unit marker of a [`Performance`] start.
#[derive(Clone, Copy, Debug)]
pub struct Show;

/// [`DateTime`] when a [`Performance`] starts.
pub type ShowTime = DateTimeOf<(Performance, Show)>;
