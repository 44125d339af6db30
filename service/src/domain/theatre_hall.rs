//! [`TheatreHall`] definitions.

use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{seat, Seat};

/// Rectangular hall of a theatre where [`Performance`]s take place.
///
/// [`Performance`]: crate::domain::Performance
#[derive(Clone, Debug)]
pub struct TheatreHall {
    /// ID of this [`TheatreHall`].
    pub id: Id,

    /// [`Name`] of this [`TheatreHall`].
    pub name: Name,

    /// [`Geometry`] of this [`TheatreHall`].
    pub geometry: Geometry,
}

/// ID of a [`TheatreHall`].
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

/// Unique name of a [`TheatreHall`].
#[derive(
    AsRef, Clone, Debug, Display, Eq, Ord, PartialEq, PartialOrd,
)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Name(String);

impl Name {
    /// Creates a new [`Name`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `name` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Creates a new [`Name`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`Name`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name && !name.is_empty() && name.len() <= 255
    }
}

impl FromStr for Name {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Name`")
    }
}

/// Number of rows in a [`TheatreHall`].
#[derive(
    Clone, Copy, Debug, Display, Eq, Hash, Into, Ord, PartialEq, PartialOrd,
)]
pub struct Rows(u16);

impl Rows {
    /// Creates new [`Rows`] if the given `count` is positive and fits.
    #[must_use]
    pub fn new(count: i32) -> Option<Self> {
        u16::try_from(count).ok().filter(|c| *c > 0).map(Self)
    }

    /// Returns the raw value of these [`Rows`].
    #[must_use]
    pub const fn get(self) -> u16 {
        self.0
    }
}

/// Number of seats in every row of a [`TheatreHall`].
#[derive(
    Clone, Copy, Debug, Display, Eq, Hash, Into, Ord, PartialEq, PartialOrd,
)]
pub struct SeatsInRow(u16);

impl SeatsInRow {
    /// Creates new [`SeatsInRow`] if the given `count` is positive and fits.
    #[must_use]
    pub fn new(count: i32) -> Option<Self> {
        u16::try_from(count).ok().filter(|c| *c > 0).map(Self)
    }

    /// Returns the raw value of these [`SeatsInRow`].
    #[must_use]
    pub const fn get(self) -> u16 {
        self.0
    }
}

/// Rectangular layout of [`Seat`]s in a [`TheatreHall`].
///
/// Valid [`Seat`]s are those with `1 <= row <= rows` and
/// `1 <= number <= seats_in_row`.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
#[display("{rows}x{seats_in_row}")]
pub struct Geometry {
    /// [`Rows`] of the [`TheatreHall`].
    pub rows: Rows,

    /// [`SeatsInRow`] of the [`TheatreHall`].
    pub seats_in_row: SeatsInRow,
}

impl Geometry {
    /// Maximum [`Geometry::capacity()`], so it fits into a signed 32-bit
    /// integer.
    pub const MAX_CAPACITY: u32 = i32::MAX.unsigned_abs();

    /// Creates a new [`Geometry`] if both dimensions are valid and its
    /// capacity doesn't exceed [`Geometry::MAX_CAPACITY`].
    #[must_use]
    pub fn new(rows: i32, seats_in_row: i32) -> Option<Self> {
        Some(Self {
            rows: Rows::new(rows)?,
            seats_in_row: SeatsInRow::new(seats_in_row)?,
        })
        .filter(|g| g.capacity() <= Self::MAX_CAPACITY)
    }

    /// Returns the total number of [`Seat`]s.
    #[must_use]
    pub fn capacity(&self) -> u32 {
        u32::from(self.rows.get()) * u32::from(self.seats_in_row.get())
    }

    /// Indicates whether the provided [`Seat`] lies within this [`Geometry`].
    #[must_use]
    pub fn contains(&self, seat: Seat) -> bool {
        (1..=i32::from(self.rows.get())).contains(&seat.row.get())
            && (1..=i32::from(self.seats_in_row.get()))
                .contains(&seat.number.get())
    }

    /// Checks that the provided [`Seat`] lies within this [`Geometry`].
    ///
    /// # Errors
    ///
    /// With [`seat::Error::OutOfBounds`] if it doesn't.
    pub fn check(&self, seat: Seat) -> Result<(), seat::Error> {
        if self.contains(seat) {
            Ok(())
        } else {
            Err(seat::Error::OutOfBounds(seat))
        }
    }
}

#[cfg(test)]
mod spec {
    use crate::domain::{seat, Seat};

    use super::{Geometry, Rows};

    #[test]
    fn rejects_non_positive_dimensions() {
        assert!(Rows::new(0).is_none());
        assert!(Rows::new(-3).is_none());
        assert!(Rows::new(70_000).is_none());
        assert!(Geometry::new(5, 0).is_none());
        assert!(Geometry::new(5, 10).is_some());
    }

    #[test]
    fn computes_capacity() {
        let geometry = Geometry::new(5, 10).unwrap();

        assert_eq!(geometry.capacity(), 50);
    }

    #[test]
    fn limits_capacity_to_signed_32_bits() {
        let max = i32::from(u16::MAX);

        assert!(Geometry::new(max, max).is_none());
        assert!(Geometry::new(max, 32_769).is_none());

        let largest = Geometry::new(max, 32_768).unwrap();
        assert!(i32::try_from(largest.capacity()).is_ok());
        assert!(largest.capacity() <= Geometry::MAX_CAPACITY);
    }

    #[test]
    fn checks_bounds() {
        let geometry = Geometry::new(5, 10).unwrap();

        for (row, number) in [(1, 1), (5, 10), (3, 7)] {
            assert!(geometry.check(Seat::new(row, number)).is_ok());
        }
        for (row, number) in [(0, 1), (6, 1), (1, 0), (1, 11), (-1, -1)] {
            let seat = Seat::new(row, number);
            assert_eq!(
                geometry.check(seat),
                Err(seat::Error::OutOfBounds(seat)),
            );
        }
    }
}
