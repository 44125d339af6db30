//! [`Performance`]-related read definitions.

use std::{slice, vec};

use derive_more::{Deref, Display, From, Into};

#[cfg(doc)]
use crate::domain::{Performance, Ticket};
use crate::domain::{performance, theatre_hall, Seat};

/// [`theatre_hall::Geometry`] a [`Performance`] sells [`Seat`]s within.
///
/// Reading a [`Seating`] inside a transaction holds it until the transaction
/// ends, so the [`Performance`] can't be moved to another hall and the hall
/// can't be resized meanwhile.
#[derive(Clone, Copy, Debug)]
pub struct Seating {
    /// ID of the [`Performance`].
    pub performance_id: performance::Id,

    /// ID of the hall hosting the [`Performance`].
    pub theatre_hall_id: theatre_hall::Id,

    /// [`theatre_hall::Geometry`] of the hall.
    pub geometry: theatre_hall::Geometry,
}

/// Number of [`Seat`]s of a [`Performance`] still free for sale.
///
/// Advisory only: it may be outdated as soon as it's read.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Display,
    Eq,
    From,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
)]
pub struct AvailableCount(u32);

impl AvailableCount {
    /// Computes the [`AvailableCount`] out of the hall capacity and the number
    /// of sold [`Ticket`]s.
    #[must_use]
    pub const fn new(capacity: u32, sold: u32) -> Self {
        Self(capacity.saturating_sub(sold))
    }
}

/// [`Seat`]s of a [`Performance`] occupied by sold [`Ticket`]s, ordered by
/// row and then by seat number.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TakenSeats(Vec<Seat>);

impl TakenSeats {
    /// Returns an iterator over these [`TakenSeats`].
    pub fn iter(&self) -> slice::Iter<'_, Seat> {
        self.0.iter()
    }

    /// Returns the number of [`TakenSeats`].
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Indicates whether no [`Seat`] is taken.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Indicates whether the provided [`Seat`] is taken.
    #[must_use]
    pub fn contains(&self, seat: Seat) -> bool {
        self.0.binary_search(&seat).is_ok()
    }
}

impl FromIterator<Seat> for TakenSeats {
    fn from_iter<I: IntoIterator<Item = Seat>>(iter: I) -> Self {
        let mut seats = iter.into_iter().collect::<Vec<_>>();
        seats.sort_unstable();
        seats.dedup();
        Self(seats)
    }
}

impl IntoIterator for TakenSeats {
    type Item = Seat;
    type IntoIter = vec::IntoIter<Seat>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a TakenSeats {
    type Item = &'a Seat;
    type IntoIter = slice::Iter<'a, Seat>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Indicator whether a [`Performance`] has any sold [`Ticket`]s.
#[derive(Clone, Copy, Debug, Deref, Eq, Hash, PartialEq)]
pub struct HasTickets(pub bool);

impl PartialEq<bool> for HasTickets {
    fn eq(&self, other: &bool) -> bool {
        self.0 == *other
    }
}

pub mod list {
    //! [`Performance`]s list definitions.

    use common::Date;

    #[cfg(doc)]
    use crate::domain::Performance;
    use crate::domain::{performance, play, theatre_hall};

    use super::AvailableCount;

    /// Filter of [`Performance`]s list.
    #[derive(Clone, Copy, Debug, Default)]
    pub struct Filter {
        /// [`Date`] the listed [`Performance`]s start at.
        pub date: Option<Date>,

        /// ID of the [`play::Play`] the listed [`Performance`]s show.
        pub play_id: Option<play::Id>,
    }

    /// Item of [`Performance`]s list.
    #[derive(Clone, Debug)]
    pub struct Item {
        /// ID of the [`Performance`].
        pub id: performance::Id,

        /// Title of the shown [`play::Play`].
        pub play_title: play::Title,

        /// Name of the hosting [`theatre_hall::TheatreHall`].
        pub theatre_hall_name: theatre_hall::Name,

        /// [`performance::ShowTime`] of the [`Performance`].
        pub show_time: performance::ShowTime,

        /// [`AvailableCount`] of the [`Performance`].
        pub tickets_available: AvailableCount,
    }
}

#[cfg(test)]
mod spec {
    use crate::domain::Seat;

    use super::{AvailableCount, TakenSeats};

    #[test]
    fn collects_ordered_unique_seats() {
        let taken = [Seat::new(3, 1), Seat::new(1, 2), Seat::new(1, 2)]
            .into_iter()
            .collect::<TakenSeats>();

        assert_eq!(taken.len(), 2);
        assert!(taken.contains(Seat::new(1, 2)));
        assert!(!taken.contains(Seat::new(2, 2)));
        assert_eq!(
            taken.iter().copied().collect::<Vec<_>>(),
            [Seat::new(1, 2), Seat::new(3, 1)],
        );
        // Iteration is restartable.
        assert_eq!(taken.iter().count(), (&taken).into_iter().count());
    }

    #[test]
    fn available_count_never_underflows() {
        assert_eq!(u32::from(AvailableCount::new(50, 3)), 47);
        assert_eq!(u32::from(AvailableCount::new(2, 3)), 0);
    }
}
