//! [`Ticket`]-related read definitions.

use derive_more::Deref;

#[cfg(doc)]
use crate::domain::{Seat, Ticket};

/// Indicator whether a [`Seat`] of a performance has a sold [`Ticket`].
#[derive(Clone, Copy, Debug, Deref, Eq, Hash, PartialEq)]
pub struct IsTaken(pub bool);

impl PartialEq<bool> for IsTaken {
    fn eq(&self, other: &bool) -> bool {
        self.0 == *other
    }
}

/// Indicator whether a [`Ticket`] was actually inserted.
///
/// `false` means another [`Ticket`] for the same [`Seat`] was inserted first.
#[derive(Clone, Copy, Debug, Deref, Eq, Hash, PartialEq)]
pub struct IsInserted(pub bool);

impl PartialEq<bool> for IsInserted {
    fn eq(&self, other: &bool) -> bool {
        self.0 == *other
    }
}
