//! [`TheatreHall`]-related read definitions.

use derive_more::Deref;

#[cfg(doc)]
use crate::domain::{Performance, TheatreHall, Ticket};

/// Indicator whether any [`Performance`] in a [`TheatreHall`] has a sold
/// [`Ticket`].
#[derive(Clone, Copy, Debug, Deref, Eq, Hash, PartialEq)]
pub struct HasSoldTickets(pub bool);

impl PartialEq<bool> for HasSoldTickets {
    fn eq(&self, other: &bool) -> bool {
        self.0 == *other
    }
}
