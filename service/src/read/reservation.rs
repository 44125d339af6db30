//! [`Reservation`]-related read definitions.

use derive_more::{Display, From, Into};

#[cfg(doc)]
use crate::domain::{Reservation, Ticket};

/// Number of [`Ticket`]s attributed to a [`Reservation`].
#[derive(
    Clone, Copy, Debug, Default, Display, Eq, From, Hash, Into, PartialEq,
)]
pub struct TicketCount(u32);

impl PartialEq<usize> for TicketCount {
    fn eq(&self, other: &usize) -> bool {
        usize::try_from(self.0).is_ok_and(|n| n == *other)
    }
}
