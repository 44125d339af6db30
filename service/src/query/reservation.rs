//! [`Query`] collection related to a single [`Reservation`].

use common::operations::By;

use crate::domain::{reservation, Reservation, Ticket};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries a [`Reservation`] by its [`reservation::Id`].
pub type ById = DatabaseQuery<By<Option<Reservation>, reservation::Id>>;

/// Queries [`Ticket`]s of a [`Reservation`] ordered by their seats.
pub type Tickets = DatabaseQuery<By<Vec<Ticket>, reservation::Id>>;
