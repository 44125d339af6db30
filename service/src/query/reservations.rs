//! [`Query`] collection related to the multiple [`Reservation`]s.

use common::operations::By;

use crate::domain::{user, Reservation};
#[cfg(doc)]
use crate::{domain::User, Query};

use super::DatabaseQuery;

/// Queries [`Reservation`]s of a [`User`], the most recent first.
pub type ByUser = DatabaseQuery<By<Vec<Reservation>, user::Id>>;
