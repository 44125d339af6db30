//! [`Query`] collection related to a single [`TheatreHall`].

use common::operations::By;

use crate::domain::{theatre_hall, TheatreHall};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries a [`TheatreHall`] by its [`theatre_hall::Id`].
pub type ById = DatabaseQuery<By<Option<TheatreHall>, theatre_hall::Id>>;
