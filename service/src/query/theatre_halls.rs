//! [`Query`] collection related to the multiple [`TheatreHall`]s.

use common::operations::By;

use crate::domain::TheatreHall;
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries a list of all [`TheatreHall`]s.
pub type List = DatabaseQuery<By<Vec<TheatreHall>, ()>>;
