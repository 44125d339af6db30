//! [`Query`] collection related to the multiple [`Play`]s.

use common::operations::By;

use crate::{domain::Play, read};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries a list of [`Play`]s.
pub type List = DatabaseQuery<By<Vec<Play>, read::play::list::Filter>>;
