//! [`Query`] collection related to the multiple [`Actor`]s.

use std::collections::HashMap;

use common::operations::By;

use crate::domain::{actor, Actor};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries [`Actor`]s by their [`actor::Id`]s.
pub type ByIds =
    DatabaseQuery<By<HashMap<actor::Id, Actor>, Vec<actor::Id>>>;

/// Queries a list of all [`Actor`]s.
pub type List = DatabaseQuery<By<Vec<Actor>, ()>>;
