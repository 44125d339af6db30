//! [`Query`] collection related to a single [`Actor`].

use common::operations::By;

use crate::domain::{actor, Actor};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries an [`Actor`] by its [`actor::Id`].
pub type ById = DatabaseQuery<By<Option<Actor>, actor::Id>>;
