//! [`Query`] collection related to a single [`Play`].

use common::operations::By;

use crate::domain::{play, Play};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries a [`Play`] by its [`play::Id`].
pub type ById = DatabaseQuery<By<Option<Play>, play::Id>>;
