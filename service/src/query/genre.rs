//! [`Query`] collection related to a single [`Genre`].

use common::operations::By;

use crate::domain::{genre, Genre};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries a [`Genre`] by its [`genre::Id`].
pub type ById = DatabaseQuery<By<Option<Genre>, genre::Id>>;
