//! [`Query`] collection related to the multiple [`Performance`]s.

use common::operations::By;

use crate::read::performance::list;
#[cfg(doc)]
use crate::{domain::Performance, Query};

use super::DatabaseQuery;

/// Queries a list of [`Performance`]s.
pub type List = DatabaseQuery<By<Vec<list::Item>, list::Filter>>;
