//! [`Query`] collection related to the multiple [`Genre`]s.

use std::collections::HashMap;

use common::operations::By;

use crate::{
    domain::{genre, Genre},
    read,
};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries [`Genre`]s by their [`genre::Id`]s.
pub type ByIds =
    DatabaseQuery<By<HashMap<genre::Id, Genre>, Vec<genre::Id>>>;

/// Queries a list of [`Genre`]s.
pub type List = DatabaseQuery<By<Vec<Genre>, read::genre::list::Filter>>;
