//! [`Actor`] definitions.

use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Actor performing in [`Play`]s.
///
/// [`Play`]: crate::domain::Play
#[derive(Clone, Debug)]
pub struct Actor {
    /// ID of this [`Actor`].
    pub id: Id,

    /// [`FirstName`] of this [`Actor`].
    pub first_name: FirstName,

    /// [`LastName`] of this [`Actor`].
    pub last_name: LastName,
}

impl Actor {
    /// Returns the full name of this [`Actor`].
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// ID of an [`Actor`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// First name of an [`Actor`].
#[derive(
    AsRef, Clone, Debug, Display, Eq, Ord, PartialEq, PartialOrd,
)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct FirstName(String);

impl FirstName {
    /// Creates a new [`FirstName`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `name` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Creates a new [`FirstName`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`FirstName`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name && !name.is_empty() && name.len() <= 255
    }
}

impl FromStr for FirstName {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `FirstName`")
    }
}

/// Last name of an [`Actor`].
#[derive(
    AsRef, Clone, Debug, Display, Eq, Ord, PartialEq, PartialOrd,
)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct LastName(String);

impl LastName {
    /// Creates a new [`LastName`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `name` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Creates a new [`LastName`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`LastName`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name && !name.is_empty() && name.len() <= 255
    }
}

impl FromStr for LastName {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `LastName`")
    }
}

#[cfg(test)]
mod spec {
    use super::{Actor, FirstName, Id, LastName};

    #[test]
    fn validates_names() {
        assert!(FirstName::new("Ada").is_some());
        assert!(FirstName::new("").is_none());
        assert!(FirstName::new(" Ada").is_none());
        assert!(LastName::new("x".repeat(256)).is_none());
        assert!(LastName::new("x".repeat(255)).is_some());
    }

    #[test]
    fn joins_full_name() {
        let actor = Actor {
            id: Id::new(),
            first_name: "Sarah".parse().unwrap(),
            last_name: "Bernhardt".parse().unwrap(),
        };

        assert_eq!(actor.full_name(), "Sarah Bernhardt");
    }
}
