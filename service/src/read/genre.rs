//! [`Genre`]-related read definitions.

#[cfg(doc)]
use crate::domain::Genre;

pub mod list {
    //! [`Genre`]s list definitions.

    #[cfg(doc)]
    use crate::domain::Genre;

    /// Filter of [`Genre`]s list.
    #[derive(Clone, Debug, Default)]
    pub struct Filter {
        /// Case-insensitive part of the [`Genre`] name to search for.
        pub name: Option<String>,
    }
}
