//! [`Play`]-related read definitions.

#[cfg(doc)]
use crate::domain::Play;

pub mod list {
    //! [`Play`]s list definitions.

    #[cfg(doc)]
    use crate::domain::Play;
    use crate::domain::{actor, genre};

    /// Filter of [`Play`]s list.
    ///
    /// Every provided criterion must match. Empty ID lists match anything.
    #[derive(Clone, Debug, Default)]
    pub struct Filter {
        /// Case-insensitive part of the [`Play`] title to search for.
        pub title: Option<String>,

        /// IDs of [`actor::Actor`]s, any of which performs in the [`Play`].
        pub actors: Vec<actor::Id>,

        /// IDs of [`genre::Genre`]s, any of which the [`Play`] belongs to.
        pub genres: Vec<genre::Id>,
    }
}
