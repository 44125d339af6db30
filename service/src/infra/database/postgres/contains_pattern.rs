//! [`ContainsPattern`] definition.

use derive_more::Display;
use postgres_types::{FromSql, ToSql};

/// `ILIKE` pattern matching any text containing the given input.
#[derive(Clone, Debug, Display, Eq, FromSql, PartialEq, ToSql)]
#[postgres(transparent)]
pub struct ContainsPattern(String);

impl ContainsPattern {
    /// Creates a new [`ContainsPattern`] out of the given `input`, escaping
    /// the `LIKE` wildcards in it.
    #[must_use]
    pub fn new(input: &str) -> Self {
        let mut pattern = String::with_capacity(input.len() + 2);
        pattern.push('%');
        for c in input.chars() {
            if matches!(c, '\\' | '%' | '_') {
                pattern.push('\\');
            }
            pattern.push(c);
        }
        pattern.push('%');
        Self(pattern)
    }
}

#[cfg(test)]
mod spec {
    use super::ContainsPattern;

    #[test]
    fn escapes_wildcards() {
        assert_eq!(ContainsPattern::new("ham").to_string(), "%ham%");
        assert_eq!(
            ContainsPattern::new(r"50%_off\").to_string(),
            r"%50\%\_off\\%",
        );
    }
}
