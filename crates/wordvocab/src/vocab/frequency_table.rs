//! # Frequency Table ``{ Token -> Frequency }``
//!
//! Counts are kept in first-seen order: a parallel ``Vec<(Token, Frequency)>``
//! holds the ordering, and a ``{ Token -> usize }`` map indexes into it.

use crate::types::{Frequency, Token, TokenIndexMap};
use serde::{Deserialize, Serialize};

/// Token frequency counts with stable first-seen ordering.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    from = "Vec<(Token, Frequency)>",
    into = "Vec<(Token, Frequency)>"
)]
pub struct FrequencyTable {
    /// Entries in first-seen order.
    entries: Vec<(Token, Frequency)>,

    /// Map of ``{ Token -> position in entries }``.
    index: TokenIndexMap,
}

impl From<Vec<(Token, Frequency)>> for FrequencyTable {
    fn from(entries: Vec<(Token, Frequency)>) -> Self {
        let mut table = Self::default();
        for (token, count) in entries {
            table.add(token.as_str(), count);
        }
        table
    }
}

impl From<FrequencyTable> for Vec<(Token, Frequency)> {
    fn from(table: FrequencyTable) -> Self {
        table.entries
    }
}

impl<S: AsRef<str>> FromIterator<S> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut table = Self::default();
        for token in iter {
            table.increment(token.as_ref());
        }
        table
    }
}

impl FrequencyTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of distinct tokens.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the table holds no tokens.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if the token has been seen.
    pub fn contains(
        &self,
        token: &str,
    ) -> bool {
        self.index.contains_key(token)
    }

    /// The first-seen position of the token, if any.
    pub fn position(
        &self,
        token: &str,
    ) -> Option<usize> {
        self.index.get(token).copied()
    }

    /// The count of the token; `0` if unseen.
    pub fn count(
        &self,
        token: &str,
    ) -> Frequency {
        self.position(token)
            .map(|pos| self.entries[pos].1)
            .unwrap_or(0)
    }

    /// The ``(token, count)`` pair at a first-seen position.
    pub fn get(
        &self,
        position: usize,
    ) -> Option<(&str, Frequency)> {
        self.entries
            .get(position)
            .map(|(token, count)| (token.as_str(), *count))
    }

    /// Iterate over ``(token, count)`` pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Frequency)> {
        self.entries
            .iter()
            .map(|(token, count)| (token.as_str(), *count))
    }

    /// Raise the count of `token` by one, inserting it at the end if unseen.
    ///
    /// Returns the position of the token.
    pub fn increment(
        &mut self,
        token: &str,
    ) -> usize {
        self.add(token, 1)
    }

    /// Raise the count of `token` by `count`, inserting it at the end if unseen.
    ///
    /// Counts saturate at [`Frequency::MAX`].
    ///
    /// Returns the position of the token.
    pub fn add(
        &mut self,
        token: &str,
        count: Frequency,
    ) -> usize {
        match self.index.get(token) {
            Some(&pos) => {
                let entry = &mut self.entries[pos].1;
                *entry = entry.saturating_add(count);
                pos
            }
            None => self.push(token, count),
        }
    }

    /// Overwrite the count of `token`, inserting it at the end if unseen.
    ///
    /// Returns the position of the token.
    pub fn set(
        &mut self,
        token: &str,
        count: Frequency,
    ) -> usize {
        match self.index.get(token) {
            Some(&pos) => {
                self.entries[pos].1 = count;
                pos
            }
            None => self.push(token, count),
        }
    }

    /// Add counts from `other` token-wise.
    ///
    /// Tokens already known keep their position; unseen tokens are appended
    /// in `other`'s order.
    pub fn merge(
        &mut self,
        other: &FrequencyTable,
    ) {
        for (token, count) in other.iter() {
            self.add(token, count);
        }
    }

    fn push(
        &mut self,
        token: &str,
        count: Frequency,
    ) -> usize {
        let pos = self.entries.len();
        let token = Token::from(token);
        self.index.insert(token.clone(), pos);
        self.entries.push((token, count));
        pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_increment_order() {
        let mut table = FrequencyTable::new();
        assert!(table.is_empty());

        for token in "a b a c b a".split_whitespace() {
            table.increment(token);
        }

        assert_eq!(table.len(), 3);
        assert_eq!(
            table.iter().collect::<Vec<_>>(),
            vec![("a", 3), ("b", 2), ("c", 1)]
        );
        assert_eq!(table.count("a"), 3);
        assert_eq!(table.count("z"), 0);
        assert_eq!(table.position("c"), Some(2));
        assert_eq!(table.position("z"), None);
        assert_eq!(table.get(1), Some(("b", 2)));
        assert_eq!(table.get(3), None);
    }

    #[test]
    fn test_set() {
        let mut table: FrequencyTable = ["x", "y", "x"].into_iter().collect();
        assert_eq!(table.set("y", 10), 1);
        assert_eq!(table.set("z", 0), 2);
        assert_eq!(
            table.iter().collect::<Vec<_>>(),
            vec![("x", 2), ("y", 10), ("z", 0)]
        );
    }

    #[test]
    fn test_add_saturates() {
        let mut table = FrequencyTable::new();
        table.add("x", Frequency::MAX);
        table.increment("x");
        assert_eq!(table.count("x"), Frequency::MAX);
    }

    #[test]
    fn test_merge() {
        let mut a: FrequencyTable = ["b", "a", "b"].into_iter().collect();
        let b: FrequencyTable = ["c", "a", "d", "c"].into_iter().collect();

        a.merge(&b);

        assert_eq!(
            a.iter().collect::<Vec<_>>(),
            vec![("b", 2), ("a", 2), ("c", 2), ("d", 1)]
        );
        assert_eq!(a.position("d"), Some(3));
    }

    #[test]
    fn test_from_entries() {
        let table = FrequencyTable::from(vec![
            (Token::from("p"), 4),
            (Token::from("q"), 1),
            (Token::from("p"), 1),
        ]);
        assert_eq!(table.iter().collect::<Vec<_>>(), vec![("p", 5), ("q", 1)]);

        let entries: Vec<(Token, Frequency)> = table.into();
        assert_eq!(entries.len(), 2);
    }
}
