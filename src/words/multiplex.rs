//! Combining lookups across several word lists.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::words::WordList;

/// Merges the per-list results of one lookup into a single sequence.
pub type Combinator = fn(Vec<Vec<String>>) -> Vec<String>;

/// Union of all results in first-seen order.
pub fn union(results: Vec<Vec<String>>) -> Vec<String> {
    let mut seen = HashSet::new();
    results
        .into_iter()
        .flatten()
        .filter(|word| seen.insert(word.clone()))
        .collect()
}

/// A set of word lists queried together.
///
/// The dispatcher only ever talks to a `Multiplexer`; a single-list
/// deployment is a multiplexer of one and still goes through the combinator.
#[derive(Clone)]
pub struct Multiplexer {
    lists: Vec<Arc<dyn WordList>>,
    combine: Combinator,
}

impl Multiplexer {
    pub fn new(lists: Vec<Arc<dyn WordList>>) -> Self {
        Self::with_combinator(lists, union)
    }

    pub fn with_combinator(lists: Vec<Arc<dyn WordList>>, combine: Combinator) -> Self {
        Self { lists, combine }
    }

    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    pub fn anagrams(&self, input: &str) -> Vec<String> {
        self.query(|list| list.anagrams(input))
    }

    pub fn matches(&self, pattern: &str) -> Vec<String> {
        self.query(|list| list.matches(pattern))
    }

    fn query<F>(&self, lookup: F) -> Vec<String>
    where
        F: Fn(&dyn WordList) -> Vec<String>,
    {
        (self.combine)(self.lists.iter().map(|l| lookup(l.as_ref())).collect())
    }
}

impl fmt::Debug for Multiplexer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Multiplexer")
            .field("lists", &self.lists.len())
            .finish()
    }
}
