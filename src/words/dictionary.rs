//! In-process word list with anagram and pattern lookups.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::words::{WordList, WordsError};

/// Blank tile in anagram input and wildcard in match patterns.
pub const WILDCARD: char = '?';

/// A word list indexed for lookups.
///
/// Words keep their original spelling for output; lookups compare lowercase.
#[derive(Debug, Default)]
pub struct Dictionary {
    words: Vec<String>,
    /// Sorted lowercase letters → indices into `words`.
    by_letters: HashMap<String, Vec<usize>>,
    /// Character count → indices into `words`.
    by_length: HashMap<usize, Vec<usize>>,
}

impl Dictionary {
    /// Read a newline-delimited word list.
    pub fn load(path: &Path) -> Result<Self, WordsError> {
        let content = fs::read_to_string(path).map_err(|source| WordsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let dictionary = Self::from_words(content.lines());
        tracing::debug!(path = ?path, words = dictionary.len(), "Word list loaded");
        Ok(dictionary)
    }

    /// Build from an iterator of words. Blank entries are skipped.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut dictionary = Self::default();
        for word in words {
            let word = word.as_ref().trim();
            if word.is_empty() {
                continue;
            }
            let index = dictionary.words.len();
            let lower = word.to_lowercase();
            dictionary
                .by_letters
                .entry(sorted_letters(&lower))
                .or_default()
                .push(index);
            dictionary
                .by_length
                .entry(lower.chars().count())
                .or_default()
                .push(index);
            dictionary.words.push(word.to_string());
        }
        dictionary
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    fn same_length(&self, len: usize) -> impl Iterator<Item = &String> {
        self.by_length
            .get(&len)
            .into_iter()
            .flatten()
            .map(move |&i| &self.words[i])
    }
}

impl WordList for Dictionary {
    fn anagrams(&self, input: &str) -> Vec<String> {
        let input = input.to_lowercase();

        if !input.contains(WILDCARD) {
            return self
                .by_letters
                .get(&sorted_letters(&input))
                .into_iter()
                .flatten()
                .map(|&i| self.words[i].clone())
                .collect();
        }

        let (blanks, tiles) = tile_counts(&input);
        self.same_length(input.chars().count())
            .filter(|word| fits_tiles(&word.to_lowercase(), &tiles, blanks))
            .cloned()
            .collect()
    }

    fn matches(&self, pattern: &str) -> Vec<String> {
        let pattern: Vec<char> = pattern.to_lowercase().chars().collect();
        self.same_length(pattern.len())
            .filter(|word| {
                word.to_lowercase()
                    .chars()
                    .zip(&pattern)
                    .all(|(c, &p)| p == WILDCARD || p == c)
            })
            .cloned()
            .collect()
    }
}

fn sorted_letters(word: &str) -> String {
    let mut letters: Vec<char> = word.chars().collect();
    letters.sort_unstable();
    letters.into_iter().collect()
}

fn tile_counts(input: &str) -> (usize, HashMap<char, usize>) {
    let mut blanks = 0;
    let mut tiles = HashMap::new();
    for c in input.chars() {
        if c == WILDCARD {
            blanks += 1;
        } else {
            *tiles.entry(c).or_insert(0) += 1;
        }
    }
    (blanks, tiles)
}

fn fits_tiles(word: &str, tiles: &HashMap<char, usize>, blanks: usize) -> bool {
    let mut remaining = tiles.clone();
    let mut blanks = blanks;
    for c in word.chars() {
        match remaining.get_mut(&c) {
            Some(n) if *n > 0 => *n -= 1,
            _ if blanks > 0 => blanks -= 1,
            _ => return false,
        }
    }
    true
}
