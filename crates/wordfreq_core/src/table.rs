use std::collections::HashMap;

/// Word → occurrence count, enumerated in the order words were first recorded.
///
/// Equality compares the word/count pairs only; two tables holding the same counts
/// in a different insertion order are equal.
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    index: HashMap<String, usize>,
    entries: Vec<(String, u64)>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `count` occurrences of `word`, inserting it at the end if it is new.
    pub fn add(&mut self, word: &str, count: u64) {
        match self.index.get(word) {
            Some(&slot) => self.entries[slot].1 += count,
            None => self.insert_new(word.to_owned(), count),
        }
    }

    /// Moves every entry of `other` into this table, summing shared words.
    pub fn absorb(&mut self, other: FrequencyTable) {
        for (word, count) in other.entries {
            match self.index.get(word.as_str()) {
                Some(&slot) => self.entries[slot].1 += count,
                None => self.insert_new(word, count),
            }
        }
    }

    pub fn get(&self, word: &str) -> Option<u64> {
        self.index.get(word).map(|&slot| self.entries[slot].1)
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.entries
            .iter()
            .map(|(word, count)| (word.as_str(), *count))
    }

    fn insert_new(&mut self, word: String, count: u64) {
        self.index.insert(word.clone(), self.entries.len());
        self.entries.push((word, count));
    }
}

impl PartialEq for FrequencyTable {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(word, count)| other.get(word) == Some(count))
    }
}

impl Eq for FrequencyTable {}

impl<S: AsRef<str>> FromIterator<(S, u64)> for FrequencyTable {
    fn from_iter<T: IntoIterator<Item = (S, u64)>>(iter: T) -> Self {
        let mut table = FrequencyTable::new();
        table.extend(iter);
        table
    }
}

impl<S: AsRef<str>> Extend<(S, u64)> for FrequencyTable {
    fn extend<T: IntoIterator<Item = (S, u64)>>(&mut self, iter: T) {
        for (word, count) in iter {
            self.add(word.as_ref(), count);
        }
    }
}
