use serde::Serialize;

use crate::FrequencyTable;

pub const DEFAULT_TOP_N: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordRankEntry {
    pub word: String,
    pub count: u64,
}

impl WordRankEntry {
    pub fn new(word: impl Into<String>, count: u64) -> Self {
        Self {
            word: word.into(),
            count,
        }
    }
}

/// The `n` most frequent words, highest count first.
///
/// Equal counts keep the table's enumeration order, i.e. the word recorded first
/// ranks first.
pub fn top_n(table: &FrequencyTable, n: usize) -> Vec<WordRankEntry> {
    let mut ranked: Vec<(&str, u64)> = table.iter().collect();
    // Stable sort, so ties stay in insertion order.
    ranked.sort_by(|left, right| right.1.cmp(&left.1));
    ranked
        .into_iter()
        .take(n)
        .map(|(word, count)| WordRankEntry::new(word, count))
        .collect()
}
