use crate::tokenize::tokenize;
use crate::FrequencyTable;

/// Counts the words of a single fragment. Pure; touches no shared state.
pub fn count_fragment(fragment: &str) -> FrequencyTable {
    let mut table = FrequencyTable::new();
    for word in tokenize(fragment) {
        table.add(&word, 1);
    }
    table
}
