use crate::FrequencyTable;

/// Sums per-fragment tables key by key.
///
/// Words keep the order in which they are first met across `tables`; the counts
/// themselves do not depend on the order of the input.
pub fn merge<I>(tables: I) -> FrequencyTable
where
    I: IntoIterator<Item = FrequencyTable>,
{
    tables
        .into_iter()
        .reduce(|mut total, partial| {
            total.absorb(partial);
            total
        })
        .unwrap_or_default()
}
