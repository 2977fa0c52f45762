use crate::tokenize::is_word_char;
use crate::Concurrency;

/// Where fragment boundaries may fall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SplitPolicy {
    /// Cut exactly every `len / n` characters, even inside a word. A word that
    /// straddles a cut is counted as two words.
    #[default]
    CharOffset,
    /// Start from the same nominal cuts but push each one forward until it no
    /// longer separates two word characters. Counts then match a single-fragment
    /// count for every concurrency.
    WordBoundary,
}

/// Splits `text` into `concurrency` contiguous fragments at raw character offsets.
pub fn split(text: &str, concurrency: Concurrency) -> Vec<&str> {
    split_with(text, concurrency, SplitPolicy::CharOffset)
}

/// Splits `text` into contiguous fragments whose concatenation is `text`.
///
/// The fragment count is `concurrency`, capped at the number of characters so no
/// fragment is empty by construction; an empty text yields one empty fragment.
/// Fragments hold `len / count` characters each, the last one taking the
/// remainder. Under [`SplitPolicy::WordBoundary`] a cut that lands inside a word
/// moves to the end of that word, which can leave later fragments empty.
pub fn split_with(text: &str, concurrency: Concurrency, policy: SplitPolicy) -> Vec<&str> {
    let char_count = text.chars().count();
    if char_count == 0 {
        return vec![text];
    }
    let fragments = concurrency.get().min(char_count);
    let size = char_count / fragments;

    // Byte offsets of the cuts, including both ends of the text.
    let mut cuts = Vec::with_capacity(fragments + 1);
    cuts.push(0);
    let mut next_cut = 1;
    let mut prev: Option<char> = None;
    for (position, (byte, ch)) in text.char_indices().enumerate() {
        if next_cut == fragments {
            break;
        }
        if position >= next_cut * size {
            let inside_word = policy == SplitPolicy::WordBoundary
                && prev.is_some_and(is_word_char)
                && is_word_char(ch);
            if !inside_word {
                // A long word may have swallowed several nominal cuts.
                while next_cut < fragments && position >= next_cut * size {
                    cuts.push(byte);
                    next_cut += 1;
                }
            }
        }
        prev = Some(ch);
    }
    cuts.resize(fragments, text.len());
    cuts.push(text.len());

    cuts.windows(2).map(|pair| &text[pair[0]..pair[1]]).collect()
}
