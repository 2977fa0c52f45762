use std::borrow::Cow;
use std::iter::FusedIterator;

/// Characters that belong to a word; everything else separates words.
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Lazily yields the words of `fragment` lower-cased, left to right.
///
/// The whole fragment is lower-cased first and words are then read off the
/// lowered text, so a character whose lowercase form is several characters (such
/// as `İ`) can split a run. The iterator is `Clone`, so a sequence can be
/// replayed from any point.
pub fn tokenize(fragment: &str) -> Tokens<'_> {
    Tokens {
        lowered: lowercase(fragment),
        pos: 0,
    }
}

#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    lowered: Cow<'a, str>,
    pos: usize,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Cow<'a, str>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = &self.lowered[self.pos..];
        let Some(start) = rest.find(is_word_char) else {
            self.pos = self.lowered.len();
            return None;
        };
        let len = rest[start..]
            .find(|c: char| !is_word_char(c))
            .unwrap_or(rest.len() - start);
        let (from, to) = (self.pos + start, self.pos + start + len);
        self.pos = to;
        Some(match &self.lowered {
            Cow::Borrowed(text) => {
                let text: &'a str = *text;
                Cow::Borrowed(&text[from..to])
            }
            Cow::Owned(text) => Cow::Owned(text[from..to].to_owned()),
        })
    }
}

impl FusedIterator for Tokens<'_> {}

fn lowercase(text: &str) -> Cow<'_, str> {
    if text.chars().any(|c| c.to_lowercase().ne(std::iter::once(c))) {
        Cow::Owned(text.to_lowercase())
    } else {
        Cow::Borrowed(text)
    }
}

#[cfg(test)]
mod tests {
    use super::tokenize;
    use std::borrow::Cow;

    fn words(text: &str) -> Vec<String> {
        tokenize(text).map(Cow::into_owned).collect()
    }

    #[test]
    fn lowercases_and_drops_punctuation() {
        assert_eq!(words("The cat sat. The cat ran."), ["the", "cat", "sat", "the", "cat", "ran"]);
    }

    #[test]
    fn underscores_and_digits_are_word_characters() {
        assert_eq!(words("snake_case, v2-final!"), ["snake_case", "v2", "final"]);
    }

    #[test]
    fn non_ascii_letters_form_words() {
        assert_eq!(words("Écoute: ÇA «va»"), ["écoute", "ça", "va"]);
    }

    #[test]
    fn empty_and_punctuation_only_yield_nothing() {
        assert!(words("").is_empty());
        assert!(words(" ... ,;!? \n\t").is_empty());
    }

    #[test]
    fn already_lowercase_fragment_is_borrowed() {
        let mut tokens = tokenize("plain words");
        assert!(matches!(tokens.next(), Some(Cow::Borrowed("plain"))));
        assert!(matches!(tokens.next(), Some(Cow::Borrowed("words"))));
        assert!(tokens.next().is_none());
        assert!(tokens.next().is_none());

        let mut tokens = tokenize("plain Mixed");
        assert!(matches!(tokens.next(), Some(ref w) if w == "plain"));
        assert!(matches!(tokens.next(), Some(Cow::Owned(ref w)) if w == "mixed"));
        assert!(tokens.next().is_none());
    }

    #[test]
    fn lowercasing_happens_before_word_extraction() {
        // 'İ' lowers to 'i' followed by a combining dot, which is not a word character.
        assert_eq!(words("İstanbul"), ["i", "stanbul"]);
        assert_eq!(words("Straße STRASSE"), ["straße", "strasse"]);
    }

    #[test]
    fn sequence_is_restartable() {
        let tokens = tokenize("one two three");
        let first: Vec<_> = tokens.clone().collect();
        let second: Vec<_> = tokens.collect();
        assert_eq!(first, second);
    }
}
