//! Whitespace word tokenization over verse plain text

use serde::Serialize;

use super::resolver::CharRange;

/// A maximal run of non-whitespace characters
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Word {
    pub word: String,
    /// UTF-16 offset of the first character
    pub start_index: usize,
    /// UTF-16 offset one past the last character
    pub end_index: usize,
}

/// Split `text` into words with end-exclusive UTF-16 offsets.
///
/// Never cached: callers tokenize the current plain text on every pass.
pub fn split_into_words(text: &str) -> Vec<Word> {
    let mut words = Vec::new();
    // (byte start, utf-16 start) of the word being scanned
    let mut current: Option<(usize, usize)> = None;
    let mut units = 0;

    for (byte, ch) in text.char_indices() {
        if is_separator(ch) {
            if let Some((from, start_index)) = current.take() {
                words.push(Word {
                    word: text[from..byte].to_string(),
                    start_index,
                    end_index: units,
                });
            }
        } else if current.is_none() {
            current = Some((byte, units));
        }
        units += ch.len_utf16();
    }

    if let Some((from, start_index)) = current {
        words.push(Word {
            word: text[from..].to_string(),
            start_index,
            end_index: units,
        });
    }

    words
}

/// The set JavaScript's `\s` matches.
///
/// Word indices are recorded by the reader's `split(/\s+/)`, so the split
/// here has to agree with it: U+FEFF separates words, U+0085 does not.
fn is_separator(ch: char) -> bool {
    matches!(
        ch,
        '\u{0009}'..='\u{000d}'
            | ' '
            | '\u{00a0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200a}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202f}'
            | '\u{205f}'
            | '\u{3000}'
            | '\u{feff}'
    )
}

/// Convert an inclusive word index pair into an end-exclusive character range.
///
/// `None` when either index is missing, the text has no words, or either
/// index is past the last word. The range runs from the start of the first
/// word to the end of the last, including whatever lies between.
pub fn word_indices_to_char_offsets(
    plain_text: &str,
    start_word_index: Option<usize>,
    end_word_index: Option<usize>,
) -> Option<CharRange> {
    let (start, end) = (start_word_index?, end_word_index?);
    let words = split_into_words(plain_text);
    let first = words.get(start)?;
    let last = words.get(end)?;

    Some(CharRange::new(first.start_index, last.end_index))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT: &str = "In the beginning God created";

    #[test]
    fn test_split_words() {
        let words = split_into_words(TEXT);
        let tokens: Vec<_> = words.iter().map(|w| w.word.as_str()).collect();
        assert_eq!(tokens, vec!["In", "the", "beginning", "God", "created"]);
        assert_eq!((words[2].start_index, words[2].end_index), (7, 16));
        assert_eq!((words[4].start_index, words[4].end_index), (21, 28));
    }

    #[test]
    fn test_split_irregular_whitespace() {
        let words = split_into_words("  Jesus\u{a0}wept.\n");
        assert_eq!(words.len(), 2);
        assert_eq!(words[0].word, "Jesus");
        assert_eq!((words[0].start_index, words[0].end_index), (2, 7));
        assert_eq!((words[1].start_index, words[1].end_index), (8, 13));
    }

    #[test]
    fn test_split_matches_js_whitespace() {
        let words = split_into_words("Selah\u{feff}Amen");
        let tokens: Vec<_> = words.iter().map(|w| w.word.as_str()).collect();
        assert_eq!(tokens, vec!["Selah", "Amen"]);
        assert_eq!((words[1].start_index, words[1].end_index), (6, 10));

        let words = split_into_words("Selah\u{85}Amen \u{3000}end");
        let tokens: Vec<_> = words.iter().map(|w| w.word.as_str()).collect();
        assert_eq!(tokens, vec!["Selah\u{85}Amen", "end"]);

        assert!(is_separator('\u{2028}'));
        assert!(!is_separator('\u{200b}'));
    }

    #[test]
    fn test_split_empty() {
        assert!(split_into_words("").is_empty());
        assert!(split_into_words(" \t\n").is_empty());
    }

    #[test]
    fn test_word_indices_to_offsets() {
        let range = word_indices_to_char_offsets(TEXT, Some(2), Some(3)).unwrap();
        assert_eq!(range, CharRange::new(7, 20));
        assert_eq!(&TEXT[range.start..range.end], "beginning God");
    }

    #[test]
    fn test_word_indices_out_of_bounds() {
        assert_eq!(word_indices_to_char_offsets("one two three", Some(50), Some(52)), None);
        assert_eq!(word_indices_to_char_offsets("one two three", Some(0), Some(3)), None);
        assert_eq!(word_indices_to_char_offsets("", Some(0), Some(0)), None);
        assert_eq!(word_indices_to_char_offsets(TEXT, None, Some(1)), None);
    }

    #[test]
    fn test_word_round_trip() {
        let text = "For God so loved the world, that he gave";
        let count = split_into_words(text).len();
        for i in 0..count {
            for j in i..count {
                let range = word_indices_to_char_offsets(text, Some(i), Some(j)).unwrap();
                let slice = &text[range.start..range.end];
                let expected: Vec<_> = split_into_words(text)[i..=j]
                    .iter()
                    .map(|w| w.word.clone())
                    .collect();
                let actual: Vec<_> = split_into_words(slice).into_iter().map(|w| w.word).collect();
                assert_eq!(actual, expected);
            }
        }
    }
}
