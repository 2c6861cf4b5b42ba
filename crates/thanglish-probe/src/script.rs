//! Tamil script detection for extracted output.
//!
//! Detection is deliberately narrow: only the independent vowels and
//! consonants `அ` (U+0B85) through `ஹ` (U+0BB9) count. Vowel signs, the
//! virama, and Tamil digits never make a string "Tamil" on their own.

use std::ops::RangeInclusive;

/// Tamil letters recognised by [`contains_tamil_script`]
pub const TAMIL_LETTERS: RangeInclusive<char> = '\u{0B85}'..='\u{0BB9}';

/// Whether `c` is a Tamil letter (`அ`..=`ஹ`)
#[must_use]
pub fn is_tamil_letter(c: char) -> bool {
    TAMIL_LETTERS.contains(&c)
}

/// True iff any character of `text` is a Tamil letter.
///
/// ```
/// use thanglish_probe::contains_tamil_script;
///
/// assert!(contains_tamil_script("நான் varala"));
/// assert!(!contains_tamil_script("naan varala"));
/// assert!(!contains_tamil_script(""));
/// ```
#[must_use]
pub fn contains_tamil_script(text: &str) -> bool {
    text.chars().any(is_tamil_letter)
}

/// Number of Tamil letters in `text`
#[must_use]
pub fn tamil_letter_count(text: &str) -> usize {
    text.chars().filter(|&c| is_tamil_letter(c)).count()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_range_bounds() {
        assert!(is_tamil_letter('அ'));
        assert!(is_tamil_letter('ஹ'));
        assert!(is_tamil_letter('க'));
        assert!(!is_tamil_letter('\u{0B84}'));
        assert!(!is_tamil_letter('\u{0BBA}'));
    }

    #[test]
    fn test_signs_and_digits_are_not_letters() {
        // virama, vowel sign aa, Tamil digit one
        assert!(!contains_tamil_script("\u{0BCD}\u{0BBE}\u{0BE7}"));
    }

    #[test]
    fn test_mixed_output() {
        assert!(contains_tamil_script("நான் நேற்று exam எழுதினேன்"));
        assert!(!contains_tamil_script("Rs. 1200 😄 你好"));
        assert_eq!(tamil_letter_count("காலை"), 2);
        assert_eq!(tamil_letter_count("amma"), 0);
    }

    proptest! {
        /// ASCII never contains Tamil script
        #[test]
        fn prop_ascii_is_never_tamil(s in "[ -~]{0,64}") {
            prop_assert!(!contains_tamil_script(&s));
        }

        /// Appending one Tamil letter to anything makes it Tamil
        #[test]
        fn prop_tamil_letter_dominates(s in ".{0,32}", c in proptest::char::range('\u{0B85}', '\u{0BB9}')) {
            let text = format!("{s}{c}");
            prop_assert!(contains_tamil_script(&text));
            prop_assert!(tamil_letter_count(&text) >= 1);
        }

        /// Detection agrees with the letter count
        #[test]
        fn prop_detection_matches_count(s in "\\PC{0,64}") {
            prop_assert_eq!(contains_tamil_script(&s), tamil_letter_count(&s) > 0);
        }
    }
}
