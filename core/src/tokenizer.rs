use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref CONTROL_CHARS: Regex = Regex::new(r"[\x00-\x1F]").expect("valid regex");
}

/// Split text on ASCII spaces, dropping empty tokens. No other normalization is applied,
/// so case, punctuation and non-space whitespace stay part of the token.
pub fn split_words(text: &str) -> Vec<&str> {
    text.split(' ').filter(|w| !w.is_empty()).collect()
}

/// A word is valid when it carries no control characters (U+0000..=U+001F).
pub fn is_valid_word(word: &str) -> bool {
    !CONTROL_CHARS.is_match(word)
}
