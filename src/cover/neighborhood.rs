//! Edit neighborhood generation
//!
//! The neighbors of a password are the strings one cheap typo away from it:
//! case changes on the first character, and single-character insertions,
//! substitutions, appends and deletions.
//!
//! # Order
//! For a password `w` of length `n` and alphabet `A`, [`neighbors`] yields:
//! 1. `w` capitalized (first character upper-cased, the rest lower-cased)
//! 2. `w` with the first character upper-cased
//! 3. `w` with the first character lower-cased
//! 4. for each `c` in `A`: for each `i` in `0..n` the insertion of `c` at `i`
//!    then the substitution of `c` at `i`; then `w` with `c` appended
//! 5. for each `i` in `0..n`, `w` without its `i`-th character
//!
//! Duplicates are expected and nothing is filtered by length; callers dedup
//! and apply the length policy themselves.

use crate::core::Password;
use rustc_hash::FxHashSet;

const DIGITS: &str = "0123456789";
const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const PUNCTUATION: &str = r##"!"#$%&'()*+,-./:;<=>?@[\]^_`{|}~"##;

/// Ordered set of ASCII characters available to insertions and substitutions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    chars: Vec<u8>,
}

impl Alphabet {
    /// Build an alphabet from the characters of `chars`
    ///
    /// Non-ASCII characters and repeats are dropped; first occurrence order is kept.
    ///
    /// # Examples
    /// ```
    /// use typo_cover::cover::Alphabet;
    ///
    /// let alphabet = Alphabet::new("abca€");
    /// assert_eq!(alphabet.len(), 3);
    /// ```
    pub fn new(chars: impl AsRef<str>) -> Self {
        let mut seen = [false; 128];
        let chars = chars
            .as_ref()
            .bytes()
            .filter(|&b| b.is_ascii() && !std::mem::replace(&mut seen[usize::from(b)], true))
            .collect();
        Self { chars }
    }

    /// Printable ASCII without the tab, newline, carriage return,
    /// vertical tab and form feed characters (95 characters, space included)
    #[must_use]
    pub fn printable() -> Self {
        Self::new([DIGITS, LOWERCASE, UPPERCASE, PUNCTUATION, " "].concat())
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, c: u8) -> bool {
        self.chars.contains(&c)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.chars
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::printable()
    }
}

/// Generate the edit neighborhood of a password
///
/// The returned iterator is lazy, finite and side-effect free; calling
/// `neighbors` again (or cloning the iterator) restarts the same sequence.
///
/// # Examples
/// ```
/// use typo_cover::core::Password;
/// use typo_cover::cover::{Alphabet, neighbors};
///
/// let alphabet = Alphabet::new("x");
/// let edits: Vec<String> = neighbors(&Password::new("ab"), &alphabet).collect();
///
/// assert_eq!(
///     edits,
///     vec!["Ab", "Ab", "ab", "xab", "xb", "axb", "ax", "abx", "b", "a"]
/// );
/// ```
#[must_use]
pub fn neighbors<'a>(password: &Password, alphabet: &'a Alphabet) -> Neighbors<'a> {
    Neighbors {
        word: password.text().to_string(),
        alphabet: alphabet.as_bytes(),
        stage: Stage::Capitalize,
    }
}

/// Distinct eligible neighbors, in first-occurrence order
///
/// Skips anything shorter than `min_length` and anything in `exclude`.
pub fn distinct_neighbors(
    password: &Password,
    alphabet: &Alphabet,
    min_length: usize,
    exclude: &FxHashSet<String>,
) -> Vec<String> {
    let mut seen = FxHashSet::default();
    neighbors(password, alphabet)
        .filter(|edit| edit.len() >= min_length && !exclude.contains(edit))
        .filter(|edit| seen.insert(edit.clone()))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Capitalize,
    UpperFirst,
    LowerFirst,
    /// `slot` walks `0..=2n`: even slots insert, odd slots substitute, `2n` appends
    Edit { letter: usize, slot: usize },
    Delete(usize),
    Done,
}

/// Lazy iterator over the edit neighborhood of one password
#[derive(Debug, Clone)]
pub struct Neighbors<'a> {
    // ASCII only, so byte offsets are char boundaries
    word: String,
    alphabet: &'a [u8],
    stage: Stage,
}

impl Neighbors<'_> {
    fn with_first(&self, first: char) -> String {
        let mut edit = String::with_capacity(self.word.len());
        edit.push(first);
        edit.push_str(&self.word[1..]);
        edit
    }

    fn splice(&self, at: usize, skip: usize, insert: Option<char>) -> String {
        let mut edit = String::with_capacity(self.word.len() + 1);
        edit.push_str(&self.word[..at]);
        if let Some(c) = insert {
            edit.push(c);
        }
        edit.push_str(&self.word[at + skip..]);
        edit
    }
}

impl Iterator for Neighbors<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let len = self.word.len();
        loop {
            match self.stage {
                Stage::Capitalize => {
                    self.stage = Stage::UpperFirst;
                    let mut edit = self.word.to_ascii_lowercase();
                    if let Some(first) = edit.get_mut(..1) {
                        first.make_ascii_uppercase();
                    }
                    return Some(edit);
                }
                Stage::UpperFirst => {
                    self.stage = Stage::LowerFirst;
                    if let Some(first) = self.word.chars().next() {
                        return Some(self.with_first(first.to_ascii_uppercase()));
                    }
                }
                Stage::LowerFirst => {
                    self.stage = Stage::Edit { letter: 0, slot: 0 };
                    if let Some(first) = self.word.chars().next() {
                        return Some(self.with_first(first.to_ascii_lowercase()));
                    }
                }
                Stage::Edit { letter, slot } => {
                    let Some(&c) = self.alphabet.get(letter) else {
                        self.stage = Stage::Delete(0);
                        continue;
                    };
                    self.stage = if slot < 2 * len {
                        Stage::Edit {
                            letter,
                            slot: slot + 1,
                        }
                    } else {
                        Stage::Edit {
                            letter: letter + 1,
                            slot: 0,
                        }
                    };
                    let c = char::from(c);
                    return Some(if slot == 2 * len {
                        self.splice(len, 0, Some(c))
                    } else if slot % 2 == 0 {
                        self.splice(slot / 2, 0, Some(c))
                    } else {
                        self.splice(slot / 2, 1, Some(c))
                    });
                }
                Stage::Delete(i) => {
                    if i < len {
                        self.stage = Stage::Delete(i + 1);
                        return Some(self.splice(i, 1, None));
                    }
                    self.stage = Stage::Done;
                }
                Stage::Done => return None,
            }
        }
    }
}
