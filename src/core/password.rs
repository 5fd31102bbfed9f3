//! ASCII password representation
//!
//! Edits are generated byte-wise, so every password is reduced to its ASCII bytes first.

use std::fmt;

/// A password reduced to ASCII
///
/// Non-ASCII characters are dropped on construction. This is a best-effort
/// decode: it never fails, it only loses the characters it cannot represent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Password {
    text: String,
}

impl Password {
    /// Create a password, dropping any non-ASCII characters
    ///
    /// # Examples
    /// ```
    /// use typo_cover::core::Password;
    ///
    /// assert_eq!(Password::new("pässwörd").text(), "psswrd");
    /// assert_eq!(Password::new("hunter2").text(), "hunter2");
    /// ```
    pub fn new(text: impl AsRef<str>) -> Self {
        let text = text.as_ref().chars().filter(char::is_ascii).collect();
        Self { text }
    }

    /// Get the password as a string slice
    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the password as ASCII bytes
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }

    /// Length in characters (equal to bytes, all ASCII)
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Whether the password is long enough to be submitted as a guess
    #[inline]
    #[must_use]
    pub fn is_eligible(&self, min_length: usize) -> bool {
        self.len() >= min_length
    }
}

impl From<&str> for Password {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl fmt::Display for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}
