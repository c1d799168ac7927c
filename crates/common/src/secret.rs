//! Secret wrapper for API secrets, passwords and tokens

use std::fmt;
use std::path::Path;
use zeroize::Zeroize;

/// Sensitive value: redacted in Debug/Display and wiped on drop.
pub struct Secret<T: Zeroize>(T);

impl<T: Zeroize> Secret<T> {
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// Expose the inner value (use sparingly)
    pub fn expose(&self) -> &T {
        &self.0
    }
}

impl Secret<String> {
    /// Read a secret from an environment variable. Unset or empty yields `None`.
    pub fn from_env(key: &str) -> Option<Self> {
        std::env::var(key)
            .ok()
            .filter(|value| !value.is_empty())
            .map(Self)
    }

    /// Read a secret file, trimming surrounding whitespace.
    ///
    /// A file containing only whitespace yields `None`; a missing or
    /// unreadable file is an error naming the path.
    pub fn from_file(path: &Path) -> crate::Result<Option<Self>> {
        let mut contents =
            std::fs::read_to_string(path).map_err(|e| crate::Error::io(path, e))?;
        let trimmed = contents.trim();
        let secret = (!trimmed.is_empty()).then(|| Self(trimmed.to_owned()));
        contents.zeroize();
        Ok(secret)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for Secret<String> {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl<T: Zeroize> From<T> for Secret<T> {
    fn from(value: T) -> Self {
        Self(value)
    }
}

impl<T: Zeroize> fmt::Debug for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl<T: Zeroize> fmt::Display for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl<T: Zeroize> Drop for Secret<T> {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl<T: Zeroize + Clone> Clone for Secret<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}
