//! Per-repository language breakdowns.
//!
//! The platform reports a repository's languages as a JSON object mapping
//! language names to byte counts. [`LanguageBytes`] keeps those entries in
//! the order the platform sent them, which decides ties when picking the
//! primary language.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

/// Byte counts per language for one repository, in platform order.
///
/// # Examples
///
/// ```
/// use orglangs_protocol::LanguageBytes;
///
/// let languages: LanguageBytes = serde_json::from_str(r#"{"Go": 800, "HTML": 200}"#).unwrap();
/// assert_eq!(languages.total_bytes(), 1000);
/// assert_eq!(languages.primary_language(), Some("Go"));
/// assert_eq!(languages.percentage("HTML"), 20.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageBytes {
    entries: Vec<(String, u64)>,
}

impl LanguageBytes {
    /// Creates an empty breakdown.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `bytes` for `language`.
    ///
    /// A language seen again keeps its original position and takes the new
    /// count, matching how a JSON object with a repeated key is read.
    pub fn insert(&mut self, language: impl Into<String>, bytes: u64) {
        let language = language.into();
        match self.entries.iter_mut().find(|(name, _)| *name == language) {
            Some(entry) => entry.1 = bytes,
            None => self.entries.push((language, bytes)),
        }
    }

    /// Returns the number of languages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no language was reported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(language, bytes)` pairs in platform order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(name, bytes)| (name.as_str(), *bytes))
    }

    /// Iterates over language names in platform order.
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Returns the byte count recorded for `language`, if any.
    #[must_use]
    pub fn get(&self, language: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|(name, _)| name == language)
            .map(|(_, bytes)| *bytes)
    }

    /// Returns the sum of all byte counts.
    #[must_use]
    pub fn total_bytes(&self) -> u64 {
        self.entries
            .iter()
            .fold(0u64, |total, (_, bytes)| total.saturating_add(*bytes))
    }

    /// Returns the language with the most bytes.
    ///
    /// Ties go to the language that appears first. Returns `None` when the
    /// breakdown is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use orglangs_protocol::LanguageBytes;
    ///
    /// let languages: LanguageBytes = [("Rust", 10), ("C", 10)].into_iter().collect();
    /// assert_eq!(languages.primary_language(), Some("Rust"));
    /// assert_eq!(LanguageBytes::new().primary_language(), None);
    /// ```
    #[must_use]
    pub fn primary_language(&self) -> Option<&str> {
        let mut best: Option<&(String, u64)> = None;
        for entry in &self.entries {
            if best.is_none_or(|current| entry.1 > current.1) {
                best = Some(entry);
            }
        }
        best.map(|(name, _)| name.as_str())
    }

    /// Returns the share of `language` in percent, rounded to two decimals.
    ///
    /// Unknown languages and breakdowns with zero total bytes yield `0.0`.
    #[must_use]
    pub fn percentage(&self, language: &str) -> f64 {
        self.get(language)
            .map_or(0.0, |bytes| round_percentage(bytes, self.total_bytes()))
    }
}

/// Computes `bytes / total * 100`, rounded to two decimals.
///
/// Exact ties round to the even digit, so `1 / 32` gives `3.12`. Returns
/// `0.0` when `total` is zero.
///
/// # Examples
///
/// ```
/// use orglangs_protocol::language::round_percentage;
///
/// assert_eq!(round_percentage(1, 3), 33.33);
/// assert_eq!(round_percentage(2, 3), 66.67);
/// assert_eq!(round_percentage(1, 32), 3.12);
/// assert_eq!(round_percentage(5, 0), 0.0);
/// ```
#[must_use]
pub fn round_percentage(bytes: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let percent = bytes as f64 / total as f64 * 100.0;
    // Formatting rounds exact ties to even, scaling by 100 first would not.
    format!("{percent:.2}").parse().unwrap_or(percent)
}

impl<S: Into<String>> FromIterator<(S, u64)> for LanguageBytes {
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        let mut languages = Self::new();
        for (name, bytes) in iter {
            languages.insert(name, bytes);
        }
        languages
    }
}

impl<'de> Deserialize<'de> for LanguageBytes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct LanguageBytesVisitor;

        impl<'de> Visitor<'de> for LanguageBytesVisitor {
            type Value = LanguageBytes;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of language names to byte counts")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut languages = LanguageBytes {
                    entries: Vec::with_capacity(access.size_hint().unwrap_or(0)),
                };
                while let Some((name, bytes)) = access.next_entry::<String, u64>()? {
                    languages.insert(name, bytes);
                }
                Ok(languages)
            }
        }

        deserializer.deserialize_map(LanguageBytesVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_preserves_platform_order() {
        let json = r#"{"TypeScript": 5, "CSS": 9, "Astro": 1}"#;
        let languages: LanguageBytes = serde_json::from_str(json).unwrap();
        let names: Vec<_> = languages.languages().collect();
        assert_eq!(names, ["TypeScript", "CSS", "Astro"]);
    }

    #[test]
    fn deserialize_empty_object() {
        let languages: LanguageBytes = serde_json::from_str("{}").unwrap();
        assert!(languages.is_empty());
        assert_eq!(languages.total_bytes(), 0);
        assert_eq!(languages.primary_language(), None);
    }

    #[test]
    fn deserialize_rejects_negative_counts() {
        let result: Result<LanguageBytes, _> = serde_json::from_str(r#"{"Go": -1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn deserialize_rejects_non_object() {
        let result: Result<LanguageBytes, _> = serde_json::from_str("[1, 2]");
        assert!(result.is_err());
    }

    #[test]
    fn insert_repeated_language_keeps_position() {
        let mut languages = LanguageBytes::new();
        languages.insert("Go", 1);
        languages.insert("C", 2);
        languages.insert("Go", 7);
        assert_eq!(languages.iter().collect::<Vec<_>>(), [("Go", 7), ("C", 2)]);
    }

    #[test]
    fn primary_language_is_argmax() {
        let languages: LanguageBytes = [("Shell", 10), ("Go", 800), ("HTML", 200)]
            .into_iter()
            .collect();
        assert_eq!(languages.primary_language(), Some("Go"));
    }

    #[test]
    fn primary_language_tie_goes_to_first() {
        let languages: LanguageBytes = [("HTML", 50), ("CSS", 50)].into_iter().collect();
        assert_eq!(languages.primary_language(), Some("HTML"));
    }

    #[test]
    fn primary_language_with_zero_bytes() {
        let languages: LanguageBytes = [("Text", 0)].into_iter().collect();
        assert_eq!(languages.primary_language(), Some("Text"));
        assert_eq!(languages.percentage("Text"), 0.0);
    }

    #[test]
    fn percentage_of_unknown_language_is_zero() {
        let languages: LanguageBytes = [("Go", 500)].into_iter().collect();
        assert_eq!(languages.percentage("Go"), 100.0);
        assert_eq!(languages.percentage("HTML"), 0.0);
    }

    #[test]
    fn round_percentage_two_decimals() {
        assert_eq!(round_percentage(800, 1000), 80.0);
        assert_eq!(round_percentage(1, 6), 16.67);
        assert_eq!(round_percentage(0, 10), 0.0);
        assert_eq!(round_percentage(10, 10), 100.0);
    }

    #[test]
    fn round_percentage_ties_to_even() {
        assert_eq!(round_percentage(1, 32), 3.12);
        assert_eq!(round_percentage(5, 32), 15.62);
        assert_eq!(round_percentage(3, 32), 9.38);
        assert_eq!(round_percentage(31, 32), 96.88);
        assert_eq!(round_percentage(1, 8), 12.5);
    }
}
