//! The organization-wide set of languages that becomes the report's columns.
//!
//! Discovery happens in two stages:
//!
//! 1. A [`LanguageVocabulary`] grows while language breakdowns are observed.
//! 2. [`LanguageVocabulary::freeze`] turns it into a [`FrozenVocabulary`]
//!    whose order and size never change again.
//!
//! Only the frozen form can be used to build headers and rows, so the column
//! set cannot shift once the header has been written.

use std::collections::BTreeSet;

use crate::language::LanguageBytes;

/// Suffix appended to each language column label.
pub const PERCENT_SUFFIX: &str = " (%)";

/// A growing set of language names.
///
/// # Examples
///
/// ```
/// use orglangs_protocol::{LanguageBytes, LanguageVocabulary};
///
/// let mut vocabulary = LanguageVocabulary::new();
/// let a: LanguageBytes = [("Go", 800), ("HTML", 200)].into_iter().collect();
/// let b: LanguageBytes = [("Go", 500)].into_iter().collect();
///
/// assert_eq!(vocabulary.observe(&a), 2);
/// assert_eq!(vocabulary.observe(&b), 0);
///
/// let frozen = vocabulary.freeze();
/// assert_eq!(frozen.languages(), ["Go", "HTML"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageVocabulary {
    languages: BTreeSet<String>,
}

impl LanguageVocabulary {
    /// Creates an empty vocabulary.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds every language of a breakdown, returning how many were new.
    pub fn observe(&mut self, languages: &LanguageBytes) -> usize {
        languages
            .languages()
            .filter(|name| self.languages.insert((*name).to_string()))
            .count()
    }

    /// Returns the number of distinct languages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.languages.len()
    }

    /// Returns `true` if nothing has been observed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }

    /// Fixes the column set, sorted by code point.
    #[must_use]
    pub fn freeze(self) -> FrozenVocabulary {
        FrozenVocabulary {
            languages: self.languages.into_iter().collect(),
        }
    }
}

impl<S: Into<String>> FromIterator<S> for LanguageVocabulary {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            languages: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// The sorted, immutable list of report columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrozenVocabulary {
    languages: Vec<String>,
}

impl FrozenVocabulary {
    /// Returns the languages in column order.
    #[must_use]
    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    /// Returns the number of language columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.languages.len()
    }

    /// Returns `true` if there are no language columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }

    /// Returns the column labels, e.g. `"Go (%)"`.
    pub fn column_labels(&self) -> impl Iterator<Item = String> + '_ {
        self.languages
            .iter()
            .map(|language| format!("{language}{PERCENT_SUFFIX}"))
    }
}
