use alloc::collections::BTreeSet;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

/// The movie a round is played against.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Secret {
    title: String,
    plot: Option<String>,
    poster_url: String,
    year: Option<String>,
}

impl Secret {
    pub fn new(
        title: impl Into<String>,
        plot: Option<String>,
        poster_url: impl Into<String>,
        year: Option<String>,
    ) -> core::result::Result<Self, FetchError> {
        let title = title.into();
        if NormalizedTitle::new(&title).is_empty() {
            return Err(FetchError::EmptyTitle);
        }

        Ok(Self {
            title,
            plot: plot.filter(|plot| !plot.trim().is_empty()),
            poster_url: poster_url.into(),
            year: year.filter(|year| !year.trim().is_empty()),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn plot(&self) -> Option<&str> {
        self.plot.as_deref()
    }

    /// Empty when the catalog has no poster.
    pub fn poster_url(&self) -> &str {
        &self.poster_url
    }

    pub fn year(&self) -> Option<&str> {
        self.year.as_deref()
    }

    pub fn normalized_title(&self) -> NormalizedTitle {
        NormalizedTitle::new(&self.title)
    }

    pub fn redacted_plot(&self) -> Option<Vec<PlotSegment>> {
        self.plot().map(|plot| redact_plot(plot, &self.title))
    }
}

/// Title reduced to its upper-case ASCII letters, one per input slot.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NormalizedTitle(String);

impl NormalizedTitle {
    pub fn new(raw: &str) -> Self {
        Self(
            raw.chars()
                .filter(char::is_ascii_alphabetic)
                .map(|ch| ch.to_ascii_uppercase())
                .collect(),
        )
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of input slots; every char is ASCII so bytes and chars agree.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.0.chars()
    }

    /// Distinct letters of the title, lower-cased.
    pub fn unique_letters(&self) -> BTreeSet<char> {
        self.0.chars().map(|ch| ch.to_ascii_lowercase()).collect()
    }
}

impl fmt::Display for NormalizedTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlotSegment {
    Text(String),
    /// An occurrence of the title, hidden from the player.
    Redacted,
}

/// Splits `plot` around every case-insensitive occurrence of `title`.
pub fn redact_plot(plot: &str, title: &str) -> Vec<PlotSegment> {
    let needle = title.trim().to_ascii_lowercase();
    if needle.is_empty() {
        return alloc::vec![PlotSegment::Text(plot.to_string())];
    }

    // ASCII lower-casing keeps byte offsets aligned with `plot`
    let haystack = plot.to_ascii_lowercase();
    let mut segments = Vec::new();
    let mut start = 0;
    while let Some(offset) = haystack[start..].find(&needle) {
        let found = start + offset;
        if found > start {
            segments.push(PlotSegment::Text(plot[start..found].to_string()));
        }
        segments.push(PlotSegment::Redacted);
        start = found + needle.len();
    }
    if start < plot.len() {
        segments.push(PlotSegment::Text(plot[start..].to_string()));
    }
    segments
}
