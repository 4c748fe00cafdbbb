// Queue Name Filter (wildcard patterns)

use super::error::{DomainError, Result};
use serde::{Deserialize, Serialize};

const WILDCARD: char = '*';

/// How a [`NameFilter`] compares queue names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterMode {
    None,
    Contains,
    SuffixMatch,
    PrefixMatch,
    ExactMatch,
}

/// Parsed queue name filter
///
/// Pattern shapes:
/// - `""` keeps every queue
/// - `*text*` keeps names containing `text`
/// - `*text` keeps names ending with `text`
/// - `text*` keeps names starting with `text`
/// - `text` keeps the name equal to `text`
///
/// Only one `*` is stripped from each end; the remaining text is matched literally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameFilter {
    None,
    Contains(String),
    Suffix(String),
    Prefix(String),
    Exact(String),
}

impl NameFilter {
    /// Parse a raw wildcard pattern
    ///
    /// # Errors
    /// `DomainError::InvalidFilter` when a wildcard pattern has no text left
    /// after stripping the delimiters (e.g. `*` or `**`).
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.is_empty() {
            return Ok(NameFilter::None);
        }

        let leading = raw.starts_with(WILDCARD);
        let trailing = raw.ends_with(WILDCARD);

        let filter = if raw.len() >= 2 && leading && trailing {
            NameFilter::Contains(raw[1..raw.len() - 1].to_string())
        } else if leading {
            NameFilter::Suffix(raw[1..].to_string())
        } else if trailing {
            NameFilter::Prefix(raw[..raw.len() - 1].to_string())
        } else {
            NameFilter::Exact(raw.to_string())
        };

        if filter.pattern().is_empty() {
            return Err(DomainError::InvalidFilter(raw.to_string()));
        }

        Ok(filter)
    }

    pub fn mode(&self) -> FilterMode {
        match self {
            NameFilter::None => FilterMode::None,
            NameFilter::Contains(_) => FilterMode::Contains,
            NameFilter::Suffix(_) => FilterMode::SuffixMatch,
            NameFilter::Prefix(_) => FilterMode::PrefixMatch,
            NameFilter::Exact(_) => FilterMode::ExactMatch,
        }
    }

    /// Effective text (empty for `NameFilter::None`)
    pub fn pattern(&self) -> &str {
        match self {
            NameFilter::None => "",
            NameFilter::Contains(p)
            | NameFilter::Suffix(p)
            | NameFilter::Prefix(p)
            | NameFilter::Exact(p) => p,
        }
    }

    /// Check whether a queue name passes the filter
    pub fn matches(&self, name: &str) -> bool {
        match self {
            NameFilter::None => true,
            NameFilter::Contains(p) => name.contains(p.as_str()),
            NameFilter::Suffix(p) => name.ends_with(p.as_str()),
            NameFilter::Prefix(p) => name.starts_with(p.as_str()),
            NameFilter::Exact(p) => name == p,
        }
    }

    /// Keep matching names, preserving their order
    pub fn apply<I, S>(&self, names: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        names
            .into_iter()
            .map(Into::into)
            .filter(|name| self.matches(name))
            .collect()
    }
}
