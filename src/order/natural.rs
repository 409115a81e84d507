// src/order/natural.rs

//! Natural ("human") ordering of file and directory names.
//!
//! A name is split into alternating text and digit segments. Text segments
//! compare case-insensitively, digit segments compare by integer value, so
//! `task2` sorts before `task10`.

use std::cmp::Ordering;
use std::sync::LazyLock;

use regex::Regex;

static DIGITS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("[0-9]+").expect("digit pattern is a valid regex")
});

/// One segment of a [`NaturalKey`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Lower-cased non-digit run (possibly empty).
    Text(String),
    /// Digit run with leading zeros stripped, compared by value.
    Number(String),
}

impl Segment {
    fn number(digits: &str) -> Self {
        let trimmed = digits.trim_start_matches('0');
        Segment::Number(if trimmed.is_empty() { "0" } else { trimmed }.to_string())
    }
}

impl Ord for Segment {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Segment::Text(a), Segment::Text(b)) => a.cmp(b),
            // Arbitrary-length integers: fewer digits is smaller, then by digit.
            (Segment::Number(a), Segment::Number(b)) => {
                a.len().cmp(&b.len()).then_with(|| a.cmp(b))
            }
            // Keys built by `natural_key` alternate identically, so segments at
            // the same index always share a kind. Ordered only for totality.
            (Segment::Number(_), Segment::Text(_)) => Ordering::Less,
            (Segment::Text(_), Segment::Number(_)) => Ordering::Greater,
        }
    }
}

impl PartialOrd for Segment {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Sort key for natural ordering.
///
/// Always starts with a (possibly empty) text segment, followed by
/// alternating number and text segments.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct NaturalKey(Vec<Segment>);

impl NaturalKey {
    pub fn segments(&self) -> &[Segment] {
        &self.0
    }
}

/// Build the natural sort key for `name`.
pub fn natural_key(name: &str) -> NaturalKey {
    let mut segments = Vec::new();
    let mut last = 0;

    for m in DIGITS.find_iter(name) {
        segments.push(Segment::Text(name[last..m.start()].to_lowercase()));
        segments.push(Segment::number(m.as_str()));
        last = m.end();
    }
    segments.push(Segment::Text(name[last..].to_lowercase()));

    NaturalKey(segments)
}

/// Compare two names naturally, breaking ties on the raw string so that
/// e.g. `02-a` and `2-a` still have a fixed relative order.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    natural_key(a).cmp(&natural_key(b)).then_with(|| a.cmp(b))
}

/// Stable in-place natural sort of `items` by the name returned from `name`.
pub fn sort_natural_by<T, F>(items: &mut [T], name: F)
where
    F: Fn(&T) -> &str,
{
    items.sort_by_cached_key(|item| {
        let raw = name(item);
        (natural_key(raw), raw.to_string())
    });
}
