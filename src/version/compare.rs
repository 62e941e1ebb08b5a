//! Loose version ordering
//!
//! Version strings are split into alternating runs of digits and non-digits.
//! Runs are compared pairwise: digit runs by numeric value, everything else
//! lexically. When every compared run is equal the string with fewer runs
//! sorts first, so "1.0" < "1.0.1" and "1.9" < "1.10".

use std::cmp::Ordering;

#[derive(Debug, Clone, Copy)]
enum Segment<'a> {
    Number(&'a str),
    Text(&'a str),
}

impl Ord for Segment<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Segment::Number(a), Segment::Number(b)) => compare_numeric(a, b),
            (Segment::Text(a), Segment::Text(b)) => a.cmp(b),
            (Segment::Number(_), Segment::Text(_)) => Ordering::Less,
            (Segment::Text(_), Segment::Number(_)) => Ordering::Greater,
        }
    }
}

impl PartialEq for Segment<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Segment<'_> {}

impl PartialOrd for Segment<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Compares two digit runs by value without parsing, so runs of any length work.
fn compare_numeric(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn segments(version: &str) -> Vec<Segment<'_>> {
    let mut result = Vec::new();
    let mut start = 0;
    let mut in_digits = None;

    for (idx, ch) in version.char_indices() {
        let is_digit = ch.is_ascii_digit();
        match in_digits {
            Some(prev) if prev != is_digit => {
                result.push(segment(&version[start..idx], prev));
                start = idx;
            }
            _ => {}
        }
        in_digits = Some(is_digit);
    }

    if let Some(is_digit) = in_digits {
        result.push(segment(&version[start..], is_digit));
    }

    result
}

fn segment(run: &str, is_digit: bool) -> Segment<'_> {
    if is_digit {
        Segment::Number(run)
    } else {
        Segment::Text(run)
    }
}

/// Orders two version strings loosely. Accepts arbitrary input.
pub fn compare_loose(a: &str, b: &str) -> Ordering {
    segments(a).cmp(&segments(b))
}

/// Stable ascending sort using [`compare_loose`]
pub fn sort_versions(versions: &mut [String]) {
    versions.sort_by(|a, b| compare_loose(a, b));
}
