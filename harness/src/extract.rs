//! Metric extraction from benchmark output
//!
//! The benchmark executable prints human-formatted figures such as
//! `Updates per second: 1,234,567`. Each metric has its own marker and its
//! own accessor so a change in the executable's wording stays local.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static UPDATES_PER_SEC_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Updates per second").unwrap());

// The benchmark binary historically prints "Hasher per second".
static HASHES_PER_SEC_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Hashe[sr] per second").unwrap());

static NUM_HASHES_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"hashes computed").unwrap());

static EXPONENTIATION_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Average time per exponentiation").unwrap());

/// Characters used for digit grouping in human-formatted numbers
const THOUSANDS_SEPARATORS: &[char] = &[',', '_', '\''];

/// Figures scraped from one successful run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metrics {
    pub upds_per_sec: Option<u64>,
    pub hashes_per_sec: Option<u64>,
    pub num_hashes: Option<u64>,
    /// Duration with units, kept verbatim
    pub exponentiation_time: Option<String>,
}

impl Metrics {
    /// Whether any figure was found
    pub fn is_empty(&self) -> bool {
        self.upds_per_sec.is_none()
            && self.hashes_per_sec.is_none()
            && self.num_hashes.is_none()
            && self.exponentiation_time.is_none()
    }
}

/// Scans captured output for the benchmark's textual markers.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricExtractor;

impl MetricExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract every metric. Missing markers leave the field empty.
    pub fn extract(&self, output: &str) -> Metrics {
        Metrics {
            upds_per_sec: self.updates_per_sec(output),
            hashes_per_sec: self.hashes_per_sec(output),
            num_hashes: self.num_hashes(output),
            exponentiation_time: self.exponentiation_time(output),
        }
    }

    pub fn updates_per_sec(&self, output: &str) -> Option<u64> {
        integer_after(&UPDATES_PER_SEC_MARKER, output)
    }

    pub fn hashes_per_sec(&self, output: &str) -> Option<u64> {
        integer_after(&HASHES_PER_SEC_MARKER, output)
    }

    pub fn num_hashes(&self, output: &str) -> Option<u64> {
        integer_after(&NUM_HASHES_MARKER, output)
    }

    pub fn exponentiation_time(&self, output: &str) -> Option<String> {
        let (_, rest) = first_marker_line(&EXPONENTIATION_MARKER, output)?;
        let value = rest
            .trim_start_matches(|c: char| c == ':' || c.is_whitespace())
            .trim_end();
        (!value.is_empty()).then(|| value.to_string())
    }
}

/// First line containing the marker, split into (line, text after marker)
fn first_marker_line<'a>(marker: &Regex, output: &'a str) -> Option<(&'a str, &'a str)> {
    output.lines().find_map(|line| {
        marker
            .find(line)
            .map(|found| (line, &line[found.end()..]))
    })
}

/// Integer on the first marker line. Digits after the marker are preferred;
/// a number printed before the marker is used otherwise.
fn integer_after(marker: &Regex, output: &str) -> Option<u64> {
    let (line, rest) = first_marker_line(marker, output)?;
    digits_of(rest).or_else(|| digits_of(line))
}

/// Drop separators, keep decimal digits, parse.
fn digits_of(text: &str) -> Option<u64> {
    let digits: String = text
        .chars()
        .filter(|c| !THOUSANDS_SEPARATORS.contains(c))
        .filter(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}
