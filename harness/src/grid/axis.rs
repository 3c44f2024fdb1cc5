//! Grid axis values and the skip-marker convention.
//!
//! An axis value written with a leading marker (`#4`) stays in the
//! configuration but is resolved here, once, into [`AxisEntry::Skipped`].

use crate::error::{SweepError, SweepResult};
use crate::types::Axis;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Marker used when none is configured
pub const DEFAULT_SKIP_MARKER: char = '#';

/// One value on a grid axis, resolved against the skip marker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisEntry {
    Active(u64),
    /// Underlying text with the marker stripped, kept for diagnostics
    Skipped(String),
}

impl AxisEntry {
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped(_))
    }
}

/// A grid-axis value excluded from execution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkipDirective {
    pub axis: Axis,
    pub value: String,
    pub marker: char,
}

impl fmt::Display for SkipDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Skipping {} {} (marked with '{}')",
            self.axis, self.value, self.marker
        )
    }
}

/// Parse a single raw axis value.
pub fn parse_entry(raw: &str, axis: Axis, marker: char) -> SweepResult<AxisEntry> {
    let trimmed = raw.trim();
    if let Some(rest) = trimmed.strip_prefix(marker) {
        return Ok(AxisEntry::Skipped(rest.trim().to_string()));
    }

    let value = parse_count(trimmed)
        .map_err(|reason| SweepError::invalid_axis(axis.to_string(), trimmed, reason))?;
    if value == 0 {
        return Err(SweepError::invalid_axis(
            axis.to_string(),
            trimmed,
            "must be a positive integer",
        ));
    }
    Ok(AxisEntry::Active(value))
}

/// Parse every value of an axis, preserving order.
pub fn parse_entries<'a, I>(raw: I, axis: Axis, marker: char) -> SweepResult<Vec<AxisEntry>>
where
    I: IntoIterator<Item = &'a str>,
{
    raw.into_iter()
        .map(|value| parse_entry(value, axis, marker))
        .collect()
}

/// Parse a list such as `"2 #4 8"` or `"2,#4,8"`.
///
/// Commas separate values here; they are not digit grouping. A bare marker
/// token (`"# 4"`) applies to the token after it.
pub fn parse_list(list: &str, axis: Axis, marker: char) -> SweepResult<Vec<AxisEntry>> {
    let mut tokens = Vec::new();
    let mut pending_marker = false;
    let separated = list
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty());
    for token in separated {
        if token.len() == marker.len_utf8() && token.starts_with(marker) {
            pending_marker = true;
            continue;
        }
        if pending_marker {
            tokens.push(format!("{marker}{token}"));
            pending_marker = false;
        } else {
            tokens.push(token.to_string());
        }
    }
    if pending_marker {
        return Err(SweepError::invalid_axis(
            axis.to_string(),
            marker.to_string(),
            "skip marker with no value after it",
        ));
    }
    parse_entries(tokens.iter().map(String::as_str), axis, marker)
}

/// Parse a count written as `1000000`, `1_000_000`, `1,000,000` or `1e6`.
pub fn parse_count(raw: &str) -> Result<u64, String> {
    let cleaned: String = raw.chars().filter(|c| *c != '_' && *c != ',').collect();
    if cleaned.is_empty() {
        return Err("empty value".to_string());
    }

    if let Some((mantissa, exponent)) = cleaned.split_once(['e', 'E']) {
        let mantissa: u64 = mantissa
            .parse()
            .map_err(|_| format!("bad mantissa '{mantissa}'"))?;
        let exponent: u32 = exponent
            .parse()
            .map_err(|_| format!("bad exponent '{exponent}'"))?;
        return 10u64
            .checked_pow(exponent)
            .and_then(|scale| mantissa.checked_mul(scale))
            .ok_or_else(|| "value overflows u64".to_string());
    }

    cleaned
        .parse()
        .map_err(|_| "not a non-negative integer".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_count_forms() {
        assert_eq!(parse_count("1000000"), Ok(1_000_000));
        assert_eq!(parse_count("1_000_000"), Ok(1_000_000));
        assert_eq!(parse_count("1,000,000"), Ok(1_000_000));
        assert_eq!(parse_count("1e6"), Ok(1_000_000));
        assert_eq!(parse_count("2E9"), Ok(2_000_000_000));
        assert!(parse_count("").is_err());
        assert!(parse_count("-4").is_err());
        assert!(parse_count("1e30").is_err());
    }

    #[test]
    fn test_marker_is_stripped_and_trimmed() {
        let entry = parse_entry("#  16 ", Axis::Arity, '#').unwrap();
        assert_eq!(entry, AxisEntry::Skipped("16".to_string()));
    }

    #[test]
    fn test_skipped_values_are_not_validated() {
        let entry = parse_entry("#oops", Axis::Arity, '#').unwrap();
        assert!(entry.is_skipped());
    }

    #[test]
    fn test_zero_rejected() {
        let err = parse_entry("0", Axis::Arity, '#').unwrap_err();
        assert!(err.is_config());
        assert!(err.to_string().contains("arity"));
    }

    #[test]
    fn test_parse_list_order_and_markers() {
        let entries = parse_list("2 #4 8", Axis::Arity, '#').unwrap();
        assert_eq!(
            entries,
            vec![
                AxisEntry::Active(2),
                AxisEntry::Skipped("4".to_string()),
                AxisEntry::Active(8),
            ]
        );
    }

    #[test]
    fn test_parse_list_detached_marker() {
        let entries = parse_list("# 4 16", Axis::Arity, '#').unwrap();
        assert_eq!(
            entries,
            vec![AxisEntry::Skipped("4".to_string()), AxisEntry::Active(16)]
        );
    }

    #[test]
    fn test_parse_list_commas_separate_values() {
        let entries = parse_list("2,#4, 8", Axis::Arity, '#').unwrap();
        assert_eq!(
            entries,
            vec![
                AxisEntry::Active(2),
                AxisEntry::Skipped("4".to_string()),
                AxisEntry::Active(8),
            ]
        );
    }

    #[test]
    fn test_parse_list_trailing_marker_rejected() {
        let err = parse_list("2 4 #", Axis::Arity, '#').unwrap_err();
        assert!(err.is_config());
        assert!(err.to_string().contains("no value after it"));
    }

    #[test]
    fn test_custom_marker() {
        let entries = parse_list("2 ;4", Axis::Arity, ';').unwrap();
        assert_eq!(entries[1], AxisEntry::Skipped("4".to_string()));
        assert!(parse_list("#4", Axis::Arity, ';').is_err());
    }

    #[test]
    fn test_skip_notice_text() {
        let directive = SkipDirective {
            axis: Axis::NumLeaves,
            value: "2e9".to_string(),
            marker: '#',
        };
        assert_eq!(
            directive.to_string(),
            "Skipping num_leaves 2e9 (marked with '#')"
        );
    }
}
