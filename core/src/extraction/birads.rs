use crate::types::BiradsLabel;
use log::debug;
use std::ops::Range;

use super::patterns::{BiradsRuleKind, PatternLibrary};

/// A BI-RADS label together with where and how it was found
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BiradsMatch {
    pub label: BiradsLabel,
    pub rule: BiradsRuleKind,
    /// Byte range of the numeric token in the report text
    pub span: Range<usize>,
}

/// Extracts a BI-RADS label from report text using the default patterns
///
/// # Example
///
/// ```
/// use mammolabel_core::extraction::extract_birads;
/// use mammolabel_core::BiradsLabel;
///
/// assert_eq!(extract_birads("BI-RADS: 4"), Some(BiradsLabel::Integer(4)));
/// assert_eq!(extract_birads("No specific category mentioned."), None);
/// ```
pub fn extract_birads(text: &str) -> Option<BiradsLabel> {
    extract_birads_with(PatternLibrary::standard(), text)
}

/// Extracts a BI-RADS label using the given pattern library
pub fn extract_birads_with(patterns: &PatternLibrary, text: &str) -> Option<BiradsLabel> {
    find_birads(patterns, text).map(|m| m.label)
}

/// Runs the BI-RADS rule cascade
///
/// # Algorithm
///
/// 1. Try each rule in priority order
/// 2. The first rule matching anywhere in the text wins; its leftmost
///    match is used even if a lower-priority rule matches earlier
/// 3. Re-validate the capture as a canonical token and keep only the
///    leading number ("4C" becomes 4)
/// 4. No rule matched: `None`
pub fn find_birads(patterns: &PatternLibrary, text: &str) -> Option<BiradsMatch> {
    patterns.birads_rules().iter().find_map(|rule| {
        let capture = rule.capture(text)?;
        match BiradsLabel::parse(capture.as_str()) {
            Some(label) => {
                debug!(
                    "BI-RADS {} matched by {} rule at {:?}",
                    label,
                    rule.kind(),
                    capture.range()
                );
                Some(BiradsMatch {
                    label,
                    rule: rule.kind(),
                    span: capture.range(),
                })
            }
            None => {
                debug!(
                    "Discarding malformed BI-RADS capture '{}' from {} rule",
                    capture.as_str(),
                    rule.kind()
                );
                None
            }
        }
    })
}
