use crate::error::Result;
use crate::types::{
    ExtractionConfig, DEFAULT_CATEGORY_WINDOW, DEFAULT_PROXIMITY_WINDOW, MAX_BIRADS_CATEGORY,
};
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// "BI-RADS", "BIRADS", "bi rads", "BI-RAD"
const BIRADS_KEYWORD: &str = r"\bbi[-\s]?rads?";

/// ACR density in its parenthesised form: "(ACR B)", "(ACR-B)", "(acr-b)"
const ACR_PATTERN: &str = r"(?i)\(ACR[-\s]*([A-D])\)";

/// Canonical numeric token: one digit up to the top category, optionally
/// followed by a single decimal digit
///
/// Both digits are ASCII only, so "3.\u{663}" (Arabic-Indic three) reads as
/// the integer 3 rather than 3.3.
fn number_token() -> String {
    format!(r"([0-{}](?:\.[0-9])?)", MAX_BIRADS_CATEGORY)
}

/// Identifies a BI-RADS recognizer rule
///
/// Variants are listed in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BiradsRuleKind {
    /// "BI-RADS: 4", "BIRADS score is likely **4**", "BI-RADS Category 4C"
    DirectMention,
    /// "Category 4 BI-RADS"
    CategoryFirst,
    /// "BI-RADS ... (some words) ... 4"
    LooseProximity,
}

impl BiradsRuleKind {
    /// Returns simple name for display
    pub fn simple_name(&self) -> &'static str {
        match self {
            BiradsRuleKind::DirectMention => "direct-mention",
            BiradsRuleKind::CategoryFirst => "category-first",
            BiradsRuleKind::LooseProximity => "loose-proximity",
        }
    }
}

impl fmt::Display for BiradsRuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.simple_name())
    }
}

/// A single BI-RADS recognizer: a tagged regex with one capture group
#[derive(Debug, Clone)]
pub struct BiradsRule {
    kind: BiradsRuleKind,
    regex: Regex,
}

impl BiradsRule {
    fn new(kind: BiradsRuleKind, pattern: &str) -> Result<Self> {
        Ok(Self {
            kind,
            regex: Regex::new(pattern)?,
        })
    }

    /// Returns which rule this is
    pub fn kind(&self) -> BiradsRuleKind {
        self.kind
    }

    /// Returns the numeric capture of the leftmost match in `text`
    pub fn capture<'t>(&self, text: &'t str) -> Option<regex::Match<'t>> {
        self.regex.captures(text).and_then(|caps| caps.get(1))
    }
}

/// Ordered recognizer rules for both report labels
///
/// BI-RADS rules are kept in priority order; extraction walks them front
/// to back and stops at the first rule that matches anywhere in the text.
/// ACR density has one conventional notation and so one rule.
#[derive(Debug, Clone)]
pub struct PatternLibrary {
    birads: Vec<BiradsRule>,
    acr: Regex,
}

impl PatternLibrary {
    /// Builds the library with custom window widths
    ///
    /// # Errors
    ///
    /// Returns [`crate::MammolabelError::InvalidPattern`] if a window is so
    /// large that the resulting regex exceeds the compiled size limit.
    pub fn new(proximity_window: usize, category_window: usize) -> Result<Self> {
        let number = number_token();

        let direct = format!(
            r"(?i){kw}(?:\s+score|\s+category)?\s*(?:is|=|:)?\s*(?:likely\s*)?\**\s*{num}",
            kw = BIRADS_KEYWORD,
            num = number
        );
        let category_first = format!(
            r"(?i)\bcategory\s*{num}\b[^\n]{{0,{window}}}{kw}\b",
            kw = BIRADS_KEYWORD,
            num = number,
            window = category_window
        );
        let loose = format!(
            r"(?i){kw}\b\D{{0,{window}}}\b{num}",
            kw = BIRADS_KEYWORD,
            num = number,
            window = proximity_window
        );

        Ok(Self {
            birads: vec![
                BiradsRule::new(BiradsRuleKind::DirectMention, &direct)?,
                BiradsRule::new(BiradsRuleKind::CategoryFirst, &category_first)?,
                BiradsRule::new(BiradsRuleKind::LooseProximity, &loose)?,
            ],
            acr: Regex::new(ACR_PATTERN)?,
        })
    }

    /// Builds the library from the windows in an [`ExtractionConfig`]
    pub fn from_config(config: &ExtractionConfig) -> Result<Self> {
        Self::new(config.proximity_window, config.category_window)
    }

    /// Returns the shared library with default windows
    pub fn standard() -> &'static PatternLibrary {
        static STANDARD: OnceLock<PatternLibrary> = OnceLock::new();
        STANDARD.get_or_init(|| {
            PatternLibrary::new(DEFAULT_PROXIMITY_WINDOW, DEFAULT_CATEGORY_WINDOW)
                .expect("Failed to compile default patterns")
        })
    }

    /// Returns the BI-RADS rules in priority order
    pub fn birads_rules(&self) -> &[BiradsRule] {
        &self.birads
    }

    /// Returns the ACR density rule
    pub fn acr_rule(&self) -> &Regex {
        &self.acr
    }
}

impl Default for PatternLibrary {
    fn default() -> Self {
        Self::standard().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn captured(rule: &BiradsRule, text: &str) -> Option<String> {
        rule.capture(text).map(|m| m.as_str().to_string())
    }

    #[test]
    fn test_rules_in_priority_order() {
        let kinds: Vec<_> = PatternLibrary::standard()
            .birads_rules()
            .iter()
            .map(|r| r.kind())
            .collect();
        assert_eq!(
            kinds,
            vec![
                BiradsRuleKind::DirectMention,
                BiradsRuleKind::CategoryFirst,
                BiradsRuleKind::LooseProximity
            ]
        );
    }

    #[test]
    fn test_direct_mention_rule() {
        let rule = &PatternLibrary::standard().birads_rules()[0];
        assert_eq!(captured(rule, "BI-RADS: 4"), Some("4".to_string()));
        assert_eq!(captured(rule, "BIRADS=4C"), Some("4".to_string()));
        assert_eq!(
            captured(rule, "BIRADS score is likely **4**"),
            Some("4".to_string())
        );
        assert_eq!(captured(rule, "bi-rad category 3.5"), Some("3.5".to_string()));
        assert_eq!(captured(rule, "BI-RADS assessment: 4"), None);
        assert_eq!(captured(rule, "Category 4 BI-RADS"), None);
    }

    #[test]
    fn test_category_first_rule() {
        let rule = &PatternLibrary::standard().birads_rules()[1];
        assert_eq!(captured(rule, "Category 4 BI-RADS"), Some("4".to_string()));
        assert_eq!(
            captured(rule, "category 2 according to birads"),
            Some("2".to_string())
        );
        // Keyword must follow on the same line
        assert_eq!(captured(rule, "Category 4\nBI-RADS"), None);
        // Keyword too far away
        assert_eq!(
            captured(rule, "Category 4 and then a long digression before BI-RADS"),
            None
        );
    }

    #[test]
    fn test_loose_proximity_rule() {
        let rule = &PatternLibrary::standard().birads_rules()[2];
        assert_eq!(
            captured(rule, "BI-RADS assessment for this study: 3"),
            Some("3".to_string())
        );
        assert_eq!(captured(rule, "BI-RADS 7 is not a category"), None);
        let far = format!("BI-RADS {} 4", "x".repeat(60));
        assert_eq!(captured(rule, &far), None);
    }

    #[test]
    fn test_loose_proximity_window_boundary() {
        let rule = &PatternLibrary::standard().birads_rules()[2];
        let at_limit = format!("BI-RADS{}4", " ".repeat(DEFAULT_PROXIMITY_WINDOW));
        let past_limit = format!("BI-RADS{}4", " ".repeat(DEFAULT_PROXIMITY_WINDOW + 1));
        assert_eq!(captured(rule, &at_limit), Some("4".to_string()));
        assert_eq!(captured(rule, &past_limit), None);
    }

    #[test]
    fn test_category_first_window_boundary() {
        let rule = &PatternLibrary::standard().birads_rules()[1];
        let at_limit = format!("Category 4{}BI-RADS", " ".repeat(DEFAULT_CATEGORY_WINDOW));
        let past_limit = format!(
            "Category 4{}BI-RADS",
            " ".repeat(DEFAULT_CATEGORY_WINDOW + 1)
        );
        assert_eq!(captured(rule, &at_limit), Some("4".to_string()));
        assert_eq!(captured(rule, &past_limit), None);
    }

    #[test]
    fn test_fractional_digit_is_ascii() {
        let rule = &PatternLibrary::standard().birads_rules()[0];
        assert_eq!(captured(rule, "BI-RADS 3.\u{663}"), Some("3".to_string()));
    }

    #[test]
    fn test_custom_proximity_window() {
        let library = PatternLibrary::new(80, DEFAULT_CATEGORY_WINDOW).unwrap();
        let rule = &library.birads_rules()[2];
        let far = format!("BI-RADS {} 4", "x".repeat(60));
        assert_eq!(captured(rule, &far), Some("4".to_string()));

        let exact = PatternLibrary::new(60, DEFAULT_CATEGORY_WINDOW).unwrap();
        let gap = format!("BI-RADS{}4", " ".repeat(60));
        assert_eq!(captured(&exact.birads_rules()[2], &gap), Some("4".to_string()));
        let gap = format!("BI-RADS{}4", " ".repeat(61));
        assert_eq!(captured(&exact.birads_rules()[2], &gap), None);

        let tight = PatternLibrary::new(5, DEFAULT_CATEGORY_WINDOW).unwrap();
        assert_eq!(
            captured(&tight.birads_rules()[2], "BI-RADS assessment: 3"),
            None
        );
    }

    #[test]
    fn test_acr_rule() {
        let acr = PatternLibrary::standard().acr_rule();
        assert!(acr.is_match("(ACR B)"));
        assert!(acr.is_match("(ACR-C)"));
        assert!(acr.is_match("(acr-b)"));
        assert!(acr.is_match("(ACR  d)"));
        assert!(!acr.is_match("ACR B"));
        assert!(!acr.is_match("(ACR E)"));
    }

    #[test]
    fn test_oversized_window_is_an_error() {
        assert!(PatternLibrary::new(usize::MAX, DEFAULT_CATEGORY_WINDOW).is_err());
    }
}
