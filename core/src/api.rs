use crate::error::Result;
use crate::extraction::{extract_acr_with, find_birads, BiradsRuleKind, PatternLibrary};
use crate::types::{AcrDensity, BiradsLabel, ExtractionConfig};

/// Main extractor for report labels
///
/// Provides a high-level API for pulling the BI-RADS assessment and the
/// ACR density grade out of a free-text report.
///
/// # Example
///
/// ```
/// use mammolabel_core::{AcrDensity, BiradsLabel, ReportExtractor};
///
/// let extractor = ReportExtractor::new();
/// let labels = extractor.extract(
///     "Overall assessment: BI-RADS score is likely **4**. Density (ACR-B) noted.",
/// );
///
/// assert_eq!(labels.birads, Some(BiradsLabel::Integer(4)));
/// assert_eq!(labels.acr, Some(AcrDensity::B));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ReportExtractor {
    patterns: PatternLibrary,
}

impl ReportExtractor {
    /// Creates an extractor with the default pattern windows
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an extractor with the pattern windows from `config`
    ///
    /// # Errors
    ///
    /// Returns an error if a configured window cannot be compiled
    pub fn from_config(config: &ExtractionConfig) -> Result<Self> {
        if config.uses_default_windows() {
            return Ok(Self::new());
        }
        Ok(Self {
            patterns: PatternLibrary::from_config(config)?,
        })
    }

    /// Extracts both labels from report text
    ///
    /// The two labels are looked up independently; finding one never
    /// depends on the other.
    pub fn extract(&self, text: &str) -> ReportLabels {
        let birads = find_birads(&self.patterns, text);
        ReportLabels {
            birads: birads.as_ref().map(|m| m.label),
            birads_rule: birads.map(|m| m.rule),
            acr: extract_acr_with(&self.patterns, text),
        }
    }
}

/// Labels extracted from one report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReportLabels {
    /// BI-RADS assessment, `None` if no rule matched
    pub birads: Option<BiradsLabel>,

    /// ACR density grade, `None` if no "(ACR x)" was found
    pub acr: Option<AcrDensity>,

    /// Rule that produced the BI-RADS label
    pub birads_rule: Option<BiradsRuleKind>,
}

impl ReportLabels {
    /// Checks if both labels were found
    pub fn is_complete(&self) -> bool {
        self.birads.is_some() && self.acr.is_some()
    }

    /// Checks if neither label was found
    pub fn is_empty(&self) -> bool {
        self.birads.is_none() && self.acr.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_both_labels() {
        let labels = ReportExtractor::new().extract(
            "Overall assessment: BI-RADS score is likely **4**. Density (ACR-B) noted.",
        );
        assert_eq!(labels.birads, Some(BiradsLabel::Integer(4)));
        assert_eq!(labels.acr, Some(AcrDensity::B));
        assert_eq!(labels.birads_rule, Some(BiradsRuleKind::DirectMention));
        assert!(labels.is_complete());
    }

    #[test]
    fn test_extract_nothing() {
        let labels = ReportExtractor::new().extract("No specific category mentioned.");
        assert_eq!(labels, ReportLabels::default());
        assert!(labels.is_empty());
        assert!(!labels.is_complete());
    }

    #[test]
    fn test_extract_fraction_without_density() {
        let labels = ReportExtractor::new().extract("Category 3.5 BI-RADS pattern seen");
        assert_eq!(
            labels.birads,
            Some(BiradsLabel::Fraction {
                whole: 3,
                tenths: 5
            })
        );
        assert_eq!(labels.acr, None);
        assert_eq!(labels.birads_rule, Some(BiradsRuleKind::CategoryFirst));
    }

    #[test]
    fn test_density_without_birads() {
        let labels = ReportExtractor::new().extract("Scattered densities (ACR B).");
        assert_eq!(labels.birads, None);
        assert_eq!(labels.birads_rule, None);
        assert_eq!(labels.acr, Some(AcrDensity::B));
    }

    #[test]
    fn test_from_config_uses_window() {
        let text = format!("BI-RADS {} 2", "x".repeat(60));
        let default = ReportExtractor::from_config(&ExtractionConfig::default()).unwrap();
        assert_eq!(default.extract(&text).birads, None);

        let config = ExtractionConfig::default().with_proximity_window(70);
        let wide = ReportExtractor::from_config(&config).unwrap();
        assert_eq!(wide.extract(&text).birads, Some(BiradsLabel::Integer(2)));
    }
}
