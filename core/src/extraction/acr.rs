use crate::types::AcrDensity;
use log::debug;

use super::patterns::PatternLibrary;

/// Extracts the parenthesised ACR density grade using the default patterns
///
/// Only the first "(ACR x)" in the text counts.
///
/// # Example
///
/// ```
/// use mammolabel_core::extraction::extract_acr;
/// use mammolabel_core::AcrDensity;
///
/// assert_eq!(extract_acr("Density (ACR-B) noted."), Some(AcrDensity::B));
/// assert_eq!(extract_acr("Dense breasts."), None);
/// ```
pub fn extract_acr(text: &str) -> Option<AcrDensity> {
    extract_acr_with(PatternLibrary::standard(), text)
}

/// Extracts the ACR density grade using the given pattern library
pub fn extract_acr_with(patterns: &PatternLibrary, text: &str) -> Option<AcrDensity> {
    let letter = patterns.acr_rule().captures(text)?.get(1)?;
    let density = letter.as_str().chars().next().and_then(AcrDensity::from_char);
    if let Some(d) = density {
        debug!("ACR density {} matched at {:?}", d, letter.range());
    }
    density
}
