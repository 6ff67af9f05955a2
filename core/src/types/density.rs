use std::fmt;

/// ACR breast density category
///
/// From almost entirely fatty (A) to extremely dense (D).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub enum AcrDensity {
    A,
    B,
    C,
    D,
}

/// All density categories in ascending order
pub const ACR_DENSITIES: [AcrDensity; 4] =
    [AcrDensity::A, AcrDensity::B, AcrDensity::C, AcrDensity::D];

impl AcrDensity {
    /// Parses a density letter, ignoring case
    ///
    /// ```
    /// use mammolabel_core::AcrDensity;
    ///
    /// assert_eq!(AcrDensity::from_char('b'), Some(AcrDensity::B));
    /// assert_eq!(AcrDensity::from_char('E'), None);
    /// ```
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'A' => Some(AcrDensity::A),
            'B' => Some(AcrDensity::B),
            'C' => Some(AcrDensity::C),
            'D' => Some(AcrDensity::D),
            _ => None,
        }
    }

    /// Returns the upper-case letter
    pub fn letter(&self) -> char {
        match self {
            AcrDensity::A => 'A',
            AcrDensity::B => 'B',
            AcrDensity::C => 'C',
            AcrDensity::D => 'D',
        }
    }

    /// Returns the descriptive name used in reports
    pub fn description(&self) -> &'static str {
        match self {
            AcrDensity::A => "almost entirely fatty",
            AcrDensity::B => "scattered fibroglandular densities",
            AcrDensity::C => "heterogeneously dense",
            AcrDensity::D => "extremely dense",
        }
    }

    /// Returns whether this category counts as dense breast tissue (C or D)
    pub fn is_dense(&self) -> bool {
        matches!(self, AcrDensity::C | AcrDensity::D)
    }
}

impl fmt::Display for AcrDensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_char() {
        assert_eq!(AcrDensity::from_char('A'), Some(AcrDensity::A));
        assert_eq!(AcrDensity::from_char('d'), Some(AcrDensity::D));
        assert_eq!(AcrDensity::from_char('e'), None);
        assert_eq!(AcrDensity::from_char('4'), None);
    }

    #[test]
    fn test_display_is_uppercase_letter() {
        for density in ACR_DENSITIES {
            let shown = density.to_string();
            assert_eq!(shown.len(), 1);
            assert_eq!(AcrDensity::from_char(density.letter()), Some(density));
            assert!(shown.chars().all(|c| c.is_ascii_uppercase()));
        }
    }

    #[test]
    fn test_is_dense() {
        assert!(!AcrDensity::A.is_dense());
        assert!(!AcrDensity::B.is_dense());
        assert!(AcrDensity::C.is_dense());
        assert!(AcrDensity::D.is_dense());
    }
}
