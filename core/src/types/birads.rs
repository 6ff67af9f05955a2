use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Highest BI-RADS assessment category
pub const MAX_BIRADS_CATEGORY: u8 = 6;

/// BI-RADS assessment label
///
/// Keeps track of whether the source text wrote the value with a decimal
/// point, so "4" and "4.0" stay distinguishable when written back out.
///
/// # Example
///
/// ```
/// use mammolabel_core::BiradsLabel;
///
/// let whole = BiradsLabel::parse("4C").unwrap();
/// assert_eq!(whole, BiradsLabel::Integer(4));
/// assert_eq!(whole.to_string(), "4");
///
/// let half = BiradsLabel::parse("3.5").unwrap();
/// assert_eq!(half.value(), 3.5);
/// assert_eq!(half.to_string(), "3.5");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BiradsLabel {
    /// Whole category, written without a decimal point
    Integer(u8),
    /// Category written with exactly one fractional digit
    Fraction { whole: u8, tenths: u8 },
}

impl BiradsLabel {
    /// Parses the canonical numeric token from the start of `s`
    ///
    /// Accepts a single digit 0-6, optionally followed by `.` and one more
    /// digit. Anything after the token (e.g. the `C` of "4C") is ignored.
    /// Returns `None` if `s` does not start with a canonical token.
    pub fn parse(s: &str) -> Option<Self> {
        static REGEX: OnceLock<Regex> = OnceLock::new();
        let re = REGEX.get_or_init(|| {
            Regex::new(r"^([0-6])(?:\.([0-9]))?").expect("Failed to compile regex")
        });

        let caps = re.captures(s)?;
        let whole = digit_value(caps.get(1)?.as_str())?;
        match caps.get(2) {
            Some(tenths) => Some(BiradsLabel::Fraction {
                whole,
                tenths: digit_value(tenths.as_str())?,
            }),
            None => Some(BiradsLabel::Integer(whole)),
        }
    }

    /// Returns the label as a real number
    pub fn value(&self) -> f64 {
        match *self {
            BiradsLabel::Integer(n) => f64::from(n),
            BiradsLabel::Fraction { whole, tenths } => f64::from(whole) + f64::from(tenths) / 10.0,
        }
    }

    /// Returns the whole assessment category, dropping any fraction
    pub fn category(&self) -> u8 {
        match *self {
            BiradsLabel::Integer(n) => n,
            BiradsLabel::Fraction { whole, .. } => whole,
        }
    }

    /// Returns whether the value was written with a decimal point
    pub fn is_fractional(&self) -> bool {
        matches!(self, BiradsLabel::Fraction { .. })
    }
}

fn digit_value(s: &str) -> Option<u8> {
    s.parse::<u8>().ok()
}

impl fmt::Display for BiradsLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BiradsLabel::Integer(n) => write!(f, "{}", n),
            BiradsLabel::Fraction { whole, tenths } => write!(f, "{}.{}", whole, tenths),
        }
    }
}

#[cfg(feature = "json")]
impl serde::Serialize for BiradsLabel {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            BiradsLabel::Integer(n) => serializer.serialize_u8(*n),
            BiradsLabel::Fraction { .. } => serializer.serialize_f64(self.value()),
        }
    }
}
