//! Airport code types.

use std::fmt;

/// Error returned when parsing an invalid airport code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid airport code {input:?}: {reason}")]
pub struct InvalidAirportCode {
    input: String,
    reason: &'static str,
}

impl InvalidAirportCode {
    fn new(input: &str, reason: &'static str) -> Self {
        Self {
            input: input.to_string(),
            reason,
        }
    }

    /// The text that failed to parse.
    pub fn input(&self) -> &str {
        &self.input
    }
}

/// Longest UTF-8 encoding of three characters.
const MAX_BYTES: usize = 3 * 4;

/// A 3-letter IATA-style airport code.
///
/// Codes are exactly 3 alphabetic characters. Letters are kept as given, so
/// `"lhr"` and `"LHR"` are different codes, and non-ASCII letters such as
/// `"LÖR"` are accepted.
///
/// # Examples
///
/// ```
/// use booking_store::domain::AirportCode;
///
/// let lhr = AirportCode::parse("LHR").unwrap();
/// assert_eq!(lhr.as_str(), "LHR");
///
/// // Digits are rejected
/// assert!(AirportCode::parse("LH1").is_err());
///
/// // Wrong length is rejected
/// assert!(AirportCode::parse("LH").is_err());
/// assert!(AirportCode::parse("LHRX").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AirportCode {
    // UTF-8 bytes, zero padded past `len`.
    bytes: [u8; MAX_BYTES],
    len: u8,
}

impl AirportCode {
    /// Parse an airport code from a string.
    ///
    /// The input must be exactly 3 alphabetic characters.
    pub fn parse(s: &str) -> Result<Self, InvalidAirportCode> {
        if s.chars().count() != 3 {
            return Err(InvalidAirportCode::new(s, "must be exactly 3 characters"));
        }

        if !s.chars().all(char::is_alphabetic) {
            return Err(InvalidAirportCode::new(s, "must be alphabetic letters"));
        }

        let mut bytes = [0; MAX_BYTES];
        bytes[..s.len()].copy_from_slice(s.as_bytes());

        Ok(AirportCode {
            bytes,
            len: s.len() as u8,
        })
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        // Only whole UTF-8 input is ever stored.
        std::str::from_utf8(&self.bytes[..usize::from(self.len)]).unwrap_or_default()
    }
}

impl fmt::Debug for AirportCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AirportCode({})", self.as_str())
    }
}

impl fmt::Display for AirportCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AirportCode {
    type Err = InvalidAirportCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
