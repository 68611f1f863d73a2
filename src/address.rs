//! IPv4 literal validation.
//!
//! The validator is the gate in front of every lookup: input must be four
//! ASCII decimal groups separated by dots, each in 0-255. Nothing else runs
//! for an input it rejects.

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::error_handling::ValidationError;

/// Four dot-separated ASCII digit groups, nothing before or after.
static DOTTED_QUAD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]+)\.([0-9]+)\.([0-9]+)\.([0-9]+)$").expect("dotted-quad regex is valid")
});

/// A validated IPv4 address.
///
/// Keeps the literal it was validated from so that it renders exactly as the
/// user typed it. Two addresses are equal when their literals are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IpAddress {
    literal: String,
    octets: [u8; 4],
}

impl IpAddress {
    /// The literal as entered.
    pub fn as_str(&self) -> &str {
        &self.literal
    }

    /// The four octets.
    pub fn octets(&self) -> [u8; 4] {
        self.octets
    }

    /// The address as a standard library value.
    pub fn to_ipv4(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.octets)
    }

    /// Octets in reverse order joined by dots (`4.3.2.1` for `1.2.3.4`),
    /// the label form used by DNS-based registry zones.
    pub fn reversed_labels(&self) -> String {
        let [a, b, c, d] = self.octets;
        format!("{d}.{c}.{b}.{a}")
    }
}

impl fmt::Display for IpAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.literal)
    }
}

impl FromStr for IpAddress {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate(s)
    }
}

/// Validates a dotted-quad IPv4 literal.
///
/// # Errors
///
/// - `MalformedFormat` if the input is not exactly four dot-separated groups
///   of ASCII digits (no surrounding whitespace, signs or empty groups)
/// - `OctetOutOfRange` if a group is numeric but greater than 255
///
/// # Examples
///
/// ```
/// use ip_tracker::validate;
///
/// assert!(validate("255.255.255.255").is_ok());
/// assert!(validate("256.1.1.1").is_err());
/// ```
pub fn validate(input: &str) -> Result<IpAddress, ValidationError> {
    let captures = DOTTED_QUAD
        .captures(input)
        .ok_or_else(|| ValidationError::MalformedFormat {
            input: input.to_string(),
        })?;

    let mut octets = [0u8; 4];
    for (i, octet) in octets.iter_mut().enumerate() {
        let group = &captures[i + 1];
        // Overflowing u32 is still "numeric but out of range"
        *octet = group
            .parse::<u32>()
            .ok()
            .and_then(|value| u8::try_from(value).ok())
            .ok_or_else(|| ValidationError::OctetOutOfRange {
                input: input.to_string(),
                position: i + 1,
                octet: group.to_string(),
            })?;
    }

    Ok(IpAddress {
        literal: input.to_string(),
        octets,
    })
}
