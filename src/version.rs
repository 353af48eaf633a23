use std::fmt;
use std::str::FromStr;

use winnow::prelude::*;
use winnow::token::take_while;

use crate::error::{Error, Result};

/// An exact package version pin.
///
/// Versions are opaque for comparison purposes: two pins are equal exactly
/// when their strings are equal. There is no range syntax and no resolution
/// logic; a recipe asking for `asio/1.30.2` means that version and nothing
/// else.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version(String);

impl Version {
    /// The version string as written in the recipe.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_version_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-' | '+')
}

fn parse_version(input: &mut &str) -> ModalResult<String> {
    (
        take_while(1.., |c: char| c.is_ascii_digit()),
        take_while(0.., is_version_char),
    )
        .take()
        .map(|s: &str| s.to_string())
        .parse_next(input)
}

impl FromStr for Version {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_version
            .parse(s)
            .map(Version)
            .map_err(|_| Error::InvalidVersion(s.to_string()))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_plain() {
        let v: Version = "1.30.2".parse().unwrap();
        assert_eq!(v.as_str(), "1.30.2");
    }

    #[test]
    fn parse_short() {
        let v: Version = "1.0".parse().unwrap();
        assert_eq!(v.as_str(), "1.0");
    }

    #[test]
    fn parse_with_suffix() {
        let v: Version = "10.0.0_rc1".parse().unwrap();
        assert_eq!(v.as_str(), "10.0.0_rc1");
    }

    #[test]
    fn exact_pin_equality() {
        let a: Version = "1.30.1".parse().unwrap();
        let b: Version = "1.30.2".parse().unwrap();
        assert_ne!(a, b);
        assert_eq!(a, "1.30.1".parse().unwrap());
    }

    #[test]
    fn invalid_empty() {
        assert!("".parse::<Version>().is_err());
    }

    #[test]
    fn invalid_leading_letter() {
        assert!("v1.0".parse::<Version>().is_err());
    }

    #[test]
    fn invalid_embedded_space() {
        assert!("1.0 beta".parse::<Version>().is_err());
    }

    #[test]
    fn display_round_trip() {
        for s in ["1.0", "0.0.1", "1.28.2", "1.15.0", "10.0.0_rc1"] {
            let v: Version = s.parse().unwrap();
            assert_eq!(v.to_string(), s);
        }
    }
}
