use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::version::Version;

/// An exact dependency pin: `name/version`.
///
/// A pin names one version and nothing else; the registry resolving it must
/// match exactly, never substituting a neighbouring version.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Dependency {
    /// Package name (e.g. `asio`).
    pub name: String,
    /// Pinned version.
    pub version: Version,
}

impl Dependency {
    /// Parse a space-separated list of dependency pins.
    ///
    /// # Examples
    ///
    /// ```
    /// use recipe_metadata::Dependency;
    ///
    /// let deps = Dependency::parse_line("asio/1.30.1 gtest/1.15.0").unwrap();
    /// assert_eq!(deps.len(), 2);
    /// assert_eq!(deps[0].name, "asio");
    /// assert_eq!(deps[0].version.as_str(), "1.30.1");
    /// ```
    pub fn parse_line(input: &str) -> Result<Vec<Dependency>> {
        input
            .split_whitespace()
            .map(|token| token.parse())
            .collect()
    }
}

impl FromStr for Dependency {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (name, version) = s
            .split_once('/')
            .ok_or_else(|| Error::InvalidDependency(s.to_string()))?;
        if name.is_empty() {
            return Err(Error::InvalidDependency(s.to_string()));
        }
        let version: Version = version
            .parse()
            .map_err(|_| Error::InvalidDependency(s.to_string()))?;
        Ok(Dependency {
            name: name.to_string(),
            version,
        })
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.name, self.version)
    }
}
