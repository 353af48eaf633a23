use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Recipe lifecycle hook.
///
/// Hooks are invoked by the lifecycle executor in the fixed order given by
/// [`Hook::ORDER`]. `source` and `system_requirements` may be no-ops; the
/// rest always run. A failing hook aborts the remainder of the lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hook {
    /// `configure` — apply option mutual-exclusion rules.
    Configure,
    /// `generate` — derive the toolchain-facing build descriptor.
    Generate,
    /// `source` — acquire source material.
    Source,
    /// `system_requirements` — install host packages (usually a no-op).
    SystemRequirements,
    /// `requirements` — declare and validate dependency pins.
    Requirements,
    /// `build` — delegate configure/build/install to the toolchain.
    Build,
    /// `package` — copy public headers and install into the package layout.
    Package,
    /// `package_info` — publish exported library names and aliases.
    PackageInfo,
}

impl Hook {
    /// The fixed lifecycle order.
    pub const ORDER: [Hook; 8] = [
        Hook::Configure,
        Hook::Generate,
        Hook::Source,
        Hook::SystemRequirements,
        Hook::Requirements,
        Hook::Build,
        Hook::Package,
        Hook::PackageInfo,
    ];

    /// Parse a space-separated list of hook names.
    ///
    /// The special value `-` (meaning "no hooks") returns an empty list.
    ///
    /// # Examples
    ///
    /// ```
    /// use recipe_metadata::Hook;
    ///
    /// let hooks = Hook::parse_line("configure build package").unwrap();
    /// assert_eq!(hooks.len(), 3);
    /// assert_eq!(hooks[0], Hook::Configure);
    ///
    /// let empty = Hook::parse_line("-").unwrap();
    /// assert!(empty.is_empty());
    /// ```
    pub fn parse_line(input: &str) -> Result<Vec<Hook>> {
        let trimmed = input.trim();
        if trimmed.is_empty() || trimmed == "-" {
            return Ok(Vec::new());
        }
        trimmed
            .split_whitespace()
            .map(|token| token.parse())
            .collect()
    }
}

impl FromStr for Hook {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "configure" => Ok(Hook::Configure),
            "generate" => Ok(Hook::Generate),
            "source" => Ok(Hook::Source),
            "system_requirements" => Ok(Hook::SystemRequirements),
            "requirements" => Ok(Hook::Requirements),
            "build" => Ok(Hook::Build),
            "package" => Ok(Hook::Package),
            "package_info" => Ok(Hook::PackageInfo),
            _ => Err(Error::InvalidHook(s.to_string())),
        }
    }
}

impl fmt::Display for Hook {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Hook::Configure => "configure",
            Hook::Generate => "generate",
            Hook::Source => "source",
            Hook::SystemRequirements => "system_requirements",
            Hook::Requirements => "requirements",
            Hook::Build => "build",
            Hook::Package => "package",
            Hook::PackageInfo => "package_info",
        };
        f.write_str(s)
    }
}
