use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Recipe API revision.
///
/// The API revision controls which attributes and hooks are available to a
/// recipe. Revision 2 reworked toolchain integration: configuration moves
/// from the build hook into a dedicated generate hook, and recipes may
/// declare a package type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RecipeApi {
    /// Revision 1 — legacy. Toolchain variables are set inside `build`.
    One,
    /// Revision 2 — dedicated `generate` hook, `PACKAGE_TYPE`, dependency
    /// files emitted for the build system.
    Two,
}

impl RecipeApi {
    /// Whether this revision has the dedicated `generate` hook that
    /// produces the toolchain configuration up front.
    ///
    /// Introduced in revision 2.
    pub fn has_toolchain_generate(&self) -> bool {
        *self >= RecipeApi::Two
    }

    /// Whether this revision supports the `PACKAGE_TYPE` attribute.
    ///
    /// Introduced in revision 2.
    pub fn has_package_type(&self) -> bool {
        *self >= RecipeApi::Two
    }

    /// Name of the dependency-file generators this revision uses by
    /// default.
    pub fn default_generators(&self) -> &'static str {
        match self {
            RecipeApi::One => "cmake",
            RecipeApi::Two => "CMakeDeps",
        }
    }
}

impl fmt::Display for RecipeApi {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let n = match self {
            RecipeApi::One => "1",
            RecipeApi::Two => "2",
        };
        f.write_str(n)
    }
}

impl FromStr for RecipeApi {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "1" => Ok(RecipeApi::One),
            "2" => Ok(RecipeApi::Two),
            _ => Err(Error::InvalidApi(s.to_string())),
        }
    }
}
