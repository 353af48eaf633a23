use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::settings::{BuildType, Settings, SettingsAxis};

/// Build-file generator the toolchain is asked to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Generator {
    /// Ninja build files.
    #[default]
    Ninja,
    /// Classic Makefiles.
    UnixMakefiles,
    /// Xcode project files.
    Xcode,
}

impl FromStr for Generator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Ninja" => Ok(Generator::Ninja),
            "Unix Makefiles" => Ok(Generator::UnixMakefiles),
            "Xcode" => Ok(Generator::Xcode),
            _ => Err(Error::InvalidGenerator(s.to_string())),
        }
    }
}

impl fmt::Display for Generator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Generator::Ninja => "Ninja",
            Generator::UnixMakefiles => "Unix Makefiles",
            Generator::Xcode => "Xcode",
        };
        f.write_str(s)
    }
}

/// Toolchain-facing configuration derived from settings during `generate`.
///
/// Created once per lifecycle run, consumed by the `build` and `package`
/// hooks, and discarded afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildDescriptor {
    /// Build-file generator.
    pub generator: Generator,
    /// Effective build type.
    pub build_type: BuildType,
    /// Variables handed to the toolchain.
    pub variables: BTreeMap<String, String>,
}

impl BuildDescriptor {
    /// Derive a descriptor from ambient settings.
    ///
    /// Every axis in `axes` must have a value in `settings`; the first
    /// missing one fails the derivation. The build-type variable is the
    /// uppercased build type, defaulting to `Release` when the recipe does
    /// not consume the `build_type` axis.
    pub fn from_settings(
        axes: &[SettingsAxis],
        generator: Generator,
        settings: &Settings,
    ) -> Result<BuildDescriptor> {
        for axis in axes {
            if !settings.has(*axis) {
                return Err(Error::IncompleteSettings(axis.to_string()));
            }
        }

        let build_type = settings.build_type.unwrap_or_default();
        let mut variables = BTreeMap::new();
        variables.insert("CMAKE_BUILD_TYPE".to_string(), build_type.cmake_value());

        Ok(BuildDescriptor {
            generator,
            build_type,
            variables,
        })
    }
}
