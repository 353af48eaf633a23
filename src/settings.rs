use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// An ambient configuration axis a recipe consumes.
///
/// Recipes list the axes they care about in `SETTINGS`; the lifecycle
/// executor requires a value for each listed axis before a build descriptor
/// can be derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingsAxis {
    /// Target operating system.
    Os,
    /// Compiler identity.
    Compiler,
    /// Build type (debug/release).
    BuildType,
    /// Target architecture.
    Arch,
}

impl SettingsAxis {
    /// Parse a space-separated `SETTINGS` line into a list of axes.
    ///
    /// # Examples
    ///
    /// ```
    /// use recipe_metadata::SettingsAxis;
    ///
    /// let axes = SettingsAxis::parse_line("os compiler build_type arch").unwrap();
    /// assert_eq!(axes.len(), 4);
    /// assert_eq!(axes[0], SettingsAxis::Os);
    /// ```
    pub fn parse_line(input: &str) -> Result<Vec<SettingsAxis>> {
        input
            .split_whitespace()
            .map(|token| token.parse())
            .collect()
    }
}

impl FromStr for SettingsAxis {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "os" => Ok(SettingsAxis::Os),
            "compiler" => Ok(SettingsAxis::Compiler),
            "build_type" => Ok(SettingsAxis::BuildType),
            "arch" => Ok(SettingsAxis::Arch),
            _ => Err(Error::InvalidAxis(s.to_string())),
        }
    }
}

impl fmt::Display for SettingsAxis {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            SettingsAxis::Os => "os",
            SettingsAxis::Compiler => "compiler",
            SettingsAxis::BuildType => "build_type",
            SettingsAxis::Arch => "arch",
        };
        f.write_str(s)
    }
}

/// Build type for a configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BuildType {
    /// Unoptimised build with debug information.
    Debug,
    /// Optimised build.
    #[default]
    Release,
    /// Optimised build with debug information.
    RelWithDebInfo,
    /// Size-optimised build.
    MinSizeRel,
}

impl BuildType {
    /// The value passed to the toolchain's build-type variable, uppercased.
    pub fn cmake_value(&self) -> String {
        self.to_string().to_uppercase()
    }
}

impl FromStr for BuildType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Debug" => Ok(BuildType::Debug),
            "Release" => Ok(BuildType::Release),
            "RelWithDebInfo" => Ok(BuildType::RelWithDebInfo),
            "MinSizeRel" => Ok(BuildType::MinSizeRel),
            _ => Err(Error::InvalidBuildType(s.to_string())),
        }
    }
}

impl fmt::Display for BuildType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            BuildType::Debug => "Debug",
            BuildType::Release => "Release",
            BuildType::RelWithDebInfo => "RelWithDebInfo",
            BuildType::MinSizeRel => "MinSizeRel",
        };
        f.write_str(s)
    }
}

/// Ambient build settings, passed explicitly to the lifecycle executor.
///
/// Every field is optional; the executor only requires values for the axes
/// a recipe actually declares. Nothing is read from the environment.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Settings {
    /// Target operating system (e.g. `Linux`).
    pub os: Option<String>,
    /// Compiler identity (e.g. `gcc`).
    pub compiler: Option<String>,
    /// Build type.
    pub build_type: Option<BuildType>,
    /// Target architecture (e.g. `x86_64`).
    pub arch: Option<String>,
}

impl Settings {
    /// Whether the given axis has a value.
    pub fn has(&self, axis: SettingsAxis) -> bool {
        match axis {
            SettingsAxis::Os => self.os.is_some(),
            SettingsAxis::Compiler => self.compiler.is_some(),
            SettingsAxis::BuildType => self.build_type.is_some(),
            SettingsAxis::Arch => self.arch.is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_axes() {
        let axes = SettingsAxis::parse_line("os compiler build_type arch").unwrap();
        assert_eq!(
            axes,
            vec![
                SettingsAxis::Os,
                SettingsAxis::Compiler,
                SettingsAxis::BuildType,
                SettingsAxis::Arch,
            ]
        );
    }

    #[test]
    fn parse_empty_line() {
        assert!(SettingsAxis::parse_line("").unwrap().is_empty());
    }

    #[test]
    fn invalid_axis() {
        assert!("cpu".parse::<SettingsAxis>().is_err());
        assert!("".parse::<SettingsAxis>().is_err());
    }

    #[test]
    fn axis_display_round_trip() {
        for axis in [
            SettingsAxis::Os,
            SettingsAxis::Compiler,
            SettingsAxis::BuildType,
            SettingsAxis::Arch,
        ] {
            assert_eq!(axis.to_string().parse::<SettingsAxis>().unwrap(), axis);
        }
    }

    #[test]
    fn build_type_parse() {
        assert_eq!("Debug".parse::<BuildType>().unwrap(), BuildType::Debug);
        assert_eq!("Release".parse::<BuildType>().unwrap(), BuildType::Release);
        assert!("release".parse::<BuildType>().is_err());
    }

    #[test]
    fn cmake_value_uppercased() {
        assert_eq!(BuildType::Release.cmake_value(), "RELEASE");
        assert_eq!(BuildType::Debug.cmake_value(), "DEBUG");
        assert_eq!(BuildType::RelWithDebInfo.cmake_value(), "RELWITHDEBINFO");
        assert_eq!(BuildType::MinSizeRel.cmake_value(), "MINSIZEREL");
    }

    #[test]
    fn settings_has() {
        let settings = Settings {
            os: Some("Linux".to_string()),
            build_type: Some(BuildType::Debug),
            ..Settings::default()
        };
        assert!(settings.has(SettingsAxis::Os));
        assert!(settings.has(SettingsAxis::BuildType));
        assert!(!settings.has(SettingsAxis::Compiler));
        assert!(!settings.has(SettingsAxis::Arch));
    }
}
