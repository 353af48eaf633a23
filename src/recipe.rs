use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::api::RecipeApi;
use crate::build::Generator;
use crate::dependency::Dependency;
use crate::error::{Error, Result};
use crate::option::OptionSet;
use crate::settings::SettingsAxis;
use crate::source::SourceSpec;
use crate::version::Version;

/// Kind of artifact a recipe produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PackageType {
    /// A linkable library.
    #[default]
    Library,
    /// An executable application.
    Application,
}

impl FromStr for PackageType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "library" => Ok(PackageType::Library),
            "application" => Ok(PackageType::Application),
            _ => Err(Error::InvalidPackageType(s.to_string())),
        }
    }
}

impl fmt::Display for PackageType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            PackageType::Library => "library",
            PackageType::Application => "application",
        };
        f.write_str(s)
    }
}

/// A declarative package recipe.
///
/// Identity fields are fixed at construction; only the option set is
/// mutated afterwards, during configuration. Mandatory fields (`name`,
/// `version`) are always present; everything else is optional or defaulted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    /// Recipe API revision.
    pub api: RecipeApi,

    /// Package name (mandatory; unique together with `version` within a
    /// registry).
    pub name: String,

    /// Exact package version (mandatory).
    pub version: Version,

    /// License identifier.
    pub license: Option<String>,

    /// Author.
    pub author: Option<String>,

    /// Upstream URL.
    pub url: Option<String>,

    /// One-line description.
    pub description: String,

    /// Topic tags.
    pub topics: BTreeSet<String>,

    /// Kind of artifact produced.
    pub package_type: PackageType,

    /// Settings axes the recipe consumes.
    pub settings: Vec<SettingsAxis>,

    /// Declared options and any overrides.
    pub options: OptionSet,

    /// Build-file generator the toolchain should use.
    pub generator: Generator,

    /// How to acquire the source tree, if it is not already present.
    pub source: Option<SourceSpec>,

    /// Build-time dependency pins.
    pub requires: Vec<Dependency>,

    /// Test-only dependency pins.
    pub test_requires: Vec<Dependency>,

    /// Exported library names; empty means "the package name".
    pub libs: Vec<String>,

    /// Discovery alias for single-config find-package consumers.
    pub find_package: Option<String>,

    /// Discovery alias for multi-config find-package consumers.
    pub find_package_multi: Option<String>,
}

impl Recipe {
    /// A minimal recipe with the given identity and every other field
    /// defaulted.
    pub fn new(name: &str, version: Version) -> Recipe {
        Recipe {
            api: RecipeApi::One,
            name: name.to_string(),
            version,
            license: None,
            author: None,
            url: None,
            description: String::new(),
            topics: BTreeSet::new(),
            package_type: PackageType::default(),
            settings: Vec::new(),
            options: OptionSet::default(),
            generator: Generator::default(),
            source: None,
            requires: Vec::new(),
            test_requires: Vec::new(),
            libs: Vec::new(),
            find_package: None,
            find_package_multi: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn package_type_parse() {
        assert_eq!("library".parse::<PackageType>().unwrap(), PackageType::Library);
        assert_eq!(
            "application".parse::<PackageType>().unwrap(),
            PackageType::Application
        );
        assert!("plugin".parse::<PackageType>().is_err());
    }

    #[test]
    fn package_type_display_round_trip() {
        for pt in [PackageType::Library, PackageType::Application] {
            assert_eq!(pt.to_string().parse::<PackageType>().unwrap(), pt);
        }
    }

    #[test]
    fn new_recipe_defaults() {
        let recipe = Recipe::new("think_async", "1.0".parse().unwrap());
        assert_eq!(recipe.api, RecipeApi::One);
        assert_eq!(recipe.name, "think_async");
        assert_eq!(recipe.version.as_str(), "1.0");
        assert_eq!(recipe.package_type, PackageType::Library);
        assert!(recipe.options.is_empty());
        assert!(recipe.requires.is_empty());
        assert!(recipe.source.is_none());
    }
}
