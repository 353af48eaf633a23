use std::collections::BTreeSet;

use crate::api::RecipeApi;
use crate::build::Generator;
use crate::dependency::Dependency;
use crate::error::{Error, Result};
use crate::option::{OptionDecl, OptionSet};
use crate::recipe::{PackageType, Recipe};
use crate::settings::SettingsAxis;
use crate::source::SourceSpec;
use crate::version::Version;

/// A parsed recipe manifest.
///
/// Represents a single recipe file in the `KEY=VALUE` manifest format.
/// Contains the full recipe plus manifest-specific fields (`_sha_`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    /// The recipe.
    pub recipe: Recipe,

    /// Checksum of the recipe file (from `_sha_`).
    pub checksum: Option<String>,
}

impl Manifest {
    /// Parse a manifest file's contents.
    ///
    /// The input is the full text of a manifest. Lines are `KEY=VALUE`
    /// pairs in arbitrary order. Empty values may be omitted entirely.
    ///
    /// # Examples
    ///
    /// ```
    /// use recipe_metadata::Manifest;
    ///
    /// let input = "\
    /// NAME=think_async
    /// VERSION=1.0
    /// DESCRIPTION=A sample package
    /// OPTIONS=shared=false fPIC=false
    /// REQUIRES=asio/1.28.2
    /// ";
    /// let manifest = Manifest::parse(input).unwrap();
    /// assert_eq!(manifest.recipe.name, "think_async");
    /// assert_eq!(manifest.recipe.requires.len(), 1);
    /// ```
    pub fn parse(input: &str) -> Result<Manifest> {
        let mut api = None;
        let mut name = None;
        let mut version = None;
        let mut license = None;
        let mut author = None;
        let mut url = None;
        let mut description = String::new();
        let mut topics = String::new();
        let mut package_type = None;
        let mut settings = String::new();
        let mut options = String::new();
        let mut generator = None;
        let mut source = None;
        let mut requires = String::new();
        let mut test_requires = String::new();
        let mut libs = String::new();
        let mut find_package = None;
        let mut find_package_multi = None;
        let mut checksum = None;

        for line in input.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            if let Some((key, value)) = line.split_once('=') {
                match key {
                    "API" => api = Some(value.to_string()),
                    "NAME" => name = Some(value.to_string()),
                    "VERSION" => version = Some(value.to_string()),
                    "LICENSE" => license = Some(value.to_string()),
                    "AUTHOR" => author = Some(value.to_string()),
                    "URL" => url = Some(value.to_string()),
                    "DESCRIPTION" => description = value.to_string(),
                    "TOPICS" => topics = value.to_string(),
                    "PACKAGE_TYPE" => package_type = Some(value.to_string()),
                    "SETTINGS" => settings = value.to_string(),
                    "OPTIONS" => options = value.to_string(),
                    "GENERATOR" => generator = Some(value.to_string()),
                    "SOURCE" => source = Some(value.to_string()),
                    "REQUIRES" => requires = value.to_string(),
                    "TEST_REQUIRES" => test_requires = value.to_string(),
                    "LIBS" => libs = value.to_string(),
                    "FIND_PACKAGE" => find_package = Some(value.to_string()),
                    "FIND_PACKAGE_MULTI" => find_package_multi = Some(value.to_string()),
                    "_sha_" => checksum = Some(value.to_string()),
                    _ => {} // Ignore unknown keys
                }
            }
        }

        let api_val = match api {
            Some(ref s) => s.parse::<RecipeApi>()?,
            None => RecipeApi::One, // Legacy revision when unmarked
        };

        let name_val = name
            .filter(|s| !s.is_empty())
            .ok_or_else(|| Error::MissingField("NAME".to_string()))?;

        let version_val: Version = match version {
            Some(ref s) => s.parse()?,
            None => return Err(Error::MissingField("VERSION".to_string())),
        };

        let package_type_val = match package_type {
            Some(ref s) => {
                if !api_val.has_package_type() {
                    return Err(Error::InvalidManifest(format!(
                        "PACKAGE_TYPE requires API 2, recipe declares API {api_val}"
                    )));
                }
                s.parse::<PackageType>()?
            }
            None => PackageType::default(),
        };

        let topics_val: BTreeSet<String> = topics
            .split_whitespace()
            .map(|s| s.to_string())
            .collect();

        let settings_val = SettingsAxis::parse_line(&settings)?;

        let options_val = OptionSet::from_decls(OptionDecl::parse_line(&options)?)?;

        let generator_val = match generator {
            Some(ref s) => s.parse::<Generator>()?,
            None => Generator::default(),
        };

        let source_val = match source {
            Some(ref s) => Some(SourceSpec::parse(s)?),
            None => None,
        };

        let requires_val = Dependency::parse_line(&requires)?;
        let test_requires_val = Dependency::parse_line(&test_requires)?;

        let libs_val: Vec<String> = libs.split_whitespace().map(|s| s.to_string()).collect();

        Ok(Manifest {
            recipe: Recipe {
                api: api_val,
                name: name_val,
                version: version_val,
                license: license.filter(|s| !s.is_empty()),
                author: author.filter(|s| !s.is_empty()),
                url: url.filter(|s| !s.is_empty()),
                description,
                topics: topics_val,
                package_type: package_type_val,
                settings: settings_val,
                options: options_val,
                generator: generator_val,
                source: source_val,
                requires: requires_val,
                test_requires: test_requires_val,
                libs: libs_val,
                find_package,
                find_package_multi,
            },
            checksum,
        })
    }

    /// Serialize this manifest back to `KEY=VALUE` format.
    ///
    /// Produces a string suitable for writing to a recipe file.
    /// Empty-valued fields are omitted.
    pub fn serialize(&self) -> String {
        let r = &self.recipe;
        let mut lines = Vec::new();

        lines.push(format!("API={}", r.api));

        if let Some(ref author) = r.author {
            lines.push(format!("AUTHOR={author}"));
        }

        if !r.description.is_empty() {
            lines.push(format!("DESCRIPTION={}", r.description));
        }

        if let Some(ref fp) = r.find_package {
            lines.push(format!("FIND_PACKAGE={fp}"));
        }

        if let Some(ref fpm) = r.find_package_multi {
            lines.push(format!("FIND_PACKAGE_MULTI={fpm}"));
        }

        lines.push(format!("GENERATOR={}", r.generator));

        if let Some(ref license) = r.license {
            lines.push(format!("LICENSE={license}"));
        }

        if !r.libs.is_empty() {
            lines.push(format!("LIBS={}", r.libs.join(" ")));
        }

        lines.push(format!("NAME={}", r.name));

        if r.api.has_package_type() {
            lines.push(format!("PACKAGE_TYPE={}", r.package_type));
        }

        if !r.requires.is_empty() {
            lines.push(format!("REQUIRES={}", format_deps(&r.requires)));
        }

        if !r.options.is_empty() {
            let decls: Vec<String> = r.options.decls().map(|d| d.to_string()).collect();
            lines.push(format!("OPTIONS={}", decls.join(" ")));
        }

        if !r.settings.is_empty() {
            let axes: Vec<String> = r.settings.iter().map(|a| a.to_string()).collect();
            lines.push(format!("SETTINGS={}", axes.join(" ")));
        }

        if let Some(ref source) = r.source {
            lines.push(format!("SOURCE={source}"));
        }

        if !r.test_requires.is_empty() {
            lines.push(format!("TEST_REQUIRES={}", format_deps(&r.test_requires)));
        }

        if !r.topics.is_empty() {
            let topics: Vec<&str> = r.topics.iter().map(|s| s.as_str()).collect();
            lines.push(format!("TOPICS={}", topics.join(" ")));
        }

        if let Some(ref url) = r.url {
            lines.push(format!("URL={url}"));
        }

        if let Some(ref checksum) = self.checksum {
            lines.push(format!("_sha_={checksum}"));
        }

        lines.push(String::new()); // trailing newline
        lines.join("\n")
    }
}

/// Format dependency pins for serialization.
fn format_deps(deps: &[Dependency]) -> String {
    let strs: Vec<String> = deps.iter().map(|d| d.to_string()).collect();
    strs.join(" ")
}
