//! Package recipe types, manifest parser, and build lifecycle executor.
//!
//! This crate models declarative package recipes: identity and metadata,
//! an option set with mutual-exclusion rules, exact dependency pins, and a
//! fixed-order build lifecycle delegating to an external toolchain.
//!
//! # Overview
//!
//! A recipe never builds anything itself. It declares *what* to build —
//! options, pins, generator, source — and an [`Executor`] drives the
//! lifecycle hooks in a fixed order, handing each external step to a
//! [`Toolchain`] implementation. Recipes are stored and exchanged in a
//! simple `KEY=VALUE` manifest format.
//!
//! # Examples
//!
//! Parse a manifest:
//!
//! ```
//! use recipe_metadata::Manifest;
//!
//! let input = "\
//! NAME=think_async
//! VERSION=1.0
//! DESCRIPTION=A sample package
//! OPTIONS=shared=false fPIC=false
//! REQUIRES=asio/1.28.2
//! ";
//! let manifest = Manifest::parse(input).unwrap();
//! assert_eq!(manifest.recipe.name, "think_async");
//! assert_eq!(manifest.recipe.requires[0].to_string(), "asio/1.28.2");
//! ```
//!
//! Resolve effective options:
//!
//! ```
//! use recipe_metadata::{ExclusionRule, OptionDecl, OptionSet, OptionValue};
//!
//! let mut options = OptionSet::from_decls(vec![
//!     OptionDecl::boolean("shared", false),
//!     OptionDecl::boolean("fPIC", false),
//! ])
//! .unwrap();
//! options.set("shared", OptionValue::Bool(true)).unwrap();
//!
//! let effective = options.effective(&ExclusionRule::defaults());
//! assert_eq!(effective.get("fPIC"), None);
//! ```

mod api;
mod build;
mod dependency;
mod error;
mod executor;
mod hook;
mod manifest;
mod option;
mod package_info;
mod recipe;
mod registry;
mod settings;
mod source;
mod version;

// Re-export public types
pub use api::RecipeApi;
pub use build::{BuildDescriptor, Generator};
pub use dependency::Dependency;
pub use error::{Error, Result};
pub use executor::{BuildLayout, Executor, LifecycleRun, Toolchain};
pub use hook::Hook;
pub use manifest::Manifest;
pub use option::{apply_rules, ExclusionRule, OptionDecl, OptionSet, OptionValue};
pub use package_info::PackageInfo;
pub use recipe::{PackageType, Recipe};
pub use registry::RecipeRegistry;
pub use settings::{BuildType, Settings, SettingsAxis};
pub use source::SourceSpec;
pub use version::Version;
