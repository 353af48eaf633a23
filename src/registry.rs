use std::collections::BTreeMap;

use crate::dependency::Dependency;
use crate::error::{Error, Result};
use crate::recipe::Recipe;
use crate::version::Version;

/// An aggregate of recipes keyed by `(name, version)`.
///
/// Identity is enforced: adding a second recipe with the same name and
/// version is rejected rather than silently shadowing the first, even when
/// the two declare diverging dependency pins.
#[derive(Debug, Clone, Default)]
pub struct RecipeRegistry {
    recipes: BTreeMap<(String, Version), Recipe>,
}

impl RecipeRegistry {
    /// An empty registry.
    pub fn new() -> RecipeRegistry {
        RecipeRegistry::default()
    }

    /// Number of registered recipes.
    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Register a recipe.
    ///
    /// Fails with [`Error::DuplicateRecipe`] if a recipe with the same
    /// `(name, version)` is already present.
    pub fn add(&mut self, recipe: Recipe) -> Result<()> {
        let key = (recipe.name.clone(), recipe.version.clone());
        if self.recipes.contains_key(&key) {
            return Err(Error::DuplicateRecipe(format!(
                "{}/{}",
                key.0, key.1
            )));
        }
        log::debug!("registering recipe {}/{}", key.0, key.1);
        self.recipes.insert(key, recipe);
        Ok(())
    }

    /// Look up a recipe by exact name and version.
    pub fn get(&self, name: &str, version: &Version) -> Option<&Recipe> {
        self.recipes
            .get(&(name.to_string(), version.clone()))
    }

    /// Resolve a dependency pin to a registered recipe.
    ///
    /// The match is exact: a pin for `asio/1.30.2` is never satisfied by
    /// `asio/1.30.1`.
    pub fn lookup(&self, dep: &Dependency) -> Result<&Recipe> {
        self.get(&dep.name, &dep.version)
            .ok_or_else(|| Error::UnknownDependency(dep.to_string()))
    }

    /// Iterate over the registered recipes in key order.
    pub fn iter(&self) -> impl Iterator<Item = &Recipe> {
        self.recipes.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe(name: &str, version: &str) -> Recipe {
        Recipe::new(name, version.parse().unwrap())
    }

    #[test]
    fn add_and_get() {
        let mut registry = RecipeRegistry::new();
        registry.add(recipe("asio", "1.30.1")).unwrap();
        assert_eq!(registry.len(), 1);
        let v: Version = "1.30.1".parse().unwrap();
        assert!(registry.get("asio", &v).is_some());
    }

    #[test]
    fn duplicate_identity_rejected() {
        let mut registry = RecipeRegistry::new();
        registry.add(recipe("think_async", "1.0")).unwrap();

        // Same identity, diverging pins: still a collision.
        let mut conflicting = recipe("think_async", "1.0");
        conflicting.requires = vec!["asio/1.30.1".parse().unwrap()];
        let err = registry.add(conflicting).unwrap_err();
        assert_eq!(err, Error::DuplicateRecipe("think_async/1.0".to_string()));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn distinct_versions_coexist() {
        let mut registry = RecipeRegistry::new();
        registry.add(recipe("asio", "1.28.2")).unwrap();
        registry.add(recipe("asio", "1.30.1")).unwrap();
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn lookup_exact_pin() {
        let mut registry = RecipeRegistry::new();
        registry.add(recipe("asio", "1.30.1")).unwrap();

        let pinned: Dependency = "asio/1.30.1".parse().unwrap();
        assert!(registry.lookup(&pinned).is_ok());

        // A neighbouring version must never be substituted.
        let other: Dependency = "asio/1.30.2".parse().unwrap();
        let err = registry.lookup(&other).unwrap_err();
        assert_eq!(err, Error::UnknownDependency("asio/1.30.2".to_string()));
    }

    #[test]
    fn iter_in_key_order() {
        let mut registry = RecipeRegistry::new();
        registry.add(recipe("zlib", "1.2.13")).unwrap();
        registry.add(recipe("asio", "1.30.1")).unwrap();
        let names: Vec<&str> = registry.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["asio", "zlib"]);
    }
}
