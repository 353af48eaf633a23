use crate::recipe::Recipe;

/// The externally visible contract of a packaged recipe.
///
/// Downstream consumers read this to learn which libraries the package
/// exports and under which find-package names to look for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageInfo {
    /// Exported library names.
    pub libs: Vec<String>,
    /// Single-config find-package alias.
    pub find_package: String,
    /// Multi-config find-package alias.
    pub find_package_multi: String,
}

impl PackageInfo {
    /// Derive the package info a recipe publishes.
    ///
    /// Every field falls back to the package name when the recipe does not
    /// override it.
    pub fn from_recipe(recipe: &Recipe) -> PackageInfo {
        let libs = if recipe.libs.is_empty() {
            vec![recipe.name.clone()]
        } else {
            recipe.libs.clone()
        };
        let find_package = recipe
            .find_package
            .clone()
            .unwrap_or_else(|| recipe.name.clone());
        let find_package_multi = recipe
            .find_package_multi
            .clone()
            .unwrap_or_else(|| find_package.clone());
        PackageInfo {
            libs,
            find_package,
            find_package_multi,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_recipe_name() {
        let recipe = Recipe::new("bookmark_service", "0.0.0".parse().unwrap());
        let info = PackageInfo::from_recipe(&recipe);
        assert_eq!(info.libs, vec!["bookmark_service"]);
        assert_eq!(info.find_package, "bookmark_service");
        assert_eq!(info.find_package_multi, "bookmark_service");
    }

    #[test]
    fn explicit_fields_win() {
        let mut recipe = Recipe::new("think_async", "1.0".parse().unwrap());
        recipe.libs = vec!["Think-Async".to_string()];
        recipe.find_package = Some("Think-Async".to_string());
        let info = PackageInfo::from_recipe(&recipe);
        assert_eq!(info.libs, vec!["Think-Async"]);
        assert_eq!(info.find_package, "Think-Async");
        // multi alias falls back to the single-config alias
        assert_eq!(info.find_package_multi, "Think-Async");
    }
}
