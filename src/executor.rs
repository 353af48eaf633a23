use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::build::BuildDescriptor;
use crate::dependency::Dependency;
use crate::error::{Error, Result};
use crate::hook::Hook;
use crate::option::{ExclusionRule, OptionValue};
use crate::package_info::PackageInfo;
use crate::recipe::Recipe;
use crate::registry::RecipeRegistry;
use crate::settings::Settings;
use crate::source::SourceSpec;

/// The narrow toolchain façade the lifecycle delegates to.
///
/// The recipe model never invokes a compiler itself; everything external
/// goes through this trait so the executor can be driven by a fake in
/// tests.
pub trait Toolchain {
    /// Acquire source material into `dest`.
    ///
    /// The default implementation is a no-op for toolchains that only
    /// build already-present trees.
    fn fetch(&mut self, source: &SourceSpec, dest: &Path) -> Result<()> {
        let _ = (source, dest);
        Ok(())
    }

    /// Configure the build tree.
    fn configure(
        &mut self,
        descriptor: &BuildDescriptor,
        source_dir: &Path,
        build_dir: &Path,
    ) -> Result<()>;

    /// Compile the configured tree.
    fn build(&mut self, descriptor: &BuildDescriptor, build_dir: &Path) -> Result<()>;

    /// Install build output into `dest`.
    fn install(&mut self, descriptor: &BuildDescriptor, build_dir: &Path, dest: &Path)
        -> Result<()>;
}

/// Directory layout for a single lifecycle run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildLayout {
    /// Where the source tree lives (or is fetched to).
    pub source_dir: PathBuf,
    /// Where the toolchain configures and builds.
    pub build_dir: PathBuf,
    /// Where the packaged artifact is assembled.
    pub package_dir: PathBuf,
}

impl BuildLayout {
    /// The conventional layout under a single root: `source/`, `build/`,
    /// `package/`.
    pub fn under(root: &Path) -> BuildLayout {
        BuildLayout {
            source_dir: root.join("source"),
            build_dir: root.join("build"),
            package_dir: root.join("package"),
        }
    }
}

/// The outcome of a completed lifecycle run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifecycleRun {
    /// Hooks in invocation order; always equals [`Hook::ORDER`] on
    /// success.
    pub invoked: Vec<Hook>,
    /// Effective options after exclusion rules.
    pub options: BTreeMap<String, OptionValue>,
    /// The descriptor handed to the toolchain.
    pub descriptor: BuildDescriptor,
    /// Build-time dependency pins declared by the recipe.
    pub requires: Vec<Dependency>,
    /// Test-only dependency pins declared by the recipe.
    pub test_requires: Vec<Dependency>,
    /// The recipe's externally visible contract.
    pub package_info: PackageInfo,
}

/// Invokes the lifecycle hooks of a recipe in the fixed order.
///
/// Single-threaded and synchronous: each hook runs to completion before
/// the next begins, and a failing hook aborts the rest of the run.
pub struct Executor<'a, T: Toolchain> {
    toolchain: &'a mut T,
    layout: BuildLayout,
    registry: Option<&'a RecipeRegistry>,
    rules: Vec<ExclusionRule>,
}

impl<'a, T: Toolchain> Executor<'a, T> {
    /// An executor over the given toolchain and layout, using the standard
    /// exclusion rules.
    pub fn new(toolchain: &'a mut T, layout: BuildLayout) -> Executor<'a, T> {
        Executor {
            toolchain,
            layout,
            registry: None,
            rules: ExclusionRule::defaults(),
        }
    }

    /// Validate dependency pins against a registry during the
    /// requirements hook.
    pub fn with_registry(mut self, registry: &'a RecipeRegistry) -> Executor<'a, T> {
        self.registry = Some(registry);
        self
    }

    /// Run the full lifecycle for a recipe.
    pub fn run(&mut self, recipe: &Recipe, settings: &Settings) -> Result<LifecycleRun> {
        let mut invoked = Vec::with_capacity(Hook::ORDER.len());
        let mut step = |hook: Hook| {
            log::debug!("{}/{}: running {hook}", recipe.name, recipe.version);
            invoked.push(hook);
        };

        // configure: pure option mutation, idempotent by construction.
        step(Hook::Configure);
        let options = recipe.options.effective(&self.rules);

        // generate: derive the toolchain-facing descriptor.
        step(Hook::Generate);
        let descriptor =
            BuildDescriptor::from_settings(&recipe.settings, recipe.generator, settings)?;

        // source: no-op unless the recipe declares one.
        step(Hook::Source);
        if let Some(ref source) = recipe.source {
            self.toolchain
                .fetch(source, &self.layout.source_dir)?;
        }

        // system_requirements: nothing to install at this layer.
        step(Hook::SystemRequirements);

        // requirements: declare pins, validating against the registry when
        // one is attached. Exact match only.
        step(Hook::Requirements);
        if let Some(registry) = self.registry {
            for dep in recipe.requires.iter().chain(&recipe.test_requires) {
                registry.lookup(dep)?;
            }
        }

        // build: delegate configure/build/install, propagating failures.
        step(Hook::Build);
        self.toolchain
            .configure(&descriptor, &self.layout.source_dir, &self.layout.build_dir)?;
        self.toolchain.build(&descriptor, &self.layout.build_dir)?;
        self.toolchain
            .install(&descriptor, &self.layout.build_dir, &self.layout.build_dir)?;

        // package: public headers plus a toolchain install into the
        // package layout.
        step(Hook::Package);
        self.copy_headers()?;
        self.toolchain.install(
            &descriptor,
            &self.layout.build_dir,
            &self.layout.package_dir,
        )?;

        // package_info: publish the external contract.
        step(Hook::PackageInfo);
        let package_info = PackageInfo::from_recipe(recipe);

        Ok(LifecycleRun {
            invoked,
            options,
            descriptor,
            requires: recipe.requires.clone(),
            test_requires: recipe.test_requires.clone(),
            package_info,
        })
    }

    fn copy_headers(&self) -> Result<()> {
        let include = self.layout.source_dir.join("include");
        if !include.is_dir() {
            return Err(Error::MissingArtifact(format!(
                "no include directory at {}",
                include.display()
            )));
        }
        copy_tree(&include, &self.layout.package_dir.join("include"))
    }
}

/// Recursively copy a directory tree.
fn copy_tree(src: &Path, dst: &Path) -> Result<()> {
    for entry in WalkDir::new(src) {
        let entry = entry.map_err(|e| Error::Io(e.to_string()))?;
        let rel = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| Error::Io(e.to_string()))?;
        let target = dst.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|e| Error::Io(e.to_string()))?;
        } else {
            fs::copy(entry.path(), &target).map_err(|e| Error::Io(e.to_string()))?;
        }
    }
    Ok(())
}
