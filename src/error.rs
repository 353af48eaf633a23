/// Error type for recipe-metadata parsing and lifecycle operations.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    /// Invalid recipe API revision.
    #[error("invalid API revision: {0}")]
    InvalidApi(String),

    /// Invalid version string.
    #[error("invalid version: {0}")]
    InvalidVersion(String),

    /// Invalid lifecycle hook name.
    #[error("invalid hook: {0}")]
    InvalidHook(String),

    /// Invalid option declaration or value.
    #[error("invalid option: {0}")]
    InvalidOption(String),

    /// Invalid dependency pin.
    #[error("invalid dependency: {0}")]
    InvalidDependency(String),

    /// Invalid settings axis name.
    #[error("invalid settings axis: {0}")]
    InvalidAxis(String),

    /// Invalid build type.
    #[error("invalid build type: {0}")]
    InvalidBuildType(String),

    /// Invalid toolchain generator.
    #[error("invalid generator: {0}")]
    InvalidGenerator(String),

    /// Invalid SOURCE specification.
    #[error("invalid source: {0}")]
    InvalidSource(String),

    /// Invalid package type.
    #[error("invalid package type: {0}")]
    InvalidPackageType(String),

    /// Error parsing a recipe manifest.
    #[error("invalid manifest: {0}")]
    InvalidManifest(String),

    /// Missing mandatory field in a manifest.
    #[error("missing required field: {0}")]
    MissingField(String),

    /// A settings axis the recipe declares has no value.
    #[error("incomplete settings: missing {0}")]
    IncompleteSettings(String),

    /// A recipe with the same (name, version) is already registered.
    #[error("duplicate recipe: {0}")]
    DuplicateRecipe(String),

    /// A dependency pin has no exact match in the registry.
    #[error("unknown dependency: {0}")]
    UnknownDependency(String),

    /// An expected build artifact is absent at package time.
    #[error("missing artifact: {0}")]
    MissingArtifact(String),

    /// Source acquisition failed.
    #[error("fetch failed: {0}")]
    Fetch(String),

    /// The underlying toolchain reported a failure.
    #[error("toolchain failed: {0}")]
    Toolchain(String),

    /// Filesystem error during packaging.
    #[error("io error: {0}")]
    Io(String),
}

/// Result type for recipe-metadata operations.
pub type Result<T> = std::result::Result<T, Error>;
