//! Bundle directory layout.

use crate::bundler::{
    paths::{OutputFile, PathResolver, SourceDir},
    substitution::BundleDirValues,
};

/// The four directories of a bundle.
///
/// All four are source-absolute and normally live inside the build
/// directory. Nesting `resources`, `executable` and `plugins` under `root` is
/// the convention but is not enforced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleLayout {
    root: SourceDir,
    resources: SourceDir,
    executable: SourceDir,
    plugins: SourceDir,
}

impl BundleLayout {
    /// Creates a layout from explicit directories.
    pub fn new(
        root: impl Into<SourceDir>,
        resources: impl Into<SourceDir>,
        executable: impl Into<SourceDir>,
        plugins: impl Into<SourceDir>,
    ) -> Self {
        Self {
            root: root.into(),
            resources: resources.into(),
            executable: executable.into(),
            plugins: plugins.into(),
        }
    }

    /// Layout with `Resources`, `Executable` and `PlugIns` directly under
    /// `root`.
    pub fn under_root(root: impl Into<SourceDir>) -> Self {
        let root = root.into();
        let child = |name: &str| SourceDir::new(format!("{}{}", root.value(), name));
        Self {
            resources: child("Resources"),
            executable: child("Executable"),
            plugins: child("PlugIns"),
            root,
        }
    }

    /// `{{bundle_root_dir}}`
    pub fn root(&self) -> &SourceDir {
        &self.root
    }

    /// `{{bundle_resources_dir}}`
    pub fn resources(&self) -> &SourceDir {
        &self.resources
    }

    /// `{{bundle_executable_dir}}`
    pub fn executable(&self) -> &SourceDir {
        &self.executable
    }

    /// `{{bundle_plugins_dir}}`
    pub fn plugins(&self) -> &SourceDir {
        &self.plugins
    }

    /// Whether all four directories are set.
    pub fn is_complete(&self) -> bool {
        [&self.root, &self.resources, &self.executable, &self.plugins]
            .iter()
            .all(|dir| !dir.is_empty())
    }

    /// Placeholder values for building output paths: source-absolute,
    /// rebased by the caller once the template is expanded.
    pub fn source_values(&self) -> BundleDirValues {
        BundleDirValues {
            root: self.root.value_no_slash().to_string(),
            resources: self.resources.value_no_slash().to_string(),
            executable: self.executable.value_no_slash().to_string(),
            plugins: self.plugins.value_no_slash().to_string(),
        }
    }

    /// Placeholder values for command arguments: relative to the build
    /// directory ninja runs commands from.
    pub fn output_values(&self, resolver: &dyn PathResolver) -> BundleDirValues {
        BundleDirValues {
            root: resolver.relativize_dir(&self.root).value().to_string(),
            resources: resolver.relativize_dir(&self.resources).value().to_string(),
            executable: resolver.relativize_dir(&self.executable).value().to_string(),
            plugins: resolver.relativize_dir(&self.plugins).value().to_string(),
        }
    }

    /// The outermost bundle directory inside the build directory, which names
    /// the bundle's phony alias: `//out/Debug/bar.bundle/Contents` gives
    /// `bar.bundle`.
    pub fn root_output(&self, resolver: &dyn PathResolver) -> OutputFile {
        resolver.relativize_dir(&self.root).outermost_component()
    }

    /// Build-relative path of the compiled asset catalog.
    pub fn assets_car_output(&self, resolver: &dyn PathResolver) -> OutputFile {
        resolver.relativize(&format!("{}Assets.car", self.resources.value()))
    }
}
