//! The toolchain a target is lowered for.

use super::Label;

/// Toolchain identity as far as lowering is concerned.
///
/// Rules of a non-default toolchain are declared with a `<name>_` prefix and
/// its objects live under `<name>/`, so that several toolchains can share
/// one ninja build directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    label: Label,
    is_default: bool,
}

impl Toolchain {
    /// Creates a toolchain.
    pub fn new(label: Label, is_default: bool) -> Self {
        Self { label, is_default }
    }

    /// The toolchain label, e.g. `//toolchain:default`.
    pub fn label(&self) -> &Label {
        &self.label
    }

    /// Whether this is the default toolchain of the build.
    pub fn is_default(&self) -> bool {
        self.is_default
    }

    /// Prefix for the names of the toolchain's ninja rules
    /// (`stamp`, `copy_bundle_data`, `compile_xcassets`).
    pub fn rule_prefix(&self) -> String {
        if self.is_default {
            String::new()
        } else {
            format!("{}_", self.label.name())
        }
    }

    /// Subdirectory of the build directory holding the toolchain's outputs,
    /// with trailing slash, or empty for the default toolchain.
    pub fn output_subdir(&self) -> String {
        if self.is_default {
            String::new()
        } else {
            format!("{}/", self.label.name())
        }
    }
}
