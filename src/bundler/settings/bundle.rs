//! The resolved description of a bundle target.

use super::{BundleFileRule, BundleLayout, CodeSigningSettings};
use crate::bundler::paths::SourceFile;

/// Everything needed to lower a `create_bundle` target.
///
/// Built once upstream via [`BundleDataBuilder`](super::BundleDataBuilder)
/// and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleData {
    layout: BundleLayout,
    file_rules: Vec<BundleFileRule>,
    asset_catalog_sources: Vec<SourceFile>,
    code_signing: CodeSigningSettings,
}

impl BundleData {
    pub(super) fn new(
        layout: BundleLayout,
        file_rules: Vec<BundleFileRule>,
        asset_catalog_sources: Vec<SourceFile>,
        code_signing: CodeSigningSettings,
    ) -> Self {
        Self {
            layout,
            file_rules,
            asset_catalog_sources,
            code_signing,
        }
    }

    /// Bundle directories.
    pub fn layout(&self) -> &BundleLayout {
        &self.layout
    }

    /// Copy rules in declaration order.
    pub fn file_rules(&self) -> &[BundleFileRule] {
        &self.file_rules
    }

    /// Files of the asset catalog, in declaration order. Empty when the
    /// bundle has no asset catalog.
    pub fn asset_catalog_sources(&self) -> &[SourceFile] {
        &self.asset_catalog_sources
    }

    /// Code-signing step.
    pub fn code_signing(&self) -> &CodeSigningSettings {
        &self.code_signing
    }
}
