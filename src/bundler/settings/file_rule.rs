//! Per-source copy rules.

use crate::bundler::{
    paths::SourceFile,
    substitution::{BundleDirValues, SubstitutionContext, SubstitutionPattern},
};

/// Copies each source into the bundle at the path the pattern gives for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleFileRule {
    sources: Vec<SourceFile>,
    pattern: SubstitutionPattern,
}

impl BundleFileRule {
    /// Creates a rule. An empty source list is legal and copies nothing.
    pub fn new(sources: Vec<SourceFile>, pattern: SubstitutionPattern) -> Self {
        Self { sources, pattern }
    }

    /// Sources in declaration order.
    pub fn sources(&self) -> &[SourceFile] {
        &self.sources
    }

    /// The output pattern.
    pub fn pattern(&self) -> &SubstitutionPattern {
        &self.pattern
    }

    /// Expands the pattern for one source.
    pub fn apply_to_source(&self, dirs: &BundleDirValues, source: &SourceFile) -> String {
        self.pattern.evaluate(&SubstitutionContext::for_source(dirs, source))
    }
}
