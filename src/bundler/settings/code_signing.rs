//! Code-signing step configuration.

use crate::bundler::{paths::SourceFile, substitution::SubstitutionList, target::Label};

/// The optional code-signing step of a bundle.
///
/// The step exists only when [`script`](Self::script) is set; every other
/// field is meaningless without it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeSigningSettings {
    /// Script run to sign the bundle.
    pub script: Option<SourceFile>,

    /// Extra files the script reads, besides the bundle contents.
    pub sources: Vec<SourceFile>,

    /// Other targets whose output the script reads (typically the main
    /// binary). Resolved by label at lowering time.
    pub deps: Vec<Label>,

    /// Files the script produces.
    pub outputs: SubstitutionList,

    /// Arguments passed to the script.
    pub args: SubstitutionList,
}

impl CodeSigningSettings {
    /// Settings running `script`.
    pub fn with_script(script: impl Into<SourceFile>) -> Self {
        Self {
            script: Some(script.into()),
            ..Default::default()
        }
    }

    /// Sets the extra input files.
    pub fn sources(mut self, sources: Vec<SourceFile>) -> Self {
        self.sources = sources;
        self
    }

    /// Sets the targets whose outputs the script reads.
    pub fn deps(mut self, deps: Vec<Label>) -> Self {
        self.deps = deps;
        self
    }

    /// Sets the produced files.
    pub fn outputs(mut self, outputs: SubstitutionList) -> Self {
        self.outputs = outputs;
        self
    }

    /// Sets the script arguments.
    pub fn args(mut self, args: SubstitutionList) -> Self {
        self.args = args;
        self
    }

    /// Whether signing records are emitted.
    pub fn is_enabled(&self) -> bool {
        self.script.is_some()
    }

    /// Whether any field other than the script is set.
    pub fn has_any_field(&self) -> bool {
        !self.sources.is_empty()
            || !self.deps.is_empty()
            || !self.outputs.is_empty()
            || !self.args.is_empty()
    }
}
