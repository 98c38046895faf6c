//! Resolved targets handed to the lowering stage.

mod label;
mod toolchain;

pub use label::Label;
pub use toolchain::Toolchain;

use crate::bundler::{paths::OutputFile, settings::BundleData};
use std::collections::{BTreeMap, HashMap};

/// What a target builds.
///
/// Each kind has exactly one lowering function; see
/// [`lower_target`](crate::bundler::builder::lower_target). Only bundles are
/// lowered by this crate.
#[derive(Debug, Clone)]
pub enum TargetKind {
    /// A `create_bundle` target assembling an application or framework
    /// bundle.
    CreateBundle(BundleData),
}

impl TargetKind {
    /// Short name of the kind, for diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Self::CreateBundle(_) => "create_bundle",
        }
    }
}

/// A fully resolved target.
#[derive(Debug, Clone)]
pub struct Target {
    label: Label,
    toolchain: Toolchain,
    kind: TargetKind,
}

impl Target {
    /// Creates a target.
    ///
    /// A label without a toolchain is qualified with `toolchain`, so that the
    /// same label built by two toolchains names two distinct targets.
    pub fn new(label: Label, toolchain: Toolchain, kind: TargetKind) -> Self {
        let label = match label.toolchain() {
            Some(_) => label,
            None => label.with_toolchain(toolchain.label()),
        };
        Self {
            label,
            toolchain,
            kind,
        }
    }

    /// Creates a `create_bundle` target.
    pub fn create_bundle(label: Label, toolchain: Toolchain, bundle: BundleData) -> Self {
        Self::new(label, toolchain, TargetKind::CreateBundle(bundle))
    }

    /// The target's label.
    pub fn label(&self) -> &Label {
        &self.label
    }

    /// The toolchain the target is built with.
    pub fn toolchain(&self) -> &Toolchain {
        &self.toolchain
    }

    /// What the target builds.
    pub fn kind(&self) -> &TargetKind {
        &self.kind
    }

    /// The bundle description, for `create_bundle` targets.
    pub fn bundle_data(&self) -> Option<&BundleData> {
        match &self.kind {
            TargetKind::CreateBundle(bundle) => Some(bundle),
        }
    }

    /// Build-relative file named after the target inside its object
    /// directory: `obj/baz/bar<suffix>` for `//baz:bar`.
    pub fn obj_file(&self, suffix: &str) -> OutputFile {
        let dir = self.label.dir().value();
        let dir = dir.trim_start_matches('/');
        OutputFile::new(format!(
            "{}obj/{}{}{}",
            self.toolchain.output_subdir(),
            dir,
            self.label.name(),
            suffix
        ))
    }

    /// The stamp other targets depend on: `obj/baz/bar.stamp`.
    pub fn stamp_file(&self) -> OutputFile {
        self.obj_file(".stamp")
    }
}

/// Looks up the output file of another target by label.
///
/// The lookup is built once the whole graph is resolved. Targets refer to
/// each other through it instead of holding references, so no target owns
/// another.
pub trait TargetOutputs: Send + Sync {
    /// The build-relative output of `label`, if the target is known.
    fn output_file(&self, label: &Label) -> Option<OutputFile>;
}

impl TargetOutputs for BTreeMap<Label, OutputFile> {
    fn output_file(&self, label: &Label) -> Option<OutputFile> {
        self.get(label).cloned()
    }
}

impl TargetOutputs for HashMap<Label, OutputFile> {
    fn output_file(&self, label: &Label) -> Option<OutputFile> {
        self.get(label).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::settings::{BundleDataBuilder, BundleLayout};

    fn target(label: &str, default_toolchain: bool) -> Target {
        let toolchain = Toolchain::new(Label::parse("//toolchain:clang").unwrap(), default_toolchain);
        let bundle = BundleDataBuilder::new()
            .layout(BundleLayout::under_root("//out/Debug/bar.bundle"))
            .build(&Label::parse(label).unwrap())
            .unwrap();
        Target::create_bundle(Label::parse(label).unwrap(), toolchain, bundle)
    }

    #[test]
    fn test_stamp_file() {
        assert_eq!(target("//baz:bar", true).stamp_file().value(), "obj/baz/bar.stamp");
        assert_eq!(target("//:bar", true).stamp_file().value(), "obj/bar.stamp");
    }

    #[test]
    fn test_stamp_file_secondary_toolchain() {
        assert_eq!(
            target("//baz:bar", false).stamp_file().value(),
            "clang/obj/baz/bar.stamp"
        );
    }

    #[test]
    fn test_obj_file_suffix() {
        assert_eq!(
            target("//baz:bar", true)
                .obj_file(".codesigning.inputdeps.stamp")
                .value(),
            "obj/baz/bar.codesigning.inputdeps.stamp"
        );
    }

    #[test]
    fn test_label_is_qualified_with_toolchain() {
        assert_eq!(
            target("//baz:bar", true).label().to_string(),
            "//baz:bar(//toolchain:clang)"
        );

        let toolchain = Toolchain::new(Label::parse("//toolchain:clang").unwrap(), true);
        let explicit = Label::parse("//baz:bar(//toolchain:ios)").unwrap();
        let bundle = BundleDataBuilder::new()
            .layout(BundleLayout::under_root("//out/Debug/bar.bundle"))
            .build(&explicit)
            .unwrap();
        let target = Target::create_bundle(explicit.clone(), toolchain, bundle);
        assert_eq!(target.label(), &explicit);
    }

    #[test]
    fn test_target_outputs_lookup() {
        let mut outputs = BTreeMap::new();
        let quz = Label::parse("//baz:quz").unwrap();
        outputs.insert(quz.clone(), OutputFile::new("obj/baz/quz/bin"));

        assert_eq!(outputs.output_file(&quz).unwrap().value(), "obj/baz/quz/bin");
        assert!(outputs.output_file(&Label::parse("//baz:bar").unwrap()).is_none());
        assert_eq!(target("//baz:bar", true).kind().name(), "create_bundle");
    }
}
