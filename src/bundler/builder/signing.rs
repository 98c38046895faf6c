//! Code-signing rule synthesis.
//!
//! Every signing target has its own command line, but ninja rules are named
//! templates shared by all edges in the file. Each target therefore gets its
//! own rule, named after its label and toolchain, so that two bundles signed
//! differently never share one rule definition.

use super::{LoweringContext, STAMP};
use crate::bundler::{
    Error, Result,
    ninja::{BuildEdge, NinjaRecord, RuleDefinition},
    paths::OutputFile,
    settings::{BundleData, CodeSigningSettings},
    substitution::SubstitutionContext,
    target::Target,
};

/// Suffix of the per-target signing rule name.
const RULE_SUFFIX: &str = "_code_signing_rule";

/// Suffix of the stamp gathering everything the signing script reads.
const INPUT_DEPS_SUFFIX: &str = ".codesigning.inputdeps.stamp";

/// Emits the signing rule, the input-deps stamp and the signing edge of one
/// target.
pub(super) struct CodeSigningWriter<'a> {
    target: &'a Target,
    bundle: &'a BundleData,
    signing: &'a CodeSigningSettings,
    ctx: LoweringContext<'a>,
}

impl<'a> CodeSigningWriter<'a> {
    /// Returns a writer if the bundle has a code-signing script.
    pub(super) fn for_bundle(
        target: &'a Target,
        bundle: &'a BundleData,
        ctx: LoweringContext<'a>,
    ) -> Option<Self> {
        let signing = bundle.code_signing();
        signing.is_enabled().then_some(Self {
            target,
            bundle,
            signing,
            ctx,
        })
    }

    /// `__baz_bar___toolchain_default__code_signing_rule` for
    /// `//baz:bar(//toolchain:default)`.
    pub(super) fn rule_name(&self) -> String {
        format!("{}{}", self.target.label().to_rule_name(), RULE_SUFFIX)
    }

    /// The rule block. Arguments see the bundle directories relative to the
    /// build directory, since that is where ninja runs the script.
    pub(super) fn rule_definition(&self) -> Result<RuleDefinition> {
        let script = self.script()?;
        let dirs = self.bundle.layout().output_values(self.ctx.resolver);

        let mut command = vec![script.value().to_string()];
        command.extend(self.signing.args.evaluate(&SubstitutionContext::for_target(&dirs)));

        Ok(RuleDefinition {
            name: self.rule_name(),
            command,
            description: format!("CODE SIGNING {}", self.target.label()),
            restat: true,
        })
    }

    /// Emits the input-deps stamp and the signing edge, and returns the
    /// signing outputs, which supersede `bundle_outputs` for the target's
    /// final stamp.
    pub(super) fn write_edges(
        &self,
        records: &mut Vec<NinjaRecord>,
        bundle_outputs: Vec<OutputFile>,
    ) -> Result<Vec<OutputFile>> {
        let resolver = self.ctx.resolver;

        let mut inputs = vec![self.script()?];
        inputs.extend(self.signing.sources.iter().map(|s| resolver.relativize_file(s)));
        for dep in &self.signing.deps {
            let output = self.ctx.target_outputs.output_file(dep).ok_or_else(|| {
                Error::configuration(
                    self.target.label(),
                    format!("code signing dependency {dep} has no known output"),
                )
            })?;
            inputs.push(output);
        }
        inputs.extend(bundle_outputs);

        let input_deps_stamp = self.target.obj_file(INPUT_DEPS_SUFFIX);
        records.push(
            BuildEdge::new(
                vec![input_deps_stamp.clone()],
                format!("{}{}", self.target.toolchain().rule_prefix(), STAMP),
            )
            .explicit(inputs)
            .into(),
        );

        let outputs = self.outputs();
        records.push(
            BuildEdge::new(outputs.clone(), self.rule_name())
                .implicit(vec![input_deps_stamp])
                .into(),
        );

        Ok(outputs)
    }

    /// Build-relative signing outputs, in declaration order.
    fn outputs(&self) -> Vec<OutputFile> {
        let dirs = self.bundle.layout().source_values();
        self.signing
            .outputs
            .evaluate(&SubstitutionContext::for_target(&dirs))
            .iter()
            .map(|output| self.ctx.resolver.relativize(output))
            .collect()
    }

    fn script(&self) -> Result<OutputFile> {
        let script = self.signing.script.as_ref().ok_or_else(|| {
            Error::configuration(self.target.label(), "code signing script is not set")
        })?;
        Ok(self.ctx.resolver.relativize_file(script))
    }
}
