//! Lowering of `create_bundle` targets.

use super::{
    COMPILE_XCASSETS, COPY_BUNDLE_DATA, LoweringContext, STAMP, assets::asset_catalog_dir,
    signing::CodeSigningWriter,
};
use crate::bundler::{
    Error, Result,
    ninja::{BuildEdge, NinjaRecord, PHONY},
    paths::{OutputFile, SourceDir},
    settings::BundleData,
    target::Target,
};
use std::collections::BTreeSet;

/// Turns one bundle target into ninja records.
///
/// Records come out in this order:
///
/// 1. the code-signing rule definition, if the bundle is signed
/// 2. one `copy_bundle_data` edge per (rule, source), in declaration order
/// 3. one `compile_xcassets` edge, if the bundle has an asset catalog
/// 4. the code-signing input-deps stamp and signing edge, if signed
/// 5. the target stamp over every output produced so far, or over the
///    signing outputs when signed
/// 6. a `phony` alias from the bundle root directory to the stamp
///
/// Nothing is returned on error, so a failed target leaves no partial
/// output behind.
#[derive(Debug)]
pub struct CreateBundleWriter<'a> {
    target: &'a Target,
    bundle: &'a BundleData,
    ctx: LoweringContext<'a>,
    rule_prefix: String,
}

impl<'a> CreateBundleWriter<'a> {
    /// Creates a writer for `target`, whose bundle description is `bundle`.
    pub fn new(target: &'a Target, bundle: &'a BundleData, ctx: LoweringContext<'a>) -> Self {
        Self {
            target,
            bundle,
            ctx,
            rule_prefix: target.toolchain().rule_prefix(),
        }
    }

    /// Produces the target's records.
    pub fn run(&self) -> Result<Vec<NinjaRecord>> {
        let mut records = Vec::new();
        let code_signing = CodeSigningWriter::for_bundle(self.target, self.bundle, self.ctx);

        // The signing rule has to be declared before the edge using it.
        if let Some(signing) = &code_signing {
            records.push(signing.rule_definition()?.into());
        }

        let mut outputs = Vec::new();
        self.write_copy_bundle_data_rules(&mut records, &mut outputs);
        self.write_compile_assets_catalog_rule(&mut records, &mut outputs)?;

        if let Some(signing) = &code_signing {
            outputs = signing.write_edges(&mut records, outputs)?;
        }

        self.write_stamp_and_alias(&mut records, outputs);

        log::debug!(
            "Lowered {} into {} ninja records",
            self.target.label(),
            records.len()
        );
        Ok(records)
    }

    fn write_copy_bundle_data_rules(
        &self,
        records: &mut Vec<NinjaRecord>,
        outputs: &mut Vec<OutputFile>,
    ) {
        let resolver = self.ctx.resolver;
        let dirs = self.bundle.layout().source_values();
        let rule = format!("{}{}", self.rule_prefix, COPY_BUNDLE_DATA);

        for file_rule in self.bundle.file_rules() {
            for source in file_rule.sources() {
                let output = resolver.relativize(&file_rule.apply_to_source(&dirs, source));
                records.push(
                    BuildEdge::new(vec![output.clone()], rule.as_str())
                        .explicit(vec![resolver.relativize_file(source)])
                        .into(),
                );
                outputs.push(output);
            }
        }
    }

    fn write_compile_assets_catalog_rule(
        &self,
        records: &mut Vec<NinjaRecord>,
        outputs: &mut Vec<OutputFile>,
    ) -> Result<()> {
        let sources = self.bundle.asset_catalog_sources();
        if sources.is_empty() {
            return Ok(());
        }

        let resolver = self.ctx.resolver;
        let mut catalogs: BTreeSet<SourceDir> = BTreeSet::new();
        for source in sources {
            let catalog = asset_catalog_dir(source).ok_or_else(|| {
                Error::configuration(
                    self.target.label(),
                    format!("asset catalog source {source} is not inside an .xcassets directory"),
                )
            })?;
            catalogs.insert(catalog);
        }

        let output = self.bundle.layout().assets_car_output(resolver);
        records.push(
            BuildEdge::new(
                vec![output.clone()],
                format!("{}{}", self.rule_prefix, COMPILE_XCASSETS),
            )
            .explicit(catalogs.iter().map(|c| resolver.relativize_dir(c)).collect())
            .implicit(sources.iter().map(|s| resolver.relativize_file(s)).collect())
            .into(),
        );
        outputs.push(output);
        Ok(())
    }

    fn write_stamp_and_alias(&self, records: &mut Vec<NinjaRecord>, outputs: Vec<OutputFile>) {
        let stamp = self.target.stamp_file();
        records.push(
            BuildEdge::new(vec![stamp.clone()], format!("{}{}", self.rule_prefix, STAMP))
                .explicit(outputs)
                .into(),
        );

        let root = self.bundle.layout().root_output(self.ctx.resolver);
        records.push(BuildEdge::new(vec![root], PHONY).explicit(vec![stamp]).into());
    }
}
