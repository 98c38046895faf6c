//! Builder for constructing BundleData.

use super::{BundleData, BundleFileRule, BundleLayout, CodeSigningSettings};
use crate::bundler::{Error, Result, paths::SourceFile, target::Label};

/// Builder for constructing [`BundleData`].
///
/// Provides a fluent API and validates the result once, in
/// [`build`](Self::build).
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_ninja::bundler::{
///     BundleDataBuilder, BundleFileRule, BundleLayout, Label, SubstitutionPattern,
/// };
///
/// # fn example() -> kodegen_bundler_ninja::bundler::Result<()> {
/// let label = Label::parse("//baz:bar")?;
/// let pattern = SubstitutionPattern::parse("{{bundle_resources_dir}}/{{source_file_part}}")
///     .map_err(|e| kodegen_bundler_ninja::bundler::Error::template(&label, e))?;
///
/// let bundle = BundleDataBuilder::new()
///     .layout(BundleLayout::under_root("//out/Debug/bar.bundle"))
///     .file_rule(BundleFileRule::new(vec!["//foo/input1.txt".into()], pattern))
///     .build(&label)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct BundleDataBuilder {
    layout: Option<BundleLayout>,
    file_rules: Vec<BundleFileRule>,
    asset_catalog_sources: Vec<SourceFile>,
    code_signing: CodeSigningSettings,
}

impl BundleDataBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the bundle directories.
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn layout(mut self, layout: BundleLayout) -> Self {
        self.layout = Some(layout);
        self
    }

    /// Appends a copy rule. Rules are lowered in the order they are added.
    pub fn file_rule(mut self, rule: BundleFileRule) -> Self {
        self.file_rules.push(rule);
        self
    }

    /// Replaces all copy rules.
    pub fn file_rules(mut self, rules: Vec<BundleFileRule>) -> Self {
        self.file_rules = rules;
        self
    }

    /// Sets the asset catalog files.
    ///
    /// Default: Empty (no asset catalog)
    pub fn asset_catalog_sources(mut self, sources: Vec<SourceFile>) -> Self {
        self.asset_catalog_sources = sources;
        self
    }

    /// Sets the code-signing step.
    ///
    /// Default: no code signing
    pub fn code_signing(mut self, code_signing: CodeSigningSettings) -> Self {
        self.code_signing = code_signing;
        self
    }

    /// Builds the bundle description for the target `label`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if:
    /// - the layout is missing or incomplete
    /// - code-signing outputs, args, sources or deps are set without a script
    /// - a code-signing script is set without outputs
    pub fn build(self, label: &Label) -> Result<BundleData> {
        let layout = self
            .layout
            .ok_or_else(|| Error::configuration(label, "bundle layout is required"))?;
        if !layout.is_complete() {
            return Err(Error::configuration(
                label,
                "root, resources, executable and plugins directories must all be set",
            ));
        }

        let signing = &self.code_signing;
        if !signing.is_enabled() && signing.has_any_field() {
            return Err(Error::configuration(
                label,
                "code signing outputs, args, sources or deps are set without a code signing script",
            ));
        }
        if signing.is_enabled() && signing.outputs.is_empty() {
            return Err(Error::configuration(
                label,
                "a code signing script requires at least one code signing output",
            ));
        }

        Ok(BundleData::new(
            layout,
            self.file_rules,
            self.asset_catalog_sources,
            self.code_signing,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::substitution::SubstitutionList;

    fn label() -> Label {
        Label::parse("//baz:bar").unwrap()
    }

    fn layout() -> BundleLayout {
        BundleLayout::under_root("//out/Debug/bar.bundle")
    }

    #[test]
    fn test_layout_is_required() {
        let err = BundleDataBuilder::new().build(&label()).unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
        assert_eq!(err.target(), Some("//baz:bar"));
    }

    #[test]
    fn test_incomplete_layout_is_rejected() {
        let err = BundleDataBuilder::new()
            .layout(BundleLayout::new("//out/Debug/bar.bundle", "", "", ""))
            .build(&label())
            .unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
    }

    #[test]
    fn test_minimal_bundle() {
        let bundle = BundleDataBuilder::new().layout(layout()).build(&label()).unwrap();
        assert!(bundle.file_rules().is_empty());
        assert!(bundle.asset_catalog_sources().is_empty());
        assert!(!bundle.code_signing().is_enabled());
    }

    #[test]
    fn test_signing_fields_without_script_are_rejected() {
        let signing = CodeSigningSettings {
            args: SubstitutionList::parse_for_target(["-v"]).unwrap(),
            ..Default::default()
        };
        let err = BundleDataBuilder::new()
            .layout(layout())
            .code_signing(signing)
            .build(&label())
            .unwrap_err();
        assert!(err.to_string().contains("without a code signing script"));
    }

    #[test]
    fn test_script_without_outputs_is_rejected() {
        let err = BundleDataBuilder::new()
            .layout(layout())
            .code_signing(CodeSigningSettings::with_script("//build/codesign.py"))
            .build(&label())
            .unwrap_err();
        assert!(err.to_string().contains("at least one code signing output"));
    }

    #[test]
    fn test_script_with_outputs_and_no_args_is_valid() {
        let signing = CodeSigningSettings::with_script("//build/codesign.py").outputs(
            SubstitutionList::parse_for_target(["{{bundle_root_dir}}/quz"]).unwrap(),
        );
        let bundle = BundleDataBuilder::new()
            .layout(layout())
            .code_signing(signing)
            .build(&label())
            .unwrap();
        assert!(bundle.code_signing().is_enabled());
    }
}
