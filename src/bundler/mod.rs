//! Lowering of bundle targets into ninja build statements.
//!
//! A resolved `create_bundle` target (its directory layout, copy rules,
//! asset catalog and optional code-signing step) is turned into an ordered
//! list of [`NinjaRecord`]s, which [`NinjaWriter`] renders byte-for-byte in
//! the format ninja reads.
//!
//! # Example
//!
//! ```no_run
//! use kodegen_bundler_ninja::bundler::{
//!     BuildDirResolver, BundleDataBuilder, BundleFileRule, BundleLayout, Error, Label,
//!     Lowerer, SourceDir, SubstitutionPattern, Target, Toolchain,
//! };
//! use std::collections::BTreeMap;
//!
//! # fn example() -> kodegen_bundler_ninja::bundler::Result<()> {
//! let label = Label::parse("//baz:bar")?;
//! let pattern = SubstitutionPattern::parse("{{bundle_resources_dir}}/{{source_file_part}}")
//!     .map_err(|e| Error::template(&label, e))?;
//! let bundle = BundleDataBuilder::new()
//!     .layout(BundleLayout::under_root("//out/Debug/bar.bundle"))
//!     .file_rule(BundleFileRule::new(vec!["//foo/input1.txt".into()], pattern))
//!     .build(&label)?;
//!
//! let toolchain = Toolchain::new(Label::parse("//toolchain:default")?, true);
//! let target = Target::create_bundle(label, toolchain, bundle);
//!
//! let lowerer = Lowerer::new(
//!     BuildDirResolver::new(SourceDir::new("//out/Debug/")),
//!     BTreeMap::new(),
//! );
//! print!("{}", lowerer.lower(&target)?.text());
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod error;
pub mod ninja;
pub mod paths;
pub mod settings;
pub mod substitution;
pub mod target;
pub mod utils;

pub use builder::{CreateBundleWriter, LoweredTarget, Lowerer, LoweringContext, lower_target};
pub use error::{Error, Result};
pub use ninja::{BuildEdge, NinjaRecord, NinjaWriter, RuleDefinition, render};
pub use paths::{BuildDirResolver, OutputFile, PathResolver, SourceDir, SourceFile};
pub use settings::{
    BundleData, BundleDataBuilder, BundleFileRule, BundleLayout, CodeSigningSettings,
};
pub use substitution::{
    Substitution, SubstitutionList, SubstitutionPattern, TemplateError, TemplateErrorKind,
};
pub use target::{Label, Target, TargetKind, TargetOutputs, Toolchain};
