//! Target lowering.
//!
//! This module turns resolved [`Target`]s into ordered ninja records.
//!
//! # Overview
//!
//! Lowering a target:
//! 1. Dispatches on the [`TargetKind`](crate::bundler::target::TargetKind)
//! 2. Expands the bundle's templates for every source
//! 3. Emits copy, asset catalog and code-signing edges
//! 4. Aggregates everything behind one stamp and a `phony` alias
//!
//! Lowering is a pure function of its input. The [`Lowerer`] runs many
//! targets concurrently and keeps their output in declaration order.
//!
//! # Module Organization
//!
//! - [`assets`] - Asset catalog directory lookup
//! - [`create_bundle`] - [`CreateBundleWriter`] for `create_bundle` targets
//! - [`orchestrator`] - [`Lowerer`], concurrent lowering of many targets
//! - [`signing`] - Per-target code-signing rule and edges

mod assets;
mod create_bundle;
mod orchestrator;
mod signing;

pub use assets::{XCASSETS_SUFFIX, asset_catalog_dir};
pub use create_bundle::CreateBundleWriter;
pub use orchestrator::{LoweredTarget, Lowerer};

use crate::bundler::{
    Result,
    ninja::NinjaRecord,
    paths::PathResolver,
    target::{Target, TargetKind, TargetOutputs},
};
use std::fmt;

/// Toolchain tool copying one file into a bundle.
pub const COPY_BUNDLE_DATA: &str = "copy_bundle_data";

/// Toolchain tool compiling an asset catalog into `Assets.car`.
pub const COMPILE_XCASSETS: &str = "compile_xcassets";

/// Toolchain tool touching a stamp file.
pub const STAMP: &str = "stamp";

/// Services lowering needs from the resolved build graph.
#[derive(Clone, Copy)]
pub struct LoweringContext<'a> {
    resolver: &'a dyn PathResolver,
    target_outputs: &'a dyn TargetOutputs,
}

impl<'a> LoweringContext<'a> {
    /// Creates a context.
    pub fn new(resolver: &'a dyn PathResolver, target_outputs: &'a dyn TargetOutputs) -> Self {
        Self {
            resolver,
            target_outputs,
        }
    }
}

impl fmt::Debug for LoweringContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoweringContext")
            .field("resolver", &"<PathResolver>")
            .field("target_outputs", &"<TargetOutputs>")
            .finish()
    }
}

/// Lowers one target into ninja records.
///
/// # Errors
///
/// Fails if the target's description is inconsistent. No records are
/// returned for a failed target.
pub fn lower_target(target: &Target, ctx: LoweringContext<'_>) -> Result<Vec<NinjaRecord>> {
    match target.kind() {
        TargetKind::CreateBundle(bundle) => CreateBundleWriter::new(target, bundle, ctx).run(),
    }
}
