//! Resolved bundle description.
//!
//! This module holds the read-only input of bundle lowering: the bundle
//! directory layout, the copy rules, the asset catalog and the optional
//! code-signing step. A [`BundleData`] is constructed once upstream with
//! [`BundleDataBuilder`] and never mutated afterwards.

mod builder;
mod bundle;
mod code_signing;
mod file_rule;
mod layout;

pub use builder::BundleDataBuilder;
pub use bundle::BundleData;
pub use code_signing::CodeSigningSettings;
pub use file_rule::BundleFileRule;
pub use layout::BundleLayout;
