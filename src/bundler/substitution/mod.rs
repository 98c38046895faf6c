//! Placeholder substitution for bundle templates.
//!
//! Templates such as `{{bundle_resources_dir}}/{{source_file_part}}` are
//! compiled once into a [`SubstitutionPattern`] and then evaluated against a
//! [`SubstitutionContext`] for every source file (or once per target, for
//! code-signing outputs and arguments). Unknown placeholders are rejected at
//! compile time, so evaluation itself cannot fail.

mod kind;
mod list;
mod pattern;

pub use kind::Substitution;
pub use list::SubstitutionList;
pub use pattern::{
    BundleDirValues, SubstitutionContext, SubstitutionPattern, TemplateError, TemplateErrorKind,
};
