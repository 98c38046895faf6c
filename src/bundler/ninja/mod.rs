//! Ninja record model and serializer.

mod escape;
mod record;
mod writer;

pub use escape::{escape_command_part, escape_path, escape_value};
pub use record::{BuildEdge, NinjaRecord, PHONY, RuleDefinition};
pub use writer::{NinjaWriter, render};
