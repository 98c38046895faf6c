//! Typed ninja statements.
//!
//! Lowering produces an ordered `Vec<NinjaRecord>`; text is only produced by
//! [`NinjaWriter`](super::NinjaWriter). Keeping the two apart lets the
//! ordering logic be tested without string matching.

use crate::bundler::paths::OutputFile;

/// Name of ninja's built-in alias rule.
pub const PHONY: &str = "phony";

/// A `rule` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleDefinition {
    /// Rule name, unique within the ninja file.
    pub name: String,
    /// Program followed by its arguments, unescaped.
    pub command: Vec<String>,
    /// Line ninja prints while the rule runs.
    pub description: String,
    /// Re-stat outputs after the command ran, so that unchanged outputs do
    /// not dirty their dependents.
    pub restat: bool,
}

/// A `build` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildEdge {
    /// Files the edge produces.
    pub outputs: Vec<OutputFile>,
    /// Rule that produces them.
    pub rule: String,
    /// Inputs that appear on the command line (`$in`).
    pub explicit_inputs: Vec<OutputFile>,
    /// Inputs written after `|`: they must be up to date before the edge
    /// runs but are not passed to the command.
    pub implicit_inputs: Vec<OutputFile>,
}

impl BuildEdge {
    /// An edge with no inputs.
    pub fn new(outputs: Vec<OutputFile>, rule: impl Into<String>) -> Self {
        Self {
            outputs,
            rule: rule.into(),
            explicit_inputs: Vec::new(),
            implicit_inputs: Vec::new(),
        }
    }

    /// Sets the explicit inputs.
    pub fn explicit(mut self, inputs: Vec<OutputFile>) -> Self {
        self.explicit_inputs = inputs;
        self
    }

    /// Sets the inputs written after `|`.
    pub fn implicit(mut self, inputs: Vec<OutputFile>) -> Self {
        self.implicit_inputs = inputs;
        self
    }
}

/// One statement of a ninja file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NinjaRecord {
    /// `rule name` followed by its indented variables and a blank line.
    Rule(RuleDefinition),
    /// `build outputs: rule inputs`
    Build(BuildEdge),
}

impl NinjaRecord {
    /// The edge, if this is a `build` statement.
    pub fn as_build(&self) -> Option<&BuildEdge> {
        match self {
            Self::Build(edge) => Some(edge),
            Self::Rule(_) => None,
        }
    }
}

impl From<BuildEdge> for NinjaRecord {
    fn from(edge: BuildEdge) -> Self {
        Self::Build(edge)
    }
}

impl From<RuleDefinition> for NinjaRecord {
    fn from(rule: RuleDefinition) -> Self {
        Self::Rule(rule)
    }
}
