//! Target labels such as `//baz:bar(//toolchain:default)`.

use crate::bundler::{Result, paths::SourceDir};
use std::fmt;

/// Identifies a target: a source directory, a name, and optionally the
/// toolchain the target is built with.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Label {
    dir: SourceDir,
    name: String,
    toolchain: Option<Box<Label>>,
}

impl Label {
    /// Creates a label without toolchain.
    pub fn new(dir: SourceDir, name: impl Into<String>) -> Self {
        Self {
            dir,
            name: name.into(),
            toolchain: None,
        }
    }

    /// Attaches a toolchain. Any toolchain of the toolchain label itself is
    /// dropped.
    pub fn with_toolchain(mut self, toolchain: &Label) -> Self {
        self.toolchain = Some(Box::new(Label::new(
            toolchain.dir.clone(),
            toolchain.name.clone(),
        )));
        self
    }

    /// Parses `//dir:name`, `//dir:name(//tc:name)` or `//dir` (the name is
    /// then the last directory component).
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        let (main, toolchain) = match input.find('(') {
            Some(open) => {
                let Some(inner) = input[open + 1..].strip_suffix(')') else {
                    crate::bail!("invalid label {input:?}: unbalanced parenthesis");
                };
                (&input[..open], Some(Self::parse(inner)?))
            }
            None => (input, None),
        };

        if !main.starts_with('/') {
            crate::bail!("invalid label {input:?}: labels must be absolute");
        }

        let (dir, name) = match main.rfind(':') {
            Some(colon) => (&main[..colon], &main[colon + 1..]),
            None => {
                let trimmed = main.trim_end_matches('/');
                let name = trimmed.rsplit('/').next().unwrap_or_default();
                (trimmed, name)
            }
        };
        if name.is_empty() {
            crate::bail!("invalid label {input:?}: missing target name");
        }

        let label = Self::new(SourceDir::new(dir), name);
        Ok(match toolchain {
            Some(toolchain) => label.with_toolchain(&toolchain),
            None => label,
        })
    }

    /// Directory the target is declared in.
    pub fn dir(&self) -> &SourceDir {
        &self.dir
    }

    /// Target name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The toolchain part of the label, if any.
    pub fn toolchain(&self) -> Option<&Label> {
        self.toolchain.as_deref()
    }

    /// Human-readable form, `//baz:bar` or `//baz:bar(//toolchain:default)`.
    pub fn user_visible_name(&self, include_toolchain: bool) -> String {
        let mut out = format!("{}:{}", self.dir.value_no_slash(), self.name);
        if include_toolchain {
            if let Some(toolchain) = &self.toolchain {
                out.push('(');
                out.push_str(&toolchain.user_visible_name(false));
                out.push(')');
            }
        }
        out
    }

    /// The label with every character that is special in a ninja rule name
    /// replaced by `_`.
    pub fn to_rule_name(&self) -> String {
        self.user_visible_name(true)
            .chars()
            .map(|c| if matches!(c, ':' | '/' | '(' | ')') { '_' } else { c })
            .collect()
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.user_visible_name(true))
    }
}
