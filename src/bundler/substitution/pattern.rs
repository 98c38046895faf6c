//! Compiled templates and their evaluation.

use super::Substitution;
use crate::bundler::paths::SourceFile;
use std::fmt;
use thiserror::Error;

/// Why a template failed to compile.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateErrorKind {
    /// `{{name}}` where `name` is not a recognized placeholder.
    #[error("unknown substitution {{{{{0}}}}}")]
    UnknownSubstitution(String),

    /// A `{{` with no matching `}}`.
    #[error("unterminated {{{{")]
    Unterminated,

    /// A placeholder that needs a source file, used where there is none.
    #[error("{0} is not valid here: no source file is being processed")]
    SourceNotAvailable(Substitution),
}

/// A template that could not be compiled.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} in template {template:?}")]
pub struct TemplateError {
    template: String,
    kind: TemplateErrorKind,
}

impl TemplateError {
    fn new(template: &str, kind: TemplateErrorKind) -> Self {
        Self {
            template: template.to_string(),
            kind,
        }
    }

    /// The offending template string.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// What went wrong.
    pub fn kind(&self) -> &TemplateErrorKind {
        &self.kind
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder(Substitution),
}

/// Values the bundle directory placeholders expand to.
///
/// The same layout expands differently depending on where the result goes:
/// output paths are built from source-absolute directories and rebased
/// afterwards, while command arguments need build-relative directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleDirValues {
    /// `{{bundle_root_dir}}`
    pub root: String,
    /// `{{bundle_resources_dir}}`
    pub resources: String,
    /// `{{bundle_executable_dir}}`
    pub executable: String,
    /// `{{bundle_plugins_dir}}`
    pub plugins: String,
}

/// Everything a pattern may need during evaluation.
#[derive(Debug, Clone, Copy)]
pub struct SubstitutionContext<'a> {
    dirs: &'a BundleDirValues,
    source: Option<&'a SourceFile>,
}

impl<'a> SubstitutionContext<'a> {
    /// A context for target-wide templates (code-signing outputs and args).
    pub fn for_target(dirs: &'a BundleDirValues) -> Self {
        Self { dirs, source: None }
    }

    /// A context for expanding a template once per source file.
    pub fn for_source(dirs: &'a BundleDirValues, source: &'a SourceFile) -> Self {
        Self {
            dirs,
            source: Some(source),
        }
    }

    fn resolve(&self, substitution: Substitution) -> &'a str {
        match substitution {
            Substitution::BundleRootDir => &self.dirs.root,
            Substitution::BundleResourcesDir => &self.dirs.resources,
            Substitution::BundleExecutableDir => &self.dirs.executable,
            Substitution::BundlePluginsDir => &self.dirs.plugins,
            Substitution::SourceFilePart => {
                debug_assert!(self.source.is_some(), "{substitution} used without a source");
                self.source.map(SourceFile::file_part).unwrap_or_default()
            }
        }
    }
}

/// A template such as `{{bundle_resources_dir}}/{{source_file_part}}`,
/// compiled once and evaluated many times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstitutionPattern {
    template: String,
    segments: Vec<Segment>,
}

impl SubstitutionPattern {
    /// Compiles a template.
    ///
    /// # Errors
    ///
    /// Fails on an unknown placeholder name or an unterminated `{{`.
    pub fn parse(template: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut rest = template;

        while let Some(open) = rest.find("{{") {
            if open > 0 {
                segments.push(Segment::Literal(rest[..open].to_string()));
            }
            let after_open = &rest[open + 2..];
            let close = after_open
                .find("}}")
                .ok_or_else(|| TemplateError::new(template, TemplateErrorKind::Unterminated))?;
            let name = &after_open[..close];
            let substitution = Substitution::from_name(name).ok_or_else(|| {
                TemplateError::new(
                    template,
                    TemplateErrorKind::UnknownSubstitution(name.to_string()),
                )
            })?;
            segments.push(Segment::Placeholder(substitution));
            rest = &after_open[close + 2..];
        }
        if !rest.is_empty() {
            segments.push(Segment::Literal(rest.to_string()));
        }

        Ok(Self {
            template: template.to_string(),
            segments,
        })
    }

    /// Compiles a template that will be evaluated without a source file.
    ///
    /// # Errors
    ///
    /// Same as [`parse`](Self::parse), and additionally fails if the template
    /// uses a source placeholder.
    pub fn parse_for_target(template: &str) -> Result<Self, TemplateError> {
        let pattern = Self::parse(template)?;
        if let Some(substitution) = pattern.substitutions().find(Substitution::needs_source) {
            return Err(TemplateError::new(
                template,
                TemplateErrorKind::SourceNotAvailable(substitution),
            ));
        }
        Ok(pattern)
    }

    /// Expands the pattern.
    ///
    /// Evaluation never fails: patterns compiled with
    /// [`parse_for_target`](Self::parse_for_target) need no source, and
    /// per-source patterns must be given a [`SubstitutionContext::for_source`]
    /// context.
    pub fn evaluate(&self, context: &SubstitutionContext<'_>) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder(substitution) => out.push_str(context.resolve(*substitution)),
            }
        }
        out
    }

    /// Placeholders referenced by the pattern, in order of appearance.
    pub fn substitutions(&self) -> impl Iterator<Item = Substitution> + '_ {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Placeholder(substitution) => Some(*substitution),
            Segment::Literal(_) => None,
        })
    }

    /// The template the pattern was compiled from.
    pub fn as_str(&self) -> &str {
        &self.template
    }
}

impl fmt::Display for SubstitutionPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.template)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dirs() -> BundleDirValues {
        BundleDirValues {
            root: "//out/Debug/bar.bundle".into(),
            resources: "//out/Debug/bar.bundle/Resources".into(),
            executable: "//out/Debug/bar.bundle/Executable".into(),
            plugins: "//out/Debug/bar.bundle/PlugIns".into(),
        }
    }

    #[test]
    fn test_evaluate_per_source() {
        let pattern =
            SubstitutionPattern::parse("{{bundle_resources_dir}}/{{source_file_part}}").unwrap();
        let dirs = dirs();
        let source = SourceFile::new("//foo/input1.txt");

        assert_eq!(
            pattern.evaluate(&SubstitutionContext::for_source(&dirs, &source)),
            "//out/Debug/bar.bundle/Resources/input1.txt"
        );
    }

    #[test]
    fn test_literal_only_template() {
        let pattern = SubstitutionPattern::parse("-b=obj/baz/quz/bin").unwrap();
        let dirs = dirs();
        assert_eq!(
            pattern.evaluate(&SubstitutionContext::for_target(&dirs)),
            "-b=obj/baz/quz/bin"
        );
        assert_eq!(pattern.substitutions().count(), 0);
    }

    #[test]
    fn test_adjacent_placeholders_and_trailing_literal() {
        let pattern =
            SubstitutionPattern::parse("{{bundle_plugins_dir}}{{bundle_root_dir}}.x").unwrap();
        let dirs = dirs();
        assert_eq!(
            pattern.evaluate(&SubstitutionContext::for_target(&dirs)),
            "//out/Debug/bar.bundle/PlugIns//out/Debug/bar.bundle.x"
        );
    }

    #[test]
    fn test_unknown_substitution_is_rejected() {
        let err = SubstitutionPattern::parse("{{bundle_resources_dir}}/{{source_name_part}}")
            .unwrap_err();
        assert_eq!(
            err.kind(),
            &TemplateErrorKind::UnknownSubstitution("source_name_part".into())
        );
        assert_eq!(err.template(), "{{bundle_resources_dir}}/{{source_name_part}}");
        assert_eq!(
            err.to_string(),
            "unknown substitution {{source_name_part}} in template \
             \"{{bundle_resources_dir}}/{{source_name_part}}\""
        );
    }

    #[test]
    fn test_unterminated_placeholder_is_rejected() {
        let err = SubstitutionPattern::parse("{{bundle_root_dir").unwrap_err();
        assert_eq!(err.kind(), &TemplateErrorKind::Unterminated);
    }

    #[test]
    fn test_target_patterns_reject_source_placeholders() {
        let err = SubstitutionPattern::parse_for_target("{{bundle_root_dir}}/{{source_file_part}}")
            .unwrap_err();
        assert_eq!(
            err.kind(),
            &TemplateErrorKind::SourceNotAvailable(Substitution::SourceFilePart)
        );
        assert!(SubstitutionPattern::parse_for_target("{{bundle_root_dir}}/quz").is_ok());
    }

    #[test]
    fn test_evaluation_is_deterministic() {
        let pattern = SubstitutionPattern::parse("{{bundle_root_dir}}/Info.plist").unwrap();
        let dirs = dirs();
        let source = SourceFile::new("//qux/Info.plist");
        let context = SubstitutionContext::for_source(&dirs, &source);
        assert_eq!(pattern.evaluate(&context), pattern.evaluate(&context));
        assert_eq!(pattern.to_string(), "{{bundle_root_dir}}/Info.plist");
    }
}
