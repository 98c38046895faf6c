//! Ordered lists of target-wide templates.

use super::{SubstitutionContext, SubstitutionPattern, TemplateError};

/// An ordered list of templates evaluated once per target, such as the
/// code-signing outputs and arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubstitutionList {
    patterns: Vec<SubstitutionPattern>,
}

impl SubstitutionList {
    /// Compiles every template, rejecting source placeholders.
    ///
    /// # Errors
    ///
    /// Returns the error of the first template that fails to compile.
    pub fn parse_for_target<I, S>(templates: I) -> Result<Self, TemplateError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = templates
            .into_iter()
            .map(|t| SubstitutionPattern::parse_for_target(t.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// Expands every template in declaration order.
    pub fn evaluate(&self, context: &SubstitutionContext<'_>) -> Vec<String> {
        self.patterns.iter().map(|p| p.evaluate(context)).collect()
    }

    /// The compiled patterns.
    pub fn patterns(&self) -> &[SubstitutionPattern] {
        &self.patterns
    }

    /// Whether the list holds no templates.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Number of templates.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::substitution::BundleDirValues;

    #[test]
    fn test_evaluate_preserves_order() {
        let list = SubstitutionList::parse_for_target([
            "{{bundle_root_dir}}/quz",
            "{{bundle_root_dir}}/_CodeSignature/CodeResources",
        ])
        .unwrap();
        let dirs = BundleDirValues {
            root: "bar.bundle".into(),
            resources: "bar.bundle/Resources".into(),
            executable: "bar.bundle/Executable".into(),
            plugins: "bar.bundle/PlugIns".into(),
        };

        assert_eq!(list.len(), 2);
        assert_eq!(
            list.evaluate(&SubstitutionContext::for_target(&dirs)),
            vec!["bar.bundle/quz", "bar.bundle/_CodeSignature/CodeResources"]
        );
    }

    #[test]
    fn test_first_bad_template_wins() {
        let err = SubstitutionList::parse_for_target(["ok", "{{nope}}", "{{source_file_part}}"])
            .unwrap_err();
        assert_eq!(err.template(), "{{nope}}");
    }

    #[test]
    fn test_default_is_empty() {
        assert!(SubstitutionList::default().is_empty());
    }
}
