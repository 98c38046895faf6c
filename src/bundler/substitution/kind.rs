//! The placeholders a bundle template may reference.

use std::fmt;

/// A named placeholder, written `{{name}}` in a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Substitution {
    /// `{{bundle_root_dir}}`
    BundleRootDir,
    /// `{{bundle_resources_dir}}`
    BundleResourcesDir,
    /// `{{bundle_executable_dir}}`
    BundleExecutableDir,
    /// `{{bundle_plugins_dir}}`
    BundlePluginsDir,
    /// `{{source_file_part}}`, the file name with extension of the source
    /// being processed.
    SourceFilePart,
}

impl Substitution {
    /// Every recognized placeholder.
    pub const ALL: [Substitution; 5] = [
        Self::BundleRootDir,
        Self::BundleResourcesDir,
        Self::BundleExecutableDir,
        Self::BundlePluginsDir,
        Self::SourceFilePart,
    ];

    /// Placeholder name as written between the braces.
    pub fn name(&self) -> &'static str {
        match self {
            Self::BundleRootDir => "bundle_root_dir",
            Self::BundleResourcesDir => "bundle_resources_dir",
            Self::BundleExecutableDir => "bundle_executable_dir",
            Self::BundlePluginsDir => "bundle_plugins_dir",
            Self::SourceFilePart => "source_file_part",
        }
    }

    /// Looks a placeholder up by name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.name() == name)
    }

    /// Whether the placeholder can only be expanded for a particular source
    /// file.
    pub fn needs_source(&self) -> bool {
        matches!(self, Self::SourceFilePart)
    }
}

impl fmt::Display for Substitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{{{}}}}}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_lookup_roundtrips() {
        for substitution in Substitution::ALL {
            assert_eq!(Substitution::from_name(substitution.name()), Some(substitution));
        }
        assert_eq!(Substitution::from_name("source_name_part"), None);
    }

    #[test]
    fn test_display_wraps_in_braces() {
        assert_eq!(Substitution::BundleRootDir.to_string(), "{{bundle_root_dir}}");
    }

    #[test]
    fn test_only_source_file_part_needs_source() {
        assert!(Substitution::SourceFilePart.needs_source());
        assert!(!Substitution::BundlePluginsDir.needs_source());
    }
}
