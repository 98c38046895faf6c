//! Source and output path types.
//!
//! Paths in a resolved build description come in two flavours:
//!
//! - source-absolute, rooted at the source tree with `//` (`//foo/input1.txt`)
//! - system-absolute, rooted with a single `/` (`/usr/share/icon.png`)
//!
//! Everything written into the ninja file is an [`OutputFile`], which is
//! relative to the build directory ninja runs in. Converting between the two
//! is the job of a [`PathResolver`].

use std::fmt;

/// A file named relative to the source root (`//foo/bar.txt`) or the system
/// root (`/tmp/bar.txt`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourceFile(String);

impl SourceFile {
    /// Wraps a path string.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the raw path string.
    pub fn value(&self) -> &str {
        &self.0
    }

    /// File name with extension (`//foo/input1.txt` → `input1.txt`).
    pub fn file_part(&self) -> &str {
        match self.0.rfind('/') {
            Some(idx) => &self.0[idx + 1..],
            None => &self.0,
        }
    }

    /// The directory containing this file, with trailing slash.
    pub fn dir(&self) -> SourceDir {
        match self.0.rfind('/') {
            Some(idx) => SourceDir::new(&self.0[..=idx]),
            None => SourceDir::new(""),
        }
    }
}

impl fmt::Display for SourceFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SourceFile {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// A directory relative to the source root or system root.
///
/// Always stored with a trailing slash, so `//out/Debug` and `//out/Debug/`
/// compare equal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourceDir(String);

impl SourceDir {
    /// Wraps a directory string, appending the trailing slash if missing.
    pub fn new(value: impl Into<String>) -> Self {
        let mut value = value.into();
        if !value.is_empty() && !value.ends_with('/') {
            value.push('/');
        }
        Self(value)
    }

    /// Returns the directory with its trailing slash.
    pub fn value(&self) -> &str {
        &self.0
    }

    /// Returns the directory without the trailing slash, the form used when
    /// a directory is substituted into a template.
    ///
    /// The roots `//` and `/` are returned unchanged.
    pub fn value_no_slash(&self) -> &str {
        if self.0 == "//" || self.0 == "/" {
            return &self.0;
        }
        self.0.strip_suffix('/').unwrap_or(&self.0)
    }

    /// Whether no directory was set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for SourceDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SourceDir {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// A path relative to the build directory, as written into the ninja file.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OutputFile(String);

impl OutputFile {
    /// Wraps a build-relative path string.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the raw path string.
    pub fn value(&self) -> &str {
        &self.0
    }

    /// First path component (`bar.bundle/Contents` → `bar.bundle`).
    ///
    /// Paths that climb out of the build directory are returned whole.
    pub fn outermost_component(&self) -> OutputFile {
        if self.0.starts_with("..") {
            return self.clone();
        }
        match self.0.find('/') {
            Some(idx) => OutputFile::new(&self.0[..idx]),
            None => self.clone(),
        }
    }
}

impl fmt::Display for OutputFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OutputFile {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Converts source paths into paths relative to the build directory.
///
/// Implementations must be pure: the same input always yields the same
/// output.
pub trait PathResolver: Send + Sync {
    /// Rebases a source-absolute or system-absolute path onto the build
    /// directory. A trailing slash on directory paths is dropped.
    fn relativize(&self, path: &str) -> OutputFile;

    /// Rebases a source file.
    fn relativize_file(&self, file: &SourceFile) -> OutputFile {
        self.relativize(file.value())
    }

    /// Rebases a directory.
    fn relativize_dir(&self, dir: &SourceDir) -> OutputFile {
        self.relativize(dir.value())
    }
}

/// Rebases paths against a fixed build directory such as `//out/Debug/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildDirResolver {
    build_dir: SourceDir,
}

impl BuildDirResolver {
    /// Creates a resolver for the given build directory.
    pub fn new(build_dir: SourceDir) -> Self {
        Self { build_dir }
    }

    /// The build directory paths are rebased against.
    pub fn build_dir(&self) -> &SourceDir {
        &self.build_dir
    }
}

/// Splits an absolute path into its root marker and components.
fn split_root(path: &str) -> (&'static str, Vec<&str>) {
    let (root, rest) = if let Some(rest) = path.strip_prefix("//") {
        ("//", rest)
    } else if let Some(rest) = path.strip_prefix('/') {
        ("/", rest)
    } else {
        ("", path)
    };
    let components = rest.split('/').filter(|c| !c.is_empty()).collect();
    (root, components)
}

impl PathResolver for BuildDirResolver {
    fn relativize(&self, path: &str) -> OutputFile {
        let (path_root, path_components) = split_root(path);
        let (dir_root, dir_components) = split_root(self.build_dir.value());

        // Already relative, or rooted somewhere the build dir is not.
        if path_root.is_empty() || path_root != dir_root {
            return OutputFile::new(path.trim_end_matches('/'));
        }

        let common = path_components
            .iter()
            .zip(dir_components.iter())
            .take_while(|(a, b)| a == b)
            .count();

        let mut parts: Vec<&str> = Vec::new();
        parts.extend(std::iter::repeat_n("..", dir_components.len() - common));
        parts.extend(&path_components[common..]);

        if parts.is_empty() {
            OutputFile::new(".")
        } else {
            OutputFile::new(parts.join("/"))
        }
    }
}
