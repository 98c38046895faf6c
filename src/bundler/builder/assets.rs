//! Asset catalog lookup.

use crate::bundler::paths::{SourceDir, SourceFile};

/// Suffix of an asset catalog directory name.
pub const XCASSETS_SUFFIX: &str = ".xcassets";

/// The innermost `.xcassets` directory containing `source`, if any.
///
/// `//foo/Foo.xcassets/foo.imageset/Contents.json` gives
/// `//foo/Foo.xcassets/`.
pub fn asset_catalog_dir(source: &SourceFile) -> Option<SourceDir> {
    let dir = source.dir();
    let value = dir.value();

    let mut found = None;
    let mut start = 0;
    for (idx, _) in value.match_indices('/') {
        let component = &value[start..idx];
        if component.len() > XCASSETS_SUFFIX.len() && component.ends_with(XCASSETS_SUFFIX) {
            found = Some(idx);
        }
        start = idx + 1;
    }
    found.map(|idx| SourceDir::new(&value[..idx]))
}
