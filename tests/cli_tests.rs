//! CLI integration tests
//!
//! Runs the binary against manifests on disk and checks the ninja text it
//! writes, its exit code and its diagnostics.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::path::PathBuf;
use std::process::Command;

fn bundler_cmd() -> Command {
    Command::cargo_bin("kodegen_bundler_ninja").unwrap()
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

const BAR: &str = "\
rule __baz_bar___toolchain_default__code_signing_rule
  command =  ../../build/codesign.py -b=obj/baz/quz/bin bar.bundle
  description = CODE SIGNING //baz:bar(//toolchain:default)
  restat = 1

build bar.bundle/Resources/input1.txt: copy_bundle_data ../../foo/input1.txt
build bar.bundle/Resources/input2.txt: copy_bundle_data ../../foo/input2.txt
build bar.bundle/Info.plist: copy_bundle_data ../../qux/Info.plist
build bar.bundle/Resources/Assets.car: compile_xcassets ../../foo/Foo.xcassets | ../../foo/Foo.xcassets/foo.imageset/Contents.json ../../foo/Foo.xcassets/foo.imageset/FooIcon-29.png
build obj/baz/bar.codesigning.inputdeps.stamp: stamp ../../build/codesign.py obj/baz/quz/bin bar.bundle/Resources/input1.txt bar.bundle/Resources/input2.txt bar.bundle/Info.plist bar.bundle/Resources/Assets.car
build bar.bundle/_CodeSignature/CodeResources: __baz_bar___toolchain_default__code_signing_rule | obj/baz/bar.codesigning.inputdeps.stamp
build obj/baz/bar.stamp: stamp bar.bundle/_CodeSignature/CodeResources
build bar.bundle: phony obj/baz/bar.stamp
";

const PLUGIN: &str = "\
build plugin.bundle/Contents/MacOS/plugin.dylib: copy_bundle_data ../../baz/plugin.dylib
build obj/baz/plugin.stamp: stamp plugin.bundle/Contents/MacOS/plugin.dylib
build plugin.bundle: phony obj/baz/plugin.stamp
";

#[test]
fn test_manifest_renders_to_stdout() {
    bundler_cmd()
        .arg("--manifest")
        .arg(fixture("bundle.toml"))
        .assert()
        .success()
        .stdout(predicate::eq(format!("{BAR}{PLUGIN}")));
}

#[test]
fn test_target_filter() {
    bundler_cmd()
        .arg("--manifest")
        .arg(fixture("bundle.toml"))
        .args(["--target", "//baz:plugin"])
        .assert()
        .success()
        .stdout(predicate::eq(PLUGIN));
}

#[test]
fn test_output_file_is_written() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("obj/bundles.ninja");

    bundler_cmd()
        .arg("--manifest")
        .arg(fixture("bundle.toml"))
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert_eq!(
        std::fs::read_to_string(&output).unwrap(),
        format!("{BAR}{PLUGIN}")
    );
}

#[test]
fn test_unknown_placeholder_names_target_and_template() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = dir.path().join("bundle.toml");
    std::fs::write(
        &manifest,
        r#"
build_dir = "//out/Debug/"

[[target]]
label = "//baz:bar"
root_dir = "//out/Debug/bar.bundle"

[[target.file_rule]]
sources = ["//foo/input1.txt"]
output = "{{bundle_resources_dir}}/{{source_name_part}}"
"#,
    )
    .unwrap();

    bundler_cmd()
        .arg("--manifest")
        .arg(&manifest)
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("//baz:bar(//toolchain:default)"))
        .stderr(predicate::str::contains(
            "{{bundle_resources_dir}}/{{source_name_part}}",
        ));
}

#[test]
fn test_missing_manifest_fails() {
    bundler_cmd()
        .args(["--manifest", "/nonexistent/bundle.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid manifest"));
}

#[test]
fn test_invalid_target_label_fails() {
    bundler_cmd()
        .arg("--manifest")
        .arg(fixture("bundle.toml"))
        .args(["--target", "baz:bar"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid target label"));
}
