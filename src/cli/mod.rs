//! Command line interface for the bundle lowering tool.
//!
//! Loads the manifest, lowers the selected targets concurrently and writes
//! their ninja statements in manifest order.

mod args;

pub use args::{Args, RuntimeConfig};

use crate::bundler::{Label, Lowerer, Target, utils::fs::write_if_changed};
use crate::error::{BundlerError, CliError, Result};
use crate::metadata::load_manifest;
use anyhow::Context as _;
use std::io::Write;

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    execute(&args).await
}

/// Runs one invocation with already parsed arguments.
///
/// Returns the process exit code. Failed targets are reported on stderr;
/// with `--keep-going` the remaining targets are still written and the exit
/// code is 1, otherwise nothing is written and
/// [`CliError::LoweringFailed`] is returned.
pub async fn execute(args: &Args) -> Result<i32> {
    args.validate()
        .map_err(|reason| CliError::InvalidArguments { reason })?;
    let config = RuntimeConfig::try_from(args)
        .map_err(|reason| CliError::InvalidArguments { reason })?;

    let manifest = load_manifest(&args.manifest).await?;
    let resolved = manifest.resolve()?;

    let mut targets: Vec<Target> = Vec::new();
    let mut failures: Vec<BundlerError> = Vec::new();
    for result in resolved.targets {
        match result {
            Ok(target) if config.selects(target.label()) => targets.push(target),
            Ok(_) => {}
            Err(e) if is_selected_failure(&config, &e) => failures.push(e.into()),
            Err(_) => {}
        }
    }

    let total = targets.len() + failures.len();
    if total == 0 {
        log::warn!("No bundle targets selected from {}", args.manifest.display());
    }

    let lowerer = Lowerer::new(resolved.resolver, resolved.target_outputs);
    let mut text = String::new();
    for result in lowerer.lower_all(targets).await {
        match result {
            Ok(lowered) => text.push_str(&lowered.text()),
            Err(e) => failures.push(e.into()),
        }
    }

    if let Some(fatal) = failures.iter().position(|e| !e.is_target_local()) {
        return Err(failures.swap_remove(fatal));
    }
    for failure in &failures {
        eprintln!("Error: {failure}");
    }
    if !failures.is_empty() {
        if !config.keep_going() {
            return Err(CliError::LoweringFailed {
                failed: failures.len(),
                total,
            }
            .into());
        }
        log::warn!(
            "Skipping {} failed targets, writing the other {}",
            failures.len(),
            total - failures.len()
        );
    }

    match &args.output {
        Some(path) => {
            write_if_changed(path, &text).await?;
        }
        None => {
            std::io::stdout()
                .lock()
                .write_all(text.as_bytes())
                .context("failed to write ninja statements to stdout")?;
        }
    }

    Ok(if failures.is_empty() { 0 } else { 1 })
}

/// Resolution failures count against the run only when their target is
/// selected. Failures without a parsable label are always reported.
fn is_selected_failure(config: &RuntimeConfig, error: &crate::bundler::Error) -> bool {
    error
        .target()
        .and_then(|label| Label::parse(label).ok())
        .is_none_or(|label| config.selects(&label))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    const MANIFEST: &str = r#"
build_dir = "//out/Debug/"

[[target]]
label = "//baz:bar"
root_dir = "//out/Debug/bar.bundle"

[[target.file_rule]]
sources = ["//foo/input1.txt"]
output = "{{bundle_resources_dir}}/{{source_file_part}}"

[[target]]
label = "//baz:broken"
root_dir = "//out/Debug/broken.bundle"

[[target.file_rule]]
sources = ["//foo/input1.txt"]
output = "{{bundle_resources_dir}}/{{nope}}"
"#;

    async fn run_with(extra: &[&str]) -> (Result<i32>, Option<String>) {
        let dir = tempfile::tempdir().unwrap();
        let manifest = dir.path().join("bundles.toml");
        let output = dir.path().join("out/bundles.ninja");
        tokio::fs::write(&manifest, MANIFEST).await.unwrap();

        let mut argv = vec![
            "kodegen_bundler_ninja".to_string(),
            "--manifest".to_string(),
            manifest.display().to_string(),
            "--output".to_string(),
            output.display().to_string(),
        ];
        argv.extend(extra.iter().map(|s| s.to_string()));

        let result = execute(&Args::try_parse_from(argv).unwrap()).await;
        (result, tokio::fs::read_to_string(&output).await.ok())
    }

    #[tokio::test]
    async fn test_failed_target_aborts_without_output() {
        let (result, written) = run_with(&[]).await;
        assert!(matches!(
            result,
            Err(BundlerError::Cli(CliError::LoweringFailed { failed: 1, total: 2 }))
        ));
        assert!(written.is_none());
    }

    #[tokio::test]
    async fn test_keep_going_writes_successful_targets() {
        let (result, written) = run_with(&["--keep-going"]).await;
        assert_eq!(result.unwrap(), 1);
        let written = written.unwrap();
        assert!(written.contains("build bar.bundle: phony obj/baz/bar.stamp\n"));
        assert!(!written.contains("broken"));
    }

    #[tokio::test]
    async fn test_filter_skips_broken_target() {
        let (result, written) = run_with(&["--target", "//baz:bar"]).await;
        assert_eq!(result.unwrap(), 0);
        assert_eq!(
            written.unwrap(),
            "build bar.bundle/Resources/input1.txt: copy_bundle_data ../../foo/input1.txt\n\
             build obj/baz/bar.stamp: stamp bar.bundle/Resources/input1.txt\n\
             build bar.bundle: phony obj/baz/bar.stamp\n"
        );
    }

    #[tokio::test]
    async fn test_keep_going_survives_malformed_dependency_label() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = dir.path().join("bundles.toml");
        let output = dir.path().join("bundles.ninja");
        tokio::fs::write(
            &manifest,
            r#"
build_dir = "//out/Debug/"

[[target]]
label = "//baz:ok"
root_dir = "//out/Debug/ok.bundle"

[[target]]
label = "//baz:bad"
root_dir = "//out/Debug/bad.bundle"

[target.code_signing]
script = "//build/codesign.py"
deps = ["baz:quz"]
outputs = ["{{bundle_root_dir}}/quz"]
"#,
        )
        .await
        .unwrap();

        let args = Args::try_parse_from([
            "kodegen_bundler_ninja".to_string(),
            "--manifest".to_string(),
            manifest.display().to_string(),
            "--output".to_string(),
            output.display().to_string(),
            "--keep-going".to_string(),
        ])
        .unwrap();

        assert_eq!(execute(&args).await.unwrap(), 1);
        assert_eq!(
            tokio::fs::read_to_string(&output).await.unwrap(),
            "build obj/baz/ok.stamp: stamp\n\
             build ok.bundle: phony obj/baz/ok.stamp\n"
        );
    }

    #[tokio::test]
    async fn test_missing_manifest() {
        let args = Args::try_parse_from([
            "kodegen_bundler_ninja",
            "--manifest",
            "/nonexistent/bundles.toml",
        ])
        .unwrap();
        let err = execute(&args).await.unwrap_err();
        assert!(matches!(err, BundlerError::Cli(CliError::InvalidManifest { .. })));
    }
}
