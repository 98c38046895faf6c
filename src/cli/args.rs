//! Command line argument parsing and validation.

use crate::bundler::Label;
use clap::Parser;
use std::path::PathBuf;

/// Lowers bundle targets to ninja build statements
#[derive(Parser, Debug)]
#[command(
    name = "kodegen_bundler_ninja",
    version,
    about = "Lowers bundle targets to ninja build statements",
    long_about = "Reads a bundle manifest and writes the ninja statements that copy bundle data,
compile asset catalogs, code-sign and stamp every bundle target.

Usage:
  kodegen_bundler_ninja --manifest bundles.toml
  kodegen_bundler_ninja --manifest bundles.toml --output out/Debug/obj/bundles.ninja
  kodegen_bundler_ninja --manifest bundles.toml --target //baz:bar --keep-going

Exit code 0 = every selected target was lowered."
)]
pub struct Args {
    /// Bundle manifest (TOML)
    #[arg(short = 'm', long, value_name = "PATH")]
    pub manifest: PathBuf,

    /// Ninja file to write
    ///
    /// Parent directories are created as needed. The file is left untouched
    /// when its content would not change. Without this flag the statements
    /// go to stdout.
    #[arg(short = 'o', long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Only lower the target with this label (repeatable)
    #[arg(short = 't', long = "target", value_name = "LABEL")]
    pub targets: Vec<String>,

    /// Write the targets that lowered even if others failed
    ///
    /// The exit code is still non-zero when any target failed.
    #[arg(short = 'k', long)]
    pub keep_going: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.manifest.as_os_str().is_empty() {
            return Err("Manifest path cannot be empty".to_string());
        }

        if let Some(output) = &self.output {
            if output.as_os_str().is_empty() {
                return Err("Output path cannot be empty".to_string());
            }
        }

        for target in &self.targets {
            Label::parse(target).map_err(|e| format!("Invalid target label {target:?}: {e}"))?;
        }

        Ok(())
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    filters: Vec<Label>,
    keep_going: bool,
}

impl TryFrom<&Args> for RuntimeConfig {
    type Error = String;

    fn try_from(args: &Args) -> Result<Self, Self::Error> {
        let filters = args
            .targets
            .iter()
            .map(|t| Label::parse(t).map_err(|e| e.to_string()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            filters,
            keep_going: args.keep_going,
        })
    }
}

impl RuntimeConfig {
    /// Whether the target `label` is selected.
    ///
    /// A filter without a toolchain matches the target in any toolchain.
    pub fn selects(&self, label: &Label) -> bool {
        self.filters.is_empty()
            || self.filters.iter().any(|filter| match filter.toolchain() {
                Some(_) => filter == label,
                None => filter.dir() == label.dir() && filter.name() == label.name(),
            })
    }

    /// Whether failed targets are skipped instead of aborting the run.
    pub fn keep_going(&self) -> bool {
        self.keep_going
    }
}
