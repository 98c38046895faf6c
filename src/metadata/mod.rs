//! Bundle manifest loading.
//!
//! The manifest is the resolved form of the build description: one TOML file
//! naming the build directory, the toolchain, every bundle target and the
//! outputs of targets that bundles refer to by label.
//!
//! ```toml
//! build_dir = "//out/Debug/"
//!
//! [toolchain]
//! label = "//toolchain:default"
//!
//! [[target]]
//! label = "//baz:bar"
//! root_dir = "//out/Debug/bar.bundle"
//!
//! [[target.file_rule]]
//! sources = ["//foo/input1.txt", "//foo/input2.txt"]
//! output = "{{bundle_resources_dir}}/{{source_file_part}}"
//!
//! [target_outputs]
//! "//baz:quz" = "obj/baz/quz/bin"
//! ```

use crate::bundler::{
    self, BuildDirResolver, BundleDataBuilder, BundleFileRule, BundleLayout,
    CodeSigningSettings, Label, OutputFile, SourceDir, SourceFile, SubstitutionList,
    SubstitutionPattern, Target, Toolchain,
};
use crate::error::{BundlerError, CliError, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Complete manifest as written on disk.
#[derive(Debug, Clone, Deserialize)]
pub struct BundleManifest {
    /// Source-absolute build directory, e.g. `//out/Debug/`.
    pub build_dir: String,

    /// Toolchain every target is lowered for.
    #[serde(default)]
    pub toolchain: ToolchainManifest,

    /// Bundle targets, in the order their output is written.
    #[serde(default, rename = "target")]
    pub targets: Vec<TargetManifest>,

    /// Output file of other targets, by label.
    #[serde(default)]
    pub target_outputs: BTreeMap<String, String>,
}

/// `[toolchain]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolchainManifest {
    /// Toolchain label.
    ///
    /// Default: `//toolchain:default`
    #[serde(default = "default_toolchain_label")]
    pub label: String,

    /// Whether this is the build's default toolchain.
    ///
    /// Default: true
    #[serde(default = "default_true")]
    pub default: bool,
}

impl Default for ToolchainManifest {
    fn default() -> Self {
        Self {
            label: default_toolchain_label(),
            default: true,
        }
    }
}

fn default_toolchain_label() -> String {
    "//toolchain:default".to_string()
}

fn default_true() -> bool {
    true
}

/// One `[[target]]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct TargetManifest {
    /// Target label, e.g. `//baz:bar`.
    pub label: String,

    /// `{{bundle_root_dir}}`
    pub root_dir: String,

    /// `{{bundle_resources_dir}}`
    ///
    /// Default: `<root_dir>/Resources`
    #[serde(default)]
    pub resources_dir: Option<String>,

    /// `{{bundle_executable_dir}}`
    ///
    /// Default: `<root_dir>/Executable`
    #[serde(default)]
    pub executable_dir: Option<String>,

    /// `{{bundle_plugins_dir}}`
    ///
    /// Default: `<root_dir>/PlugIns`
    #[serde(default)]
    pub plugins_dir: Option<String>,

    /// Copy rules, in order.
    #[serde(default, rename = "file_rule")]
    pub file_rules: Vec<FileRuleManifest>,

    /// Files of the asset catalog.
    #[serde(default)]
    pub asset_catalog_sources: Vec<String>,

    /// Code-signing step.
    #[serde(default)]
    pub code_signing: Option<CodeSigningManifest>,
}

/// One `[[target.file_rule]]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct FileRuleManifest {
    /// Files to copy.
    #[serde(default)]
    pub sources: Vec<String>,

    /// Output template, e.g. `{{bundle_resources_dir}}/{{source_file_part}}`.
    pub output: String,
}

/// `[target.code_signing]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CodeSigningManifest {
    /// Signing script.
    #[serde(default)]
    pub script: Option<String>,

    /// Extra input files.
    #[serde(default)]
    pub sources: Vec<String>,

    /// Labels of targets whose outputs the script reads.
    #[serde(default)]
    pub deps: Vec<String>,

    /// Output templates.
    #[serde(default)]
    pub outputs: Vec<String>,

    /// Argument templates.
    #[serde(default)]
    pub args: Vec<String>,
}

/// A manifest turned into lowering inputs.
#[derive(Debug)]
pub struct ResolvedManifest {
    /// Rebases paths onto the build directory.
    pub resolver: BuildDirResolver,

    /// Output files of other targets.
    pub target_outputs: BTreeMap<Label, OutputFile>,

    /// One entry per `[[target]]`, in manifest order. A target whose
    /// description is invalid is an error here without affecting the others.
    pub targets: Vec<bundler::Result<Target>>,
}

/// Parses manifest text.
pub fn parse_manifest(text: &str) -> Result<BundleManifest> {
    Ok(toml::from_str(text)?)
}

/// Reads and parses the manifest at `path`.
pub async fn load_manifest(path: &Path) -> Result<BundleManifest> {
    let text = tokio::fs::read_to_string(path).await.map_err(|e| {
        BundlerError::Cli(CliError::InvalidManifest {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    })?;
    let manifest = parse_manifest(&text).map_err(|e| {
        BundlerError::Cli(CliError::InvalidManifest {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    })?;
    log::info!(
        "Loaded {} bundle targets from {}",
        manifest.targets.len(),
        path.display()
    );
    Ok(manifest)
}

impl BundleManifest {
    /// Compiles every target description.
    pub fn resolve(&self) -> Result<ResolvedManifest> {
        let toolchain = Toolchain::new(Label::parse(&self.toolchain.label)?, self.toolchain.default);

        let mut target_outputs = BTreeMap::new();
        for (label, output) in &self.target_outputs {
            let label = qualify(Label::parse(label)?, &toolchain);
            target_outputs.insert(label, OutputFile::new(output.as_str()));
        }

        let targets = self
            .targets
            .iter()
            .map(|target| target.resolve(&toolchain))
            .collect();

        Ok(ResolvedManifest {
            resolver: BuildDirResolver::new(SourceDir::new(self.build_dir.as_str())),
            target_outputs,
            targets,
        })
    }
}

impl TargetManifest {
    /// Compiles this target's templates and builds its bundle description.
    pub fn resolve(&self, toolchain: &Toolchain) -> bundler::Result<Target> {
        let label = Label::parse(&self.label)
            .map_err(|e| bundler::Error::configuration(&self.label, e.to_string()))?;
        let label = qualify(label, toolchain);

        let root = SourceDir::new(self.root_dir.as_str());
        let conventional = BundleLayout::under_root(root.clone());
        let dir = |explicit: &Option<String>, fallback: &SourceDir| {
            explicit
                .as_deref()
                .map(SourceDir::from)
                .unwrap_or_else(|| fallback.clone())
        };
        let layout = BundleLayout::new(
            root,
            dir(&self.resources_dir, conventional.resources()),
            dir(&self.executable_dir, conventional.executable()),
            dir(&self.plugins_dir, conventional.plugins()),
        );

        let mut builder = BundleDataBuilder::new()
            .layout(layout)
            .asset_catalog_sources(sources(&self.asset_catalog_sources));

        for rule in &self.file_rules {
            let pattern = SubstitutionPattern::parse(&rule.output)
                .map_err(|e| bundler::Error::template(&label, e))?;
            builder = builder.file_rule(BundleFileRule::new(sources(&rule.sources), pattern));
        }

        if let Some(signing) = &self.code_signing {
            builder = builder.code_signing(signing.resolve(&label, toolchain)?);
        }

        let bundle = builder.build(&label)?;
        Ok(Target::create_bundle(label, toolchain.clone(), bundle))
    }
}

impl CodeSigningManifest {
    fn resolve(&self, label: &Label, toolchain: &Toolchain) -> bundler::Result<CodeSigningSettings> {
        let deps = self
            .deps
            .iter()
            .map(|dep| {
                Label::parse(dep)
                    .map(|dep| qualify(dep, toolchain))
                    .map_err(|e| {
                        bundler::Error::configuration(
                            label,
                            format!("code signing dependency: {e}"),
                        )
                    })
            })
            .collect::<bundler::Result<Vec<_>>>()?;

        Ok(CodeSigningSettings {
            script: self.script.as_deref().map(SourceFile::from),
            sources: sources(&self.sources),
            deps,
            outputs: SubstitutionList::parse_for_target(&self.outputs)
                .map_err(|e| bundler::Error::template(label, e))?,
            args: SubstitutionList::parse_for_target(&self.args)
                .map_err(|e| bundler::Error::template(label, e))?,
        })
    }
}

/// Labels without an explicit toolchain belong to the manifest's toolchain.
fn qualify(label: Label, toolchain: &Toolchain) -> Label {
    if label.toolchain().is_some() {
        label
    } else {
        label.with_toolchain(toolchain.label())
    }
}

fn sources(paths: &[String]) -> Vec<SourceFile> {
    paths.iter().map(|p| SourceFile::new(p.as_str())).collect()
}
