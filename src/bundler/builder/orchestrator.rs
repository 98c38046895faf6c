//! Concurrent lowering of many targets.
//!
//! Targets share no mutable state, so each one is lowered on its own
//! blocking-pool thread. Results are collected in declaration order, which
//! keeps the combined ninja text deterministic regardless of scheduling.

use super::{LoweringContext, lower_target};
use crate::bundler::{
    Error, Result,
    ninja::{NinjaRecord, render},
    paths::PathResolver,
    target::{Label, Target, TargetOutputs},
};
use std::sync::Arc;

/// Records produced for one target.
#[derive(Debug, Clone)]
pub struct LoweredTarget {
    /// The target the records belong to.
    pub label: Label,
    /// Ordered ninja records.
    pub records: Vec<NinjaRecord>,
}

impl LoweredTarget {
    /// Renders the records as ninja text.
    pub fn text(&self) -> String {
        render(&self.records)
    }
}

/// Lowers targets against one resolved build graph.
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_ninja::bundler::{BuildDirResolver, Lowerer, SourceDir, Target};
/// use std::collections::BTreeMap;
///
/// # async fn example(targets: Vec<Target>) {
/// let lowerer = Lowerer::new(
///     BuildDirResolver::new(SourceDir::new("//out/Debug/")),
///     BTreeMap::new(),
/// );
/// for result in lowerer.lower_all(targets).await {
///     match result {
///         Ok(lowered) => print!("{}", lowered.text()),
///         Err(e) => eprintln!("{e}"),
///     }
/// }
/// # }
/// ```
#[derive(Clone)]
pub struct Lowerer {
    resolver: Arc<dyn PathResolver>,
    target_outputs: Arc<dyn TargetOutputs>,
}

impl std::fmt::Debug for Lowerer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lowerer")
            .field("resolver", &"<PathResolver>")
            .field("target_outputs", &"<TargetOutputs>")
            .finish()
    }
}

impl Lowerer {
    /// Creates a lowerer.
    ///
    /// # Arguments
    ///
    /// * `resolver` - Rebases source paths onto the build directory
    /// * `target_outputs` - Output files of other targets, by label
    pub fn new(
        resolver: impl PathResolver + 'static,
        target_outputs: impl TargetOutputs + 'static,
    ) -> Self {
        Self {
            resolver: Arc::new(resolver),
            target_outputs: Arc::new(target_outputs),
        }
    }

    /// Lowers one target on the current thread.
    pub fn lower(&self, target: &Target) -> Result<LoweredTarget> {
        let ctx = LoweringContext::new(self.resolver.as_ref(), self.target_outputs.as_ref());
        let records = lower_target(target, ctx)?;
        log::info!("Lowered {} ({})", target.label(), target.kind().name());
        Ok(LoweredTarget {
            label: target.label().clone(),
            records,
        })
    }

    /// Lowers every target concurrently.
    ///
    /// Returns one result per target, in the order the targets were given.
    /// A failing target does not affect the others.
    pub async fn lower_all(&self, targets: Vec<Target>) -> Vec<Result<LoweredTarget>> {
        let handles: Vec<_> = targets
            .into_iter()
            .map(|target| {
                let lowerer = self.clone();
                let label = target.label().clone();
                let handle = tokio::task::spawn_blocking(move || lowerer.lower(&target));
                (label, handle)
            })
            .collect();

        let mut results = Vec::with_capacity(handles.len());
        for (label, handle) in handles {
            let result = handle.await.unwrap_or_else(|e| {
                Err(Error::GenericError(format!(
                    "lowering task for {label} panicked: {e}"
                )))
            });
            results.push(result);
        }
        results
    }
}
