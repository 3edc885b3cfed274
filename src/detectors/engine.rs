//! Detector execution engine with parallel support
//!
//! The DetectorEngine runs every registered detector against one
//! [`AnalysisContext`]:
//! - Detectors whose graph is absent are skipped, not called
//! - The rest run in parallel on a rayon pool
//! - A failing or panicking detector yields a failed result and never
//!   aborts the others
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                    DetectorEngine                       │
//! ├─────────────────────────────────────────────────────────┤
//! │  1. Register detectors                                  │
//! │  2. Skip those whose graph is missing                   │
//! │  3. Run the rest in parallel (rayon)                    │
//! │  4. Concatenate issues in registration order            │
//! │  5. Sort by severity, type, primary file                │
//! └─────────────────────────────────────────────────────────┘
//! ```

use crate::config::{DetectorThresholds, DetectorToggles};
use crate::detectors::base::{AnalysisContext, DetectionSummary, Detector, DetectorResult};
use crate::detectors::{
    CircularDependencyDetector, ExcessExportsDetector, GodClassDetector,
    LargeFilesDetector, LayerViolationDetector, TightCouplingDetector,
};
use crate::models::{ArchitectureIssue, Severity};
use rayon::prelude::*;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Build the standard detector set, honoring thresholds and disabled names
pub fn default_detectors(
    thresholds: &DetectorThresholds,
    toggles: &DetectorToggles,
) -> Vec<Arc<dyn Detector>> {
    let all: Vec<Arc<dyn Detector>> = vec![
        Arc::new(CircularDependencyDetector::new()),
        Arc::new(GodClassDetector::with_threshold(thresholds.god_object_methods)),
        Arc::new(ExcessExportsDetector::with_threshold(thresholds.max_exports)),
        Arc::new(LargeFilesDetector::with_threshold(thresholds.large_file_lines)),
        Arc::new(TightCouplingDetector::with_threshold(
            thresholds.tight_coupling_imports,
        )),
        Arc::new(LayerViolationDetector::new()),
    ];

    all.into_iter()
        .filter(|d| {
            let enabled = toggles.is_enabled(d.name());
            if !enabled {
                debug!("Detector {} disabled by config", d.name());
            }
            enabled
        })
        .collect()
}

/// Results of one engine run
#[derive(Debug, Clone, Default)]
pub struct DetectionRun {
    /// One result per registered detector, in registration order
    pub results: Vec<DetectorResult>,
    pub summary: DetectionSummary,
}

impl DetectionRun {
    /// All issues from successful detectors, sorted by severity (highest
    /// first), then type, then primary file. The sort is stable, so ties
    /// keep detector output order.
    pub fn issues(&self) -> Vec<ArchitectureIssue> {
        let mut issues: Vec<ArchitectureIssue> = self
            .results
            .iter()
            .filter(|r| r.is_success())
            .flat_map(|r| r.issues.iter().cloned())
            .collect();
        issues.sort_by(|a, b| {
            b.severity
                .cmp(&a.severity)
                .then_with(|| a.kind.cmp(&b.kind))
                .then_with(|| a.primary_file().cmp(b.primary_file()))
        });
        issues
    }
}

/// Orchestrates structural detection across all registered detectors
pub struct DetectorEngine {
    detectors: Vec<Arc<dyn Detector>>,
    /// Number of worker threads for parallel execution
    workers: usize,
}

impl DetectorEngine {
    /// Create a new detector engine
    ///
    /// # Arguments
    /// * `workers` - Number of worker threads (0 = auto-detect)
    pub fn new(workers: usize) -> Self {
        let actual_workers = if workers == 0 {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
                .min(16)
        } else {
            workers
        };

        Self {
            detectors: Vec::new(),
            workers: actual_workers,
        }
    }

    /// Engine preloaded with [`default_detectors`]
    pub fn with_defaults(thresholds: &DetectorThresholds, toggles: &DetectorToggles) -> Self {
        let mut engine = Self::new(0);
        engine.register_all(default_detectors(thresholds, toggles));
        engine
    }

    pub fn register(&mut self, detector: Arc<dyn Detector>) {
        debug!("Registered detector: {}", detector.name());
        self.detectors.push(detector);
    }

    pub fn register_all(&mut self, detectors: impl IntoIterator<Item = Arc<dyn Detector>>) {
        for detector in detectors {
            self.register(detector);
        }
    }

    pub fn detector_count(&self) -> usize {
        self.detectors.len()
    }

    pub fn detector_names(&self) -> Vec<&'static str> {
        self.detectors.iter().map(|d| d.name()).collect()
    }

    /// Run all detectors and collect per-detector results
    pub fn run(&self, ctx: &AnalysisContext<'_>) -> DetectionRun {
        let start = Instant::now();
        info!(
            "Running {} detectors with {} workers",
            self.detectors.len(),
            self.workers
        );

        let run_all = || -> Vec<DetectorResult> {
            self.detectors
                .par_iter()
                .map(|detector| Self::run_single_detector(detector, ctx))
                .collect()
        };

        let results = match rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .build()
        {
            Ok(pool) => pool.install(run_all),
            Err(e) => {
                warn!("Could not build detector pool ({}); using global pool", e);
                run_all()
            }
        };

        let mut summary = DetectionSummary::default();
        for result in &results {
            summary.add_result(result);
        }
        summary.total_duration_ms = start.elapsed().as_millis() as u64;

        info!(
            "Detection complete: {} issues ({} high, {} medium, {} low) from {}/{} detectors ({} skipped) in {}ms",
            summary.total_issues,
            summary.count(Severity::High),
            summary.count(Severity::Medium),
            summary.count(Severity::Low),
            summary.detectors_succeeded,
            summary.detectors_run,
            summary.detectors_skipped,
            summary.total_duration_ms
        );

        DetectionRun { results, summary }
    }

    fn run_single_detector(detector: &Arc<dyn Detector>, ctx: &AnalysisContext<'_>) -> DetectorResult {
        let name = detector.name();
        let requirement = detector.requires();
        if !ctx.satisfies(requirement) {
            warn!("Detector {} skipped: no {}", name, requirement);
            return DetectorResult::skipped(name, requirement);
        }

        let start = Instant::now();
        debug!("Running detector: {} ({})", name, detector.description());

        let detect_result =
            std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| detector.detect(ctx)));
        let duration = start.elapsed().as_millis() as u64;

        match detect_result {
            Ok(Ok(issues)) => {
                debug!("Detector {} found {} issues in {}ms", name, issues.len(), duration);
                DetectorResult::success(name, issues, duration)
            }
            Ok(Err(e)) => {
                warn!("Detector {} failed: {:#}", name, e);
                DetectorResult::failure(name, format!("{:#}", e), duration)
            }
            Err(panic_info) => {
                let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                    s.to_string()
                } else if let Some(s) = panic_info.downcast_ref::<String>() {
                    s.clone()
                } else {
                    "Unknown panic".to_string()
                };
                error!("Detector {} panicked: {}", name, panic_msg);
                DetectorResult::failure(name, format!("Panic: {}", panic_msg), duration)
            }
        }
    }
}

impl Default for DetectorEngine {
    fn default() -> Self {
        Self::new(0)
    }
}
