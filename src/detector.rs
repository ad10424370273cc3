//! Detector registry and the combined assessment of one letter.

use std::fmt;
use std::panic;
use std::thread;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::AnalyzerConfig;
use crate::document::Document;
use crate::effort::EffortDetector;
use crate::error::Result;
use crate::publications::PublicationDetector;
use crate::report::Report;
use crate::wordlist::Lexicon;

/// A bias pattern check over one document
pub trait Detector: Send + Sync {
    /// Category name used in reports and failure records
    fn name(&self) -> &str;

    fn get_report(&self, document: &Document) -> Result<Report>;
}

/// A detector whose whole finding is a document-level summary
pub trait GlobalDetector: Detector {
    fn get_summary(&self, document: &Document) -> Result<String>;

    /// Report carrying only the summary
    fn summary_report(&self, document: &Document) -> Result<Report> {
        let mut report = Report::new(self.name());
        report.set_summary(self.get_summary(document)?);
        Ok(report)
    }
}

/// A detector that failed on a document; the other detectors still ran
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetectorError {
    pub detector: String,
    pub message: String,
}

impl fmt::Display for DetectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.detector, self.message)
    }
}

/// Reports from every detector that succeeded, in registry order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Assessment {
    pub reports: Vec<Report>,
    pub failures: Vec<DetectorError>,
}

impl Assessment {
    pub fn bias_score(&self) -> f64 {
        self.reports.iter().map(Report::bias_score).sum()
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// All reports folded into one: flags concatenated, summaries newline-joined
    pub fn merged(&self) -> Report {
        let mut merged = Report::new("All");
        for report in &self.reports {
            merged.merge(report.clone());
        }
        merged
    }

    fn record(&mut self, name: &str, outcome: Result<Report>) {
        match outcome {
            Ok(report) => {
                debug!(detector = name, flags = report.flags().len(), "Detector finished");
                self.reports.push(report);
            }
            Err(e) => {
                warn!(detector = name, "Detector failed: {}", e);
                self.failures.push(DetectorError {
                    detector: name.to_string(),
                    message: e.to_string(),
                });
            }
        }
    }
}

/// Ordered set of detectors run against each document
#[derive(Default)]
pub struct Analyzer {
    detectors: Vec<Box<dyn Detector>>,
}

impl Analyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Effort and publication detectors configured from `config`
    pub fn default_detectors(config: &AnalyzerConfig) -> Result<Self> {
        config.validate()?;
        let lexicon = Lexicon::with_overrides(
            config.effort_words.as_deref(),
            config.accomplishment_words.as_deref(),
        )?;

        let mut analyzer = Self::new();
        analyzer.register(Box::new(EffortDetector::with_lexicon(lexicon)?));
        analyzer.register(Box::new(PublicationDetector::new(config.min_publications)?));
        info!("Analyzer ready with {} detectors", analyzer.len());
        Ok(analyzer)
    }

    pub fn register(&mut self, detector: Box<dyn Detector>) {
        self.detectors.push(detector);
    }

    pub fn with_detector(mut self, detector: impl Detector + 'static) -> Self {
        self.register(Box::new(detector));
        self
    }

    pub fn len(&self) -> usize {
        self.detectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.detectors.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.detectors.iter().map(|d| d.name()).collect()
    }

    /// Run every detector in order, isolating failures
    pub fn analyze(&self, document: &Document) -> Assessment {
        let mut assessment = Assessment::default();
        for detector in &self.detectors {
            assessment.record(detector.name(), detector.get_report(document));
        }
        assessment
    }

    /// Like [`Analyzer::analyze`] but stops at the first failing detector
    pub fn try_analyze(&self, document: &Document) -> Result<Vec<Report>> {
        self.detectors
            .iter()
            .map(|detector| detector.get_report(document))
            .collect()
    }

    /// Run detectors on scoped threads; reports keep registry order
    pub fn analyze_parallel(&self, document: &Document) -> Assessment {
        let outcomes: Vec<Result<Report>> = thread::scope(|scope| {
            let handles: Vec<_> = self
                .detectors
                .iter()
                .map(|detector| scope.spawn(move || detector.get_report(document)))
                .collect();
            handles
                .into_iter()
                .map(|handle| handle.join().unwrap_or_else(|panic| panic::resume_unwind(panic)))
                .collect()
        });

        let mut assessment = Assessment::default();
        for (detector, outcome) in self.detectors.iter().zip(outcomes) {
            assessment.record(detector.name(), outcome);
        }
        assessment
    }
}

impl fmt::Debug for Analyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Analyzer")
            .field("detectors", &self.names())
            .finish()
    }
}
