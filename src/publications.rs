//! Publication mentions.
//!
//! Strong letters point at concrete work products. Every double-quoted span
//! (`"Deep Learning Advances"`) counts as a quarter of a publication; the
//! document-level summary compares the total against a configured minimum.

use std::collections::BTreeMap;

use regex_automata::meta::Regex;
use tracing::debug;

use crate::detector::{Detector, GlobalDetector};
use crate::document::Document;
use crate::error::{BiasError, Result};
use crate::report::Report;

pub const CATEGORY: &str = "Publications";
pub const DEFAULT_MIN_PUBLICATIONS: f64 = 0.5;

const QUOTED_PATTERN: &str = r#""[^"]+""#;
const QUOTED_WEIGHT: f64 = 0.25;

const TOO_FEW: &str = "This document does not mention many publications. Try referencing more concrete publications or work byproducts, if possible.";

pub struct PublicationDetector {
    min_publications: f64,
    quoted: Regex,
}

impl PublicationDetector {
    pub fn new(min_publications: f64) -> Result<Self> {
        if !min_publications.is_finite() || min_publications < 0.0 {
            return Err(BiasError::Configuration(format!(
                "min_publications must be a non-negative number, got {min_publications}"
            )));
        }
        let quoted = Regex::new(QUOTED_PATTERN).map_err(|e| BiasError::Pattern(e.to_string()))?;
        Ok(Self {
            min_publications,
            quoted,
        })
    }

    pub fn min_publications(&self) -> f64 {
        self.min_publications
    }

    /// Weight per distinct quoted span, quotes included in the key
    pub fn identify_publications(&self, document: &Document) -> BTreeMap<String, f64> {
        let text = document.text();
        let mut publications = BTreeMap::new();
        for m in self.quoted.find_iter(text) {
            *publications
                .entry(text[m.start()..m.end()].to_string())
                .or_insert(0.0) += QUOTED_WEIGHT;
        }
        publications
    }
}

impl Detector for PublicationDetector {
    fn name(&self) -> &str {
        CATEGORY
    }

    fn get_report(&self, document: &Document) -> Result<Report> {
        self.summary_report(document)
    }
}

impl GlobalDetector for PublicationDetector {
    fn get_summary(&self, document: &Document) -> Result<String> {
        let publications = self.identify_publications(document);
        let total: f64 = publications.values().sum();
        debug!(
            distinct = publications.len(),
            total, "Counted publication mentions"
        );

        let summary = if total < self.min_publications {
            TOO_FEW.to_string()
        } else if self.min_publications > 1.0 {
            format!(
                "The text appears to mention at least {} publications.",
                self.min_publications.ceil() as u64
            )
        } else {
            "The text appears to mention at least one publication.".to_string()
        };
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector(min: f64) -> PublicationDetector {
        PublicationDetector::new(min).unwrap()
    }

    fn doc(text: &str) -> Document {
        Document::new(text).unwrap()
    }

    #[test]
    fn test_repeated_title_accumulates() {
        let found = detector(DEFAULT_MIN_PUBLICATIONS).identify_publications(&doc(
            "He published \"Deep Learning Advances\" and cited \"Deep Learning Advances\" again.",
        ));
        assert_eq!(found.len(), 1);
        assert_eq!(found["\"Deep Learning Advances\""], 0.5);
    }

    #[test]
    fn test_empty_quotes_do_not_count() {
        let found = detector(0.5).identify_publications(&doc("She said \"\" and left."));
        assert!(found.is_empty());
    }

    #[test]
    fn test_no_quotes_is_too_few() {
        let report = detector(0.5)
            .get_report(&doc("She is a strong candidate."))
            .unwrap();
        assert_eq!(report.category, CATEGORY);
        assert!(report.flags().is_empty());
        assert_eq!(report.summary(), TOO_FEW);
    }

    #[test]
    fn test_summary_thresholds() {
        let two_titles = doc("She wrote \"Protein Folding\" and \"Cell Signals\".");
        assert_eq!(
            detector(0.5).get_summary(&two_titles).unwrap(),
            "The text appears to mention at least one publication."
        );
        assert_eq!(detector(0.75).get_summary(&two_titles).unwrap(), TOO_FEW);

        let many = doc("\"A\" \"B\" \"C\" \"D\" \"E\" \"F\" \"G\"");
        assert_eq!(
            detector(1.5).get_summary(&many).unwrap(),
            "The text appears to mention at least 2 publications."
        );
    }

    #[test]
    fn test_zero_minimum_always_passes() {
        assert_eq!(
            detector(0.0).get_summary(&doc("No titles here.")).unwrap(),
            "The text appears to mention at least one publication."
        );
    }

    #[test]
    fn test_invalid_minimum_is_configuration_error() {
        for bad in [-0.25, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                PublicationDetector::new(bad),
                Err(BiasError::Configuration(_))
            ));
        }
    }
}
