//! Issue, Flag and Report value types produced by detectors.

use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::Serialize;

/// A named category of concern with a signed bias score
///
/// Positive scores counteract a bias pattern, negative scores reinforce it.
#[derive(Debug, Clone, Serialize)]
pub struct Issue {
    pub category: String,
    pub explanation: String,
    /// Suggested rewrite; empty when no fix is needed
    pub fix: String,
    pub bias: f64,
}

impl Issue {
    pub const POSITIVE_RESULT: f64 = 1.0;
    pub const NEGATIVE_RESULT: f64 = -1.0;

    pub fn new(
        category: impl Into<String>,
        explanation: impl Into<String>,
        fix: impl Into<String>,
        bias: f64,
    ) -> Self {
        Self {
            category: category.into(),
            explanation: explanation.into(),
            fix: fix.into(),
            bias,
        }
    }

    pub fn has_fix(&self) -> bool {
        !self.fix.is_empty()
    }
}

// Bias is compared by bit pattern so Issue can be Eq + Hash; scores are
// products of the two constants and never NaN.
impl PartialEq for Issue {
    fn eq(&self, other: &Self) -> bool {
        self.category == other.category
            && self.explanation == other.explanation
            && self.fix == other.fix
            && self.bias.to_bits() == other.bias.to_bits()
    }
}

impl Eq for Issue {}

impl Hash for Issue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.category.hash(state);
        self.explanation.hash(state);
        self.fix.hash(state);
        self.bias.to_bits().hash(state);
    }
}

/// One occurrence of an [`Issue`] at a character span of the document
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Flag {
    pub start: usize,
    pub stop: usize,
    pub issue: Issue,
}

impl Flag {
    pub fn new(start: usize, stop: usize, issue: Issue) -> Self {
        Self { start, stop, issue }
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}): {} ({:+.2})",
            self.start, self.stop, self.issue.explanation, self.issue.bias
        )?;
        if self.issue.has_fix() {
            write!(f, " Suggestion: {}", self.issue.fix)?;
        }
        Ok(())
    }
}

/// Output of one detector on one document
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Report {
    pub category: String,
    flags: Vec<Flag>,
    summary: String,
}

impl Report {
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            flags: Vec::new(),
            summary: String::new(),
        }
    }

    pub fn add_flag(&mut self, flag: Flag) {
        self.flags.push(flag);
    }

    pub fn set_summary(&mut self, summary: impl Into<String>) {
        self.summary = summary.into();
    }

    /// Append to the summary, separating from existing text with a newline
    pub fn append_summary(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if !self.summary.is_empty() {
            self.summary.push('\n');
        }
        self.summary.push_str(text);
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Flags in insertion order, duplicates included
    pub fn flags(&self) -> &[Flag] {
        &self.flags
    }

    /// Flags with full-equality duplicates removed, first occurrence kept
    pub fn deduplicated_flags(&self) -> Vec<&Flag> {
        let mut seen = HashSet::with_capacity(self.flags.len());
        self.flags.iter().filter(|flag| seen.insert(*flag)).collect()
    }

    /// Sum of the bias of the deduplicated flags
    pub fn bias_score(&self) -> f64 {
        self.deduplicated_flags().iter().map(|f| f.issue.bias).sum()
    }

    /// Absorb another report: flags are appended, summaries joined
    pub fn merge(&mut self, other: Report) {
        self.flags.extend(other.flags);
        self.append_summary(&other.summary);
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.category)?;
        for flag in self.deduplicated_flags() {
            writeln!(f, "  {flag}")?;
        }
        if !self.summary.is_empty() {
            writeln!(f, "  SUMMARY: {}", self.summary)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn effort_flag(start: usize, stop: usize) -> Flag {
        Flag::new(
            start,
            stop,
            Issue::new("Effort", "effort word", "rephrase", Issue::NEGATIVE_RESULT),
        )
    }

    #[test]
    fn test_identical_flags_compare_equal() {
        assert_eq!(effort_flag(0, 5), effort_flag(0, 5));
        assert_ne!(effort_flag(0, 5), effort_flag(0, 6));

        let halved = Flag::new(
            0,
            5,
            Issue::new("Effort", "effort word", "rephrase", Issue::NEGATIVE_RESULT * 0.5),
        );
        assert_ne!(effort_flag(0, 5), halved);
    }

    #[test]
    fn test_deduplicated_flags_keep_first_order() {
        let mut report = Report::new("Effort");
        report.add_flag(effort_flag(10, 20));
        report.add_flag(effort_flag(0, 5));
        report.add_flag(effort_flag(10, 20));

        assert_eq!(report.flags().len(), 3);
        let unique = report.deduplicated_flags();
        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].start, 10);
        assert_eq!(unique[1].start, 0);
        assert_eq!(report.bias_score(), -2.0);
    }

    #[test]
    fn test_merge_combines_flags_and_summaries() {
        let mut first = Report::new("Combined");
        first.add_flag(effort_flag(0, 5));
        first.set_summary("first summary");

        let mut second = Report::new("Other");
        second.add_flag(effort_flag(6, 9));
        second.set_summary("second summary");

        first.merge(second);
        assert_eq!(first.category, "Combined");
        assert_eq!(first.flags().len(), 2);
        assert_eq!(first.summary(), "first summary\nsecond summary");

        first.merge(Report::new("Empty"));
        assert_eq!(first.summary(), "first summary\nsecond summary");
    }

    #[test]
    fn test_display_lists_suggestion_only_when_present() {
        let mut report = Report::new("Effort vs Accomplishment");
        report.add_flag(effort_flag(0, 5));
        report.add_flag(Flag::new(
            6,
            9,
            Issue::new("Effort", "accomplishment word", "", Issue::POSITIVE_RESULT),
        ));
        let rendered = report.to_string();
        assert!(rendered.contains("[0, 5): effort word (-1.00) Suggestion: rephrase"));
        assert!(rendered.contains("[6, 9): accomplishment word (+1.00)\n"));
    }
}
