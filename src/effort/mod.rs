//! Effort versus accomplishment.
//!
//! Letters for women are more likely to highlight effort ("she is
//! hard-working") than accomplishment ("her research is groundbreaking").
//! The detector runs two passes and merges their flags:
//!
//! * a lexical pass over every word, with half-strength scores because a word
//!   alone does not show who it describes;
//! * a syntactic pass over adjectival complements whose clause names a third
//!   party (pronoun or proper noun other than the writer), flagging the whole
//!   sentence at full strength.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

use crate::detector::Detector;
use crate::document::Document;
use crate::error::{BiasError, ParseError, Result};
use crate::report::{Flag, Issue, Report};
use crate::syntax::{self, Dependency, ParsedText, PartOfSpeech, SyntaxParser, Token};
use crate::wordlist::Lexicon;

pub const CATEGORY: &str = "Effort vs Accomplishment";

/// The writer talking about themself
const SELF_REFERENCES: &[&str] = &["i", "me", "myself"];

/// The writer's own possessions ("my lab is innovative")
const SELF_POSSESSIVES: &[&str] = &["my", "mine", "our", "ours"];

const LEXICAL_EFFORT_FIX: &str = "Speak about concrete achievement rather than abstract effort.";
const SYNTACTIC_EFFORT_FIX: &str = "Try replacing with phrasing that emphasizes accomplishment.";

pub struct EffortDetector {
    lexicon: Arc<Lexicon>,
    parser: Arc<dyn SyntaxParser>,
}

/// Pass-B output: deduplicated sentence flags and classification counts
#[derive(Debug, Default)]
struct SyntacticFindings {
    flags: Vec<Flag>,
    effort: usize,
    accomplishment: usize,
}

impl EffortDetector {
    /// Embedded word lists and the built-in rule-based parser
    pub fn new() -> Result<Self> {
        let parser =
            syntax::default_parser().map_err(|e| BiasError::detector_failure(CATEGORY, e))?;
        Ok(Self::with_components(Lexicon::embedded(), parser))
    }

    pub fn with_lexicon(lexicon: Arc<Lexicon>) -> Result<Self> {
        let parser =
            syntax::default_parser().map_err(|e| BiasError::detector_failure(CATEGORY, e))?;
        Ok(Self::with_components(lexicon, parser))
    }

    pub fn with_components(lexicon: Arc<Lexicon>, parser: Arc<dyn SyntaxParser>) -> Self {
        Self { lexicon, parser }
    }

    fn lexical_pass(&self, document: &Document, report: &mut Report) {
        for span in document.words_with_indices() {
            let lower = span.word.to_lowercase();
            if self.lexicon.effort.contains(&lower) {
                report.add_flag(Flag::new(
                    span.start,
                    span.stop,
                    Issue::new(
                        CATEGORY,
                        format!(
                            "The word '{}' tends to speak more about effort than concrete accomplishment.",
                            span.word
                        ),
                        LEXICAL_EFFORT_FIX,
                        Issue::NEGATIVE_RESULT * 0.5,
                    ),
                ));
            }
            if self.lexicon.accomplishment.contains(&lower) {
                report.add_flag(Flag::new(
                    span.start,
                    span.stop,
                    Issue::new(
                        CATEGORY,
                        format!("The word '{}' illustrates concrete accomplishment.", span.word),
                        "",
                        Issue::POSITIVE_RESULT * 0.5,
                    ),
                ));
            }
        }
    }

    fn syntactic_pass(&self, document: &Document) -> std::result::Result<SyntacticFindings, ParseError> {
        let parsed = self.parser.parse(document.text())?;
        parsed.validate()?;
        let mut findings = SyntacticFindings::default();
        let mut seen = HashSet::new();

        for (index, token) in parsed.tokens.iter().enumerate() {
            if token.dep != Dependency::AdjectivalComplement {
                continue;
            }
            if !has_referenced_subject(&parsed, index) {
                continue;
            }

            let (explanation, fix, bias) = if self.lexicon.accomplishment.contains(&token.text) {
                findings.accomplishment += 1;
                (
                    format!(
                        "The word '{}' refers to explicit accomplishment rather than effort.",
                        token.text
                    ),
                    "",
                    Issue::POSITIVE_RESULT,
                )
            } else if self.lexicon.effort.contains(&token.text) {
                findings.effort += 1;
                (
                    format!(
                        "The word '{}' tends to speak about effort more than accomplishment.",
                        token.text
                    ),
                    SYNTACTIC_EFFORT_FIX,
                    Issue::NEGATIVE_RESULT,
                )
            } else {
                continue;
            };

            let sentence = parsed.sentence_span(index);
            let flag = Flag::new(
                sentence.start,
                sentence.stop,
                Issue::new(CATEGORY, explanation, fix, bias),
            );
            if seen.insert(flag.clone()) {
                findings.flags.push(flag);
            }
        }

        Ok(findings)
    }
}

impl Detector for EffortDetector {
    fn name(&self) -> &str {
        CATEGORY
    }

    fn get_report(&self, document: &Document) -> Result<Report> {
        let mut report = Report::new(CATEGORY);
        self.lexical_pass(document, &mut report);
        let lexical = report.flags().len();

        let findings = self
            .syntactic_pass(document)
            .map_err(|e| BiasError::detector_failure(CATEGORY, e))?;
        debug!(
            lexical,
            syntactic = findings.flags.len(),
            effort = findings.effort,
            accomplishment = findings.accomplishment,
            "Effort detector finished"
        );

        for flag in findings.flags {
            report.add_flag(flag);
        }

        if findings.effort > 0 && findings.effort <= findings.accomplishment {
            report.set_summary(format!(
                "This document has a high ratio of words suggesting effort ({}) to words suggesting concrete accomplishment ({}).",
                findings.effort, findings.accomplishment
            ));
        }

        Ok(report)
    }
}

/// Whether the clause of an adjectival complement names someone other than the writer
fn has_referenced_subject(parsed: &ParsedText, complement: usize) -> bool {
    let head = parsed.head(complement);
    parsed
        .children(head)
        .filter(|&sibling| sibling != complement)
        .any(|sibling| {
            let token = parsed.token(sibling);
            if refers_to_subject(token) {
                return true;
            }
            // "her research is groundbreaking": the possessor of a noun subject
            token.dep == Dependency::NominalSubject
                && token.pos == PartOfSpeech::Noun
                && parsed.children(sibling).any(|child| {
                    let possessor = parsed.token(child);
                    possessor.dep == Dependency::Possessive && possessor_refers_to_subject(possessor)
                })
        })
}

fn refers_to_subject(token: &Token) -> bool {
    token.pos.is_referential() && !SELF_REFERENCES.contains(&token.text.to_lowercase().as_str())
}

fn possessor_refers_to_subject(token: &Token) -> bool {
    token.pos.is_referential() && !SELF_POSSESSIVES.contains(&token.text.to_lowercase().as_str())
}
