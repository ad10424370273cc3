//! Boundary to the syntactic parsing capability.
//!
//! Detectors only need a narrow view of a parse: tokens with character
//! offsets, a part-of-speech tag, a dependency label with head/children
//! traversal, and the span of the sentence each token belongs to. Any parser
//! that can fill a [`ParsedText`] can back the detectors through
//! [`SyntaxParser`]; [`RuleBasedParser`] is the built-in implementation.

use std::fmt;
use std::sync::{Arc, OnceLock};

use serde::Serialize;

use crate::error::ParseError;
use crate::segmentation::TextSpan;

mod lexicon;
pub mod rule_based;

pub use rule_based::RuleBasedParser;

/// Coarse part-of-speech tags (Universal Dependencies tag set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PartOfSpeech {
    Pronoun,
    ProperNoun,
    Noun,
    Verb,
    Auxiliary,
    Adjective,
    Adverb,
    Determiner,
    Adposition,
    CoordinatingConjunction,
    SubordinatingConjunction,
    Particle,
    Numeral,
    Punctuation,
}

impl PartOfSpeech {
    pub fn tag(&self) -> &'static str {
        match self {
            PartOfSpeech::Pronoun => "PRON",
            PartOfSpeech::ProperNoun => "PROPN",
            PartOfSpeech::Noun => "NOUN",
            PartOfSpeech::Verb => "VERB",
            PartOfSpeech::Auxiliary => "AUX",
            PartOfSpeech::Adjective => "ADJ",
            PartOfSpeech::Adverb => "ADV",
            PartOfSpeech::Determiner => "DET",
            PartOfSpeech::Adposition => "ADP",
            PartOfSpeech::CoordinatingConjunction => "CCONJ",
            PartOfSpeech::SubordinatingConjunction => "SCONJ",
            PartOfSpeech::Particle => "PART",
            PartOfSpeech::Numeral => "NUM",
            PartOfSpeech::Punctuation => "PUNCT",
        }
    }

    /// Pronoun or proper noun: tokens that can name the letter's subject
    pub fn is_referential(&self) -> bool {
        matches!(self, PartOfSpeech::Pronoun | PartOfSpeech::ProperNoun)
    }
}

/// Dependency relation of a token to its head (ClearNLP style labels)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Dependency {
    Root,
    NominalSubject,
    AdjectivalComplement,
    Attribute,
    Auxiliary,
    AdverbialModifier,
    Negation,
    Possessive,
    Determiner,
    AdjectivalModifier,
    Compound,
    Conjunct,
    CoordinatingConjunction,
    Preposition,
    PrepositionalObject,
    AdverbialClause,
    Marker,
    Punctuation,
    Unclassified,
}

impl Dependency {
    pub fn label(&self) -> &'static str {
        match self {
            Dependency::Root => "ROOT",
            Dependency::NominalSubject => "nsubj",
            Dependency::AdjectivalComplement => "acomp",
            Dependency::Attribute => "attr",
            Dependency::Auxiliary => "aux",
            Dependency::AdverbialModifier => "advmod",
            Dependency::Negation => "neg",
            Dependency::Possessive => "poss",
            Dependency::Determiner => "det",
            Dependency::AdjectivalModifier => "amod",
            Dependency::Compound => "compound",
            Dependency::Conjunct => "conj",
            Dependency::CoordinatingConjunction => "cc",
            Dependency::Preposition => "prep",
            Dependency::PrepositionalObject => "pobj",
            Dependency::AdverbialClause => "advcl",
            Dependency::Marker => "mark",
            Dependency::Punctuation => "punct",
            Dependency::Unclassified => "dep",
        }
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One parsed token; `start`/`stop` are character offsets into the parsed text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub text: String,
    pub start: usize,
    pub stop: usize,
    pub pos: PartOfSpeech,
    pub dep: Dependency,
    /// Index of the head token; a root is its own head
    pub head: usize,
    /// Index into [`ParsedText::sentences`]
    pub sentence: usize,
}

/// Tokens plus sentence spans for one parsed text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedText {
    pub tokens: Vec<Token>,
    pub sentences: Vec<TextSpan>,
}

impl ParsedText {
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn token(&self, index: usize) -> &Token {
        &self.tokens[index]
    }

    /// Head of the token at `index` (the token itself for a root)
    pub fn head(&self, index: usize) -> usize {
        self.tokens[index].head
    }

    /// Indices of the tokens whose head is `index`, excluding a root's self-loop
    pub fn children(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        self.tokens
            .iter()
            .enumerate()
            .filter(move |(i, token)| *i != index && token.head == index)
            .map(|(i, _)| i)
    }

    /// Span of the sentence containing the token at `index`
    pub fn sentence_span(&self, index: usize) -> TextSpan {
        self.sentences[self.tokens[index].sentence]
    }

    /// Check that every head and sentence index points inside this parse.
    /// The accessors above index directly, so parses from outside the crate
    /// go through here first.
    pub fn validate(&self) -> Result<(), ParseError> {
        for (index, token) in self.tokens.iter().enumerate() {
            if token.head >= self.tokens.len() {
                return Err(ParseError::Malformed(format!(
                    "token {index} ({:?}) has head {} but the parse has {} tokens",
                    token.text,
                    token.head,
                    self.tokens.len()
                )));
            }
            if token.sentence >= self.sentences.len() {
                return Err(ParseError::Malformed(format!(
                    "token {index} ({:?}) is in sentence {} but the parse has {} sentences",
                    token.text,
                    token.sentence,
                    self.sentences.len()
                )));
            }
            if token.start > token.stop {
                return Err(ParseError::Malformed(format!(
                    "token {index} ({:?}) ends at {} before it starts at {}",
                    token.text, token.stop, token.start
                )));
            }
        }
        Ok(())
    }
}

/// Anything that can turn raw text into a [`ParsedText`]
pub trait SyntaxParser: Send + Sync {
    fn parse(&self, text: &str) -> Result<ParsedText, ParseError>;
}

/// Process-wide rule-based parser, built on first use
pub fn default_parser() -> Result<Arc<dyn SyntaxParser>, ParseError> {
    static SHARED: OnceLock<Arc<RuleBasedParser>> = OnceLock::new();
    let parser = match SHARED.get() {
        Some(parser) => parser.clone(),
        None => {
            let built = Arc::new(RuleBasedParser::new()?);
            SHARED.get_or_init(|| built).clone()
        }
    };
    let parser: Arc<dyn SyntaxParser> = parser;
    Ok(parser)
}
