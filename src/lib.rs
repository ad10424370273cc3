pub mod config;
pub mod detector;
pub mod discovery;
pub mod document;
pub mod effort;
pub mod error;
pub mod publications;
pub mod reader;
pub mod report;
pub mod segmentation;
pub mod syntax;
pub mod wordlist;

// Re-export main types for convenient access
pub use config::AnalyzerConfig;
pub use detector::{Analyzer, Assessment, Detector, DetectorError, GlobalDetector};
pub use document::Document;
pub use effort::EffortDetector;
pub use error::{BiasError, ParseError, Result};
pub use publications::PublicationDetector;
pub use report::{Flag, Issue, Report};
pub use segmentation::TextSpan;
pub use syntax::{ParsedText, RuleBasedParser, SyntaxParser};
pub use wordlist::{Lexicon, WordList};
