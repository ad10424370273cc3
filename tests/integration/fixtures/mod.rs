// Recommendation letters with known detector outcomes

#![allow(dead_code)]

/// Accomplishment-focused letter citing two publications
pub const STRONG_LETTER: &str = "Dear Hiring Committee,

I am delighted to recommend Dr. Maria Lopez. Maria is brilliant. Her research is groundbreaking and her methods are innovative.

She published \"Protein Folding at Scale\" and \"Signals in Noise\" in leading journals.

Sincerely,
Prof. Alan Reed
";

/// Effort-focused letter with no publications
pub const EFFORT_LETTER: &str = "To whom it may concern,

It is my pleasure to recommend Sarah Kim. Sarah is hard-working and diligent. She is always punctual. Her attitude is dependable.

Best regards,
John Smith
";

/// Letter written about the writer rather than the candidate
pub const SELF_FOCUSED_LETTER: &str = "I am thorough. My lab is innovative. I am careful with every report.";

/// Non-ASCII names and typographic quotes shift character offsets away from byte offsets
pub const UNICODE_LETTER: &str = "Zo\u{eb} Ng\u{1ef5}y\u{ea}n is exceptional. She wrote \u{201c}Field Notes\u{201d} and \"Caf\u{e9} Physics\".";
