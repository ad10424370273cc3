//! Deterministic dependency heuristics for copular clauses.
//!
//! The parser does not try to be a general dependency parser. It tags tokens
//! from closed-class word lists plus capitalization and suffix cues, then
//! builds the relations the detectors rely on: each copula ("is", "seems",
//! "became") heads a clause with an `nsubj` to its left and an `acomp` or
//! `attr` to its right. Noun phrases get `det`, `poss`, `amod` and `compound`
//! dependents; coordinated subjects and complements get `conj`/`cc`.
//! Prepositional objects hang off their preposition (`prep` -> `pobj`) and
//! subordinate clauses off their own head (`advcl` with a `mark`), so only a
//! clause's own subject is a sibling of its complement. Anything left over
//! attaches as `dep` to the word before it.
//!
//! ```text
//! She   is   hard-working and her  research is   groundbreaking .
//! nsubj ROOT acomp        dep  poss nsubj    conj acomp          punct
//!
//! I     am   careful with them .
//! nsubj ROOT acomp   prep pobj punct
//!
//! I     am   diligent ,     as   she   knows .
//! nsubj ROOT acomp    punct mark nsubj advcl punct
//! ```

use std::collections::HashSet;

use tracing::debug;

use super::lexicon::{self, closed_class};
use super::{Dependency, ParsedText, PartOfSpeech, SyntaxParser, Token};
use crate::error::ParseError;
use crate::segmentation::{CharCounter, RawToken, Segmenter, TextSpan, TokenKind};

/// Heuristic parser sharing the document segmenter
pub struct RuleBasedParser {
    segmenter: &'static Segmenter,
}

impl RuleBasedParser {
    pub fn new() -> Result<Self, ParseError> {
        let segmenter =
            Segmenter::shared().map_err(|e| ParseError::Unavailable(e.to_string()))?;
        Ok(Self { segmenter })
    }
}

impl SyntaxParser for RuleBasedParser {
    fn parse(&self, text: &str) -> Result<ParsedText, ParseError> {
        let sentence_bytes = self.segmenter.sentence_byte_spans(text);
        let raw_tokens = self.segmenter.tokenizer().tokens(text);
        if raw_tokens.is_empty() {
            return Ok(ParsedText::default());
        }

        let mut sentence_counter = CharCounter::new(text);
        let sentences: Vec<TextSpan> = sentence_bytes
            .iter()
            .map(|&(start, end)| {
                TextSpan::new(sentence_counter.char_at(start), sentence_counter.char_at(end))
            })
            .collect();

        // Words seen in lowercase anywhere; a capitalized sentence-initial word
        // that also occurs lowercased is a common noun, not a name
        let lowercase_seen: HashSet<String> = raw_tokens
            .iter()
            .map(|t| &text[t.start..t.end])
            .filter(|w| w.chars().next().is_some_and(char::is_lowercase))
            .map(str::to_lowercase)
            .collect();

        let groups = group_by_sentence(&raw_tokens, &sentence_bytes);
        let mut token_counter = CharCounter::new(text);
        let mut tokens = Vec::with_capacity(raw_tokens.len());

        for (sentence, range) in groups {
            let base = tokens.len();
            let slice = &raw_tokens[range];
            let words: Vec<&str> = slice.iter().map(|t| &text[t.start..t.end]).collect();
            let kinds: Vec<TokenKind> = slice.iter().map(|t| t.kind).collect();

            let mut clause = SentenceParse::new(&words, &kinds, &lowercase_seen);
            clause.run();

            for (local, raw) in slice.iter().enumerate() {
                let (dep, head) = clause.relation(local);
                tokens.push(Token {
                    text: words[local].to_string(),
                    start: token_counter.char_at(raw.start),
                    stop: token_counter.char_at(raw.end),
                    pos: clause.pos[local],
                    dep,
                    head: base + head,
                    sentence,
                });
            }
        }

        debug!("Parsed {} tokens in {} sentences", tokens.len(), sentences.len());
        Ok(ParsedText { tokens, sentences })
    }
}

/// Contiguous token ranges per sentence index
fn group_by_sentence(
    tokens: &[RawToken],
    sentences: &[(usize, usize)],
) -> Vec<(usize, std::ops::Range<usize>)> {
    let mut groups: Vec<(usize, std::ops::Range<usize>)> = Vec::new();
    let mut sentence = 0;
    for (i, token) in tokens.iter().enumerate() {
        while sentence + 1 < sentences.len() && token.start >= sentences[sentence].1 {
            sentence += 1;
        }
        match groups.last_mut() {
            Some((current, range)) if *current == sentence => range.end = i + 1,
            _ => groups.push((sentence, i..i + 1)),
        }
    }
    groups
}

/// Tagging and attachment state for one sentence (local indices)
struct SentenceParse<'a> {
    words: &'a [&'a str],
    lower: Vec<String>,
    pos: Vec<PartOfSpeech>,
    deps: Vec<Option<(Dependency, usize)>>,
    root: usize,
}

impl<'a> SentenceParse<'a> {
    fn new(words: &'a [&'a str], kinds: &[TokenKind], lowercase_seen: &HashSet<String>) -> Self {
        let lower: Vec<String> = words.iter().map(|w| w.to_lowercase()).collect();
        let first_word = kinds.iter().position(|k| *k == TokenKind::Word);

        let pos = (0..words.len())
            .map(|i| {
                if kinds[i] == TokenKind::Punctuation {
                    return PartOfSpeech::Punctuation;
                }
                tag_word(words, &lower, i, first_word == Some(i), lowercase_seen)
            })
            .collect();

        Self {
            words,
            lower,
            pos,
            deps: vec![None; words.len()],
            root: 0,
        }
    }

    fn len(&self) -> usize {
        self.words.len()
    }

    fn run(&mut self) {
        let copulas: Vec<usize> = (0..self.len()).filter(|&i| self.is_copula(i)).collect();

        self.root = copulas
            .first()
            .copied()
            .or_else(|| self.pos.iter().position(|p| *p == PartOfSpeech::Verb))
            .or_else(|| self.pos.iter().position(|p| *p == PartOfSpeech::Auxiliary))
            .or_else(|| self.pos.iter().position(|p| *p != PartOfSpeech::Punctuation))
            .unwrap_or(0);
        self.deps[self.root] = Some((Dependency::Root, self.root));

        for &copula in copulas.iter().skip(1) {
            self.attach(copula, self.root, Dependency::Conjunct);
        }
        for &copula in &copulas {
            self.parse_clause(copula);
        }
        self.attach_prepositional_phrases();
        self.attach_subordinate_clauses();
        self.attach_remaining();
    }

    fn relation(&self, index: usize) -> (Dependency, usize) {
        self.deps[index].unwrap_or((Dependency::Unclassified, self.root))
    }

    fn attach(&mut self, child: usize, head: usize, dep: Dependency) {
        if self.deps[child].is_none() {
            self.deps[child] = Some((dep, head));
        }
    }

    fn is_free(&self, index: usize) -> bool {
        self.deps[index].is_none()
    }

    fn is_copula(&self, index: usize) -> bool {
        let lower = self.lower[index].as_str();
        match self.pos[index] {
            PartOfSpeech::Auxiliary => lexicon::is_be_form(lower),
            PartOfSpeech::Verb => lexicon::is_linking_verb(lower),
            _ => false,
        }
    }

    fn is_nominal_head(&self, index: usize) -> bool {
        matches!(
            self.pos[index],
            PartOfSpeech::Pronoun
                | PartOfSpeech::ProperNoun
                | PartOfSpeech::Noun
                | PartOfSpeech::Numeral
        )
    }

    fn next_pos(&self, index: usize) -> Option<PartOfSpeech> {
        self.pos.get(index + 1).copied()
    }

    /// Whether the word after a copula reads as an adjective
    fn is_adjective_candidate(&self, index: usize) -> bool {
        let lower = self.lower[index].as_str();
        let next = self.next_pos(index);
        let takes_object = matches!(
            next,
            Some(
                PartOfSpeech::Determiner
                    | PartOfSpeech::Pronoun
                    | PartOfSpeech::Numeral
                    | PartOfSpeech::ProperNoun
            )
        );
        match self.pos[index] {
            PartOfSpeech::Adjective => true,
            // progressive: "is working on", "is leading the"
            PartOfSpeech::Noun if lower.ends_with("ing") => {
                !takes_object && next != Some(PartOfSpeech::Adposition)
            }
            PartOfSpeech::Noun => true,
            // passive: "was awarded the prize"
            PartOfSpeech::Verb => lower.ends_with("ed") && !takes_object,
            _ => false,
        }
    }

    fn parse_clause(&mut self, copula: usize) {
        // Left: auxiliaries/adverbs, then the subject
        let mut j = copula;
        while j > 0 && self.is_free(j - 1) {
            let dep = match self.pos[j - 1] {
                PartOfSpeech::Particle => Dependency::Negation,
                PartOfSpeech::Auxiliary => Dependency::Auxiliary,
                PartOfSpeech::Adverb => Dependency::AdverbialModifier,
                _ => break,
            };
            self.attach(j - 1, copula, dep);
            j -= 1;
        }
        if j > 0 && self.is_free(j - 1) && self.is_nominal_head(j - 1) {
            self.attach_subject(j - 1, copula);
        }

        // Right: adverbs, then an adjectival complement or an attribute
        let mut k = copula + 1;
        let mut pending = Vec::new();
        while k < self.len()
            && self.is_free(k)
            && matches!(self.pos[k], PartOfSpeech::Adverb | PartOfSpeech::Particle)
        {
            pending.push(k);
            k += 1;
        }

        let complement = (k < self.len() && self.is_free(k) && self.is_adjective_candidate(k))
            .then_some(k);
        for p in pending {
            match (self.pos[p], complement) {
                (PartOfSpeech::Particle, _) | (_, None) => {
                    let dep = if self.pos[p] == PartOfSpeech::Particle {
                        Dependency::Negation
                    } else {
                        Dependency::AdverbialModifier
                    };
                    self.attach(p, copula, dep)
                }
                (_, Some(adjective)) => self.attach(p, adjective, Dependency::AdverbialModifier),
            }
        }

        match complement {
            Some(adjective) => {
                self.pos[adjective] = PartOfSpeech::Adjective;
                self.attach(adjective, copula, Dependency::AdjectivalComplement);
                self.attach_coordinated_adjectives(adjective);
            }
            None if k < self.len() && self.is_free(k) => self.attach_attribute(k, copula),
            None => {}
        }
    }

    /// Attach the subject ending at `head`, following "X and Y" coordination
    fn attach_subject(&mut self, head: usize, copula: usize) {
        let mut heads = vec![head];
        let mut connectors = Vec::new();
        let mut left = self.attach_premodifiers(head);

        while left >= 2 {
            let connector = left - 1;
            let previous = left - 2;
            let coordinates = self.lower[connector] == "and"
                || self.lower[connector] == "or"
                || self.words[connector] == ",";
            if !coordinates
                || !self.is_free(connector)
                || !self.is_free(previous)
                || !self.is_nominal_head(previous)
            {
                break;
            }
            heads.push(previous);
            connectors.push(connector);
            left = self.attach_premodifiers(previous);
        }

        let leftmost = heads[heads.len() - 1];
        self.attach(leftmost, copula, Dependency::NominalSubject);
        for &other in &heads[..heads.len() - 1] {
            self.attach(other, leftmost, Dependency::Conjunct);
        }
        for connector in connectors {
            let dep = if self.words[connector] == "," {
                Dependency::Punctuation
            } else {
                Dependency::CoordinatingConjunction
            };
            self.attach(connector, leftmost, dep);
        }
    }

    /// Attach determiners, possessors and modifiers left of a noun; returns the
    /// leftmost index of the noun phrase
    fn attach_premodifiers(&mut self, head: usize) -> usize {
        if !matches!(self.pos[head], PartOfSpeech::Noun | PartOfSpeech::ProperNoun) {
            return head;
        }
        let mut i = head;
        while i > 0 && self.is_free(i - 1) {
            let m = i - 1;
            let genitive = self.lower[m].ends_with("'s") || self.lower[m].ends_with("\u{2019}s");
            let (dep, target) = match self.pos[m] {
                PartOfSpeech::Determiner => (Dependency::Determiner, head),
                PartOfSpeech::Pronoun if lexicon::is_possessive(&self.lower[m]) => {
                    (Dependency::Possessive, head)
                }
                PartOfSpeech::Noun | PartOfSpeech::ProperNoun if genitive => {
                    (Dependency::Possessive, head)
                }
                PartOfSpeech::Noun | PartOfSpeech::ProperNoun => (Dependency::Compound, head),
                PartOfSpeech::Adjective | PartOfSpeech::Verb | PartOfSpeech::Numeral => {
                    if self.pos[m] == PartOfSpeech::Verb {
                        self.pos[m] = PartOfSpeech::Adjective;
                    }
                    (Dependency::AdjectivalModifier, head)
                }
                // "very talented": the adverb modifies its right neighbour
                PartOfSpeech::Adverb if i != head => (Dependency::AdverbialModifier, i),
                _ => break,
            };
            self.attach(m, target, dep);
            i = m;
            if matches!(dep, Dependency::Determiner | Dependency::Possessive) {
                break;
            }
        }
        i
    }

    /// "diligent, creative and kind": later adjectives are `conj` of the first
    fn attach_coordinated_adjectives(&mut self, first: usize) {
        let mut k = first + 1;
        loop {
            let mut connectors = Vec::new();
            while k < self.len()
                && self.is_free(k)
                && (self.words[k] == "," || self.pos[k] == PartOfSpeech::CoordinatingConjunction)
            {
                connectors.push(k);
                k += 1;
            }
            if connectors.is_empty() {
                return;
            }
            let mut adverbs = Vec::new();
            while k < self.len() && self.is_free(k) && self.pos[k] == PartOfSpeech::Adverb {
                adverbs.push(k);
                k += 1;
            }
            if k >= self.len() || !self.is_free(k) || !self.is_adjective_candidate(k) {
                return;
            }
            // "and research is ..." starts a new clause
            if k + 1 < self.len() && self.is_copula(k + 1) {
                return;
            }

            self.pos[k] = PartOfSpeech::Adjective;
            self.attach(k, first, Dependency::Conjunct);
            for connector in connectors {
                let dep = if self.words[connector] == "," {
                    Dependency::Punctuation
                } else {
                    Dependency::CoordinatingConjunction
                };
                self.attach(connector, first, dep);
            }
            for adverb in adverbs {
                self.attach(adverb, k, Dependency::AdverbialModifier);
            }
            k += 1;
        }
    }

    /// "She is a talented scientist": the noun phrase head is `attr`
    fn attach_attribute(&mut self, start: usize, copula: usize) {
        let end = self.noun_phrase_end(start);
        let head = (start..end).rev().find(|&i| self.is_nominal_head(i));
        if let Some(head) = head {
            self.attach(head, copula, Dependency::Attribute);
            self.attach_premodifiers(head);
        }
    }

    /// Exclusive end of the free noun phrase starting at `start`
    fn noun_phrase_end(&self, start: usize) -> usize {
        let mut end = start;
        while end < self.len() && self.is_free(end) {
            let continues = match self.pos[end] {
                PartOfSpeech::Determiner
                | PartOfSpeech::Adjective
                | PartOfSpeech::Noun
                | PartOfSpeech::ProperNoun
                | PartOfSpeech::Numeral
                | PartOfSpeech::Adverb => true,
                PartOfSpeech::Verb => self.lower[end].ends_with("ed"),
                PartOfSpeech::Pronoun => lexicon::is_possessive(&self.lower[end]) || end == start,
                _ => false,
            };
            if !continues {
                break;
            }
            end += 1;
        }
        end
    }

    /// "careful with them": the object is `pobj` of the preposition, which is
    /// `prep` of the nearest content word on its left
    fn attach_prepositional_phrases(&mut self) {
        for adposition in 0..self.len() {
            if !self.is_free(adposition) || self.pos[adposition] != PartOfSpeech::Adposition {
                continue;
            }
            let head = (0..adposition)
                .rev()
                .find(|&i| self.is_content_word(i))
                .unwrap_or(self.root);
            self.attach(adposition, head, Dependency::Preposition);

            let start = adposition + 1;
            let end = self.noun_phrase_end(start);
            if let Some(object) = (start..end).rev().find(|&i| self.is_nominal_head(i)) {
                self.attach(object, adposition, Dependency::PrepositionalObject);
                self.attach_premodifiers(object);
            }
        }
    }

    /// "as she knows": the clause head is `advcl` of the root, with the
    /// conjunction as `mark` and the first nominal as its subject
    fn attach_subordinate_clauses(&mut self) {
        for marker in 0..self.len() {
            if !self.is_free(marker) || self.pos[marker] != PartOfSpeech::SubordinatingConjunction {
                continue;
            }
            let end = (marker + 1..self.len())
                .find(|&i| {
                    matches!(
                        self.pos[i],
                        PartOfSpeech::Punctuation
                            | PartOfSpeech::CoordinatingConjunction
                            | PartOfSpeech::SubordinatingConjunction
                    )
                })
                .unwrap_or(self.len());

            // a copular clause was already parsed and joined to the root
            if let Some(copula) = (marker + 1..end).find(|&i| self.is_copula(i)) {
                self.attach(marker, copula, Dependency::Marker);
                continue;
            }

            let free: Vec<usize> = (marker + 1..end).filter(|&i| self.is_free(i)).collect();
            let subject = free.iter().copied().find(|&i| self.is_nominal_head(i));
            let head = free
                .iter()
                .copied()
                .find(|&i| Some(i) != subject && subject.map_or(true, |s| i > s))
                .or(subject);
            let Some(head) = head else {
                continue;
            };

            self.attach(head, self.root, Dependency::AdverbialClause);
            self.attach(marker, head, Dependency::Marker);
            if let Some(subject) = subject.filter(|&s| s != head) {
                self.attach(subject, head, Dependency::NominalSubject);
                self.attach_premodifiers(subject);
            }
            for i in free {
                self.attach(i, head, Dependency::Unclassified);
            }
        }
    }

    /// Punctuation goes to the root; any other free token to the nearest
    /// word on its left (the root when it opens the sentence)
    fn attach_remaining(&mut self) {
        for index in 0..self.len() {
            if !self.is_free(index) {
                continue;
            }
            if self.pos[index] == PartOfSpeech::Punctuation {
                self.attach(index, self.root, Dependency::Punctuation);
                continue;
            }
            let head = (0..index)
                .rev()
                .find(|&i| self.pos[i] != PartOfSpeech::Punctuation)
                .unwrap_or(self.root);
            self.attach(index, head, Dependency::Unclassified);
        }
    }

    fn is_content_word(&self, index: usize) -> bool {
        !matches!(
            self.pos[index],
            PartOfSpeech::Punctuation
                | PartOfSpeech::Determiner
                | PartOfSpeech::Adposition
                | PartOfSpeech::CoordinatingConjunction
                | PartOfSpeech::SubordinatingConjunction
                | PartOfSpeech::Particle
        )
    }
}

fn tag_word(
    words: &[&str],
    lower: &[String],
    index: usize,
    sentence_initial: bool,
    lowercase_seen: &HashSet<String>,
) -> PartOfSpeech {
    let word = words[index];
    let lower_word = lower[index].as_str();

    if word.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        return PartOfSpeech::Numeral;
    }
    if let Some(pos) = closed_class(lower_word) {
        return pos;
    }
    if word.chars().next().is_some_and(char::is_uppercase) {
        if !sentence_initial {
            return PartOfSpeech::ProperNoun;
        }
        let next_capitalized = words
            .get(index + 1)
            .and_then(|w| w.chars().next())
            .is_some_and(char::is_uppercase);
        let base = lower_word.trim_end_matches("'s").trim_end_matches("\u{2019}s");
        if next_capitalized || !lowercase_seen.contains(base) {
            return PartOfSpeech::ProperNoun;
        }
        return PartOfSpeech::Noun;
    }
    if lower_word.ends_with("ed") {
        return PartOfSpeech::Verb;
    }
    PartOfSpeech::Noun
}
