// Closed-class English vocabulary for the rule-based tagger.
// Lookups take lowercased words.

use super::PartOfSpeech;

pub const PRONOUNS: &[&str] = &[
    "i", "me", "myself", "mine", "you", "yourself", "yours", "he", "him", "himself", "she",
    "herself", "hers", "it", "itself", "we", "us", "ourselves", "ours", "they", "them",
    "themselves", "theirs", "who", "whom", "someone", "everyone", "anyone", "somebody",
    "everybody", "anybody",
];

/// Possessive determiners; spaCy tags these PRON with a `poss` relation
pub const POSSESSIVES: &[&str] = &["my", "your", "his", "her", "its", "our", "their", "whose"];

pub const DETERMINERS: &[&str] = &[
    "the", "a", "an", "this", "that", "these", "those", "every", "each", "some", "any", "no",
    "all", "both", "another", "such", "many", "several", "few",
];

/// Forms of "be": the copulas that take adjectival complements. The tokenizer
/// keeps contractions whole, so negated forms are listed too.
pub const BE_FORMS: &[&str] = &[
    "be", "is", "am", "are", "was", "were", "been", "being", "isn't", "aren't", "wasn't",
    "weren't",
];

pub const AUXILIARIES: &[&str] = &[
    "has", "have", "had", "having", "do", "does", "did", "will", "would", "shall", "should",
    "can", "could", "may", "might", "must",
];

/// Non-"be" verbs that link a subject to an adjective ("she seems capable")
pub const LINKING_VERBS: &[&str] = &[
    "seem", "seems", "seemed", "appear", "appears", "appeared", "become", "becomes", "became",
    "remain", "remains", "remained", "prove", "proves", "proved", "stay", "stays", "stayed",
    "look", "looks", "looked", "sound", "sounds", "sounded", "feel", "feels", "felt",
];

pub const COORDINATING_CONJUNCTIONS: &[&str] = &["and", "or", "but", "nor", "yet"];

pub const SUBORDINATING_CONJUNCTIONS: &[&str] = &[
    "because", "although", "though", "while", "whereas", "if", "unless", "since", "when",
    "whenever", "where", "after", "before", "until", "as",
];

pub const ADPOSITIONS: &[&str] = &[
    "of", "in", "on", "at", "to", "for", "with", "by", "from", "about", "into", "onto",
    "during", "through", "throughout", "over", "under", "between", "among", "within", "without",
    "across", "against", "toward", "towards", "upon", "beyond", "via", "per", "like",
];

pub const ADVERBS: &[&str] = &[
    "very", "so", "too", "quite", "rather", "also", "always", "often", "ever", "still",
    "already", "just", "even", "most", "more", "less", "least", "well", "truly", "really",
    "indeed", "here", "there", "now", "then", "again", "almost", "perhaps", "simply",
];

pub const NEGATIONS: &[&str] = &["not", "n't", "never"];

/// Words ending in "-ly" that are not adverbs
pub const LY_NON_ADVERBS: &[&str] = &[
    "family", "supply", "reply", "apply", "rely", "ally", "italy", "july", "early", "friendly",
    "lovely", "scholarly", "timely", "likely", "only", "holy", "ugly", "costly", "lonely",
    "elderly", "orderly", "weekly", "monthly", "yearly", "daily",
];

pub fn is_be_form(lower: &str) -> bool {
    BE_FORMS.contains(&lower)
}

pub fn is_linking_verb(lower: &str) -> bool {
    LINKING_VERBS.contains(&lower)
}

pub fn is_possessive(lower: &str) -> bool {
    POSSESSIVES.contains(&lower)
}

/// Context-free tag for a lowercased word, if it belongs to a closed class
pub fn closed_class(lower: &str) -> Option<PartOfSpeech> {
    let pos = if PRONOUNS.contains(&lower) || POSSESSIVES.contains(&lower) {
        PartOfSpeech::Pronoun
    } else if DETERMINERS.contains(&lower) {
        PartOfSpeech::Determiner
    } else if BE_FORMS.contains(&lower) || AUXILIARIES.contains(&lower) {
        PartOfSpeech::Auxiliary
    } else if LINKING_VERBS.contains(&lower) {
        PartOfSpeech::Verb
    } else if NEGATIONS.contains(&lower) {
        PartOfSpeech::Particle
    } else if COORDINATING_CONJUNCTIONS.contains(&lower) {
        PartOfSpeech::CoordinatingConjunction
    } else if SUBORDINATING_CONJUNCTIONS.contains(&lower) {
        PartOfSpeech::SubordinatingConjunction
    } else if ADPOSITIONS.contains(&lower) {
        PartOfSpeech::Adposition
    } else if ADVERBS.contains(&lower) || is_ly_adverb(lower) {
        PartOfSpeech::Adverb
    } else {
        return None;
    };
    Some(pos)
}

fn is_ly_adverb(lower: &str) -> bool {
    lower.len() > 4 && lower.ends_with("ly") && !LY_NON_ADVERBS.contains(&lower)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closed_classes() {
        assert_eq!(closed_class("i"), Some(PartOfSpeech::Pronoun));
        assert_eq!(closed_class("her"), Some(PartOfSpeech::Pronoun));
        assert_eq!(closed_class("the"), Some(PartOfSpeech::Determiner));
        assert_eq!(closed_class("is"), Some(PartOfSpeech::Auxiliary));
        assert_eq!(closed_class("seems"), Some(PartOfSpeech::Verb));
        assert_eq!(closed_class("not"), Some(PartOfSpeech::Particle));
        assert_eq!(closed_class("and"), Some(PartOfSpeech::CoordinatingConjunction));
        assert_eq!(closed_class("of"), Some(PartOfSpeech::Adposition));
        assert_eq!(closed_class("consistently"), Some(PartOfSpeech::Adverb));
        assert_eq!(closed_class("scholarly"), None);
        assert_eq!(closed_class("research"), None);
    }

    #[test]
    fn test_never_is_negation() {
        assert_eq!(closed_class("never"), Some(PartOfSpeech::Particle));
        assert!(is_be_form("wasn't"));
    }
}
