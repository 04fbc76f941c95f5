use markencheck_model::{MatchReason, MatchedWords, SimilarityResult};

use crate::core_words::extract_core_words;
use crate::distance::levenshtein_similarity;
use crate::normalize::{
    collapse_whitespace, phonetic_similarity, to_confusable, to_visual, visual_similarity,
};

/// Combined score at or above which two names are treated as conflicting.
pub const DEFAULT_CONFLICT_THRESHOLD: u8 = 80;

// Weights in tenths; phonetic and visual add up to 10.
const PHONETIC_WEIGHT: u32 = 6;
const VISUAL_WEIGHT: u32 = 4;

const STRONG_SIGNAL: u8 = 80;
const MODERATE_COMBINED: u8 = 60;

/// Phonetic and best visual similarity for one pair of strings.
#[derive(Debug, Clone, Copy)]
struct Signals {
    phonetic: u8,
    visual: u8,
}

impl Signals {
    fn between(a: &str, b: &str) -> Self {
        let plain = visual_similarity(a, b);
        let confusable = levenshtein_similarity(&to_confusable(a), &to_confusable(b));
        Self {
            phonetic: phonetic_similarity(a, b),
            visual: plain.max(confusable),
        }
    }

    /// Weighted score in tenths of a percent (0..=1000).
    fn weight(&self) -> u32 {
        self.phonetic as u32 * PHONETIC_WEIGHT + self.visual as u32 * VISUAL_WEIGHT
    }
}

struct WordPair<'a> {
    query: &'a str,
    trademark: &'a str,
    signals: Signals,
}

/// The most similar pair of core words. Ties keep the earliest pair.
fn best_word_pair<'a>(query_words: &'a [String], trademark_words: &'a [String]) -> Option<WordPair<'a>> {
    let mut best: Option<WordPair<'a>> = None;

    for q in query_words {
        for t in trademark_words {
            let signals = Signals::between(q, t);
            if best.as_ref().map_or(true, |b| signals.weight() > b.signals.weight()) {
                best = Some(WordPair {
                    query: q,
                    trademark: t,
                    signals,
                });
            }
        }
    }

    best
}

fn round_tenths(weighted: u32) -> u8 {
    ((weighted + 5) / 10).min(100) as u8
}

/// Compare a query name against a registered mark.
///
/// `phonetic` and `visual` are the whole-name similarities. `combined`
/// is the better of the weighted whole-name score and the best weighted
/// core-word pair, so a shared distinctive word dominates regardless of
/// word order or legal-form suffixes. Identical names (ignoring case and
/// spacing) score 100; a name with no letters or digits scores 0 against
/// anything else. The result is symmetric in its arguments apart from
/// the orientation of `matched_words`.
pub fn calculate_similarity(query: &str, trademark: &str) -> SimilarityResult {
    let query_words = extract_core_words(query);
    let trademark_words = extract_core_words(trademark);

    if collapse_whitespace(query) == collapse_whitespace(trademark) {
        return SimilarityResult {
            phonetic: 100,
            visual: 100,
            combined: 100,
            core_word_match: !query_words.is_empty(),
            matched_words: MatchedWords {
                query: query.trim().to_string(),
                trademark: trademark.trim().to_string(),
            },
            reason: MatchReason::Identical,
        };
    }

    if to_visual(query).is_empty() || to_visual(trademark).is_empty() {
        return SimilarityResult {
            phonetic: 0,
            visual: 0,
            combined: 0,
            core_word_match: false,
            matched_words: MatchedWords {
                query: query.trim().to_string(),
                trademark: trademark.trim().to_string(),
            },
            reason: MatchReason::NoComparableWords,
        };
    }

    let phonetic = phonetic_similarity(query, trademark);
    let visual = visual_similarity(query, trademark);

    let mut best = Signals::between(query, trademark);
    let mut matched_words = MatchedWords {
        query: collapse_whitespace(query),
        trademark: collapse_whitespace(trademark),
    };

    if let Some(pair) = best_word_pair(&query_words, &trademark_words) {
        if pair.signals.weight() > best.weight() {
            best = pair.signals;
            matched_words = MatchedWords {
                query: pair.query.to_string(),
                trademark: pair.trademark.to_string(),
            };
        }
    }

    let mut combined = round_tenths(best.weight());

    let shared = query_words.iter().find(|w| trademark_words.contains(w));
    if let Some(word) = shared {
        combined = combined.max(phonetic).max(visual);
        matched_words = MatchedWords {
            query: word.clone(),
            trademark: word.clone(),
        };
    }
    let core_word_match = shared.is_some();

    let reason = if core_word_match {
        MatchReason::CoreWordMatch
    } else if best.phonetic >= STRONG_SIGNAL {
        MatchReason::PhoneticallySimilar
    } else if best.visual >= STRONG_SIGNAL {
        MatchReason::VisuallySimilar
    } else if combined >= MODERATE_COMBINED {
        MatchReason::ModerateOverall
    } else {
        MatchReason::Dissimilar
    };

    SimilarityResult {
        phonetic,
        visual,
        combined,
        core_word_match,
        matched_words,
        reason,
    }
}

/// Whether a mark is likely to collide with the query.
///
/// True when the combined score reaches `threshold` (default
/// [`DEFAULT_CONFLICT_THRESHOLD`]) or the names share a core word. A
/// shared core word is flagged regardless of the threshold.
pub fn is_likely_conflict(query: &str, trademark: &str, threshold: Option<u8>) -> bool {
    let threshold = threshold.unwrap_or(DEFAULT_CONFLICT_THRESHOLD);
    let similarity = calculate_similarity(query, trademark);
    similarity.combined >= threshold || similarity.core_word_match
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_identical_marks() {
        let result = calculate_similarity("Accelari", "Accelari");
        assert_eq!(result.combined, 100);
        assert!(result.core_word_match);
        assert_eq!(result.reason, MatchReason::Identical);
    }

    #[test]
    fn test_identical_ignores_case_and_spacing() {
        let result = calculate_similarity("Blue  Sky", " blue sky ");
        assert_eq!(result.combined, 100);
        assert_eq!(result.phonetic, 100);
        assert_eq!(result.visual, 100);
    }

    #[test]
    fn test_similar_marks() {
        let result = calculate_similarity("Accelari", "Acelari");
        assert!(result.combined > 70, "combined = {}", result.combined);
        assert!(!result.core_word_match);
    }

    #[test]
    fn test_different_marks() {
        let result = calculate_similarity("Apple", "Microsoft");
        assert!(result.combined < 50, "combined = {}", result.combined);
        assert!(!result.core_word_match);
        assert_eq!(result.reason, MatchReason::Dissimilar);
    }

    #[test]
    fn test_word_order_independent() {
        let result = calculate_similarity("Blue Sky", "Sky Blue");
        assert!(result.combined > 80, "combined = {}", result.combined);
        assert!(result.core_word_match);
        assert_eq!(result.reason, MatchReason::CoreWordMatch);
    }

    #[test]
    fn test_core_word_dominates_whole_name_scores() {
        let result = calculate_similarity("Tesla Motors", "Tesla");
        assert!(result.core_word_match);
        assert!(result.combined >= result.phonetic.max(result.visual));
        assert_eq!(result.matched_words.query, "tesla");
        assert_eq!(result.matched_words.trademark, "tesla");
    }

    #[test]
    fn test_legal_form_does_not_block_match() {
        let result = calculate_similarity("Accelari GmbH", "Accelari AG");
        assert!(result.core_word_match);
        assert_eq!(result.combined, 100);
    }

    #[test]
    fn test_empty_input() {
        let result = calculate_similarity("", "Test");
        assert_eq!(result.combined, 0);
        assert!(!result.core_word_match);
        assert_eq!(result.reason, MatchReason::NoComparableWords);

        let result = calculate_similarity("Test", "   ");
        assert_eq!(result.combined, 0);
    }

    #[test]
    fn test_both_empty_are_identical() {
        assert_eq!(calculate_similarity("", "").combined, 100);
    }

    #[test]
    fn test_punctuation_only_scores_zero() {
        assert_eq!(calculate_similarity("---", "!!!").combined, 0);
    }

    #[test]
    fn test_symmetric() {
        let pairs = [
            ("Accelari", "Acelari"),
            ("Blue Sky", "Sky Blue"),
            ("Apple", "Microsoft"),
            ("Tesla Motors", "Tesla"),
            ("Müller Bau", "Mueller Haus"),
            ("C0RN Flakes", "Com Flakes"),
            ("", "Test"),
        ];
        for (a, b) in pairs {
            let ab = calculate_similarity(a, b);
            let ba = calculate_similarity(b, a);
            assert_eq!(ab.combined, ba.combined, "{a} / {b}");
            assert_eq!(ab.phonetic, ba.phonetic, "{a} / {b}");
            assert_eq!(ab.visual, ba.visual, "{a} / {b}");
            assert_eq!(ab.core_word_match, ba.core_word_match, "{a} / {b}");
        }
    }

    #[test]
    fn test_phonetic_reason() {
        let result = calculate_similarity("Fone", "Phone");
        assert_eq!(result.phonetic, 100);
        assert_eq!(result.reason, MatchReason::PhoneticallySimilar);
    }

    #[test]
    fn test_conflict_for_high_similarity() {
        assert!(is_likely_conflict("Accelari", "Acelari", None));
    }

    #[test]
    fn test_conflict_for_core_word_match() {
        assert!(is_likely_conflict("Tesla Motors", "Tesla", None));
        assert!(is_likely_conflict("Tesla Motors", "Tesla", Some(100)));
    }

    #[test]
    fn test_no_conflict_for_low_similarity() {
        assert!(!is_likely_conflict("Apple", "Microsoft", None));
    }

    #[test]
    fn test_custom_threshold() {
        assert!(!is_likely_conflict("Test", "Tester", Some(90)));
        assert!(is_likely_conflict("Test", "Tester", Some(50)));
    }
}
