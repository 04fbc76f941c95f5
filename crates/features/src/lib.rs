//! Name similarity engine for trademark conflict analysis.
//!
//! Provides pure functions for comparing brand names:
//! - Edit distance and edit similarity
//! - Phonetic and visual normalization
//! - Core word extraction (legal forms removed)
//! - Combined similarity and conflict decision
//!
//! Everything here is total over string input and free of I/O, so it can
//! be called from any number of threads without coordination.

mod codes;
mod core_words;
mod distance;
mod normalize;
mod similarity;

pub use codes::{compute_phonetics, phonetic_code_match, PhoneticCodes};
pub use core_words::{extract_core_word, extract_core_words, is_legal_form};
pub use distance::{levenshtein_distance, levenshtein_similarity};
pub use normalize::{
    collapse_whitespace, phonetic_similarity, to_confusable, to_phonetic, to_visual,
    visual_similarity,
};
pub use similarity::{calculate_similarity, is_likely_conflict, DEFAULT_CONFLICT_THRESHOLD};

/// Check Nice class overlap.
pub fn class_overlap(classes1: &[u16], classes2: &[u16]) -> Vec<u16> {
    classes1
        .iter()
        .filter(|c| classes2.contains(c))
        .copied()
        .collect()
}
