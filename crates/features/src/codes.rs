use rphonetic::{Encoder, Metaphone, Soundex};
use serde::{Deserialize, Serialize};

use crate::normalize::to_phonetic;

/// Phonetic encoding results for a mark.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneticCodes {
    pub soundex: Option<String>,
    pub metaphone: Option<String>,
}

/// Compute Soundex and Metaphone codes for a mark text.
///
/// The text is reduced to its ASCII phonetic form first, so umlauts and
/// sound-alike spellings are already folded before encoding.
pub fn compute_phonetics(text: &str) -> PhoneticCodes {
    let prepared: String = to_phonetic(text)
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .collect::<String>()
        .to_ascii_uppercase();

    if prepared.is_empty() {
        return PhoneticCodes::default();
    }

    let soundex_code = Soundex::default().encode(&prepared);
    let metaphone_code = Metaphone::default().encode(&prepared);

    PhoneticCodes {
        soundex: if soundex_code.is_empty() { None } else { Some(soundex_code) },
        metaphone: if metaphone_code.is_empty() { None } else { Some(metaphone_code) },
    }
}

/// Find a phonetic code shared by both texts, as `(algorithm, code)`.
pub fn phonetic_code_match(text1: &str, text2: &str) -> Option<(String, String)> {
    let codes1 = compute_phonetics(text1);
    let codes2 = compute_phonetics(text2);

    if let (Some(m1), Some(m2)) = (&codes1.metaphone, &codes2.metaphone) {
        if m1 == m2 {
            return Some(("metaphone".to_string(), m1.clone()));
        }
    }

    if let (Some(s1), Some(s2)) = (&codes1.soundex, &codes2.soundex) {
        if s1 == s2 {
            return Some(("soundex".to_string(), s1.clone()));
        }
    }

    None
}
