/// Legal forms, titles and holding words that carry no brand identity.
const LEGAL_FORMS: &[&str] = &[
    "dr",
    "prof",
    "ing",
    "gmbh",
    "ag",
    "ltd",
    "inc",
    "corp",
    "llc",
    "co",
    "kg",
    "ohg",
    "ug",
    "se",
    "sa",
    "srl",
    "bv",
    "nv",
    "partner",
    "partners",
    "group",
    "holding",
    "international",
];

/// Minimum length of a word that counts as distinctive.
const MIN_CORE_WORD_LEN: usize = 3;

/// Check whether a lower-cased token is a legal form or title.
pub fn is_legal_form(token: &str) -> bool {
    LEGAL_FORMS.contains(&token)
}

/// Extract the distinctive words of a brand name.
///
/// Words are lower-cased and stripped of punctuation; legal forms
/// (`GmbH`, `AG`, `Ltd`, ...) are removed as whole words. When at least one
/// word of three or more characters remains, shorter words are dropped as
/// well. Input order is preserved.
pub fn extract_core_words(text: &str) -> Vec<String> {
    let words: Vec<String> = text
        .to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '&')
        .map(|token| token.chars().filter(|c| c.is_alphanumeric()).collect::<String>())
        .filter(|word| !word.is_empty() && !is_legal_form(word))
        .collect();

    if words.iter().any(|w| w.chars().count() >= MIN_CORE_WORD_LEN) {
        words
            .into_iter()
            .filter(|w| w.chars().count() >= MIN_CORE_WORD_LEN)
            .collect()
    } else {
        words
    }
}

/// The leading core word, or an empty string.
pub fn extract_core_word(text: &str) -> String {
    extract_core_words(text).into_iter().next().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_single_word() {
        assert_eq!(extract_core_words("Accelari"), vec!["accelari"]);
    }

    #[test]
    fn test_removes_legal_suffixes() {
        assert_eq!(extract_core_words("Accelari GmbH"), vec!["accelari"]);
        assert_eq!(extract_core_words("Test AG"), vec!["test"]);
        assert_eq!(extract_core_words("Widget Ltd."), vec!["widget"]);
        assert_eq!(extract_core_words("Dr. Oetker KG"), vec!["oetker"]);
    }

    #[test]
    fn test_multiple_words_keep_order() {
        assert_eq!(
            extract_core_words("Blue Sky Innovations"),
            vec!["blue", "sky", "innovations"]
        );
    }

    #[test]
    fn test_drops_short_words_when_longer_exist() {
        assert_eq!(extract_core_words("IT Solutions"), vec!["solutions"]);
    }

    #[test]
    fn test_keeps_short_words_when_nothing_longer() {
        assert_eq!(extract_core_words("HP"), vec!["hp"]);
        assert_eq!(extract_core_words("XY AG"), vec!["xy"]);
    }

    #[test]
    fn test_ampersand_and_punctuation() {
        assert_eq!(extract_core_words("Müller & Söhne GmbH & Co. KG"), vec!["müller", "söhne"]);
        assert_eq!(extract_core_words("test-brand"), vec!["testbrand"]);
    }

    #[test]
    fn test_legal_form_not_stripped_inside_words() {
        assert_eq!(extract_core_words("Agrar Group"), vec!["agrar"]);
        assert_eq!(extract_core_words("Cobalt"), vec!["cobalt"]);
    }

    #[test]
    fn test_empty_and_only_legal_forms() {
        assert!(extract_core_words("").is_empty());
        assert!(extract_core_words("   ").is_empty());
        assert!(extract_core_words("GmbH & Co. KG").is_empty());
    }

    #[test]
    fn test_first_core_word() {
        assert_eq!(extract_core_word("Tesla Motors"), "tesla");
        assert_eq!(extract_core_word("GmbH"), "");
    }
}
