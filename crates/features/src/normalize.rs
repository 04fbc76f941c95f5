use crate::distance::levenshtein_similarity;

/// A sound-alike rewrite applied to the phonetic form.
enum Rule {
    /// Replace every occurrence
    Anywhere(&'static str, &'static str),
    /// Replace only at the end of the name
    Final(&'static str, &'static str),
}

use Rule::{Anywhere, Final};

/// Ordered German/English sound-alike rewrites. Order matters: `sc` runs
/// before `ch` so that `sch` ends up as `sh`, and `ß` expands to `ss`
/// before doubled consonants collapse.
const PHONETIC_RULES: &[Rule] = &[
    Anywhere("ph", "f"),
    Anywhere("ck", "k"),
    Anywhere("cc", "k"),
    Anywhere("ce", "se"),
    Anywhere("ci", "si"),
    Anywhere("cy", "sy"),
    Anywhere("sc", "s"),
    Anywhere("ch", "k"),
    Anywhere("qu", "kw"),
    Anywhere("x", "ks"),
    Anywhere("z", "s"),
    Anywhere("th", "t"),
    Anywhere("wh", "w"),
    Anywhere("wr", "r"),
    Anywhere("kn", "n"),
    Anywhere("gn", "n"),
    Anywhere("gh", ""),
    Final("mb", "m"),
    Final("ng", "n"),
    Anywhere("ie", "i"),
    Anywhere("ei", "ai"),
    Anywhere("ey", "i"),
    Anywhere("ay", "ai"),
    Anywhere("ea", "i"),
    Anywhere("ee", "i"),
    Anywhere("oo", "u"),
    Anywhere("ou", "u"),
    Anywhere("ow", "o"),
    Anywhere("ue", "u"),
    Anywhere("oe", "o"),
    Anywhere("ae", "a"),
    Anywhere("ä", "a"),
    Anywhere("ö", "o"),
    Anywhere("ü", "u"),
    Anywhere("ß", "ss"),
    Anywhere("ll", "l"),
    Anywhere("rr", "r"),
    Anywhere("tt", "t"),
    Anywhere("ss", "s"),
    Anywhere("ff", "f"),
    Anywhere("pp", "p"),
    Anywhere("bb", "b"),
    Anywhere("dd", "d"),
    Anywhere("gg", "g"),
    Anywhere("mm", "m"),
    Anywhere("nn", "n"),
    Anywhere("é", "e"),
    Anywhere("è", "e"),
    Anywhere("ê", "e"),
    Anywhere("ë", "e"),
    Anywhere("á", "a"),
    Anywhere("à", "a"),
    Anywhere("â", "a"),
    Anywhere("í", "i"),
    Anywhere("ì", "i"),
    Anywhere("î", "i"),
    Anywhere("ó", "o"),
    Anywhere("ò", "o"),
    Anywhere("ô", "o"),
    Anywhere("ú", "u"),
    Anywhere("ù", "u"),
    Anywhere("û", "u"),
    Anywhere("ñ", "n"),
    Anywhere("ç", "s"),
];

/// Characters that are easy to misread for one another in a logo or
/// handwriting, mapped onto a shared representative.
const CONFUSABLE_CHARS: &[(char, char)] = &[('0', 'o'), ('1', 'l'), ('i', 'l'), ('5', 's'), ('8', 'b')];

const CONFUSABLE_PAIRS: &[(&str, &str)] = &[("rn", "m"), ("cl", "d"), ("vv", "w")];

/// Phonetic form of a name: lower-cased, letters and digits only, with
/// sound-alike spellings collapsed.
pub fn to_phonetic(text: &str) -> String {
    let mut result = to_visual(text);

    for rule in PHONETIC_RULES {
        match *rule {
            Anywhere(from, to) => {
                if result.contains(from) {
                    result = result.replace(from, to);
                }
            }
            Final(from, to) => {
                if result.ends_with(from) {
                    result.truncate(result.len() - from.len());
                    result.push_str(to);
                }
            }
        }
    }

    result
}

/// Visual form of a name: lower-cased, letters and digits only.
pub fn to_visual(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect()
}

/// Visual form with look-alike glyphs folded together (`0`/`o`, `rn`/`m`, ...).
pub fn to_confusable(text: &str) -> String {
    let folded: String = to_visual(text)
        .chars()
        .map(|c| {
            CONFUSABLE_CHARS
                .iter()
                .find(|&&(from, _)| from == c)
                .map_or(c, |&(_, to)| to)
        })
        .collect();

    CONFUSABLE_PAIRS
        .iter()
        .fold(folded, |acc, &(from, to)| acc.replace(from, to))
}

/// Lower-case and collapse runs of whitespace to a single space.
pub fn collapse_whitespace(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Edit similarity of the phonetic forms.
pub fn phonetic_similarity(a: &str, b: &str) -> u8 {
    levenshtein_similarity(&to_phonetic(a), &to_phonetic(b))
}

/// Edit similarity of the visual forms; ignores case and punctuation.
pub fn visual_similarity(a: &str, b: &str) -> u8 {
    levenshtein_similarity(&to_visual(a), &to_visual(b))
}
