use std::collections::HashSet;

use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_VARIANTS: usize = 8;

/// How a search variant relates to the original term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariantKind {
    Exact,
    Phonetic,
    Visual,
    Misspelling,
    Root,
}

/// A spelling to search the registers for in addition to the mark itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchVariant {
    pub term: String,
    pub kind: VariantKind,
    pub rationale: String,
}

const GERMAN_RULES: &[(&str, &str, &str)] = &[
    ("ä", "ae", "umlaut ä → ae"),
    ("ö", "oe", "umlaut ö → oe"),
    ("ü", "ue", "umlaut ü → ue"),
    ("ß", "ss", "ß → ss"),
    ("sch", "sh", "sch → sh"),
    ("ch", "k", "ch → k"),
    ("ei", "ai", "ei → ai"),
    ("eu", "oi", "eu → oi"),
    ("ph", "f", "ph → f"),
    ("qu", "kw", "qu → kw"),
    ("v", "f", "v → f"),
    ("z", "ts", "z → ts"),
];

const ENGLISH_RULES: &[(&str, &str, &str)] = &[
    ("ph", "f", "ph → f"),
    ("ck", "k", "ck → k"),
    ("gh", "", "silent gh"),
    ("ough", "o", "ough → o"),
    ("tion", "shun", "tion → shun"),
    ("th", "t", "th → t"),
    ("wh", "w", "wh → w"),
    ("wr", "r", "wr → r"),
    ("kn", "n", "kn → n"),
    ("ce", "se", "soft c before e"),
    ("ci", "si", "soft c before i"),
    ("x", "ks", "x → ks"),
];

const VISUAL_RULES: &[(&str, &str, &str)] = &[
    ("l", "i", "l looks like i"),
    ("i", "l", "i looks like l"),
    ("0", "o", "0 looks like o"),
    ("o", "0", "o looks like 0"),
    ("rn", "m", "rn looks like m"),
    ("cl", "d", "cl looks like d"),
    ("vv", "w", "vv looks like w"),
    ("1", "l", "1 looks like l"),
];

const ROOT_PREFIXES: &[&str] = &["e", "i", "my", "smart", "eco", "bio", "cyber", "digi", "pro", "neo", "meta"];

const ROOT_SUFFIXES: &[&str] = &["ify", "ly", "ware", "tech", "soft", "cloud", "ai", "io", "app", "hub"];

/// Variants of one kind, deduplicated case-insensitively against the
/// original term and each other.
struct VariantSet {
    seen: HashSet<String>,
    variants: Vec<SearchVariant>,
}

impl VariantSet {
    fn new(term: &str) -> Self {
        Self {
            seen: HashSet::from([term.to_lowercase()]),
            variants: Vec::new(),
        }
    }

    fn push(&mut self, term: String, kind: VariantKind, rationale: String) {
        if !term.is_empty() && self.seen.insert(term.to_lowercase()) {
            self.variants.push(SearchVariant { term, kind, rationale });
        }
    }

    fn apply_rules(&mut self, term: &str, rules: &[(&str, &str, &str)], kind: VariantKind, label: &str) {
        for &(from, to, why) in rules {
            if term.contains(from) {
                self.push(term.replace(from, to), kind, format!("{label}: {why}"));
            }
        }
    }

    fn into_vec(self) -> Vec<SearchVariant> {
        self.variants
    }
}

fn phonetic_variants(term: &str) -> Vec<SearchVariant> {
    let mut set = VariantSet::new(term);
    set.apply_rules(term, GERMAN_RULES, VariantKind::Phonetic, "German pronunciation");
    set.apply_rules(term, ENGLISH_RULES, VariantKind::Phonetic, "English pronunciation");
    set.into_vec()
}

fn visual_variants(term: &str) -> Vec<SearchVariant> {
    let mut set = VariantSet::new(term);
    set.apply_rules(term, VISUAL_RULES, VariantKind::Visual, "Visual similarity");

    let words: Vec<&str> = term.split_whitespace().collect();
    if words.len() > 1 {
        set.push(words.concat(), VariantKind::Visual, "Without spaces".to_string());
        set.push(words.join("-"), VariantKind::Visual, "Hyphenated".to_string());
    }

    set.into_vec()
}

fn misspelling_variants(term: &str) -> Vec<SearchVariant> {
    let mut set = VariantSet::new(term);
    let chars: Vec<char> = term.chars().collect();
    let n = chars.len();

    for i in 0..n {
        let mut doubled = chars.clone();
        doubled.insert(i, chars[i]);
        set.push(
            doubled.into_iter().collect(),
            VariantKind::Misspelling,
            format!("Letter \"{}\" doubled", chars[i]),
        );
    }

    if n > 3 {
        for i in 1..n - 1 {
            let mut omitted = chars.clone();
            omitted.remove(i);
            set.push(
                omitted.into_iter().collect(),
                VariantKind::Misspelling,
                format!("Letter \"{}\" omitted", chars[i]),
            );
        }
    }

    for i in 0..n.saturating_sub(1) {
        let mut swapped = chars.clone();
        swapped.swap(i, i + 1);
        set.push(
            swapped.into_iter().collect(),
            VariantKind::Misspelling,
            format!("Letters \"{}{}\" transposed", chars[i], chars[i + 1]),
        );
    }

    set.into_vec()
}

fn root_variants(term: &str) -> Vec<SearchVariant> {
    let mut set = VariantSet::new(term);
    let len = term.chars().count();

    for prefix in ROOT_PREFIXES {
        if let Some(root) = term.strip_prefix(prefix) {
            if len > prefix.len() + 2 {
                set.push(root.to_string(), VariantKind::Root, format!("Stem without prefix \"{prefix}\""));
            }
        }
    }

    for suffix in ROOT_SUFFIXES {
        if let Some(root) = term.strip_suffix(suffix) {
            if len > suffix.len() + 2 {
                set.push(root.to_string(), VariantKind::Root, format!("Stem without suffix \"{suffix}\""));
            }
        }
    }

    set.into_vec()
}

/// Deterministic search variants for a mark.
///
/// The exact spelling comes first, followed by up to three phonetic, two
/// visual, two misspelling and one stem variant, deduplicated
/// case-insensitively and truncated to `max_variants`.
pub fn generate_variants(mark_text: &str, max_variants: usize) -> Vec<SearchVariant> {
    let exact = mark_text.trim();
    if exact.is_empty() || max_variants == 0 {
        return Vec::new();
    }

    let term = exact.to_lowercase();
    let mut seen = HashSet::from([term.clone()]);
    let mut variants = vec![SearchVariant {
        term: exact.to_string(),
        kind: VariantKind::Exact,
        rationale: "Exact spelling".to_string(),
    }];

    let prioritized = phonetic_variants(&term)
        .into_iter()
        .take(3)
        .chain(visual_variants(&term).into_iter().take(2))
        .chain(misspelling_variants(&term).into_iter().take(2))
        .chain(root_variants(&term).into_iter().take(1));

    for variant in prioritized {
        if variants.len() >= max_variants {
            break;
        }
        if seen.insert(variant.term.to_lowercase()) {
            variants.push(variant);
        }
    }

    variants
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn terms(variants: &[SearchVariant]) -> Vec<&str> {
        variants.iter().map(|v| v.term.as_str()).collect()
    }

    #[test]
    fn test_exact_first() {
        let variants = generate_variants("  Müller ", DEFAULT_MAX_VARIANTS);
        assert_eq!(variants[0].term, "Müller");
        assert_eq!(variants[0].kind, VariantKind::Exact);
    }

    #[test]
    fn test_german_phonetic_variant() {
        let variants = generate_variants("Müller", DEFAULT_MAX_VARIANTS);
        assert!(terms(&variants).contains(&"mueller"));
    }

    #[test]
    fn test_visual_variants_for_multi_word() {
        let variants = visual_variants("blue sky");
        let terms = terms(&variants);
        assert!(terms.contains(&"bluesky"));
        assert!(terms.contains(&"blue-sky"));
    }

    #[test]
    fn test_misspellings() {
        let variants = misspelling_variants("nike");
        let terms = terms(&variants);
        assert!(terms.contains(&"nnike"));
        assert!(terms.contains(&"nke"));
        assert!(terms.contains(&"inke"));
        assert!(variants.iter().all(|v| v.kind == VariantKind::Misspelling));
    }

    #[test]
    fn test_root_variants() {
        let variants = root_variants("smartbrand");
        assert_eq!(terms(&variants), vec!["brand"]);
        assert!(root_variants("eco").is_empty());
    }

    #[test]
    fn test_respects_max_and_dedups() {
        let variants = generate_variants("Phoenix", 4);
        assert_eq!(variants.len(), 4);
        let mut lowered: Vec<String> = variants.iter().map(|v| v.term.to_lowercase()).collect();
        lowered.sort();
        lowered.dedup();
        assert_eq!(lowered.len(), 4);
    }

    #[test]
    fn test_empty_term() {
        assert!(generate_variants("   ", DEFAULT_MAX_VARIANTS).is_empty());
        assert!(generate_variants("Nike", 0).is_empty());
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(
            generate_variants("Schönbrunn", DEFAULT_MAX_VARIANTS),
            generate_variants("Schönbrunn", DEFAULT_MAX_VARIANTS)
        );
    }
}
