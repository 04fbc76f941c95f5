/// Compute Levenshtein edit distance between two strings, ignoring case.
///
/// Counts single-character insertions, deletions and substitutions over
/// Unicode scalar values.
pub fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let s1: Vec<char> = s1.to_lowercase().chars().collect();
    let s2: Vec<char> = s2.to_lowercase().chars().collect();

    if s1.is_empty() {
        return s2.len();
    }
    if s2.is_empty() {
        return s1.len();
    }

    let mut prev: Vec<usize> = (0..=s2.len()).collect();
    let mut curr = vec![0; s2.len() + 1];

    for (i, c1) in s1.iter().enumerate() {
        curr[0] = i + 1;
        for (j, c2) in s2.iter().enumerate() {
            let cost = if c1 == c2 { 0 } else { 1 };
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[s2.len()]
}

/// Edit similarity as an integer percentage.
///
/// 100 for two empty strings or a case-insensitive exact match, otherwise
/// `round(100 * (1 - distance / longest))`.
pub fn levenshtein_similarity(s1: &str, s2: &str) -> u8 {
    let len1 = s1.to_lowercase().chars().count();
    let len2 = s2.to_lowercase().chars().count();
    let max_len = len1.max(len2);
    if max_len == 0 {
        return 100;
    }

    let distance = levenshtein_distance(s1, s2);
    if distance == 0 {
        return 100;
    }
    let ratio = 1.0 - distance as f64 / max_len as f64;
    // Very long names must not round a real difference up to 100.
    (ratio * 100.0).round().clamp(0.0, 99.0) as u8
}
