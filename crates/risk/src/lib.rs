//! Risk scoring for trademark conflict checks.
//!
//! Takes the candidate marks returned by a registry search, recomputes
//! their similarity to the query locally (vendor accuracy is not trusted),
//! buckets the relevant ones by severity and turns the bucket population
//! into a single 0-100 risk score and level.

use std::cmp::Ordering;

use markencheck_features::{
    calculate_similarity, class_overlap, collapse_whitespace, levenshtein_distance,
    phonetic_code_match, to_visual,
};
use markencheck_model::{
    AssessedCandidate, BucketCounts, CandidateMark, ConflictBand, RiskAssessment, RiskFlag,
    RiskLevel, SearchQuery, SimilarityResult,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Gap between vendor accuracy and local score reported as a dispute.
const VENDOR_DISAGREEMENT: u8 = 40;

/// Thresholds of the risk policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    /// Minimum combined similarity for a candidate to count at all
    pub relevance_floor: u8,
    /// Combined similarity from which a conflict is critical
    pub critical_threshold: u8,
    /// Combined similarity from which a conflict is medium
    pub medium_threshold: u8,
    /// Vendor accuracy at or above which a low local score is a false positive
    pub false_positive_accuracy: u8,
    /// Local combined score below which a high vendor accuracy is disputed
    pub false_positive_ceiling: u8,
    /// Maximum candidates scored per assessment
    pub max_candidates: usize,
    /// Maximum conflicts kept in the assessment
    pub max_conflicts: usize,
    /// Maximum edit distance reported as a spelling flag
    pub fuzzy_max_distance: usize,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            relevance_floor: 50,
            critical_threshold: 80,
            medium_threshold: 60,
            false_positive_accuracy: 85,
            false_positive_ceiling: 30,
            max_candidates: 200,
            max_conflicts: 20,
            fuzzy_max_distance: 3,
        }
    }
}

/// Severity band for a combined similarity; `None` below the relevance floor.
pub fn band_for(combined: u8, config: &RiskConfig) -> Option<ConflictBand> {
    if combined >= config.critical_threshold {
        Some(ConflictBand::Critical)
    } else if combined >= config.medium_threshold {
        Some(ConflictBand::Medium)
    } else if combined >= config.relevance_floor {
        Some(ConflictBand::Low)
    } else {
        None
    }
}

/// Overall risk score (0-100) from the bucket population.
///
/// Any critical conflict puts the score at 70 or above; otherwise medium
/// conflicts place it in 40-79 and low ones in 15-49. No conflicts means
/// no risk. The score never drops when a conflict is added or moves to a
/// more severe band.
pub fn risk_score(counts: &BucketCounts) -> u8 {
    let BucketCounts { critical, medium, low } = *counts;

    let score = if critical > 0 {
        (70 + 10 * (critical - 1) + 3 * medium + low).min(100)
    } else if medium > 0 {
        (40 + 10 * (medium - 1) + 2 * low).min(79)
    } else if low > 0 {
        (15 + 7 * (low - 1)).min(49)
    } else {
        0
    };

    score as u8
}

/// Assess a candidate set against the query.
pub fn assess(query: &SearchQuery, candidates: Vec<CandidateMark>, config: &RiskConfig) -> RiskAssessment {
    let total_available = candidates.len();
    if total_available > config.max_candidates {
        debug!(
            total = total_available,
            max = config.max_candidates,
            "Capping candidate list before scoring"
        );
    }

    let mut vendor_false_positives = 0;
    let mut conflicts: Vec<AssessedCandidate> = Vec::new();
    let mut considered = 0;

    for candidate in candidates.into_iter().take(config.max_candidates) {
        considered += 1;
        let similarity = calculate_similarity(&query.mark_text, &candidate.name);

        if is_vendor_false_positive(&candidate, &similarity, config) {
            vendor_false_positives += 1;
            debug!(
                name = %candidate.name,
                vendor = candidate.accuracy,
                ours = similarity.combined,
                "Dropping high-accuracy vendor false positive"
            );
            continue;
        }

        // A shared core word scores 100 through its exact word pair, so it
        // always lands in a band.
        let Some(band) = band_for(similarity.combined, config) else {
            continue;
        };

        let flags = compute_flags(query, &candidate, &similarity, config);
        conflicts.push(AssessedCandidate {
            candidate,
            similarity,
            band,
            flags,
        });
    }

    conflicts.sort_by(|a, b| {
        b.similarity
            .combined
            .cmp(&a.similarity.combined)
            .then_with(|| a.candidate.name.cmp(&b.candidate.name))
    });

    let mut counts = BucketCounts::default();
    for conflict in &conflicts {
        counts.record(conflict.band);
    }
    conflicts.truncate(config.max_conflicts);

    let risk_score = risk_score(&counts);
    let risk_level = RiskLevel::from_score(risk_score);

    debug!(
        query = %query.mark_text,
        considered,
        relevant = counts.total(),
        critical = counts.critical,
        medium = counts.medium,
        low = counts.low,
        risk_score,
        "Assessed candidates"
    );

    RiskAssessment {
        query: query.mark_text.clone(),
        total_candidates: considered,
        counts,
        risk_score,
        risk_level,
        conflicts,
        vendor_false_positives,
    }
}

fn is_vendor_false_positive(candidate: &CandidateMark, similarity: &SimilarityResult, config: &RiskConfig) -> bool {
    candidate.accuracy >= config.false_positive_accuracy
        && similarity.combined < config.false_positive_ceiling
        && !similarity.core_word_match
}

/// Compute the risk flags explaining a relevant candidate.
fn compute_flags(
    query: &SearchQuery,
    candidate: &CandidateMark,
    similarity: &SimilarityResult,
    config: &RiskConfig,
) -> Vec<RiskFlag> {
    let mut flags = Vec::new();

    if collapse_whitespace(&query.mark_text) == collapse_whitespace(&candidate.name) {
        flags.push(RiskFlag::ExactMatch);
    } else {
        if similarity.core_word_match {
            flags.push(RiskFlag::CoreWordMatch {
                term: similarity.matched_words.query.clone(),
            });
        }

        if let Some((algorithm, code)) = phonetic_code_match(
            &similarity.matched_words.query,
            &similarity.matched_words.trademark,
        ) {
            flags.push(RiskFlag::PhoneticMatch { algorithm, code });
        }

        let distance = levenshtein_distance(&to_visual(&query.mark_text), &to_visual(&candidate.name));
        if distance > 0 && distance <= config.fuzzy_max_distance {
            flags.push(RiskFlag::FuzzyMatch {
                distance: distance as u8,
            });
        }
    }

    let overlapping = class_overlap(&query.classes, &candidate.nice_classes);
    if !overlapping.is_empty() {
        flags.push(RiskFlag::ClassOverlap {
            classes: overlapping,
        });
    }

    let ours = similarity.combined;
    let vendor = candidate.accuracy;
    if vendor > 0 && vendor.abs_diff(ours) >= VENDOR_DISAGREEMENT {
        flags.push(RiskFlag::VendorAccuracyMismatch { vendor, ours });
    }

    flags.sort_by(|a, b| b.severity().partial_cmp(&a.severity()).unwrap_or(Ordering::Equal));
    flags
}
