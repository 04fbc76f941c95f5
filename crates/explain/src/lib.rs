//! Explanation generation for trademark conflict checks.
//!
//! Converts similarity results, risk flags and whole assessments into
//! human-readable text for the CLI and for reports.

use markencheck_model::{AssessedCandidate, MatchReason, RiskAssessment, RiskFlag, RiskLevel, SimilarityResult};
use serde::{Deserialize, Serialize};

/// Similarity from which the top match is named in a summary.
const NOTABLE_SIMILARITY: u8 = 70;

/// A structured explanation for a trademark risk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explanation {
    /// Short summary (1 line)
    pub summary: String,

    /// Detailed explanation (2-3 sentences)
    pub detail: String,

    /// Severity level (0.0 - 1.0)
    pub severity: f32,

    /// Evidence items supporting this explanation
    pub evidence: Vec<EvidenceItem>,
}

/// A piece of evidence supporting a risk flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvidenceItem {
    /// Type of evidence
    pub kind: String,

    /// The specific value or match
    pub value: String,

    /// Optional context
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl EvidenceItem {
    fn new(kind: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            value: value.into(),
            context: None,
        }
    }

    fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

/// One-line reading of a similarity result.
pub fn explain_similarity(result: &SimilarityResult) -> String {
    let words = &result.matched_words;
    match result.reason {
        MatchReason::Identical => "Identical marks".to_string(),
        MatchReason::CoreWordMatch => format!("Shared core word '{}'", words.query),
        MatchReason::PhoneticallySimilar => {
            format!("'{}' and '{}' sound alike", words.query, words.trademark)
        }
        MatchReason::VisuallySimilar => {
            format!("'{}' and '{}' look alike", words.query, words.trademark)
        }
        MatchReason::ModerateOverall => format!("Moderately similar overall ({}%)", result.combined),
        MatchReason::Dissimilar => format!("Not similar ({}%)", result.combined),
        MatchReason::NoComparableWords => "No comparable words".to_string(),
    }
}

/// Generate explanations for an assessed candidate.
pub fn explain_candidate(assessed: &AssessedCandidate, query_text: &str) -> Vec<Explanation> {
    assessed
        .flags
        .iter()
        .map(|flag| explain_flag(flag, query_text, &assessed.candidate.name))
        .collect()
}

/// Generate explanation for a single risk flag.
pub fn explain_flag(flag: &RiskFlag, query_text: &str, mark_text: &str) -> Explanation {
    let severity = flag.severity();

    match flag {
        RiskFlag::ExactMatch => Explanation {
            summary: "Exact match found".to_string(),
            detail: format!(
                "The mark '{}' is identical to '{}' apart from case and spacing. \
                 This is the strongest possible conflict.",
                mark_text, query_text
            ),
            severity,
            evidence: vec![EvidenceItem::new("exact_match", mark_text)],
        },

        RiskFlag::CoreWordMatch { term } => Explanation {
            summary: format!("Core word '{}' matches", term),
            detail: format!(
                "The distinctive word '{}' appears in both '{}' and '{}'. \
                 Examiners weigh the distinctive element of a mark most heavily.",
                term, query_text, mark_text
            ),
            severity,
            evidence: vec![EvidenceItem::new("core_word", term.as_str())],
        },

        RiskFlag::PhoneticMatch { algorithm, code } => Explanation {
            summary: "Sounds similar".to_string(),
            detail: format!(
                "The mark '{}' sounds phonetically similar to '{}'. \
                 Consumers may confuse the two when spoken aloud.",
                mark_text, query_text
            ),
            severity,
            evidence: vec![EvidenceItem::new(format!("phonetic_{}", algorithm), code.as_str())
                .with_context(format!("Both encode to: {}", code))],
        },

        RiskFlag::FuzzyMatch { distance } => Explanation {
            summary: "Spelled similarly".to_string(),
            detail: format!(
                "The mark '{}' differs from '{}' by only {} character(s). \
                 This minor spelling difference may not prevent consumer confusion.",
                mark_text, query_text, distance
            ),
            severity,
            evidence: vec![EvidenceItem::new("edit_distance", distance.to_string())],
        },

        RiskFlag::ClassOverlap { classes } => Explanation {
            summary: format!(
                "Same class ({})",
                classes.iter().map(|c| c.to_string()).collect::<Vec<_>>().join(", ")
            ),
            detail: format!(
                "Both marks are registered in the same Nice classification(s): {}. \
                 This increases the likelihood of confusion in the marketplace.",
                classes.iter().map(|c| format!("Class {}", c)).collect::<Vec<_>>().join(", ")
            ),
            severity,
            evidence: classes
                .iter()
                .map(|c| EvidenceItem::new("nice_class", c.to_string()))
                .collect(),
        },

        RiskFlag::VendorAccuracyMismatch { vendor, ours } => Explanation {
            summary: "Vendor score disputed".to_string(),
            detail: format!(
                "The search provider rated '{}' at {}%, the local comparison at {}%. \
                 The local score is used for the risk assessment.",
                mark_text, vendor, ours
            ),
            severity,
            evidence: vec![
                EvidenceItem::new("vendor_accuracy", vendor.to_string()),
                EvidenceItem::new("local_similarity", ours.to_string()),
            ],
        },
    }
}

/// One-line verdict for an assessed candidate.
pub fn summarize_candidate(assessed: &AssessedCandidate) -> String {
    let level = match assessed.band.risk_level() {
        RiskLevel::High => "HIGH RISK",
        RiskLevel::Medium => "MODERATE RISK",
        RiskLevel::Low => "LOW RISK",
    };

    if assessed.flags.is_empty() {
        return format!("{}: {}", level, explain_similarity(&assessed.similarity));
    }

    let flag_labels: Vec<_> = assessed.flags.iter().map(|f| f.label()).collect();
    format!("{}: {}", level, flag_labels.join(", "))
}

/// Summary of a whole check, suitable as the headline of a report.
pub fn summarize_assessment(assessment: &RiskAssessment) -> String {
    if assessment.counts.is_empty() {
        return format!(
            "No similar marks found for '{}'. The collision risk is low.",
            assessment.query
        );
    }

    let found = assessment.counts.total();
    let mut summary = format!(
        "{} similar mark{} found for '{}'. Risk: {} ({}/100).",
        found,
        if found == 1 { "" } else { "s" },
        assessment.query,
        assessment.risk_level.as_str(),
        assessment.risk_score
    );

    if let Some(top) = assessment.conflicts.first() {
        if top.similarity.combined >= NOTABLE_SIMILARITY {
            summary.push_str(&format!(
                " Closest match: '{}' ({}%).",
                top.candidate.name, top.similarity.combined
            ));
        }
    }

    if assessment.risk_level == RiskLevel::High {
        summary.push_str(" Legal review is recommended before filing.");
    }

    summary
}
