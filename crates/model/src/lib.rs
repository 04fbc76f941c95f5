//! Core domain model for markencheck trademark conflict analysis.
//!
//! This crate defines the fundamental types used throughout the system:
//! - `CandidateMark`: A registry search hit for a word mark
//! - `TrademarkStatus`: Active, Expired, Unknown status
//! - `SimilarityResult`: The multi-dimensional name similarity score
//! - `RiskFlag`, `ConflictBand`, `RiskLevel`: Conflict classification
//! - `RiskAssessment`: The risk verdict over a whole candidate set

use serde::{Deserialize, Serialize};

/// Status of a trademark registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrademarkStatus {
    /// Registered or pending and in force
    Active,
    /// Cancelled, expired, or abandoned
    Expired,
    /// Unknown status
    #[default]
    Unknown,
}

impl From<&str> for TrademarkStatus {
    fn from(s: &str) -> Self {
        match s.trim().to_uppercase().as_str() {
            "LIVE" | "ACTIVE" => Self::Active,
            "DEAD" | "EXPIRED" => Self::Expired,
            _ => Self::Unknown,
        }
    }
}

/// A candidate mark returned by a registry search.
///
/// The vendor `accuracy` is kept for reporting only. Similarity is always
/// recomputed locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateMark {
    /// Stable identifier (e.g. `tm-1234`)
    pub id: String,

    /// The mark text (word mark)
    #[serde(default)]
    pub name: String,

    /// Office code of the register (DE, EU, WO, ...)
    #[serde(default)]
    pub office: String,

    /// Nice classification codes
    #[serde(default)]
    pub nice_classes: Vec<u16>,

    /// Designated countries (international registrations)
    #[serde(default)]
    pub designation_countries: Vec<String>,

    /// Owner/registrant name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub holder: Option<String>,

    /// Current status
    #[serde(default)]
    pub status: TrademarkStatus,

    #[serde(default)]
    pub application_number: String,

    #[serde(default)]
    pub registration_number: String,

    /// Application date (ISO format)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_date: Option<String>,

    /// Registration date (ISO format)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_date: Option<String>,

    /// Vendor-reported match accuracy (0-100)
    #[serde(default)]
    pub accuracy: u8,
}

impl CandidateMark {
    /// Create a minimal candidate for testing.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            office: String::new(),
            nice_classes: Vec::new(),
            designation_countries: Vec::new(),
            holder: None,
            status: TrademarkStatus::Unknown,
            application_number: String::new(),
            registration_number: String::new(),
            application_date: None,
            registration_date: None,
            accuracy: 0,
        }
    }

    pub fn with_office(mut self, office: impl Into<String>) -> Self {
        self.office = office.into();
        self
    }

    pub fn with_classes(mut self, classes: Vec<u16>) -> Self {
        self.nice_classes = classes;
        self
    }

    pub fn with_accuracy(mut self, accuracy: u8) -> Self {
        self.accuracy = accuracy;
        self
    }

    pub fn with_status(mut self, status: TrademarkStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_designations(mut self, countries: Vec<String>) -> Self {
        self.designation_countries = countries;
        self
    }
}

/// Why two names were judged similar (or not).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchReason {
    /// Same text after case and whitespace folding
    Identical,
    /// Both names share a distinctive word
    CoreWordMatch,
    /// Names sound alike
    PhoneticallySimilar,
    /// Names look alike
    VisuallySimilar,
    /// Medium overall similarity
    ModerateOverall,
    /// Names differ clearly
    Dissimilar,
    /// One side has nothing to compare
    NoComparableWords,
}

/// The word pair that drove a similarity score.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchedWords {
    pub query: String,
    pub trademark: String,
}

/// Multi-dimensional similarity between two brand names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimilarityResult {
    /// Similarity after phonetic normalization (0-100)
    pub phonetic: u8,

    /// Similarity after stripping formatting characters (0-100)
    pub visual: u8,

    /// Aggregate of the phonetic, visual and core-word signals (0-100)
    pub combined: u8,

    /// Both names share at least one core word
    pub core_word_match: bool,

    pub matched_words: MatchedWords,

    pub reason: MatchReason,
}

/// Severity bucket for a relevant candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictBand {
    Low,
    Medium,
    Critical,
}

impl ConflictBand {
    /// Per-candidate risk level implied by the band.
    pub fn risk_level(self) -> RiskLevel {
        match self {
            Self::Critical => RiskLevel::High,
            Self::Medium => RiskLevel::Medium,
            Self::Low => RiskLevel::Low,
        }
    }
}

/// Overall collision risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    #[default]
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Map a 0-100 risk score onto a level.
    pub fn from_score(score: u8) -> Self {
        if score >= 70 {
            Self::High
        } else if score >= 40 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Types of trademark risk flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "detail")]
pub enum RiskFlag {
    /// Same text after normalization
    ExactMatch,

    /// A distinctive word appears in both marks
    CoreWordMatch {
        /// The shared core word
        term: String,
    },

    /// Phonetic codes agree (sounds like)
    PhoneticMatch {
        /// Algorithm used (soundex, metaphone)
        algorithm: String,
        /// The phonetic code that matched
        code: String,
    },

    /// Similar spelling (edit distance)
    FuzzyMatch {
        /// Edit distance
        distance: u8,
    },

    /// Same Nice classification
    ClassOverlap {
        /// Overlapping class numbers
        classes: Vec<u16>,
    },

    /// Vendor accuracy and local score disagree strongly
    VendorAccuracyMismatch {
        vendor: u8,
        ours: u8,
    },
}

impl RiskFlag {
    /// Get a human-readable label for this flag.
    pub fn label(&self) -> &'static str {
        match self {
            Self::ExactMatch => "Exact Match",
            Self::CoreWordMatch { .. } => "Core Word Match",
            Self::PhoneticMatch { .. } => "Sounds Similar",
            Self::FuzzyMatch { .. } => "Spelled Similarly",
            Self::ClassOverlap { .. } => "Same Class",
            Self::VendorAccuracyMismatch { .. } => "Vendor Score Disputed",
        }
    }

    /// Get severity weight (higher = more concerning).
    pub fn severity(&self) -> f32 {
        match self {
            Self::ExactMatch => 1.0,
            Self::CoreWordMatch { .. } => 0.85,
            Self::PhoneticMatch { .. } => 0.8,
            Self::ClassOverlap { .. } => 0.6,
            Self::FuzzyMatch { distance } => (0.5 - (*distance as f32 * 0.1)).max(0.1),
            Self::VendorAccuracyMismatch { .. } => 0.1,
        }
    }
}

/// A candidate that passed the relevance floor, with its local scoring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessedCandidate {
    pub candidate: CandidateMark,
    pub similarity: SimilarityResult,
    pub band: ConflictBand,
    #[serde(default)]
    pub flags: Vec<RiskFlag>,
}

/// Number of relevant candidates per band.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketCounts {
    pub critical: usize,
    pub medium: usize,
    pub low: usize,
}

impl BucketCounts {
    pub fn record(&mut self, band: ConflictBand) {
        match band {
            ConflictBand::Critical => self.critical += 1,
            ConflictBand::Medium => self.medium += 1,
            ConflictBand::Low => self.low += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.critical + self.medium + self.low
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Risk verdict for one query over a candidate set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// The query mark text
    pub query: String,

    /// Candidates considered (after input capping)
    pub total_candidates: usize,

    /// Band population over all relevant candidates
    pub counts: BucketCounts,

    /// 0 = no risk, 100 = maximum risk
    pub risk_score: u8,

    pub risk_level: RiskLevel,

    /// Relevant candidates, most similar first, cut to the report limit
    pub conflicts: Vec<AssessedCandidate>,

    /// High vendor accuracy that local scoring rejected
    #[serde(default)]
    pub vendor_false_positives: usize,
}

impl RiskAssessment {
    /// The `n` most similar conflicts.
    pub fn top_conflicts(&self, n: usize) -> &[AssessedCandidate] {
        &self.conflicts[..n.min(self.conflicts.len())]
    }
}

/// Query parameters for a trademark conflict check.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchQuery {
    /// The mark text to check
    pub mark_text: String,

    /// Optional Nice classes to filter by
    #[serde(default)]
    pub classes: Vec<u16>,

    /// Office codes to filter by (DE, EU, WO, ...)
    #[serde(default)]
    pub offices: Vec<String>,

    /// Filter by status
    #[serde(default)]
    pub status_filter: Option<TrademarkStatus>,

    /// Maximum conflicts to report
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    20
}

impl SearchQuery {
    pub fn new(mark_text: impl Into<String>) -> Self {
        Self {
            mark_text: mark_text.into(),
            limit: default_limit(),
            ..Default::default()
        }
    }

    pub fn with_classes(mut self, classes: Vec<u16>) -> Self {
        self.classes = classes;
        self
    }

    pub fn with_offices(mut self, offices: Vec<String>) -> Self {
        self.offices = offices;
        self
    }

    pub fn with_status(mut self, status: TrademarkStatus) -> Self {
        self.status_filter = Some(status);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_status_from_str() {
        assert_eq!(TrademarkStatus::from("LIVE"), TrademarkStatus::Active);
        assert_eq!(TrademarkStatus::from("dead"), TrademarkStatus::Expired);
        assert_eq!(TrademarkStatus::from("active"), TrademarkStatus::Active);
        assert_eq!(TrademarkStatus::from("UNKN"), TrademarkStatus::Unknown);
    }

    #[test]
    fn test_candidate_serialization() {
        let mark = CandidateMark::new("tm-1", "ACME").with_office("DE").with_classes(vec![9]);
        let json = serde_json::to_string(&mark).unwrap();
        let parsed: CandidateMark = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, mark);
    }

    #[test]
    fn test_candidate_defaults_from_sparse_json() {
        let parsed: CandidateMark = serde_json::from_str(r#"{"id":"tm-7","name":"Tesla"}"#).unwrap();
        assert_eq!(parsed.status, TrademarkStatus::Unknown);
        assert_eq!(parsed.accuracy, 0);
        assert!(parsed.nice_classes.is_empty());
    }

    #[test]
    fn test_risk_level_bands() {
        assert_eq!(RiskLevel::from_score(0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(39), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(40), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(69), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(70), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(100), RiskLevel::High);
    }

    #[test]
    fn test_risk_flag_severity() {
        assert!(RiskFlag::ExactMatch.severity() > RiskFlag::PhoneticMatch {
            algorithm: "soundex".into(),
            code: "T240".into()
        }.severity());
        assert!(RiskFlag::FuzzyMatch { distance: 9 }.severity() > 0.0);
    }

    #[test]
    fn test_bucket_counts() {
        let mut counts = BucketCounts::default();
        assert!(counts.is_empty());
        counts.record(ConflictBand::Critical);
        counts.record(ConflictBand::Low);
        assert_eq!(counts.total(), 2);
        assert_eq!(counts.critical, 1);
    }
}
