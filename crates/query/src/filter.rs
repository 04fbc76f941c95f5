use markencheck_model::{CandidateMark, SearchQuery, TrademarkStatus};

use crate::offices::{is_eu_member, normalize_office_code};

/// Local filter for registry results by status, Nice class and office.
///
/// Office matching follows where a mark is actually in force: an EUIPO
/// mark counts for every EU member state, and a WIPO (international)
/// registration counts for the countries it designates.
#[derive(Debug, Clone, Default)]
pub struct CandidateFilter {
    status: Option<TrademarkStatus>,
    classes: Vec<u16>,
    offices: Vec<String>,
}

impl CandidateFilter {
    pub fn from_query(query: &SearchQuery) -> Self {
        Self {
            status: query.status_filter,
            classes: query.classes.clone(),
            offices: query.offices.iter().map(|o| normalize_office_code(o)).collect(),
        }
    }

    fn has_eu_member(&self) -> bool {
        self.offices.iter().any(|o| is_eu_member(o))
    }

    fn office_selected(&self, code: &str) -> bool {
        self.offices.iter().any(|o| o == code)
    }

    fn matches_office(&self, candidate: &CandidateMark) -> bool {
        if self.offices.is_empty() {
            return true;
        }

        let office = normalize_office_code(&candidate.office);
        if self.office_selected(&office) {
            return true;
        }

        let has_eu_member = self.has_eu_member();
        if office == "EU" && has_eu_member {
            return true;
        }

        if office == "WO" {
            let designations: Vec<String> = candidate
                .designation_countries
                .iter()
                .map(|c| normalize_office_code(c))
                .collect();
            if designations.iter().any(|c| self.office_selected(c)) {
                return true;
            }
            if has_eu_member && designations.iter().any(|c| c == "EU") {
                return true;
            }
        }

        false
    }

    fn matches_classes(&self, candidate: &CandidateMark) -> bool {
        self.classes.is_empty()
            || candidate
                .nice_classes
                .iter()
                .any(|c| self.classes.contains(c))
    }

    pub fn matches(&self, candidate: &CandidateMark) -> bool {
        if let Some(status) = self.status {
            if candidate.status != status {
                return false;
            }
        }

        self.matches_classes(candidate) && self.matches_office(candidate)
    }

    /// Keep the candidates that pass the filter, preserving order.
    pub fn apply(&self, candidates: Vec<CandidateMark>) -> Vec<CandidateMark> {
        candidates.into_iter().filter(|c| self.matches(c)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(offices: &[&str], classes: Vec<u16>) -> SearchQuery {
        SearchQuery::new("Accelari")
            .with_offices(offices.iter().map(|o| o.to_string()).collect())
            .with_classes(classes)
    }

    #[test]
    fn test_empty_filter_keeps_everything() {
        let filter = CandidateFilter::from_query(&SearchQuery::new("Accelari"));
        assert!(filter.matches(&CandidateMark::new("1", "Accelari").with_office("US")));
    }

    #[test]
    fn test_direct_office_match() {
        let filter = CandidateFilter::from_query(&query(&["DE"], vec![]));
        assert!(filter.matches(&CandidateMark::new("1", "A").with_office("DE")));
        assert!(!filter.matches(&CandidateMark::new("2", "A").with_office("US")));
    }

    #[test]
    fn test_eu_member_includes_euipo() {
        let filter = CandidateFilter::from_query(&query(&["DE"], vec![]));
        assert!(filter.matches(&CandidateMark::new("1", "A").with_office("EU")));
        assert!(filter.matches(&CandidateMark::new("2", "A").with_office("EM")));

        let filter = CandidateFilter::from_query(&query(&["CH"], vec![]));
        assert!(!filter.matches(&CandidateMark::new("3", "A").with_office("EU")));
    }

    #[test]
    fn test_wipo_designations() {
        let filter = CandidateFilter::from_query(&query(&["DE"], vec![]));
        let designates_de = CandidateMark::new("1", "A")
            .with_office("WO")
            .with_designations(vec!["DE".into(), "CH".into()]);
        let designates_eu = CandidateMark::new("2", "A")
            .with_office("WO")
            .with_designations(vec!["EU".into()]);
        let designates_us = CandidateMark::new("3", "A")
            .with_office("WO")
            .with_designations(vec!["US".into()]);
        let no_designations = CandidateMark::new("4", "A").with_office("WO");

        assert!(filter.matches(&designates_de));
        assert!(filter.matches(&designates_eu));
        assert!(!filter.matches(&designates_us));
        assert!(!filter.matches(&no_designations));
    }

    #[test]
    fn test_class_overlap_required() {
        let filter = CandidateFilter::from_query(&query(&[], vec![9, 42]));
        assert!(filter.matches(&CandidateMark::new("1", "A").with_classes(vec![42, 35])));
        assert!(!filter.matches(&CandidateMark::new("2", "A").with_classes(vec![25])));
        assert!(!filter.matches(&CandidateMark::new("3", "A")));
    }

    #[test]
    fn test_status_filter() {
        let filter = CandidateFilter::from_query(&SearchQuery::new("A").with_status(TrademarkStatus::Active));
        assert!(filter.matches(&CandidateMark::new("1", "A").with_status(TrademarkStatus::Active)));
        assert!(!filter.matches(&CandidateMark::new("2", "A").with_status(TrademarkStatus::Expired)));
    }

    #[test]
    fn test_apply_preserves_order() {
        let filter = CandidateFilter::from_query(&query(&["DE"], vec![]));
        let kept = filter.apply(vec![
            CandidateMark::new("1", "A").with_office("DE"),
            CandidateMark::new("2", "B").with_office("US"),
            CandidateMark::new("3", "C").with_office("EU"),
        ]);
        let ids: Vec<&str> = kept.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }
}
