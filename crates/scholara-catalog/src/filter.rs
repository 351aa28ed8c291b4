//! Text search and eligibility-criteria refinement.
//!
//! Criteria matching is the single predicate behind every keyword
//! refinement (state, religion, country, education level, free tags),
//! so listing, search and any client-side refinement agree.

use std::collections::BTreeSet;
use std::str::FromStr;

use scholara_core::error::ScholaraError;
use scholara_core::models::scholarship::Scholarship;

/// Case-insensitive literal substring match of `query` against title,
/// eligibility summary and amount. An empty query matches everything.
pub fn matches_query(scholarship: &Scholarship, query: &str) -> bool {
    let needle = query.to_lowercase();
    if needle.is_empty() {
        return true;
    }

    [
        scholarship.title.as_deref(),
        scholarship.eligibility_summary(),
        scholarship.amount.as_deref(),
    ]
    .into_iter()
    .flatten()
    .any(|field| field.to_lowercase().contains(&needle))
}

/// Education level selector with its keyword vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EducationLevel {
    Class10,
    Class12,
    Undergraduate,
    Postgraduate,
    Doctorate,
}

impl EducationLevel {
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::Class10 => &["class 10", "matric", "10th", "tenth"],
            Self::Class12 => &[
                "class 12",
                "intermediate",
                "12th",
                "twelfth",
                "senior secondary",
            ],
            Self::Undergraduate => &[
                "undergraduate",
                "bachelor",
                "b.tech",
                "b.e",
                "bsc",
                "ba",
                "bcom",
            ],
            Self::Postgraduate => &[
                "postgraduate",
                "master",
                "m.tech",
                "m.e",
                "msc",
                "ma",
                "mcom",
            ],
            Self::Doctorate => &["phd", "doctoral", "doctorate", "research scholar"],
        }
    }
}

impl FromStr for EducationLevel {
    type Err = ScholaraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Class 10" => Ok(Self::Class10),
            "Class 12" => Ok(Self::Class12),
            "UG" => Ok(Self::Undergraduate),
            "PG" => Ok(Self::Postgraduate),
            "PhD" => Ok(Self::Doctorate),
            other => Err(ScholaraError::Validation {
                message: format!("unknown education level: {other}"),
            }),
        }
    }
}

/// Eligibility refinement. Every populated dimension must be satisfied
/// by at least one criteria clause; an empty filter matches all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CriteriaFilter {
    /// Any of these tags in any clause.
    pub tags: Vec<String>,
    pub state: Option<String>,
    pub religion: Option<String>,
    pub country: Option<String>,
    pub education: Option<EducationLevel>,
}

impl CriteriaFilter {
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
            && self.state.is_none()
            && self.religion.is_none()
            && self.country.is_none()
            && self.education.is_none()
    }

    pub fn matches(&self, scholarship: &Scholarship) -> bool {
        let clauses: Vec<String> = scholarship
            .criteria()
            .iter()
            .map(|c| c.to_lowercase())
            .collect();
        let any_clause_contains = |needle: &str| {
            let needle = needle.to_lowercase();
            clauses.iter().any(|c| c.contains(&needle))
        };

        if !self.tags.is_empty() && !self.tags.iter().any(|t| any_clause_contains(t)) {
            return false;
        }

        let single_values = [&self.state, &self.religion, &self.country];
        if single_values
            .into_iter()
            .flatten()
            .any(|value| !any_clause_contains(value))
        {
            return false;
        }

        match self.education {
            Some(level) => level.keywords().iter().any(|k| any_clause_contains(k)),
            None => true,
        }
    }
}

/// Distinct lowercase words longer than three characters across all
/// criteria clauses, sorted.
pub fn criteria_tags<'a>(scholarships: impl IntoIterator<Item = &'a Scholarship>) -> Vec<String> {
    scholarships
        .into_iter()
        .flat_map(|s| s.criteria())
        .flat_map(|clause| clause.split(' '))
        .filter(|word| word.chars().count() > 3)
        .map(str::to_lowercase)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
