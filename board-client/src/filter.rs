//! Interactive filtering over an aggregated listing.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::posting::{JobPosting, JobType};

/// Current filter selection. Every empty criterion matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Matched against title and company
    pub search: String,
    pub location: String,
    pub benefits: BTreeSet<String>,
    pub job_types: BTreeSet<JobType>,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        self.search.trim().is_empty()
            && self.location.trim().is_empty()
            && self.benefits.is_empty()
            && self.job_types.is_empty()
    }

    pub fn reset(&mut self) {
        *self = FilterCriteria::default();
    }

    pub fn matches(&self, posting: &JobPosting) -> bool {
        let search = self.search.trim().to_lowercase();
        let location = self.location.trim().to_lowercase();

        let search_ok = search.is_empty()
            || posting.title.to_lowercase().contains(&search)
            || posting.company.to_lowercase().contains(&search);
        let location_ok = location.is_empty() || posting.location.to_lowercase().contains(&location);
        let benefits_ok = self.benefits.is_empty() || posting.has_any_benefit(&self.benefits);
        let type_ok = self.job_types.is_empty() || self.job_types.contains(&posting.job_type);

        search_ok && location_ok && benefits_ok && type_ok
    }
}

/// Distinct values offered as filter choices
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Facets {
    pub locations: Vec<String>,
    pub benefits: Vec<String>,
}

/// Filtered postings plus the facets of the unfiltered list
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilteredView {
    pub postings: Vec<JobPosting>,
    pub facets: Facets,
    /// Size of the list before filtering
    pub total: usize,
}

/// Postings satisfying `criteria`, in input order
pub fn apply(postings: &[JobPosting], criteria: &FilterCriteria) -> Vec<JobPosting> {
    if criteria.is_empty() {
        return postings.to_vec();
    }

    postings
        .iter()
        .filter(|posting| criteria.matches(posting))
        .cloned()
        .collect()
}

/// Locations and benefit tags in first-appearance order
pub fn facets(postings: &[JobPosting]) -> Facets {
    let mut facets = Facets::default();

    for posting in postings {
        if !facets.locations.contains(&posting.location) {
            facets.locations.push(posting.location.clone());
        }
        for benefit in &posting.benefits {
            if !facets.benefits.contains(benefit) {
                facets.benefits.push(benefit.clone());
            }
        }
    }

    facets
}

pub fn evaluate(postings: &[JobPosting], criteria: &FilterCriteria) -> FilteredView {
    FilteredView {
        postings: apply(postings, criteria),
        facets: facets(postings),
        total: postings.len(),
    }
}
