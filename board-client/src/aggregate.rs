//! Listing aggregation.
//!
//! Merges the remote store, locally saved drafts and the seed catalog into
//! the list the board displays:
//!
//! 1. remote ++ local ++ seed (local ++ seed when the remote is unavailable)
//! 2. keep postings created within the last [`RECENCY_WINDOW_DAYS`]
//! 3. newest first, ties keep source order
//! 4. at most [`MAX_POSTINGS`]
//! 5. top up from the seed to [`MIN_POSTINGS`], skipping ids already shown
//!
//! Identifiers are not deduplicated across sources.

use std::collections::HashSet;
use std::fmt::Display;

use time::{Duration, OffsetDateTime};

use crate::posting::JobPosting;

pub const RECENCY_WINDOW_DAYS: i64 = 14;
pub const MAX_POSTINGS: usize = 50;
pub const MIN_POSTINGS: usize = 6;

/// Borrowed view of every source feeding one aggregation pass
#[derive(Debug, Clone, Copy)]
pub struct Sources<'a> {
    /// `None` when the remote read failed
    pub remote: Option<&'a [JobPosting]>,
    pub local: &'a [JobPosting],
    pub seed: &'a [JobPosting],
}

/// Result of one aggregation pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Listing {
    pub postings: Vec<JobPosting>,
    /// Seed postings appended by the minimum-count top-up
    pub backfilled: usize,
    pub remote_available: bool,
}

impl Listing {
    pub fn len(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }
}

/// Turn a remote read into an aggregation source, logging a failure.
///
/// A failed read is never surfaced to the caller; the board falls back to
/// local drafts and the seed.
pub fn remote_source<E: Display>(result: &Result<Vec<JobPosting>, E>) -> Option<&[JobPosting]> {
    match result {
        Ok(postings) => Some(postings.as_slice()),
        Err(e) => {
            tracing::warn!(error = %e, "Remote job listing unavailable, using local sources");
            None
        }
    }
}

/// Run one aggregation pass at `now`. Inputs are left untouched.
pub fn aggregate(sources: &Sources<'_>, now: OffsetDateTime) -> Listing {
    let cutoff = now - Duration::days(RECENCY_WINDOW_DAYS);
    let remote = sources.remote.unwrap_or_default();

    let mut postings: Vec<JobPosting> = remote
        .iter()
        .chain(sources.local)
        .chain(sources.seed)
        .filter(|posting| posting.created_at >= cutoff)
        .cloned()
        .collect();

    // slice::sort_by is stable
    postings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    postings.truncate(MAX_POSTINGS);

    let mut backfilled = 0;
    if postings.len() < MIN_POSTINGS {
        let mut present: HashSet<String> = postings.iter().map(|p| p.id.clone()).collect();

        for posting in sources.seed {
            if postings.len() >= MIN_POSTINGS {
                break;
            }
            if present.insert(posting.id.clone()) {
                postings.push(posting.clone());
                backfilled += 1;
            }
        }
    }

    tracing::debug!(
        remote = remote.len(),
        local = sources.local.len(),
        seed = sources.seed.len(),
        shown = postings.len(),
        backfilled,
        "Aggregated job listing"
    );

    Listing {
        postings,
        backfilled,
        remote_available: sources.remote.is_some(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::posting::JobType;
    use time::macros::datetime;

    const NOW: OffsetDateTime = datetime!(2026-10-17 12:00 UTC);

    fn posting(id: &str, days_old: i64) -> JobPosting {
        JobPosting {
            id: id.to_string(),
            title: format!("Role {}", id),
            company: "Acme".to_string(),
            location: "Remote".to_string(),
            salary_min: 50000,
            salary_max: 70000,
            job_type: JobType::FullTime,
            description: String::new(),
            benefits: Vec::new(),
            created_at: NOW - Duration::days(days_old),
            company_logo: None,
            owner: None,
        }
    }

    fn seed() -> Vec<JobPosting> {
        (1..=6).map(|i| posting(&format!("s{}", i), 20 + i)).collect()
    }

    fn ids(listing: &Listing) -> Vec<&str> {
        listing.postings.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_concatenates_sources_newest_first() {
        let remote = vec![posting("r1", 3), posting("r2", 1)];
        let local = vec![posting("l1", 2)];
        let seed: Vec<_> = (1..=6).map(|i| posting(&format!("s{}", i), 4 + i)).collect();

        let listing = aggregate(
            &Sources { remote: Some(remote.as_slice()), local: &local, seed: &seed },
            NOW,
        );

        assert_eq!(
            ids(&listing),
            vec!["r2", "l1", "r1", "s1", "s2", "s3", "s4", "s5", "s6"]
        );
        assert_eq!(listing.backfilled, 0);
        assert!(listing.remote_available);
    }

    #[test]
    fn test_recency_window_drops_old_postings() {
        let remote = vec![posting("fresh", 14), posting("stale", 15)];

        let listing = aggregate(
            &Sources { remote: Some(remote.as_slice()), local: &[], seed: &[] },
            NOW,
        );

        assert_eq!(ids(&listing), vec!["fresh"]);
    }

    #[test]
    fn test_ties_keep_source_order() {
        let remote = vec![posting("a", 2), posting("b", 2)];
        let local = vec![posting("c", 2)];

        let listing = aggregate(
            &Sources { remote: Some(remote.as_slice()), local: &local, seed: &[] },
            NOW,
        );

        assert_eq!(ids(&listing), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_truncates_to_max() {
        let remote: Vec<_> = (0..70).map(|i| posting(&format!("r{}", i), i % 10)).collect();
        let seed = seed();

        let listing = aggregate(
            &Sources { remote: Some(remote.as_slice()), local: &[], seed: &seed },
            NOW,
        );

        assert_eq!(listing.len(), MAX_POSTINGS);
        assert!(listing
            .postings
            .windows(2)
            .all(|w| w[0].created_at >= w[1].created_at));
    }

    #[test]
    fn test_backfills_from_seed_skipping_present_ids() {
        let remote = vec![posting("s2", 1)];
        // Seed entries are outside the window, so only the top-up adds them
        let seed = seed();

        let listing = aggregate(
            &Sources { remote: Some(remote.as_slice()), local: &[], seed: &seed },
            NOW,
        );

        assert_eq!(ids(&listing), vec!["s2", "s1", "s3", "s4", "s5", "s6"]);
        assert_eq!(listing.backfilled, 5);
    }

    #[test]
    fn test_backfill_stops_when_seed_exhausted() {
        let seed = vec![posting("s1", 30), posting("s2", 30)];

        let listing = aggregate(&Sources { remote: Some(&[][..]), local: &[], seed: &seed }, NOW);

        assert_eq!(ids(&listing), vec!["s1", "s2"]);
    }

    #[test]
    fn test_remote_unavailable_uses_local_and_seed() {
        let failed: Result<Vec<JobPosting>, String> = Err("connection refused".to_string());
        let local = vec![posting("draft", 0)];
        let seed: Vec<_> = (1..=6).map(|i| posting(&format!("s{}", i), i)).collect();

        let listing = aggregate(
            &Sources { remote: remote_source(&failed), local: &local, seed: &seed },
            NOW,
        );

        assert!(!listing.remote_available);
        assert_eq!(listing.postings[0].id, "draft");
        assert_eq!(listing.len(), 7);
    }

    #[test]
    fn test_duplicate_ids_across_sources_are_kept() {
        let remote = vec![posting("1", 1)];
        let seed: Vec<_> = (1..=6).map(|i| posting(&i.to_string(), i)).collect();

        let listing = aggregate(
            &Sources { remote: Some(remote.as_slice()), local: &[], seed: &seed },
            NOW,
        );

        assert_eq!(listing.postings.iter().filter(|p| p.id == "1").count(), 2);
    }

    #[test]
    fn test_idempotent() {
        let remote = vec![posting("r1", 3), posting("r2", 1)];
        let seed = seed();
        let sources = Sources { remote: Some(remote.as_slice()), local: &[], seed: &seed };

        assert_eq!(aggregate(&sources, NOW), aggregate(&sources, NOW));
    }
}
