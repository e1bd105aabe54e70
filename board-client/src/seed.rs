//! Bundled sample postings.
//!
//! The seed catalog is always available. It fills the board when the remote
//! store is empty or unreachable and is the last-resort source for the
//! minimum-count guarantee in [`crate::aggregate`].

use time::{Duration, OffsetDateTime};

use crate::posting::{CompanyLogo, JobPosting, JobType};

struct SeedEntry {
    id: &'static str,
    title: &'static str,
    company: &'static str,
    location: &'static str,
    salary_min: u64,
    salary_max: u64,
    description: &'static str,
    benefits: &'static [&'static str],
    logo: &'static str,
    /// Age at the anchor instant
    days_old: i64,
}

const SEED: [SeedEntry; 6] = [
    SeedEntry {
        id: "1",
        title: "Senior Frontend Developer",
        company: "TechCorp Inc.",
        location: "San Francisco, CA",
        salary_min: 120000,
        salary_max: 160000,
        description: "Own the web client end to end: component architecture, performance budgets and accessibility.\\n\\nYou bring 5+ years with TypeScript and a modern UI framework, and you enjoy mentoring.",
        benefits: &["Health Insurance", "Dental Insurance", "401K", "Paid Time Off", "Stock Options"],
        logo: "https://images.unsplash.com/photo-1560472354-b33ff0c44a43?w=64&h=64&fit=crop&crop=center",
        days_old: 1,
    },
    SeedEntry {
        id: "2",
        title: "Product Manager",
        company: "InnovateLabs",
        location: "New York, NY",
        salary_min: 110000,
        salary_max: 140000,
        description: "Set the roadmap for our core product and turn customer research into shipped features.\\n\\nThree or more years of product management and a habit of reading the metrics yourself.",
        benefits: &["Health Insurance", "Dental Insurance", "401K", "Paid Time Off", "Flexible Schedule", "Stock Options"],
        logo: "https://images.unsplash.com/photo-1549923746-c502d488b3ea?w=64&h=64&fit=crop&crop=center",
        days_old: 2,
    },
    SeedEntry {
        id: "3",
        title: "Data Scientist",
        company: "DataFlow Analytics",
        location: "Remote",
        salary_min: 95000,
        salary_max: 130000,
        description: "Build forecasting and anomaly models over streaming telemetry and explain them to the people who act on them.\\n\\nStrong statistics, Python or R, and SQL.",
        benefits: &["Remote Work", "Health Insurance", "Dental Insurance", "401K", "Flexible Schedule", "Paid Training"],
        logo: "https://images.unsplash.com/photo-1551288049-bebda4e38f71?w=64&h=64&fit=crop&crop=center",
        days_old: 4,
    },
    SeedEntry {
        id: "4",
        title: "UX/UI Designer",
        company: "DesignStudio Pro",
        location: "Austin, TX",
        salary_min: 75000,
        salary_max: 95000,
        description: "Design flows from research to high-fidelity prototypes and keep our design system consistent.\\n\\nPortfolio required.",
        benefits: &["Health Insurance", "Dental Insurance", "Paid Time Off", "Paid Training", "Flexible Schedule"],
        logo: "https://images.unsplash.com/photo-1558655146-364adaf25c24?w=64&h=64&fit=crop&crop=center",
        days_old: 6,
    },
    SeedEntry {
        id: "5",
        title: "DevOps Engineer",
        company: "CloudTech Solutions",
        location: "Seattle, WA",
        salary_min: 105000,
        salary_max: 135000,
        description: "Run the build, deploy and observability platform across three cloud regions.\\n\\nInfrastructure as code, containers and on-call experience.",
        benefits: &["Health Insurance", "Dental Insurance", "401K", "Paid Time Off", "Stock Options", "Remote Work"],
        logo: "https://images.unsplash.com/photo-1451187580459-43490279c0fa?w=64&h=64&fit=crop&crop=center",
        days_old: 9,
    },
    SeedEntry {
        id: "6",
        title: "Marketing Coordinator",
        company: "BrandBooster Agency",
        location: "Chicago, IL",
        salary_min: 45000,
        salary_max: 60000,
        description: "Coordinate campaigns across social, email and events for a portfolio of consumer brands.\\n\\nOne to two years of agency or in-house marketing.",
        benefits: &["Health Insurance", "Dental Insurance", "Paid Time Off", "Paid Training"],
        logo: "https://images.unsplash.com/photo-1460925895917-afdab827c52f?w=64&h=64&fit=crop&crop=center",
        days_old: 12,
    },
];

/// Build the seed catalog with ages measured back from `anchor`.
pub fn seed_catalog(anchor: OffsetDateTime) -> Vec<JobPosting> {
    SEED.iter()
        .map(|entry| JobPosting {
            id: entry.id.to_string(),
            title: entry.title.to_string(),
            company: entry.company.to_string(),
            location: entry.location.to_string(),
            salary_min: entry.salary_min,
            salary_max: entry.salary_max,
            job_type: JobType::FullTime,
            description: entry.description.to_string(),
            benefits: entry.benefits.iter().map(|b| b.to_string()).collect(),
            created_at: anchor - Duration::days(entry.days_old),
            company_logo: Some(CompanyLogo::from(entry.logo.to_string())),
            owner: None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{MIN_POSTINGS, RECENCY_WINDOW_DAYS};
    use std::collections::HashSet;
    use time::macros::datetime;

    #[test]
    fn test_seed_covers_minimum() {
        let seed = seed_catalog(datetime!(2026-10-17 12:00 UTC));
        let ids: HashSet<&str> = seed.iter().map(|p| p.id.as_str()).collect();

        assert!(seed.len() >= MIN_POSTINGS);
        assert_eq!(ids.len(), seed.len(), "seed ids must be distinct");
    }

    #[test]
    fn test_seed_inside_window() {
        let anchor = datetime!(2026-10-17 12:00 UTC);
        let cutoff = anchor - Duration::days(RECENCY_WINDOW_DAYS);

        for posting in seed_catalog(anchor) {
            assert!(posting.created_at >= cutoff, "{} is too old", posting.id);
            assert!(posting.created_at <= anchor);
        }
    }

    #[test]
    fn test_seed_postings_are_well_formed() {
        for posting in seed_catalog(OffsetDateTime::now_utc()) {
            assert!(posting.salary_min <= posting.salary_max);
            assert!(!posting.benefits.is_empty());
            assert!(posting.company_logo.as_ref().is_some_and(|l| l.is_image()));
        }
    }
}
