use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use time::OffsetDateTime;

/// Well-known benefit tags offered by the posting form.
///
/// The catalog is open: postings may carry any other non-empty tag.
pub const AVAILABLE_BENEFITS: [&str; 8] = [
    "401K",
    "Health Insurance",
    "Dental Insurance",
    "Paid Time Off",
    "Paid Training",
    "Remote Work",
    "Flexible Schedule",
    "Stock Options",
];

/// Employment type of a posting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum JobType {
    #[serde(rename = "Full-time")]
    FullTime,
    #[serde(rename = "Part-time")]
    PartTime,
    #[serde(rename = "Contract")]
    Contract,
    #[serde(rename = "Internship")]
    Internship,
}

impl JobType {
    pub const ALL: [JobType; 4] = [
        JobType::FullTime,
        JobType::PartTime,
        JobType::Contract,
        JobType::Internship,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::FullTime => "Full-time",
            JobType::PartTime => "Part-time",
            JobType::Contract => "Contract",
            JobType::Internship => "Internship",
        }
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for JobType {
    type Err = String;

    /// Accepts the display name in any case, e.g. `full-time`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JobType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Invalid job type: {}", s))
    }
}

/// Company logo: a short glyph token (an emoji) or an image reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CompanyLogo {
    Glyph(String),
    Image(String),
}

impl CompanyLogo {
    pub fn as_str(&self) -> &str {
        match self {
            CompanyLogo::Glyph(s) | CompanyLogo::Image(s) => s,
        }
    }

    pub fn is_image(&self) -> bool {
        matches!(self, CompanyLogo::Image(_))
    }
}

impl From<String> for CompanyLogo {
    fn from(s: String) -> Self {
        let image = ["http://", "https://", "data:image/", "/"]
            .iter()
            .any(|prefix| s.starts_with(prefix));
        if image {
            CompanyLogo::Image(s)
        } else {
            CompanyLogo::Glyph(s)
        }
    }
}

impl From<CompanyLogo> for String {
    fn from(logo: CompanyLogo) -> Self {
        match logo {
            CompanyLogo::Glyph(s) | CompanyLogo::Image(s) => s,
        }
    }
}

/// One job listing as seen by the board.
///
/// The serialized form matches the server's stored record, so the same
/// type reads the remote listing and the local draft file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub salary_min: u64,
    pub salary_max: u64,
    pub job_type: JobType,
    pub description: String,
    #[serde(default, deserialize_with = "deserialize_benefits")]
    pub benefits: Vec<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_logo: Option<CompanyLogo>,
    /// Owner reference; absent for anonymous postings
    #[serde(default, rename = "user_id")]
    pub owner: Option<String>,
}

impl JobPosting {
    /// True when the posting carries at least one of `tags`
    pub fn has_any_benefit(&self, tags: &BTreeSet<String>) -> bool {
        self.benefits.iter().any(|benefit| tags.contains(benefit))
    }
}

/// Drop blank and repeated tags, keeping first-occurrence order
pub fn collapse_benefits<I>(benefits: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut out: Vec<String> = Vec::new();
    for benefit in benefits {
        if !benefit.trim().is_empty() && !out.contains(&benefit) {
            out.push(benefit);
        }
    }
    out
}

fn deserialize_benefits<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<String>>::deserialize(deserializer)?;
    Ok(collapse_benefits(raw.unwrap_or_default()))
}
