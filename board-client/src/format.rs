//! Text projections of a posting for the list and detail views.

use std::fmt;

use serde::Serialize;
use time::macros::format_description;
use time::OffsetDateTime;

use crate::posting::{CompanyLogo, JobPosting};

/// Benefit badges shown on a card before collapsing into "+N more"
pub const CARD_BENEFITS: usize = 3;

const SECONDS_PER_DAY: i64 = 86_400;

fn format_amount(amount: u64) -> String {
    if amount >= 1000 {
        format!("${}K", (amount + 500) / 1000)
    } else {
        format!("${}", amount)
    }
}

/// `$120K - $160K`
pub fn format_salary(min: u64, max: u64) -> String {
    format!("{} - {}", format_amount(min), format_amount(max))
}

/// Relative age of a posting, e.g. `3 days ago` or `2 weeks ago`.
///
/// Elapsed time is counted in whole days rounded up. Anything older than two
/// weeks is shown as a calendar date.
pub fn format_posted(created_at: OffsetDateTime, now: OffsetDateTime) -> String {
    let seconds = (now - created_at).whole_seconds().abs();
    let days = (seconds + SECONDS_PER_DAY - 1) / SECONDS_PER_DAY;

    match days {
        0 => "today".to_string(),
        1 => "1 day ago".to_string(),
        2..=7 => format!("{} days ago", days),
        8..=14 => {
            let weeks = days / 7;
            format!("{} week{} ago", weeks, if weeks > 1 { "s" } else { "" })
        }
        _ => format_date_short(created_at),
    }
}

/// `Oct 3, 2026`
pub fn format_date_short(at: OffsetDateTime) -> String {
    at.format(format_description!("[month repr:short] [day padding:none], [year]"))
        .unwrap_or_else(|_| at.date().to_string())
}

/// `October 3, 2026`
pub fn format_date_long(at: OffsetDateTime) -> String {
    at.format(format_description!("[month repr:long] [day padding:none], [year]"))
        .unwrap_or_else(|_| at.date().to_string())
}

/// Turn literal `\n` sequences typed into the form into line breaks
pub fn normalize_description(text: &str) -> String {
    text.replace("\\n", "\n")
}

/// One row of the job list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobCard {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub salary: String,
    pub job_type: String,
    pub benefits: Vec<String>,
    /// Benefits not shown as badges
    pub more_benefits: usize,
    pub posted: String,
}

impl JobCard {
    pub fn new(posting: &JobPosting, now: OffsetDateTime) -> Self {
        JobCard {
            id: posting.id.clone(),
            title: posting.title.clone(),
            company: posting.company.clone(),
            location: posting.location.clone(),
            salary: format_salary(posting.salary_min, posting.salary_max),
            job_type: posting.job_type.to_string(),
            benefits: posting.benefits.iter().take(CARD_BENEFITS).cloned().collect(),
            more_benefits: posting.benefits.len().saturating_sub(CARD_BENEFITS),
            posted: format_posted(posting.created_at, now),
        }
    }
}

impl fmt::Display for JobCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[{}] {} at {}", self.id, self.title, self.company)?;
        writeln!(f, "    {} | {} per year | {}", self.location, self.salary, self.job_type)?;

        let mut badges = self.benefits.join(", ");
        if self.more_benefits > 0 {
            badges.push_str(&format!(" +{} more", self.more_benefits));
        }
        if !badges.is_empty() {
            writeln!(f, "    {}", badges)?;
        }

        write!(f, "    Posted {}", self.posted)
    }
}

/// Full projection used by the detail view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobDetails {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub salary: String,
    pub job_type: String,
    pub benefits: Vec<String>,
    pub posted: String,
    pub logo: Option<CompanyLogo>,
    pub description: String,
}

impl JobDetails {
    pub fn new(posting: &JobPosting) -> Self {
        JobDetails {
            id: posting.id.clone(),
            title: posting.title.clone(),
            company: posting.company.clone(),
            location: posting.location.clone(),
            salary: format_salary(posting.salary_min, posting.salary_max),
            job_type: posting.job_type.to_string(),
            benefits: posting.benefits.clone(),
            posted: format_date_long(posting.created_at),
            logo: posting.company_logo.clone(),
            description: normalize_description(&posting.description),
        }
    }
}

impl fmt::Display for JobDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{}", self.company)?;
        match &self.logo {
            Some(logo) if logo.is_image() => writeln!(f, "Image: {}", logo.as_str())?,
            Some(logo) => writeln!(f, "Logo: {}", logo.as_str())?,
            None => {}
        }
        writeln!(f)?;
        writeln!(f, "Location: {}", self.location)?;
        writeln!(f, "Salary:   {} per year", self.salary)?;
        writeln!(f, "Type:     {}", self.job_type)?;
        writeln!(f, "Posted:   {}", self.posted)?;
        if !self.benefits.is_empty() {
            writeln!(f, "Benefits: {}", self.benefits.join(", "))?;
        }
        writeln!(f)?;
        writeln!(f, "Job Description")?;
        write!(f, "{}", self.description)
    }
}
