use serde::{Deserialize, Serialize};
use time::format_description::FormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime, UtcOffset};

/// Fixed-width UTC timestamp so `ORDER BY created_at` sorts chronologically.
const STORED_TIMESTAMP: &[FormatItem<'static>] = format_description!(
    "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:9]Z"
);

/// Employment type of a posting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
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

impl std::str::FromStr for JobType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JobType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("Invalid job type: {}", s))
    }
}

/// A validated posting waiting for the store to assign id and timestamp
#[derive(Debug, Clone, PartialEq)]
pub struct NewJob {
    pub title: String,
    pub company: String,
    pub location: String,
    pub salary_min: i64,
    pub salary_max: i64,
    pub job_type: JobType,
    pub description: String,
    pub benefits: Vec<String>,
    pub company_logo: Option<String>,
    pub user_id: Option<String>,
}

/// Stored job posting, as returned to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub salary_min: i64,
    pub salary_max: i64,
    pub job_type: String,
    pub description: String,
    pub benefits: Vec<String>,
    pub company_logo: Option<String>,
    pub user_id: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl JobRecord {
    /// Column list matching [`JobRecord::from_row`]
    pub(crate) const COLUMNS: &'static str = "id, title, company, location, salary_min, salary_max, \
         job_type, description, benefits, company_logo, user_id, created_at";

    pub(crate) fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        let benefits_json: String = row.get(8)?;
        let benefits = serde_json::from_str(&benefits_json).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(8, rusqlite::types::Type::Text, Box::new(e))
        })?;

        let created_at: String = row.get(11)?;
        let created_at = parse_timestamp(&created_at).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(11, rusqlite::types::Type::Text, Box::new(e))
        })?;

        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
            company: row.get(2)?,
            location: row.get(3)?,
            salary_min: row.get(4)?,
            salary_max: row.get(5)?,
            job_type: row.get(6)?,
            description: row.get(7)?,
            benefits,
            company_logo: row.get(9)?,
            user_id: row.get(10)?,
            created_at,
        })
    }
}

pub(crate) fn format_timestamp(at: OffsetDateTime) -> Result<String, time::error::Format> {
    at.to_offset(UtcOffset::UTC).format(STORED_TIMESTAMP)
}

pub(crate) fn parse_timestamp(s: &str) -> Result<OffsetDateTime, time::error::Parse> {
    Ok(PrimitiveDateTime::parse(s, STORED_TIMESTAMP)?.assume_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_job_type_from_str() {
        assert_eq!("Full-time".parse::<JobType>().unwrap(), JobType::FullTime);
        assert_eq!("Internship".parse::<JobType>().unwrap(), JobType::Internship);
        assert!("full-time".parse::<JobType>().is_err());
        assert!("Remote".parse::<JobType>().is_err());
    }

    #[test]
    fn test_job_type_serde_uses_display_names() {
        let json = serde_json::to_string(&JobType::PartTime).unwrap();
        assert_eq!(json, "\"Part-time\"");
    }

    #[test]
    fn test_stored_timestamp_is_fixed_width() {
        let whole = format_timestamp(datetime!(2026-03-01 10:00:05 UTC)).unwrap();
        let fractional = format_timestamp(datetime!(2026-03-01 10:00:05.1 UTC)).unwrap();

        assert_eq!(whole.len(), fractional.len());
        assert!(whole < fractional);
    }

    #[test]
    fn test_stored_timestamp_normalizes_offset() {
        let local = datetime!(2026-03-01 12:00:00 +02:00);
        let stored = format_timestamp(local).unwrap();

        assert_eq!(stored, "2026-03-01T10:00:00.000000000Z");
        assert_eq!(parse_timestamp(&stored).unwrap(), local);
    }
}
