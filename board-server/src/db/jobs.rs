use rusqlite::params;
use time::OffsetDateTime;
use tracing::debug;
use uuid::Uuid;

use super::models::{format_timestamp, JobRecord, NewJob};
use super::{Database, DbError, JobStore, Result};

impl JobStore for Database {
    fn insert_job(&self, job: NewJob) -> Result<JobRecord> {
        let id = Uuid::new_v4().to_string();
        let created_at = format_timestamp(OffsetDateTime::now_utc())
            .map_err(|e| DbError::Config(format!("Failed to format timestamp: {}", e)))?;
        let benefits = serde_json::to_string(&job.benefits)
            .map_err(|e| DbError::Corrupt(format!("Failed to serialize benefits: {}", e)))?;

        let conn = self.get_conn()?;
        let sql = format!(
            "INSERT INTO jobs (
                id, title, company, location, salary_min, salary_max,
                job_type, description, benefits, company_logo, user_id, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            RETURNING {}",
            JobRecord::COLUMNS
        );

        let record = conn.query_row(
            &sql,
            params![
                &id,
                &job.title,
                &job.company,
                &job.location,
                job.salary_min,
                job.salary_max,
                job.job_type.as_str(),
                &job.description,
                &benefits,
                &job.company_logo,
                &job.user_id,
                &created_at,
            ],
            JobRecord::from_row,
        )?;

        debug!(id = %record.id, "Inserted job posting");
        Ok(record)
    }

    fn list_jobs(&self) -> Result<Vec<JobRecord>> {
        let conn = self.get_conn()?;
        let sql = format!(
            "SELECT {} FROM jobs ORDER BY created_at DESC, rowid DESC",
            JobRecord::COLUMNS
        );

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map([], JobRecord::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_test_db, JobType};

    fn new_job(title: &str) -> NewJob {
        NewJob {
            title: title.to_string(),
            company: "TechCorp Inc.".to_string(),
            location: "San Francisco, CA".to_string(),
            salary_min: 80000,
            salary_max: 120000,
            job_type: JobType::FullTime,
            description: "Build things".to_string(),
            benefits: vec!["401K".to_string(), "Remote Work".to_string()],
            company_logo: None,
            user_id: None,
        }
    }

    #[test]
    fn test_insert_assigns_id_and_timestamp() {
        let db = create_test_db();
        let before = OffsetDateTime::now_utc();

        let record = db.insert_job(new_job("Engineer")).unwrap();

        assert!(Uuid::parse_str(&record.id).is_ok());
        assert!(record.created_at >= before);
        assert_eq!(record.job_type, "Full-time");
        assert_eq!(record.benefits, vec!["401K", "Remote Work"]);
        assert_eq!(record.user_id, None);
    }

    #[test]
    fn test_insert_ids_are_unique() {
        let db = create_test_db();

        let a = db.insert_job(new_job("A")).unwrap();
        let b = db.insert_job(new_job("B")).unwrap();

        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_list_newest_first() {
        let db = create_test_db();

        db.insert_job(new_job("First")).unwrap();
        db.insert_job(new_job("Second")).unwrap();
        db.insert_job(new_job("Third")).unwrap();

        let titles: Vec<String> = db
            .list_jobs()
            .unwrap()
            .into_iter()
            .map(|j| j.title)
            .collect();

        assert_eq!(titles, vec!["Third", "Second", "First"]);
    }

    #[test]
    fn test_list_empty() {
        let db = create_test_db();
        assert!(db.list_jobs().unwrap().is_empty());
    }

    #[test]
    fn test_owner_and_logo_round_trip() {
        let db = create_test_db();
        let mut job = new_job("Owned");
        job.user_id = Some("user-123".to_string());
        job.company_logo = Some("🚀".to_string());

        let record = db.insert_job(job).unwrap();
        let listed = db.list_jobs().unwrap();

        assert_eq!(listed, vec![record.clone()]);
        assert_eq!(record.user_id.as_deref(), Some("user-123"));
        assert_eq!(record.company_logo.as_deref(), Some("🚀"));
    }
}
