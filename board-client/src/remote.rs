use std::future::Future;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::OffsetDateTime;
use tracing::{debug, info, warn};

use crate::errors::{ClientError, Result};
use crate::posting::{collapse_benefits, CompanyLogo, JobPosting, JobType};

/// Form fields in the order the service reports them missing
pub const REQUIRED_FIELDS: [&str; 7] = [
    "title",
    "company",
    "location",
    "salary_min",
    "salary_max",
    "job_type",
    "description",
];

/// Why a submission did not produce a posting
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// Rejected by validation; nothing was stored
    #[error("{error}")]
    Validation {
        error: String,
        missing_fields: Vec<String>,
    },

    /// Passed validation but the store refused the write
    #[error("{error}: {details}")]
    Storage { error: String, details: String },

    /// The request never reached the service or got no usable answer
    #[error("Network error: {details}")]
    Network { details: String },
}

impl SubmitError {
    fn missing(missing_fields: Vec<String>) -> Self {
        SubmitError::Validation {
            error: "Missing required fields".to_string(),
            missing_fields,
        }
    }

    fn invalid(error: &str) -> Self {
        SubmitError::Validation {
            error: error.to_string(),
            missing_fields: Vec::new(),
        }
    }
}

/// New posting as entered in the form
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct JobSubmission {
    pub title: String,
    pub company: String,
    pub location: String,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub job_type: Option<JobType>,
    pub description: String,
    pub benefits: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_logo: Option<String>,
    /// Owner id of the signed-in user, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl JobSubmission {
    /// Required fields left empty, in form order
    pub fn missing_fields(&self) -> Vec<String> {
        let present = [
            !self.title.trim().is_empty(),
            !self.company.trim().is_empty(),
            !self.location.trim().is_empty(),
            self.salary_min.is_some(),
            self.salary_max.is_some(),
            self.job_type.is_some(),
            !self.description.trim().is_empty(),
        ];

        REQUIRED_FIELDS
            .iter()
            .zip(present)
            .filter(|(_, present)| !present)
            .map(|(field, _)| field.to_string())
            .collect()
    }

    /// Form-level presence check run before anything is sent
    pub fn check(&self) -> std::result::Result<(), SubmitError> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(SubmitError::missing(missing))
        }
    }

    /// Build a locally stored posting with a fresh id.
    ///
    /// Applies the same checks as the service since the draft never passes
    /// through it.
    pub fn to_draft(&self, now: OffsetDateTime) -> std::result::Result<JobPosting, SubmitError> {
        self.check()?;

        let (Some(min), Some(max), Some(job_type)) = (self.salary_min, self.salary_max, self.job_type)
        else {
            return Err(SubmitError::missing(self.missing_fields()));
        };

        let (Ok(salary_min), Ok(salary_max)) = (u64::try_from(min), u64::try_from(max)) else {
            return Err(SubmitError::invalid("Salary values must not be negative"));
        };
        if salary_min > salary_max {
            return Err(SubmitError::invalid(
                "Minimum salary cannot be greater than maximum salary",
            ));
        }

        Ok(JobPosting {
            id: uuid::Uuid::new_v4().to_string(),
            title: self.title.clone(),
            company: self.company.clone(),
            location: self.location.clone(),
            salary_min,
            salary_max,
            job_type,
            description: self.description.clone(),
            benefits: collapse_benefits(self.benefits.iter().cloned()),
            created_at: now,
            company_logo: self
                .company_logo
                .as_ref()
                .filter(|logo| !logo.trim().is_empty())
                .map(|logo| CompanyLogo::from(logo.clone())),
            owner: self.user_id.clone(),
        })
    }
}

/// Accepted submission
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitReceipt {
    pub job: JobPosting,
    pub message: String,
}

/// Response body of `POST /api/jobs`
#[derive(Debug, Clone, Deserialize)]
pub struct PostJobResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub job: Option<JobPosting>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub missing_fields: Option<Vec<String>>,
}

impl PostJobResponse {
    fn into_outcome(self, status: StatusCode) -> std::result::Result<SubmitReceipt, SubmitError> {
        if status == StatusCode::BAD_REQUEST {
            return Err(SubmitError::Validation {
                error: self.error.unwrap_or_else(|| "Validation failed".to_string()),
                missing_fields: self.missing_fields.unwrap_or_default(),
            });
        }

        if !status.is_success() || !self.success {
            return Err(SubmitError::Storage {
                error: self
                    .error
                    .unwrap_or_else(|| "Failed to create job posting".to_string()),
                details: self.details.unwrap_or_else(|| format!("HTTP {}", status)),
            });
        }

        match self.job {
            Some(job) => Ok(SubmitReceipt {
                job,
                message: self
                    .message
                    .unwrap_or_else(|| "Job posted successfully".to_string()),
            }),
            None => Err(SubmitError::Storage {
                error: "Failed to create job posting".to_string(),
                details: "Response did not include the stored posting".to_string(),
            }),
        }
    }
}

/// A response arrived but its body did not parse.
///
/// On a success status the service may already have stored the posting, so
/// the failure must not be retried as an offline draft.
fn unreadable_response(status: StatusCode, error: &str) -> SubmitError {
    let details = format!("Failed to parse response (HTTP {}): {}", status, error);
    if status.is_success() {
        SubmitError::Storage {
            error: "Unreadable response from job board service".to_string(),
            details,
        }
    } else {
        SubmitError::Network { details }
    }
}

/// Remote side of the board: the listing read and the submission call
pub trait JobBoardApi: Send + Sync {
    fn fetch_jobs(&self) -> impl Future<Output = Result<Vec<JobPosting>>> + Send;

    fn submit(
        &self,
        submission: &JobSubmission,
    ) -> impl Future<Output = std::result::Result<SubmitReceipt, SubmitError>> + Send;
}

/// HTTP client for the job board service
#[derive(Debug, Clone)]
pub struct BoardClient {
    client: Client,
    server_url: String,
}

impl BoardClient {
    pub fn new(server_url: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .map_err(|e| ClientError::Http(format!("Failed to build HTTP client: {}", e)))?,
            server_url: server_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    fn jobs_url(&self) -> String {
        format!("{}/api/jobs", self.server_url)
    }
}

impl JobBoardApi for BoardClient {
    /// Read every stored posting. Rows that do not parse are skipped.
    async fn fetch_jobs(&self) -> Result<Vec<JobPosting>> {
        let response = self
            .client
            .get(self.jobs_url())
            .send()
            .await
            .map_err(|e| ClientError::Http(format!("Listing request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::Http(format!("HTTP {}: {}", status, error_text)));
        }

        let rows: Vec<serde_json::Value> = response
            .json()
            .await
            .map_err(|e| ClientError::Serialization(format!("Failed to parse listing: {}", e)))?;

        let total = rows.len();
        let postings: Vec<JobPosting> = rows
            .into_iter()
            .filter_map(|row| match serde_json::from_value::<JobPosting>(row) {
                Ok(posting) => Some(posting),
                Err(e) => {
                    warn!(error = %e, "Skipping malformed job posting");
                    None
                }
            })
            .collect();

        debug!(total, parsed = postings.len(), "Fetched remote job postings");
        Ok(postings)
    }

    async fn submit(
        &self,
        submission: &JobSubmission,
    ) -> std::result::Result<SubmitReceipt, SubmitError> {
        info!(
            title = %submission.title,
            company = %submission.company,
            server = %self.server_url,
            "Submitting job posting"
        );

        let response = self
            .client
            .post(self.jobs_url())
            .json(submission)
            .send()
            .await
            .map_err(|e| SubmitError::Network {
                details: e.to_string(),
            })?;

        let status = response.status();
        let body: PostJobResponse = response
            .json()
            .await
            .map_err(|e| unreadable_response(status, &e.to_string()))?;

        let outcome = body.into_outcome(status);
        match &outcome {
            Ok(receipt) => info!(id = %receipt.job.id, "Job posting accepted"),
            Err(e) => warn!(status = %status, error = %e, "Job posting rejected"),
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use time::macros::datetime;

    fn form() -> JobSubmission {
        JobSubmission {
            title: "QA Analyst".to_string(),
            company: "Testwise".to_string(),
            location: "Denver, CO".to_string(),
            salary_min: Some(70000),
            salary_max: Some(90000),
            job_type: Some(JobType::FullTime),
            description: "Break things carefully".to_string(),
            benefits: vec!["401K".to_string(), "401K".to_string()],
            company_logo: Some("🧪".to_string()),
            user_id: None,
        }
    }

    fn response(value: serde_json::Value) -> PostJobResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_missing_fields_in_form_order() {
        let submission = JobSubmission {
            title: "  ".to_string(),
            salary_max: None,
            ..form()
        };

        assert_eq!(submission.missing_fields(), vec!["title", "salary_max"]);
        assert!(matches!(
            submission.check(),
            Err(SubmitError::Validation { missing_fields, .. }) if missing_fields.len() == 2
        ));
    }

    #[test]
    fn test_submission_serializes_wire_names() {
        let value = serde_json::to_value(form()).unwrap();

        assert_eq!(value["job_type"], "Full-time");
        assert_eq!(value["salary_min"], 70000);
        assert!(value.get("user_id").is_none());
    }

    #[test]
    fn test_missing_numbers_serialize_as_null() {
        let value = serde_json::to_value(JobSubmission::default()).unwrap();
        assert!(value["salary_min"].is_null());
        assert!(value["job_type"].is_null());
    }

    #[test]
    fn test_to_draft() {
        let now = datetime!(2026-10-17 12:00 UTC);
        let draft = form().to_draft(now).unwrap();

        assert_eq!(draft.created_at, now);
        assert_eq!(draft.benefits, vec!["401K"]);
        assert_eq!(draft.company_logo, Some(CompanyLogo::Glyph("🧪".to_string())));
        assert!(uuid::Uuid::parse_str(&draft.id).is_ok());
    }

    #[test]
    fn test_to_draft_rejects_bad_salaries() {
        let now = datetime!(2026-10-17 12:00 UTC);

        let negative = JobSubmission { salary_min: Some(-1), ..form() };
        let inverted = JobSubmission { salary_min: Some(50000), salary_max: Some(40000), ..form() };

        assert!(matches!(
            negative.to_draft(now),
            Err(SubmitError::Validation { error, .. }) if error.contains("negative")
        ));
        assert!(matches!(
            inverted.to_draft(now),
            Err(SubmitError::Validation { error, .. }) if error.starts_with("Minimum salary")
        ));
    }

    #[test]
    fn test_outcome_validation() {
        let body = response(json!({
            "success": false,
            "error": "Missing required fields",
            "missing_fields": ["company"]
        }));

        assert_eq!(
            body.into_outcome(StatusCode::BAD_REQUEST),
            Err(SubmitError::Validation {
                error: "Missing required fields".to_string(),
                missing_fields: vec!["company".to_string()],
            })
        );
    }

    #[test]
    fn test_outcome_storage() {
        let body = response(json!({
            "success": false,
            "error": "Failed to create job posting",
            "details": "disk I/O error"
        }));

        let err = body.into_outcome(StatusCode::INTERNAL_SERVER_ERROR).unwrap_err();
        assert_eq!(err.to_string(), "Failed to create job posting: disk I/O error");
    }

    #[test]
    fn test_outcome_success_without_job() {
        let body = response(json!({ "success": true, "message": "Job posted successfully" }));

        assert!(matches!(
            body.into_outcome(StatusCode::CREATED),
            Err(SubmitError::Storage { .. })
        ));
    }

    #[test]
    fn test_unreadable_success_is_not_network() {
        let err = unreadable_response(StatusCode::CREATED, "expected value at line 1");
        assert!(matches!(err, SubmitError::Storage { ref details, .. } if details.contains("201")));

        let err = unreadable_response(StatusCode::BAD_GATEWAY, "expected value at line 1");
        assert!(matches!(err, SubmitError::Network { .. }));
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = BoardClient::new("http://localhost:8080/", Duration::from_secs(5)).unwrap();
        assert_eq!(client.server_url(), "http://localhost:8080");
        assert_eq!(client.jobs_url(), "http://localhost:8080/api/jobs");
    }

    #[tokio::test]
    async fn test_unreachable_server_is_network_error() {
        // Port 9 (discard) is closed on test hosts
        let client = BoardClient::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();

        assert!(client.fetch_jobs().await.is_err());
        assert!(matches!(
            client.submit(&form()).await,
            Err(SubmitError::Network { .. })
        ));
    }
}
