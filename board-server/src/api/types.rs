use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::db::JobRecord;

/// Body of a post-job request.
///
/// Every field is optional at the wire level so that absent and `null`
/// values reach validation instead of failing deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobPostRequest {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    /// Any JSON number; validation rejects values that are not whole
    pub salary_min: Option<Number>,
    pub salary_max: Option<Number>,
    pub job_type: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub benefits: Option<Vec<String>>,
    #[serde(default)]
    pub company_logo: Option<String>,
    /// Owner carried from the caller's session; absent for anonymous posts
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Response to a post-job request, used for both success and failure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostJobResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job: Option<JobRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing_fields: Option<Vec<String>>,
}

impl PostJobResponse {
    pub fn created(job: JobRecord) -> Self {
        Self {
            success: true,
            message: Some("Job posted successfully".to_string()),
            job: Some(job),
            error: None,
            details: None,
            missing_fields: None,
        }
    }

    pub fn failure(error: &str) -> Self {
        Self {
            success: false,
            message: None,
            job: None,
            error: Some(error.to_string()),
            details: None,
            missing_fields: None,
        }
    }
}
