use serde_json::Number;
use tracing::info;

use crate::api::error::{ApiError, ApiResult};
use crate::api::types::JobPostRequest;
use crate::db::{JobRecord, JobStore, JobType, NewJob};

/// Validate a post-job request and build the record to insert.
///
/// Checks run in order and the first failure wins: presence, whole-number
/// salaries, non-negative salaries, salary range, job type. Missing fields are
/// reported in form order.
pub fn validate(request: JobPostRequest) -> ApiResult<NewJob> {
    let mut missing = Vec::new();

    let title = required_text(request.title, "title", &mut missing);
    let company = required_text(request.company, "company", &mut missing);
    let location = required_text(request.location, "location", &mut missing);
    let salary_min = required(request.salary_min, "salary_min", &mut missing);
    let salary_max = required(request.salary_max, "salary_max", &mut missing);
    let job_type = required_text(request.job_type, "job_type", &mut missing);
    let description = required_text(request.description, "description", &mut missing);

    let (
        Some(title),
        Some(company),
        Some(location),
        Some(salary_min),
        Some(salary_max),
        Some(job_type),
        Some(description),
    ) = (title, company, location, salary_min, salary_max, job_type, description)
    else {
        return Err(ApiError::MissingFields(missing));
    };

    let (Some(salary_min), Some(salary_max)) = (whole(&salary_min), whole(&salary_max)) else {
        return Err(ApiError::FractionalSalary);
    };

    if salary_min < 0 || salary_max < 0 {
        return Err(ApiError::NegativeSalary);
    }

    if salary_min > salary_max {
        return Err(ApiError::SalaryRange);
    }

    let job_type: JobType = job_type
        .parse()
        .map_err(|_| ApiError::InvalidJobType(job_type))?;

    Ok(NewJob {
        title,
        company,
        location,
        salary_min,
        salary_max,
        job_type,
        description,
        benefits: collapse_benefits(request.benefits.unwrap_or_default()),
        company_logo: request.company_logo.filter(|logo| !logo.trim().is_empty()),
        user_id: request.user_id.filter(|id| !id.trim().is_empty()),
    })
}

/// Validate and persist a submission with exactly one insert.
///
/// Nothing touches the store when validation fails.
pub fn submit(store: &dyn JobStore, request: JobPostRequest) -> ApiResult<JobRecord> {
    let job = validate(request)?;
    let anonymous = job.user_id.is_none();

    let record = store.insert_job(job)?;

    info!(
        id = %record.id,
        company = %record.company,
        job_type = %record.job_type,
        anonymous,
        "Job posting created"
    );

    Ok(record)
}

/// Take a text field, recording it as missing when absent or blank
fn required_text(value: Option<String>, field: &str, missing: &mut Vec<String>) -> Option<String> {
    let value = value.filter(|s| !s.trim().is_empty());
    if value.is_none() {
        missing.push(field.to_string());
    }
    value
}

fn required<T>(value: Option<T>, field: &str, missing: &mut Vec<String>) -> Option<T> {
    if value.is_none() {
        missing.push(field.to_string());
    }
    value
}

/// Integral value of a JSON number; `80000.0` counts, `80000.5` does not
fn whole(number: &Number) -> Option<i64> {
    if let Some(n) = number.as_i64() {
        return Some(n);
    }

    number
        .as_f64()
        .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
        .map(|f| f as i64)
}

/// Drop blank tags and repeated tags, keeping first-occurrence order
fn collapse_benefits(benefits: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(benefits.len());
    for benefit in benefits {
        if !benefit.trim().is_empty() && !out.contains(&benefit) {
            out.push(benefit);
        }
    }
    out
}
