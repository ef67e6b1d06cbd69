use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::domain::{LeadId, LeadRecord, LeadSubmission};
use super::repository::{LeadRepository, RepositoryError};

const MIN_PHONE_DIGITS: usize = 10;
const MAX_PHONE_DIGITS: usize = 13;

static LEAD_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_lead_id() -> LeadId {
    let id = LEAD_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    LeadId(format!("lead-{id:06}"))
}

/// Validates contact requests and hands them to the repository.
pub struct LeadService<R: ?Sized> {
    repository: Arc<R>,
}

impl<R> LeadService<R>
where
    R: LeadRepository + ?Sized,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Submit a lead, returning the stored record.
    pub fn submit(&self, submission: LeadSubmission) -> Result<LeadRecord, LeadSubmissionError> {
        let submission = normalize(submission)?;

        let record = LeadRecord {
            id: next_lead_id(),
            name: submission.name,
            phone: submission.phone,
            area: submission.area,
            preferred_time: submission.preferred_time,
            phone_model: submission.phone_model,
            offered_price: submission.offered_price,
            remarks: submission.remarks,
            lead_type: submission.lead_type,
            created_at: Utc::now(),
        };

        let stored = self.repository.insert(record).map_err(|err| {
            warn!(error = %err, "lead store rejected record");
            err
        })?;

        info!(
            lead_id = %stored.id,
            lead_type = stored.lead_type.label(),
            area = %stored.area,
            "lead captured"
        );
        Ok(stored)
    }

    pub fn recent(&self, limit: usize) -> Result<Vec<LeadRecord>, LeadSubmissionError> {
        Ok(self.repository.recent(limit)?)
    }
}

impl<R: ?Sized> Clone for LeadService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

fn normalize(mut submission: LeadSubmission) -> Result<LeadSubmission, LeadSubmissionError> {
    submission.name = required("name", &submission.name)?;
    submission.area = required("area", &submission.area)?;
    submission.preferred_time = required("preferred_time", &submission.preferred_time)?;
    submission.phone = required("phone", &submission.phone)?;

    let digits = submission
        .phone
        .chars()
        .filter(char::is_ascii_digit)
        .count();
    let allowed = submission
        .phone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | ' ' | '-'));
    if !allowed || !(MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits) {
        return Err(LeadSubmissionError::Invalid(format!(
            "phone must contain {MIN_PHONE_DIGITS} to {MAX_PHONE_DIGITS} digits"
        )));
    }

    submission.remarks = submission
        .remarks
        .map(|remarks| remarks.trim().to_string())
        .filter(|remarks| !remarks.is_empty());

    Ok(submission)
}

fn required(field: &str, value: &str) -> Result<String, LeadSubmissionError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(LeadSubmissionError::Invalid(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

/// Error raised by the lead service.
#[derive(Debug, thiserror::Error)]
pub enum LeadSubmissionError {
    #[error("invalid lead: {0}")]
    Invalid(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
