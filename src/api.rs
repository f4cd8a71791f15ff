// Department console data layer: the portal's response DTO shape, the
// submissions query filter, and the async PortalApi seam the console pages
// call. The in-memory implementation replaces the original stubbed network
// calls so the console state can be exercised end to end.

use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

// The portal-wide response envelope: status, message, optional payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: ResponseStatus,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            status: ResponseStatus::Success,
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Error,
            message: message.into(),
            data: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    Pending,
    InReview,
    Approved,
    Rejected,
}

// A citizen submission handled by a department
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub id: String,
    pub department: String,
    pub citizen_name: String,
    pub subject: String,
    pub status: SubmissionStatus,
    pub submitted_at: NaiveDate,
}

// Query filter for the submissions console; page numbers are 1-based
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubmissionFilter {
    pub department: Option<String>,
    pub status: Option<SubmissionStatus>,
    pub page: usize,
    pub page_size: usize,
}

impl SubmissionFilter {
    fn matches(&self, submission: &Submission) -> bool {
        self.department
            .as_ref()
            .map_or(true, |d| &submission.department == d)
            && self.status.map_or(true, |s| submission.status == s)
    }
}

// One page of results plus the totals the console's pager needs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
}

// A department service branch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    pub id: String,
    pub name: String,
    pub address: String,
    pub is_open: bool,
}

#[async_trait]
pub trait PortalApi: Send + Sync + 'static {
    async fn list_submissions(&self, filter: SubmissionFilter) -> Result<Page<Submission>, ApiError>;

    async fn update_submission_status(
        &self,
        id: &str,
        status: SubmissionStatus,
    ) -> Result<Submission, ApiError>;

    async fn list_branches(&self) -> Result<Vec<Branch>, ApiError>;

    async fn create_branch(&self, branch: Branch) -> Result<Branch, ApiError>;
}

// In-memory backend for tests and local development
#[derive(Default)]
pub struct InMemoryPortalApi {
    submissions: Mutex<Vec<Submission>>,
    branches: Mutex<Vec<Branch>>,
}

impl InMemoryPortalApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_submissions(self, submissions: Vec<Submission>) -> Self {
        *self.submissions.lock() = submissions;
        self
    }

    pub fn with_branches(self, branches: Vec<Branch>) -> Self {
        *self.branches.lock() = branches;
        self
    }
}

#[async_trait]
impl PortalApi for InMemoryPortalApi {
    async fn list_submissions(&self, filter: SubmissionFilter) -> Result<Page<Submission>, ApiError> {
        if filter.page == 0 || filter.page_size == 0 {
            return Err(ApiError::InvalidRequest(
                "page and page_size must be at least 1".to_string(),
            ));
        }

        let submissions = self.submissions.lock();
        let matching: Vec<Submission> = submissions
            .iter()
            .filter(|s| filter.matches(s))
            .cloned()
            .collect();

        let total = matching.len();
        let start = (filter.page - 1) * filter.page_size;
        let items = matching
            .into_iter()
            .skip(start)
            .take(filter.page_size)
            .collect();

        Ok(Page {
            items,
            total,
            page: filter.page,
            page_size: filter.page_size,
        })
    }

    async fn update_submission_status(
        &self,
        id: &str,
        status: SubmissionStatus,
    ) -> Result<Submission, ApiError> {
        let mut submissions = self.submissions.lock();
        let submission = submissions
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| ApiError::NotFound(format!("submission {}", id)))?;

        submission.status = status;
        info!(id, ?status, "submission status updated");
        Ok(submission.clone())
    }

    async fn list_branches(&self) -> Result<Vec<Branch>, ApiError> {
        Ok(self.branches.lock().clone())
    }

    async fn create_branch(&self, branch: Branch) -> Result<Branch, ApiError> {
        let mut branches = self.branches.lock();
        if branches.iter().any(|b| b.id == branch.id) {
            return Err(ApiError::InvalidRequest(format!(
                "branch {} already exists",
                branch.id
            )));
        }

        branches.push(branch.clone());
        info!(id = %branch.id, "branch created");
        Ok(branch)
    }
}
