use async_trait::async_trait;

use super::domain::{JobId, JobRecord, NewApplication, ResumeFile};

/// Read side of the managed backend.
#[async_trait]
pub trait JobDirectory: Send + Sync {
    /// Active postings, newest first.
    async fn active_jobs(&self) -> Result<Vec<JobRecord>, BackendError>;
    async fn job(&self, id: &JobId) -> Result<Option<JobRecord>, BackendError>;
}

/// Write side for submitted applications.
#[async_trait]
pub trait ApplicationStore: Send + Sync {
    async fn insert_application(&self, application: NewApplication) -> Result<(), BackendError>;
}

/// Object storage for uploaded resumes.
#[async_trait]
pub trait ResumeStorage: Send + Sync {
    async fn upload(&self, object_name: &str, file: &ResumeFile) -> Result<(), StorageError>;
    async fn remove(&self, object_name: &str) -> Result<(), StorageError>;
    fn public_url(&self, object_name: &str) -> String;
}

/// Everything a page session needs from the backend.
pub trait JobBoardBackend: JobDirectory + ApplicationStore + ResumeStorage {}

impl<T> JobBoardBackend for T where T: JobDirectory + ApplicationStore + ResumeStorage {}

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("backend unavailable: {0}")]
    Unavailable(String),
    #[error("backend rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("unexpected backend payload: {0}")]
    Decode(String),
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("storage rejected object '{object}': {message}")]
    Rejected { object: String, message: String },
}
