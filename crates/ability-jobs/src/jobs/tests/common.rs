use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use crate::jobs::backend::{
    ApplicationStore, BackendError, JobDirectory, ResumeStorage, StorageError,
};
use crate::jobs::domain::{
    ApplicationSubmission, JobId, JobRecord, JobType, NewApplication, ResumeFile,
};

pub(crate) fn job(
    id: &str,
    title: &str,
    company: &str,
    category: &str,
    features: &[&str],
    posted_day: u32,
) -> JobRecord {
    JobRecord {
        id: JobId::from(id),
        title: title.to_string(),
        company: company.to_string(),
        category: category.to_string(),
        job_type: JobType::FullTime,
        location: "Remote".to_string(),
        salary_range: Some("$60k - $80k".to_string()),
        description: format!("{title} at {company}"),
        requirements: vec!["Curiosity".to_string()],
        accessibility_features: features.iter().map(|f| f.to_string()).collect(),
        posted_at: Utc
            .with_ymd_and_hms(2025, 3, posted_day, 9, 0, 0)
            .single()
            .expect("valid timestamp"),
        is_active: true,
    }
}

/// Newest first, as the backend returns them.
pub(crate) fn sample_jobs() -> Vec<JobRecord> {
    vec![
        job(
            "job-1",
            "Frontend Engineer",
            "Open Door Labs",
            "Engineering",
            &["Remote work", "Screen reader compatible"],
            20,
        ),
        job(
            "job-2",
            "Product Designer",
            "Inclusive Studio",
            "Design",
            &["Remote work", "Captioned meetings"],
            18,
        ),
        job(
            "job-3",
            "UX Researcher",
            "Clear Path",
            "Design",
            &["Wheelchair accessible"],
            15,
        ),
        job("job-4", "Data Engineer", "Signal Co", "Engineering", &[], 12),
        job(
            "job-5",
            "Visual Designer",
            "Open Door Labs",
            "Design",
            &["Sign language interpreter"],
            10,
        ),
    ]
}

pub(crate) fn resume(name: &str) -> ResumeFile {
    ResumeFile {
        file_name: name.to_string(),
        content_type: Some("application/pdf".to_string()),
        bytes: b"%PDF-1.7".to_vec(),
    }
}

pub(crate) fn submission(resume: Option<ResumeFile>) -> ApplicationSubmission {
    ApplicationSubmission {
        job_id: JobId::from("job-2"),
        applicant_name: "Ada Lovelace".to_string(),
        applicant_email: "ada@example.com".to_string(),
        cover_letter: Some("I would love to join.".to_string()),
        resume,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum BackendCall {
    ActiveJobs,
    Job(JobId),
    Upload(String),
    Remove(String),
    Insert(NewApplication),
}

/// Backend double that records every call and fails on demand.
#[derive(Default)]
pub(crate) struct RecordingBackend {
    pub(crate) jobs: Vec<JobRecord>,
    pub(crate) calls: Mutex<Vec<BackendCall>>,
    pub(crate) fail_reads: AtomicBool,
    pub(crate) fail_upload: AtomicBool,
    pub(crate) fail_insert: AtomicBool,
    pub(crate) read_delay: Option<Duration>,
}

impl RecordingBackend {
    pub(crate) fn with_jobs(jobs: Vec<JobRecord>) -> Arc<Self> {
        Arc::new(Self {
            jobs,
            ..Self::default()
        })
    }

    pub(crate) fn calls(&self) -> Vec<BackendCall> {
        self.calls.lock().expect("calls mutex poisoned").clone()
    }

    fn record(&self, call: BackendCall) {
        self.calls.lock().expect("calls mutex poisoned").push(call);
    }

    async fn read_gate(&self) -> Result<(), BackendError> {
        if let Some(delay) = self.read_delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(BackendError::Unavailable("database offline".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl JobDirectory for RecordingBackend {
    async fn active_jobs(&self) -> Result<Vec<JobRecord>, BackendError> {
        self.record(BackendCall::ActiveJobs);
        self.read_gate().await?;
        Ok(self.jobs.iter().filter(|job| job.is_active).cloned().collect())
    }

    async fn job(&self, id: &JobId) -> Result<Option<JobRecord>, BackendError> {
        self.record(BackendCall::Job(id.clone()));
        self.read_gate().await?;
        Ok(self.jobs.iter().find(|job| &job.id == id).cloned())
    }
}

#[async_trait]
impl ApplicationStore for RecordingBackend {
    async fn insert_application(&self, application: NewApplication) -> Result<(), BackendError> {
        self.record(BackendCall::Insert(application));
        if self.fail_insert.load(Ordering::SeqCst) {
            return Err(BackendError::Rejected {
                status: 409,
                message: "duplicate application".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ResumeStorage for RecordingBackend {
    async fn upload(&self, object_name: &str, _file: &ResumeFile) -> Result<(), StorageError> {
        self.record(BackendCall::Upload(object_name.to_string()));
        if self.fail_upload.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("bucket offline".to_string()));
        }
        Ok(())
    }

    async fn remove(&self, object_name: &str) -> Result<(), StorageError> {
        self.record(BackendCall::Remove(object_name.to_string()));
        Ok(())
    }

    fn public_url(&self, object_name: &str) -> String {
        format!("https://files.test/resumes/{object_name}")
    }
}
