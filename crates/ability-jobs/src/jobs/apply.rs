use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use super::backend::{ApplicationStore, BackendError, ResumeStorage, StorageError};
use super::domain::{ApplicationField, ApplicationSubmission, JobId, NewApplication, ResumeFile};

/// Outcome of a fully persisted application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedApplication {
    pub job_id: JobId,
    pub resume_url: Option<String>,
}

/// Error raised by the apply flow. Nothing is retried; the applicant resubmits.
#[derive(Debug, thiserror::Error)]
pub enum ApplyError {
    #[error("please fill in all required fields ({} is missing)", .0.label())]
    MissingField(ApplicationField),
    #[error("resume upload failed: {0}")]
    Upload(#[source] StorageError),
    #[error("application could not be saved: {0}")]
    Submit(#[source] BackendError),
}

/// Storage name for a resume: a fresh v4 UUID keeping the original extension.
pub fn resume_object_name(file: &ResumeFile) -> String {
    let id = Uuid::new_v4();
    match file.extension() {
        Some(ext) => format!("{id}.{ext}"),
        None => id.to_string(),
    }
}

/// Service composing resume storage and the application table.
pub struct ApplicationService<S: ?Sized, F: ?Sized> {
    store: Arc<S>,
    files: Arc<F>,
}

impl<S, F> ApplicationService<S, F>
where
    S: ApplicationStore + ?Sized,
    F: ResumeStorage + ?Sized,
{
    pub fn new(store: Arc<S>, files: Arc<F>) -> Self {
        Self { store, files }
    }

    /// Validate, upload the resume if present, then write the application row.
    pub async fn submit(
        &self,
        submission: ApplicationSubmission,
    ) -> Result<SubmittedApplication, ApplyError> {
        let ApplicationSubmission {
            job_id,
            applicant_name,
            applicant_email,
            cover_letter,
            resume,
        } = submission;

        let applicant_name = required(applicant_name, ApplicationField::ApplicantName)?;
        let applicant_email = required(applicant_email, ApplicationField::ApplicantEmail)?;
        let cover_letter = cover_letter.filter(|text| !text.trim().is_empty());

        let uploaded = match resume {
            Some(file) => {
                let object_name = resume_object_name(&file);
                self.files
                    .upload(&object_name, &file)
                    .await
                    .map_err(ApplyError::Upload)?;
                let url = self.files.public_url(&object_name);
                Some((object_name, url))
            }
            None => None,
        };

        let resume_url = uploaded.as_ref().map(|(_, url)| url.clone());
        let application = NewApplication {
            job_id: job_id.clone(),
            applicant_name,
            applicant_email,
            cover_letter,
            resume_url: resume_url.clone(),
        };

        if let Err(err) = self.store.insert_application(application).await {
            if let Some((object_name, _)) = uploaded {
                self.discard_upload(&object_name).await;
            }
            return Err(ApplyError::Submit(err));
        }

        info!(%job_id, with_resume = resume_url.is_some(), "application submitted");
        Ok(SubmittedApplication { job_id, resume_url })
    }

    async fn discard_upload(&self, object_name: &str) {
        if let Err(err) = self.files.remove(object_name).await {
            warn!(object = object_name, error = %err, "orphaned resume left in storage");
        }
    }
}

fn required(value: String, field: ApplicationField) -> Result<String, ApplyError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ApplyError::MissingField(field))
    } else {
        Ok(trimmed.to_string())
    }
}
