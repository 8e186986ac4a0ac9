use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Identifier wrapper for job postings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub String);

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for JobId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Employment arrangement advertised on a posting. Unknown labels are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum JobType {
    FullTime,
    PartTime,
    Contract,
    Internship,
    Other(String),
}

impl JobType {
    pub fn label(&self) -> &str {
        match self {
            Self::FullTime => "Full-time",
            Self::PartTime => "Part-time",
            Self::Contract => "Contract",
            Self::Internship => "Internship",
            Self::Other(label) => label,
        }
    }
}

impl From<String> for JobType {
    fn from(value: String) -> Self {
        let normalized: String = value
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match normalized.as_str() {
            "fulltime" => Self::FullTime,
            "parttime" => Self::PartTime,
            "contract" => Self::Contract,
            "internship" => Self::Internship,
            _ => Self::Other(value),
        }
    }
}

impl From<JobType> for String {
    fn from(value: JobType) -> Self {
        match value {
            JobType::Other(label) => label,
            known => known.label().to_string(),
        }
    }
}

/// A job posting as stored by the managed backend. Read-only on this side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    pub id: JobId,
    pub title: String,
    pub company: String,
    pub category: String,
    pub job_type: JobType,
    pub location: String,
    #[serde(default)]
    pub salary_range: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub requirements: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub accessibility_features: Vec<String>,
    pub posted_at: DateTime<Utc>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Resume attached to an application form.
#[derive(Clone, PartialEq, Eq)]
pub struct ResumeFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl ResumeFile {
    /// Extension of the original file name, if it has one.
    pub fn extension(&self) -> Option<&str> {
        let (stem, ext) = self.file_name.rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() {
            None
        } else {
            Some(ext)
        }
    }
}

impl fmt::Debug for ResumeFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResumeFile")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Applicant input collected by the apply form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationSubmission {
    pub job_id: JobId,
    pub applicant_name: String,
    pub applicant_email: String,
    pub cover_letter: Option<String>,
    pub resume: Option<ResumeFile>,
}

/// Row written to the `applications` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewApplication {
    pub job_id: JobId,
    pub applicant_name: String,
    pub applicant_email: String,
    pub cover_letter: Option<String>,
    pub resume_url: Option<String>,
}

/// Required fields on the apply form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationField {
    ApplicantName,
    ApplicantEmail,
}

impl ApplicationField {
    pub const fn label(self) -> &'static str {
        match self {
            Self::ApplicantName => "Full name",
            Self::ApplicantEmail => "Email",
        }
    }
}
