//! REST client for the hosted Supabase project backing the job board.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Response};
use tracing::debug;
use uuid::Uuid;

use super::backend::{ApplicationStore, BackendError, JobDirectory, ResumeStorage, StorageError};
use super::domain::{JobId, JobRecord, NewApplication, ResumeFile};
use crate::config::RemoteBackendConfig;

const JOBS_TABLE: &str = "jobs";
const APPLICATIONS_TABLE: &str = "applications";

#[derive(Debug, Clone)]
pub struct SupabaseClient {
    http: Client,
    base_url: String,
    bucket: String,
}

impl SupabaseClient {
    pub fn new(config: &RemoteBackendConfig) -> Result<Self, BackendError> {
        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(&config.anon_key)
            .map_err(|err| BackendError::Unavailable(format!("invalid api key header: {err}")))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.anon_key))
            .map_err(|err| BackendError::Unavailable(format!("invalid api key header: {err}")))?;
        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);

        let http = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|err| BackendError::Unavailable(err.to_string()))?;

        Ok(Self {
            http,
            base_url: config.url.trim_end_matches('/').to_string(),
            bucket: config.resume_bucket.clone(),
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.base_url)
    }

    fn object_url(&self, object_name: &str) -> String {
        format!(
            "{}/storage/v1/object/{}/{object_name}",
            self.base_url, self.bucket
        )
    }

    async fn fetch_jobs(&self, query: &[(&str, &str)]) -> Result<Vec<JobRecord>, BackendError> {
        let response = self
            .http
            .get(self.table_url(JOBS_TABLE))
            .query(query)
            .send()
            .await
            .map_err(|err| BackendError::Unavailable(err.to_string()))?;

        let response = ensure_success(response).await?;
        response
            .json::<Vec<JobRecord>>()
            .await
            .map_err(|err| BackendError::Decode(err.to_string()))
    }
}

async fn ensure_success(response: Response) -> Result<Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response.text().await.unwrap_or_default();
    Err(BackendError::Rejected {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl JobDirectory for SupabaseClient {
    async fn active_jobs(&self) -> Result<Vec<JobRecord>, BackendError> {
        let jobs = self
            .fetch_jobs(&[
                ("select", "*"),
                ("is_active", "eq.true"),
                ("order", "posted_at.desc"),
            ])
            .await?;
        debug!(count = jobs.len(), "fetched active jobs");
        Ok(jobs)
    }

    async fn job(&self, id: &JobId) -> Result<Option<JobRecord>, BackendError> {
        // `jobs.id` is a uuid column; anything else cannot match a row.
        if Uuid::parse_str(&id.0).is_err() {
            debug!(job_id = %id.0, "job id is not a uuid");
            return Ok(None);
        }
        let filter = format!("eq.{}", id.0);
        let jobs = self
            .fetch_jobs(&[("select", "*"), ("id", filter.as_str()), ("limit", "1")])
            .await?;
        Ok(jobs.into_iter().next())
    }
}

#[async_trait]
impl ApplicationStore for SupabaseClient {
    async fn insert_application(&self, application: NewApplication) -> Result<(), BackendError> {
        let response = self
            .http
            .post(self.table_url(APPLICATIONS_TABLE))
            .header("Prefer", "return=minimal")
            .json(&application)
            .send()
            .await
            .map_err(|err| BackendError::Unavailable(err.to_string()))?;

        ensure_success(response).await?;
        Ok(())
    }
}

#[async_trait]
impl ResumeStorage for SupabaseClient {
    async fn upload(&self, object_name: &str, file: &ResumeFile) -> Result<(), StorageError> {
        let content_type = file
            .content_type
            .clone()
            .unwrap_or_else(|| "application/octet-stream".to_string());

        let response = self
            .http
            .post(self.object_url(object_name))
            .header(CONTENT_TYPE, content_type)
            .body(file.bytes.clone())
            .send()
            .await
            .map_err(|err| StorageError::Unavailable(err.to_string()))?;

        ensure_success(response)
            .await
            .map_err(|err| StorageError::Rejected {
                object: object_name.to_string(),
                message: err.to_string(),
            })?;
        Ok(())
    }

    async fn remove(&self, object_name: &str) -> Result<(), StorageError> {
        let response = self
            .http
            .delete(self.object_url(object_name))
            .send()
            .await
            .map_err(|err| StorageError::Unavailable(err.to_string()))?;

        ensure_success(response)
            .await
            .map_err(|err| StorageError::Rejected {
                object: object_name.to_string(),
                message: err.to_string(),
            })?;
        Ok(())
    }

    fn public_url(&self, object_name: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{object_name}",
            self.base_url, self.bucket
        )
    }
}
