use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use super::backend::{ApplicationStore, BackendError, JobDirectory, ResumeStorage, StorageError};
use super::domain::{JobId, JobRecord, NewApplication, ResumeFile};

const PUBLIC_PREFIX: &str = "memory://resumes/";

/// Process-local backend used for demos and tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryBackend {
    jobs: Arc<Mutex<Vec<JobRecord>>>,
    applications: Arc<Mutex<Vec<NewApplication>>>,
    objects: Arc<Mutex<BTreeMap<String, ResumeFile>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, String> {
    mutex
        .lock()
        .map_err(|_| "memory backend mutex poisoned".to_string())
}

impl MemoryBackend {
    pub fn with_jobs(jobs: Vec<JobRecord>) -> Self {
        Self {
            jobs: Arc::new(Mutex::new(jobs)),
            ..Self::default()
        }
    }

    pub fn applications(&self) -> Vec<NewApplication> {
        lock(&self.applications)
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    pub fn object_names(&self) -> Vec<String> {
        lock(&self.objects)
            .map(|guard| guard.keys().cloned().collect())
            .unwrap_or_default()
    }
}

#[async_trait]
impl JobDirectory for MemoryBackend {
    async fn active_jobs(&self) -> Result<Vec<JobRecord>, BackendError> {
        let guard = lock(&self.jobs).map_err(BackendError::Unavailable)?;
        let mut active: Vec<JobRecord> = guard.iter().filter(|job| job.is_active).cloned().collect();
        active.sort_by(|a, b| b.posted_at.cmp(&a.posted_at));
        Ok(active)
    }

    async fn job(&self, id: &JobId) -> Result<Option<JobRecord>, BackendError> {
        let guard = lock(&self.jobs).map_err(BackendError::Unavailable)?;
        Ok(guard.iter().find(|job| &job.id == id).cloned())
    }
}

#[async_trait]
impl ApplicationStore for MemoryBackend {
    async fn insert_application(&self, application: NewApplication) -> Result<(), BackendError> {
        lock(&self.applications)
            .map_err(BackendError::Unavailable)?
            .push(application);
        Ok(())
    }
}

#[async_trait]
impl ResumeStorage for MemoryBackend {
    async fn upload(&self, object_name: &str, file: &ResumeFile) -> Result<(), StorageError> {
        let mut guard = lock(&self.objects).map_err(StorageError::Unavailable)?;
        if guard.contains_key(object_name) {
            return Err(StorageError::Rejected {
                object: object_name.to_string(),
                message: "object already exists".to_string(),
            });
        }
        guard.insert(object_name.to_string(), file.clone());
        Ok(())
    }

    async fn remove(&self, object_name: &str) -> Result<(), StorageError> {
        lock(&self.objects)
            .map_err(StorageError::Unavailable)?
            .remove(object_name);
        Ok(())
    }

    fn public_url(&self, object_name: &str) -> String {
        format!("{PUBLIC_PREFIX}{object_name}")
    }
}
