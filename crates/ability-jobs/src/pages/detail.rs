use tracing::warn;

use super::loadable::Loadable;
use crate::jobs::{JobDirectory, JobId, JobRecord};
use crate::voice::PageScript;

pub const DETAIL_FAILED_MESSAGE: &str = "Failed to load job details";
pub const BACK_LINK: &str = "/jobs";

/// One posting, plus whether its application form is showing.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailPage {
    pub id: JobId,
    pub job: Loadable<JobRecord>,
    pub application_open: bool,
}

impl DetailPage {
    pub fn loading(id: JobId) -> Self {
        Self {
            id,
            job: Loadable::Loading,
            application_open: false,
        }
    }

    /// A missing record is a normal `NotFound` state, not a failure.
    pub async fn fetch<D>(directory: &D, id: &JobId) -> Loadable<JobRecord>
    where
        D: JobDirectory + ?Sized,
    {
        match directory.job(id).await {
            Ok(Some(job)) => Loadable::Ready(job),
            Ok(None) => Loadable::NotFound,
            Err(err) => {
                warn!(job_id = %id, error = %err, "job detail fetch failed");
                Loadable::Failed(DETAIL_FAILED_MESSAGE.to_string())
            }
        }
    }

    pub fn script(&self) -> Option<PageScript<'_>> {
        match &self.job {
            Loadable::Ready(job) => Some(PageScript::Detail { job }),
            Loadable::NotFound => Some(PageScript::NotFound),
            Loadable::Loading | Loadable::Failed(_) => None,
        }
    }
}
