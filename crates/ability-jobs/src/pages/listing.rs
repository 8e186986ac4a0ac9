use tracing::warn;

use super::loadable::Loadable;
use crate::jobs::{categories, filter_jobs, JobDirectory, JobRecord, ListingQuery, ALL};
use crate::voice::PageScript;

pub const LOAD_FAILED_MESSAGE: &str = "Failed to load jobs";

/// The job listing page: every active posting plus the user's filter inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingPage {
    pub jobs: Loadable<Vec<JobRecord>>,
    pub query: ListingQuery,
}

impl ListingPage {
    pub fn loading(query: ListingQuery) -> Self {
        Self {
            jobs: Loadable::Loading,
            query,
        }
    }

    /// Read all active postings, newest first.
    pub async fn fetch<D>(directory: &D) -> Loadable<Vec<JobRecord>>
    where
        D: JobDirectory + ?Sized,
    {
        match directory.active_jobs().await {
            Ok(jobs) => Loadable::Ready(jobs),
            Err(err) => {
                warn!(error = %err, "job listing fetch failed");
                Loadable::Failed(LOAD_FAILED_MESSAGE.to_string())
            }
        }
    }

    pub fn all_jobs(&self) -> &[JobRecord] {
        self.jobs.ready().map(Vec::as_slice).unwrap_or_default()
    }

    pub fn visible(&self) -> Vec<&JobRecord> {
        filter_jobs(self.all_jobs(), &self.query)
    }

    /// Category selector options, `all` first.
    pub fn category_options(&self) -> Vec<String> {
        let mut options = vec![ALL.to_string()];
        options.extend(categories(self.all_jobs()));
        options
    }

    /// The announcement covers every loaded posting, not just the filtered ones.
    pub fn script(&self) -> Option<PageScript<'_>> {
        self.jobs
            .ready()
            .map(|jobs| PageScript::Listing { jobs: jobs.as_slice() })
    }
}
