//! Job postings, the listing filter engine, backend contracts and the apply flow.

pub mod apply;
pub mod backend;
pub mod domain;
pub mod filter;
pub mod memory;
pub mod supabase;

#[cfg(test)]
pub(crate) mod tests;

pub use apply::{resume_object_name, ApplicationService, ApplyError, SubmittedApplication};
pub use backend::{
    ApplicationStore, BackendError, JobBoardBackend, JobDirectory, ResumeStorage, StorageError,
};
pub use domain::{
    ApplicationField, ApplicationSubmission, JobId, JobRecord, JobType, NewApplication, ResumeFile,
};
pub use filter::{categories, filter_jobs, DisabilityFilter, FilterError, ListingQuery, ALL};
pub use memory::MemoryBackend;
pub use supabase::SupabaseClient;
