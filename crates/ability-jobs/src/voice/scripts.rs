//! Spoken announcements for each page.

use serde::Serialize;
use tracing::debug;

use super::session::VoiceSession;
use crate::jobs::JobRecord;

pub const OPEN_APPLICATION_PROMPT: &str = "Opening application form.";
const APPLY_COMMAND: &str = "apply";
const LISTING_PREVIEW: usize = 3;

/// The voice script a page runs when it becomes active.
#[derive(Debug, Clone, Copy)]
pub enum PageScript<'a> {
    Home,
    Listing { jobs: &'a [JobRecord] },
    Detail { job: &'a JobRecord },
    About,
    NotFound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptOutcome {
    /// Voice mode is off or there was nothing to say.
    Skipped,
    Announced,
    /// The listener asked to apply on the detail page.
    OpenApplication,
}

impl PageScript<'_> {
    pub fn announcement(&self) -> Option<String> {
        match self {
            Self::Home => Some(
                "You are on the home page. Say jobs to browse jobs, or about to learn more about us."
                    .to_string(),
            ),
            Self::Listing { jobs } if jobs.is_empty() => None,
            Self::Listing { jobs } => {
                let titles: Vec<&str> = jobs
                    .iter()
                    .take(LISTING_PREVIEW)
                    .map(|job| job.title.as_str())
                    .collect();
                Some(format!(
                    "There are {} jobs available. You can say a job title to search. The jobs are: {}, and more.",
                    jobs.len(),
                    titles.join(", ")
                ))
            }
            Self::Detail { job } => {
                let mut text = format!(
                    "Job: {} at {}. Location: {}.",
                    job.title, job.company, job.location
                );
                if let Some(salary) = &job.salary_range {
                    text.push_str(&format!(" Salary: {salary}."));
                }
                text.push_str(" Say apply to apply for this job, or back to go back.");
                Some(text)
            }
            Self::About => Some(
                "About Ability Jobs. We are an inclusive job platform built for people of all abilities. Say jobs to browse jobs, or home to go back."
                    .to_string(),
            ),
            Self::NotFound => None,
        }
    }

    /// Speak the announcement if voice mode is on. The detail page then listens
    /// once for an apply command; anything else is ignored. The caller opens the
    /// form and speaks [`OPEN_APPLICATION_PROMPT`].
    pub async fn perform(&self, session: &VoiceSession) -> ScriptOutcome {
        if !session.is_enabled() {
            return ScriptOutcome::Skipped;
        }
        let Some(text) = self.announcement() else {
            return ScriptOutcome::Skipped;
        };

        session.speak(&text).await;

        if !matches!(self, Self::Detail { .. }) {
            return ScriptOutcome::Announced;
        }

        match session.listen().await {
            Ok(response) if response.to_lowercase().contains(APPLY_COMMAND) => {
                ScriptOutcome::OpenApplication
            }
            Ok(_) => ScriptOutcome::Announced,
            Err(err) => {
                debug!(error = %err, "detail page follow-up skipped");
                ScriptOutcome::Announced
            }
        }
    }
}
