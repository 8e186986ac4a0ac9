use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info};

use super::activation::{ActivationToken, ActivationTracker};
use super::detail::DetailPage;
use super::listing::ListingPage;
use super::loadable::Navigation;
use super::routes::Route;
use crate::jobs::{
    ApplicationService, ApplicationSubmission, ApplyError, DisabilityFilter, JobBoardBackend,
    JobRecord, ListingQuery, SubmittedApplication,
};
use crate::voice::scripts::OPEN_APPLICATION_PROMPT;
use crate::voice::{PageScript, ScriptOutcome, VoiceSession};

/// What the navigator is currently showing.
#[derive(Debug, Clone, PartialEq)]
pub enum PageView {
    Home,
    Listing(ListingPage),
    Detail(DetailPage),
    About,
    NotFound { path: String },
}

impl PageView {
    pub fn route(&self) -> Route {
        match self {
            Self::Home => Route::Home,
            Self::Listing(_) => Route::Jobs,
            Self::Detail(page) => Route::JobDetail(page.id.clone()),
            Self::About => Route::About,
            Self::NotFound { path } => Route::NotFound(path.clone()),
        }
    }

    pub fn script(&self) -> Option<PageScript<'_>> {
        match self {
            Self::Home => Some(PageScript::Home),
            Self::Listing(page) => page.script(),
            Self::Detail(page) => page.script(),
            Self::About => Some(PageScript::About),
            Self::NotFound { .. } => Some(PageScript::NotFound),
        }
    }

    fn for_route(route: &Route) -> Self {
        match route {
            Route::Home => Self::Home,
            Route::Jobs => Self::Listing(ListingPage::loading(ListingQuery::default())),
            Route::JobDetail(id) => Self::Detail(DetailPage::loading(id.clone())),
            Route::About => Self::About,
            Route::NotFound(path) => Self::NotFound { path: path.clone() },
        }
    }
}

/// Client-side navigator: owns the current page, the backend handle and the
/// voice session shared by every page.
pub struct JobBoardApp<B: ?Sized> {
    backend: Arc<B>,
    session: Arc<VoiceSession>,
    applications: ApplicationService<B, B>,
    activations: ActivationTracker,
    view: Mutex<PageView>,
}

impl<B> JobBoardApp<B>
where
    B: JobBoardBackend + ?Sized,
{
    pub fn new(backend: Arc<B>, session: Arc<VoiceSession>) -> Self {
        Self {
            applications: ApplicationService::new(backend.clone(), backend.clone()),
            backend,
            session,
            activations: ActivationTracker::new(),
            view: Mutex::new(PageView::Home),
        }
    }

    pub fn session(&self) -> &Arc<VoiceSession> {
        &self.session
    }

    pub fn view(&self) -> PageView {
        self.lock_view().clone()
    }

    /// Activate `route`: show its loading state, fetch its data and run its
    /// voice script. Results from a superseded activation are dropped.
    pub async fn navigate(&self, route: Route) -> Navigation {
        let token = {
            let mut view = self.lock_view();
            let token = self.activations.activate();
            *view = PageView::for_route(&route);
            token
        };
        debug!(path = %route.path(), generation = token.generation(), "page activated");

        match &route {
            Route::Jobs => {
                let jobs = ListingPage::fetch(self.backend.as_ref()).await;
                if !self.apply_if_current(&token, |view| {
                    if let PageView::Listing(page) = view {
                        page.jobs = jobs;
                    }
                }) {
                    return Navigation::Stale;
                }
            }
            Route::JobDetail(id) => {
                let job = DetailPage::fetch(self.backend.as_ref(), id).await;
                if !self.apply_if_current(&token, |view| {
                    if let PageView::Detail(page) = view {
                        page.job = job;
                    }
                }) {
                    return Navigation::Stale;
                }
            }
            Route::Home | Route::About | Route::NotFound(_) => {}
        }

        self.announce(&token).await;
        Navigation::Rendered
    }

    /// Update the listing's free-text query. Returns false off the listing page.
    pub fn set_query(&self, text: impl Into<String>) -> bool {
        let text = text.into();
        self.update_query(|query| query.text = text)
    }

    pub fn set_category(&self, category: Option<String>) -> bool {
        self.update_query(|query| query.category = category)
    }

    pub fn set_disability(&self, filter: Option<DisabilityFilter>) -> bool {
        self.update_query(|query| query.disability = filter)
    }

    /// Postings the listing currently shows, after filtering.
    pub fn visible_jobs(&self) -> Vec<JobRecord> {
        match &*self.lock_view() {
            PageView::Listing(page) => page.visible().into_iter().cloned().collect(),
            _ => Vec::new(),
        }
    }

    /// Listen once and use a non-empty transcript as the listing query.
    pub async fn voice_search(&self) -> Option<String> {
        if !self.session.is_enabled() || !matches!(self.view().route(), Route::Jobs) {
            return None;
        }

        let transcript = match self.session.listen().await {
            Ok(transcript) => transcript,
            Err(err) => {
                debug!(error = %err, "voice search unavailable");
                return None;
            }
        };
        if transcript.is_empty() {
            return None;
        }

        self.set_query(transcript.clone()).then_some(transcript)
    }

    /// Flip voice mode. Switching it on re-announces the current page.
    pub async fn toggle_voice(&self) -> bool {
        let on = !self.session.is_enabled();
        self.session.enable(on).await;
        if on {
            let token = self.activations.current();
            self.announce(&token).await;
        }
        on
    }

    pub fn open_application(&self) -> bool {
        self.set_application_open(true)
    }

    pub fn close_application(&self) -> bool {
        self.set_application_open(false)
    }

    pub async fn submit_application(
        &self,
        submission: ApplicationSubmission,
    ) -> Result<SubmittedApplication, ApplyError> {
        let submitted = self.applications.submit(submission).await?;
        self.close_application();
        info!(job_id = %submitted.job_id, "application flow completed");
        Ok(submitted)
    }

    async fn announce(&self, token: &ActivationToken) {
        let snapshot = self.view();
        let Some(script) = snapshot.script() else {
            return;
        };

        if script.perform(&self.session).await != ScriptOutcome::OpenApplication {
            return;
        }
        let opened = self.apply_if_current(token, |view| {
            if let PageView::Detail(page) = view {
                page.application_open = true;
            }
        });
        if opened {
            self.session.speak(OPEN_APPLICATION_PROMPT).await;
        } else {
            debug!("apply command arrived after navigating away");
        }
    }

    fn apply_if_current(&self, token: &ActivationToken, apply: impl FnOnce(&mut PageView)) -> bool {
        let mut view = self.lock_view();
        // Activations bump the generation under this same lock.
        if !token.is_current() {
            debug!(generation = token.generation(), "discarding stale page results");
            return false;
        }
        apply(&mut view);
        true
    }

    fn update_query(&self, update: impl FnOnce(&mut ListingQuery)) -> bool {
        match &mut *self.lock_view() {
            PageView::Listing(page) => {
                update(&mut page.query);
                true
            }
            _ => false,
        }
    }

    fn set_application_open(&self, open: bool) -> bool {
        match &mut *self.lock_view() {
            PageView::Detail(page) if page.job.ready().is_some() => {
                page.application_open = open;
                true
            }
            _ => false,
        }
    }

    fn lock_view(&self) -> MutexGuard<'_, PageView> {
        self.view.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
