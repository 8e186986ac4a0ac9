use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartError, DefaultBodyLimit, Multipart, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::listing::ListingPage;
use super::loadable::Loadable;
use super::views::{about_view, home_view, DetailView, ListingView, NotFoundView};
use crate::error::AppError;
use crate::jobs::{
    ApplicationService, ApplicationSubmission, ApplyError, JobBoardBackend, JobId, ListingQuery,
    ResumeFile,
};

/// Largest request body accepted by the apply endpoint.
pub const MAX_APPLICATION_BYTES: usize = 10 * 1024 * 1024;

pub struct JobBoardState<B: ?Sized> {
    backend: Arc<B>,
    applications: ApplicationService<B, B>,
}

impl<B> JobBoardState<B>
where
    B: JobBoardBackend + ?Sized,
{
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            applications: ApplicationService::new(backend.clone(), backend.clone()),
            backend,
        }
    }
}

/// Router builder exposing the page views and the apply endpoint.
pub fn job_board_router<B>(backend: Arc<B>) -> Router
where
    B: JobBoardBackend + ?Sized + 'static,
{
    Router::new()
        .route("/api/v1/pages/home", get(home_handler))
        .route("/api/v1/pages/about", get(about_handler))
        .route("/api/v1/jobs", get(listing_handler::<B>))
        .route("/api/v1/jobs/:job_id", get(detail_handler::<B>))
        .route(
            "/api/v1/jobs/:job_id/applications",
            post(apply_handler::<B>).layer(DefaultBodyLimit::max(MAX_APPLICATION_BYTES)),
        )
        .fallback(not_found_handler)
        .with_state(Arc::new(JobBoardState::new(backend)))
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ListingParams {
    #[serde(default)]
    q: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    disability: Option<String>,
}

pub(crate) async fn home_handler() -> Response {
    Json(home_view()).into_response()
}

pub(crate) async fn about_handler() -> Response {
    Json(about_view()).into_response()
}

pub(crate) async fn not_found_handler() -> Response {
    (StatusCode::NOT_FOUND, Json(NotFoundView::page())).into_response()
}

pub(crate) async fn listing_handler<B>(
    State(state): State<Arc<JobBoardState<B>>>,
    Query(params): Query<ListingParams>,
) -> Result<Response, AppError>
where
    B: JobBoardBackend + ?Sized + 'static,
{
    let query = ListingQuery::from_params(
        params.q.as_deref(),
        params.category.as_deref(),
        params.disability.as_deref(),
    )?;
    let jobs = state.backend.active_jobs().await?;
    let page = ListingPage {
        jobs: Loadable::Ready(jobs),
        query,
    };

    Ok(Json(ListingView::from_page(&page)).into_response())
}

pub(crate) async fn detail_handler<B>(
    State(state): State<Arc<JobBoardState<B>>>,
    Path(job_id): Path<String>,
) -> Result<Response, AppError>
where
    B: JobBoardBackend + ?Sized + 'static,
{
    let id = JobId(job_id);
    let response = match state.backend.job(&id).await? {
        Some(job) => Json(DetailView::new(&job)).into_response(),
        None => (StatusCode::NOT_FOUND, Json(NotFoundView::job())).into_response(),
    };
    Ok(response)
}

pub(crate) async fn apply_handler<B>(
    State(state): State<Arc<JobBoardState<B>>>,
    Path(job_id): Path<String>,
    multipart: Multipart,
) -> Response
where
    B: JobBoardBackend + ?Sized + 'static,
{
    let submission = match read_submission(JobId(job_id), multipart).await {
        Ok(submission) => submission,
        Err(err) => {
            let payload = json!({ "error": format!("invalid form data: {err}") });
            return (StatusCode::BAD_REQUEST, Json(payload)).into_response();
        }
    };

    match state.applications.submit(submission).await {
        Ok(submitted) => {
            let payload = json!({
                "status": "submitted",
                "job_id": submitted.job_id,
                "resume_url": submitted.resume_url,
                "message": "Application submitted! We will get back to you soon.",
            });
            (StatusCode::CREATED, Json(payload)).into_response()
        }
        Err(ApplyError::MissingField(field)) => {
            let payload = json!({
                "error": ApplyError::MissingField(field).to_string(),
                "field": field,
            });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::BAD_GATEWAY, Json(payload)).into_response()
        }
    }
}

async fn read_submission(
    job_id: JobId,
    mut multipart: Multipart,
) -> Result<ApplicationSubmission, MultipartError> {
    let mut submission = ApplicationSubmission {
        job_id,
        applicant_name: String::new(),
        applicant_email: String::new(),
        cover_letter: None,
        resume: None,
    };

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "applicant_name" => submission.applicant_name = field.text().await?,
            "applicant_email" => submission.applicant_email = field.text().await?,
            "cover_letter" => submission.cover_letter = Some(field.text().await?),
            "resume" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await?;
                // Browsers send an empty part when no file was picked.
                if !file_name.is_empty() && !bytes.is_empty() {
                    submission.resume = Some(ResumeFile {
                        file_name,
                        content_type,
                        bytes: bytes.to_vec(),
                    });
                }
            }
            _ => {}
        }
    }

    Ok(submission)
}
