use ability_jobs::config::BackendConfig;
use ability_jobs::error::AppError;
use ability_jobs::jobs::{JobBoardBackend, JobId, JobRecord, JobType, MemoryBackend, SupabaseClient};
use chrono::{DateTime, Duration, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Managed backend when one is configured, otherwise the seeded demo board.
pub(crate) fn build_backend(config: &BackendConfig) -> Result<Arc<dyn JobBoardBackend>, AppError> {
    match &config.remote {
        Some(remote) => {
            info!(url = %remote.url, bucket = %remote.resume_bucket, "using managed backend");
            Ok(Arc::new(SupabaseClient::new(remote)?))
        }
        None => {
            info!("no backend configured; using in-memory demo jobs");
            Ok(Arc::new(MemoryBackend::with_jobs(demo_jobs(Utc::now()))))
        }
    }
}

struct Seed {
    id: &'static str,
    title: &'static str,
    company: &'static str,
    category: &'static str,
    job_type: JobType,
    location: &'static str,
    salary_range: Option<&'static str>,
    description: &'static str,
    requirements: &'static [&'static str],
    features: &'static [&'static str],
    days_ago: i64,
}

pub(crate) fn demo_jobs(now: DateTime<Utc>) -> Vec<JobRecord> {
    let seeds = [
        Seed {
            id: "frontend-engineer",
            title: "Frontend Engineer",
            company: "Open Door Labs",
            category: "Engineering",
            job_type: JobType::FullTime,
            location: "Remote",
            salary_range: Some("$95k - $120k"),
            description: "Build accessible interfaces used by thousands of job seekers.",
            requirements: &["3+ years with modern web frameworks", "Working knowledge of WCAG 2.1"],
            features: &["Screen reader compatible", "Remote work", "Flexible schedule"],
            days_ago: 1,
        },
        Seed {
            id: "product-designer",
            title: "Product Designer",
            company: "Inclusive Studio",
            category: "Design",
            job_type: JobType::FullTime,
            location: "Chicago, IL",
            salary_range: Some("$85k - $105k"),
            description: "Design inclusive product experiences with a research-led team.",
            requirements: &["Portfolio of shipped work", "Experience running usability studies"],
            features: &["Captioned meetings", "Written communication", "Adjustable desk"],
            days_ago: 3,
        },
        Seed {
            id: "support-specialist",
            title: "Customer Support Specialist",
            company: "Clear Path Services",
            category: "Customer Service",
            job_type: JobType::PartTime,
            location: "Austin, TX",
            salary_range: Some("$22 - $26 per hour"),
            description: "Help customers by chat and email in a calm, supportive team.",
            requirements: &["Clear written communication", "Patience and empathy"],
            features: &["Quiet workspace", "Written instructions", "Job coach support"],
            days_ago: 5,
        },
        Seed {
            id: "data-analyst",
            title: "Data Analyst",
            company: "Signal Co",
            category: "Engineering",
            job_type: JobType::Contract,
            location: "Denver, CO",
            salary_range: None,
            description: "Turn hiring data into insights for inclusive employers.",
            requirements: &["SQL", "Comfort presenting findings"],
            features: &["Wheelchair accessible", "Accessible parking", "Elevator access"],
            days_ago: 8,
        },
        Seed {
            id: "content-writer",
            title: "Accessibility Content Writer",
            company: "Plain Words",
            category: "Marketing",
            job_type: JobType::Internship,
            location: "Remote",
            salary_range: Some("$20 per hour"),
            description: "Write plain-language guides about workplace accommodations.",
            requirements: &["Strong editing skills"],
            features: &["Remote work", "Braille materials", "Visual alerts"],
            days_ago: 12,
        },
    ];

    seeds
        .into_iter()
        .map(|seed| JobRecord {
            id: JobId::from(seed.id),
            title: seed.title.to_string(),
            company: seed.company.to_string(),
            category: seed.category.to_string(),
            job_type: seed.job_type,
            location: seed.location.to_string(),
            salary_range: seed.salary_range.map(str::to_string),
            description: seed.description.to_string(),
            requirements: seed.requirements.iter().map(|r| r.to_string()).collect(),
            accessibility_features: seed.features.iter().map(|f| f.to_string()).collect(),
            posted_at: now - Duration::days(seed.days_ago),
            is_active: true,
        })
        .collect()
}
