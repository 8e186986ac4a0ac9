use crate::infra::build_backend;
use ability_jobs::config::AppConfig;
use ability_jobs::error::AppError;
use ability_jobs::jobs::{filter_jobs, JobRecord, ListingQuery};
use clap::Args;

#[derive(Args, Debug, Default)]
pub(crate) struct JobsArgs {
    /// Free-text search over job titles and companies
    #[arg(long)]
    pub(crate) query: Option<String>,
    /// Only show jobs in this category (`all` for every category)
    #[arg(long)]
    pub(crate) category: Option<String>,
    /// Accommodation group: visual, deaf, mobility, cognitive or all
    #[arg(long)]
    pub(crate) disability: Option<String>,
}

pub(crate) async fn run_jobs(args: JobsArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let backend = build_backend(&config.backend)?;

    let query = ListingQuery::from_params(
        args.query.as_deref(),
        args.category.as_deref(),
        args.disability.as_deref(),
    )?;
    let jobs = backend.active_jobs().await?;
    let visible = filter_jobs(&jobs, &query);

    println!("Showing {} of {} jobs", visible.len(), jobs.len());
    for job in visible {
        print_summary(job);
    }
    Ok(())
}

pub(crate) fn print_summary(job: &JobRecord) {
    println!(
        "- [{}] {} at {} | {} | {} | {}",
        job.id,
        job.title,
        job.company,
        job.category,
        job.job_type.label(),
        job.location
    );
    if let Some(salary) = &job.salary_range {
        println!("  Salary: {salary}");
    }
    if !job.accessibility_features.is_empty() {
        println!("  Accessibility: {}", job.accessibility_features.join(", "));
    }
}
