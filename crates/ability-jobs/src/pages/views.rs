//! Serializable page views shared by the HTTP API and the terminal browser.

use chrono::NaiveDate;
use serde::Serialize;

use super::detail::BACK_LINK;
use super::listing::ListingPage;
use crate::jobs::{DisabilityFilter, JobRecord, ALL};
use crate::voice::PageScript;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Highlight {
    pub title: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Link {
    pub path: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct StaticPageView {
    pub page: &'static str,
    pub title: &'static str,
    pub summary: &'static str,
    pub highlights: &'static [Highlight],
    pub links: &'static [Link],
    pub voice_prompt: Option<String>,
}

const HOME_HIGHLIGHTS: &[Highlight] = &[
    Highlight {
        title: "Fully Accessible",
        description: "Built for all abilities with WCAG compliance and adaptive features.",
    },
    Highlight {
        title: "Voice Navigation",
        description: "Complete voice control for visually impaired users.",
    },
    Highlight {
        title: "Smart Job Matching",
        description: "Find jobs that match your skills and accessibility needs.",
    },
    Highlight {
        title: "Safe & Inclusive",
        description: "Every employer is vetted for inclusive workplace practices.",
    },
];

const ABOUT_HIGHLIGHTS: &[Highlight] = &[
    Highlight {
        title: "Accessibility First",
        description: "Every feature is designed with accessibility as the primary concern.",
    },
    Highlight {
        title: "Inclusive by Design",
        description: "We work only with employers committed to truly inclusive workplaces.",
    },
    Highlight {
        title: "Community Driven",
        description: "Built by and for people with disabilities, with continuous community feedback.",
    },
    Highlight {
        title: "Equal Opportunity",
        description: "We believe everyone deserves equal access to meaningful employment.",
    },
];

const HOME_LINKS: &[Link] = &[
    Link {
        path: "/jobs",
        label: "Browse Jobs",
    },
    Link {
        path: "/about",
        label: "Learn More",
    },
];

const ABOUT_LINKS: &[Link] = &[
    Link {
        path: "/jobs",
        label: "Browse Jobs",
    },
    Link {
        path: "/",
        label: "Home",
    },
];

pub fn home_view() -> StaticPageView {
    StaticPageView {
        page: "home",
        title: "Find Your Dream Job, Your Way",
        summary: "The inclusive job platform designed for people of all abilities. Voice-enabled, accessible, and packed with opportunities from inclusive employers.",
        highlights: HOME_HIGHLIGHTS,
        links: HOME_LINKS,
        voice_prompt: PageScript::Home.announcement(),
    }
}

pub fn about_view() -> StaticPageView {
    StaticPageView {
        page: "about",
        title: "About Ability Jobs",
        summary: "We're on a mission to make employment accessible to everyone, connecting talented individuals with disabilities to inclusive employers.",
        highlights: ABOUT_HIGHLIGHTS,
        links: ABOUT_LINKS,
        voice_prompt: PageScript::About.announcement(),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FilterOption {
    pub id: &'static str,
    pub label: &'static str,
}

pub fn disability_options() -> Vec<FilterOption> {
    let mut options = vec![FilterOption {
        id: ALL,
        label: "All disabilities",
    }];
    options.extend(DisabilityFilter::ordered().into_iter().map(|filter| FilterOption {
        id: filter.id(),
        label: filter.label(),
    }));
    options
}

#[derive(Debug, Clone, Serialize)]
pub struct AppliedQuery {
    pub q: String,
    pub category: String,
    pub disability: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListingView<'a> {
    pub total: usize,
    pub shown: usize,
    pub jobs: Vec<&'a JobRecord>,
    pub query: AppliedQuery,
    pub categories: Vec<String>,
    pub disability_filters: Vec<FilterOption>,
    pub voice_prompt: Option<String>,
}

impl<'a> ListingView<'a> {
    pub fn from_page(page: &'a ListingPage) -> Self {
        let jobs = page.visible();
        Self {
            total: page.all_jobs().len(),
            shown: jobs.len(),
            jobs,
            query: AppliedQuery {
                q: page.query.text.clone(),
                category: page.query.category_selector().to_string(),
                disability: page.query.disability_selector(),
            },
            categories: page.category_options(),
            disability_filters: disability_options(),
            voice_prompt: page.script().and_then(|script| script.announcement()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DetailView<'a> {
    pub job: &'a JobRecord,
    pub job_type: &'a str,
    pub posted_on: NaiveDate,
    pub apply_path: String,
    pub back_link: &'static str,
    pub voice_prompt: Option<String>,
}

impl<'a> DetailView<'a> {
    pub fn new(job: &'a JobRecord) -> Self {
        Self {
            job,
            job_type: job.job_type.label(),
            posted_on: job.posted_at.date_naive(),
            apply_path: format!("/api/v1/jobs/{}/applications", job.id),
            back_link: BACK_LINK,
            voice_prompt: PageScript::Detail { job }.announcement(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NotFoundView {
    pub state: &'static str,
    pub message: &'static str,
    pub back_link: &'static str,
}

impl NotFoundView {
    pub fn job() -> Self {
        Self {
            state: "not_found",
            message: "Job not found",
            back_link: BACK_LINK,
        }
    }

    pub fn page() -> Self {
        Self {
            state: "not_found",
            message: "Page not found",
            back_link: "/",
        }
    }
}
