//! Listing filter engine: free-text search, category and disability-accommodation matching.

use serde::Serialize;

use super::domain::JobRecord;

/// Selector value meaning "do not filter on this dimension".
pub const ALL: &str = "all";

/// Fixed groups of accessibility-feature tags a job seeker can filter by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DisabilityFilter {
    Visual,
    Deaf,
    Mobility,
    Cognitive,
}

const VISUAL_TAGS: &[&str] = &[
    "Screen reader compatible",
    "Braille materials",
    "Large print materials",
    "Voice-controlled software",
    "Remote work",
];

const DEAF_TAGS: &[&str] = &[
    "Sign language interpreter",
    "Captioned meetings",
    "Written communication",
    "Visual alerts",
    "Remote work",
];

const MOBILITY_TAGS: &[&str] = &[
    "Wheelchair accessible",
    "Accessible parking",
    "Adjustable desk",
    "Elevator access",
    "Remote work",
];

const COGNITIVE_TAGS: &[&str] = &[
    "Flexible schedule",
    "Quiet workspace",
    "Written instructions",
    "Job coach support",
    "Remote work",
];

impl DisabilityFilter {
    pub const fn ordered() -> [Self; 4] {
        [Self::Visual, Self::Deaf, Self::Mobility, Self::Cognitive]
    }

    pub const fn id(self) -> &'static str {
        match self {
            Self::Visual => "visual",
            Self::Deaf => "deaf",
            Self::Mobility => "mobility",
            Self::Cognitive => "cognitive",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Visual => "Blind / low vision",
            Self::Deaf => "Deaf / hard of hearing",
            Self::Mobility => "Mobility",
            Self::Cognitive => "Cognitive / learning",
        }
    }

    pub const fn tags(self) -> &'static [&'static str] {
        match self {
            Self::Visual => VISUAL_TAGS,
            Self::Deaf => DEAF_TAGS,
            Self::Mobility => MOBILITY_TAGS,
            Self::Cognitive => COGNITIVE_TAGS,
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|filter| filter.id().eq_ignore_ascii_case(id.trim()))
    }

    /// True when at least one of the job's tags belongs to this group.
    pub fn matches(self, features: &[String]) -> bool {
        let tags = self.tags();
        features.iter().any(|feature| tags.contains(&feature.as_str()))
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("unknown disability filter '{0}'")]
    UnknownDisabilityFilter(String),
}

/// Combined filter inputs. `None` selectors mean "all".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingQuery {
    pub text: String,
    pub category: Option<String>,
    pub disability: Option<DisabilityFilter>,
}

impl ListingQuery {
    /// Build a query from raw request values, treating missing or `all` selectors as unset.
    pub fn from_params(
        text: Option<&str>,
        category: Option<&str>,
        disability: Option<&str>,
    ) -> Result<Self, FilterError> {
        let category = category
            .filter(|value| !value.is_empty() && *value != ALL)
            .map(str::to_string);

        let disability = match disability.map(str::trim) {
            None | Some("") => None,
            Some(value) if value.eq_ignore_ascii_case(ALL) => None,
            Some(value) => Some(
                DisabilityFilter::from_id(value)
                    .ok_or_else(|| FilterError::UnknownDisabilityFilter(value.to_string()))?,
            ),
        };

        Ok(Self {
            text: text.unwrap_or_default().to_string(),
            category,
            disability,
        })
    }

    pub fn category_selector(&self) -> &str {
        self.category.as_deref().unwrap_or(ALL)
    }

    pub fn disability_selector(&self) -> &'static str {
        self.disability.map(DisabilityFilter::id).unwrap_or(ALL)
    }

    pub fn matches(&self, job: &JobRecord) -> bool {
        matches_text(job, &self.text)
            && matches_category(job, self.category.as_deref())
            && matches_disability(job, self.disability)
    }
}

pub fn matches_text(job: &JobRecord, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }

    let needle = query.to_lowercase();
    job.title.to_lowercase().contains(&needle) || job.company.to_lowercase().contains(&needle)
}

pub fn matches_category(job: &JobRecord, category: Option<&str>) -> bool {
    category.map_or(true, |category| job.category == category)
}

pub fn matches_disability(job: &JobRecord, filter: Option<DisabilityFilter>) -> bool {
    filter.map_or(true, |filter| filter.matches(&job.accessibility_features))
}

/// Ordered subsequence of `jobs` satisfying every predicate of `query`.
pub fn filter_jobs<'a>(jobs: &'a [JobRecord], query: &ListingQuery) -> Vec<&'a JobRecord> {
    jobs.iter().filter(|job| query.matches(job)).collect()
}

/// Distinct categories in first-seen order.
pub fn categories(jobs: &[JobRecord]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for job in jobs {
        if !seen.iter().any(|category| category == &job.category) {
            seen.push(job.category.clone());
        }
    }
    seen
}
