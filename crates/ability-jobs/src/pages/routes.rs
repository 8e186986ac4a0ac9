use crate::jobs::JobId;

/// Navigable locations in the job board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Jobs,
    JobDetail(JobId),
    About,
    NotFound(String),
}

impl Route {
    /// Resolve a browser-style path. Query strings and fragments are ignored.
    pub fn parse(path: &str) -> Self {
        let bare = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim_end_matches('/');
        let segments: Vec<&str> = bare.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Self::Home,
            ["jobs"] => Self::Jobs,
            ["jobs", id] => Self::JobDetail(JobId::from(*id)),
            ["about"] => Self::About,
            _ => Self::NotFound(path.to_string()),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Jobs => "/jobs".to_string(),
            Self::JobDetail(id) => format!("/jobs/{id}"),
            Self::About => "/about".to_string(),
            Self::NotFound(path) => path.clone(),
        }
    }
}
