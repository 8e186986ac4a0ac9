use serde::Serialize;

/// State of data a page fetched on activation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "data", rename_all = "snake_case")]
pub enum Loadable<T> {
    Loading,
    Ready(T),
    NotFound,
    /// The read failed; carries the notification shown to the user.
    Failed(String),
}

impl<T> Loadable<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }
}

/// Whether an activation's results were applied to the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Navigation {
    Rendered,
    /// Another navigation started before the fetch settled; its results were dropped.
    Stale,
}
