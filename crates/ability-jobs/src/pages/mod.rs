//! Page controllers, the navigator that activates them and the HTTP views.

pub mod activation;
pub mod app;
pub mod detail;
pub mod listing;
pub mod loadable;
pub mod router;
pub mod routes;
pub mod views;

#[cfg(test)]
mod tests;

pub use activation::{ActivationToken, ActivationTracker};
pub use app::{JobBoardApp, PageView};
pub use detail::DetailPage;
pub use listing::ListingPage;
pub use loadable::{Loadable, Navigation};
pub use router::{job_board_router, JobBoardState};
pub use routes::Route;
