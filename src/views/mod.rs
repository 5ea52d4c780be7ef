//! Per-screen state holders. They never talk to the network themselves: they
//! hand back [`ApiCommand`](crate::common::ApiCommand)s and accept results.

pub mod dashboard;
pub mod history;
pub mod request;
pub mod templates;

pub use dashboard::DashboardView;
pub use history::HistoryView;
pub use request::LoadState;
pub use templates::TemplatesView;
