pub mod dashboard;
pub mod history;
pub mod sidebar;
pub mod status;
pub mod templates;
