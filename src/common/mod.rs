pub mod commands;
pub mod events;
pub mod format;
pub mod types;

pub use commands::{ApiCommand, ApiRequest, Ticket, ViewKind};
pub use events::{ApiEvent, ApiOutcome};
pub use types::{
    ApiResponse, DashboardStats, HealthBanner, MessageLog, MessageTemplate, TemplateDraft,
    TemplateId, TemplatePatch,
};
