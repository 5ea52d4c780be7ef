use crate::api::ApiError;

use super::commands::Ticket;
use super::types::{DashboardStats, MessageLog, MessageTemplate};

/// Result of one request, posted from the API worker back to the UI.
#[derive(Debug)]
pub struct ApiEvent {
    pub ticket: Ticket,
    pub outcome: ApiOutcome,
}

#[derive(Debug)]
pub enum ApiOutcome {
    Stats(Result<DashboardStats, ApiError>),
    Templates(Result<Vec<MessageTemplate>, ApiError>),
    TemplateSaved(Result<MessageTemplate, ApiError>),
    TemplateDeleted(Result<(), ApiError>),
    Logs(Result<Vec<MessageLog>, ApiError>),
}
