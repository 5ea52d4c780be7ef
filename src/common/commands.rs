use super::types::{TemplateDraft, TemplateId, TemplatePatch};

/// The three screens of the admin client. Also used as the route key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewKind {
    Dashboard,
    Templates,
    History,
}

impl ViewKind {
    pub const ALL: [ViewKind; 3] = [ViewKind::Dashboard, ViewKind::Templates, ViewKind::History];

    pub fn title(self) -> &'static str {
        match self {
            ViewKind::Dashboard => "Dashboard",
            ViewKind::Templates => "Mesaj Şablonları",
            ViewKind::History => "Mesaj Geçmişi",
        }
    }
}

/// Stamp carried by a request and echoed back on its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub view: ViewKind,
    pub token: u64,
}

/// Backend calls the UI can ask the worker to perform.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiRequest {
    DashboardStats,
    ListTemplates,
    CreateTemplate(TemplateDraft),
    UpdateTemplate { id: TemplateId, patch: TemplatePatch },
    DeleteTemplate(TemplateId),
    /// `page` is 1-based, as the backend expects it.
    ListLogs { page: u32, limit: u32 },
}

/// Commands sent from the UI down to the API worker.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCommand {
    Request { ticket: Ticket, request: ApiRequest },
    /// Abort every in-flight request issued by this view.
    Cancel(ViewKind),
}
