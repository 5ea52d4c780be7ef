use crate::common::{ApiCommand, ApiEvent, ApiOutcome, ApiRequest, MessageLog, ViewKind};

use super::request::{LoadState, RequestTracker};

pub const LOAD_ERROR: &str = "Mesaj geçmişi yüklenirken bir hata oluştu.";
pub const ROWS_PER_PAGE_OPTIONS: [u32; 4] = [5, 10, 25, 50];
pub const DEFAULT_ROWS_PER_PAGE: u32 = 10;

/// Paginated message history.
///
/// The backend never reports a total count, so paging forward is always
/// allowed. The search box filters only the page that is currently loaded.
pub struct HistoryView {
    tracker: RequestTracker,
    state: LoadState<Vec<MessageLog>>,
    page: u32,
    rows_per_page: u32,
    pub search_term: String,
}

impl HistoryView {
    pub fn new(rows_per_page: u32) -> Self {
        Self {
            tracker: RequestTracker::new(ViewKind::History),
            state: LoadState::Idle,
            page: 0,
            rows_per_page: normalize_rows_per_page(rows_per_page),
            search_term: String::new(),
        }
    }

    pub fn activate(&mut self) -> ApiCommand {
        self.fetch()
    }

    pub fn deactivate(&mut self) -> ApiCommand {
        self.tracker.invalidate()
    }

    fn fetch(&mut self) -> ApiCommand {
        self.state = LoadState::Loading;
        self.tracker.issue(ApiRequest::ListLogs {
            page: self.page + 1,
            limit: self.rows_per_page,
        })
    }

    /// Zero-based page currently shown.
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn rows_per_page(&self) -> u32 {
        self.rows_per_page
    }

    pub fn set_page(&mut self, page: u32) -> Option<ApiCommand> {
        if page == self.page {
            return None;
        }
        self.page = page;
        Some(self.fetch())
    }

    pub fn next_page(&mut self) -> Option<ApiCommand> {
        self.set_page(self.page.saturating_add(1))
    }

    pub fn previous_page(&mut self) -> Option<ApiCommand> {
        if !self.can_go_previous() {
            return None;
        }
        self.set_page(self.page - 1)
    }

    pub fn can_go_previous(&self) -> bool {
        self.page > 0
    }

    /// Always true: the total is unknown.
    pub fn can_go_next(&self) -> bool {
        true
    }

    /// Changing the page size jumps back to the first page.
    pub fn set_rows_per_page(&mut self, rows_per_page: u32) -> Option<ApiCommand> {
        if !ROWS_PER_PAGE_OPTIONS.contains(&rows_per_page) {
            log::warn!("Ignoring unsupported page size {rows_per_page}");
            return None;
        }
        if rows_per_page == self.rows_per_page && self.page == 0 {
            return None;
        }
        self.rows_per_page = rows_per_page;
        self.page = 0;
        Some(self.fetch())
    }

    pub fn state(&self) -> &LoadState<Vec<MessageLog>> {
        &self.state
    }

    pub fn table_visible(&self) -> bool {
        self.state.ready().is_some()
    }

    pub fn filtered_logs(&self) -> Vec<&MessageLog> {
        let Some(logs) = self.state.ready() else {
            return Vec::new();
        };
        let needle = self.search_term.to_lowercase();
        logs.iter()
            .filter(|log| matches_filter(log, &needle))
            .collect()
    }

    pub fn displayed_rows_label(&self) -> String {
        let page = u64::from(self.page);
        let rows = u64::from(self.rows_per_page);
        let from = page * rows + 1;
        let to = (page + 1) * rows;
        format!("{from}-{to} arası gösteriliyor")
    }

    pub fn apply(&mut self, event: ApiEvent) -> Option<ApiCommand> {
        if !self.tracker.accepts(event.ticket) {
            log::debug!("History ignoring stale result #{}", event.ticket.token);
            return None;
        }
        match event.outcome {
            ApiOutcome::Logs(Ok(logs)) => self.state = LoadState::Ready(logs),
            ApiOutcome::Logs(Err(err)) => {
                log::warn!("Message history failed: {err}");
                self.state = LoadState::Error(LOAD_ERROR.to_string());
            }
            other => log::warn!("History got unexpected outcome {other:?}"),
        }
        None
    }
}

/// `needle` must already be lowercase. An empty needle matches everything.
pub fn matches_filter(log: &MessageLog, needle: &str) -> bool {
    needle.is_empty()
        || log.incoming_message.to_lowercase().contains(needle)
        || log.response_message.to_lowercase().contains(needle)
        || log.user_id.to_lowercase().contains(needle)
}

pub fn normalize_rows_per_page(rows_per_page: u32) -> u32 {
    if ROWS_PER_PAGE_OPTIONS.contains(&rows_per_page) {
        rows_per_page
    } else {
        DEFAULT_ROWS_PER_PAGE
    }
}
