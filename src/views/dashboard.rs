use crate::common::format::{display_rate, display_timestamp};
use crate::common::{ApiCommand, ApiEvent, ApiOutcome, ApiRequest, DashboardStats, ViewKind};

use super::request::{LoadState, RequestTracker};

pub const LOAD_ERROR: &str = "İstatistikler yüklenirken bir hata oluştu.";

#[derive(Debug, Clone, PartialEq)]
pub struct StatCard {
    pub title: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecentMessageRow {
    pub incoming: String,
    pub response: String,
    pub received_at: String,
}

/// Read-only statistics screen. One fetch per activation.
pub struct DashboardView {
    tracker: RequestTracker,
    state: LoadState<DashboardStats>,
}

impl DashboardView {
    pub fn new() -> Self {
        Self {
            tracker: RequestTracker::new(ViewKind::Dashboard),
            state: LoadState::Idle,
        }
    }

    pub fn activate(&mut self) -> ApiCommand {
        self.state = LoadState::Loading;
        self.tracker.issue(ApiRequest::DashboardStats)
    }

    pub fn deactivate(&mut self) -> ApiCommand {
        self.tracker.invalidate()
    }

    pub fn apply(&mut self, event: ApiEvent) -> Option<ApiCommand> {
        if !self.tracker.accepts(event.ticket) {
            log::debug!("Dashboard ignoring stale result #{}", event.ticket.token);
            return None;
        }
        match event.outcome {
            ApiOutcome::Stats(Ok(stats)) => self.state = LoadState::Ready(stats),
            ApiOutcome::Stats(Err(err)) => {
                log::warn!("Dashboard stats failed: {err}");
                self.state = LoadState::Error(LOAD_ERROR.to_string());
            }
            other => log::warn!("Dashboard got unexpected outcome {other:?}"),
        }
        None
    }

    pub fn state(&self) -> &LoadState<DashboardStats> {
        &self.state
    }

    pub fn cards(&self) -> Option<[StatCard; 3]> {
        let stats = self.state.ready()?;
        Some([
            StatCard {
                title: "Toplam Mesaj",
                value: stats.total_messages.unwrap_or(0).to_string(),
            },
            StatCard {
                title: "Aktif Şablonlar",
                value: stats.active_templates.unwrap_or(0).to_string(),
            },
            StatCard {
                title: "Yanıt Oranı",
                value: display_rate(stats.response_rate),
            },
        ])
    }

    pub fn recent_messages(&self) -> Vec<RecentMessageRow> {
        self.state
            .ready()
            .map(|stats| {
                stats
                    .recent_messages
                    .iter()
                    .map(|log| RecentMessageRow {
                        incoming: log.incoming_message.clone(),
                        response: format!("Yanıt: {}", log.response_message),
                        received_at: display_timestamp(&log.created_at),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl Default for DashboardView {
    fn default() -> Self {
        Self::new()
    }
}
