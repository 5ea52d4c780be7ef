use crate::common::{ApiCommand, ApiEvent, ViewKind};
use crate::views::{DashboardView, HistoryView, TemplatesView};

/// The one screen that is alive right now. Switching screens drops the old one.
pub enum ActiveView {
    Dashboard(DashboardView),
    Templates(TemplatesView),
    History(HistoryView),
}

impl ActiveView {
    fn create(kind: ViewKind, rows_per_page: u32) -> Self {
        match kind {
            ViewKind::Dashboard => ActiveView::Dashboard(DashboardView::new()),
            ViewKind::Templates => ActiveView::Templates(TemplatesView::new()),
            ViewKind::History => ActiveView::History(HistoryView::new(rows_per_page)),
        }
    }

    pub fn kind(&self) -> ViewKind {
        match self {
            ActiveView::Dashboard(_) => ViewKind::Dashboard,
            ActiveView::Templates(_) => ViewKind::Templates,
            ActiveView::History(_) => ViewKind::History,
        }
    }

    fn activate(&mut self) -> ApiCommand {
        match self {
            ActiveView::Dashboard(view) => view.activate(),
            ActiveView::Templates(view) => view.activate(),
            ActiveView::History(view) => view.activate(),
        }
    }

    fn deactivate(&mut self) -> ApiCommand {
        match self {
            ActiveView::Dashboard(view) => view.deactivate(),
            ActiveView::Templates(view) => view.deactivate(),
            ActiveView::History(view) => view.deactivate(),
        }
    }

    fn apply(&mut self, event: ApiEvent) -> Option<ApiCommand> {
        match self {
            ActiveView::Dashboard(view) => view.apply(event),
            ActiveView::Templates(view) => view.apply(event),
            ActiveView::History(view) => view.apply(event),
        }
    }
}

/// Routing state of the shell.
pub struct AppState {
    pub view: ActiveView,
    rows_per_page: u32,
}

impl AppState {
    /// Starts on the dashboard. The returned command is its first fetch.
    pub fn new(rows_per_page: u32) -> (Self, ApiCommand) {
        let mut view = ActiveView::create(ViewKind::Dashboard, rows_per_page);
        let command = view.activate();
        (Self { view, rows_per_page }, command)
    }

    pub fn route(&self) -> ViewKind {
        self.view.kind()
    }

    /// Tears down the current screen and activates `target`.
    pub fn navigate(&mut self, target: ViewKind) -> Vec<ApiCommand> {
        if target == self.route() {
            return Vec::new();
        }
        log::info!("Navigating {:?} -> {:?}", self.route(), target);
        let cancel = self.view.deactivate();
        self.view = ActiveView::create(target, self.rows_per_page);
        vec![cancel, self.view.activate()]
    }

    pub fn apply(&mut self, event: ApiEvent) -> Option<ApiCommand> {
        if event.ticket.view != self.route() {
            log::debug!(
                "Dropping {:?} result #{} while on {:?}",
                event.ticket.view,
                event.ticket.token,
                self.route()
            );
            return None;
        }
        self.view.apply(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{ApiOutcome, ApiRequest, DashboardStats};
    use crate::views::LoadState;
    use crate::views::request::ticket_of;

    #[test]
    fn starts_on_dashboard_with_stats_fetch() {
        let (state, command) = AppState::new(10);

        assert_eq!(state.route(), ViewKind::Dashboard);
        assert!(matches!(
            command,
            ApiCommand::Request {
                request: ApiRequest::DashboardStats,
                ..
            }
        ));
    }

    #[test]
    fn navigation_cancels_old_view_and_fetches_new_one() {
        let (mut state, _) = AppState::new(25);

        let commands = state.navigate(ViewKind::History);

        assert_eq!(commands.len(), 2);
        assert_eq!(commands[0], ApiCommand::Cancel(ViewKind::Dashboard));
        assert!(matches!(
            commands[1],
            ApiCommand::Request {
                request: ApiRequest::ListLogs { page: 1, limit: 25 },
                ..
            }
        ));
        assert!(state.navigate(ViewKind::History).is_empty());
    }

    #[test]
    fn late_result_for_left_view_is_dropped() {
        let (mut state, first) = AppState::new(10);
        state.navigate(ViewKind::Templates);
        state.navigate(ViewKind::Dashboard);

        state.apply(ApiEvent {
            ticket: ticket_of(&first),
            outcome: ApiOutcome::Stats(Ok(DashboardStats::default())),
        });

        match &state.view {
            ActiveView::Dashboard(view) => assert_eq!(view.state(), &LoadState::Loading),
            _ => panic!("expected dashboard"),
        }
    }

    #[test]
    fn result_for_other_route_is_ignored() {
        let (mut state, first) = AppState::new(10);
        state.navigate(ViewKind::Templates);

        let follow_up = state.apply(ApiEvent {
            ticket: ticket_of(&first),
            outcome: ApiOutcome::Stats(Ok(DashboardStats::default())),
        });

        assert!(follow_up.is_none());
        assert_eq!(state.route(), ViewKind::Templates);
    }
}
