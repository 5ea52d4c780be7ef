use std::sync::atomic::{AtomicU64, Ordering};

use crate::common::{ApiCommand, ApiRequest, Ticket, ViewKind};

// Shared across all trackers so a fresh view never reuses a token an older
// instance of the same view already handed out.
static NEXT_TOKEN: AtomicU64 = AtomicU64::new(1);

/// Load lifecycle of one view: `Idle -> Loading -> (Ready | Error)`.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(String),
}

impl<T> Default for LoadState<T> {
    fn default() -> Self {
        LoadState::Idle
    }
}

impl<T> LoadState<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            LoadState::Ready(data) => Some(data),
            _ => None,
        }
    }
}

/// Stamps requests with increasing tokens and accepts only the newest result.
#[derive(Debug)]
pub struct RequestTracker {
    view: ViewKind,
    latest: Option<u64>,
}

impl RequestTracker {
    pub fn new(view: ViewKind) -> Self {
        Self { view, latest: None }
    }

    pub fn issue(&mut self, request: ApiRequest) -> ApiCommand {
        let token = NEXT_TOKEN.fetch_add(1, Ordering::Relaxed);
        self.latest = Some(token);
        ApiCommand::Request {
            ticket: Ticket {
                view: self.view,
                token,
            },
            request,
        }
    }

    pub fn accepts(&self, ticket: Ticket) -> bool {
        ticket.view == self.view && self.latest == Some(ticket.token)
    }

    /// Like `accepts`, but settles the request so a duplicate delivery of the
    /// same result is rejected.
    pub fn complete(&mut self, ticket: Ticket) -> bool {
        if !self.accepts(ticket) {
            return false;
        }
        self.latest = None;
        true
    }

    /// True between `issue` and `complete`/`invalidate`.
    pub fn in_flight(&self) -> bool {
        self.latest.is_some()
    }

    /// Forget every outstanding request and return the matching cancel command.
    pub fn invalidate(&mut self) -> ApiCommand {
        self.latest = None;
        ApiCommand::Cancel(self.view)
    }
}

#[cfg(test)]
pub(crate) fn ticket_of(command: &ApiCommand) -> Ticket {
    match command {
        ApiCommand::Request { ticket, .. } => *ticket,
        ApiCommand::Cancel(view) => panic!("expected a request, got cancel for {view:?}"),
    }
}
