use std::collections::HashMap;

use tokio::sync::mpsc;
use tokio::task::AbortHandle;

use crate::common::{ApiCommand, ApiEvent, ApiOutcome, ApiRequest, Ticket, ViewKind};

use super::client::ApiClient;

/// Background half of the client: runs requests for the UI thread.
///
/// Each request runs in its own task, so overlapping requests may finish in
/// any order. Views sort that out with their tickets.
pub struct ApiWorker {
    client: ApiClient,
    event_sender: mpsc::Sender<ApiEvent>,
    command_receiver: mpsc::Receiver<ApiCommand>,
    in_flight: HashMap<ViewKind, Vec<AbortHandle>>,
}

impl ApiWorker {
    pub fn new(
        client: ApiClient,
        event_sender: mpsc::Sender<ApiEvent>,
        command_receiver: mpsc::Receiver<ApiCommand>,
    ) -> Self {
        Self {
            client,
            event_sender,
            command_receiver,
            in_flight: HashMap::new(),
        }
    }

    pub async fn run(mut self) {
        log::info!("API worker started against {}", self.client.base_url());

        while let Some(command) = self.command_receiver.recv().await {
            self.handle_command(command);
        }

        for handle in self.in_flight.values().flatten() {
            handle.abort();
        }
        log::info!("API worker stopped");
    }

    fn handle_command(&mut self, command: ApiCommand) {
        match command {
            ApiCommand::Request { ticket, request } => self.spawn_request(ticket, request),
            ApiCommand::Cancel(view) => self.cancel(view),
        }
    }

    fn spawn_request(&mut self, ticket: Ticket, request: ApiRequest) {
        log::debug!("{:?} #{} -> {:?}", ticket.view, ticket.token, request);
        let client = self.client.clone();
        let event_sender = self.event_sender.clone();

        let task = tokio::spawn(async move {
            let outcome = execute(&client, request).await;
            if let Err(err) = event_sender.send(ApiEvent { ticket, outcome }).await {
                log::warn!("UI is gone, dropping result for {:?}: {err}", ticket.view);
            }
        });

        let handles = self.in_flight.entry(ticket.view).or_default();
        handles.retain(|handle| !handle.is_finished());
        handles.push(task.abort_handle());
    }

    fn cancel(&mut self, view: ViewKind) {
        let Some(handles) = self.in_flight.remove(&view) else {
            return;
        };
        let pending = handles.iter().filter(|handle| !handle.is_finished()).count();
        for handle in handles {
            handle.abort();
        }
        if pending > 0 {
            log::debug!("Cancelled {pending} in-flight request(s) for {view:?}");
        }
    }
}

async fn execute(client: &ApiClient, request: ApiRequest) -> ApiOutcome {
    match request {
        ApiRequest::DashboardStats => ApiOutcome::Stats(client.dashboard_stats().await),
        ApiRequest::ListTemplates => ApiOutcome::Templates(client.list_templates().await),
        ApiRequest::CreateTemplate(draft) => {
            ApiOutcome::TemplateSaved(client.create_template(&draft).await)
        }
        ApiRequest::UpdateTemplate { id, patch } => {
            ApiOutcome::TemplateSaved(client.update_template(id, &patch).await)
        }
        ApiRequest::DeleteTemplate(id) => {
            ApiOutcome::TemplateDeleted(client.delete_template(id).await)
        }
        ApiRequest::ListLogs { page, limit } => {
            ApiOutcome::Logs(client.list_logs(page, limit).await)
        }
    }
}
