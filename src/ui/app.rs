use std::time::Duration;

use eframe::egui;
use tokio::sync::mpsc;

use crate::common::{ApiCommand, ApiEvent};

use super::components::{dashboard, history, sidebar, templates};
use super::state::{ActiveView, AppState};

pub struct AdminApp {
    state: AppState,
    command_sender: mpsc::Sender<ApiCommand>,
    event_receiver: mpsc::Receiver<ApiEvent>,
}

impl AdminApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        command_sender: mpsc::Sender<ApiCommand>,
        event_receiver: mpsc::Receiver<ApiEvent>,
        rows_per_page: u32,
    ) -> Self {
        let (state, first_fetch) = AppState::new(rows_per_page);
        let mut app = Self {
            state,
            command_sender,
            event_receiver,
        };
        app.dispatch(first_fetch);
        app
    }

    fn handle_api_events(&mut self) {
        while let Ok(event) = self.event_receiver.try_recv() {
            if let Some(command) = self.state.apply(event) {
                self.dispatch(command);
            }
        }
    }

    fn dispatch(&mut self, command: ApiCommand) {
        if let Err(err) = self.command_sender.try_send(command) {
            log::warn!("Failed to send command to API worker: {err}");
        }
    }
}

impl eframe::App for AdminApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_api_events();

        let mut commands = Vec::new();

        egui::SidePanel::left("navigation")
            .resizable(false)
            .default_width(180.0)
            .show(ctx, |ui| {
                if let Some(target) = sidebar::render(ui, self.state.route()) {
                    commands.extend(self.state.navigate(target));
                }
            });

        egui::CentralPanel::default().show(ctx, |ui| match &mut self.state.view {
            ActiveView::Dashboard(view) => dashboard::render(ui, view),
            ActiveView::Templates(view) => commands.extend(templates::render(ui, view)),
            ActiveView::History(view) => commands.extend(history::render(ui, view)),
        });

        for command in commands {
            self.dispatch(command);
        }

        // Results arrive on the channel without waking egui, so poll.
        ctx.request_repaint_after(Duration::from_millis(100));
    }
}
