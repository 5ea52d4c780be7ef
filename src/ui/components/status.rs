use eframe::egui;

use crate::views::LoadState;

/// Draws the spinner or the error message for a view that is not ready.
/// Returns `true` when the caller should render its data.
pub fn render<T>(ui: &mut egui::Ui, state: &LoadState<T>) -> bool {
    match state {
        LoadState::Ready(_) => true,
        LoadState::Idle | LoadState::Loading => {
            ui.vertical_centered(|ui| {
                ui.add_space(160.0);
                ui.spinner();
            });
            false
        }
        LoadState::Error(message) => {
            ui.vertical_centered(|ui| {
                ui.add_space(160.0);
                let color = ui.visuals().error_fg_color;
                ui.colored_label(color, message);
            });
            false
        }
    }
}
