use eframe::egui;

use crate::views::DashboardView;

use super::status;

pub fn render(ui: &mut egui::Ui, view: &DashboardView) {
    if !status::render(ui, view.state()) {
        return;
    }

    ui.heading("Dashboard");
    ui.add_space(8.0);

    if let Some(cards) = view.cards() {
        ui.horizontal(|ui| {
            for card in cards {
                ui.group(|ui| {
                    ui.set_min_width(180.0);
                    ui.vertical(|ui| {
                        ui.label(egui::RichText::new(card.title).weak());
                        ui.label(egui::RichText::new(card.value).size(32.0).strong());
                    });
                });
            }
        });
    }

    ui.add_space(12.0);
    ui.group(|ui| {
        ui.heading("Son Mesajlar");
        ui.separator();
        egui::ScrollArea::vertical().show(ui, |ui| {
            for row in view.recent_messages() {
                ui.label(egui::RichText::new(row.incoming).strong());
                ui.label(row.response);
                ui.label(egui::RichText::new(row.received_at).weak());
                ui.separator();
            }
        });
    });
}
