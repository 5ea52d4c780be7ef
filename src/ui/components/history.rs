use eframe::egui;

use crate::common::ApiCommand;
use crate::common::format::display_timestamp;
use crate::views::HistoryView;
use crate::views::history::ROWS_PER_PAGE_OPTIONS;

use super::status;

pub fn render(ui: &mut egui::Ui, view: &mut HistoryView) -> Option<ApiCommand> {
    status::render(ui, view.state());
    if !view.table_visible() {
        return None;
    }

    ui.heading("Mesaj Geçmişi");
    ui.add_space(8.0);
    ui.label("Ara");
    ui.add(
        egui::TextEdit::singleline(&mut view.search_term)
            .hint_text("Mesaj içeriği veya kullanıcı ID'si ile arayın...")
            .desired_width(f32::INFINITY),
    );
    ui.separator();

    egui::ScrollArea::vertical()
        .max_height(ui.available_height() - 40.0)
        .show(ui, |ui| {
            egui::Grid::new("history_table")
                .striped(true)
                .num_columns(4)
                .spacing([24.0, 8.0])
                .show(ui, |ui| {
                    ui.strong("Kullanıcı ID");
                    ui.strong("Gelen Mesaj");
                    ui.strong("Yanıt");
                    ui.strong("Tarih");
                    ui.end_row();

                    for log in view.filtered_logs() {
                        ui.label(&log.user_id);
                        ui.label(&log.incoming_message);
                        ui.label(&log.response_message);
                        ui.label(display_timestamp(&log.created_at));
                        ui.end_row();
                    }
                });
        });

    ui.separator();
    render_pagination(ui, view)
}

fn render_pagination(ui: &mut egui::Ui, view: &mut HistoryView) -> Option<ApiCommand> {
    let mut rows_per_page = view.rows_per_page();
    let mut previous = false;
    let mut next = false;

    ui.horizontal(|ui| {
        ui.label("Sayfa başına satır:");
        egui::ComboBox::from_id_salt("rows_per_page")
            .selected_text(rows_per_page.to_string())
            .show_ui(ui, |ui| {
                for option in ROWS_PER_PAGE_OPTIONS {
                    ui.selectable_value(&mut rows_per_page, option, option.to_string());
                }
            });
        ui.label(view.displayed_rows_label());
        ui.label(format!("Sayfa {}", view.page().saturating_add(1)));
        previous = ui
            .add_enabled(view.can_go_previous(), egui::Button::new("<"))
            .clicked();
        next = ui
            .add_enabled(view.can_go_next(), egui::Button::new(">"))
            .clicked();
    });

    if rows_per_page != view.rows_per_page() {
        view.set_rows_per_page(rows_per_page)
    } else if previous {
        view.previous_page()
    } else if next {
        view.next_page()
    } else {
        None
    }
}
