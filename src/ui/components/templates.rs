use eframe::egui;

use crate::common::{ApiCommand, TemplateId};
use crate::views::TemplatesView;
use crate::views::templates::DELETE_PROMPT;

use super::status;

enum RowAction {
    Create,
    Edit(TemplateId),
    Delete(TemplateId),
}

pub fn render(ui: &mut egui::Ui, view: &mut TemplatesView) -> Vec<ApiCommand> {
    let mut commands = Vec::new();
    if !status::render(ui, view.state()) {
        return commands;
    }

    let mut action = None;
    ui.horizontal(|ui| {
        ui.heading("Mesaj Şablonları");
        if ui.button("Yeni Şablon").clicked() {
            action = Some(RowAction::Create);
        }
    });
    ui.separator();

    egui::ScrollArea::vertical().show(ui, |ui| {
        egui::Grid::new("templates_table")
            .striped(true)
            .num_columns(4)
            .spacing([24.0, 8.0])
            .show(ui, |ui| {
                ui.strong("Tetikleyici Mesaj");
                ui.strong("Yanıt Mesajı");
                ui.strong("Durum");
                ui.strong("İşlemler");
                ui.end_row();

                for row in view.rows() {
                    ui.label(row.trigger);
                    ui.label(row.response);
                    ui.label(row.status);
                    ui.horizontal(|ui| {
                        if ui.button("Düzenle").clicked() {
                            action = Some(RowAction::Edit(row.id));
                        }
                        if ui.button("Sil").clicked() {
                            action = Some(RowAction::Delete(row.id));
                        }
                    });
                    ui.end_row();
                }
            });
    });

    match action {
        Some(RowAction::Create) => view.open_create(),
        Some(RowAction::Edit(id)) => {
            if let Some(template) = view.template(id).cloned() {
                view.open_edit(template);
            }
        }
        Some(RowAction::Delete(id)) => view.request_delete(id),
        None => {}
    }

    let ctx = ui.ctx().clone();
    if let Some(command) = render_editor(&ctx, view) {
        commands.push(command);
    }
    if let Some(command) = render_delete_prompt(&ctx, view) {
        commands.push(command);
    }
    commands
}

fn render_editor(ctx: &egui::Context, view: &mut TemplatesView) -> Option<ApiCommand> {
    let editor = view.editor_mut()?;
    let mut submit = false;
    let mut cancel = false;

    let modal = egui::Modal::new(egui::Id::new("template_editor")).show(ctx, |ui| {
        ui.set_width(360.0);
        ui.heading(editor.title());
        ui.add_space(8.0);
        ui.label("Tetikleyici Mesaj");
        ui.text_edit_singleline(&mut editor.form.trigger_text);
        ui.label("Yanıt Mesajı");
        ui.add(egui::TextEdit::multiline(&mut editor.form.response_text).desired_rows(4));
        ui.checkbox(&mut editor.form.is_active, "Aktif");
        ui.separator();
        ui.horizontal(|ui| {
            if ui
                .add_enabled(!editor.saving, egui::Button::new("İptal"))
                .clicked()
            {
                cancel = true;
            }
            let enabled = editor.form.is_submittable() && !editor.saving;
            if ui.add_enabled(enabled, egui::Button::new("Kaydet")).clicked() {
                submit = true;
            }
            if editor.saving {
                ui.spinner();
            }
        });
    });
    // Escape or a click on the backdrop cancels, except mid-save.
    if modal.should_close() && !editor.saving {
        cancel = true;
    }

    if cancel {
        view.close_editor();
        None
    } else if submit {
        view.submit()
    } else {
        None
    }
}

fn render_delete_prompt(ctx: &egui::Context, view: &mut TemplatesView) -> Option<ApiCommand> {
    view.pending_delete()?;
    let mut answer = None;

    let modal = egui::Modal::new(egui::Id::new("template_delete")).show(ctx, |ui| {
        ui.heading("Şablonu Sil");
        ui.add_space(8.0);
        ui.label(DELETE_PROMPT);
        ui.horizontal(|ui| {
            if ui.button("İptal").clicked() {
                answer = Some(false);
            }
            if ui.button("Sil").clicked() {
                answer = Some(true);
            }
        });
    });
    if answer.is_none() && modal.should_close() {
        answer = Some(false);
    }

    answer.and_then(|confirmed| view.resolve_delete(confirmed))
}
