use eframe::egui;

use crate::common::ViewKind;

/// Navigation list. Returns the route the user picked, if it changed.
pub fn render(ui: &mut egui::Ui, current: ViewKind) -> Option<ViewKind> {
    ui.heading("AutoReplyBot");
    ui.separator();

    let mut selected = current;
    for kind in ViewKind::ALL {
        ui.selectable_value(&mut selected, kind, kind.title());
    }

    (selected != current).then_some(selected)
}
