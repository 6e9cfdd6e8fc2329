use slint::SharedString;
use std::cell::RefCell;
use std::rc::Rc;

use crate::types::StatusView;
use crate::ui::AttemptRow;
use crate::utils::format_timestamp;

/// Reloads the archive table from the store, newest attempt on top.
pub fn refresh_archive(
    conn: &Rc<RefCell<rusqlite::Connection>>,
    ui_handle: &slint::Weak<crate::ui::MainWindow>,
) {
    if let Some(ui) = ui_handle.upgrade() {
        let conn_ref = conn.borrow();
        match crate::store::load_archive(&conn_ref) {
            Ok(attempts) => {
                let rows: Vec<AttemptRow> = attempts
                    .iter()
                    .map(|attempt| {
                        let view = StatusView::from_status(attempt.status);
                        AttemptRow {
                            datetime: SharedString::from(format_timestamp(attempt.timestamp)),
                            user: SharedString::from(attempt.user.as_str()),
                            full1: SharedString::from(attempt.full1.as_str()),
                            full2: SharedString::from(attempt.full2.as_str()),
                            prefix1: SharedString::from(attempt.prefix1.as_str()),
                            prefix2: SharedString::from(attempt.prefix2.as_str()),
                            status: SharedString::from(view.label()),
                            status_color: view.color(),
                        }
                    })
                    .collect();
                ui.set_attempts(Rc::new(slint::VecModel::from(rows)).into());
            }
            Err(e) => {
                ui.set_message_dialog_text(format!("Could not load the archive: {}", e).into());
                ui.set_show_message_dialog(true);
            }
        }
    }
}

/// Applies one of the three status cell states to the window.
pub fn apply_status(ui: &crate::ui::MainWindow, view: StatusView) {
    ui.set_status_label(view.label().into());
    ui.set_status_color(view.color());
}
