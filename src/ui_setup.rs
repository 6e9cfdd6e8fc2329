use std::cell::RefCell;
use std::rc::Rc;

use chrono_tz::Europe::Brussels;

use crate::archive_display::{apply_status, refresh_archive};
use crate::store;
use crate::substitution::DEFAULT_SUBSTITUTION_TEXT;
use crate::types::StatusView;

pub fn initialize_ui_and_data(
    ui: &crate::ui::MainWindow,
    conn: &Rc<RefCell<rusqlite::Connection>>,
    ui_handle: &slint::Weak<crate::ui::MainWindow>,
) -> Result<(), Box<dyn std::error::Error>> {
    {
        let conn_ref = conn.borrow();
        if let Some(user) = store::get_user(&conn_ref)? {
            ui.set_user_text(user.into());
        }
        let substitution = store::get_substitution(&conn_ref)?
            .unwrap_or_else(|| DEFAULT_SUBSTITUTION_TEXT.to_string());
        ui.set_substitution_text(substitution.into());
    }

    let now = chrono::Utc::now().with_timezone(&Brussels);
    ui.set_current_time_display(now.format("%H:%M:%S").to_string().into());

    apply_status(ui, StatusView::Incomplete);
    refresh_archive(conn, ui_handle);

    // Scan workflow starts at the badge when nobody is signed in yet.
    if ui.get_user_text().trim().is_empty() {
        ui.invoke_focus_user();
    } else {
        ui.invoke_focus_code1();
    }

    Ok(())
}
