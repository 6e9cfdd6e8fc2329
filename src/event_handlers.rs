use chrono::Utc;
use std::cell::RefCell;
use std::path::Path;
use std::process::Command;
use std::rc::Rc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::archive_display::{apply_status, refresh_archive};
use crate::export::{self, EXPORT_DIR};
use crate::matcher::{self, MatchStatus};
use crate::scan::{self, PREFIX_LEN};
use crate::store::{self, Attempt};
use crate::substitution::{self, DEFAULT_SUBSTITUTION_TEXT};
use crate::types::StatusView;
use slint::ComponentHandle;

/// Delay before a successful match clears the code fields for the next scan.
const AUTO_CLEAR_DELAY: Duration = Duration::from_secs(5);

// HID scanners type character by character, so a code longer than the prefix
// keeps firing input events after the result is already logged. An identical
// prefix pair within this window is one physical scan, not a new attempt.
static LAST_SCAN: std::sync::Mutex<Option<(chrono::DateTime<Utc>, String, String)>> =
    std::sync::Mutex::new(None);

pub fn setup_event_handlers(conn: Rc<RefCell<rusqlite::Connection>>, ui: &crate::ui::MainWindow) {
    let ui_handle = ui.as_weak();

    let clear_timer = Rc::new(slint::Timer::default());

    let conn_user = conn.clone();
    let ui_handle_user = ui_handle.clone();
    ui.on_user_committed(move || {
        if let Some(ui) = ui_handle_user.upgrade() {
            let raw = ui.get_user_text().to_string();
            let cleaned = scan::user_letters(&raw);
            if raw != cleaned {
                ui.set_user_text(cleaned.clone().into());
            }
            if let Err(e) = store::set_user(&conn_user.borrow(), &cleaned) {
                warn!(error = %e, "could not persist user id");
            }
        }
    });

    let conn_scan = conn.clone();
    let ui_handle_scan = ui_handle.clone();
    let clear_timer_scan = clear_timer.clone();
    ui.on_code_scanned(move |source| {
        let Some(ui) = ui_handle_scan.upgrade() else {
            return;
        };
        let from_first = source.as_str() == "code1";
        debug!(source = source.as_str(), "code field input");

        // The badge comes first; nothing is evaluated or logged without it.
        let user = ui.get_user_text().trim().to_string();
        if user.is_empty() {
            ui.set_message_dialog_text("Scan your user badge first.".into());
            ui.set_show_message_dialog(true);
            ui.invoke_focus_user();
            return;
        }

        let full1 = ui.get_code1_text().trim().to_string();
        let full2 = ui.get_code2_text().trim().to_string();
        let complete =
            full1.chars().count() >= PREFIX_LEN && full2.chars().count() >= PREFIX_LEN;

        if !complete {
            clear_timer_scan.stop();
            apply_status(&ui, StatusView::Incomplete);
            if from_first {
                ui.invoke_focus_code2();
            }
            return;
        }

        let prefix1 = scan::code_prefix(&full1);
        let prefix2 = scan::code_prefix(&full2);

        let now = Utc::now();
        {
            let mut last_scan = LAST_SCAN.lock().unwrap();
            if let Some((at, p1, p2)) = last_scan.as_ref()
                && now.signed_duration_since(*at) < chrono::Duration::seconds(2)
                && *p1 == prefix1
                && *p2 == prefix2
            {
                debug!("duplicate delivery of the same scan ignored");
                return;
            }
            *last_scan = Some((now, prefix1.clone(), prefix2.clone()));
        }

        clear_timer_scan.stop();

        let pairs = substitution::parse_pairs(&ui.get_substitution_text());
        let status = matcher::evaluate(&prefix1, &prefix2, &pairs);
        apply_status(&ui, StatusView::from_status(status));
        info!(user = %user, %prefix1, %prefix2, %status, "attempt evaluated");

        let attempt = Attempt {
            timestamp: now,
            user,
            full1,
            full2,
            prefix1,
            prefix2,
            status,
        };
        if let Err(e) = store::append_attempt(&conn_scan.borrow(), attempt) {
            ui.set_message_dialog_text(format!("Could not log the attempt: {}", e).into());
            ui.set_show_message_dialog(true);
        }
        refresh_archive(&conn_scan, &ui_handle_scan);

        match status {
            MatchStatus::Match => {
                let ui_handle_auto = ui_handle_scan.clone();
                clear_timer_scan.start(
                    slint::TimerMode::SingleShot,
                    AUTO_CLEAR_DELAY,
                    move || {
                        if let Some(ui) = ui_handle_auto.upgrade() {
                            clear_codes_and_reset(&ui);
                        }
                    },
                );
            }
            MatchStatus::NoMatch => {
                if from_first {
                    ui.invoke_focus_code2();
                }
            }
        }
    });

    let ui_handle_clear = ui_handle.clone();
    let clear_timer_manual = clear_timer.clone();
    ui.on_clear_codes(move || {
        clear_timer_manual.stop();
        if let Some(ui) = ui_handle_clear.upgrade() {
            clear_codes_and_reset(&ui);
        }
    });

    let conn_save = conn.clone();
    let ui_handle_save = ui_handle.clone();
    ui.on_save_substitution(move || {
        if let Some(ui) = ui_handle_save.upgrade() {
            match store::set_substitution(&conn_save.borrow(), &ui.get_substitution_text()) {
                Ok(()) => {
                    ui.set_message_dialog_text("Substitution table saved.".into());
                    ui.set_show_message_dialog(true);
                }
                Err(e) => {
                    ui.set_message_dialog_text(
                        format!("Could not save the substitution table: {}", e).into(),
                    );
                    ui.set_show_message_dialog(true);
                }
            }
        }
    });

    let conn_reset = conn.clone();
    let ui_handle_reset = ui_handle.clone();
    ui.on_reset_substitution(move || {
        if let Some(ui) = ui_handle_reset.upgrade() {
            ui.set_substitution_text(DEFAULT_SUBSTITUTION_TEXT.into());
            if let Err(e) = store::set_substitution(&conn_reset.borrow(), DEFAULT_SUBSTITUTION_TEXT)
            {
                ui.set_message_dialog_text(
                    format!("Could not save the substitution table: {}", e).into(),
                );
                ui.set_show_message_dialog(true);
            }
        }
    });

    let conn_export = conn.clone();
    let ui_handle_export = ui_handle.clone();
    ui.on_export_archive(move || {
        if let Some(ui) = ui_handle_export.upgrade() {
            let result = export::export_archive(&conn_export.borrow(), Path::new(EXPORT_DIR));
            match result {
                Ok(path) => {
                    ui.set_export_status(format!("Exported to {}", path.display()).into());
                }
                Err(e) => {
                    ui.set_message_dialog_text(format!("Export failed: {}", e).into());
                    ui.set_show_message_dialog(true);
                }
            }
        }
    });

    let ui_handle_open = ui_handle.clone();
    ui.on_open_export_folder(move || {
        if let Some(ui) = ui_handle_open.upgrade() {
            let dir = Path::new(EXPORT_DIR);
            if !dir.exists() {
                ui.set_message_dialog_text("Nothing exported yet.".into());
                ui.set_show_message_dialog(true);
                return;
            }
            if let Err(e) = open_directory_in_file_manager(dir) {
                ui.set_message_dialog_text(
                    format!("Could not open {}: {}", dir.display(), e).into(),
                );
                ui.set_show_message_dialog(true);
            }
        }
    });

    let conn_clear_archive = conn.clone();
    let ui_handle_clear_archive = ui_handle.clone();
    ui.on_clear_archive_confirmed(move || {
        if let Some(ui) = ui_handle_clear_archive.upgrade() {
            match store::clear_archive(&conn_clear_archive.borrow()) {
                Ok(()) => {
                    info!("archive cleared");
                    refresh_archive(&conn_clear_archive, &ui_handle_clear_archive);
                }
                Err(e) => {
                    ui.set_message_dialog_text(
                        format!("Could not clear the archive: {}", e).into(),
                    );
                    ui.set_show_message_dialog(true);
                }
            }
        }
    });
}

fn clear_codes_and_reset(ui: &crate::ui::MainWindow) {
    ui.set_code1_text("".into());
    ui.set_code2_text("".into());
    apply_status(ui, StatusView::Incomplete);
    ui.invoke_focus_code1();
    // a deliberate re-verification of the same pair must not be swallowed
    *LAST_SCAN.lock().unwrap() = None;
}

fn open_directory_in_file_manager(path: &Path) -> std::io::Result<()> {
    #[cfg(target_os = "windows")]
    {
        Command::new("explorer").arg(path).spawn().map(|_| ())
    }
    #[cfg(target_os = "macos")]
    {
        Command::new("open").arg(path).spawn().map(|_| ())
    }
    #[cfg(all(not(target_os = "windows"), not(target_os = "macos")))]
    {
        Command::new("xdg-open").arg(path).spawn().map(|_| ())
    }
}
