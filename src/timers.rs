use chrono_tz::Europe::Brussels;

/// Starts the station clock, updating the header display every second.
/// The returned timer must stay alive for as long as the window runs.
pub fn setup_timers(ui_handle: slint::Weak<crate::ui::MainWindow>) -> slint::Timer {
    let time_timer = slint::Timer::default();
    time_timer.start(
        slint::TimerMode::Repeated,
        std::time::Duration::from_secs(1),
        move || {
            if let Some(ui) = ui_handle.upgrade() {
                let now = chrono::Utc::now().with_timezone(&Brussels);
                ui.set_current_time_display(now.format("%H:%M:%S").to_string().into());
            }
        },
    );
    time_timer
}
