use slint::ComponentHandle;
use std::cell::RefCell;
use std::rc::Rc;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let conn = barmatch::store::init_store()?;
    let conn = Rc::new(RefCell::new(conn));

    let ui = barmatch::ui::MainWindow::new()?;

    let ui_handle = ui.as_weak();
    barmatch::ui_setup::initialize_ui_and_data(&ui, &conn, &ui_handle)?;

    barmatch::event_handlers::setup_event_handlers(conn.clone(), &ui);

    let _clock_timer = barmatch::timers::setup_timers(ui_handle);

    ui.run()?;
    Ok(())
}
