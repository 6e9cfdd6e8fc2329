//! Scan-verification station: compares the 9-character prefixes of two
//! scanned item codes, honoring operator-configured substitution pairs, and
//! archives every attempt for CSV export.

pub mod archive_display;
pub mod event_handlers;
pub mod export;
pub mod matcher;
pub mod scan;
pub mod store;
pub mod substitution;
pub mod timers;
pub mod types;
pub mod ui_setup;
pub mod utils;

pub mod ui {
    slint::include_modules!();
}
