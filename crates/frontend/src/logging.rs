//! Browser console logging

use tracing_subscriber::prelude::*;
use tracing_web::MakeWebConsoleWriter;

/// Route panics and `tracing` events to the browser console
pub fn init() {
    console_error_panic_hook::set_once();

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .without_time()
        .with_writer(MakeWebConsoleWriter::new());

    // A second init (hot reload) keeps the first subscriber
    let _ = tracing_subscriber::registry().with(fmt_layer).try_init();
}
