//! Installs the process-wide subscriber, so it lives in its own test binary.

use campus_logger::{Logger, LoggerError};

#[test]
fn console_logger_installs_once() {
    let logger = Logger::builder()
        .name("campus-server")
        .env_filter("campus_server=debug,tower_http=info,warn")
        .init()
        .expect("console logger should initialize");
    assert!(logger.guard().is_none(), "console output needs no worker guard");

    tracing::info!(email = "emma@mergington.edu", "console only");

    let err = Logger::builder()
        .name("campus-server-again")
        .init()
        .expect_err("a second global subscriber must be refused");
    assert!(matches!(err, LoggerError::Subscriber { .. }), "{err}");
}
