use relay_logger::{LevelFilter, Logger, LoggerError};
use serial_test::serial;

#[test]
#[serial]
fn second_init_returns_subscriber_error() {
    let logger = Logger::builder("relay-init-once")
        .level(LevelFilter::INFO)
        .init()
        .expect("first init should succeed");
    assert!(!logger.has_file_sink(), "console-only logger holds no file guard");

    let err = Logger::builder("relay-init-twice")
        .level(LevelFilter::DEBUG)
        .init()
        .expect_err("second init should fail");

    assert!(matches!(err, LoggerError::Subscriber { .. }), "got {err:?}");
}
