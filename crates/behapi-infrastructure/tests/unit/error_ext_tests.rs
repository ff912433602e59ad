//! Error Extension Tests

use std::io;

use behapi_domain::error::{Error, Result};
use behapi_infrastructure::error_ext::ErrorContext;

#[test]
fn test_context_wraps_into_infrastructure_error() {
    let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");

    let result: Result<()> = Err(io_error).context("failed to read file");

    match result {
        Err(Error::Infrastructure { message, source }) => {
            assert!(message.starts_with("failed to read file: "));
            assert!(message.contains("file not found"));
            assert!(source.is_some());
        }
        other => panic!("Expected Infrastructure error, got {other:?}"),
    }
}

#[test]
fn test_with_context_is_lazy() {
    let ok: std::result::Result<u8, io::Error> = Ok(1);
    let value = ok
        .with_context(|| -> String { panic!("context must not be built on success") })
        .unwrap();
    assert_eq!(value, 1);
}

#[test]
fn test_config_context() {
    let parse_error = "x".parse::<u32>().unwrap_err();
    let result: Result<u32> = Err(parse_error).config_context("bad port");

    assert!(matches!(result, Err(Error::Config { message }) if message.starts_with("bad port: ")));
}
