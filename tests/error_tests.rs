// Error handling tests
// Author: kelexine (https://github.com/kelexine)

use axum::http::StatusCode;
use image_analyzer::error::{AppError, ServiceError, VisionError};
use std::error::Error;
use std::io;
use std::sync::Arc;

fn io_error(kind: io::ErrorKind, message: &str) -> io::Error {
    io::Error::new(kind, message.to_string())
}

#[test]
fn test_error_display_messages() {
    let errors = vec![
        VisionError::network(io_error(io::ErrorKind::ConnectionRefused, "connection refused")),
        VisionError::Timeout(Arc::new(io_error(io::ErrorKind::TimedOut, "30s"))),
        VisionError::Authentication("bad key".to_string()),
        VisionError::InvalidImage("too small".to_string()),
        VisionError::QuotaExceeded("slow down".to_string()),
        VisionError::UnexpectedPayload("missing field".to_string()),
        VisionError::ImageRead("eof".to_string()),
    ];

    for error in errors {
        let display = format!("{}", error);
        assert!(!display.is_empty(), "Error should have display message");
    }
}

#[test]
fn test_service_error_names_operation() {
    let cause = VisionError::network(io_error(io::ErrorKind::ConnectionReset, "reset"));
    assert!(ServiceError::Analysis(cause.clone()).to_string().contains("analyze"));
    assert!(ServiceError::TextExtraction(cause.clone()).to_string().contains("extract text"));
    assert!(ServiceError::Moderation(cause).to_string().contains("moderate"));
}

#[test]
fn test_service_error_source_is_cause() {
    let err = ServiceError::Moderation(VisionError::InvalidImage("corrupt".to_string()));
    let source = err.source().unwrap();
    assert!(source.to_string().contains("corrupt"));
    assert!(matches!(err.cause(), VisionError::InvalidImage(msg) if msg == "corrupt"));
}

#[test]
fn test_network_error_keeps_transport_source() {
    let err = ServiceError::TextExtraction(VisionError::network(io_error(
        io::ErrorKind::ConnectionRefused,
        "connection refused by peer",
    )));

    let vision = err.source().unwrap();
    let transport = vision.source().unwrap();
    assert_eq!(transport.to_string(), "connection refused by peer");

    let io_err = transport.downcast_ref::<io::Error>().unwrap();
    assert_eq!(io_err.kind(), io::ErrorKind::ConnectionRefused);
}

#[test]
fn test_app_error_message_includes_cause() {
    let cause = VisionError::Timeout(Arc::new(io_error(io::ErrorKind::TimedOut, "after 30s")));
    let err = AppError::from(ServiceError::Analysis(cause));
    let message = err.to_string();
    assert!(message.contains("Failed to analyze image"));
    assert!(message.contains("after 30s"));
}

#[test]
fn test_status_mapping() {
    let cases = vec![
        (VisionError::InvalidImage("x".to_string()), StatusCode::BAD_REQUEST),
        (VisionError::QuotaExceeded("x".to_string()), StatusCode::TOO_MANY_REQUESTS),
        (VisionError::Authentication("x".to_string()), StatusCode::BAD_GATEWAY),
        (
            VisionError::network(io_error(io::ErrorKind::ConnectionReset, "x")),
            StatusCode::SERVICE_UNAVAILABLE,
        ),
        (
            VisionError::Timeout(Arc::new(io_error(io::ErrorKind::TimedOut, "x"))),
            StatusCode::GATEWAY_TIMEOUT,
        ),
        (
            VisionError::Api { status: 500, code: "InternalServerError".to_string(), message: "x".to_string() },
            StatusCode::BAD_GATEWAY,
        ),
        (VisionError::UnexpectedPayload("x".to_string()), StatusCode::BAD_GATEWAY),
    ];

    for (cause, expected) in cases {
        let (status, _) = AppError::from(ServiceError::Analysis(cause)).classify();
        assert_eq!(status, expected);
    }
}

#[test]
fn test_transport_errors_status() {
    assert_eq!(AppError::InvalidRequest("x".to_string()).classify().0, StatusCode::BAD_REQUEST);
    assert_eq!(
        AppError::UnsupportedMediaType("x".to_string()).classify().0,
        StatusCode::UNSUPPORTED_MEDIA_TYPE
    );
    assert_eq!(AppError::PayloadTooLarge("x".to_string()).classify().0, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(AppError::Config("x".to_string()).classify().1, "configuration_error");
}
