use super::*;

#[test]
fn test_station_error_display_is_passed_through() {
    let error: Error = StationError::PreconditionViolated(
        "The configuration file /tmp/weewx.conf does not exist".to_string(),
    )
    .into();
    assert_eq!(
        error.to_string(),
        "Precondition violated: The configuration file /tmp/weewx.conf does not exist"
    );
    assert_eq!(error.exit_code(), 1);
}

#[test]
fn test_invalid_arguments_error_display() {
    let error = Error::InvalidArguments("--station-url requires --register y".to_string());
    assert_eq!(
        error.to_string(),
        "Invalid arguments: --station-url requires --register y"
    );
    assert_eq!(error.exit_code(), 2);
}

#[test]
fn test_error_debug_format() {
    let error = Error::InvalidArguments("test".to_string());
    let debug_output = format!("{:?}", error);
    assert!(debug_output.contains("InvalidArguments"));
    assert!(debug_output.contains("test"));
}

#[test]
fn test_error_is_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Error>();
}
